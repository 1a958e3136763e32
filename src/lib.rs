//! # gridcast
//!
//! A command-line forecasting pipeline for RRD-style gridded time series:
//! fetch a window of named series, fit an ARIMA or seasonal ARIMA model per
//! series, assemble a multi-horizon forecast with nested confidence bands,
//! and emit a drawable scene plus an optional CSV export.
//!
//! Series are processed independently and sequentially; a failed fit skips
//! that series and is reported, while configuration errors abort the run
//! before any fitting starts.

#![allow(clippy::upper_case_acronyms)]

pub mod core;
pub mod error;
pub mod export;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod source;
pub mod utils;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::core::{resolve_season_offset, Prediction, TimeGrid, TimeSeries};
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::{Forecaster, ModelOrder, SeasonalOrder};
    pub use crate::pipeline::{run, BatchOutcome, ForecastJob};
    pub use crate::source::{FetchRequest, FetchResponse, SeriesSource};
}
