//! Core data structures: the sampling grid, gapped series, and assembled
//! predictions.

mod grid;
mod prediction;
mod time_series;

pub use grid::{resolve_season_offset, TimeGrid};
pub use prediction::{alpha, Band, Prediction, CONFIDENCE_LEVELS};
pub use time_series::TimeSeries;
