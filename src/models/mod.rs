//! Forecasting models and their common interface.

pub mod arima;

pub use arima::{ModelOrder, SeasonalOrder, ARIMA, SARIMA};

use crate::core::TimeSeries;
use crate::error::Result;

/// Point forecast with lower/upper interval bounds at one confidence level.
#[derive(Debug, Clone)]
pub struct IntervalForecast {
    pub point: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

/// Common interface for fitted forecasting models.
///
/// Object-safe so the pipeline can hold either model flavor behind
/// `Box<dyn Forecaster>`.
pub trait Forecaster {
    /// Fit the model to a gap-free series.
    fn fit(&mut self, series: &TimeSeries) -> Result<()>;

    /// Forecast the given number of steps past the fitted window.
    fn predict(&self, horizon: usize) -> Result<Vec<f64>>;

    /// Forecast with a two-sided interval at the given confidence level
    /// (a fraction in `(0, 1)`).
    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<IntervalForecast>;

    /// One-step-ahead in-sample predictions on the original scale.
    fn fitted_values(&self) -> Option<&[f64]>;

    /// In-sample residuals (observed minus fitted).
    fn residuals(&self) -> Option<&[f64]>;

    /// Standard error of the in-sample residuals.
    fn residual_std_error(&self) -> Option<f64>;

    /// Model family name.
    fn name(&self) -> &str;

    /// Human-readable fit report: order, coefficients, diagnostics. Only
    /// for display; nothing downstream parses it.
    fn summary(&self) -> String;

    fn is_fitted(&self) -> bool {
        self.fitted_values().is_some()
    }
}

/// Type alias for boxed forecaster trait objects.
pub type BoxedForecaster = Box<dyn Forecaster>;
