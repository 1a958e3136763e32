//! Error types for the gridcast pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while resolving, fitting, or forecasting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Seasonal parameters are inconsistent or incoherent. Fatal for the
    /// whole run; raised before any fitting is attempted.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Parameter estimation failed for one series. Scoped to that series;
    /// the rest of the batch continues.
    #[error("fit error: {0}")]
    Fit(String),

    /// A series has no usable observations.
    #[error("empty input data")]
    EmptyData,

    /// Too few observations for the requested model order.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Model has not been fitted yet.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// Timestamp-related error.
    #[error("timestamp error: {0}")]
    Timestamp(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The data source could not produce the requested window.
    #[error("source error: {0}")]
    Source(String),
}

impl ForecastError {
    /// Whether this error condemns only the series being processed rather
    /// than the whole run. Fit and data errors are recoverable at the batch
    /// level; configuration and source errors are not.
    pub fn is_series_scoped(&self) -> bool {
        matches!(
            self,
            ForecastError::Fit(_)
                | ForecastError::EmptyData
                | ForecastError::InsufficientData { .. }
                | ForecastError::FitRequired
        )
    }
}
