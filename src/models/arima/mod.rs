//! ARIMA and SARIMA models: differencing, estimation, and forecasting.

mod diff;
mod model;

pub use diff::{difference, integrate, seasonal_difference, seasonal_integrate};
pub use model::{ModelOrder, SeasonalOrder, ARIMA, SARIMA};
