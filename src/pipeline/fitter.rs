//! Two-branch model selection and fitting.

use crate::core::TimeSeries;
use crate::error::Result;
use crate::models::{BoxedForecaster, Forecaster, ModelOrder, SeasonalOrder, ARIMA, SARIMA};

/// Fit the appropriate model for a prepared, gap-trimmed series.
///
/// A resolved seasonal order (offset > 0) selects the seasonal model;
/// otherwise the plain ARIMA order is used. Errors are scoped to the
/// series being fitted.
pub fn fit_model(
    series: &TimeSeries,
    order: ModelOrder,
    seasonal: Option<SeasonalOrder>,
) -> Result<BoxedForecaster> {
    let mut model: BoxedForecaster = match seasonal {
        Some(seasonal) if seasonal.s > 0 => Box::new(SARIMA::new(order, seasonal)),
        _ => Box::new(ARIMA::from_order(order)),
    };
    model.fit(series)?;
    Ok(model)
}
