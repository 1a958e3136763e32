//! Assembly of the full-domain prediction with nested confidence bands.

use crate::core::{Band, Prediction, TimeGrid, CONFIDENCE_LEVELS};
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use crate::utils::stats::quantile_normal;
use chrono::Duration;

/// Build the combined in-sample and out-of-sample prediction for one
/// fitted model.
///
/// The domain starts at `grid.start` and runs `forecast_period / step`
/// steps past `grid.end`. The fitted window begins `lead` samples into
/// the grid (leading gaps cannot be fitted and stay missing); everything
/// after the fitted window is a genuine model forecast. Bands are
/// assembled for each confidence level in ascending order: the in-sample
/// half-width uses the constant residual standard error, the out-of-sample
/// half-width widens with the forecast horizon.
pub fn assemble(
    model: &dyn Forecaster,
    grid: &TimeGrid,
    lead: usize,
    forecast_period: Duration,
) -> Result<Prediction> {
    let fitted = model.fitted_values().ok_or(ForecastError::FitRequired)?;
    let observed = grid.len();
    let fitted_end = lead + fitted.len();
    if fitted_end > observed {
        return Err(ForecastError::InvalidParameter(format!(
            "fitted window of {} samples exceeds the {}-sample grid",
            fitted_end, observed
        )));
    }

    let horizon = (forecast_period.num_seconds() / grid.step.num_seconds()).max(0) as usize;
    // Steps the model must produce: the tail of the observed window that
    // could not be fitted, plus the forecast period past the grid end
    let future = observed - fitted_end + horizon;
    let total = observed + horizon;

    let mut mean = vec![f64::NAN; total];
    mean[lead..fitted_end].copy_from_slice(fitted);
    let point = model.predict(future)?;
    mean[fitted_end..].copy_from_slice(&point);

    let sigma = model.residual_std_error().unwrap_or(0.0);
    let mut prediction = Prediction::new(grid.start, grid.step, mean);

    for &level in &CONFIDENCE_LEVELS {
        let fraction = f64::from(level) / 100.0;
        let z = quantile_normal((1.0 + fraction) / 2.0);
        let interval = model.predict_with_intervals(future, fraction)?;

        let mut lower = vec![f64::NAN; total];
        let mut upper = vec![f64::NAN; total];
        for k in lead..fitted_end {
            let center = prediction.mean()[k];
            lower[k] = center - z * sigma;
            upper[k] = center + z * sigma;
        }
        lower[fitted_end..].copy_from_slice(&interval.lower);
        upper[fitted_end..].copy_from_slice(&interval.upper);

        prediction.push_band(Band { level, lower, upper })?;
    }

    Ok(prediction)
}
