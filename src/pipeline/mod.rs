//! Batch orchestration: resolve, prepare, fit, assemble, and shape results
//! for every named series in a fetched window.

mod fitter;
mod intervals;

pub use fitter::fit_model;
pub use intervals::assemble;

use crate::core::{resolve_season_offset, Prediction, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::models::{Forecaster, ModelOrder, SeasonalOrder};
use crate::render::{scene, FigureScene};
use crate::source::FetchResponse;
use chrono::Duration;
use tracing::{info, warn};

/// Everything the pipeline needs besides the fetched data.
#[derive(Debug, Clone)]
pub struct ForecastJob {
    /// Non-seasonal order (p, d, q).
    pub order: ModelOrder,
    /// Seasonal order triple (P, D, Q), required iff a seasonal period is
    /// given.
    pub seasonal_order: Option<(usize, usize, usize)>,
    /// Wall-clock seasonal period, required iff a seasonal order is given.
    pub seasonal_period: Option<Duration>,
    /// How far past the last observation to forecast.
    pub forecast_period: Duration,
}

/// One successfully forecasted series.
#[derive(Debug, Clone)]
pub struct SeriesForecast {
    pub name: String,
    pub prediction: Prediction,
    pub scene: FigureScene,
}

/// Result of a batch run: completed series plus reported failures.
#[derive(Debug)]
pub struct BatchOutcome {
    pub forecasts: Vec<SeriesForecast>,
    pub failures: Vec<(String, ForecastError)>,
}

impl BatchOutcome {
    pub fn fully_successful(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run the pipeline over every series in the fetched window.
///
/// Seasonal configuration is validated once against the resolved grid
/// before any fitting; a configuration error aborts the whole run. Each
/// series is then processed independently: a series-scoped failure is
/// reported and recorded, and the batch moves on.
pub fn run(response: &FetchResponse, job: &ForecastJob) -> Result<BatchOutcome> {
    let grid = &response.grid;
    let season_offset = resolve_season_offset(
        grid.step,
        job.seasonal_period,
        job.seasonal_order.is_some(),
    )?;
    let seasonal = job
        .seasonal_order
        .map(|(p, d, q)| SeasonalOrder::new(p, d, q, season_offset));

    let mut forecasts = Vec::new();
    let mut failures = Vec::new();

    for (name, raw) in &response.series {
        match forecast_series(name, raw, response, job, seasonal) {
            Ok(result) => forecasts.push(result),
            Err(err) if err.is_series_scoped() => {
                warn!(series = %name, error = %err, "skipping series");
                failures.push((name.clone(), err));
            }
            Err(err) => return Err(err),
        }
    }

    Ok(BatchOutcome {
        forecasts,
        failures,
    })
}

fn forecast_series(
    name: &str,
    raw: &TimeSeries,
    response: &FetchResponse,
    job: &ForecastJob,
    seasonal: Option<SeasonalOrder>,
) -> Result<SeriesForecast> {
    let prepared = raw.interpolated();
    let (lead, trimmed) = prepared.trimmed();
    if trimmed.is_empty() {
        return Err(ForecastError::EmptyData);
    }

    let model = fit_model(&trimmed, job.order, seasonal)?;
    info!(series = %name, "fitted model\n{}", model.summary());

    let prediction = assemble(model.as_ref(), &response.grid, lead, job.forecast_period)?;
    let scene = scene(name, &prepared, &prediction, &response.grid);

    Ok(SeriesForecast {
        name: name.to_string(),
        prediction,
        scene,
    })
}
