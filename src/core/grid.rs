//! Uniform time grid and seasonal-offset resolution.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Duration, Utc};

/// A uniform sampling grid over the half-open interval `[start, end)`.
///
/// Observations sit at `start + k * step`; the last observation is at
/// `end - step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeGrid {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub step: Duration,
}

impl TimeGrid {
    /// Create a grid, validating that the step is positive, the interval is
    /// non-empty, and the interval is an exact number of steps.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, step: Duration) -> Result<Self> {
        if step <= Duration::zero() {
            return Err(ForecastError::InvalidParameter(
                "grid step must be positive".to_string(),
            ));
        }
        if end <= start {
            return Err(ForecastError::InvalidParameter(
                "grid end must come after grid start".to_string(),
            ));
        }
        if (end - start).num_seconds() % step.num_seconds() != 0 {
            return Err(ForecastError::Timestamp(format!(
                "grid span of {}s is not a multiple of the {}s step",
                (end - start).num_seconds(),
                step.num_seconds()
            )));
        }
        Ok(Self { start, end, step })
    }

    /// Number of sample points in the grid domain.
    pub fn len(&self) -> usize {
        ((self.end - self.start).num_seconds() / self.step.num_seconds()) as usize
    }

    /// A valid grid always holds at least one point.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Timestamp of the k-th sample point.
    pub fn point(&self, k: usize) -> DateTime<Utc> {
        self.start + self.step * (k as i32)
    }

    /// All sample timestamps, in order.
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        (0..self.len()).map(|k| self.point(k)).collect()
    }

    /// Timestamp of the last observation, `end - step`.
    pub fn last_observation(&self) -> DateTime<Utc> {
        self.end - self.step
    }
}

/// Derive the seasonal offset (steps per seasonal cycle) from the resolved
/// grid step and the user-supplied seasonal period.
///
/// Returns 0 when no seasonal component was requested. Seasonal order and
/// seasonal period travel together: either one appearing without the other
/// is rejected, as are periods shorter than two steps and periods that are
/// not an exact multiple of the step. All checks run only when seasonal
/// parameters are present.
pub fn resolve_season_offset(
    step: Duration,
    seasonal_period: Option<Duration>,
    has_seasonal_order: bool,
) -> Result<usize> {
    let period = match (seasonal_period, has_seasonal_order) {
        (None, false) => return Ok(0),
        (None, true) => {
            return Err(ForecastError::Configuration(
                "seasonal order given without a seasonal period".to_string(),
            ))
        }
        (Some(_), false) => {
            return Err(ForecastError::Configuration(
                "seasonal period given without a seasonal order".to_string(),
            ))
        }
        (Some(period), true) => period,
    };

    let step_s = step.num_seconds();
    let period_s = period.num_seconds();
    let offset = period_s / step_s;

    if offset < 2 {
        return Err(ForecastError::Configuration(format!(
            "seasonal period too short: step is {}s and seasonal period is {}s",
            step_s, period_s
        )));
    }
    if period_s % step_s != 0 {
        return Err(ForecastError::Configuration(format!(
            "seasonal period of {}s is not a multiple of the {}s step",
            period_s, step_s
        )));
    }

    Ok(offset as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn grid_jan(step: Duration) -> TimeGrid {
        TimeGrid::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap(),
            step,
        )
        .unwrap()
    }

    #[test]
    fn grid_counts_hourly_january() {
        let grid = grid_jan(Duration::hours(1));
        assert_eq!(grid.len(), 720);
        assert_eq!(grid.point(0), grid.start);
        assert_eq!(
            grid.last_observation(),
            Utc.with_ymd_and_hms(2024, 1, 30, 23, 0, 0).unwrap()
        );
        assert_eq!(grid.timestamps().len(), 720);
    }

    #[test]
    fn grid_rejects_degenerate_bounds() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(TimeGrid::new(start, start, Duration::hours(1)).is_err());
        assert!(TimeGrid::new(start, start + Duration::hours(2), Duration::zero()).is_err());
        // Span not a multiple of the step
        assert!(TimeGrid::new(start, start + Duration::minutes(90), Duration::hours(1)).is_err());
    }

    #[test]
    fn season_offset_exact_multiple() {
        let offset =
            resolve_season_offset(Duration::hours(1), Some(Duration::hours(24)), true).unwrap();
        assert_eq!(offset, 24);

        let offset =
            resolve_season_offset(Duration::minutes(5), Some(Duration::hours(1)), true).unwrap();
        assert_eq!(offset, 12);
    }

    #[test]
    fn season_offset_absent_when_not_requested() {
        assert_eq!(resolve_season_offset(Duration::hours(1), None, false).unwrap(), 0);
    }

    #[test]
    fn season_offset_rejects_short_period() {
        // One step per cycle is not modelable
        let err =
            resolve_season_offset(Duration::hours(1), Some(Duration::hours(1)), true).unwrap_err();
        assert!(matches!(err, ForecastError::Configuration(_)));
    }

    #[test]
    fn season_offset_rejects_fractional_period() {
        // 150m / 1h floors to 2, which passes the minimum-length check, but
        // the 30m remainder makes it incoherent
        let err =
            resolve_season_offset(Duration::hours(1), Some(Duration::minutes(150)), true)
                .unwrap_err();
        assert!(matches!(err, ForecastError::Configuration(_)));
        assert!(err.to_string().contains("not a multiple"));
    }

    #[test]
    fn season_offset_rejects_unpaired_parameters() {
        let err = resolve_season_offset(Duration::hours(1), Some(Duration::hours(24)), false)
            .unwrap_err();
        assert!(matches!(err, ForecastError::Configuration(_)));

        let err = resolve_season_offset(Duration::hours(1), None, true).unwrap_err();
        assert!(matches!(err, ForecastError::Configuration(_)));
    }
}
