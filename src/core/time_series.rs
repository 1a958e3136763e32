//! Gapped univariate time series and gap preparation.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Utc};

/// A univariate time series with strictly increasing timestamps.
///
/// A gap (missing observation) is encoded as a non-finite value. The series
/// is never mutated in place; preparation steps derive new series.
#[derive(Debug, Clone)]
pub struct TimeSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a series, validating that timestamps are strictly increasing
    /// and match the values in length.
    pub fn new(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "timestamp count {} does not match value count {}",
                timestamps.len(),
                values.len()
            )));
        }
        for pair in timestamps.windows(2) {
            if pair[1] <= pair[0] {
                return Err(ForecastError::Timestamp(
                    "timestamps must be strictly increasing".to_string(),
                ));
            }
        }
        Ok(Self { timestamps, values })
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of non-gap observations.
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_finite()).count()
    }

    /// Whether any observation is a gap.
    pub fn has_gaps(&self) -> bool {
        self.values.iter().any(|v| !v.is_finite())
    }

    /// Return a copy with interior gaps filled by time-proportional linear
    /// interpolation between the nearest valid neighbors.
    ///
    /// Leading and trailing gaps have no neighbor on one side and are
    /// preserved as gaps; nothing is extrapolated. The output covers the
    /// same timestamps as the input.
    pub fn interpolated(&self) -> TimeSeries {
        let mut values = self.values.clone();
        let n = values.len();

        let mut i = 0;
        while i < n {
            if values[i].is_finite() {
                i += 1;
                continue;
            }
            let gap_start = i;
            while i < n && !values[i].is_finite() {
                i += 1;
            }
            // Gap covers [gap_start, i); interpolable only with both neighbors
            if gap_start == 0 || i == n {
                continue;
            }
            let t0 = self.timestamps[gap_start - 1];
            let t1 = self.timestamps[i];
            let v0 = values[gap_start - 1];
            let v1 = values[i];
            let span = (t1 - t0).num_seconds() as f64;
            for j in gap_start..i {
                let elapsed = (self.timestamps[j] - t0).num_seconds() as f64;
                values[j] = v0 + (v1 - v0) * (elapsed / span);
            }
        }

        TimeSeries {
            timestamps: self.timestamps.clone(),
            values,
        }
    }

    /// Strip leading and trailing gaps, returning the number of leading
    /// samples removed together with the trimmed copy.
    pub fn trimmed(&self) -> (usize, TimeSeries) {
        let first = self.values.iter().position(|v| v.is_finite());
        let last = self.values.iter().rposition(|v| v.is_finite());
        match (first, last) {
            (Some(first), Some(last)) => (
                first,
                TimeSeries {
                    timestamps: self.timestamps[first..=last].to_vec(),
                    values: self.values[first..=last].to_vec(),
                },
            ),
            _ => (
                0,
                TimeSeries {
                    timestamps: vec![],
                    values: vec![],
                },
            ),
        }
    }
}
