//! Assembled prediction results: point forecast plus nested bands.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Duration, Utc};

/// The fixed family of confidence levels, in ascending order.
///
/// The order is a visual contract, not an iteration accident: bands are
/// assembled, stored, and drawn in this order, each with opacity
/// `1 - level/100`, so the widest band is listed last.
pub const CONFIDENCE_LEVELS: [u8; 3] = [25, 50, 75];

/// Two-sided significance threshold for a confidence level in percent.
pub fn alpha(level: u8) -> f64 {
    1.0 - f64::from(level) / 100.0
}

/// Lower/upper interval bounds at one confidence level.
#[derive(Debug, Clone)]
pub struct Band {
    pub level: u8,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

/// A per-series forecast over the combined in-sample and out-of-sample
/// domain: uniformly gridded point predictions plus one band per
/// confidence level, ascending.
#[derive(Debug, Clone)]
pub struct Prediction {
    start: DateTime<Utc>,
    step: Duration,
    mean: Vec<f64>,
    bands: Vec<Band>,
}

impl Prediction {
    pub fn new(start: DateTime<Utc>, step: Duration, mean: Vec<f64>) -> Self {
        Self {
            start,
            step,
            mean,
            bands: vec![],
        }
    }

    /// Append a band. Bands must arrive in strictly ascending level order
    /// and match the point-forecast domain in length.
    pub fn push_band(&mut self, band: Band) -> Result<()> {
        if band.lower.len() != self.mean.len() || band.upper.len() != self.mean.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "band length {} does not match domain length {}",
                band.lower.len(),
                self.mean.len()
            )));
        }
        if let Some(last) = self.bands.last() {
            if band.level <= last.level {
                return Err(ForecastError::InvalidParameter(
                    "bands must be appended in ascending level order".to_string(),
                ));
            }
        }
        self.bands.push(band);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Bands in ascending level order.
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn band(&self, level: u8) -> Option<&Band> {
        self.bands.iter().find(|b| b.level == level)
    }

    /// Timestamp of the k-th prediction point.
    pub fn timestamp(&self, k: usize) -> DateTime<Utc> {
        self.start + self.step * (k as i32)
    }

    /// All prediction timestamps, in chronological order.
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        (0..self.len()).map(|k| self.timestamp(k)).collect()
    }
}
