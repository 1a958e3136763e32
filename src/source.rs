//! Fetch collaborator: supplies named series over a resolved grid.
//!
//! The pipeline asks for a window (start, end, preferred step) and must use
//! the grid the source actually resolved, since the source may coarsen the
//! step. `FileSource` reads a flat RRD-dump-style CSV and consolidates by
//! averaging, the way a round-robin store serves coarser resolutions.

use crate::core::{TimeGrid, TimeSeries};
use crate::error::{ForecastError, Result};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Default fetch window when no start is given, in days.
const DEFAULT_WINDOW_DAYS: i64 = 30;

/// A requested fetch window. Every field is optional; the source fills in
/// defaults and reports what it actually resolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchRequest {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    /// Preferred step; the source may coarsen it to a multiple of its
    /// native resolution.
    pub step: Option<Duration>,
}

/// A fetched window: the resolved grid plus one series per data column,
/// in file order.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub grid: TimeGrid,
    pub series: Vec<(String, TimeSeries)>,
}

/// Supplies named time series over a uniform grid.
pub trait SeriesSource {
    fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse>;
}

/// Flat-file source: a header `timestamp,<name>[,<name>...]` followed by
/// one row per sample with an integer unix timestamp and one value cell
/// per series. Empty, `nan`, or `U` cells are gaps.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

struct RawTable {
    names: Vec<String>,
    rows: Vec<(i64, Vec<f64>)>,
}

fn parse_value(cell: &str) -> Result<f64> {
    let cell = cell.trim();
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") || cell.eq_ignore_ascii_case("u") {
        return Ok(f64::NAN);
    }
    cell.parse::<f64>()
        .map_err(|_| ForecastError::Source(format!("unparsable value cell '{}'", cell)))
}

fn parse_table(content: &str) -> Result<RawTable> {
    let mut lines = content.lines().filter(|l| !l.trim().is_empty());

    let header = lines
        .next()
        .ok_or_else(|| ForecastError::Source("input file is empty".to_string()))?;
    let names: Vec<String> = header
        .split(',')
        .skip(1)
        .map(|name| name.trim().to_string())
        .collect();
    if names.is_empty() {
        return Err(ForecastError::Source(
            "header declares no series columns".to_string(),
        ));
    }

    let mut rows = Vec::new();
    for line in lines {
        let mut cells = line.split(',');
        let epoch: i64 = cells
            .next()
            .unwrap_or("")
            .trim()
            .parse()
            .map_err(|_| ForecastError::Source(format!("unparsable timestamp in '{}'", line)))?;
        let values: Vec<f64> = cells.map(parse_value).collect::<Result<_>>()?;
        if values.len() != names.len() {
            return Err(ForecastError::Source(format!(
                "row at {} has {} value cells, expected {}",
                epoch,
                values.len(),
                names.len()
            )));
        }
        rows.push((epoch, values));
    }

    if rows.len() < 2 {
        return Err(ForecastError::Source(
            "need at least two data rows".to_string(),
        ));
    }
    for pair in rows.windows(2) {
        if pair[1].0 <= pair[0].0 {
            return Err(ForecastError::Source(
                "row timestamps must be strictly increasing".to_string(),
            ));
        }
    }

    Ok(RawTable { names, rows })
}

/// Most common spacing between consecutive rows, in seconds.
fn native_step(rows: &[(i64, Vec<f64>)]) -> i64 {
    let mut counts: HashMap<i64, usize> = HashMap::new();
    for pair in rows.windows(2) {
        *counts.entry(pair[1].0 - pair[0].0).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by_key(|&(spacing, count)| (count, std::cmp::Reverse(spacing)))
        .map(|(spacing, _)| spacing)
        .unwrap_or(1)
}

impl SeriesSource for FileSource {
    fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse> {
        let content = fs::read_to_string(&self.path).map_err(|err| {
            ForecastError::Source(format!("{}: {}", self.path.display(), err))
        })?;
        let table = parse_table(&content)?;

        let native = native_step(&table.rows);
        let step = match request.step {
            // Coarsen to the next multiple of the native resolution
            Some(preferred) => {
                let preferred = preferred.num_seconds().max(1);
                native * preferred.div_ceil(native)
            }
            None => native,
        };

        // parse_table guarantees at least two rows
        let first = table.rows[0].0;
        let last = table.rows[table.rows.len() - 1].0;
        // The domain is half-open, so the end sits one native step past the
        // last observation
        let end = request.end.map(|e| e.timestamp()).unwrap_or(last + native);
        let start = match request.start {
            Some(s) => s.timestamp(),
            None => (end - DEFAULT_WINDOW_DAYS * 86_400).max(first),
        };
        if end <= start {
            return Err(ForecastError::Source(
                "fetch window end must come after its start".to_string(),
            ));
        }

        // Anchor the grid at the end and keep only whole steps
        let span_steps = (end - start) / step;
        if span_steps == 0 {
            return Err(ForecastError::Source(
                "fetch window is shorter than one step".to_string(),
            ));
        }
        let start = end - span_steps * step;

        let grid = TimeGrid::new(
            DateTime::from_timestamp(start, 0)
                .ok_or_else(|| ForecastError::Source("start timestamp out of range".to_string()))?,
            DateTime::from_timestamp(end, 0)
                .ok_or_else(|| ForecastError::Source("end timestamp out of range".to_string()))?,
            Duration::seconds(step),
        )?;

        let timestamps = grid.timestamps();
        let mut series = Vec::with_capacity(table.names.len());
        for (column, name) in table.names.iter().enumerate() {
            let mut values = Vec::with_capacity(grid.len());
            let mut row = 0;
            for k in 0..grid.len() {
                let bucket_start = start + (k as i64) * step;
                let bucket_end = bucket_start + step;
                while row < table.rows.len() && table.rows[row].0 < bucket_start {
                    row += 1;
                }
                // Average the finite samples that fall inside this bucket
                let mut sum = 0.0;
                let mut count = 0;
                let mut probe = row;
                while probe < table.rows.len() && table.rows[probe].0 < bucket_end {
                    let value = table.rows[probe].1[column];
                    if value.is_finite() {
                        sum += value;
                        count += 1;
                    }
                    probe += 1;
                }
                values.push(if count > 0 { sum / count as f64 } else { f64::NAN });
            }
            series.push((name.clone(), TimeSeries::new(timestamps.clone(), values)?));
        }

        Ok(FetchResponse { grid, series })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;
    use std::path::PathBuf;

    const BASE: i64 = 1704067200; // 2024-01-01T00:00:00Z

    fn write_fixture(tag: &str, content: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("gridcast-source-{}-{}.csv", tag, std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    fn hourly_fixture(tag: &str, hours: usize) -> PathBuf {
        let mut content = String::from("timestamp,cpu,mem\n");
        for i in 0..hours {
            content.push_str(&format!(
                "{},{},{}\n",
                BASE + (i as i64) * 3600,
                i as f64,
                100.0 - i as f64
            ));
        }
        write_fixture(tag, &content)
    }

    #[test]
    fn fetch_resolves_native_step_and_window() {
        let path = hourly_fixture("native", 48);
        let source = FileSource::new(&path);

        let response = source.fetch(&FetchRequest::default()).unwrap();
        assert_eq!(response.grid.step, Duration::hours(1));
        assert_eq!(response.grid.len(), 48);
        assert_eq!(response.series.len(), 2);
        assert_eq!(response.series[0].0, "cpu");
        assert_eq!(response.series[1].0, "mem");
        assert_relative_eq!(response.series[0].1.values()[5], 5.0, epsilon = 1e-10);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn fetch_coarsens_step_by_averaging_buckets() {
        let path = hourly_fixture("coarsen", 48);
        let source = FileSource::new(&path);

        let response = source
            .fetch(&FetchRequest {
                step: Some(Duration::hours(2)),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(response.grid.step, Duration::hours(2));
        assert_eq!(response.grid.len(), 24);
        // First bucket holds samples 0 and 1
        assert_relative_eq!(response.series[0].1.values()[0], 0.5, epsilon = 1e-10);

        // A 90-minute preference rounds up to the next native multiple
        let response = source
            .fetch(&FetchRequest {
                step: Some(Duration::minutes(90)),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(response.grid.step, Duration::hours(2));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn fetch_honors_explicit_window() {
        let path = hourly_fixture("window", 48);
        let source = FileSource::new(&path);

        let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let response = source
            .fetch(&FetchRequest {
                start: Some(start),
                end: Some(end),
                step: None,
            })
            .unwrap();

        assert_eq!(response.grid.start, start);
        assert_eq!(response.grid.end, end);
        assert_eq!(response.grid.len(), 12);
        assert_relative_eq!(response.series[0].1.values()[0], 12.0, epsilon = 1e-10);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn gap_cells_become_missing_values() {
        let content = format!(
            "timestamp,load\n{},1.0\n{},\n{},nan\n{},U\n{},5.0\n",
            BASE,
            BASE + 3600,
            BASE + 7200,
            BASE + 10800,
            BASE + 14400
        );
        let path = write_fixture("gaps", &content);
        let source = FileSource::new(&path);

        let response = source.fetch(&FetchRequest::default()).unwrap();
        let values = response.series[0].1.values();
        assert!(values[0].is_finite());
        assert!(values[1].is_nan());
        assert!(values[2].is_nan());
        assert!(values[3].is_nan());
        assert!(values[4].is_finite());

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn malformed_input_is_a_source_error() {
        let path = write_fixture("empty", "");
        let err = FileSource::new(&path).fetch(&FetchRequest::default()).unwrap_err();
        assert!(matches!(err, ForecastError::Source(_)));
        std::fs::remove_file(path).ok();

        let path = write_fixture("oneline", "timestamp,a\n100,1.0\n");
        let err = FileSource::new(&path).fetch(&FetchRequest::default()).unwrap_err();
        assert!(matches!(err, ForecastError::Source(_)));
        std::fs::remove_file(path).ok();

        let path = write_fixture("backwards", "timestamp,a\n200,1.0\n100,2.0\n");
        let err = FileSource::new(&path).fetch(&FetchRequest::default()).unwrap_err();
        assert!(matches!(err, ForecastError::Source(_)));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_is_a_source_error() {
        let source = FileSource::new("/nonexistent/gridcast.csv");
        let err = source.fetch(&FetchRequest::default()).unwrap_err();
        assert!(matches!(err, ForecastError::Source(_)));
    }
}
