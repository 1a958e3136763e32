//! Flat CSV export of forecasted values.

use crate::core::Prediction;
use crate::pipeline::SeriesForecast;
use std::io::{self, Write};

/// The fixed export header.
pub const HEADER: &str = "ds,timestamp,value";

/// Write the export header line.
pub fn write_header<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", HEADER)
}

/// Write one row per point-forecast timestamp for a single series, in
/// chronological order: `<name>,<unix_timestamp>,<value>`.
pub fn write_series<W: Write>(out: &mut W, name: &str, prediction: &Prediction) -> io::Result<()> {
    for (k, value) in prediction.mean().iter().enumerate() {
        writeln!(out, "{},{},{}", name, prediction.timestamp(k).timestamp(), value)?;
    }
    Ok(())
}

/// Write the full export: header plus every series' rows.
pub fn write_csv<W: Write>(out: &mut W, forecasts: &[SeriesForecast]) -> io::Result<()> {
    write_header(out)?;
    for forecast in forecasts {
        write_series(out, &forecast.name, &forecast.prediction)?;
    }
    Ok(())
}
