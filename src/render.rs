//! Drawable scene description for one forecasted series.
//!
//! Rendering itself is a collaborator concern; this module only shapes the
//! data into the layers a renderer needs: the observed line, the forecast
//! line, the cutoff marker, and the shaded confidence bands. A plain-text
//! renderer is provided for terminal use.

use crate::core::{alpha, Prediction, TimeGrid, TimeSeries};
use chrono::{DateTime, SecondsFormat, Utc};
use std::io::{self, Write};

/// How a line series should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// A labelled line layer.
#[derive(Debug, Clone)]
pub struct LineSeries {
    pub label: String,
    pub style: LineStyle,
    pub timestamps: Vec<DateTime<Utc>>,
    pub values: Vec<f64>,
}

/// A shaded interval layer at one confidence level.
#[derive(Debug, Clone)]
pub struct BandRegion {
    pub label: String,
    pub level: u8,
    /// Fill opacity, `1 - level/100`: wider bands are more transparent.
    pub opacity: f64,
    pub timestamps: Vec<DateTime<Utc>>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

/// One figure: observed and forecast lines, the last-observation marker,
/// and the out-of-sample confidence bands.
///
/// Layers are drawn in field order, bands last and in their listed
/// (ascending-level) order.
#[derive(Debug, Clone)]
pub struct FigureScene {
    pub x_label: String,
    pub y_label: String,
    pub observed: LineSeries,
    pub forecast: LineSeries,
    /// Vertical marker at the last observation, `grid.end - step`.
    pub cutoff: DateTime<Utc>,
    pub bands: Vec<BandRegion>,
}

/// Shape a prediction and its observed series into a figure scene.
///
/// Bands are restricted to the genuinely out-of-sample sub-domain
/// (`timestamp >= grid.end`); in-sample fitted values are not decorated
/// with uncertainty.
pub fn scene(
    name: &str,
    observed: &TimeSeries,
    prediction: &Prediction,
    grid: &TimeGrid,
) -> FigureScene {
    let out_of_sample = grid.len().min(prediction.len());

    let bands = prediction
        .bands()
        .iter()
        .map(|band| BandRegion {
            label: format!("{}% confidence interval", band.level),
            level: band.level,
            opacity: alpha(band.level),
            timestamps: prediction.timestamps()[out_of_sample..].to_vec(),
            lower: band.lower[out_of_sample..].to_vec(),
            upper: band.upper[out_of_sample..].to_vec(),
        })
        .collect();

    FigureScene {
        x_label: "Time".to_string(),
        y_label: name.to_string(),
        observed: LineSeries {
            label: "Observed".to_string(),
            style: LineStyle::Solid,
            timestamps: observed.timestamps().to_vec(),
            values: observed.values().to_vec(),
        },
        forecast: LineSeries {
            label: "Prediction".to_string(),
            style: LineStyle::Dashed,
            timestamps: prediction.timestamps(),
            values: prediction.mean().to_vec(),
        },
        cutoff: grid.last_observation(),
        bands,
    }
}

/// Renders figure scenes somewhere.
pub trait Renderer {
    fn render(&mut self, scene: &FigureScene) -> io::Result<()>;
}

/// Writes a plain-text overview of each figure: fit window, cutoff, and a
/// table of the out-of-sample forecast with its interval bounds.
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, scene: &FigureScene) -> io::Result<()> {
        writeln!(self.out, "=== {} ===", scene.y_label)?;
        writeln!(
            self.out,
            "observed {} points, last observation {}",
            scene.observed.values.len(),
            scene.cutoff.to_rfc3339_opts(SecondsFormat::Secs, true)
        )?;

        write!(self.out, "{:>20} {:>12}", scene.x_label, scene.forecast.label)?;
        for band in &scene.bands {
            write!(self.out, " {:>12}", format!("lo {}%", band.level))?;
            write!(self.out, " {:>12}", format!("hi {}%", band.level))?;
        }
        writeln!(self.out)?;

        let horizon = scene.bands.first().map(|b| b.timestamps.len()).unwrap_or(0);
        let offset = scene.forecast.values.len() - horizon;
        for k in 0..horizon {
            write!(
                self.out,
                "{:>20} {:>12.4}",
                scene.bands[0].timestamps[k].format("%Y-%m-%d %H:%M"),
                scene.forecast.values[offset + k]
            )?;
            for band in &scene.bands {
                write!(self.out, " {:>12.4} {:>12.4}", band.lower[k], band.upper[k])?;
            }
            writeln!(self.out)?;
        }
        writeln!(self.out)
    }
}
