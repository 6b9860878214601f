use plotters::style::RGBColor;
use serde::Serialize;

use crate::color::{generate_palette, serialize_hex};
use crate::data::model::Table;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Figure model
// ---------------------------------------------------------------------------

pub const CANVAS_WIDTH: u32 = 1280;
pub const CANVAS_HEIGHT: u32 = 800;
/// Gap between stacked panels as a fraction of the plotting height.
pub const VERTICAL_SPACING: f64 = 0.02;
pub const TIME_SERIES_TITLE: &str = "Pupil Positions Time Series";

/// Columns plotted by the time-series chart, top panel first.
pub const TIME_SERIES_SIGNALS: [&str; 2] = ["phi", "theta"];

/// How a trace's samples are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    #[serde(rename = "lines")]
    Lines,
    #[serde(rename = "markers")]
    Markers,
    #[serde(rename = "lines+markers")]
    LinesMarkers,
}

impl Mode {
    pub fn has_lines(self) -> bool {
        matches!(self, Mode::Lines | Mode::LinesMarkers)
    }

    pub fn has_markers(self) -> bool {
        matches!(self, Mode::Markers | Mode::LinesMarkers)
    }
}

/// One series plotted against row position. `None` marks a gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub name: String,
    pub mode: Mode,
    #[serde(serialize_with = "serialize_hex")]
    pub color: RGBColor,
    pub y: Vec<Option<f64>>,
}

impl Trace {
    /// Finite y-values only.
    pub fn finite_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.y.iter().flatten().copied().filter(|v| v.is_finite())
    }
}

/// A stack of panels sharing one horizontal axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub title: String,
    pub subtitle: String,
    pub width: u32,
    pub height: u32,
    pub vertical_spacing: f64,
    /// One trace per panel, top to bottom.
    pub panels: Vec<Trace>,
}

impl Figure {
    /// Number of samples on the shared axis (the longest trace).
    pub fn sample_count(&self) -> usize {
        self.panels.iter().map(|t| t.y.len()).max().unwrap_or(0)
    }
}

/// Build the stacked `phi` / `theta` figure.
///
/// Values come from `filtered`; `raw` only feeds the subtitle's sample count.
/// Cells without a finite numeric value become gaps.
pub fn time_series_figure(raw: &Table, filtered: &Table) -> Result<Figure> {
    let colors = generate_palette(TIME_SERIES_SIGNALS.len());

    let panels = TIME_SERIES_SIGNALS
        .iter()
        .zip(colors)
        .map(|(&signal, color)| -> Result<Trace> {
            let y = filtered
                .numeric_column(signal)?
                .into_iter()
                .map(|v| v.is_finite().then_some(v))
                .collect();
            Ok(Trace {
                name: signal.to_string(),
                mode: Mode::LinesMarkers,
                color,
                y,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Figure {
        title: TIME_SERIES_TITLE.to_string(),
        subtitle: format!("{} of {} samples shown", filtered.len(), raw.len()),
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
        vertical_spacing: VERTICAL_SPACING,
        panels,
    })
}
