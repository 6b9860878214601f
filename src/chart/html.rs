use std::error::Error as StdError;
use std::fmt::Write;

use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::Serialize;

use super::figure::{Figure, Trace};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Layout constants (pixels)
// ---------------------------------------------------------------------------

const HEADER_HEIGHT: i32 = 70;
const MARGIN_RIGHT: u32 = 40;
const MARGIN_BOTTOM: i32 = 10;
const Y_LABEL_AREA: u32 = 70;
const X_LABEL_AREA: u32 = 40;
const MARKER_RADIUS: i32 = 3;

const PANEL_BACKGROUND: RGBColor = RGBColor(0xe5, 0xec, 0xf6);
const TEXT_COLOR: RGBColor = RGBColor(0x2a, 0x3f, 0x5f);
const TEXT_COLOR_CSS: &str = "#2a3f5f";

// ---------------------------------------------------------------------------
// Ranges and runs
// ---------------------------------------------------------------------------

/// Pad a data range so markers don't sit on the panel edge. Empty and
/// degenerate ranges get a unit window; spans too wide for `f64` are clamped.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return (-1.0, 1.0);
    }
    let (min, max) = (min.max(-f64::MAX / 4.0), max.min(f64::MAX / 4.0));
    let range = max - min;
    let padding = if range < 1e-9 { 0.5 } else { range * 0.05 };
    (min - padding, max + padding)
}

/// Consecutive non-gap samples as `(row, value)` runs; each run is one line.
fn line_runs(trace: &Trace) -> Vec<Vec<(f64, f64)>> {
    let mut runs: Vec<Vec<(f64, f64)>> = Vec::new();
    let mut current = Vec::new();
    for (i, value) in trace.y.iter().enumerate() {
        match value {
            Some(v) => current.push((i as f64, *v)),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

// ---------------------------------------------------------------------------
// SVG rendering
// ---------------------------------------------------------------------------

/// Where the shared row axis landed on the canvas, for the hover script.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowAxis {
    pub x_min: f64,
    pub x_max: f64,
    pub px_start: i32,
    pub px_end: i32,
    pub px_top: i32,
    pub px_bottom: i32,
}

/// Rendered chart markup plus the row-axis placement.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub svg: String,
    pub axis: RowAxis,
}

/// Render the figure as SVG. Panels are stacked top to bottom and share the
/// row axis; only the bottom panel carries row labels.
pub fn render_svg(figure: &Figure) -> Result<Rendered> {
    let mut svg = String::new();
    let axis = {
        let root = SVGBackend::with_string(&mut svg, (figure.width, figure.height))
            .into_drawing_area();
        let axis = draw_figure(&root, figure).map_err(|e| Error::Plot(e.to_string()))?;
        root.present().map_err(|e| Error::Plot(e.to_string()))?;
        axis
    };
    Ok(Rendered { svg, axis })
}

fn draw_figure(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    figure: &Figure,
) -> std::result::Result<RowAxis, Box<dyn StdError>> {
    root.fill(&WHITE)?;
    let (header, body) = root.split_vertically(HEADER_HEIGHT);

    let center = figure.width as i32 / 2;
    let anchor = Pos::new(HPos::Center, VPos::Center);
    header.draw(&Text::new(
        figure.title.clone(),
        (center, 28),
        ("sans-serif", 20).into_font().color(&TEXT_COLOR).pos(anchor),
    ))?;
    header.draw(&Text::new(
        figure.subtitle.clone(),
        (center, 52),
        ("sans-serif", 13).into_font().color(&TEXT_COLOR.mix(0.7)).pos(anchor),
    ))?;

    let n = figure.panels.len().max(1) as i32;
    let body_height = body.dim_in_pixel().1 as i32 - MARGIN_BOTTOM;
    let gap = (figure.vertical_spacing * body_height as f64).round() as i32;
    let panel_height = (body_height - X_LABEL_AREA as i32 - gap * (n - 1)) / n;

    let (x_min, x_max) = padded_range((0..figure.sample_count()).map(|i| i as f64));
    let mut axis = RowAxis {
        x_min,
        x_max,
        px_start: 0,
        px_end: 0,
        px_top: HEADER_HEIGHT,
        px_bottom: HEADER_HEIGHT,
    };

    let mut rest = body;
    for (i, trace) in figure.panels.iter().enumerate() {
        let is_bottom = i + 1 == figure.panels.len();
        let height = if is_bottom {
            panel_height + X_LABEL_AREA as i32
        } else {
            panel_height
        };
        let (area, below) = rest.split_vertically(height);
        let (_, below) = below.split_vertically(gap);
        rest = below;

        let bounds = draw_panel(&area, trace, (x_min, x_max), is_bottom)?;
        if i == 0 {
            axis.px_top = bounds.top;
        }
        axis.px_start = bounds.left;
        axis.px_end = bounds.right;
        axis.px_bottom = bounds.bottom;
    }
    Ok(axis)
}

/// Pixel bounds of a panel's plotting area on the canvas.
struct PanelBounds {
    left: i32,
    right: i32,
    top: i32,
    bottom: i32,
}

/// Draw one panel and report where its plotting area landed.
fn draw_panel(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    trace: &Trace,
    (x_min, x_max): (f64, f64),
    with_row_labels: bool,
) -> std::result::Result<PanelBounds, Box<dyn StdError>> {
    let (y_min, y_max) = padded_range(trace.finite_values());
    debug!(
        "panel '{}': y in [{y_min:.4}, {y_max:.4}], {} samples",
        trace.name,
        trace.y.len()
    );

    let mut chart = ChartBuilder::on(area)
        .margin_right(MARGIN_RIGHT)
        .y_label_area_size(Y_LABEL_AREA)
        .x_label_area_size(if with_row_labels { X_LABEL_AREA } else { 0 })
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart.plotting_area().fill(&PANEL_BACKGROUND)?;
    let row_label = |x: &f64| format!("{x:.0}");
    chart
        .configure_mesh()
        .y_desc(trace.name.as_str())
        .x_labels(12)
        .y_labels(6)
        .x_label_formatter(&row_label)
        .bold_line_style(WHITE)
        .light_line_style(PANEL_BACKGROUND)
        .label_style(("sans-serif", 12).into_font().color(&TEXT_COLOR))
        .axis_desc_style(("sans-serif", 14).into_font().color(&TEXT_COLOR))
        .draw()?;

    let color = trace.color;
    let runs = line_runs(trace);
    if trace.mode.has_lines() {
        for (k, run) in runs.iter().enumerate() {
            let series =
                chart.draw_series(LineSeries::new(run.iter().copied(), color.stroke_width(2)))?;
            if k == 0 {
                series.label(trace.name.as_str()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            }
        }
    }
    if trace.mode.has_markers() {
        chart.draw_series(
            runs.iter()
                .flatten()
                .map(|&(x, y)| Circle::new((x, y), MARKER_RADIUS, color.filled())),
        )?;
    }
    if trace.mode.has_lines() && !runs.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(PANEL_BACKGROUND)
            .label_font(("sans-serif", 12).into_font().color(&TEXT_COLOR))
            .draw()?;
    }

    let (left, top) = chart.backend_coord(&(x_min, y_max));
    let (right, bottom) = chart.backend_coord(&(x_max, y_min));
    Ok(PanelBounds {
        left,
        right,
        top,
        bottom,
    })
}

// ---------------------------------------------------------------------------
// Standalone document
// ---------------------------------------------------------------------------

/// Hover readout: maps the pointer to the nearest row and prints each trace's
/// value there.
const HOVER_SCRIPT: &str = r#"(function () {
  var figure = JSON.parse(document.getElementById("figure-data").textContent);
  var axis = JSON.parse(document.getElementById("row-axis").textContent);
  var chart = document.getElementById("chart");
  var svg = chart.querySelector("svg");
  var readout = document.getElementById("readout");
  var crosshair = document.getElementById("crosshair");
  var n = Math.max.apply(null, [0].concat(figure.panels.map(function (t) { return t.y.length; })));
  function hide() {
    crosshair.style.display = "none";
    readout.textContent = "";
  }
  chart.addEventListener("mousemove", function (ev) {
    var rect = svg.getBoundingClientRect();
    var scale = rect.width / figure.width;
    var px = (ev.clientX - rect.left) / scale;
    var span = axis.px_end - axis.px_start;
    var row = Math.round(axis.x_min + (px - axis.px_start) / span * (axis.x_max - axis.x_min));
    if (n === 0 || row < 0 || row >= n) { hide(); return; }
    var x = axis.px_start + (row - axis.x_min) / (axis.x_max - axis.x_min) * span;
    crosshair.style.left = (x * scale) + "px";
    crosshair.style.top = (axis.px_top * scale) + "px";
    crosshair.style.height = ((axis.px_bottom - axis.px_top) * scale) + "px";
    crosshair.style.display = "block";
    readout.textContent = "row " + row + figure.panels.map(function (t) {
      var v = t.y[row];
      return "   " + t.name + " = " + (v === null || v === undefined ? "–" : v);
    }).join("");
  });
  chart.addEventListener("mouseleave", hide);
})();"#;

/// JSON for an inline `<script>` block; `</` would end the block early.
fn json_island<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Serialize the figure as one self-contained HTML document: the SVG chart,
/// the figure data as embedded JSON, and the hover script. No external
/// resources are referenced.
pub fn render_document(figure: &Figure) -> Result<String> {
    let Rendered { svg, axis } = render_svg(figure)?;
    let data = json_island(figure)?;
    let axis = json_island(&axis)?;

    let mut html = String::new();
    write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
  body {{ margin: 0; background: #ffffff; color: {TEXT_COLOR_CSS}; font-family: sans-serif; }}
  #readout {{ height: 1.4em; padding: 6px {Y_LABEL_AREA}px; font-size: 13px; white-space: pre; }}
  #chart {{ position: relative; display: inline-block; }}
  #crosshair {{ position: absolute; display: none; width: 0; border-left: 1px dashed #444; pointer-events: none; }}
</style>
</head>
<body>
<div id="readout"></div>
<div id="chart">
{svg}
<div id="crosshair"></div>
</div>
<script id="figure-data" type="application/json">{data}</script>
<script id="row-axis" type="application/json">{axis}</script>
<script>
{HOVER_SCRIPT}
</script>
</body>
</html>
"#,
        title = escape_html(&figure.title),
    )?;
    Ok(html)
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
