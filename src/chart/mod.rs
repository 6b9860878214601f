//! Chart rendering: figure model → self-contained HTML document.

pub mod figure;
pub mod html;

use std::path::{Path, PathBuf};

use log::info;

use crate::data::model::Table;
use crate::error::{Error, Result};

pub const TIME_SERIES_FILE: &str = "time_series.html";

/// Render every visualization into `analysis_dir` and return the written
/// paths. Existing files are overwritten.
pub fn render_time_series(raw: &Table, filtered: &Table, analysis_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(analysis_dir).map_err(|e| Error::io(analysis_dir, e))?;

    let figure = figure::time_series_figure(raw, filtered)?;
    let document = html::render_document(&figure)?;

    let path = analysis_dir.join(TIME_SERIES_FILE);
    std::fs::write(&path, document).map_err(|e| Error::io(&path, e))?;
    info!("wrote time series chart to {}", path.display());

    Ok(vec![path])
}
