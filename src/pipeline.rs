use std::path::{Path, PathBuf};

use log::info;

use crate::chart;
use crate::data::filter::{exclude_rows, ExclusionRule};
use crate::data::loader::load_table;
use crate::data::writer::save_table;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Output locations
// ---------------------------------------------------------------------------

pub const ANALYSIS_DIR: &str = "analysis";
pub const FILTERED_FILE: &str = "filtered_pupil_data.csv";

/// Every location the pipeline reads or writes, derived from the recording path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisPaths {
    pub recording: PathBuf,
    /// `<recording dir>/analysis`
    pub analysis_dir: PathBuf,
    /// `<analysis dir>/filtered_pupil_data.csv`
    pub filtered: PathBuf,
}

impl AnalysisPaths {
    pub fn for_recording(recording: impl Into<PathBuf>) -> Self {
        let recording = recording.into();
        let input_dir = recording
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let analysis_dir = input_dir.join(ANALYSIS_DIR);
        let filtered = analysis_dir.join(FILTERED_FILE);
        Self {
            recording,
            analysis_dir,
            filtered,
        }
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub raw_rows: usize,
    pub kept_rows: usize,
    pub filtered_csv: PathBuf,
    /// Chart documents, ready for [`crate::launch::open_in_browser`].
    pub documents: Vec<PathBuf>,
}

/// load → filter → save → plot. Opening the documents is left to the caller.
///
/// The input is loaded before anything is created on disk, so a missing or
/// malformed recording leaves no output behind.
pub fn run(paths: &AnalysisPaths, rule: &ExclusionRule) -> Result<Report> {
    let raw = load_table(&paths.recording)?;
    info!(
        "loaded {} samples from {}",
        raw.len(),
        paths.recording.display()
    );

    let filtered = exclude_rows(&raw, rule)?;
    info!(
        "kept {} of {} samples (excluded method '{}' and eye {})",
        filtered.len(),
        raw.len(),
        rule.method,
        rule.eye_id
    );

    save_table(&filtered, &paths.filtered)?;
    info!("wrote filtered samples to {}", paths.filtered.display());

    let documents = chart::render_time_series(&raw, &filtered, &paths.analysis_dir)?;

    Ok(Report {
        raw_rows: raw.len(),
        kept_rows: filtered.len(),
        filtered_csv: paths.filtered.clone(),
        documents,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outputs_live_beside_the_recording() {
        let paths = AnalysisPaths::for_recording("/data/rec/000/pupil_positions.csv");
        assert_eq!(paths.analysis_dir, Path::new("/data/rec/000/analysis"));
        assert_eq!(
            paths.filtered,
            Path::new("/data/rec/000/analysis/filtered_pupil_data.csv")
        );
    }

    #[test]
    fn bare_file_name_uses_current_dir() {
        let paths = AnalysisPaths::for_recording("pupil_positions.csv");
        assert_eq!(paths.analysis_dir, Path::new("./analysis"));
    }
}
