use anyhow::Context;
use clap::Parser;
use log::info;

use pupil_viewer::cli::Cli;
use pupil_viewer::data::filter::ExclusionRule;
use pupil_viewer::launch::open_in_browser;
use pupil_viewer::pipeline::{self, AnalysisPaths};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let paths = AnalysisPaths::for_recording(cli.recording_path);

    let report = pipeline::run(&paths, &ExclusionRule::default())
        .with_context(|| format!("analysing {}", paths.recording.display()))?;
    info!(
        "{} of {} samples written to {}",
        report.kept_rows,
        report.raw_rows,
        report.filtered_csv.display()
    );

    open_in_browser(&report.documents);
    Ok(())
}
