use std::path::PathBuf;

use clap::Parser;

/// Recording used when neither the argument nor the environment names one.
pub const DEFAULT_RECORDING_PATH: &str = "pupil_positions.csv";
/// Environment variable consulted when no path argument is given.
pub const RECORDING_PATH_ENV: &str = "PUPIL_RECORDING_PATH";

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Filter a pupil recording and chart its phi/theta time series")]
pub struct Cli {
    /// Path to pupil_positions.csv
    #[arg(
        value_name = "RECORDING_PATH",
        env = RECORDING_PATH_ENV,
        default_value = DEFAULT_RECORDING_PATH
    )]
    pub recording_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_path_wins() {
        let cli = Cli::try_parse_from(["pupil-viewer", "rec/pupil_positions.csv"]).unwrap();
        assert_eq!(cli.recording_path, PathBuf::from("rec/pupil_positions.csv"));
    }

    #[test]
    fn recording_path_falls_back_to_env_then_default() {
        use clap::CommandFactory;

        let command = Cli::command();
        let arg = command
            .get_arguments()
            .find(|a| a.get_id() == "recording_path")
            .expect("recording_path argument");

        assert!(arg.is_positional());
        assert!(!arg.is_required_set());
        assert_eq!(arg.get_env(), Some(std::ffi::OsStr::new(RECORDING_PATH_ENV)));
        let defaults: Vec<String> = arg
            .get_default_values()
            .iter()
            .map(|v| v.to_string_lossy().into_owned())
            .collect();
        assert_eq!(defaults, [DEFAULT_RECORDING_PATH]);
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["pupil-viewer", "--open"]).is_err());
    }

    #[test]
    fn command_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
