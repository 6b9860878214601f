use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Every way the pipeline can fail. Nothing is recovered; callers propagate.
#[derive(Error, Debug)]
pub enum Error {
    /// The recording file does not exist
    #[error("recording not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Filesystem failure while reading or writing `path`
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed delimited text
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A column the operation needs is absent from the table
    #[error("missing column '{0}'")]
    MissingColumn(String),

    /// Figure data could not be embedded as JSON
    #[error("figure serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The plotting backend failed to draw the chart
    #[error("chart drawing failed: {0}")]
    Plot(String),

    /// Writing the document markup failed
    #[error("chart rendering failed: {0}")]
    Render(#[from] fmt::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
