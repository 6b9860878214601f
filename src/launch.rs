use std::path::{Path, PathBuf};

use log::{info, warn};

/// Absolute form of `path` without resolving symlinks; falls back to the
/// path as given when the working directory is unavailable.
fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Open each document in the system's default viewer.
///
/// The path goes to the opener as-is; the platform handler turns it into
/// whatever its browser expects. Best effort: the viewer is not awaited
/// and failures are only logged.
pub fn open_in_browser(paths: &[PathBuf]) {
    for path in paths {
        let target = absolute(path);
        match open::that_detached(&target) {
            Ok(()) => info!("opened {}", target.display()),
            Err(e) => warn!("could not open {}: {e}", target.display()),
        }
    }
}
