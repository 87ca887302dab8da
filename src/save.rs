//! Writing the buffer back to disk

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveError {
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

impl std::error::Error for SaveError {}

/// Baseline recorded after our own write
///
/// Filesystems with coarse timestamps can report an mtime slightly before
/// the write finished, so the baseline is the later of the reported mtime
/// and the current time, pushed forward by `slack`.
pub fn next_baseline(written: SystemTime, now: SystemTime, slack: Duration) -> SystemTime {
    written.max(now) + slack
}

/// Write `content` to `path` and return the baseline to arm the watcher with
pub fn save_file(path: &Path, content: &str, slack: Duration) -> Result<SystemTime, SaveError> {
    let fail = |e: std::io::Error| SaveError {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    std::fs::write(path, content).map_err(fail)?;
    let written = std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(fail)?;

    let baseline = next_baseline(written, SystemTime::now(), slack);
    tracing::debug!(
        "Saved {} ({} bytes), baseline {:?}",
        path.display(),
        content.len(),
        baseline
    );
    Ok(baseline)
}
