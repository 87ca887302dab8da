//! Streaming file loader with progress reporting
//!
//! Loads run on a worker thread spawned by the runtime. The loader reads the
//! file's modification time before touching its contents, counts lines in a
//! cheap pre-pass, then streams the text line by line and reports the
//! fraction loaded after each line.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A successfully loaded file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub path: PathBuf,
    /// Contents with every line terminated by `\n`
    pub text: String,
    /// Modification time read before the contents
    pub modified: SystemTime,
}

/// Why a load failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadErrorKind {
    NotFound,
    PermissionDenied,
    IsDirectory,
    InvalidUtf8,
    Io(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    pub path: PathBuf,
    pub kind: LoadErrorKind,
}

impl LoadError {
    fn new(path: &Path, kind: LoadErrorKind) -> Self {
        Self {
            path: path.to_path_buf(),
            kind,
        }
    }

    fn from_io(path: &Path, error: &io::Error) -> Self {
        let kind = match error.kind() {
            io::ErrorKind::NotFound => LoadErrorKind::NotFound,
            io::ErrorKind::PermissionDenied => LoadErrorKind::PermissionDenied,
            io::ErrorKind::InvalidData => LoadErrorKind::InvalidUtf8,
            _ => LoadErrorKind::Io(error.to_string()),
        };
        Self::new(path, kind)
    }

    /// Short description suitable for the status label or a log line
    pub fn user_message(&self) -> String {
        match &self.kind {
            LoadErrorKind::NotFound => format!("File not found: {}", self.path.display()),
            LoadErrorKind::PermissionDenied => {
                format!("Permission denied: {}", self.path.display())
            }
            LoadErrorKind::IsDirectory => format!("Is a directory: {}", self.path.display()),
            LoadErrorKind::InvalidUtf8 => {
                format!("File is not valid UTF-8 text: {}", self.path.display())
            }
            LoadErrorKind::Io(message) => {
                format!("Error reading {}: {}", self.path.display(), message)
            }
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for LoadError {}

/// Number of lines `reader` yields, counting a final unterminated line
pub fn count_lines<R: Read>(reader: R) -> io::Result<usize> {
    let mut reader = BufReader::new(reader);
    let mut lines = 0;
    let mut last_byte = None;

    loop {
        let chunk = reader.fill_buf()?;
        if chunk.is_empty() {
            break;
        }
        lines += chunk.iter().filter(|&&b| b == b'\n').count();
        last_byte = chunk.last().copied();
        let consumed = chunk.len();
        reader.consume(consumed);
    }

    if matches!(last_byte, Some(b) if b != b'\n') {
        lines += 1;
    }
    Ok(lines)
}

/// Upper bound on the buffer preallocated from the reported file size
const MAX_PREALLOC: usize = 64 * 1024 * 1024;

/// Initial text capacity for a file of `len` bytes
///
/// The size is only a hint: the file can change between `metadata` and the
/// read, and it may not fit in `usize`.
fn capacity_hint(len: u64) -> usize {
    usize::try_from(len).unwrap_or(usize::MAX).min(MAX_PREALLOC)
}

/// Load `path`, calling `on_progress` with the fraction loaded so far
///
/// Reported fractions are in [0, 1] and never decrease. A successful load
/// always ends with exactly `1.0`, including for an empty file. Line endings
/// are normalized to `\n` and the last line gets one too.
pub fn load_file(
    path: &Path,
    mut on_progress: impl FnMut(f64),
) -> Result<LoadedFile, LoadError> {
    let metadata = std::fs::metadata(path).map_err(|e| LoadError::from_io(path, &e))?;
    if metadata.is_dir() {
        return Err(LoadError::new(path, LoadErrorKind::IsDirectory));
    }
    // Baseline comes first so a write racing the read is still noticed later
    let modified = metadata
        .modified()
        .map_err(|e| LoadError::from_io(path, &e))?;

    let total = File::open(path)
        .and_then(count_lines)
        .map_err(|e| LoadError::from_io(path, &e))?;

    let file = File::open(path).map_err(|e| LoadError::from_io(path, &e))?;
    let mut reader = BufReader::new(file);
    let mut text = String::with_capacity(capacity_hint(metadata.len()));
    let mut line = String::new();
    let mut loaded = 0usize;
    let mut reported = 0.0f64;

    on_progress(0.0);

    loop {
        line.clear();
        let read = reader
            .read_line(&mut line)
            .map_err(|e| LoadError::from_io(path, &e))?;
        if read == 0 {
            break;
        }

        let content = line
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(line.as_str());
        text.push_str(content);
        text.push('\n');
        loaded += 1;

        // The file may have grown since the pre-pass
        let fraction = (loaded as f64 / total.max(1) as f64).clamp(0.0, 1.0);
        if fraction > reported {
            reported = fraction;
            on_progress(fraction);
        }
    }

    if reported < 1.0 {
        on_progress(1.0);
    }

    tracing::debug!(
        "Loaded {} ({} lines, {} bytes)",
        path.display(),
        loaded,
        text.len()
    );

    Ok(LoadedFile {
        path: path.to_path_buf(),
        text,
        modified,
    })
}
