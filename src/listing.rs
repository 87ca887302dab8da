//! Data directory listing
//!
//! Lists the table files (by default `*.csv`) directly inside a data
//! directory, with column names read from each file's header line, and
//! watches the directory so the listing refreshes when files come and go.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::time::Duration;

use notify_debouncer_mini::{new_debouncer, DebounceEventResult, DebouncedEventKind, Debouncer};

use crate::messages::{AppMsg, Msg};

/// One table file in the data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableEntry {
    /// File stem, used as the table name
    pub name: String,
    pub path: PathBuf,
    /// Header line fields, empty when the header could not be read
    pub columns: Vec<String>,
}

/// Whether `path` carries `extension` (ASCII case-insensitive, no leading dot)
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

/// List the regular files directly under `dir` with the given extension
///
/// Entries are sorted by name. Files whose header cannot be read are still
/// listed, without columns.
pub fn list_tables(dir: &Path, extension: &str) -> io::Result<Vec<TableEntry>> {
    let mut entries = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        let path = entry.path();
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if !is_file || !has_extension(&path, extension) {
            continue;
        }

        let Some(name) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };

        let columns = match read_columns(&path) {
            Ok(columns) => columns,
            Err(e) => {
                tracing::warn!("Could not read header of {}: {}", path.display(), e);
                Vec::new()
            }
        };

        entries.push(TableEntry {
            name,
            path,
            columns,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::debug!(
        "Listed {} table(s) in {}",
        entries.len(),
        dir.display()
    );
    Ok(entries)
}

/// Column names from the header record of a table file
fn read_columns(path: &Path) -> Result<Vec<String>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(File::open(path)?);

    let Some(header) = reader.records().next().transpose()? else {
        return Ok(Vec::new());
    };

    Ok(header
        .iter()
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(str::to_string)
        .collect())
}

/// Debounced watcher on a data directory
///
/// Sends `AppMsg::RefreshListing` whenever a matching file changes. Only the
/// directory itself is watched, not its subdirectories.
pub struct DirectoryWatcher {
    _debouncer: Debouncer<notify::RecommendedWatcher>,
    root: PathBuf,
}

impl DirectoryWatcher {
    pub fn new(
        root: PathBuf,
        extension: &str,
        debounce: Duration,
        sender: Sender<Msg>,
    ) -> Result<Self, notify::Error> {
        let extension = extension.to_string();
        let watched = root.clone();

        let mut debouncer = new_debouncer(debounce, move |result: DebounceEventResult| {
            match result {
                Ok(events) => {
                    let relevant = events.iter().any(|event| {
                        event.kind == DebouncedEventKind::Any
                            && (event.path == watched || has_extension(&event.path, &extension))
                    });
                    if relevant {
                        tracing::debug!("Data directory changed: {}", watched.display());
                        let _ = sender.send(Msg::App(AppMsg::RefreshListing));
                    }
                }
                Err(e) => {
                    tracing::warn!("Data directory watcher error: {:?}", e);
                }
            }
        })?;

        debouncer
            .watcher()
            .watch(&root, notify::RecursiveMode::NonRecursive)?;

        tracing::info!("Watching data directory: {}", root.display());

        Ok(Self {
            _debouncer: debouncer,
            root,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl std::fmt::Debug for DirectoryWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryWatcher")
            .field("root", &self.root)
            .finish()
    }
}
