//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types. Background threads
//! only ever talk to the runtime by sending one of these.

use std::path::PathBuf;
use std::time::SystemTime;

use crate::listing::TableEntry;
use crate::loader::{LoadError, LoadedFile};
use crate::save::SaveError;
use crate::syntax::StyleSpans;

/// Buffer edits (byte offsets)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentMsg {
    /// Insert text at an offset
    Insert { offset: usize, text: String },
    /// Delete the range `start..end`
    Delete { start: usize, end: usize },
    /// Append text at the end of the buffer
    Append(String),
    /// Replace the whole buffer
    SetText(String),
}

/// App messages (file I/O, data directory, lifecycle)
#[derive(Debug, Clone)]
pub enum AppMsg {
    /// Open a file into the buffer
    OpenFile(PathBuf),
    /// Load progress from a loader thread
    LoadProgress { generation: u64, fraction: f64 },
    /// File load completed (async result)
    FileLoaded {
        generation: u64,
        result: Result<LoadedFile, LoadError>,
    },
    /// Save to the bound file
    SaveFile,
    /// Save to a new path and bind the buffer to it
    SaveFileAs(PathBuf),
    /// File save completed (async result); `Ok` carries the new baseline
    SaveCompleted {
        generation: u64,
        path: PathBuf,
        result: Result<SystemTime, SaveError>,
    },
    /// Re-read the bound file after an external change
    ReloadFromDisk,
    /// Drop the buffer and its binding
    CloseFile,
    /// Point the table listing at a data directory
    SetDataDirectory(PathBuf),
    /// Re-read the data directory
    RefreshListing,
    /// Data directory listing completed (async result)
    ListingLoaded {
        dir: PathBuf,
        result: Result<Vec<TableEntry>, String>,
    },
    /// Quit the application
    Quit,
}

/// Syntax highlighting results from the scheduler
#[derive(Debug, Clone)]
pub enum SyntaxMsg {
    /// Spans computed for the snapshot at `spans.revision()`
    HighlightsComputed(StyleSpans),
    /// The tokenizer rejected the snapshot at `revision`
    ClassificationFailed { revision: u64, message: String },
}

/// Notifications from the bound file's watcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchMsg {
    /// The file was modified after its baseline
    ExternalChange {
        generation: u64,
        path: PathBuf,
        modified: SystemTime,
    },
    /// The file stayed unreadable past the grace polls
    FileInaccessible {
        generation: u64,
        path: PathBuf,
        reason: String,
    },
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    /// Document messages (text editing)
    Document(DocumentMsg),
    /// App messages (file I/O, lifecycle)
    App(AppMsg),
    /// Syntax highlighting messages
    Syntax(SyntaxMsg),
    /// File watcher messages
    Watch(WatchMsg),
}
