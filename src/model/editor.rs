//! Editor model - the text buffer and its file binding
//!
//! The runtime thread is the only writer. Every mutation bumps the revision
//! and publishes a fresh snapshot for background readers.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::snapshot::{BufferSnapshot, SnapshotCell};
use crate::syntax::StyleSpans;

/// Association between the buffer and the file it was loaded from or saved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBinding {
    pub path: PathBuf,
    /// On-disk modification time recorded at the last load or save
    pub baseline: SystemTime,
}

impl FileBinding {
    pub fn new(path: impl Into<PathBuf>, baseline: SystemTime) -> Self {
        Self {
            path: path.into(),
            baseline,
        }
    }

    /// File name for status messages, falling back to the full path
    pub fn display_name(&self) -> String {
        display_name(&self.path)
    }
}

/// File name of `path` for user-facing messages
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// The canonical text buffer
#[derive(Debug)]
pub struct EditorModel {
    text: String,
    revision: u64,
    binding: Option<FileBinding>,
    /// Last span set applied to the surface
    highlights: Option<StyleSpans>,
    snapshots: Arc<SnapshotCell>,
}

impl EditorModel {
    pub fn new() -> Self {
        Self::with_text("")
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let snapshots = Arc::new(SnapshotCell::new(BufferSnapshot::new(text.as_str(), 0)));
        Self {
            text,
            revision: 0,
            binding: None,
            highlights: None,
            snapshots,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn binding(&self) -> Option<&FileBinding> {
        self.binding.as_ref()
    }

    pub fn set_binding(&mut self, binding: Option<FileBinding>) {
        self.binding = binding;
    }

    pub fn highlights(&self) -> Option<&StyleSpans> {
        self.highlights.as_ref()
    }

    pub fn set_highlights(&mut self, spans: StyleSpans) {
        self.highlights = Some(spans);
    }

    /// Shared slot background readers load snapshots from
    pub fn snapshots(&self) -> Arc<SnapshotCell> {
        Arc::clone(&self.snapshots)
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> Arc<BufferSnapshot> {
        self.snapshots.load()
    }

    /// Replace the whole buffer
    pub fn replace_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.highlights = None;
        self.commit();
    }

    pub fn clear(&mut self) {
        self.replace_text(String::new());
    }

    /// Insert at a byte offset (clamped to the buffer and to a char boundary)
    pub fn insert(&mut self, offset: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let offset = self.clamp_offset(offset);
        self.text.insert_str(offset, text);
        self.commit();
    }

    pub fn append(&mut self, text: &str) {
        self.insert(self.text.len(), text);
    }

    /// Delete the byte range `start..end` (clamped like `insert`)
    pub fn delete(&mut self, start: usize, end: usize) {
        let start = self.clamp_offset(start);
        let end = self.clamp_offset(end);
        if start >= end {
            return;
        }
        self.text.replace_range(start..end, "");
        self.commit();
    }

    fn clamp_offset(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    fn commit(&mut self) {
        self.revision += 1;
        self.snapshots
            .publish(BufferSnapshot::new(self.text.as_str(), self.revision));
    }
}

impl Default for EditorModel {
    fn default() -> Self {
        Self::new()
    }
}
