//! Immutable buffer snapshots shared with background workers
//!
//! The editor publishes a fresh snapshot after every mutation. Readers load
//! the current `Arc` without locking and keep it for the duration of their
//! work; later edits never touch a snapshot that was already handed out.

use std::sync::Arc;

use arc_swap::ArcSwap;

/// Value copy of the buffer at one revision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferSnapshot {
    pub text: Arc<str>,
    pub revision: u64,
}

impl BufferSnapshot {
    pub fn new(text: impl Into<Arc<str>>, revision: u64) -> Self {
        Self {
            text: text.into(),
            revision,
        }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Single-writer, many-reader slot holding the latest snapshot
#[derive(Debug)]
pub struct SnapshotCell {
    current: ArcSwap<BufferSnapshot>,
}

impl SnapshotCell {
    pub fn new(snapshot: BufferSnapshot) -> Self {
        Self {
            current: ArcSwap::from_pointee(snapshot),
        }
    }

    /// Latest published snapshot
    pub fn load(&self) -> Arc<BufferSnapshot> {
        self.current.load_full()
    }

    pub fn publish(&self, snapshot: BufferSnapshot) {
        self.current.store(Arc::new(snapshot));
    }
}

impl Default for SnapshotCell {
    fn default() -> Self {
        Self::new(BufferSnapshot::new("", 0))
    }
}
