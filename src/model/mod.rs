//! Application model - the complete state of the editor
//!
//! Only the runtime thread mutates the model. Background work reaches it
//! exclusively through messages.

pub mod editor;
pub mod snapshot;
pub mod ui;

pub use editor::{display_name, EditorModel, FileBinding};
pub use snapshot::{BufferSnapshot, SnapshotCell};
pub use ui::UiState;

use crate::config::EditorConfig;

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    pub editor: EditorModel,
    pub ui: UiState,
    pub config: EditorConfig,
    /// Bumped for every load; progress and results of older loads are ignored
    pub load_generation: u64,
    /// Bumped every time a watcher is armed or disarmed
    pub watch_generation: u64,
    /// Bumped for every save and whenever the buffer changes owner (open, close)
    pub save_generation: u64,
}

impl AppModel {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            editor: EditorModel::new(),
            ui: UiState::new(),
            config,
            load_generation: 0,
            watch_generation: 0,
            save_generation: 0,
        }
    }

    pub fn next_load_generation(&mut self) -> u64 {
        self.load_generation += 1;
        self.load_generation
    }

    pub fn next_save_generation(&mut self) -> u64 {
        self.save_generation += 1;
        self.save_generation
    }

    pub fn next_watch_generation(&mut self) -> u64 {
        self.watch_generation += 1;
        self.watch_generation
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
