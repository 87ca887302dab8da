//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.
//! The runtime executes them: file I/O goes to worker threads, watcher
//! commands replace the active watcher, and everything else is forwarded to
//! the render surface.

use std::path::PathBuf;

use crate::listing::TableEntry;
use crate::model::FileBinding;
use crate::surface::Label;
use crate::syntax::StyleSpans;

#[derive(Debug, Clone, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Execute multiple commands in order
    Batch(Vec<Cmd>),

    // === File I/O ===
    /// Load a file on a worker thread, tagged with its load generation
    LoadFile { path: PathBuf, generation: u64 },
    /// Save file asynchronously, tagged with its save generation
    SaveFile {
        path: PathBuf,
        content: String,
        generation: u64,
    },

    // === Watchers ===
    /// Replace the active file watcher with one for `binding`
    ArmWatcher { binding: FileBinding, generation: u64 },
    /// Cancel the active file watcher, if any
    DisarmWatcher,
    /// Read the data directory listing on a worker thread
    ListDirectory { dir: PathBuf },
    /// Replace the data directory watcher
    WatchDirectory { dir: PathBuf },

    // === Surface ===
    /// Apply highlight spans starting at `offset`
    ApplyStyles { offset: usize, spans: StyleSpans },
    /// Replace the displayed text
    ReplaceText(String),
    /// Set a label; an empty string clears it
    SetLabel { label: Label, text: String },
    /// Update the progress indicator
    SetProgress(f64),
    /// Show a blocking error
    ShowError { title: String, message: String },
    /// Replace the table listing
    RefreshListing(Vec<TableEntry>),

    /// Stop background work and exit the loop
    Quit,
}

impl Cmd {
    /// Create a batch of commands, dropping `Cmd::None` entries
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds
            .into_iter()
            .filter(|c| !matches!(c, Cmd::None))
            .collect();
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.remove(0),
            _ => Cmd::Batch(cmds),
        }
    }

    pub fn status(text: impl Into<String>) -> Self {
        Cmd::SetLabel {
            label: Label::Status,
            text: text.into(),
        }
    }

    pub fn feedback(text: impl Into<String>) -> Self {
        Cmd::SetLabel {
            label: Label::Feedback,
            text: text.into(),
        }
    }

    /// Flatten nested batches into a list of leaf commands
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            cmd => vec![cmd],
        }
    }

    /// Whether executing this command touches the render surface
    pub fn touches_surface(&self) -> bool {
        match self {
            Cmd::None
            | Cmd::LoadFile { .. }
            | Cmd::SaveFile { .. }
            | Cmd::ArmWatcher { .. }
            | Cmd::DisarmWatcher
            | Cmd::ListDirectory { .. }
            | Cmd::WatchDirectory { .. }
            | Cmd::Quit => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.touches_surface()),
            Cmd::ApplyStyles { .. }
            | Cmd::ReplaceText(_)
            | Cmd::SetLabel { .. }
            | Cmd::SetProgress(_)
            | Cmd::ShowError { .. }
            | Cmd::RefreshListing(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_drops_none() {
        assert!(matches!(Cmd::batch(vec![]), Cmd::None));
        assert!(matches!(Cmd::batch(vec![Cmd::None, Cmd::None]), Cmd::None));
        assert!(matches!(
            Cmd::batch(vec![Cmd::None, Cmd::DisarmWatcher]),
            Cmd::DisarmWatcher
        ));
        assert!(matches!(
            Cmd::batch(vec![Cmd::Quit, Cmd::DisarmWatcher]),
            Cmd::Batch(ref cmds) if cmds.len() == 2
        ));
    }

    #[test]
    fn test_flatten_nested_batches() {
        let cmd = Cmd::Batch(vec![
            Cmd::status("a"),
            Cmd::Batch(vec![Cmd::None, Cmd::DisarmWatcher]),
            Cmd::Quit,
        ]);
        let flat = cmd.flatten();
        assert_eq!(flat.len(), 3);
        assert!(matches!(flat[1], Cmd::DisarmWatcher));
    }

    #[test]
    fn test_touches_surface() {
        assert!(!Cmd::DisarmWatcher.touches_surface());
        assert!(Cmd::feedback("x").touches_surface());
        assert!(Cmd::Batch(vec![Cmd::Quit, Cmd::SetProgress(0.5)]).touches_surface());
    }
}
