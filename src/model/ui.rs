//! UI state - labels, progress and the reload prompt

use std::path::PathBuf;

use crate::listing::TableEntry;

/// Everything the surface shows besides the buffer itself
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Status label (load/save progress and results)
    pub status_message: String,
    /// Feedback label (classification errors, confirmations)
    pub feedback: String,
    /// Whether `feedback` currently holds a classification error
    pub feedback_is_error: bool,
    /// Load progress in [0, 1], `None` when no load has run
    pub progress: Option<f64>,
    /// The bound file changed on disk and can be reloaded
    pub reload_available: bool,
    pub is_loading: bool,
    pub is_saving: bool,
    pub data_dir: Option<PathBuf>,
    pub listing: Vec<TableEntry>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    pub fn set_feedback(&mut self, message: impl Into<String>) {
        self.feedback = message.into();
        self.feedback_is_error = false;
    }

    pub fn set_feedback_error(&mut self, message: impl Into<String>) {
        self.feedback = message.into();
        self.feedback_is_error = true;
    }

    /// Clear the feedback label if it is showing an error
    ///
    /// Returns true when the label changed.
    pub fn clear_feedback_error(&mut self) -> bool {
        if !self.feedback_is_error {
            return false;
        }
        self.feedback.clear();
        self.feedback_is_error = false;
        true
    }

    /// Record load progress; never decreases while a load is running
    ///
    /// Returns the value actually stored.
    pub fn advance_progress(&mut self, fraction: f64) -> f64 {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let value = match self.progress {
            Some(current) if self.is_loading => current.max(fraction),
            _ => fraction,
        };
        self.progress = Some(value);
        value
    }
}
