//! Render surfaces
//!
//! A surface is whatever displays the buffer, its highlighting and the
//! status widgets. It is driven only from the runtime thread, so
//! implementations need no synchronization.

mod console;
mod recording;

pub use console::ConsoleSurface;
pub use recording::{RecordingSurface, SurfaceEvent};

use crate::listing::TableEntry;
use crate::syntax::StyleSpans;

/// Text labels a surface shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// Load/save status line
    Status,
    /// Transient feedback (classification errors, confirmations)
    Feedback,
}

pub trait RenderSurface {
    /// Apply highlight spans starting at byte `offset` of the displayed text
    fn apply_styles(&mut self, offset: usize, spans: &StyleSpans);

    /// Replace the displayed text
    fn replace_text(&mut self, text: &str);

    /// Set a label; an empty string clears it
    fn set_label(&mut self, label: Label, text: &str);

    /// Progress indicator in [0, 1]
    fn set_progress(&mut self, fraction: f64);

    /// Blocking error report
    fn show_error(&mut self, title: &str, message: &str);

    /// Replace the data directory listing
    fn refresh_listing(&mut self, entries: &[TableEntry]);
}

impl<S: RenderSurface + ?Sized> RenderSurface for Box<S> {
    fn apply_styles(&mut self, offset: usize, spans: &StyleSpans) {
        (**self).apply_styles(offset, spans)
    }

    fn replace_text(&mut self, text: &str) {
        (**self).replace_text(text)
    }

    fn set_label(&mut self, label: Label, text: &str) {
        (**self).set_label(label, text)
    }

    fn set_progress(&mut self, fraction: f64) {
        (**self).set_progress(fraction)
    }

    fn show_error(&mut self, title: &str, message: &str) {
        (**self).show_error(title, message)
    }

    fn refresh_listing(&mut self, entries: &[TableEntry]) {
        (**self).refresh_listing(entries)
    }
}
