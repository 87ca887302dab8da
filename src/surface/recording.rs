//! In-memory surface that records every call

use super::{Label, RenderSurface};
use crate::listing::TableEntry;
use crate::syntax::StyleSpans;

#[derive(Debug, Clone)]
pub enum SurfaceEvent {
    ApplyStyles { offset: usize, spans: StyleSpans },
    ReplaceText(String),
    SetLabel { label: Label, text: String },
    SetProgress(f64),
    ShowError { title: String, message: String },
    RefreshListing(Vec<TableEntry>),
}

/// Records calls in order and tracks the resulting visible state
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub events: Vec<SurfaceEvent>,
    pub text: String,
    pub status: String,
    pub feedback: String,
    pub progress: Option<f64>,
    pub styles: Option<StyleSpans>,
    pub listing: Vec<TableEntry>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> Vec<(&str, &str)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::ShowError { title, message } => {
                    Some((title.as_str(), message.as_str()))
                }
                _ => None,
            })
            .collect()
    }

    /// Every progress value reported, in order
    pub fn progress_history(&self) -> Vec<f64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::SetProgress(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    pub fn style_applications(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SurfaceEvent::ApplyStyles { .. }))
            .count()
    }
}

impl RenderSurface for RecordingSurface {
    fn apply_styles(&mut self, offset: usize, spans: &StyleSpans) {
        self.styles = Some(spans.clone());
        self.events.push(SurfaceEvent::ApplyStyles {
            offset,
            spans: spans.clone(),
        });
    }

    fn replace_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.styles = None;
        self.events.push(SurfaceEvent::ReplaceText(text.to_string()));
    }

    fn set_label(&mut self, label: Label, text: &str) {
        match label {
            Label::Status => self.status = text.to_string(),
            Label::Feedback => self.feedback = text.to_string(),
        }
        self.events.push(SurfaceEvent::SetLabel {
            label,
            text: text.to_string(),
        });
    }

    fn set_progress(&mut self, fraction: f64) {
        self.progress = Some(fraction);
        self.events.push(SurfaceEvent::SetProgress(fraction));
    }

    fn show_error(&mut self, title: &str, message: &str) {
        self.events.push(SurfaceEvent::ShowError {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn refresh_listing(&mut self, entries: &[TableEntry]) {
        self.listing = entries.to_vec();
        self.events.push(SurfaceEvent::RefreshListing(entries.to_vec()));
    }
}
