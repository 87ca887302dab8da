//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod document;
mod syntax;
mod watch;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::update_app;
pub use document::update_document;
pub use syntax::update_syntax;
pub use watch::update_watch;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Document(m) => document::update_document(model, m),
        Msg::App(m) => app::update_app(model, m),
        Msg::Syntax(m) => syntax::update_syntax(model, m),
        Msg::Watch(m) => watch::update_watch(model, m),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Periodic messages (load progress, highlight results) are not logged.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    use crate::messages::{AppMsg, SyntaxMsg};

    let is_noisy = matches!(
        &msg,
        Msg::App(AppMsg::LoadProgress { .. }) | Msg::Syntax(SyntaxMsg::HighlightsComputed(_))
    );

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let revision_before = model.editor.revision();
    let result = update_inner(model, msg);

    if model.editor.revision() != revision_before {
        debug!(
            target: "buffer",
            "revision {} -> {} ({} bytes)",
            revision_before,
            model.editor.revision(),
            model.editor.len()
        );
    }

    result
}

/// Get a display name for a message type
///
/// Buffer contents and spans are summarized rather than printed.
/// Example outputs:
/// - `Document::Append(12 bytes)`
/// - `App::OpenFile("q.sql")`
/// - `Syntax::HighlightsComputed(rev 4)`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::{AppMsg, DocumentMsg, SyntaxMsg};

    match msg {
        Msg::Document(DocumentMsg::Append(text)) => {
            format!("Document::Append({} bytes)", text.len())
        }
        Msg::Document(DocumentMsg::SetText(text)) => {
            format!("Document::SetText({} bytes)", text.len())
        }
        Msg::Document(m) => format!("Document::{:?}", m),
        Msg::App(AppMsg::FileLoaded { generation, result }) => format!(
            "App::FileLoaded(gen {}, {})",
            generation,
            if result.is_ok() { "ok" } else { "error" }
        ),
        Msg::App(m) => format!("App::{:?}", m),
        Msg::Syntax(SyntaxMsg::HighlightsComputed(spans)) => {
            format!("Syntax::HighlightsComputed(rev {})", spans.revision())
        }
        Msg::Syntax(m) => format!("Syntax::{:?}", m),
        Msg::Watch(m) => format!("Watch::{:?}", m),
    }
}
