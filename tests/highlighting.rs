//! Background highlighting tests
//!
//! Runs the real scheduler against the runtime and checks what reaches the
//! surface.

mod common;

use std::fs;

use common::{started_runtime, test_runtime, WAIT};
use sqlpad::messages::{AppMsg, DocumentMsg, Msg, SyntaxMsg};
use sqlpad::scheduler::highlight_pass;
use sqlpad::syntax::{SqlLexer, StyleClass};
use tempfile::tempdir;

#[test]
fn test_select_statement_spans() {
    let mut runtime = started_runtime();
    runtime.dispatch(Msg::Document(DocumentMsg::Append("SELECT * FROM t;".into())));

    assert!(runtime.pump_until(WAIT, |rt| rt.surface().styles.is_some()));

    let spans = runtime.surface().styles.clone().unwrap();
    assert_eq!(spans.revision(), runtime.model().editor.revision());
    assert_eq!(spans.total_len(), 16);

    let classes: Vec<_> = spans.spans().iter().map(|s| s.class).collect();
    assert_eq!(
        classes,
        vec![
            Some(StyleClass::Dml),
            None,
            Some(StyleClass::Operator),
            None,
            Some(StyleClass::Keyword),
            None,
            Some(StyleClass::Literal),
            Some(StyleClass::Operator),
        ]
    );
}

#[test]
fn test_loaded_file_trailing_newline_is_gap() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("q.sql");
    fs::write(&path, "SELECT * FROM t;").unwrap();

    let mut runtime = started_runtime();
    runtime.dispatch(Msg::App(AppMsg::OpenFile(path)));

    assert!(runtime.pump_until(WAIT, |rt| rt
        .surface()
        .styles
        .as_ref()
        .is_some_and(|s| s.total_len() == 17)));

    let spans = runtime.surface().styles.clone().unwrap();
    let last = spans.spans().last().unwrap();
    assert_eq!(last.class, None);
    assert_eq!(last.len, 1);
}

#[test]
fn test_highlights_follow_edits() {
    let mut runtime = started_runtime();
    runtime.dispatch(Msg::Document(DocumentMsg::Append("SELECT".into())));
    assert!(runtime.pump_until(WAIT, |rt| rt.surface().styles.is_some()));

    runtime.dispatch(Msg::Document(DocumentMsg::Append(" 1".into())));
    assert!(runtime.pump_until(WAIT, |rt| rt
        .surface()
        .styles
        .as_ref()
        .is_some_and(|s| s.source() == "SELECT 1")));
}

#[test]
fn test_idle_buffer_is_not_rehighlighted() {
    let mut runtime = started_runtime();
    runtime.dispatch(Msg::Document(DocumentMsg::Append("SELECT 1".into())));
    assert!(runtime.pump_until(WAIT, |rt| rt.surface().styles.is_some()));

    runtime.pump_until(std::time::Duration::from_millis(100), |_| false);
    assert_eq!(runtime.surface().style_applications(), 1);
}

#[test]
fn test_classification_error_is_feedback_only() {
    let mut runtime = started_runtime();
    runtime.dispatch(Msg::Document(DocumentMsg::Append("SELECT 1".into())));
    assert!(runtime.pump_until(WAIT, |rt| rt.surface().styles.is_some()));

    runtime.dispatch(Msg::Document(DocumentMsg::Append(" 'oops".into())));
    assert!(runtime.pump_until(WAIT, |rt| !rt.surface().feedback.is_empty()));

    assert!(runtime.surface().feedback.contains("Unterminated string"));
    // Previous highlighting stays applied
    assert_eq!(runtime.surface().styles.as_ref().unwrap().source(), "SELECT 1");

    runtime.dispatch(Msg::Document(DocumentMsg::Append("'".into())));
    assert!(runtime.pump_until(WAIT, |rt| rt.surface().feedback.is_empty()));
    assert_eq!(
        runtime.surface().styles.as_ref().unwrap().source(),
        "SELECT 1 'oops'"
    );
}

#[test]
fn test_stale_result_never_reaches_surface() {
    let mut runtime = test_runtime();
    runtime.dispatch(Msg::Document(DocumentMsg::Append("SELECT".into())));
    let stale = highlight_pass(&runtime.model().editor.snapshot(), &SqlLexer);

    runtime.dispatch(Msg::Document(DocumentMsg::Append(" 1".into())));
    runtime.dispatch(Msg::Syntax(stale));

    assert_eq!(runtime.surface().style_applications(), 0);
    assert!(runtime.model().editor.highlights().is_none());

    let current = highlight_pass(&runtime.model().editor.snapshot(), &SqlLexer);
    assert!(matches!(current, SyntaxMsg::HighlightsComputed(_)));
    runtime.dispatch(Msg::Syntax(current));
    assert_eq!(runtime.surface().style_applications(), 1);
}
