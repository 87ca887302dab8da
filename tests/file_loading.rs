//! File loading tests
//!
//! Drives the runtime with a recording surface and real files.

mod common;

use std::fs;

use common::{test_runtime, WAIT};
use sqlpad::messages::{AppMsg, DocumentMsg, Msg};
use tempfile::tempdir;

// ========================================================================
// Successful loads
// ========================================================================

#[test]
fn test_open_loads_text_and_binds() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("q.sql");
    fs::write(&path, "SELECT * FROM t;").unwrap();
    let mtime = fs::metadata(&path).unwrap().modified().unwrap();

    let mut runtime = test_runtime();
    runtime.dispatch(Msg::App(AppMsg::OpenFile(path.clone())));
    assert_eq!(runtime.model().ui.status_message, "Loading...");

    assert!(runtime.pump_until(WAIT, |rt| !rt.model().ui.is_loading));

    let model = runtime.model();
    assert_eq!(model.editor.text(), "SELECT * FROM t;\n");
    let binding = model.editor.binding().expect("binding");
    assert_eq!(binding.path, path);
    assert_eq!(binding.baseline, mtime);
    assert_eq!(model.ui.status_message, "File loaded: q.sql");

    assert_eq!(runtime.surface().text, "SELECT * FROM t;\n");
    assert_eq!(runtime.surface().status, "File loaded: q.sql");
    assert!(runtime.watcher_armed());
}

#[test]
fn test_progress_is_monotonic_and_completes() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("big.sql");
    let content: String = (0..500)
        .map(|i| format!("INSERT INTO t VALUES ({});\n", i))
        .collect();
    fs::write(&path, content).unwrap();

    let mut runtime = test_runtime();
    runtime.dispatch(Msg::App(AppMsg::OpenFile(path)));
    assert!(runtime.pump_until(WAIT, |rt| !rt.model().ui.is_loading));

    let history = runtime.surface().progress_history();
    assert!(history.len() > 2);
    assert!(history.windows(2).all(|w| w[0] <= w[1]));
    assert!(history.iter().all(|p| (0.0..=1.0).contains(p)));
    assert_eq!(history.last(), Some(&1.0));
    assert_eq!(runtime.model().ui.progress, Some(1.0));
}

#[test]
fn test_empty_file_loads_with_full_progress() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("empty.sql");
    fs::write(&path, "").unwrap();

    let mut runtime = test_runtime();
    runtime.dispatch(Msg::App(AppMsg::OpenFile(path)));
    assert!(runtime.pump_until(WAIT, |rt| !rt.model().ui.is_loading));

    assert!(runtime.model().editor.is_empty());
    assert!(runtime.model().editor.binding().is_some());
    assert_eq!(runtime.surface().progress_history().last(), Some(&1.0));
}

#[test]
fn test_open_replaces_edited_buffer() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("q.sql");
    fs::write(&path, "DROP TABLE t;\n").unwrap();

    let mut runtime = test_runtime();
    runtime.dispatch(Msg::Document(DocumentMsg::Append("scratch".into())));
    runtime.dispatch(Msg::App(AppMsg::OpenFile(path)));
    assert!(runtime.pump_until(WAIT, |rt| !rt.model().ui.is_loading));

    assert_eq!(runtime.model().editor.text(), "DROP TABLE t;\n");
}

#[test]
fn test_second_open_wins() {
    let dir = tempdir().expect("Failed to create temp dir");
    let first = dir.path().join("a.sql");
    let second = dir.path().join("b.sql");
    fs::write(&first, "SELECT 1;\n").unwrap();
    fs::write(&second, "SELECT 2;\n").unwrap();

    let mut runtime = test_runtime();
    runtime.dispatch(Msg::App(AppMsg::OpenFile(first)));
    runtime.dispatch(Msg::App(AppMsg::OpenFile(second.clone())));
    assert!(runtime.pump_until(WAIT, |rt| !rt.model().ui.is_loading));

    // Let the superseded loader finish too; its result must be ignored
    runtime.pump(std::time::Duration::from_millis(100));

    assert_eq!(runtime.model().editor.text(), "SELECT 2;\n");
    assert_eq!(
        runtime.model().editor.binding().map(|b| b.path.clone()),
        Some(second)
    );
}

// ========================================================================
// Failed loads
// ========================================================================

#[test]
fn test_nonexistent_path_reports_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nonexistent.sql");

    let mut runtime = test_runtime();
    runtime.dispatch(Msg::Document(DocumentMsg::Append("SELECT 1;".into())));
    runtime.dispatch(Msg::App(AppMsg::OpenFile(path.clone())));
    assert!(runtime.pump_until(WAIT, |rt| !rt.model().ui.is_loading));

    let model = runtime.model();
    assert!(model.editor.is_empty());
    assert!(model.editor.binding().is_none());
    assert_eq!(model.ui.status_message, "Failed to load file");
    assert!(!runtime.watcher_armed());

    let expected = format!("Could not load file from:\n {}", path.display());
    let errors = runtime.surface().errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].1, expected);
}

#[test]
fn test_directory_path_reports_error() {
    let dir = tempdir().expect("Failed to create temp dir");

    let mut runtime = test_runtime();
    runtime.dispatch(Msg::App(AppMsg::OpenFile(dir.path().to_path_buf())));
    assert!(runtime.pump_until(WAIT, |rt| !rt.model().ui.is_loading));

    assert_eq!(runtime.model().ui.status_message, "Failed to load file");
    assert_eq!(runtime.surface().errors().len(), 1);
}

#[test]
fn test_failed_load_drops_previous_binding() {
    let dir = tempdir().expect("Failed to create temp dir");
    let good = dir.path().join("good.sql");
    fs::write(&good, "SELECT 1;\n").unwrap();

    let mut runtime = test_runtime();
    runtime.dispatch(Msg::App(AppMsg::OpenFile(good)));
    assert!(runtime.pump_until(WAIT, |rt| rt.model().editor.binding().is_some()));

    runtime.dispatch(Msg::App(AppMsg::OpenFile(dir.path().join("missing.sql"))));
    assert!(runtime.pump_until(WAIT, |rt| !rt.model().ui.is_loading));

    assert!(runtime.model().editor.binding().is_none());
    assert!(!runtime.watcher_armed());
}
