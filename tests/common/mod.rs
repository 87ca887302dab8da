//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use sqlpad::config::EditorConfig;
use sqlpad::surface::RecordingSurface;
use sqlpad::syntax::SqlLexer;
use sqlpad::Runtime;

/// Generous upper bound for anything asynchronous to settle
pub const WAIT: Duration = Duration::from_secs(5);

/// Config with short periods so tests run quickly
pub fn fast_config() -> EditorConfig {
    EditorConfig {
        highlight_interval_ms: 10,
        watch_interval_ms: 10,
        save_baseline_slack_ms: 1000,
        missing_file_grace_polls: 2,
        listing_debounce_ms: 50,
        ..EditorConfig::default()
    }
}

/// Runtime over a recording surface, scheduler not started
pub fn test_runtime() -> Runtime<RecordingSurface> {
    Runtime::new(fast_config(), RecordingSurface::new(), Arc::new(SqlLexer))
}

/// Runtime over a recording surface with the highlight scheduler running
pub fn started_runtime() -> Runtime<RecordingSurface> {
    let mut runtime = test_runtime();
    runtime.start().expect("scheduler should start");
    runtime
}

/// Set a file's modification time
pub fn set_mtime(path: &Path, time: SystemTime) {
    File::options()
        .write(true)
        .open(path)
        .expect("open for set_modified")
        .set_modified(time)
        .expect("set_modified");
}

/// Modification time well after anything the tests write
pub fn far_future() -> SystemTime {
    SystemTime::now() + Duration::from_secs(3600)
}
