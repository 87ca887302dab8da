//! Configuration system tests
//!
//! Tests for config paths and editor config parsing.

use std::time::Duration;

use sqlpad::config::EditorConfig;
use sqlpad::config_paths;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("sqlpad"));
    }
}

#[test]
fn test_config_file_ends_with_yaml() {
    if let Some(file) = config_paths::config_file() {
        assert_eq!(file.extension().and_then(|e| e.to_str()), Some("yaml"));
    }
}

#[test]
fn test_logs_dir_is_under_config_dir() {
    if let (Some(config), Some(logs)) = (config_paths::config_dir(), config_paths::logs_dir()) {
        assert!(logs.starts_with(config));
    }
}

// ========================================================================
// EditorConfig Tests
// ========================================================================

#[test]
fn test_full_yaml() {
    let yaml = r#"
highlight_interval_ms: 250
watch_interval_ms: 2000
save_baseline_slack_ms: 0
missing_file_grace_polls: 5
listing_extension: tsv
listing_debounce_ms: 100
"#;
    let config = EditorConfig::from_yaml(yaml).unwrap();
    assert_eq!(config.highlight_interval(), Duration::from_millis(250));
    assert_eq!(config.watch_interval(), Duration::from_secs(2));
    assert_eq!(config.save_baseline_slack(), Duration::ZERO);
    assert_eq!(config.missing_file_grace_polls, 5);
    assert_eq!(config.listing_extension(), "tsv");
    assert_eq!(config.listing_debounce(), Duration::from_millis(100));
}

#[test]
fn test_unknown_keys_are_ignored() {
    let config = EditorConfig::from_yaml("theme: dark\nwatch_interval_ms: 10\n").unwrap();
    assert_eq!(config.watch_interval_ms, 10);
}
