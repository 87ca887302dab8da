//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/sqlpad/config.yaml`

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Re-highlight period in milliseconds
    #[serde(default = "default_highlight_interval_ms")]
    pub highlight_interval_ms: u64,

    /// External-change poll period in milliseconds
    #[serde(default = "default_watch_interval_ms")]
    pub watch_interval_ms: u64,

    /// Added to the post-save baseline to absorb coarse filesystem timestamps
    #[serde(default = "default_save_baseline_slack_ms")]
    pub save_baseline_slack_ms: u64,

    /// Consecutive failed polls tolerated before the bound file counts as gone
    #[serde(default = "default_missing_file_grace_polls")]
    pub missing_file_grace_polls: u32,

    /// Extension of the table files shown in the data directory listing
    #[serde(default = "default_listing_extension")]
    pub listing_extension: String,

    /// Debounce for data directory change events in milliseconds
    #[serde(default = "default_listing_debounce_ms")]
    pub listing_debounce_ms: u64,
}

fn default_highlight_interval_ms() -> u64 {
    500
}

fn default_watch_interval_ms() -> u64 {
    1000
}

fn default_save_baseline_slack_ms() -> u64 {
    1000
}

fn default_missing_file_grace_polls() -> u32 {
    3
}

fn default_listing_extension() -> String {
    "csv".to_string()
}

fn default_listing_debounce_ms() -> u64 {
    500
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            highlight_interval_ms: default_highlight_interval_ms(),
            watch_interval_ms: default_watch_interval_ms(),
            save_baseline_slack_ms: default_save_baseline_slack_ms(),
            missing_file_grace_polls: default_missing_file_grace_polls(),
            listing_extension: default_listing_extension(),
            listing_debounce_ms: default_listing_debounce_ms(),
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse config YAML; missing keys take their defaults
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn highlight_interval(&self) -> Duration {
        Duration::from_millis(self.highlight_interval_ms.max(1))
    }

    pub fn watch_interval(&self) -> Duration {
        Duration::from_millis(self.watch_interval_ms.max(1))
    }

    pub fn save_baseline_slack(&self) -> Duration {
        Duration::from_millis(self.save_baseline_slack_ms)
    }

    pub fn listing_debounce(&self) -> Duration {
        Duration::from_millis(self.listing_debounce_ms.max(1))
    }

    /// Listing extension without a leading dot
    pub fn listing_extension(&self) -> &str {
        self.listing_extension.trim_start_matches('.')
    }
}
