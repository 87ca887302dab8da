//! Command-line argument parsing
//!
//! Supports:
//! - Opening a file at startup
//! - Pointing the table listing at a data directory
//! - Overriding the highlight and watch intervals for this session

use clap::Parser;
use std::path::PathBuf;

use crate::config::EditorConfig;

/// A SQL scratchpad with background highlighting and external-change detection
#[derive(Parser, Debug)]
#[command(
    name = "sqlpad",
    version,
    about = "A SQL scratchpad with background highlighting"
)]
pub struct CliArgs {
    /// SQL file to open
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Directory of table files to list
    #[arg(short = 'd', long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Re-highlight period in milliseconds
    #[arg(long, value_name = "MS")]
    pub highlight_interval: Option<u64>,

    /// External-change poll period in milliseconds
    #[arg(long, value_name = "MS")]
    pub watch_interval: Option<u64>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl CliArgs {
    /// Apply command-line overrides on top of the loaded config
    pub fn apply_overrides(&self, config: &mut EditorConfig) {
        if let Some(ms) = self.highlight_interval {
            config.highlight_interval_ms = ms;
        }
        if let Some(ms) = self.watch_interval {
            config.watch_interval_ms = ms;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args() {
        let args = CliArgs::try_parse_from(["sqlpad"]).unwrap();
        assert!(args.file.is_none());
        assert!(args.data_dir.is_none());
        assert!(!args.no_color);
    }

    #[test]
    fn test_file_and_data_dir() {
        let args = CliArgs::try_parse_from(["sqlpad", "q.sql", "--data-dir", "data"]).unwrap();
        assert_eq!(args.file, Some(PathBuf::from("q.sql")));
        assert_eq!(args.data_dir, Some(PathBuf::from("data")));
    }

    #[test]
    fn test_interval_overrides() {
        let args = CliArgs::try_parse_from([
            "sqlpad",
            "--highlight-interval",
            "100",
            "--watch-interval",
            "250",
        ])
        .unwrap();

        let mut config = EditorConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.highlight_interval_ms, 100);
        assert_eq!(config.watch_interval_ms, 250);
        assert_eq!(config.save_baseline_slack_ms, 1000);
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let args = CliArgs::try_parse_from(["sqlpad"]).unwrap();
        let mut config = EditorConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_invalid_interval_rejected() {
        assert!(CliArgs::try_parse_from(["sqlpad", "--watch-interval", "soon"]).is_err());
    }
}
