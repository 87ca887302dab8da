//! sqlpad - editor synchronization core
//!
//! Keeps an in-memory SQL buffer, its highlighting and its on-disk file
//! consistent using the Elm Architecture pattern: background threads
//! (highlight scheduler, loaders, watchers) post messages, and a single
//! runtime thread applies them to the model and drives a render surface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod listing;
pub mod loader;
pub mod logging;
pub mod messages;
pub mod model;
pub mod periodic;
pub mod runtime;
pub mod save;
pub mod scheduler;
pub mod surface;
pub mod syntax;
pub mod update;
pub mod watcher;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use messages::Msg;
pub use model::AppModel;
pub use runtime::Runtime;
