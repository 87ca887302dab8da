//! Runtime module - the message loop driving the model and a surface
//!
//! - `app` - owns the model, the queue and all background workers
//! - `input` - line commands to message mapping for the shell binary

pub mod app;
pub mod input;

pub use app::Runtime;
pub use input::parse_line;
