//! Syntax highlighting module
//!
//! Provides SQL highlighting with:
//! - A pluggable `Tokenizer` (bundled: `SqlLexer`)
//! - A static token kind → style class table
//! - Span building over immutable buffer snapshots
//!
//! ## Architecture
//!
//! ```text
//! EditorModel edit → SnapshotCell::publish
//!   → (scheduler thread, every tick) compute_highlighting(snapshot)
//!   → Msg::Syntax(HighlightsComputed) → update (revision check)
//!   → Cmd::ApplyStyles → RenderSurface
//! ```

mod lexer;
mod spans;
mod style;
mod token;

pub use lexer::SqlLexer;
pub use spans::{build_spans, compute_highlighting, StyleSpan, StyleSpans, StyleSpansBuilder};
pub use style::{classify, StyleClass};
pub use token::{ClassificationError, Token, TokenKind, Tokenizer};
