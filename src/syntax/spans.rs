//! Style span sequences
//!
//! One highlighting pass turns a buffer snapshot into an ordered list of
//! spans whose lengths add up to the snapshot length. Gaps between tokens
//! (whitespace, comments) get an empty style.

use std::ops::Range;
use std::sync::Arc;

use super::style::{classify, StyleClass};
use super::token::{ClassificationError, Token, Tokenizer};
use crate::model::BufferSnapshot;

/// A run of text sharing one style. `class == None` is the empty style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSpan {
    pub class: Option<StyleClass>,
    pub len: usize,
}

impl StyleSpan {
    pub fn gap(len: usize) -> Self {
        Self { class: None, len }
    }

    pub fn styled(class: StyleClass, len: usize) -> Self {
        Self {
            class: Some(class),
            len,
        }
    }

    /// Style tags for this span (empty for gaps)
    pub fn tags(&self) -> impl Iterator<Item = &'static str> {
        self.class.map(StyleClass::tag).into_iter()
    }
}

/// Result of one highlighting pass over a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSpans {
    spans: Vec<StyleSpan>,
    revision: u64,
    source: Arc<str>,
}

impl StyleSpans {
    pub fn spans(&self) -> &[StyleSpan] {
        &self.spans
    }

    /// Buffer revision the spans were computed from
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Snapshot text the spans were computed from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn total_len(&self) -> usize {
        self.spans.iter().map(|s| s.len).sum()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Spans paired with their byte range in the source
    pub fn ranges(&self) -> impl Iterator<Item = (Range<usize>, Option<StyleClass>)> + '_ {
        let mut offset = 0;
        self.spans.iter().map(move |span| {
            let range = offset..offset + span.len;
            offset += span.len;
            (range, span.class)
        })
    }
}

/// Accumulates spans left to right, filling gaps with the empty style
#[derive(Debug, Default)]
pub struct StyleSpansBuilder {
    spans: Vec<StyleSpan>,
    position: usize,
}

impl StyleSpansBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current end offset of the built spans
    pub fn position(&self) -> usize {
        self.position
    }

    /// Add an unstyled span up to `offset` (no-op if already there)
    pub fn gap_to(&mut self, offset: usize) {
        if offset > self.position {
            self.spans.push(StyleSpan::gap(offset - self.position));
            self.position = offset;
        }
    }

    pub fn push(&mut self, class: StyleClass, len: usize) {
        if len > 0 {
            self.spans.push(StyleSpan::styled(class, len));
            self.position += len;
        }
    }

    pub fn finish(mut self, source: Arc<str>, revision: u64) -> StyleSpans {
        self.gap_to(source.len());
        StyleSpans {
            spans: self.spans,
            revision,
            source,
        }
    }
}

/// Build spans for `snapshot` from an already scanned token list
///
/// Rejects token lists that overlap, run backwards, or leave the text.
pub fn build_spans(
    snapshot: &BufferSnapshot,
    tokens: &[Token],
) -> Result<StyleSpans, ClassificationError> {
    let len = snapshot.len();
    let mut builder = StyleSpansBuilder::new();

    for token in tokens {
        if token.start < builder.position() || token.start > token.end || token.end > len {
            return Err(ClassificationError::new(
                format!(
                    "Tokenizer produced an invalid range {}..{}",
                    token.start, token.end
                ),
                token.start.min(len),
            ));
        }
        builder.gap_to(token.start);
        builder.push(classify(token.kind), token.len());
    }

    Ok(builder.finish(Arc::clone(&snapshot.text), snapshot.revision))
}

/// Tokenize and classify a snapshot
pub fn compute_highlighting(
    snapshot: &BufferSnapshot,
    tokenizer: &dyn Tokenizer,
) -> Result<StyleSpans, ClassificationError> {
    let tokens = tokenizer.scan(&snapshot.text)?;
    build_spans(snapshot, &tokens)
}
