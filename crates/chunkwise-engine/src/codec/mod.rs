//! # Tagged-Text Codec
//!
//! Converts between the flat tagged wire format and [`ChunkSequence`].
//!
//! ## Wire format
//!
//! - Chunk boundary: `<cN>...</cN>`, `N` a positive decimal number written the
//!   same way on both tags.
//! - Emphasis boundary: `<v>...</v>` inside chunk content, unnumbered and not
//!   nested.
//! - Any other markup is literal text. Tag tokens outside a matched pair are
//!   noise and are stripped.
//!
//! ## Modules
//!
//! - **`tags`**: delimiter constants (`ChunkTag`, `VerbTag`)
//! - **`cursor`**: byte cursor used by the span scanners
//! - **`parser`**: `parse_tagged()` with orphan-text absorption
//! - **`cleanup`**: residual tag stripping
//! - **`serialize`**: `to_tagged()` and the slash-joined `display()`
//! - **`words`**: `segments_to_words()` / `words_to_segments()`
//!
//! ## Round trip
//!
//! Once one parse has absorbed orphan text, `parse(to_tagged(parse(s)))`
//! equals `parse(s)` in tags, chunk text and per-word emphasis.

pub mod cleanup;
pub mod cursor;
pub mod parser;
pub mod serialize;
pub mod tags;
pub mod words;

pub use parser::parse_tagged;
pub use serialize::{display, to_tagged};
pub use words::{segments_to_words, words_to_segments};

use crate::models::ChunkSequence;

/// Result of parsing producer output: chunks, or the raw text when no chunk
/// span was recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedSentence {
    Chunked(ChunkSequence),
    Raw(String),
}

impl ParsedSentence {
    /// Display form, falling back to the raw text
    pub fn display(&self) -> String {
        match self {
            ParsedSentence::Chunked(seq) => seq.display(),
            ParsedSentence::Raw(raw) => raw.clone(),
        }
    }

    pub fn is_chunked(&self) -> bool {
        matches!(self, ParsedSentence::Chunked(_))
    }
}

/// Parse, keeping the input as raw text when nothing is recognised.
pub fn parse_or_raw(input: &str) -> ParsedSentence {
    let seq = parse_tagged(input);
    if seq.is_empty() {
        ParsedSentence::Raw(input.to_string())
    } else {
        ParsedSentence::Chunked(seq)
    }
}
