use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use super::tags::{ChunkTag, VerbTag};

static CHUNK_RESIDUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(ChunkTag::RESIDUAL_PATTERN).expect("chunk tag pattern is valid"));

static VERB_RESIDUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(VerbTag::RESIDUAL_PATTERN).expect("verb tag pattern is valid"));

/// Remove unmatched `<cN>` / `</cN>` tokens.
pub fn strip_chunk_tags(text: &str) -> Cow<'_, str> {
    CHUNK_RESIDUE.replace_all(text, "")
}

/// Remove unmatched `<v>` / `</v>` tokens.
pub fn strip_verb_tags(text: &str) -> Cow<'_, str> {
    VERB_RESIDUE.replace_all(text, "")
}

/// Remove every recognised tag token, matched or not.
pub fn strip_all_tags(text: &str) -> String {
    strip_verb_tags(&strip_chunk_tags(text)).into_owned()
}
