use serde::{Deserialize, Serialize};

use crate::codec::words::{segments_to_words, words_to_segments};

/// A maximal run of characters within a chunk that share one emphasis state.
///
/// Segments carry their own boundary spacing, so concatenating the texts of a
/// chunk's segments reproduces the chunk's visible text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub is_verb: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_verb: false,
        }
    }

    pub fn verb(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_verb: true,
        }
    }

    /// The placeholder segment an empty chunk carries
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A single whitespace-delimited token, the unit addressed by split and toggle.
///
/// Words are derived on demand from segments and never stored on a chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub word: String,
    pub is_verb: bool,
}

impl Word {
    pub fn new(word: impl Into<String>, is_verb: bool) -> Self {
        Self {
            word: word.into(),
            is_verb,
        }
    }
}

/// One translation unit of a sentence.
///
/// `tag` is the chunk's 1-based position and is reassigned after every
/// structural edit, so it must not be used as a key across edits. `text` is
/// always [`derive_text`] of `segments`; the fields are private to keep it so.
/// Deserialisation ignores any incoming `text` and re-derives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ChunkRepr")]
pub struct Chunk {
    tag: u32,
    text: String,
    segments: Vec<Segment>,
}

impl Chunk {
    /// Build a chunk from segments. An empty segment list becomes a single
    /// empty, non-verb segment.
    pub fn from_segments(tag: u32, segments: Vec<Segment>) -> Self {
        let segments = if segments.is_empty() {
            vec![Segment::empty()]
        } else {
            segments
        };
        let text = derive_text(&segments);
        Self {
            tag,
            text,
            segments,
        }
    }

    /// Build a chunk from a word list via the word-join helper
    pub fn from_words(tag: u32, words: &[Word]) -> Self {
        Self::from_segments(tag, words_to_segments(words))
    }

    pub fn tag(&self) -> u32 {
        self.tag
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn words(&self) -> Vec<Word> {
        segments_to_words(&self.segments)
    }

    pub fn word_count(&self) -> usize {
        self.words().len()
    }

    pub(crate) fn set_tag(&mut self, tag: u32) {
        self.tag = tag;
    }

    /// Replace the segment list and re-derive `text`
    pub(crate) fn set_segments(&mut self, segments: Vec<Segment>) {
        *self = Self::from_segments(self.tag, segments);
    }

    /// Append orphan text onto the chunk's last segment, joined with a single
    /// space. The text takes that segment's emphasis flag.
    pub(crate) fn append_text(&mut self, extra: &str) {
        let mut segments = std::mem::take(&mut self.segments);
        match segments.last_mut() {
            Some(last) => {
                if !last.text.is_empty() && !last.text.ends_with(char::is_whitespace) {
                    last.text.push(' ');
                }
                last.text.push_str(extra);
            }
            None => segments.push(Segment::plain(extra)),
        }
        self.set_segments(segments);
    }

    /// Prepend orphan text onto the chunk's first segment. Mirrors
    /// [`append_text`](Self::append_text).
    pub(crate) fn prepend_text(&mut self, extra: &str) {
        let mut segments = std::mem::take(&mut self.segments);
        match segments.first_mut() {
            Some(first) => {
                let joiner =
                    if first.text.is_empty() || first.text.starts_with(char::is_whitespace) {
                        ""
                    } else {
                        " "
                    };
                first.text = format!("{extra}{joiner}{}", first.text);
            }
            None => segments.push(Segment::plain(extra)),
        }
        self.set_segments(segments);
    }
}

#[derive(Deserialize)]
struct ChunkRepr {
    tag: u32,
    segments: Vec<Segment>,
}

impl From<ChunkRepr> for Chunk {
    fn from(repr: ChunkRepr) -> Self {
        Chunk::from_segments(repr.tag, repr.segments)
    }
}

/// Flatten segments into the chunk's human-readable text: every word joined
/// by a single space, with runs of whitespace collapsed.
pub fn derive_text(segments: &[Segment]) -> String {
    segments_to_words(segments)
        .into_iter()
        .map(|w| w.word)
        .collect::<Vec<_>>()
        .join(" ")
}
