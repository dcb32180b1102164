use serde::{Deserialize, Serialize};

use super::chunk::{Chunk, Word};
use crate::codec;

/// The ordered chunks of one sentence.
///
/// A sequence is owned by whoever holds the sentence's edit session and is
/// replaced wholesale on the next parse or commit. Cloning deep-copies every
/// chunk and its segments, which is what gives a draft its independence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkSequence {
    chunks: Vec<Chunk>,
}

impl ChunkSequence {
    pub fn new(chunks: Vec<Chunk>) -> Self {
        Self { chunks }
    }

    /// Parse a tagged wire string. See [`codec::parse_tagged`].
    pub fn parse(tagged: &str) -> Self {
        codec::parse_tagged(tagged)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn get(&self, index: usize) -> Option<&Chunk> {
        self.chunks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chunk> {
        self.chunks.iter()
    }

    /// Derived word list of the chunk at `index`
    pub fn words_of(&self, index: usize) -> Option<Vec<Word>> {
        self.chunks.get(index).map(Chunk::words)
    }

    /// Total number of words across all chunks
    pub fn word_count(&self) -> usize {
        self.chunks.iter().map(Chunk::word_count).sum()
    }

    /// Map a sentence-wide word position to `(chunk, word)`.
    ///
    /// The sentence-wide position of a word is unchanged by split, merge and
    /// toggle, which makes it a stable cursor across edits.
    pub fn locate_word(&self, flat: usize) -> Option<(usize, usize)> {
        let mut remaining = flat;
        for (chunk_index, chunk) in self.chunks.iter().enumerate() {
            let count = chunk.word_count();
            if remaining < count {
                return Some((chunk_index, remaining));
            }
            remaining -= count;
        }
        None
    }

    /// Inverse of [`locate_word`](Self::locate_word)
    pub fn flat_word_index(&self, chunk: usize, word: usize) -> Option<usize> {
        let target = self.chunks.get(chunk)?;
        if word >= target.word_count() {
            return None;
        }
        let before: usize = self.chunks[..chunk].iter().map(Chunk::word_count).sum();
        Some(before + word)
    }

    /// Reassign tags `1..=N` in position order
    pub fn renumber(&mut self) {
        for (index, chunk) in self.chunks.iter_mut().enumerate() {
            chunk.set_tag(index as u32 + 1);
        }
    }

    pub fn has_contiguous_tags(&self) -> bool {
        self.chunks
            .iter()
            .enumerate()
            .all(|(index, chunk)| chunk.tag() == index as u32 + 1)
    }

    /// Serialize back to the tagged wire format
    pub fn to_tagged(&self) -> String {
        codec::to_tagged(self)
    }

    /// Slash-joined plain text for read-only rendering
    pub fn display(&self) -> String {
        codec::display(self)
    }

    /// The sentence without chunk boundaries
    pub fn plain_text(&self) -> String {
        self.chunks
            .iter()
            .map(Chunk::text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub(crate) fn chunks_mut(&mut self) -> &mut Vec<Chunk> {
        &mut self.chunks
    }
}

impl From<Vec<Chunk>> for ChunkSequence {
    fn from(chunks: Vec<Chunk>) -> Self {
        Self::new(chunks)
    }
}

impl<'a> IntoIterator for &'a ChunkSequence {
    type Item = &'a Chunk;
    type IntoIter = std::slice::Iter<'a, Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Segment;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn sample() -> ChunkSequence {
        ChunkSequence::new(vec![
            Chunk::from_segments(4, vec![Segment::plain("The quick fox")]),
            Chunk::from_segments(9, vec![Segment::plain("jumps")]),
            Chunk::from_segments(2, vec![Segment::plain("over the dog")]),
        ])
    }

    #[test]
    fn renumber_assigns_positions() {
        let mut seq = sample();
        assert!(!seq.has_contiguous_tags());

        seq.renumber();

        let tags: Vec<u32> = seq.iter().map(Chunk::tag).collect();
        assert_eq!(tags, vec![1, 2, 3]);
        assert!(seq.has_contiguous_tags());
    }

    #[rstest]
    #[case(0, Some((0, 0)))]
    #[case(2, Some((0, 2)))]
    #[case(3, Some((1, 0)))]
    #[case(4, Some((2, 0)))]
    #[case(6, Some((2, 2)))]
    #[case(7, None)]
    fn locate_word_walks_chunks(#[case] flat: usize, #[case] expected: Option<(usize, usize)>) {
        let seq = sample();
        assert_eq!(seq.locate_word(flat), expected);
        if let Some((chunk, word)) = expected {
            assert_eq!(seq.flat_word_index(chunk, word), Some(flat));
        }
    }

    #[test]
    fn flat_word_index_rejects_out_of_range() {
        let seq = sample();
        assert_eq!(seq.flat_word_index(1, 1), None);
        assert_eq!(seq.flat_word_index(3, 0), None);
    }

    #[test]
    fn plain_text_skips_empty_chunks() {
        let seq = ChunkSequence::new(vec![
            Chunk::from_segments(1, vec![Segment::plain("alpha")]),
            Chunk::from_segments(2, vec![]),
            Chunk::from_segments(3, vec![Segment::plain("beta")]),
        ]);
        assert_eq!(seq.plain_text(), "alpha beta");
        assert_eq!(seq.word_count(), 2);
    }

    #[test]
    fn clone_does_not_alias() {
        let committed = sample();
        let mut draft = committed.clone();
        draft.chunks_mut()[0].set_segments(vec![Segment::verb("changed")]);

        assert_eq!(committed.chunks()[0].text(), "The quick fox");
        assert_eq!(draft.chunks()[0].text(), "changed");
    }

    #[test]
    fn json_shape_carries_text_and_segments() {
        let seq = ChunkSequence::new(vec![Chunk::from_segments(
            1,
            vec![Segment::plain("The "), Segment::verb("quick")],
        )]);
        let json = serde_json::to_value(&seq).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "tag": 1,
                "text": "The quick",
                "segments": [
                    { "text": "The ", "is_verb": false },
                    { "text": "quick", "is_verb": true }
                ]
            }])
        );
    }

    #[test]
    fn deserialising_rederives_text() {
        let json = r#"[{"tag":1,"text":"stale","segments":[{"text":"fresh  words","is_verb":false}]}]"#;
        let seq: ChunkSequence = serde_json::from_str(json).unwrap();
        assert_eq!(seq.chunks()[0].text(), "fresh words");
    }
}
