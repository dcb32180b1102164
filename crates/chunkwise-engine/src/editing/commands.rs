use log::{debug, warn};

use super::{EditError, Patch};
use crate::codec::{segments_to_words, words_to_segments};
use crate::models::{Chunk, ChunkSequence, Segment, Word};

/// Edit commands over a chunk sequence.
///
/// Indices are positions in the sequence (and in a chunk's derived word list)
/// at the time the command is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmd {
    /// Split the chunk before `word`. `word == 0` merges with the previous chunk.
    Split { chunk: usize, word: usize },
    /// Merge the chunk with its successor.
    Merge { chunk: usize },
    /// Flip the emphasis flag of one word.
    ToggleVerb { chunk: usize, word: usize },
}

impl Cmd {
    /// Whether the command can change the number of chunks
    pub fn is_structural(&self) -> bool {
        !matches!(self, Cmd::ToggleVerb { .. })
    }
}

/// Apply a command. On error the sequence is left untouched.
pub fn apply(seq: &mut ChunkSequence, cmd: Cmd) -> Result<Patch, EditError> {
    let result = match cmd {
        Cmd::Split { chunk, word } => split(seq, chunk, word),
        Cmd::Merge { chunk } => merge(seq, chunk),
        Cmd::ToggleVerb { chunk, word } => toggle_verb(seq, chunk, word),
    };
    match &result {
        Ok(patch) => debug!("applied {cmd:?}: {patch:?}"),
        Err(err) => warn!("rejected {cmd:?}: {err}"),
    }
    result
}

/// Split the chunk at `chunk_index` so that `word_index` starts a new chunk.
///
/// `word_index == 0` is a merge with the previous chunk instead, and a no-op
/// on the first chunk. All tags are renumbered afterwards.
pub fn split(
    seq: &mut ChunkSequence,
    chunk_index: usize,
    word_index: usize,
) -> Result<Patch, EditError> {
    check_chunk(seq, chunk_index)?;

    if word_index == 0 {
        return match chunk_index.checked_sub(1) {
            Some(previous) => merge(seq, previous),
            None => Ok(Patch::unchanged()),
        };
    }

    let words = seq.chunks()[chunk_index].words();
    check_word(chunk_index, word_index, words.len())?;

    let (before, after) = words.split_at(word_index);
    let replacement = [Chunk::from_words(0, before), Chunk::from_words(0, after)];
    seq.chunks_mut().splice(chunk_index..=chunk_index, replacement);
    seq.renumber();

    Ok(Patch {
        changed: chunk_index..chunk_index + 2,
        len_delta: 1,
    })
}

/// Merge the chunk at `index` with the one after it.
///
/// The merged segments are normalised through the word helpers so that
/// same-emphasis runs meeting at the splice point join into one segment.
/// Merging the last chunk is a no-op. All tags are renumbered afterwards.
pub fn merge(seq: &mut ChunkSequence, index: usize) -> Result<Patch, EditError> {
    check_chunk(seq, index)?;
    if index + 1 == seq.len() {
        return Ok(Patch::unchanged());
    }

    let chunks = seq.chunks();
    let spliced: Vec<Segment> = chunks[index]
        .segments()
        .iter()
        .cloned()
        .chain(std::iter::once(Segment::plain(" ")))
        .chain(chunks[index + 1].segments().iter().cloned())
        .collect();
    let merged = Chunk::from_segments(0, words_to_segments(&segments_to_words(&spliced)));

    seq.chunks_mut().splice(index..index + 2, [merged]);
    seq.renumber();

    Ok(Patch {
        changed: index..index + 1,
        len_delta: -1,
    })
}

/// Flip the emphasis flag of one word. Text and chunk count are unchanged.
pub fn toggle_verb(
    seq: &mut ChunkSequence,
    chunk_index: usize,
    word_index: usize,
) -> Result<Patch, EditError> {
    check_chunk(seq, chunk_index)?;
    let mut words: Vec<Word> = seq.chunks()[chunk_index].words();
    check_word(chunk_index, word_index, words.len())?;

    words[word_index].is_verb = !words[word_index].is_verb;
    seq.chunks_mut()[chunk_index].set_segments(words_to_segments(&words));

    Ok(Patch {
        changed: chunk_index..chunk_index + 1,
        len_delta: 0,
    })
}

fn check_chunk(seq: &ChunkSequence, index: usize) -> Result<(), EditError> {
    if index < seq.len() {
        Ok(())
    } else {
        Err(EditError::ChunkOutOfRange {
            index,
            len: seq.len(),
        })
    }
}

fn check_word(chunk: usize, index: usize, len: usize) -> Result<(), EditError> {
    if index < len {
        Ok(())
    } else {
        Err(EditError::WordOutOfRange { chunk, index, len })
    }
}
