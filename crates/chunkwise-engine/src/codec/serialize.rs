use super::tags::{ChunkTag, DISPLAY_SEPARATOR, VerbTag};
use crate::models::{Chunk, ChunkSequence};

/// Serializes chunks to the tagged wire format.
///
/// Segments are concatenated as-is (they carry their own spacing), verb
/// segments are wrapped in `<v>...</v>`, each chunk is wrapped in its current
/// `<cN>...</cN>`, and chunks are joined with a single space.
pub fn to_tagged(seq: &ChunkSequence) -> String {
    seq.iter().map(chunk_to_tagged).collect::<Vec<_>>().join(" ")
}

fn chunk_to_tagged(chunk: &Chunk) -> String {
    let digits = chunk.tag().to_string();
    let mut out = ChunkTag::open(&digits);
    for segment in chunk.segments() {
        if segment.is_verb {
            out.push_str(VerbTag::OPEN);
            out.push_str(&segment.text);
            out.push_str(VerbTag::CLOSE);
        } else {
            out.push_str(&segment.text);
        }
    }
    out.push_str(&ChunkTag::close(&digits));
    out
}

/// Plain display form: each chunk's text joined with `" / "`. Emphasis is lost.
pub fn display(seq: &ChunkSequence) -> String {
    seq.iter()
        .map(Chunk::text)
        .collect::<Vec<_>>()
        .join(DISPLAY_SEPARATOR)
}
