pub mod chunk;
pub mod sequence;

pub use chunk::{Chunk, Segment, Word, derive_text};
pub use sequence::ChunkSequence;
