pub mod codec;
pub mod editing;
pub mod models;

// Re-export key types for easier usage
pub use codec::{ParsedSentence, display, parse_or_raw, parse_tagged, to_tagged};
pub use editing::{ClickResolver, Cmd, EditError, EditSession, Patch, Resolution, WordTarget};
pub use models::{Chunk, ChunkSequence, Segment, Word, derive_text};
