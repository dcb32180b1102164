/// Errors from editing operations.
///
/// Boundary cases the editor defines as no-ops (splitting before the first
/// word of the first chunk, merging the last chunk) are not errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("chunk index {index} is out of range for {len} chunks")]
    ChunkOutOfRange { index: usize, len: usize },

    #[error("word index {index} is out of range for chunk {chunk} with {len} words")]
    WordOutOfRange {
        chunk: usize,
        index: usize,
        len: usize,
    },

    #[error("no edit session is open")]
    NoActiveDraft,

    #[error("an edit session is already open")]
    DraftAlreadyOpen,
}
