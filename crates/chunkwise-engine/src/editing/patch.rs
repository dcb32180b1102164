use std::ops::Range;

/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Chunk indices holding changed chunks after the edit
    pub changed: Range<usize>,
    /// Change in chunk count
    pub len_delta: isize,
}

impl Patch {
    /// A command that left the sequence untouched
    pub fn unchanged() -> Self {
        Self {
            changed: 0..0,
            len_delta: 0,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.changed.is_empty() && self.len_delta == 0
    }
}
