use log::debug;

use super::{Cmd, EditError, Patch, commands};
use crate::models::ChunkSequence;

/// Edit session for one sentence: the committed chunks plus an optional draft.
///
/// Structural edits (split, merge) only touch the draft, so they can be thrown
/// away with [`cancel`](Self::cancel) or handed over with
/// [`commit`](Self::commit). Emphasis toggles are also allowed outside a
/// session and then apply to the committed chunks directly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditSession {
    committed: ChunkSequence,
    draft: Option<ChunkSequence>,
    version: u64,
}

impl EditSession {
    pub fn new(committed: ChunkSequence) -> Self {
        Self {
            committed,
            draft: None,
            version: 0,
        }
    }

    pub fn from_tagged(tagged: &str) -> Self {
        Self::new(ChunkSequence::parse(tagged))
    }

    /// Open a draft as an independent copy of the committed chunks.
    pub fn begin_edit(&mut self) -> Result<(), EditError> {
        if self.draft.is_some() {
            return Err(EditError::DraftAlreadyOpen);
        }
        self.draft = Some(self.committed.clone());
        debug!("edit session opened at version {}", self.version);
        Ok(())
    }

    /// Replace the committed chunks with the draft and close the session.
    pub fn commit(&mut self) -> Result<&ChunkSequence, EditError> {
        let draft = self.draft.take().ok_or(EditError::NoActiveDraft)?;
        self.committed = draft;
        self.version += 1;
        debug!("edit session committed at version {}", self.version);
        Ok(&self.committed)
    }

    /// Drop the draft. Returns whether there was one.
    pub fn cancel(&mut self) -> bool {
        let had_draft = self.draft.take().is_some();
        if had_draft {
            self.version += 1;
            debug!("edit session cancelled at version {}", self.version);
        }
        had_draft
    }

    /// Apply a command to the draft. Emphasis toggles fall back to the
    /// committed chunks when no draft is open; structural edits require one.
    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, EditError> {
        let target = match &mut self.draft {
            Some(draft) => draft,
            None if cmd.is_structural() => return Err(EditError::NoActiveDraft),
            None => &mut self.committed,
        };
        let patch = commands::apply(target, cmd)?;
        if !patch.is_noop() {
            self.version += 1;
        }
        Ok(patch)
    }

    pub fn toggle_verb(&mut self, chunk: usize, word: usize) -> Result<Patch, EditError> {
        self.apply(Cmd::ToggleVerb { chunk, word })
    }

    /// Replace the sentence wholesale, e.g. after a fresh parse. Any open
    /// draft is discarded.
    pub fn replace(&mut self, committed: ChunkSequence) {
        self.committed = committed;
        self.draft = None;
        self.version += 1;
    }

    /// What a renderer should show: the draft if open, else the committed chunks
    pub fn current(&self) -> &ChunkSequence {
        self.draft.as_ref().unwrap_or(&self.committed)
    }

    pub fn committed(&self) -> &ChunkSequence {
        &self.committed
    }

    pub fn draft(&self) -> Option<&ChunkSequence> {
        self.draft.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Incremented by every change, commit and cancel
    pub fn version(&self) -> u64 {
        self.version
    }
}
