use std::time::Instant;

use chunkwise_engine::{
    ClickResolver, Cmd, EditError, EditSession, Patch, Resolution, WordTarget,
};
use ratatui::widgets::ListState;

use crate::worksheet::SentenceEntry;

pub struct App {
    pub entries: Vec<SentenceEntry>,
    pub sentence_state: ListState,
    /// Sentence-wide word position. Split, merge and toggle never move a word
    /// to a different sentence-wide position, so this survives every edit.
    pub cursor: usize,
    pub resolver: ClickResolver,
    pub status: String,
}

impl App {
    pub fn new(entries: Vec<SentenceEntry>, resolver: ClickResolver) -> Self {
        let mut app = Self {
            entries,
            sentence_state: ListState::default(),
            cursor: 0,
            resolver,
            status: String::new(),
        };

        if !app.entries.is_empty() {
            app.sentence_state.select(Some(0));
        }

        app
    }

    pub fn selected_entry(&self) -> Option<&SentenceEntry> {
        self.entries.get(self.sentence_state.selected()?)
    }

    pub fn selected_session(&self) -> Option<&EditSession> {
        self.selected_entry()?.session()
    }

    fn selected_session_mut(&mut self) -> Option<&mut EditSession> {
        let index = self.sentence_state.selected()?;
        self.entries.get_mut(index)?.session_mut()
    }

    pub fn next_sentence(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.flush();
        let i = match self.sentence_state.selected() {
            Some(i) => (i + 1) % self.entries.len(),
            None => 0,
        };
        self.select_sentence(i);
    }

    pub fn previous_sentence(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.flush();
        let i = match self.sentence_state.selected() {
            Some(0) | None => self.entries.len() - 1,
            Some(i) => i - 1,
        };
        self.select_sentence(i);
    }

    fn select_sentence(&mut self, index: usize) {
        self.sentence_state.select(Some(index));
        self.cursor = 0;
        self.status.clear();
    }

    pub fn next_word(&mut self) {
        let count = self.word_count();
        if self.cursor + 1 < count {
            self.cursor += 1;
        }
    }

    pub fn previous_word(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn word_count(&self) -> usize {
        self.selected_session()
            .map_or(0, |session| session.current().word_count())
    }

    /// The word under the cursor, addressed in the sequence currently shown
    pub fn cursor_target(&self) -> Option<WordTarget> {
        let seq = self.selected_session()?.current();
        let (chunk, word) = seq.locate_word(self.cursor)?;
        Some(WordTarget::new(chunk, word))
    }

    pub fn begin_edit(&mut self) {
        self.flush();
        let Some(session) = self.selected_session_mut() else {
            return;
        };
        self.status = match session.begin_edit() {
            Ok(()) => "Editing".to_string(),
            Err(err) => err.to_string(),
        };
    }

    /// Activate the word under the cursor. A single activation splits before
    /// it once the window passes; a second one inside the window toggles its
    /// emphasis instead.
    pub fn activate(&mut self, now: Instant) {
        self.tick(now);
        let Some(target) = self.cursor_target() else {
            return;
        };
        match self.resolver.activate(target, now) {
            Some(settled @ Resolution::Split(_)) => {
                self.apply_resolution(settled);
                // the split may have moved the cursor word into a new chunk
                if let Some(target) = self.cursor_target() {
                    self.resolver.activate(target, now);
                }
            }
            Some(toggle) => self.apply_resolution(toggle),
            None => {}
        }
    }

    /// Sentence-wide position of the word waiting on a pending activation
    pub fn pending_word(&self) -> Option<usize> {
        let pending = self.resolver.pending()?;
        self.selected_session()?
            .current()
            .flat_word_index(pending.chunk, pending.word)
    }

    /// Settle a pending activation whose window has passed
    pub fn tick(&mut self, now: Instant) {
        if let Some(resolution) = self.resolver.poll(now) {
            self.apply_resolution(resolution);
        }
    }

    /// Settle a pending activation right away, before anything else edits
    pub fn flush(&mut self) {
        if let Some(resolution) = self.resolver.flush() {
            self.apply_resolution(resolution);
        }
    }

    pub fn merge_at_cursor(&mut self) {
        self.flush();
        if let Some(target) = self.cursor_target() {
            self.run(Cmd::Merge {
                chunk: target.chunk,
            });
        }
    }

    pub fn toggle_at_cursor(&mut self) {
        self.flush();
        if let Some(target) = self.cursor_target() {
            self.run(Resolution::ToggleVerb(target).into_cmd());
        }
    }

    pub fn commit(&mut self) {
        self.flush();
        let Some(session) = self.selected_session_mut() else {
            return;
        };
        self.status = match session.commit() {
            Ok(committed) => format!("Committed {} chunks", committed.len()),
            Err(err) => err.to_string(),
        };
    }

    pub fn cancel(&mut self) {
        self.resolver.cancel();
        let Some(session) = self.selected_session_mut() else {
            return;
        };
        if session.cancel() {
            self.status = "Edit cancelled".to_string();
        }
    }

    /// Tagged form of every sentence, in worksheet order
    pub fn tagged_lines(&self) -> Vec<String> {
        self.entries.iter().map(SentenceEntry::tagged).collect()
    }

    fn apply_resolution(&mut self, resolution: Resolution) {
        self.run(resolution.into_cmd());
    }

    fn run(&mut self, cmd: Cmd) {
        let Some(session) = self.selected_session_mut() else {
            return;
        };
        self.status = match session.apply(cmd) {
            Ok(patch) if patch.is_noop() => "Nothing to change".to_string(),
            Ok(patch) => describe_patch(&patch),
            Err(EditError::NoActiveDraft) => {
                "Press e to edit before splitting or merging".to_string()
            }
            Err(err) => err.to_string(),
        };
    }
}

/// One-line summary of an applied edit, with 1-based chunk numbers
fn describe_patch(patch: &Patch) -> String {
    let first = patch.changed.start + 1;
    match patch.len_delta {
        0 => format!("Emphasis changed in chunk {first}"),
        delta if delta > 0 => format!("Split into chunks {first} and {}", patch.changed.end),
        _ => format!("Merged into chunk {first}"),
    }
}
