use anyhow::{Context, Result};
use chunkwise_engine::{EditSession, ParsedSentence, parse_or_raw};
use std::path::Path;

/// Marks a comment line in a worksheet file
const COMMENT_PREFIX: char = '#';

/// One line of a worksheet: an editable chunked sentence, or text the codec
/// could not chunk and that is shown as-is.
#[derive(Debug, Clone)]
pub enum SentenceEntry {
    Chunked(EditSession),
    Raw(String),
}

impl SentenceEntry {
    pub fn from_line(line: &str) -> Self {
        match parse_or_raw(line) {
            ParsedSentence::Chunked(seq) => SentenceEntry::Chunked(EditSession::new(seq)),
            ParsedSentence::Raw(raw) => SentenceEntry::Raw(raw),
        }
    }

    /// Slash-joined form of what is currently shown (the draft while editing)
    pub fn display(&self) -> String {
        match self {
            SentenceEntry::Chunked(session) => session.current().display(),
            SentenceEntry::Raw(raw) => raw.clone(),
        }
    }

    /// Tagged wire form of the committed sentence; raw lines pass through
    pub fn tagged(&self) -> String {
        match self {
            SentenceEntry::Chunked(session) => session.committed().to_tagged(),
            SentenceEntry::Raw(raw) => raw.clone(),
        }
    }

    pub fn session(&self) -> Option<&EditSession> {
        match self {
            SentenceEntry::Chunked(session) => Some(session),
            SentenceEntry::Raw(_) => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut EditSession> {
        match self {
            SentenceEntry::Chunked(session) => Some(session),
            SentenceEntry::Raw(_) => None,
        }
    }
}

/// Parse worksheet text: one tagged sentence per line, skipping blank and
/// comment lines.
pub fn parse_worksheet(content: &str) -> Vec<SentenceEntry> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_PREFIX))
        .map(SentenceEntry::from_line)
        .collect()
}

pub fn read_worksheet(path: &Path) -> Result<Vec<SentenceEntry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read worksheet '{}'", path.display()))?;
    let entries = parse_worksheet(&content);
    log::info!(
        "loaded {} sentences from {}",
        entries.len(),
        path.display()
    );
    Ok(entries)
}
