//! Tag vocabulary of the wire format.
//!
//! Delimiters live here and nowhere else; the parser and serializer refer to
//! these constants and never spell a tag out themselves.

/// Numbered chunk boundary, `<cN>...</cN>`.
pub struct ChunkTag;

impl ChunkTag {
    /// Start of an opening tag, followed by the decimal tag number.
    pub const OPEN_PREFIX: &'static [u8; 2] = b"<c";
    /// Terminates both the opening and closing tag.
    pub const END: u8 = b'>';

    /// Opening tag for tag number text `digits`
    pub fn open(digits: &str) -> String {
        format!("<c{digits}>")
    }

    /// Closing tag for tag number text `digits`. Matching is on the digit
    /// text, so `<c01>` pairs only with `</c01>`.
    pub fn close(digits: &str) -> String {
        format!("</c{digits}>")
    }

    /// Pattern matching any opening or closing chunk tag.
    pub const RESIDUAL_PATTERN: &'static str = r"</?c\d+>";
}

/// Inline emphasis (verb) marking, `<v>...</v>`. Not numbered, not nested.
pub struct VerbTag;

impl VerbTag {
    pub const OPEN: &'static str = "<v>";
    pub const CLOSE: &'static str = "</v>";

    /// Pattern matching any stray emphasis tag.
    pub const RESIDUAL_PATTERN: &'static str = r"</?v>";
}

/// Join token between chunks in the display form.
pub const DISPLAY_SEPARATOR: &str = " / ";
