/// A byte cursor over tagged text.
///
/// All tag delimiters are ASCII, so any position the parser records at a
/// delimiter boundary is also a valid `char` boundary for slicing.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes().get(self.i..).is_some_and(|rest| rest.starts_with(pat))
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Consumes a run of ASCII digits and returns it (possibly empty).
    pub fn eat_digits(&mut self) -> &'a str {
        let start = self.i;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.i += 1;
        }
        &self.s[start..self.i]
    }

    /// Absolute position of the next occurrence of `pat` at or after the
    /// cursor. Does not move the cursor.
    pub fn find(&self, pat: &str) -> Option<usize> {
        self.s.get(self.i..)?.find(pat).map(|rel| self.i + rel)
    }
}
