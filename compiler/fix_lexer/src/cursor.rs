//! Byte cursor over the source text.
//!
//! The cursor advances through the source byte-by-byte. Reads past the end
//! return `0x00`, so lookahead never needs explicit bounds checks at the call
//! site. Token boundaries are only ever placed on ASCII bytes, which keeps
//! every [`Cursor::slice`] on a UTF-8 character boundary.

use memchr::{memchr3, memmem};

/// Cursor over a source string.
///
/// The cursor is [`Copy`], enabling cheap state snapshots for backtracking.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at position 0.
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    /// Returns the byte at the current position, `0x00` at EOF.
    #[inline]
    pub fn current(&self) -> u8 {
        self.peek_at(0)
    }

    /// Returns the byte one position ahead of current.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.peek_at(1)
    }

    /// Returns the byte two positions ahead of current.
    #[inline]
    pub fn peek2(&self) -> u8 {
        self.peek_at(2)
    }

    /// Returns the byte `n` positions ahead of current, `0x00` past the end.
    #[inline]
    pub fn peek_at(&self, n: usize) -> u8 {
        self.source
            .as_bytes()
            .get(self.pos + n)
            .copied()
            .unwrap_or(0)
    }

    /// Advance the cursor by one byte.
    #[inline]
    pub fn advance(&mut self) {
        self.advance_n(1);
    }

    /// Advance the cursor by `n` bytes, saturating at the end of the source.
    #[inline]
    pub fn advance_n(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.source.len());
    }

    /// Move to the end of the source.
    #[inline]
    pub fn advance_to_end(&mut self) {
        self.pos = self.source.len();
    }

    /// Returns `true` if the cursor has consumed the whole source.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Length of the source in bytes.
    #[inline]
    pub fn source_len(&self) -> usize {
        self.source.len()
    }

    /// Extract `start..end` of the source.
    ///
    /// # Contract
    ///
    /// Both offsets must come from scanner token boundaries, which always sit
    /// next to ASCII bytes.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        debug_assert!(
            end <= self.source.len(),
            "slice end {end} exceeds source length {}",
            self.source.len()
        );
        &self.source[start..end]
    }

    /// Unconsumed remainder of the source.
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.source.as_bytes()[self.pos..]
    }

    /// Returns `true` if the unconsumed input starts with `prefix`.
    #[inline]
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.rest().starts_with(prefix)
    }

    /// ASCII case-insensitive variant of [`starts_with`](Self::starts_with).
    pub fn starts_with_ignore_case(&self, prefix: &[u8]) -> bool {
        let rest = self.rest();
        rest.len() >= prefix.len() && rest[..prefix.len()].eq_ignore_ascii_case(prefix)
    }

    /// Advance while `pred` holds for the current byte. Returns the count consumed.
    pub fn eat_while(&mut self, mut pred: impl FnMut(u8) -> bool) -> usize {
        let start = self.pos;
        while !self.is_eof() && pred(self.current()) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Byte offset (relative to the cursor) of the next occurrence of `needle`.
    pub fn find(&self, needle: &[u8]) -> Option<usize> {
        memmem::find(self.rest(), needle)
    }

    /// Advance to the end of a single-line comment body.
    ///
    /// Stops before `\n`, `\r`, or a `?>` close tag, whichever comes first.
    pub fn eat_line_comment_body(&mut self) {
        loop {
            match memchr3(b'\n', b'\r', b'?', self.rest()) {
                None => {
                    self.advance_to_end();
                    return;
                }
                Some(offset) => {
                    self.pos += offset;
                    if self.current() != b'?' || self.peek() == b'>' {
                        return;
                    }
                    self.pos += 1;
                }
            }
        }
    }
}
