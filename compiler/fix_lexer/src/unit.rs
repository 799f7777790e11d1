//! Primitive lexical units handed to the token collection.

use crate::TokenKind;

/// One primitive lexical unit.
///
/// Either a bare single character (`;`, `(`, `=`) or a kind-tagged piece of
/// source text. Concatenating the text of every unit returned by
/// [`lex()`](crate::lex) reproduces the source exactly.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RawUnit {
    Char(char),
    Token(TokenKind, String),
}

impl RawUnit {
    /// Kind of a kind-tagged unit, `None` for bare characters.
    #[inline]
    pub fn kind(&self) -> Option<TokenKind> {
        match self {
            RawUnit::Char(_) => None,
            RawUnit::Token(kind, _) => Some(*kind),
        }
    }

    /// Returns `true` for the bare character `c`.
    #[inline]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self, RawUnit::Char(x) if *x == c)
    }

    /// Returns `true` for a kind-tagged unit of `kind`.
    #[inline]
    pub fn is_kind(&self, kind: TokenKind) -> bool {
        self.kind() == Some(kind)
    }

    /// Whitespace or comment.
    #[inline]
    pub fn is_trivia(&self) -> bool {
        self.kind().is_some_and(TokenKind::is_trivia)
    }

    /// Length of the unit's text in bytes.
    pub fn len(&self) -> usize {
        match self {
            RawUnit::Char(c) => c.len_utf8(),
            RawUnit::Token(_, text) => text.len(),
        }
    }

    /// Returns `true` if the unit carries no text (never produced by the scanner).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append the unit's text to `out`.
    pub fn push_to(&self, out: &mut String) {
        match self {
            RawUnit::Char(c) => out.push(*c),
            RawUnit::Token(_, text) => out.push_str(text),
        }
    }

    /// Consume the unit into its kind and owned text.
    pub fn into_parts(self) -> (Option<TokenKind>, String) {
        match self {
            RawUnit::Char(c) => (None, c.to_string()),
            RawUnit::Token(kind, text) => (Some(kind), text),
        }
    }
}
