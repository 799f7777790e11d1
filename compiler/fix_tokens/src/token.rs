//! Tokens, search prototypes and the kind keys used by the found-kind index.

use std::fmt;

use fix_lexer::{RawUnit, TokenKind};
use rustc_hash::FxHashMap;

/// Characters treated as whitespace when no charset is given.
pub const DEFAULT_WHITESPACE: &str = " \t\n\r\0\x0B";

/// Names that are native constants regardless of case.
const NATIVE_CONSTANTS: [&str; 3] = ["true", "false", "null"];

/// One lexical unit: a kind-tagged piece of text or a bare character.
///
/// Tokens are values. Editing a collection replaces tokens wholesale, it
/// never mutates one in place.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    kind: Option<TokenKind>,
    content: String,
}

impl Token {
    /// Kind-tagged token.
    ///
    /// Empty content is accepted so the token can serve as a prototype, but
    /// a collection refuses to store it.
    pub fn new(kind: TokenKind, content: impl Into<String>) -> Self {
        Token {
            kind: Some(kind),
            content: content.into(),
        }
    }

    /// Bare single-character token such as `;` or `(`.
    pub fn bare(c: char) -> Self {
        Token {
            kind: None,
            content: c.to_string(),
        }
    }

    pub fn whitespace(content: impl Into<String>) -> Self {
        Token::new(TokenKind::Whitespace, content)
    }

    #[inline]
    pub fn kind(&self) -> Option<TokenKind> {
        self.kind
    }

    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }

    /// Tokenizer name of the kind, `None` for bare tokens.
    pub fn name(&self) -> Option<&'static str> {
        self.kind.map(TokenKind::name)
    }

    /// Key under which the found-kind index counts this token.
    pub fn kind_key(&self) -> KindKey {
        match self.kind {
            Some(kind) => KindKey::Kind(kind),
            None => KindKey::Char(self.content.chars().next().unwrap_or_default()),
        }
    }

    /// Prototype matching exactly this token.
    pub fn prototype(&self) -> Prototype {
        Prototype::from(self)
    }

    /// Kind-tagged (as opposed to a bare character).
    #[inline]
    pub fn is_array(&self) -> bool {
        self.kind.is_some()
    }

    #[inline]
    pub fn is_given_kind(&self, kind: TokenKind) -> bool {
        self.kind == Some(kind)
    }

    pub fn is_kind_among(&self, kinds: &[TokenKind]) -> bool {
        self.kind.is_some_and(|kind| kinds.contains(&kind))
    }

    /// Returns `true` if the content consists only of characters from
    /// `charset` (default [`DEFAULT_WHITESPACE`]).
    ///
    /// A kind-tagged token that is not `T_WHITESPACE` is never whitespace.
    /// Empty content counts as whitespace.
    pub fn is_whitespace(&self, charset: Option<&str>) -> bool {
        if self.kind.is_some_and(|kind| kind != TokenKind::Whitespace) {
            return false;
        }
        let charset = charset.unwrap_or(DEFAULT_WHITESPACE);
        self.content.chars().all(|c| charset.contains(c))
    }

    pub fn is_comment(&self) -> bool {
        self.is_kind_among(&[TokenKind::Comment, TokenKind::DocComment])
    }

    /// `//` or `#` comment. These end before the line ending.
    pub fn is_single_line_comment(&self) -> bool {
        self.is_comment() && !self.content.starts_with("/*")
    }

    /// Neither whitespace nor a comment nor empty.
    pub fn is_meaningful(&self) -> bool {
        !self.content.is_empty() && !self.is_whitespace(None) && !self.is_comment()
    }

    pub fn is_keyword(&self) -> bool {
        self.kind.is_some_and(TokenKind::is_keyword)
    }

    pub fn is_cast(&self) -> bool {
        self.kind.is_some_and(TokenKind::is_cast)
    }

    pub fn is_classy(&self) -> bool {
        self.kind.is_some_and(TokenKind::is_classy)
    }

    pub fn is_magic_constant(&self) -> bool {
        self.kind.is_some_and(TokenKind::is_magic_constant)
    }

    /// `true`, `false` or `null` in any case.
    pub fn is_native_constant(&self) -> bool {
        self.is_given_kind(TokenKind::String)
            && NATIVE_CONSTANTS
                .iter()
                .any(|name| self.content.eq_ignore_ascii_case(name))
    }

    /// `->` or `?->`.
    pub fn is_object_operator(&self) -> bool {
        self.is_kind_among(&[TokenKind::ObjectOperator, TokenKind::NullsafeObjectOperator])
    }

    /// Compare against a prototype.
    ///
    /// Case-insensitive comparison folds ASCII letters only.
    pub fn equals(&self, prototype: &Prototype, case_sensitive: bool) -> bool {
        let same_text = |text: &str| {
            if case_sensitive {
                self.content == text
            } else {
                self.content.eq_ignore_ascii_case(text)
            }
        };
        match prototype {
            Prototype::Char(c) => {
                self.kind.is_none() && {
                    let mut buf = [0u8; 4];
                    same_text(c.encode_utf8(&mut buf))
                }
            }
            Prototype::Kind(kind) => self.kind == Some(*kind),
            Prototype::KindText(kind, text) => self.kind == Some(*kind) && same_text(text),
        }
    }

    pub fn equals_any(&self, prototypes: &[Prototype], case_sensitive: bool) -> bool {
        prototypes
            .iter()
            .any(|prototype| self.equals(prototype, case_sensitive))
    }
}

impl From<RawUnit> for Token {
    fn from(unit: RawUnit) -> Self {
        match unit {
            RawUnit::Char(c) => Token::bare(c),
            RawUnit::Token(kind, text) => Token::new(kind, text),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

/// Shape a token is compared against during searches.
///
/// A bare character, a kind with any content, or a kind with exact content.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Prototype {
    Char(char),
    Kind(TokenKind),
    KindText(TokenKind, String),
}

impl Prototype {
    pub fn char(c: char) -> Self {
        Prototype::Char(c)
    }

    pub fn kind(kind: TokenKind) -> Self {
        Prototype::Kind(kind)
    }

    pub fn kind_text(kind: TokenKind, text: impl Into<String>) -> Self {
        Prototype::KindText(kind, text.into())
    }

    pub fn kind_key(&self) -> KindKey {
        match self {
            Prototype::Char(c) => KindKey::Char(*c),
            Prototype::Kind(kind) | Prototype::KindText(kind, _) => KindKey::Kind(*kind),
        }
    }

    /// Whether the prototype may appear in a sequence search.
    ///
    /// Whitespace characters, whitespace and comment kinds, and kind-text
    /// pairs with empty text are rejected.
    pub fn is_meaningful(&self) -> bool {
        match self {
            Prototype::Char(c) => !DEFAULT_WHITESPACE.contains(*c),
            Prototype::Kind(kind) => !kind.is_trivia(),
            Prototype::KindText(kind, text) => !kind.is_trivia() && !text.is_empty(),
        }
    }
}

impl From<&Token> for Prototype {
    fn from(token: &Token) -> Self {
        match token.kind {
            Some(kind) => Prototype::KindText(kind, token.content.clone()),
            None => Prototype::Char(token.content.chars().next().unwrap_or_default()),
        }
    }
}

impl From<char> for Prototype {
    fn from(c: char) -> Self {
        Prototype::Char(c)
    }
}

impl From<TokenKind> for Prototype {
    fn from(kind: TokenKind) -> Self {
        Prototype::Kind(kind)
    }
}

/// Key of the found-kind index: the kind, or the character of a bare token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KindKey {
    Kind(TokenKind),
    Char(char),
}

impl From<TokenKind> for KindKey {
    fn from(kind: TokenKind) -> Self {
        KindKey::Kind(kind)
    }
}

impl From<char> for KindKey {
    fn from(c: char) -> Self {
        KindKey::Char(c)
    }
}

impl fmt::Display for KindKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KindKey::Kind(kind) => f.write_str(kind.name()),
            KindKey::Char(c) => write!(f, "'{c}'"),
        }
    }
}

/// Case sensitivity of a sequence search.
///
/// Either one setting for every element, or overrides keyed by element
/// position. Positions without an override are case-sensitive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaseSensitivity {
    All(bool),
    PerElement(FxHashMap<usize, bool>),
}

impl CaseSensitivity {
    pub fn is_key_case_sensitive(&self, key: usize) -> bool {
        match self {
            CaseSensitivity::All(sensitive) => *sensitive,
            CaseSensitivity::PerElement(map) => map.get(&key).copied().unwrap_or(true),
        }
    }
}

impl Default for CaseSensitivity {
    fn default() -> Self {
        CaseSensitivity::All(true)
    }
}

impl From<bool> for CaseSensitivity {
    fn from(sensitive: bool) -> Self {
        CaseSensitivity::All(sensitive)
    }
}

#[cfg(test)]
mod tests;
