//! Per-collection configuration.

use crate::DEFAULT_WHITESPACE;

/// Settings that affect whitespace handling in a [`Tokens`](crate::Tokens)
/// collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokensConfig {
    /// Recognized line endings. A single-line comment keeps the line ending
    /// that directly follows it when surrounding whitespace is removed.
    pub line_endings: Vec<String>,
    /// Characters that make up whitespace when no explicit charset is given.
    pub whitespace_chars: String,
}

impl Default for TokensConfig {
    fn default() -> Self {
        TokensConfig {
            line_endings: vec!["\r\n".to_owned(), "\n".to_owned(), "\r".to_owned()],
            whitespace_chars: DEFAULT_WHITESPACE.to_owned(),
        }
    }
}

impl TokensConfig {
    #[must_use]
    pub fn with_line_endings<I, S>(mut self, endings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.line_endings = endings.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_whitespace_chars(mut self, chars: impl Into<String>) -> Self {
        self.whitespace_chars = chars.into();
        self
    }

    /// Longest configured line ending that `text` starts with.
    pub fn leading_line_ending<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.line_endings
            .iter()
            .filter(|ending| !ending.is_empty() && text.starts_with(ending.as_str()))
            .map(String::len)
            .max()
            .map(|len| &text[..len])
    }

    /// Returns `true` if `text` contains any configured line ending.
    pub fn contains_line_ending(&self, text: &str) -> bool {
        self.line_endings
            .iter()
            .any(|ending| !ending.is_empty() && text.contains(ending.as_str()))
    }
}
