//! Standalone lexer for PHP-like source text.
//!
//! The lexer turns source text into a flat list of [`RawUnit`] values: bare
//! single characters and kind-tagged pieces of text. It runs in two passes:
//!
//! 1. [`RawScanner`] splits the text into units, one focused method per
//!    construct, driven by a byte [`Cursor`].
//! 2. [`cook()`] pairs bracket characters and retags the ones whose role
//!    depends on context (array literals, destructuring patterns, dynamic
//!    property access and so on) with custom kinds.
//!
//! The lexer never fails. Text it does not understand becomes bare
//! characters, and concatenating every unit reproduces the input exactly.

mod cooker;
mod cursor;
mod kind;
mod scanner;
mod unit;

pub use cooker::cook;
pub use cursor::Cursor;
pub use kind::TokenKind;
pub use scanner::RawScanner;
pub use unit::RawUnit;

/// Lex `source` into cooked units.
pub fn lex(source: &str) -> Vec<RawUnit> {
    let mut units: Vec<RawUnit> = RawScanner::new(source).collect();
    cook(&mut units);
    units
}
