//! Hand-written raw scanner producing [`RawUnit`] values.
//!
//! The scanner alternates between two modes: markup (text outside the
//! language tags, emitted as `T_INLINE_HTML`) and code. In code mode the main
//! dispatch looks at the current byte and calls a focused method that
//! advances the cursor and returns one unit. It does not decide the role of
//! bracket characters; that is deferred to the cooking pass.
//!
//! # Scope
//!
//! Quoted strings are emitted whole as `T_CONSTANT_ENCAPSED_STRING`, without
//! splitting interpolated parts. Heredoc and nowdoc bodies are not recognized.

use crate::cursor::Cursor;
use crate::{RawUnit, TokenKind};

/// Multi-character operators, longest first so the first match wins.
const OPERATORS: &[(&[u8], TokenKind)] = &[
    (b"===", TokenKind::IsIdentical),
    (b"!==", TokenKind::IsNotIdentical),
    (b"<=>", TokenKind::Spaceship),
    (b"**=", TokenKind::PowEqual),
    (b"...", TokenKind::Ellipsis),
    (b"<<=", TokenKind::SlEqual),
    (b">>=", TokenKind::SrEqual),
    (b"??=", TokenKind::CoalesceEqual),
    (b"?->", TokenKind::NullsafeObjectOperator),
    (b"->", TokenKind::ObjectOperator),
    (b"=>", TokenKind::DoubleArrow),
    (b"::", TokenKind::DoubleColon),
    (b"++", TokenKind::Inc),
    (b"--", TokenKind::Dec),
    (b"==", TokenKind::IsEqual),
    (b"!=", TokenKind::IsNotEqual),
    (b"<>", TokenKind::IsNotEqual),
    (b"<=", TokenKind::IsSmallerOrEqual),
    (b">=", TokenKind::IsGreaterOrEqual),
    (b"&&", TokenKind::BooleanAnd),
    (b"||", TokenKind::BooleanOr),
    (b"??", TokenKind::Coalesce),
    (b"+=", TokenKind::PlusEqual),
    (b"-=", TokenKind::MinusEqual),
    (b"*=", TokenKind::MulEqual),
    (b"/=", TokenKind::DivEqual),
    (b".=", TokenKind::ConcatEqual),
    (b"%=", TokenKind::ModEqual),
    (b"&=", TokenKind::AndEqual),
    (b"|=", TokenKind::OrEqual),
    (b"^=", TokenKind::XorEqual),
    (b"<<", TokenKind::Sl),
    (b">>", TokenKind::Sr),
    (b"**", TokenKind::Pow),
];

#[inline]
fn is_whitespace_byte(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit() || b == b'_'
}

fn is_binary_digit(b: u8) -> bool {
    matches!(b, b'0' | b'1' | b'_')
}

fn is_octal_digit(b: u8) -> bool {
    matches!(b, b'0'..=b'7' | b'_')
}

#[inline]
fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

#[inline]
fn is_ident_continue(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

/// Pure scanner over one source string.
///
/// Produces one unit at a time; returns `None` once the source is exhausted.
/// Malformed input never fails: unterminated strings and comments run to the
/// end of the source, and unknown bytes become bare characters.
pub struct RawScanner<'a> {
    cursor: Cursor<'a>,
    /// `false` while outside the language tags.
    in_code: bool,
    /// The previous significant unit was `->` or `?->`; the next word is a name.
    after_object_operator: bool,
}

impl<'a> RawScanner<'a> {
    /// Create a new scanner positioned before the first byte, in markup mode.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            in_code: false,
            after_object_operator: false,
        }
    }

    /// Produce the next raw unit.
    pub fn next_unit(&mut self) -> Option<RawUnit> {
        if self.cursor.is_eof() {
            return None;
        }
        if !self.in_code {
            return Some(self.markup());
        }
        let unit = self.code();
        if !unit.is_trivia() {
            self.after_object_operator = matches!(
                unit.kind(),
                Some(TokenKind::ObjectOperator | TokenKind::NullsafeObjectOperator)
            );
        }
        Some(unit)
    }

    fn kinded(&self, kind: TokenKind, start: usize) -> RawUnit {
        RawUnit::Token(kind, self.cursor.slice(start, self.cursor.pos()).to_owned())
    }

    // ─── Markup ────────────────────────────────────────────────────

    fn markup(&mut self) -> RawUnit {
        let start = self.cursor.pos();
        let mut probe = self.cursor;
        loop {
            let Some(offset) = probe.find(b"<?") else {
                self.cursor.advance_to_end();
                return self.kinded(TokenKind::InlineHtml, start);
            };
            probe.advance_n(offset);
            if let Some((kind, len)) = Self::open_tag(&probe) {
                if probe.pos() > start {
                    self.cursor = probe;
                    return self.kinded(TokenKind::InlineHtml, start);
                }
                self.cursor.advance_n(len);
                self.in_code = true;
                return self.kinded(kind, start);
            }
            probe.advance_n(2);
        }
    }

    /// Recognize an open tag at the cursor; returns its kind and byte length.
    fn open_tag(probe: &Cursor<'_>) -> Option<(TokenKind, usize)> {
        if probe.starts_with(b"<?=") {
            return Some((TokenKind::OpenTagWithEcho, 3));
        }
        if !probe.starts_with_ignore_case(b"<?php") {
            return None;
        }
        if probe.pos() + 5 == probe.source_len() {
            return Some((TokenKind::OpenTag, 5));
        }
        match probe.peek_at(5) {
            b'\r' if probe.peek_at(6) == b'\n' => Some((TokenKind::OpenTag, 7)),
            b' ' | b'\t' | b'\n' | b'\r' => Some((TokenKind::OpenTag, 6)),
            _ => None,
        }
    }

    // ─── Code ──────────────────────────────────────────────────────

    fn code(&mut self) -> RawUnit {
        let start = self.cursor.pos();
        match self.cursor.current() {
            b if is_whitespace_byte(b) => self.whitespace(start),
            b'#' => self.line_comment(start),
            b'/' if self.cursor.peek() == b'/' => self.line_comment(start),
            b'/' if self.cursor.peek() == b'*' => self.block_comment(start),
            b'?' if self.cursor.peek() == b'>' => self.close_tag(start),
            b'$' if is_ident_start(self.cursor.peek()) => self.variable(start),
            b if is_ident_start(b) => self.word(start),
            b'0'..=b'9' => self.number(start),
            b'.' if self.cursor.peek().is_ascii_digit() => self.number(start),
            quote @ (b'\'' | b'"') => self.quoted(start, quote),
            b'(' => self.cast_or_paren(start),
            b'\\' => {
                self.cursor.advance();
                self.kinded(TokenKind::NsSeparator, start)
            }
            _ => self.operator_or_char(start),
        }
    }

    fn whitespace(&mut self, start: usize) -> RawUnit {
        self.cursor.eat_while(is_whitespace_byte);
        self.kinded(TokenKind::Whitespace, start)
    }

    /// `// ...` or `# ...`; the line ending stays out of the comment.
    fn line_comment(&mut self, start: usize) -> RawUnit {
        self.cursor.eat_line_comment_body();
        self.kinded(TokenKind::Comment, start)
    }

    /// `/* ... */`, or a doc comment when it opens with `/**` plus whitespace.
    fn block_comment(&mut self, start: usize) -> RawUnit {
        let is_doc = self.cursor.peek2() == b'*' && is_whitespace_byte(self.cursor.peek_at(3));
        self.cursor.advance_n(2);
        match self.cursor.find(b"*/") {
            Some(offset) => self.cursor.advance_n(offset + 2),
            None => self.cursor.advance_to_end(),
        }
        let kind = if is_doc {
            TokenKind::DocComment
        } else {
            TokenKind::Comment
        };
        self.kinded(kind, start)
    }

    /// `?>` swallows one directly following line ending.
    fn close_tag(&mut self, start: usize) -> RawUnit {
        self.cursor.advance_n(2);
        if self.cursor.starts_with(b"\r\n") {
            self.cursor.advance_n(2);
        } else if self.cursor.current() == b'\n' {
            self.cursor.advance();
        }
        self.in_code = false;
        self.kinded(TokenKind::CloseTag, start)
    }

    fn variable(&mut self, start: usize) -> RawUnit {
        self.cursor.advance();
        self.cursor.eat_while(is_ident_continue);
        self.kinded(TokenKind::Variable, start)
    }

    fn word(&mut self, start: usize) -> RawUnit {
        self.cursor.eat_while(is_ident_continue);
        let word = self.cursor.slice(start, self.cursor.pos());
        let kind = if self.after_object_operator {
            TokenKind::String
        } else {
            TokenKind::keyword(word).unwrap_or(TokenKind::String)
        };
        RawUnit::Token(kind, word.to_owned())
    }

    fn number(&mut self, start: usize) -> RawUnit {
        let radix_digits: Option<fn(u8) -> bool> =
            match (self.cursor.current(), self.cursor.peek()) {
                (b'0', b'x' | b'X') => Some(is_hex_digit),
                (b'0', b'b' | b'B') => Some(is_binary_digit),
                (b'0', b'o' | b'O') => Some(is_octal_digit),
                _ => None,
            };
        if let Some(digits) = radix_digits {
            self.cursor.advance_n(2);
            self.cursor.eat_while(digits);
            return self.kinded(TokenKind::LNumber, start);
        }

        let decimal = |b: u8| b.is_ascii_digit() || b == b'_';
        self.cursor.eat_while(decimal);
        let mut is_float = false;
        if self.cursor.current() == b'.' && self.cursor.peek() != b'.' {
            is_float = true;
            self.cursor.advance();
            self.cursor.eat_while(decimal);
        }
        if matches!(self.cursor.current(), b'e' | b'E') {
            let signed = matches!(self.cursor.peek(), b'+' | b'-');
            let digit_at = if signed { 2 } else { 1 };
            if self.cursor.peek_at(digit_at).is_ascii_digit() {
                is_float = true;
                self.cursor.advance_n(digit_at);
                self.cursor.eat_while(decimal);
            }
        }
        let kind = if is_float {
            TokenKind::DNumber
        } else {
            TokenKind::LNumber
        };
        self.kinded(kind, start)
    }

    fn quoted(&mut self, start: usize, quote: u8) -> RawUnit {
        self.cursor.advance();
        while !self.cursor.is_eof() {
            match self.cursor.current() {
                b'\\' => self.cursor.advance_n(2),
                b if b == quote => {
                    self.cursor.advance();
                    break;
                }
                _ => self.cursor.advance(),
            }
        }
        self.kinded(TokenKind::ConstantEncapsedString, start)
    }

    /// `(int)`-style casts, allowing blanks inside the parentheses.
    fn cast_or_paren(&mut self, start: usize) -> RawUnit {
        let mut probe = self.cursor;
        probe.advance();
        probe.eat_while(|b| b == b' ' || b == b'\t');
        let name_start = probe.pos();
        probe.eat_while(|b| b.is_ascii_alphabetic());
        let name = probe.slice(name_start, probe.pos());
        probe.eat_while(|b| b == b' ' || b == b'\t');
        if probe.current() == b')' && !name.is_empty() {
            if let Some(kind) = TokenKind::cast(name) {
                probe.advance();
                self.cursor = probe;
                return self.kinded(kind, start);
            }
        }
        self.cursor.advance();
        RawUnit::Char('(')
    }

    fn operator_or_char(&mut self, start: usize) -> RawUnit {
        for &(text, kind) in OPERATORS {
            if self.cursor.starts_with(text) {
                self.cursor.advance_n(text.len());
                return self.kinded(kind, start);
            }
        }
        let c = char::from(self.cursor.current());
        self.cursor.advance();
        RawUnit::Char(c)
    }
}

impl Iterator for RawScanner<'_> {
    type Item = RawUnit;

    fn next(&mut self) -> Option<RawUnit> {
        self.next_unit()
    }
}

#[cfg(test)]
mod tests;
