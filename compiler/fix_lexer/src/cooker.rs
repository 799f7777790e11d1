//! Cooking pass: assigns custom kinds to bracket characters.
//!
//! The raw scanner emits `(`, `[` and `{` as bare characters. Several block
//! types share those characters, so after scanning this pass pairs every
//! bracket and looks at the surrounding significant units to decide which
//! block each pair opens:
//!
//! | source              | pair becomes                      |
//! |---------------------|-----------------------------------|
//! | `$a->{'b'}`         | dynamic property brace            |
//! | `${'a'}`            | dynamic variable brace            |
//! | `use A\{B, C}`      | group import brace                |
//! | `$a{0}`             | array index curly brace           |
//! | `(new Foo)->bar()`  | class instantiation parenthesis   |
//! | `$a = [1, 2]`       | array square brace                |
//! | `[$a, $b] = $c`     | destructuring square brace        |
//!
//! Pairs that match none of the patterns stay bare characters. Unbalanced
//! brackets are left untouched.

use crate::{RawUnit, TokenKind};

/// Units after which `(` is a call or construct parenthesis, never a
/// class-instantiation brace.
fn is_call_like(unit: &RawUnit) -> bool {
    match unit {
        RawUnit::Char(c) => matches!(c, ']' | ')' | '}'),
        RawUnit::Token(kind, _) => matches!(
            kind,
            TokenKind::Variable
                | TokenKind::String
                | TokenKind::Array
                | TokenKind::Isset
                | TokenKind::Unset
                | TokenKind::Empty
                | TokenKind::List
                | TokenKind::Exit
                | TokenKind::Eval
                | TokenKind::Declare
                | TokenKind::If
                | TokenKind::ElseIf
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Foreach
                | TokenKind::Switch
                | TokenKind::Match
                | TokenKind::Catch
                | TokenKind::Function
                | TokenKind::Fn
                | TokenKind::Use
                | TokenKind::Static
                | TokenKind::Class
                | TokenKind::ArraySquareBraceClose
                | TokenKind::DynamicPropBraceClose
                | TokenKind::DynamicVarBraceClose
                | TokenKind::ArrayIndexCurlyBraceClose
                | TokenKind::BraceClassInstantiationClose
        ),
    }
}

/// Units after which `[` indexes into a value instead of opening an array.
fn is_indexable(unit: &RawUnit) -> bool {
    match unit {
        RawUnit::Char(c) => matches!(c, ']' | ')' | '}'),
        RawUnit::Token(kind, _) => matches!(
            kind,
            TokenKind::Variable
                | TokenKind::String
                | TokenKind::ConstantEncapsedString
                | TokenKind::ArraySquareBraceClose
                | TokenKind::DynamicPropBraceClose
                | TokenKind::DynamicVarBraceClose
                | TokenKind::ArrayIndexCurlyBraceClose
                | TokenKind::BraceClassInstantiationClose
        ) || kind.is_magic_constant(),
    }
}

/// Index of the closest non-trivia unit before `index`.
fn prev_significant(units: &[RawUnit], index: usize) -> Option<usize> {
    (0..index).rev().find(|&i| !units[i].is_trivia())
}

/// Index of the closest non-trivia unit after `index`.
fn next_significant(units: &[RawUnit], index: usize) -> Option<usize> {
    (index + 1..units.len()).find(|&i| !units[i].is_trivia())
}

/// Pair every balanced bare bracket. `partner[i]` is the matching index.
fn match_brackets(units: &[RawUnit]) -> Vec<Option<usize>> {
    let mut partner = vec![None; units.len()];
    let mut stack: Vec<(char, usize)> = Vec::new();
    for (index, unit) in units.iter().enumerate() {
        let RawUnit::Char(c) = *unit else {
            continue;
        };
        let opener = match c {
            '(' | '[' | '{' => {
                stack.push((c, index));
                continue;
            }
            ')' => '(',
            ']' => '[',
            '}' => '{',
            _ => continue,
        };
        if let Some(&(top, open)) = stack.last() {
            if top == opener {
                stack.pop();
                partner[open] = Some(index);
                partner[index] = Some(open);
            }
        }
    }
    partner
}

fn retag(units: &mut [RawUnit], open: usize, close: usize, kinds: (TokenKind, TokenKind)) {
    let (open_kind, close_kind) = kinds;
    let open_text = units[open].clone().into_parts().1;
    let close_text = units[close].clone().into_parts().1;
    units[open] = RawUnit::Token(open_kind, open_text);
    units[close] = RawUnit::Token(close_kind, close_text);
}

fn cook_curly(units: &mut [RawUnit], open: usize, close: usize) {
    let prev = prev_significant(units, open).map(|i| &units[i]);
    let kinds = match prev {
        Some(RawUnit::Token(
            TokenKind::ObjectOperator | TokenKind::NullsafeObjectOperator,
            _,
        )) => (
            TokenKind::DynamicPropBraceOpen,
            TokenKind::DynamicPropBraceClose,
        ),
        Some(RawUnit::Char('$')) => (
            TokenKind::DynamicVarBraceOpen,
            TokenKind::DynamicVarBraceClose,
        ),
        Some(RawUnit::Token(TokenKind::NsSeparator, _)) => (
            TokenKind::GroupImportBraceOpen,
            TokenKind::GroupImportBraceClose,
        ),
        _ if open > 0 && units[open - 1].is_kind(TokenKind::Variable) => (
            TokenKind::ArrayIndexCurlyBraceOpen,
            TokenKind::ArrayIndexCurlyBraceClose,
        ),
        _ => return,
    };
    retag(units, open, close, kinds);
}

fn cook_paren(units: &mut [RawUnit], open: usize, close: usize) {
    let starts_new =
        next_significant(units, open).is_some_and(|i| units[i].is_kind(TokenKind::New));
    if !starts_new {
        return;
    }
    if prev_significant(units, open).is_some_and(|i| is_call_like(&units[i])) {
        return;
    }
    retag(
        units,
        open,
        close,
        (
            TokenKind::BraceClassInstantiationOpen,
            TokenKind::BraceClassInstantiationClose,
        ),
    );
}

fn cook_square(units: &mut [RawUnit], open: usize, close: usize) {
    let prev = prev_significant(units, open);
    if prev.is_some_and(|i| is_indexable(&units[i])) {
        return;
    }
    let assigned_to = next_significant(units, close).is_some_and(|i| units[i].is_char('='));
    let after_as = prev.is_some_and(|i| units[i].is_kind(TokenKind::As));
    let kinds = if assigned_to || after_as {
        (
            TokenKind::DestructuringSquareBraceOpen,
            TokenKind::DestructuringSquareBraceClose,
        )
    } else {
        (
            TokenKind::ArraySquareBraceOpen,
            TokenKind::ArraySquareBraceClose,
        )
    };
    retag(units, open, close, kinds);
}

/// Array literals nested in a destructuring pattern are patterns too.
fn cook_nested_destructuring(units: &mut [RawUnit]) {
    let mut depth = 0usize;
    for unit in units.iter_mut() {
        let RawUnit::Token(kind, _) = unit else {
            continue;
        };
        match *kind {
            TokenKind::DestructuringSquareBraceOpen => depth += 1,
            TokenKind::DestructuringSquareBraceClose => depth = depth.saturating_sub(1),
            TokenKind::ArraySquareBraceOpen if depth > 0 => {
                *kind = TokenKind::DestructuringSquareBraceOpen;
                depth += 1;
            }
            TokenKind::ArraySquareBraceClose if depth > 0 => {
                *kind = TokenKind::DestructuringSquareBraceClose;
                depth -= 1;
            }
            _ => {}
        }
    }
}

/// Assign custom block-edge kinds in place.
pub fn cook(units: &mut [RawUnit]) {
    let partner = match_brackets(units);
    for open in 0..units.len() {
        let Some(close) = partner[open] else {
            continue;
        };
        if close < open {
            continue;
        }
        match units[open] {
            RawUnit::Char('{') => cook_curly(units, open, close),
            RawUnit::Char('(') => cook_paren(units, open, close),
            RawUnit::Char('[') => cook_square(units, open, close),
            _ => {}
        }
    }
    cook_nested_destructuring(units);
}
