//! Structural edits: insertion, range replacement and whitespace upkeep.

use std::collections::BTreeMap;

use fix_lexer::TokenKind;

use super::{Direction, Slot, Tokens};
use crate::{Result, Token, TokensError, DEFAULT_WHITESPACE};

impl Tokens {
    /// Insert `items` before `index`, shifting the tail right.
    ///
    /// `index == len()` appends.
    pub fn insert_at(&mut self, index: usize, items: Vec<Token>) -> Result<()> {
        let mut slices = BTreeMap::new();
        slices.insert(index, items);
        self.insert_slices(slices)
    }

    /// Insert several slices in one pass.
    ///
    /// Keys are indices in the collection as it is before the call. The tail
    /// is moved once, from the farthest slice backwards. Nothing is written
    /// if any position is out of range or any token is empty.
    pub fn insert_slices(&mut self, slices: BTreeMap<usize, Vec<Token>>) -> Result<()> {
        let total: usize = slices.values().map(Vec::len).sum();
        if total == 0 {
            return Ok(());
        }
        let old_len = self.slots.len();
        if let Some((&farthest, _)) = slices.last_key_value() {
            if farthest > old_len {
                return Err(TokensError::IndexOutOfRange {
                    index: farthest,
                    len: old_len,
                });
            }
        }
        for (&at, slice) in &slices {
            if let Some(offset) = slice.iter().position(|token| token.content().is_empty()) {
                return Err(TokensError::EmptyToken {
                    index: at + offset,
                });
            }
        }

        self.changed = true;
        self.invalidate_block_edges();
        self.slots.resize(old_len + total, Slot::Empty);

        let mut remaining = total;
        let mut previous = old_len;
        for (at, slice) in slices.into_iter().rev() {
            for index in (at..previous).rev() {
                self.slots[index + remaining] = std::mem::take(&mut self.slots[index]);
            }
            previous = at;
            remaining -= slice.len();
            for (offset, token) in slice.into_iter().enumerate() {
                self.found.register(&token);
                self.slots[at + remaining + offset] = Slot::Live(token);
            }
        }
        Ok(())
    }

    /// Replace the inclusive range `start..=end` with `items`.
    ///
    /// Does nothing when `items` render to the same text as the range, even
    /// if token boundaries differ. Extra items are placed in empty slots
    /// opened right after `end`; unused slots of the range are cleared.
    pub fn override_range(&mut self, start: usize, end: usize, items: Vec<Token>) -> Result<()> {
        self.check_range(start, end)?;
        if let Some(offset) = items.iter().position(|token| token.content().is_empty()) {
            return Err(TokensError::EmptyToken {
                index: start + offset,
            });
        }
        let new_code: String = items.iter().map(Token::content).collect();
        if self.render_range(start, end) == new_code {
            return Ok(());
        }

        let range_len = end - start + 1;
        let count = items.len();
        if count > range_len {
            self.insert_placeholders(end + 1, count - range_len);
        }
        for (offset, token) in items.into_iter().enumerate() {
            self.write_slot(start + offset, Slot::Live(token));
        }
        if count < range_len {
            self.clear_slots(start + count, end);
        }
        Ok(())
    }

    /// Clear every slot in `start..=end`.
    pub fn clear_range(&mut self, start: usize, end: usize) -> Result<()> {
        self.check_range(start, end)?;
        self.clear_slots(start, end);
        Ok(())
    }

    /// Clear the token at `index` without leaving doubled whitespace.
    ///
    /// If the next live token is whitespace it is merged into the previous
    /// live token when that is whitespace too, or moved into the emptied
    /// position otherwise.
    pub fn clear_token_and_merge_surrounding_whitespace(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        let len = self.slots.len();
        self.write_slot(index, Slot::Empty);
        if index + 1 == len {
            return Ok(());
        }
        let Some(next) = self.get_non_empty_sibling(index, Direction::Forward) else {
            return Ok(());
        };
        let blank = Some(self.config.whitespace_chars.as_str());
        let next_content = match self.get(next) {
            Some(token) if token.is_whitespace(blank) => token.content().to_owned(),
            _ => return Ok(()),
        };
        let prev = self.get_non_empty_sibling(index, Direction::Backward);
        let prev_whitespace = prev
            .and_then(|p| self.get(p))
            .filter(|token| token.is_whitespace(blank))
            .map(|token| token.content().to_owned());
        match (prev, prev_whitespace) {
            (Some(p), Some(content)) => {
                self.write_slot(p, Slot::Live(Token::whitespace(content + &next_content)));
            }
            _ => {
                let target = prev.map_or(0, |p| p + 1);
                self.write_slot(target, Slot::Live(Token::whitespace(next_content)));
            }
        }
        self.write_slot(next, Slot::Empty);
        Ok(())
    }

    /// Make sure `whitespace` sits at `index` (when that slot is whitespace
    /// or empty) or right next to it at `index + offset`.
    ///
    /// With `offset == 1` and an open tag at the anchor, the leading line
    /// ending (or first character) of `whitespace` is folded into the tag,
    /// which always carries one whitespace character of its own.
    ///
    /// Returns `true` if a token was inserted, shifting later indices.
    pub fn ensure_whitespace_at_index(
        &mut self,
        index: usize,
        offset: usize,
        whitespace: &str,
    ) -> Result<bool> {
        self.check_index(index)?;
        let blank = Some(self.config.whitespace_chars.as_str());
        let at_whitespace = self.slots[index]
            .token()
            .map_or(true, |token| token.is_whitespace(blank));

        if at_whitespace {
            let rest = match index.checked_sub(1) {
                Some(anchor) => self.fold_into_open_tag(anchor, offset, whitespace),
                None => whitespace,
            };
            let slot = if rest.is_empty() {
                Slot::Empty
            } else {
                Slot::Live(Token::whitespace(rest))
            };
            self.write_slot(index, slot);
            return Ok(false);
        }

        let rest = self.fold_into_open_tag(index, offset, whitespace);
        if rest.is_empty() {
            return Ok(false);
        }
        self.insert_at(index + offset, vec![Token::whitespace(rest)])?;
        Ok(true)
    }

    /// Remove the whitespace token before `index`.
    pub fn remove_leading_whitespace(&mut self, index: usize, charset: Option<&str>) {
        self.remove_whitespace_safely(index, Direction::Backward, charset);
    }

    /// Remove the whitespace token after `index`.
    pub fn remove_trailing_whitespace(&mut self, index: usize, charset: Option<&str>) {
        self.remove_whitespace_safely(index, Direction::Forward, charset);
    }

    /// Only tokens made of the configured whitespace characters qualify;
    /// `charset` then limits which of them may be removed.
    ///
    /// A whitespace token right after a single-line comment keeps its
    /// leading line ending, otherwise the next line would join the comment.
    fn remove_whitespace_safely(&mut self, index: usize, direction: Direction, charset: Option<&str>) {
        let Some(target) = self.get_non_empty_sibling(index, direction) else {
            return;
        };
        let Some(token) = self.get(target) else {
            return;
        };
        if !token.is_whitespace(Some(self.config.whitespace_chars.as_str())) {
            return;
        }
        let content = token.content();
        let after_line_comment = target
            .checked_sub(1)
            .and_then(|prev| self.get(prev))
            .is_some_and(Token::is_single_line_comment);

        let (keep, checked) = match self.config.leading_line_ending(content) {
            Some(ending) if after_line_comment => {
                let rest = &content[ending.len()..];
                if rest.is_empty() {
                    return;
                }
                (ending, rest)
            }
            _ => ("", content),
        };
        if !Token::whitespace(checked).is_whitespace(Some(self.whitespace_charset(charset))) {
            return;
        }
        let slot = if keep.is_empty() {
            Slot::Empty
        } else {
            Slot::Live(Token::whitespace(keep))
        };
        self.write_slot(target, slot);
    }

    /// Returns the part of `whitespace` left after folding into an open tag
    /// at `anchor`.
    fn fold_into_open_tag<'w>(&mut self, anchor: usize, offset: usize, whitespace: &'w str) -> &'w str {
        if offset != 1 || whitespace.is_empty() {
            return whitespace;
        }
        let Some(tag) = self.get(anchor).filter(|t| t.is_given_kind(TokenKind::OpenTag)) else {
            return whitespace;
        };
        let head = self
            .config
            .leading_line_ending(whitespace)
            .map_or_else(|| whitespace.chars().next().map_or(0, char::len_utf8), str::len);
        let content = format!(
            "{}{}",
            tag.content().trim_end_matches(|c| DEFAULT_WHITESPACE.contains(c)),
            &whitespace[..head]
        );
        self.write_slot(anchor, Slot::Live(Token::new(TokenKind::OpenTag, content)));
        &whitespace[head..]
    }

    /// Open `count` empty slots before `at`.
    fn insert_placeholders(&mut self, at: usize, count: usize) {
        if count == 0 {
            return;
        }
        self.changed = true;
        self.invalidate_block_edges();
        let old_len = self.slots.len();
        self.slots.resize(old_len + count, Slot::Empty);
        self.slots[at..].rotate_right(count);
    }

    fn clear_slots(&mut self, start: usize, end: usize) {
        for index in start..=end {
            self.write_slot(index, Slot::Empty);
        }
    }

    /// Rendered text of `start..=end`. Callers check bounds.
    pub(super) fn render_range(&self, start: usize, end: usize) -> String {
        self.slots[start..=end].iter().map(Slot::content).collect()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
