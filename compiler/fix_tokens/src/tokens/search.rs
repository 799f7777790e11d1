//! Sibling navigation, kind lookup, block matching and sequence search.
//!
//! Searches that find nothing return `None`. Kind-based searches consult
//! the found-kind index first and skip the scan when no requested kind is
//! present in the collection.

use std::collections::BTreeMap;

use fix_lexer::TokenKind;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;

use super::{Direction, Slot, Tokens};
use crate::{BlockType, CaseSensitivity, Prototype, Result, Token, TokensError};

const NON_MEANINGFUL: [TokenKind; 3] = [
    TokenKind::Whitespace,
    TokenKind::Comment,
    TokenKind::DocComment,
];

impl Tokens {
    /// Indices after (or before) `index`, in walking order, within bounds.
    fn walk(&self, index: usize, direction: Direction) -> impl Iterator<Item = usize> {
        let len = self.slots.len();
        std::iter::successors(direction.step(index), move |&i| direction.step(i))
            .take_while(move |&i| i < len)
    }

    // === Whitespace ===

    /// Closest token that is not whitespace per `charset` (the configured
    /// whitespace characters by default). Empty slots are skipped like
    /// whitespace.
    pub fn get_non_whitespace_sibling(
        &self,
        index: usize,
        direction: Direction,
        charset: Option<&str>,
    ) -> Option<usize> {
        let charset = self.whitespace_charset(charset);
        self.walk(index, direction)
            .find(|&i| self.get(i).is_some_and(|token| !token.is_whitespace(Some(charset))))
    }

    pub fn get_next_non_whitespace(&self, index: usize, charset: Option<&str>) -> Option<usize> {
        self.get_non_whitespace_sibling(index, Direction::Forward, charset)
    }

    pub fn get_prev_non_whitespace(&self, index: usize, charset: Option<&str>) -> Option<usize> {
        self.get_non_whitespace_sibling(index, Direction::Backward, charset)
    }

    // === Of kind / not of kind ===

    /// Closest token equal to any of `prototypes`.
    pub fn get_token_of_kind_sibling(
        &self,
        index: usize,
        direction: Direction,
        prototypes: &[Prototype],
        case_sensitive: bool,
    ) -> Option<usize> {
        let candidates: SmallVec<[&Prototype; 4]> = prototypes
            .iter()
            .filter(|prototype| self.found.contains(prototype.kind_key()))
            .collect();
        if candidates.is_empty() {
            return None;
        }
        self.walk(index, direction).find(|&i| {
            self.get(i).is_some_and(|token| {
                candidates
                    .iter()
                    .any(|prototype| token.equals(prototype, case_sensitive))
            })
        })
    }

    pub fn get_next_token_of_kind(
        &self,
        index: usize,
        prototypes: &[Prototype],
        case_sensitive: bool,
    ) -> Option<usize> {
        self.get_token_of_kind_sibling(index, Direction::Forward, prototypes, case_sensitive)
    }

    pub fn get_prev_token_of_kind(
        &self,
        index: usize,
        prototypes: &[Prototype],
        case_sensitive: bool,
    ) -> Option<usize> {
        self.get_token_of_kind_sibling(index, Direction::Backward, prototypes, case_sensitive)
    }

    /// Closest live token equal to none of `prototypes`.
    pub fn get_token_not_of_kind_sibling(
        &self,
        index: usize,
        direction: Direction,
        prototypes: &[Prototype],
    ) -> Option<usize> {
        let excluded: SmallVec<[&Prototype; 4]> = prototypes
            .iter()
            .filter(|prototype| self.found.contains(prototype.kind_key()))
            .collect();
        self.walk(index, direction).find(|&i| {
            self.get(i).is_some_and(|token| {
                !excluded
                    .iter()
                    .any(|prototype| token.equals(prototype, true))
            })
        })
    }

    /// Closest live token whose kind is none of `kinds`.
    pub fn get_token_not_of_kinds_sibling(
        &self,
        index: usize,
        direction: Direction,
        kinds: &[TokenKind],
    ) -> Option<usize> {
        let excluded: SmallVec<[TokenKind; 4]> = kinds
            .iter()
            .copied()
            .filter(|kind| self.found.contains(*kind))
            .collect();
        self.walk(index, direction)
            .find(|&i| self.get(i).is_some_and(|token| !token.is_kind_among(&excluded)))
    }

    // === Meaningful / non-empty ===

    /// Closest token that is neither whitespace, a comment, nor empty.
    pub fn get_meaningful_token_sibling(&self, index: usize, direction: Direction) -> Option<usize> {
        self.get_token_not_of_kinds_sibling(index, direction, &NON_MEANINGFUL)
    }

    pub fn get_next_meaningful_token(&self, index: usize) -> Option<usize> {
        self.get_meaningful_token_sibling(index, Direction::Forward)
    }

    pub fn get_prev_meaningful_token(&self, index: usize) -> Option<usize> {
        self.get_meaningful_token_sibling(index, Direction::Backward)
    }

    pub fn get_non_empty_sibling(&self, index: usize, direction: Direction) -> Option<usize> {
        self.walk(index, direction)
            .find(|&i| !self.slots[i].is_empty())
    }

    // === Kind lookup ===

    /// Every live token of each requested kind in `start..end`.
    ///
    /// Each requested kind gets an entry, possibly empty. `end` is clamped to
    /// the collection length.
    pub fn find_given_kind(
        &self,
        kinds: &[TokenKind],
        start: usize,
        end: usize,
    ) -> FxHashMap<TokenKind, BTreeMap<usize, Token>> {
        let mut elements: FxHashMap<TokenKind, BTreeMap<usize, Token>> =
            kinds.iter().map(|&kind| (kind, BTreeMap::new())).collect();
        let present: SmallVec<[TokenKind; 4]> = kinds
            .iter()
            .copied()
            .filter(|kind| self.found.contains(*kind))
            .collect();
        if present.is_empty() {
            return elements;
        }
        let end = end.min(self.slots.len());
        for index in start..end {
            let Slot::Live(token) = &self.slots[index] else {
                continue;
            };
            if let Some(kind) = token.kind().filter(|kind| present.contains(kind)) {
                elements.entry(kind).or_default().insert(index, token.clone());
            }
        }
        elements
    }

    /// [`Tokens::find_given_kind`] for a single kind.
    pub fn find_given_kind_one(
        &self,
        kind: TokenKind,
        start: usize,
        end: usize,
    ) -> BTreeMap<usize, Token> {
        self.find_given_kind(&[kind], start, end)
            .remove(&kind)
            .unwrap_or_default()
    }

    // === Blocks ===

    /// Index of the edge closing the block opened at `index`.
    pub fn find_block_end(&self, block_type: BlockType, index: usize) -> Result<usize> {
        self.find_opposite_block_edge(block_type, index, true)
    }

    /// Index of the edge opening the block closed at `index`.
    pub fn find_block_start(&self, block_type: BlockType, index: usize) -> Result<usize> {
        self.find_opposite_block_edge(block_type, index, false)
    }

    /// Balanced partner of the block edge at `search_index`.
    ///
    /// Walks from `search_index` counting same-side edges up and opposite
    /// edges down; the partner is where the count returns to zero. Matched
    /// pairs are memoized in both directions until the next write.
    pub fn find_opposite_block_edge(
        &self,
        block_type: BlockType,
        search_index: usize,
        find_end: bool,
    ) -> Result<usize> {
        if let Some(partner) =
            self.block_edges
                .borrow()
                .get(self.generation, block_type, search_index, find_end)
        {
            trace!(%block_type, search_index, partner, "block edge cache hit");
            return Ok(partner);
        }

        let edges = block_type.edges();
        let (start_edge, end_edge, direction) = if find_end {
            (&edges.start, &edges.end, Direction::Forward)
        } else {
            (&edges.end, &edges.start, Direction::Backward)
        };
        let slot = self.at(search_index)?;
        if !slot.token().is_some_and(|token| token.equals(start_edge, true)) {
            return Err(TokensError::NotABlockEdge {
                block_type,
                index: search_index,
                expected: if find_end { "start" } else { "end" },
            });
        }

        let mut level = 0usize;
        let mut partner = None;
        for index in std::iter::once(search_index).chain(self.walk(search_index, direction)) {
            let Some(token) = self.get(index) else {
                continue;
            };
            if token.equals(start_edge, true) {
                level += 1;
            } else if token.equals(end_edge, true) {
                level -= 1;
                if level == 0 {
                    partner = Some(index);
                    break;
                }
            }
        }
        let Some(partner) = partner else {
            return Err(TokensError::UnbalancedBlock {
                block_type,
                index: search_index,
                missing: if find_end { "end" } else { "start" },
            });
        };

        let (start, end) = if find_end {
            (search_index, partner)
        } else {
            (partner, search_index)
        };
        self.block_edges
            .borrow_mut()
            .insert(self.generation, block_type, start, end);
        Ok(partner)
    }

    // === Sequences ===

    /// Find `sequence` as a run of meaningful tokens within `start..=end`.
    ///
    /// Whitespace and comments between elements are skipped. When a partial
    /// match fails the search restarts at the next occurrence of the first
    /// element. Returns the matched tokens by index, first element included.
    /// `end` is clamped to the last index.
    pub fn find_sequence(
        &self,
        sequence: &[Prototype],
        start: usize,
        end: usize,
        case_sensitivity: impl Into<CaseSensitivity>,
    ) -> Result<Option<BTreeMap<usize, Token>>> {
        let Some((first, rest)) = sequence.split_first() else {
            return Err(TokensError::EmptySequence);
        };
        if let Some(position) = sequence.iter().position(|p| !p.is_meaningful()) {
            return Err(TokensError::NonMeaningfulSequenceElement { position });
        }
        let Some(last) = self.slots.len().checked_sub(1) else {
            return Ok(None);
        };
        let end = end.min(last);
        if start + sequence.len() - 1 > end {
            return Ok(None);
        }
        if sequence
            .iter()
            .any(|prototype| !self.found.contains(prototype.kind_key()))
        {
            return Ok(None);
        }

        let case_sensitivity = case_sensitivity.into();
        let first_case = case_sensitivity.is_key_case_sensitive(0);
        let mut from = start;
        'anchors: while from <= end {
            let Some(anchor) = (from..=end).find(|&i| {
                self.get(i)
                    .is_some_and(|token| token.equals(first, first_case))
            }) else {
                return Ok(None);
            };
            let mut result = BTreeMap::new();
            if let Some(token) = self.get(anchor) {
                result.insert(anchor, token.clone());
            }
            let mut current = anchor;
            for (offset, prototype) in rest.iter().enumerate() {
                let next = match self.get_next_meaningful_token(current) {
                    Some(next) if next <= end => next,
                    _ => return Ok(None),
                };
                let Some(token) = self.get(next) else {
                    return Ok(None);
                };
                if !token.equals(prototype, case_sensitivity.is_key_case_sensitive(offset + 1)) {
                    from = anchor + 1;
                    continue 'anchors;
                }
                result.insert(next, token.clone());
                current = next;
            }
            return Ok(Some(result));
        }
        Ok(None)
    }
}
