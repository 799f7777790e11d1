//! The token collection: indexed storage and dirty tracking.
//!
//! Every slot write goes through [`Tokens::write_slot`], the single place
//! where the found-kind index, the change flag and the block edge generation
//! are updated. Mutations, searches and the build/render lifecycle live in
//! the submodules.

mod dump;
mod lifecycle;
mod mutation;
mod search;

use std::cell::RefCell;
use std::ops::Index;

use tracing::trace;

use crate::{
    BlockEdgeCache, ContentCache, KindKey, Result, Token, TokenKindIndex, TokensConfig,
    TokensError,
};

pub use dump::TokenRecord;

/// One position of a collection.
///
/// Clearing a token leaves an `Empty` slot behind so that the indices of
/// everything after it stay put until [`Tokens::clear_empty_tokens`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Slot {
    Live(Token),
    #[default]
    Empty,
}

impl Slot {
    #[inline]
    pub fn token(&self) -> Option<&Token> {
        match self {
            Slot::Live(token) => Some(token),
            Slot::Empty => None,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    /// Content of the token, `""` for an empty slot.
    pub fn content(&self) -> &str {
        self.token().map_or("", Token::content)
    }

    pub fn into_token(self) -> Option<Token> {
        match self {
            Slot::Live(token) => Some(token),
            Slot::Empty => None,
        }
    }
}

/// Walking direction of sibling searches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Next index in this direction, `None` below zero.
    #[inline]
    fn step(self, index: usize) -> Option<usize> {
        match self {
            Direction::Forward => index.checked_add(1),
            Direction::Backward => index.checked_sub(1),
        }
    }

    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Mutable, randomly indexable sequence of tokens.
///
/// # Invariants
///
/// - `found` counts exactly the live slots per kind key.
/// - Cached block edges are only trusted at the generation they were
///   computed at; every write bumps `generation`.
/// - `changed` is set by every write that alters a slot or the size and is
///   only reset by [`Tokens::clear_changed`].
#[derive(Clone, Debug, Default)]
pub struct Tokens {
    slots: Vec<Slot>,
    found: TokenKindIndex,
    block_edges: RefCell<BlockEdgeCache>,
    generation: u64,
    code_hash: Option<u64>,
    changed: bool,
    config: TokensConfig,
    /// Cache this collection is registered in, if any.
    cache: Option<ContentCache>,
}

impl Tokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TokensConfig) -> Self {
        Tokens {
            config,
            ..Self::default()
        }
    }

    /// Build a collection from ready-made tokens.
    ///
    /// The result is hashed and starts out unchanged. It is not registered
    /// in any content cache.
    pub fn from_tokens(items: impl IntoIterator<Item = Token>) -> Result<Self> {
        let items: Vec<Token> = items.into_iter().collect();
        let mut tokens = Tokens::new();
        tokens.set_size(items.len());
        for (index, token) in items.into_iter().enumerate() {
            tokens.set(index, token)?;
        }
        tokens.generate_code();
        tokens.clear_changed();
        Ok(tokens)
    }

    pub fn config(&self) -> &TokensConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TokensConfig) {
        self.config = config;
    }

    // === Reads ===

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Token at `index`; `None` out of range or for an empty slot.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.slots.get(index).and_then(Slot::token)
    }

    /// Returns `true` if `index` is within bounds.
    #[inline]
    pub fn exists(&self, index: usize) -> bool {
        index < self.slots.len()
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Bounds-checked slot access.
    pub fn at(&self, index: usize) -> Result<&Slot> {
        self.slots.get(index).ok_or(TokensError::IndexOutOfRange {
            index,
            len: self.slots.len(),
        })
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Returns `true` if `index` holds an empty slot. Out of range is not empty.
    pub fn is_empty_at(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(Slot::is_empty)
    }

    /// Live tokens with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Token)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.token().map(|token| (index, token)))
    }

    pub fn found_kinds(&self) -> &TokenKindIndex {
        &self.found
    }

    pub fn is_token_kind_found(&self, key: impl Into<KindKey>) -> bool {
        self.found.contains(key)
    }

    pub fn is_all_token_kinds_found<K: Into<KindKey>>(
        &self,
        keys: impl IntoIterator<Item = K>,
    ) -> bool {
        keys.into_iter().all(|key| self.found.contains(key))
    }

    pub fn is_any_token_kind_found<K: Into<KindKey>>(
        &self,
        keys: impl IntoIterator<Item = K>,
    ) -> bool {
        keys.into_iter().any(|key| self.found.contains(key))
    }

    pub fn count_token_kind(&self, key: impl Into<KindKey>) -> usize {
        self.found.count(key)
    }

    // === Dirty tracking ===

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn clear_changed(&mut self) {
        self.changed = false;
    }

    /// Drop every memoized block edge.
    pub fn clear_cache(&mut self) {
        self.block_edges.get_mut().clear();
    }

    /// Write counter. Block edges cached at an older generation are stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // === Writes ===

    /// Replace the token at `index`.
    ///
    /// The slot must already exist. Use [`Tokens::clear_at`] to empty a slot.
    pub fn set(&mut self, index: usize, token: Token) -> Result<()> {
        if index >= self.slots.len() {
            return Err(TokensError::IndexNotAllocated {
                index,
                len: self.slots.len(),
            });
        }
        if token.content().is_empty() {
            return Err(TokensError::EmptyToken { index });
        }
        self.write_slot(index, Slot::Live(token));
        Ok(())
    }

    /// Remove the token at `index`, leaving an empty slot.
    ///
    /// Unlike [`Tokens::clear_at`] this always marks the collection changed.
    pub fn unset(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.changed = true;
        self.write_slot(index, Slot::Empty);
        Ok(())
    }

    /// Grow with empty slots or truncate.
    pub fn set_size(&mut self, size: usize) {
        if size == self.slots.len() {
            return;
        }
        self.changed = true;
        self.invalidate_block_edges();
        if size < self.slots.len() {
            for slot in self.slots.drain(size..) {
                if let Slot::Live(token) = slot {
                    self.found.unregister(&token);
                }
            }
        } else {
            self.slots.resize(size, Slot::Empty);
        }
    }

    /// Empty the slot at `index` without shifting anything.
    pub fn clear_at(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.write_slot(index, Slot::Empty);
        Ok(())
    }

    /// Remove every empty slot, shifting live tokens left.
    ///
    /// This is the only operation that renumbers tokens.
    pub fn clear_empty_tokens(&mut self) {
        if !self.slots.iter().any(Slot::is_empty) {
            return;
        }
        let before = self.slots.len();
        self.slots.retain(|slot| !slot.is_empty());
        trace!(removed = before - self.slots.len(), "compacted empty slots");
        self.changed = true;
        self.invalidate_block_edges();
    }

    /// The single slot writer.
    fn write_slot(&mut self, index: usize, slot: Slot) {
        self.invalidate_block_edges();
        let old = &self.slots[index];
        if *old == slot {
            return;
        }
        self.changed = true;
        if let Slot::Live(token) = old {
            self.found.unregister(token);
        }
        if let Slot::Live(token) = &slot {
            self.found.register(token);
        }
        self.slots[index] = slot;
    }

    #[inline]
    fn invalidate_block_edges(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// `charset`, or the configured whitespace characters when `None`.
    fn whitespace_charset<'a>(&'a self, charset: Option<&'a str>) -> &'a str {
        charset.unwrap_or(self.config.whitespace_chars.as_str())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.slots.len() {
            Ok(())
        } else {
            Err(TokensError::IndexOutOfRange {
                index,
                len: self.slots.len(),
            })
        }
    }

    /// `start..=end` must be a non-empty range within bounds.
    fn check_range(&self, start: usize, end: usize) -> Result<()> {
        self.check_index(end)?;
        if start > end {
            return Err(TokensError::IndexOutOfRange {
                index: start,
                len: end + 1,
            });
        }
        Ok(())
    }
}

impl Index<usize> for Tokens {
    type Output = Slot;

    /// Panics when out of range, like slice indexing.
    fn index(&self, index: usize) -> &Slot {
        &self.slots[index]
    }
}
