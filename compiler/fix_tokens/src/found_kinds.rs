//! Found-kind index: live token counts per kind key.

use rustc_hash::FxHashMap;

use crate::{KindKey, Token};

/// Multiset of the kind keys carried by the live tokens of a collection.
///
/// Only the collection's slot writes touch it, so a count always equals the
/// number of live slots with that key. Keys whose count drops to zero are
/// removed, making absence and a zero count the same thing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenKindIndex {
    counts: FxHashMap<KindKey, usize>,
}

impl TokenKindIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, token: &Token) {
        *self.counts.entry(token.kind_key()).or_insert(0) += 1;
    }

    pub fn unregister(&mut self, token: &Token) {
        let key = token.kind_key();
        if let Some(count) = self.counts.get_mut(&key) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&key);
            }
        }
    }

    #[inline]
    pub fn count(&self, key: impl Into<KindKey>) -> usize {
        self.counts.get(&key.into()).copied().unwrap_or(0)
    }

    #[inline]
    pub fn contains(&self, key: impl Into<KindKey>) -> bool {
        self.counts.contains_key(&key.into())
    }

    /// Number of distinct keys present.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// Present keys with their counts, sorted by key.
    pub fn sorted(&self) -> Vec<(KindKey, usize)> {
        let mut entries: Vec<_> = self.counts.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort_unstable();
        entries
    }
}
