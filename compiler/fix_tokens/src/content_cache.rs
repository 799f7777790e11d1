//! Process-wide reuse cache keyed by content hash.
//!
//! Building a collection means lexing, cooking and indexing the whole
//! source. When the same text is requested again the cache hands back a copy
//! of the collection built last time instead.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHasher};

use crate::Tokens;

/// Hash of a complete source text.
pub fn calculate_code_hash(code: &str) -> u64 {
    let mut hasher = FxHasher::default();
    code.hash(&mut hasher);
    hasher.finish()
}

/// Hit and miss counters of a [`ContentCache`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

#[derive(Default)]
struct CacheState {
    entries: FxHashMap<u64, Tokens>,
    stats: CacheStats,
}

/// Map from content hash to the collection that last produced it.
///
/// Handles are cheap to clone and share one map. Stored collections are
/// snapshots: editing a collection after registering it does not affect the
/// stored copy until it is registered again.
#[derive(Clone, Default)]
pub struct ContentCache {
    state: Arc<Mutex<CacheState>>,
}

static GLOBAL: OnceLock<ContentCache> = OnceLock::new();

impl ContentCache {
    /// Isolated cache, mainly for tests.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache used by [`Tokens::from_code`].
    pub fn global() -> &'static ContentCache {
        GLOBAL.get_or_init(ContentCache::new)
    }

    /// Copy of the collection stored under `hash`.
    pub fn get(&self, hash: u64) -> Option<Tokens> {
        let mut state = self.state.lock();
        let found = state.entries.get(&hash).cloned();
        if found.is_some() {
            state.stats.hits += 1;
        } else {
            state.stats.misses += 1;
        }
        drop(state);
        found.map(|mut tokens| {
            tokens.attach_cache(self.clone());
            tokens
        })
    }

    /// Store a snapshot of `tokens` under `hash`, replacing any previous entry.
    pub fn put(&self, hash: u64, tokens: &Tokens) {
        let snapshot = tokens.detached_snapshot();
        self.state.lock().entries.insert(hash, snapshot);
    }

    pub fn evict(&self, hash: u64) -> bool {
        self.state.lock().entries.remove(&hash).is_some()
    }

    pub fn contains(&self, hash: u64) -> bool {
        self.state.lock().entries.contains_key(&hash)
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.entries.clear();
        state.stats = CacheStats::default();
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.state.lock().stats
    }

    /// Returns `true` if both handles share the same map.
    pub fn same_as(&self, other: &ContentCache) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl fmt::Debug for ContentCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ContentCache")
            .field("entries", &state.entries.len())
            .field("stats", &state.stats)
            .finish()
    }
}
