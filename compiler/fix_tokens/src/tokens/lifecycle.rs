//! Building a collection from source text and rendering it back.

use fix_lexer::TokenKind;
use tracing::{debug, trace};

use super::{Slot, Tokens};
use crate::{calculate_code_hash, ContentCache, Result, Token};

impl Tokens {
    /// Collection for `code`, reusing the global content cache.
    pub fn from_code(code: &str) -> Tokens {
        Tokens::from_code_in(ContentCache::global(), code)
    }

    /// Collection for `code`, reusing `cache`.
    ///
    /// On a hit the cached collection is re-rendered and only reused if the
    /// text still hashes the same; it comes back compacted and unchanged.
    /// Otherwise the text is lexed into a new collection registered in
    /// `cache`.
    #[tracing::instrument(level = "debug", skip_all, fields(len = code.len()))]
    pub fn from_code_in(cache: &ContentCache, code: &str) -> Tokens {
        let hash = calculate_code_hash(code);
        if let Some(mut tokens) = cache.get(hash) {
            tokens.generate_code();
            if tokens.code_hash == Some(hash) {
                trace!(hash, "content cache hit");
                tokens.clear_empty_tokens();
                tokens.clear_changed();
                return tokens;
            }
        }
        trace!(hash, "content cache miss");

        let mut tokens = Tokens::new();
        tokens.cache = Some(cache.clone());
        tokens.set_code(code);
        tokens.clear_changed();
        tokens
    }

    /// Replace the whole content by lexing `code`.
    ///
    /// Does nothing beyond refreshing the hash if `code` equals the current
    /// rendering.
    #[tracing::instrument(level = "debug", skip_all, fields(len = code.len()))]
    pub fn set_code(&mut self, code: &str) {
        if code == self.render() {
            self.change_code_hash(calculate_code_hash(code));
            return;
        }
        self.set_size(0);
        self.clear_cache();

        let units = fix_lexer::lex(code);
        self.set_size(units.len());
        for (index, unit) in units.into_iter().enumerate() {
            self.write_slot(index, Slot::Live(Token::from(unit)));
        }
        self.change_code_hash(calculate_code_hash(code));
    }

    /// Render the whole collection and refresh the content hash.
    pub fn generate_code(&mut self) -> String {
        let code = self.render();
        self.change_code_hash(calculate_code_hash(&code));
        code
    }

    /// Whole text, leaving the hash and the cache alone.
    fn render(&self) -> String {
        self.slots.iter().map(Slot::content).collect()
    }

    /// Render the inclusive range `start..=end`.
    pub fn generate_partial_code(&self, start: usize, end: usize) -> Result<String> {
        self.check_range(start, end)?;
        Ok(self.render_range(start, end))
    }

    /// Register this collection in `cache` under its current content hash.
    ///
    /// The entry in a previously used cache is evicted. Later hash changes
    /// keep `cache` up to date.
    pub fn register_in(&mut self, cache: &ContentCache) {
        if let (Some(previous), Some(hash)) = (self.cache.take(), self.code_hash.take()) {
            previous.evict(hash);
        }
        self.cache = Some(cache.clone());
        self.generate_code();
    }

    /// Hash of the last generated code, if any.
    pub fn code_hash(&self) -> Option<u64> {
        self.code_hash
    }

    /// Returns `true` if `start..=end` contains a line ending.
    pub fn is_partial_code_multiline(&self, start: usize, end: usize) -> bool {
        self.slots
            .iter()
            .take(end.saturating_add(1))
            .skip(start)
            .any(|slot| self.config.contains_line_ending(slot.content()))
    }

    /// Single program without surrounding markup: at most one open tag and
    /// no inline markup, except a lone shebang line at the very top.
    pub fn is_monolithic_php(&self) -> bool {
        let open_tags = self.count_token_kind(TokenKind::OpenTag)
            + self.count_token_kind(TokenKind::OpenTagWithEcho);
        if open_tags > 1 {
            return false;
        }
        match self.count_token_kind(TokenKind::InlineHtml) {
            0 => true,
            1 => self.get(0).is_some_and(|token| {
                token.is_given_kind(TokenKind::InlineHtml) && is_shebang_line(token.content())
            }),
            _ => false,
        }
    }

    fn change_code_hash(&mut self, hash: u64) {
        if self.code_hash == Some(hash) {
            return;
        }
        debug!(old = ?self.code_hash, new = hash, "code hash changed");
        if let (Some(cache), Some(old)) = (&self.cache, self.code_hash) {
            cache.evict(old);
        }
        self.code_hash = Some(hash);
        if let Some(cache) = &self.cache {
            cache.put(hash, self);
        }
    }

    /// Point this collection at the cache it was taken from.
    pub(crate) fn attach_cache(&mut self, cache: ContentCache) {
        self.cache = Some(cache);
    }

    /// Copy for storage inside a cache, without a handle back to it.
    pub(crate) fn detached_snapshot(&self) -> Tokens {
        let mut snapshot = self.clone();
        snapshot.cache = None;
        snapshot
    }
}

/// `#!...` on one line, optionally followed by a single line feed.
fn is_shebang_line(text: &str) -> bool {
    let line = text.strip_suffix('\n').unwrap_or(text);
    line.len() > 2 && line.starts_with("#!") && !line.contains('\n')
}
