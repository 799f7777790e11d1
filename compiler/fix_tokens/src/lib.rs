//! Mutable, indexed token collection for source-to-source fixers.
//!
//! A [`Tokens`] collection holds the complete lexical decomposition of one
//! source file. Fixer rules navigate it by index, search it for kinds,
//! bracket partners and token sequences, and rewrite it in place. Three
//! derived structures are kept consistent under every edit:
//!
//! - the found-kind index ([`TokenKindIndex`]) counts live tokens per kind so
//!   searches for absent kinds return immediately;
//! - the block edge memo ([`BlockEdgeCache`]) remembers matched bracket pairs
//!   until the next write;
//! - the content hash keys the process-wide [`ContentCache`], which lets
//!   [`Tokens::from_code`] reuse an already built collection for identical
//!   source text.
//!
//! Removal never shifts indices. A cleared slot becomes [`Slot::Empty`] and
//! stays in place until [`Tokens::clear_empty_tokens`] compacts the sequence.

mod block;
mod config;
mod content_cache;
mod error;
mod found_kinds;
mod token;
mod tokens;

pub use block::{BlockEdge, BlockEdgeCache, BlockEdges, BlockType};
pub use config::TokensConfig;
pub use content_cache::{calculate_code_hash, CacheStats, ContentCache};
pub use error::{ErrorCategory, Result, TokensError};
pub use found_kinds::TokenKindIndex;
pub use token::{CaseSensitivity, KindKey, Prototype, Token, DEFAULT_WHITESPACE};
pub use tokens::{Direction, Slot, TokenRecord, Tokens};

pub use fix_lexer::TokenKind;
