//! Errors raised by the token collection.
//!
//! Searches that merely find nothing return `None`. The variants here are
//! reserved for API misuse and for unbalanced source.

use thiserror::Error;

use crate::BlockType;

/// Broad class of a [`TokensError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The caller passed something the operation cannot accept.
    InvalidArgument,
    /// Direct indexed access beyond the current bounds.
    IndexOutOfRange,
    /// The source itself is malformed (unbalanced brackets).
    MalformedInput,
}

/// Error returned by fallible [`Tokens`](crate::Tokens) operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TokensError {
    #[error("unknown block type {0}")]
    UnknownBlockType(u8),

    /// Tokens with empty content may only appear as cleared slots.
    #[error("cannot add an empty token at index {index}")]
    EmptyToken { index: usize },

    #[error("sequence to find must not be empty")]
    EmptySequence,

    #[error("non-meaningful token at position {position} of the sequence")]
    NonMeaningfulSequenceElement { position: usize },

    #[error("token at index {index} is not the {expected} edge of a {block_type} block")]
    NotABlockEdge {
        block_type: BlockType,
        index: usize,
        expected: &'static str,
    },

    /// `set` targets a slot the collection has not been sized for.
    #[error("index {index} is not allocated (collection has {len} slots)")]
    IndexNotAllocated { index: usize, len: usize },

    #[error("index {index} is out of range (collection has {len} slots)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("missing block {missing} for the {block_type} block at index {index}")]
    UnbalancedBlock {
        block_type: BlockType,
        index: usize,
        missing: &'static str,
    },
}

impl TokensError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TokensError::UnknownBlockType(_)
            | TokensError::EmptyToken { .. }
            | TokensError::EmptySequence
            | TokensError::NonMeaningfulSequenceElement { .. }
            | TokensError::NotABlockEdge { .. }
            | TokensError::IndexNotAllocated { .. } => ErrorCategory::InvalidArgument,
            TokensError::IndexOutOfRange { .. } => ErrorCategory::IndexOutOfRange,
            TokensError::UnbalancedBlock { .. } => ErrorCategory::MalformedInput,
        }
    }
}

pub type Result<T> = std::result::Result<T, TokensError>;
