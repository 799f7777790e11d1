//! Block types, their edge catalog and the per-collection edge memo.
//!
//! A block is a balanced pair of tokens: `(`/`)`, `{`/`}`, or one of the
//! custom bracket kinds the lexer assigns by context. The catalog maps each
//! [`BlockType`] to the prototypes of its two edges; it is built once and
//! shared process-wide.

use std::fmt;
use std::sync::OnceLock;

use fix_lexer::TokenKind;
use rustc_hash::FxHashMap;

use crate::{Prototype, Token, TokensError};

/// The fixed set of block types.
///
/// Discriminants are stable and accepted by `TryFrom<u8>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum BlockType {
    /// `(` … `)`
    Parenthesis = 1,
    /// `{` … `}`
    Curly = 2,
    /// `[` … `]` used as index access.
    IndexSquare = 3,
    /// `[` … `]` opening an array literal.
    ArraySquare = 4,
    /// `$a->{…}`
    DynamicProp = 5,
    /// `${…}`
    DynamicVar = 6,
    /// `$a{…}`
    ArrayIndexCurly = 7,
    /// `use A\{…}`
    GroupImport = 8,
    /// `[` … `]` on the left of an assignment.
    Destructuring = 9,
    /// `(new Foo)`
    BraceClassInstantiation = 10,
}

impl BlockType {
    pub const ALL: [BlockType; 10] = [
        BlockType::Parenthesis,
        BlockType::Curly,
        BlockType::IndexSquare,
        BlockType::ArraySquare,
        BlockType::DynamicProp,
        BlockType::DynamicVar,
        BlockType::ArrayIndexCurly,
        BlockType::GroupImport,
        BlockType::Destructuring,
        BlockType::BraceClassInstantiation,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            BlockType::Parenthesis => "parenthesis",
            BlockType::Curly => "curly",
            BlockType::IndexSquare => "index square",
            BlockType::ArraySquare => "array square",
            BlockType::DynamicProp => "dynamic property",
            BlockType::DynamicVar => "dynamic variable",
            BlockType::ArrayIndexCurly => "array index curly",
            BlockType::GroupImport => "group import",
            BlockType::Destructuring => "destructuring square",
            BlockType::BraceClassInstantiation => "class instantiation",
        }
    }

    /// Start and end prototypes from the catalog.
    pub fn edges(self) -> &'static BlockEdges {
        &catalog()[self as usize - 1]
    }

    /// Which block edge, if any, `token` is.
    ///
    /// Types are tried in catalog order, so a bare `[` reports
    /// [`BlockType::IndexSquare`].
    pub fn detect(token: &Token) -> Option<BlockEdge> {
        BlockType::ALL.into_iter().find_map(|block_type| {
            let edges = block_type.edges();
            if token.equals(&edges.start, true) {
                Some(BlockEdge {
                    block_type,
                    is_start: true,
                })
            } else if token.equals(&edges.end, true) {
                Some(BlockEdge {
                    block_type,
                    is_start: false,
                })
            } else {
                None
            }
        })
    }

    fn build_edges(self) -> BlockEdges {
        let chars = |start, end| BlockEdges {
            start: Prototype::char(start),
            end: Prototype::char(end),
        };
        let kinds = |start, start_text: &str, end, end_text: &str| BlockEdges {
            start: Prototype::kind_text(start, start_text),
            end: Prototype::kind_text(end, end_text),
        };
        match self {
            BlockType::Parenthesis => chars('(', ')'),
            BlockType::Curly => chars('{', '}'),
            BlockType::IndexSquare => chars('[', ']'),
            BlockType::ArraySquare => kinds(
                TokenKind::ArraySquareBraceOpen,
                "[",
                TokenKind::ArraySquareBraceClose,
                "]",
            ),
            BlockType::DynamicProp => kinds(
                TokenKind::DynamicPropBraceOpen,
                "{",
                TokenKind::DynamicPropBraceClose,
                "}",
            ),
            BlockType::DynamicVar => kinds(
                TokenKind::DynamicVarBraceOpen,
                "{",
                TokenKind::DynamicVarBraceClose,
                "}",
            ),
            BlockType::ArrayIndexCurly => kinds(
                TokenKind::ArrayIndexCurlyBraceOpen,
                "{",
                TokenKind::ArrayIndexCurlyBraceClose,
                "}",
            ),
            BlockType::GroupImport => kinds(
                TokenKind::GroupImportBraceOpen,
                "{",
                TokenKind::GroupImportBraceClose,
                "}",
            ),
            BlockType::Destructuring => kinds(
                TokenKind::DestructuringSquareBraceOpen,
                "[",
                TokenKind::DestructuringSquareBraceClose,
                "]",
            ),
            BlockType::BraceClassInstantiation => kinds(
                TokenKind::BraceClassInstantiationOpen,
                "(",
                TokenKind::BraceClassInstantiationClose,
                ")",
            ),
        }
    }
}

impl TryFrom<u8> for BlockType {
    type Error = TokensError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        BlockType::ALL
            .into_iter()
            .find(|block_type| *block_type as u8 == value)
            .ok_or(TokensError::UnknownBlockType(value))
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Prototypes of the two edges of a block type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockEdges {
    pub start: Prototype,
    pub end: Prototype,
}

/// Result of [`BlockType::detect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockEdge {
    pub block_type: BlockType,
    pub is_start: bool,
}

static CATALOG: OnceLock<[BlockEdges; 10]> = OnceLock::new();

fn catalog() -> &'static [BlockEdges; 10] {
    CATALOG.get_or_init(|| BlockType::ALL.map(BlockType::build_edges))
}

/// Memo of matched block edges for one collection.
///
/// Entries are tagged with the collection generation they were computed
/// at. Any write to the collection bumps its generation, which makes every
/// entry stale at once; the first insert at a new generation drops them.
#[derive(Clone, Debug, Default)]
pub struct BlockEdgeCache {
    generation: u64,
    /// `(type, start index) -> end index`
    ends: FxHashMap<(BlockType, usize), usize>,
    /// `(type, end index) -> start index`
    starts: FxHashMap<(BlockType, usize), usize>,
}

impl BlockEdgeCache {
    /// Cached partner of the edge at `index`.
    ///
    /// `find_end` selects the direction: the end of a block starting at
    /// `index`, or the start of a block ending there.
    pub fn get(
        &self,
        generation: u64,
        block_type: BlockType,
        index: usize,
        find_end: bool,
    ) -> Option<usize> {
        if generation != self.generation {
            return None;
        }
        let map = if find_end { &self.ends } else { &self.starts };
        map.get(&(block_type, index)).copied()
    }

    /// Record a matched pair in both directions.
    pub fn insert(&mut self, generation: u64, block_type: BlockType, start: usize, end: usize) {
        if generation != self.generation {
            self.clear();
            self.generation = generation;
        }
        self.ends.insert((block_type, start), end);
        self.starts.insert((block_type, end), start);
    }

    pub fn clear(&mut self) {
        self.ends.clear();
        self.starts.clear();
    }

    /// Number of cached pairs, including stale ones.
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }
}
