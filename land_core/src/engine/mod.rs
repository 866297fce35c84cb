use crate::engine::config::EngineConfig;
use crate::engine::minimax::MinimaxEngine;
use crate::engine::search::AlphaBetaEngine;
use crate::engine::tt::TranspositionCache;
use crate::logic::board::{Board, Color, Move};
use std::fmt;
use std::sync::Arc;

pub mod config;
pub mod eval;
pub mod minimax;
pub mod search;
pub mod tt;

/// Remaining plies before a node is scored statically. `None` never runs out,
/// which still terminates because every move fills a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Depth(Option<u32>);

impl Depth {
    #[must_use]
    pub const fn unlimited() -> Self {
        Self(None)
    }

    #[must_use]
    pub const fn plies(n: u32) -> Self {
        Self(Some(n))
    }

    /// Wire form: any negative limit means unlimited.
    #[must_use]
    pub fn from_protocol(limit: i32) -> Self {
        u32::try_from(limit).map_or(Self::unlimited(), Self::plies)
    }

    #[must_use]
    pub const fn is_exhausted(self) -> bool {
        matches!(self.0, Some(0))
    }

    /// Depth handed to a child node.
    #[must_use]
    pub const fn next(self) -> Self {
        match self.0 {
            Some(n) => Self(Some(n.saturating_sub(1))),
            None => Self(None),
        }
    }

    #[must_use]
    pub const fn remaining(self) -> Option<u32> {
        self.0
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(n) => write!(f, "{n}"),
            None => f.write_str("unlimited"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The root player picks the highest value.
    Max,
    /// The opponent picks the lowest value.
    Min,
}

impl NodeKind {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Max => Self::Min,
            Self::Min => Self::Max,
        }
    }
}

/// Per-call switches for a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub depth: Depth,
    pub caching: bool,
    /// Alpha-beta only; minimax ignores it.
    pub ordering: bool,
}

impl SearchOptions {
    #[must_use]
    pub const fn new(depth: Depth) -> Self {
        Self {
            depth,
            caching: false,
            ordering: false,
        }
    }

    #[must_use]
    pub const fn with_caching(mut self, caching: bool) -> Self {
        self.caching = caching;
        self
    }

    #[must_use]
    pub const fn with_ordering(mut self, ordering: bool) -> Self {
        self.ordering = ordering;
        self
    }
}

/// Chosen move and its value from the root player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best_move: Option<Move>,
    pub value: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cache_hits: u64,
    pub cutoffs: u64,
    pub time_ms: u64,
}

pub trait Evaluator {
    /// Final score differential for `color`.
    fn utility(&self, board: &Board, color: Color) -> i32;
    /// Estimate used when the depth limit stops the search early.
    fn heuristic(&self, board: &Board, color: Color) -> i32;
}

pub trait Searcher {
    fn search(
        &mut self,
        board: &Board,
        color: Color,
        options: SearchOptions,
        cache: &mut TranspositionCache,
    ) -> (SearchOutcome, SearchStats);
}

/// Root window `[-N², N²+1]`; every reachable value lies inside it.
#[must_use]
pub fn value_bounds(board: &Board) -> (i32, i32) {
    let n = i32::try_from(board.size()).unwrap_or(i32::from(u8::MAX));
    (-(n * n), n * n + 1)
}

/// Minimax move for `color`, or `None` when it has to pass.
pub fn claim_mm(
    board: &Board,
    color: Color,
    depth: Depth,
    caching: bool,
    cache: &mut TranspositionCache,
) -> Option<Move> {
    let mut engine = MinimaxEngine::new(Arc::new(EngineConfig::default()));
    let options = SearchOptions::new(depth).with_caching(caching);
    engine.search(board, color, options, cache).0.best_move
}

/// Alpha-beta move for `color`, or `None` when it has to pass.
pub fn claim_ab(
    board: &Board,
    color: Color,
    depth: Depth,
    caching: bool,
    ordering: bool,
    cache: &mut TranspositionCache,
) -> Option<Move> {
    let mut engine = AlphaBetaEngine::new(Arc::new(EngineConfig::default()));
    let options = SearchOptions::new(depth)
        .with_caching(caching)
        .with_ordering(ordering);
    engine.search(board, color, options, cache).0.best_move
}
