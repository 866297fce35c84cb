use crate::logic::board::{Board, Color};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TTFlag {
    Exact,
    LowerBound, // Beta cutoff (fail-high)
    UpperBound, // Alpha cutoff (fail-low)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTEntry {
    pub value: i32,
    pub flag: TTFlag,
}

impl TTEntry {
    /// Whether this entry can stand in for a search of the window `(alpha, beta)`.
    #[must_use]
    pub const fn admits(&self, alpha: i32, beta: i32) -> bool {
        match self.flag {
            TTFlag::Exact => true,
            TTFlag::LowerBound => self.value >= beta,
            TTFlag::UpperBound => self.value <= alpha,
        }
    }
}

/// Search values keyed by position and side to move. The key is the full
/// board, so lookups never collide. Entries do not record the depth they were
/// searched to.
#[derive(Debug, Default)]
pub struct TranspositionCache {
    entries: HashMap<Board, [Option<TTEntry>; 2]>,
    len: usize,
}

impl TranspositionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn probe(&self, board: &Board, color: Color) -> Option<TTEntry> {
        self.entries
            .get(board)
            .and_then(|slots| slots.get(color.index()).copied().flatten())
    }

    /// Stored value for `(board, color)` regardless of how it was bounded.
    #[must_use]
    pub fn lookup(&self, board: &Board, color: Color) -> Option<i32> {
        self.probe(board, color).map(|e| e.value)
    }

    pub fn store(&mut self, board: Board, color: Color, value: i32) {
        self.store_bound(board, color, value, TTFlag::Exact);
    }

    /// Stores `value` for `(board, color)`, replacing any previous entry.
    pub fn store_bound(&mut self, board: Board, color: Color, value: i32, flag: TTFlag) {
        let slots = self.entries.entry(board).or_default();
        if let Some(slot) = slots.get_mut(color.index()) {
            if slot.is_none() {
                self.len += 1;
            }
            *slot = Some(TTEntry { value, flag });
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.len = 0;
    }
}
