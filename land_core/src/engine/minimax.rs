use crate::engine::config::EngineConfig;
use crate::engine::eval::FlipEvaluator;
use crate::engine::tt::TranspositionCache;
use crate::engine::{Depth, NodeKind, SearchOptions, SearchOutcome, SearchStats, Searcher};
use crate::logic::board::{Board, Color, Move};
use crate::logic::rules::{apply_move, legal_moves};
use std::sync::Arc;
use std::time::Instant;

/// Exhaustive depth-limited minimax.
pub struct MinimaxEngine {
    config: Arc<EngineConfig>,
    evaluator: FlipEvaluator,
    stats: SearchStats,
}

impl MinimaxEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            config,
            evaluator: FlipEvaluator::new(),
            stats: SearchStats::default(),
        }
    }

    fn minimax(
        &mut self,
        board: &Board,
        color: Color,
        kind: NodeKind,
        depth: Depth,
        caching: bool,
        cache: &mut TranspositionCache,
    ) -> (Option<Move>, i32) {
        self.stats.nodes += 1;

        let moves = legal_moves(board, color);
        if let Some(value) = self.evaluator.leaf_value(
            board,
            color,
            kind,
            !moves.is_empty(),
            depth,
            self.config.minimax_cutoff,
        ) {
            return (None, value);
        }

        let mut best: Option<(Move, i32)> = None;
        for mv in moves {
            let child = apply_move(board, color, mv);
            let value = self.child_value(
                &child,
                color.opposite(),
                kind.opposite(),
                depth.next(),
                caching,
                cache,
            );

            // Strict comparison keeps the first of equally good moves
            let improves = best.map_or(true, |(_, best_value)| match kind {
                NodeKind::Max => value > best_value,
                NodeKind::Min => value < best_value,
            });
            if improves {
                best = Some((mv, value));
            }
        }

        best.map_or((None, 0), |(mv, value)| (Some(mv), value))
    }

    /// Value of `child` with `color` to move, through the cache when enabled.
    /// The key is the successor position and the side about to move there.
    fn child_value(
        &mut self,
        child: &Board,
        color: Color,
        kind: NodeKind,
        depth: Depth,
        caching: bool,
        cache: &mut TranspositionCache,
    ) -> i32 {
        if caching {
            if let Some(value) = cache.lookup(child, color) {
                self.stats.cache_hits += 1;
                return value;
            }
        }

        let (_, value) = self.minimax(child, color, kind, depth, caching, cache);
        if caching {
            cache.store(child.clone(), color, value);
        }
        value
    }
}

impl Searcher for MinimaxEngine {
    fn search(
        &mut self,
        board: &Board,
        color: Color,
        options: SearchOptions,
        cache: &mut TranspositionCache,
    ) -> (SearchOutcome, SearchStats) {
        self.stats = SearchStats::default();
        let start = Instant::now();

        let (best_move, value) = self.minimax(
            board,
            color,
            NodeKind::Max,
            options.depth,
            options.caching,
            cache,
        );

        let mut stats = self.stats;
        stats.time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        log::debug!(
            "minimax depth {} caching {}: {:?} value {} ({} nodes, {} cache hits)",
            options.depth,
            options.caching,
            best_move,
            value,
            stats.nodes,
            stats.cache_hits
        );

        (SearchOutcome { best_move, value }, stats)
    }
}
