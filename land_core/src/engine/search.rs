use crate::engine::config::EngineConfig;
use crate::engine::eval::FlipEvaluator;
use crate::engine::tt::{TTFlag, TranspositionCache};
use crate::engine::{
    value_bounds, Depth, NodeKind, SearchOptions, SearchOutcome, SearchStats, Searcher,
};
use crate::logic::board::{Board, Color, Move};
use crate::logic::rules::{apply_move, has_legal_move, legal_moves};
use std::sync::Arc;
use std::time::Instant;

/// A successor waiting to be scored. `shortcut` holds the static value when
/// the child would not expand any further.
struct Candidate {
    mv: Move,
    board: Board,
    shortcut: Option<i32>,
}

pub struct AlphaBetaEngine {
    config: Arc<EngineConfig>,
    evaluator: FlipEvaluator,
    stats: SearchStats,
}

impl AlphaBetaEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            config,
            evaluator: FlipEvaluator::new(),
            stats: SearchStats::default(),
        }
    }

    /// Depth given to children. Ordered search may keep the current depth,
    /// see [`EngineConfig::ordering_extends_depth`].
    fn child_depth(&self, depth: Depth, options: SearchOptions) -> Depth {
        if options.ordering && self.config.ordering_extends_depth {
            depth
        } else {
            depth.next()
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn alpha_beta(
        &mut self,
        board: &Board,
        color: Color,
        kind: NodeKind,
        mut alpha: i32,
        mut beta: i32,
        depth: Depth,
        options: SearchOptions,
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
            self.config.alpha_beta_cutoff,
        ) {
            return (None, value);
        }

        let child_color = color.opposite();
        let child_kind = kind.opposite();
        let child_depth = self.child_depth(depth, options);

        let mut candidates: Vec<Candidate> = moves
            .into_iter()
            .map(|mv| {
                let next = apply_move(board, color, mv);
                let shortcut = if options.ordering {
                    self.evaluator.leaf_value(
                        &next,
                        child_color,
                        child_kind,
                        has_legal_move(&next, child_color),
                        child_depth,
                        self.config.alpha_beta_cutoff,
                    )
                } else {
                    None
                };
                Candidate {
                    mv,
                    board: next,
                    shortcut,
                }
            })
            .collect();

        // Children that resolve statically go first; the sort is stable so
        // both groups keep enumeration order.
        if options.ordering {
            candidates.sort_by_key(|c| c.shortcut.is_none());
        }

        let mut best_move = None;
        for candidate in candidates {
            let value = match candidate.shortcut {
                Some(value) => value,
                None => self.child_value(
                    &candidate.board,
                    child_color,
                    child_kind,
                    alpha,
                    beta,
                    child_depth,
                    options,
                    cache,
                ),
            };

            match kind {
                NodeKind::Max if value > alpha => {
                    alpha = value;
                    best_move = Some(candidate.mv);
                }
                NodeKind::Min if value < beta => {
                    beta = value;
                    best_move = Some(candidate.mv);
                }
                NodeKind::Max | NodeKind::Min => {}
            }

            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        match kind {
            NodeKind::Max => (best_move, alpha),
            NodeKind::Min => (best_move, beta),
        }
    }

    /// Value of `child` for the window `(alpha, beta)`, through the cache when
    /// enabled. Results that hit a bound are stored as bounds, so a later
    /// probe with a different window only reuses what still holds.
    #[allow(clippy::too_many_arguments)]
    fn child_value(
        &mut self,
        child: &Board,
        color: Color,
        kind: NodeKind,
        alpha: i32,
        beta: i32,
        depth: Depth,
        options: SearchOptions,
        cache: &mut TranspositionCache,
    ) -> i32 {
        if options.caching {
            if let Some(entry) = cache.probe(child, color) {
                if entry.admits(alpha, beta) {
                    self.stats.cache_hits += 1;
                    return entry.value;
                }
            }
        }

        let (_, value) = self.alpha_beta(child, color, kind, alpha, beta, depth, options, cache);

        if options.caching {
            let flag = if value <= alpha {
                TTFlag::UpperBound
            } else if value >= beta {
                TTFlag::LowerBound
            } else {
                TTFlag::Exact
            };
            cache.store_bound(child.clone(), color, value, flag);
        }
        value
    }
}

impl Searcher for AlphaBetaEngine {
    fn search(
        &mut self,
        board: &Board,
        color: Color,
        options: SearchOptions,
        cache: &mut TranspositionCache,
    ) -> (SearchOutcome, SearchStats) {
        self.stats = SearchStats::default();
        let start = Instant::now();

        let (alpha, beta) = value_bounds(board);
        let (mut best_move, value) = self.alpha_beta(
            board,
            color,
            NodeKind::Max,
            alpha,
            beta,
            options.depth,
            options,
            cache,
        );

        // Every move losing all disks never beats the root alpha; still move.
        if best_move.is_none() && !options.depth.is_exhausted() {
            best_move = legal_moves(board, color).first().copied();
        }

        let mut stats = self.stats;
        stats.time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        log::debug!(
            "alpha-beta {options:?}: {best_move:?} value {value} ({} nodes, {} cutoffs, {} hits)",
            stats.nodes,
            stats.cutoffs,
            stats.cache_hits
        );

        (SearchOutcome { best_move, value }, stats)
    }
}
