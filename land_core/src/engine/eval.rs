use crate::engine::config::CutoffEval;
use crate::engine::{Depth, Evaluator, NodeKind};
use crate::logic::board::{Board, Color};
use crate::logic::rules::{flip_count, legal_moves, score};

/// Disk differential at terminal nodes, flip potential at the depth limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlipEvaluator;

impl FlipEvaluator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Largest number of disks any single move by `color` would flip, 0 when
    /// `color` cannot move.
    fn best_flip(board: &Board, color: Color) -> i32 {
        legal_moves(board, color)
            .into_iter()
            .map(|mv| flip_count(board, usize::from(mv.col), usize::from(mv.row), color))
            .max()
            .map_or(0, to_value)
    }

    /// Value of a node that is not expanded any further, or `None` when the
    /// node has to be searched. Values are from the root player's side:
    /// a MIN node negates the evaluation of the opponent to move there.
    #[must_use]
    pub fn leaf_value(
        &self,
        board: &Board,
        color: Color,
        kind: NodeKind,
        has_moves: bool,
        depth: Depth,
        cutoff: CutoffEval,
    ) -> Option<i32> {
        match kind {
            NodeKind::Max if !has_moves || depth.is_exhausted() => Some(self.utility(board, color)),
            NodeKind::Min if !has_moves => Some(-self.utility(board, color)),
            NodeKind::Min if depth.is_exhausted() => Some(match cutoff {
                CutoffEval::Utility => -self.utility(board, color),
                CutoffEval::Heuristic => -self.heuristic(board, color),
            }),
            NodeKind::Max | NodeKind::Min => None,
        }
    }
}

impl Evaluator for FlipEvaluator {
    fn utility(&self, board: &Board, color: Color) -> i32 {
        let (dark, light) = score(board);
        let (own, other) = match color {
            Color::Dark => (dark, light),
            Color::Light => (light, dark),
        };
        to_value(own) - to_value(other)
    }

    fn heuristic(&self, board: &Board, color: Color) -> i32 {
        let moves = legal_moves(board, color);
        if moves.is_empty() {
            return self.utility(board, color);
        }
        let best_own = Self::best_flip(board, color);
        let best_opp = Self::best_flip(board, color.opposite());
        best_own - best_opp + self.utility(board, color)
    }
}

// Disk counts are bounded by the square count, at most 255².
fn to_value(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::Move;
    use crate::logic::rules::apply_move;

    #[test]
    fn test_utility_is_antisymmetric() {
        let board = apply_move(&Board::standard(8), Color::Dark, Move::new(2, 3));
        let eval = FlipEvaluator::new();
        assert_eq!(eval.utility(&board, Color::Dark), 3);
        assert_eq!(eval.utility(&board, Color::Light), -3);
    }

    #[test]
    fn test_heuristic_on_opening() {
        // Each side's best move flips one disk and material is level
        let eval = FlipEvaluator::new();
        assert_eq!(eval.heuristic(&Board::standard(8), Color::Dark), 0);
        assert_eq!(eval.heuristic(&Board::standard(8), Color::Light), 0);
    }

    #[test]
    fn test_heuristic_rewards_bigger_flip() {
        // Dark can flip three in a row, light can only answer with one
        let rows = vec![
            vec![1, 2, 2, 2, 0, 0],
            vec![0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0],
        ];
        let board = Board::from_rows(&rows).unwrap();
        let eval = FlipEvaluator::new();
        // best_own = 3, light has no move (no dark run it can close), utility = -2
        assert_eq!(eval.heuristic(&board, Color::Dark), 3 - 2);
    }

    #[test]
    fn test_heuristic_falls_back_without_moves() {
        let rows = vec![vec![2, 2, 0], vec![0, 0, 0], vec![0, 0, 0]];
        let board = Board::from_rows(&rows).unwrap();
        let eval = FlipEvaluator::new();
        assert_eq!(eval.heuristic(&board, Color::Dark), eval.utility(&board, Color::Dark));
        assert_eq!(eval.heuristic(&board, Color::Dark), -2);
    }

    #[test]
    fn test_leaf_value_conventions() {
        use CutoffEval::{Heuristic, Utility};
        use NodeKind::{Max, Min};

        let board = apply_move(&Board::standard(8), Color::Dark, Move::new(2, 3));
        let eval = FlipEvaluator::new();
        let limit = Depth::plies(0);
        let open = Depth::plies(2);
        let leaf = |color, kind, has_moves, depth, cutoff| {
            eval.leaf_value(&board, color, kind, has_moves, depth, cutoff)
        };

        assert_eq!(leaf(Color::Dark, Max, true, limit, Heuristic), Some(3));
        assert_eq!(leaf(Color::Dark, Max, true, open, Heuristic), None);
        assert_eq!(leaf(Color::Light, Min, false, open, Heuristic), Some(3));
        assert_eq!(leaf(Color::Light, Min, true, limit, Utility), Some(3));
        assert_eq!(
            leaf(Color::Light, Min, true, limit, Heuristic),
            Some(-eval.heuristic(&board, Color::Light))
        );
    }
}
