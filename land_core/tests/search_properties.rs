use land_core::engine::config::{CutoffEval, EngineConfig};
use land_core::engine::eval::FlipEvaluator;
use land_core::engine::minimax::MinimaxEngine;
use land_core::engine::search::AlphaBetaEngine;
use land_core::engine::tt::TranspositionCache;
use land_core::engine::{
    claim_ab, claim_mm, Depth, Evaluator, SearchOptions, SearchOutcome, Searcher,
};
use land_core::logic::board::{Board, Color, Move};
use land_core::logic::rules::{apply_move, legal_moves};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Positions reached by random play from the standard start, with the side
/// to move. A side without moves passes; play stops when neither can move.
fn random_positions(seed: u64, count: usize) -> Vec<(Board, Color)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let size = *[4, 6, 6].choose(&mut rng).unwrap();
            let plies = rng.gen_range(0..30);
            let mut board = Board::standard(size);
            let mut color = Color::Dark;
            for _ in 0..plies {
                let moves = legal_moves(&board, color);
                let Some(&mv) = moves.choose(&mut rng) else {
                    if legal_moves(&board, color.opposite()).is_empty() {
                        break;
                    }
                    color = color.opposite();
                    continue;
                };
                board = apply_move(&board, color, mv);
                color = color.opposite();
            }
            (board, color)
        })
        .collect()
}

fn minimax(cutoff: CutoffEval) -> MinimaxEngine {
    MinimaxEngine::new(Arc::new(EngineConfig::with_cutoff(cutoff)))
}

fn alpha_beta(cutoff: CutoffEval) -> AlphaBetaEngine {
    AlphaBetaEngine::new(Arc::new(EngineConfig::with_cutoff(cutoff)))
}

fn run(
    searcher: &mut dyn Searcher,
    board: &Board,
    color: Color,
    options: SearchOptions,
) -> SearchOutcome {
    let mut cache = TranspositionCache::new();
    searcher.search(board, color, options, &mut cache).0
}

#[test]
fn utility_is_antisymmetric() {
    let eval = FlipEvaluator::new();
    for (board, color) in random_positions(1, 60) {
        assert_eq!(
            eval.utility(&board, color),
            -eval.utility(&board, color.opposite()),
            "\n{board}"
        );
    }
}

#[test]
fn heuristic_matches_utility_without_moves() {
    let eval = FlipEvaluator::new();
    let mut checked = 0;
    for (board, _) in random_positions(2, 120) {
        for color in [Color::Dark, Color::Light] {
            if legal_moves(&board, color).is_empty() {
                assert_eq!(eval.heuristic(&board, color), eval.utility(&board, color));
                checked += 1;
            }
        }
    }

    // Light alone on the board: dark cannot move
    let lone = Board::empty(4).with_cell(1, 1, Some(Color::Light));
    assert_eq!(eval.heuristic(&lone, Color::Dark), -1);
    assert!(checked > 0);
}

#[test]
fn alpha_beta_agrees_with_minimax() {
    for cutoff in [CutoffEval::Heuristic, CutoffEval::Utility] {
        for (board, color) in random_positions(3, 40) {
            for plies in 1..=3 {
                let options = SearchOptions::new(Depth::plies(plies));
                let mm = run(&mut minimax(cutoff), &board, color, options);
                let ab = run(&mut alpha_beta(cutoff), &board, color, options);
                assert_eq!(mm.value, ab.value, "depth {plies} {cutoff:?}\n{board}");
            }
        }
    }
}

#[test]
fn caching_does_not_change_results() {
    for (board, color) in random_positions(4, 40) {
        for plies in 1..=3 {
            let options = SearchOptions::new(Depth::plies(plies));
            let cached = options.with_caching(true);

            let mm = run(&mut minimax(CutoffEval::Heuristic), &board, color, options);
            let mm_cached = run(&mut minimax(CutoffEval::Heuristic), &board, color, cached);
            assert_eq!(mm, mm_cached, "minimax depth {plies}\n{board}");

            let ab = run(&mut alpha_beta(CutoffEval::Utility), &board, color, options);
            let ab_cached = run(&mut alpha_beta(CutoffEval::Utility), &board, color, cached);
            assert_eq!(ab, ab_cached, "alpha-beta depth {plies}\n{board}");
        }
    }
}

#[test]
fn ordering_does_not_change_value() {
    for cutoff in [CutoffEval::Heuristic, CutoffEval::Utility] {
        for (board, color) in random_positions(5, 40) {
            for plies in 1..=3 {
                let options = SearchOptions::new(Depth::plies(plies));
                let plain = run(&mut alpha_beta(cutoff), &board, color, options);
                let ordered = run(
                    &mut alpha_beta(cutoff),
                    &board,
                    color,
                    options.with_ordering(true),
                );
                assert_eq!(plain.value, ordered.value, "depth {plies}\n{board}");

                let both = run(
                    &mut alpha_beta(cutoff),
                    &board,
                    color,
                    options.with_ordering(true).with_caching(true),
                );
                assert_eq!(plain.value, both.value, "depth {plies}\n{board}");
            }
        }
    }
}

#[test]
fn repeated_searches_are_identical() {
    let config = Arc::new(EngineConfig::default());
    for (board, color) in random_positions(6, 20) {
        let options = SearchOptions::new(Depth::plies(3)).with_caching(true);
        let mut first_cache = TranspositionCache::new();
        let mut second_cache = TranspositionCache::new();
        let first =
            AlphaBetaEngine::new(config.clone()).search(&board, color, options, &mut first_cache);
        let second =
            AlphaBetaEngine::new(config.clone()).search(&board, color, options, &mut second_cache);
        assert_eq!(first.0, second.0);
        assert_eq!(first.1.nodes, second.1.nodes);
        assert_eq!(first_cache.len(), second_cache.len());
    }
}

#[test]
fn chosen_move_is_legal_or_pass() {
    for (board, color) in random_positions(7, 60) {
        let legal = legal_moves(&board, color);
        let mut cache = TranspositionCache::new();
        let mm = claim_mm(&board, color, Depth::plies(2), true, &mut cache);
        let ab = claim_ab(&board, color, Depth::plies(2), true, true, &mut cache);
        for choice in [mm, ab] {
            match choice {
                Some(mv) => assert!(legal.contains(&mv), "{mv} not legal\n{board}"),
                None => assert!(legal.is_empty(), "passed with moves available\n{board}"),
            }
        }
    }
}

#[test]
fn opening_depth_one_scenario() {
    let board = Board::standard(8);
    let openings = [
        Move::new(2, 3),
        Move::new(3, 2),
        Move::new(4, 5),
        Move::new(5, 4),
    ];
    let mut cache = TranspositionCache::new();

    let chosen = claim_ab(&board, Color::Dark, Depth::plies(1), false, false, &mut cache).unwrap();
    assert!(openings.contains(&chosen));

    let (outcome, _) = AlphaBetaEngine::new(Arc::new(EngineConfig::default())).search(
        &board,
        Color::Dark,
        SearchOptions::new(Depth::plies(1)),
        &mut cache,
    );
    let after = apply_move(&board, Color::Dark, chosen);
    assert_eq!(outcome.best_move, Some(chosen));
    assert_eq!(outcome.value, FlipEvaluator::new().utility(&after, Color::Dark));
}

#[test]
fn full_four_by_four_board_passes() {
    let rows = vec![
        vec![1, 1, 1, 1],
        vec![1, 1, 1, 1],
        vec![2, 2, 2, 2],
        vec![2, 2, 2, 2],
    ];
    let board = Board::from_rows(&rows).unwrap();
    let mut cache = TranspositionCache::new();
    for color in [Color::Dark, Color::Light] {
        assert!(legal_moves(&board, color).is_empty());
        assert_eq!(claim_mm(&board, color, Depth::plies(2), false, &mut cache), None);
        assert_eq!(
            claim_ab(&board, color, Depth::plies(2), false, false, &mut cache),
            None
        );
    }
}

#[test]
fn shared_cache_is_reused_across_searches() {
    let board = Board::standard(6);
    let options = SearchOptions::new(Depth::plies(3)).with_caching(true);
    let mut engine = minimax(CutoffEval::Heuristic);
    let mut cache = TranspositionCache::new();

    let (first, first_stats) = engine.search(&board, Color::Dark, options, &mut cache);
    let size = cache.len();
    let (second, second_stats) = engine.search(&board, Color::Dark, options, &mut cache);

    assert_eq!(first, second);
    assert_eq!(cache.len(), size);
    // Every root child is answered from the cache the second time
    assert!(second_stats.nodes < first_stats.nodes);
    assert_eq!(second_stats.nodes, 1);
}
