use crate::logic::board::{Board, Color, Move};
use std::iter::successors;

const DIRECTIONS: [(isize, isize); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Next square from `(col, row)` in direction `(dc, dr)`, if still on the board.
fn step(
    size: usize,
    (col, row): (usize, usize),
    (dc, dr): (isize, isize),
) -> Option<(usize, usize)> {
    let c = col.checked_add_signed(dc).filter(|&c| c < size)?;
    let r = row.checked_add_signed(dr).filter(|&r| r < size)?;
    Some((c, r))
}

/// Number of opposing disks `color` would flip walking from `(col, row)` in
/// one direction. A run only counts when it is closed by a `color` disk.
fn run_length(board: &Board, origin: (usize, usize), dir: (isize, isize), color: Color) -> usize {
    let mut len = 0;
    let mut pos = step(board.size(), origin, dir);
    while let Some((c, r)) = pos {
        match board.get(c, r) {
            None => return 0,
            Some(owner) if owner == color => return len,
            Some(_) => {
                len += 1;
                pos = step(board.size(), (c, r), dir);
            }
        }
    }
    0
}

fn squares_toward(
    board: &Board,
    origin: (usize, usize),
    dir: (isize, isize),
    len: usize,
) -> impl Iterator<Item = (usize, usize)> {
    let size = board.size();
    successors(step(size, origin, dir), move |&pos| step(size, pos, dir)).take(len)
}

/// Every run of disks a placement at `(col, row)` by `color` would flip, one
/// entry per direction that flips anything.
#[must_use]
pub fn find_lines(board: &Board, col: usize, row: usize, color: Color) -> Vec<Vec<(usize, usize)>> {
    DIRECTIONS
        .iter()
        .filter_map(|&dir| {
            let len = run_length(board, (col, row), dir, color);
            (len > 0).then(|| squares_toward(board, (col, row), dir, len).collect())
        })
        .collect()
}

/// Total disks flipped by placing `color` at `(col, row)`.
#[must_use]
pub fn flip_count(board: &Board, col: usize, row: usize, color: Color) -> usize {
    DIRECTIONS
        .iter()
        .map(|&dir| run_length(board, (col, row), dir, color))
        .sum()
}

fn is_legal_at(board: &Board, col: usize, row: usize, color: Color) -> bool {
    board.is_empty_at(col, row)
        && DIRECTIONS
            .iter()
            .any(|&dir| run_length(board, (col, row), dir, color) > 0)
}

/// Legal placements for `color`, column by column and top to bottom within a
/// column. The search relies on this order for its tie-breaking.
#[must_use]
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    let size = board.size();
    (0..size)
        .flat_map(|col| (0..size).map(move |row| (col, row)))
        .filter(|&(col, row)| is_legal_at(board, col, row, color))
        .map(|(col, row)| Move::at(col, row))
        .collect()
}

#[must_use]
pub fn has_legal_move(board: &Board, color: Color) -> bool {
    let size = board.size();
    (0..size).any(|col| (0..size).any(|row| is_legal_at(board, col, row, color)))
}

/// Places `color` at `mv` and flips every flanked run, returning the new board.
/// `mv` must come from [`legal_moves`] for the same board and color.
#[must_use]
pub fn apply_move(board: &Board, color: Color, mv: Move) -> Board {
    let origin = (usize::from(mv.col), usize::from(mv.row));
    debug_assert!(
        is_legal_at(board, origin.0, origin.1, color),
        "illegal move {mv} for {color:?}"
    );

    let mut next = board.clone();
    next.set(origin.0, origin.1, color);
    for dir in DIRECTIONS {
        let len = run_length(board, origin, dir, color);
        for (c, r) in squares_toward(board, origin, dir, len) {
            next.set(c, r, color);
        }
    }
    next
}

/// Disk counts as `(dark, light)`.
#[must_use]
pub fn score(board: &Board) -> (usize, usize) {
    (board.count(Color::Dark), board.count(Color::Light))
}

#[must_use]
pub fn is_game_over(board: &Board) -> bool {
    !has_legal_move(board, Color::Dark) && !has_legal_move(board, Color::Light)
}
