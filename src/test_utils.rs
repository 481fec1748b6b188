//! Deterministic board helpers shared by unit tests and benchmarks.

use crate::{Board, Position};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Parses a layout where `*` is a mine and `.` is a safe cell, one row per line.
/// Surrounding whitespace on each line is ignored.
///
/// Panics on malformed layouts; this is test-only input.
pub fn board_from_layout(layout: &str) -> Board {
    let rows: Vec<&str> = layout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let cols = rows.first().map_or(0, |row| row.len());
    assert!(
        rows.iter().all(|row| row.len() == cols),
        "ragged layout: {layout:?}"
    );

    let mines: Vec<Position> = rows
        .iter()
        .enumerate()
        .flat_map(|(r, row)| {
            row.chars().enumerate().filter_map(move |(c, ch)| match ch {
                '*' => Some(Position::new(r as i32, c as i32)),
                '.' => None,
                other => panic!("unexpected layout character {other:?}"),
            })
        })
        .collect();

    Board::from_mine_positions(rows.len(), cols, &mines).expect("layout should be a valid board")
}

/// A board of the given size whose only mines fill the last column, leaving a
/// large zero region to flood.
pub fn open_field(rows: usize, cols: usize) -> Board {
    let mines: Vec<Position> = (0..rows)
        .map(|row| Position::new(row as i32, cols as i32 - 1))
        .collect();
    Board::from_mine_positions(rows, cols, &mines).expect("open field should be a valid board")
}
