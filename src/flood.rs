//! Flood fill over zero-adjacency cells.
//!
//! Starting from an already revealed origin, every reachable covered safe cell is
//! opened. Only cells with no adjacent mines propagate further, so numbered cells
//! form the boundary of the opened region. The opened set is a closure and does not
//! depend on the order in which the frontier is drained.

use crate::{Board, Position};
use ndarray::Array2;
use std::collections::{BTreeSet, VecDeque};

/// Work list used by the traversal.
pub trait Frontier: Default {
    fn push(&mut self, pos: Position);
    fn pop(&mut self) -> Option<Position>;
}

/// First-in first-out frontier, i.e. breadth-first traversal.
impl Frontier for VecDeque<Position> {
    fn push(&mut self, pos: Position) {
        self.push_back(pos);
    }

    fn pop(&mut self) -> Option<Position> {
        self.pop_front()
    }
}

/// Last-in first-out frontier, i.e. depth-first traversal.
impl Frontier for Vec<Position> {
    fn push(&mut self, pos: Position) {
        Vec::push(self, pos);
    }

    fn pop(&mut self) -> Option<Position> {
        Vec::pop(self)
    }
}

/// Opens the zero-connected region around `origin` breadth-first and returns how
/// many cells were newly revealed. The origin itself is not counted.
pub fn flood_reveal(board: &mut Board, origin: Position) -> usize {
    flood_reveal_with::<VecDeque<Position>>(board, origin)
}

pub fn flood_reveal_with<F: Frontier>(board: &mut Board, origin: Position) -> usize {
    let Ok(origin_cell) = board.get_cell(origin) else {
        return 0;
    };
    if origin_cell.is_mine || origin_cell.adjacent_mines != 0 {
        return 0;
    }

    let mut visited: Array2<bool> = Array2::default(board.dimensions());
    let mut frontier = F::default();
    let mut revealed = 0;

    mark_visited(&mut visited, origin);
    frontier.push(origin);

    while let Some(current) = frontier.pop() {
        let candidates: Vec<Position> = board
            .neighbors(current)
            .filter(|pos| !is_visited(&visited, *pos))
            .collect();

        for pos in candidates {
            let Ok(cell) = board.cell_mut(pos) else {
                continue;
            };
            if !cell.is_floodable() {
                continue;
            }

            cell.revealed = true;
            revealed += 1;
            mark_visited(&mut visited, pos);
            if cell.adjacent_mines == 0 {
                frontier.push(pos);
            }
        }
    }

    revealed
}

/// The cells a flood from `origin` would open, without touching the board.
pub fn flood_region(board: &Board, origin: Position) -> BTreeSet<Position> {
    if board.get_cell(origin).map_or(true, |cell| cell.is_mine) {
        return BTreeSet::new();
    }

    let mut scratch = board.clone();
    if let Ok(cell) = scratch.cell_mut(origin) {
        cell.revealed = true;
    }
    flood_reveal(&mut scratch, origin);

    scratch
        .iter_positions()
        .filter(|&pos| {
            let before = board.get_cell(pos).is_ok_and(|cell| cell.revealed);
            let after = scratch.get_cell(pos).is_ok_and(|cell| cell.revealed);
            after && (!before || pos == origin)
        })
        .collect()
}

fn index(pos: Position) -> [usize; 2] {
    [pos.row as usize, pos.col as usize]
}

fn is_visited(visited: &Array2<bool>, pos: Position) -> bool {
    visited[index(pos)]
}

fn mark_visited(visited: &mut Array2<bool>, pos: Position) {
    visited[index(pos)] = true;
}
