use crate::{BoardConfig, ConfigError, GameError, Position, Result};
use itertools::iproduct;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub revealed: bool,
    pub flagged: bool,
    pub adjacent_mines: u8,
}

impl Cell {
    pub const fn is_hidden(&self) -> bool {
        !self.revealed && !self.flagged
    }

    /// A cell the flood fill may open: covered, unflagged and safe.
    pub const fn is_floodable(&self) -> bool {
        self.is_hidden() && !self.is_mine
    }
}

/// Serialize-only: boards are built through the validating constructors so the
/// mine count and adjacency invariants always hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board {
    cells: Array2<Cell>,
    mines_count: usize,
}

impl Board {
    pub fn new(rows: usize, cols: usize, mines_count: usize) -> Result<Self> {
        Self::with_rng(rows, cols, mines_count, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng>(
        rows: usize,
        cols: usize,
        mines_count: usize,
        rng: &mut R,
    ) -> Result<Self> {
        BoardConfig::new(rows, cols, mines_count).validate()?;

        let mut board = Board {
            cells: Array2::default((rows, cols)),
            mines_count,
        };
        board.place_mines(rng);
        board.compute_adjacency();
        log::debug!("generated {rows}x{cols} board with {mines_count} mines");
        Ok(board)
    }

    pub fn from_config<R: Rng>(config: BoardConfig, rng: &mut R) -> Result<Self> {
        Self::with_rng(config.rows, config.cols, config.mines, rng)
    }

    /// Builds a board with mines at exactly the given positions.
    pub fn from_mine_positions(rows: usize, cols: usize, mines: &[Position]) -> Result<Self> {
        BoardConfig::new(rows, cols, mines.len()).validate()?;

        let mut board = Board {
            cells: Array2::default((rows, cols)),
            mines_count: mines.len(),
        };
        for &pos in mines {
            let cell = board.cell_mut(pos)?;
            if cell.is_mine {
                return Err(ConfigError::DuplicateMine(pos).into());
            }
            cell.is_mine = true;
        }
        board.compute_adjacency();
        Ok(board)
    }

    fn place_mines<R: Rng>(&mut self, rng: &mut R) {
        let (rows, cols) = self.dimensions();
        let mut mines_placed = 0;

        while mines_placed < self.mines_count {
            let row = rng.gen_range(0..rows);
            let col = rng.gen_range(0..cols);
            let cell = &mut self.cells[[row, col]];

            if !cell.is_mine {
                cell.is_mine = true;
                mines_placed += 1;
            }
        }
    }

    fn compute_adjacency(&mut self) {
        for pos in self.iter_positions() {
            let adjacent_mines = if self.is_mine(pos) {
                0
            } else {
                self.count_adjacent_mines(pos)
            };
            if let Some(index) = self.index(pos) {
                self.cells[index].adjacent_mines = adjacent_mines;
            }
        }
    }

    fn index(&self, pos: Position) -> Option<[usize; 2]> {
        let row = usize::try_from(pos.row).ok()?;
        let col = usize::try_from(pos.col).ok()?;
        let (rows, cols) = self.dimensions();
        (row < rows && col < cols).then_some([row, col])
    }

    fn is_mine(&self, pos: Position) -> bool {
        self.get_cell(pos).is_ok_and(|cell| cell.is_mine)
    }

    pub fn is_within_bounds(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    pub fn get_cell(&self, pos: Position) -> Result<&Cell> {
        self.index(pos)
            .map(|index| &self.cells[index])
            .ok_or(GameError::InvalidCoordinate(pos))
    }

    pub(crate) fn cell_mut(&mut self, pos: Position) -> Result<&mut Cell> {
        match self.index(pos) {
            Some(index) => Ok(&mut self.cells[index]),
            None => Err(GameError::InvalidCoordinate(pos)),
        }
    }

    /// In-bounds neighbors of `pos`.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        pos.neighbors().filter(move |p| self.is_within_bounds(*p))
    }

    pub fn count_adjacent_mines(&self, pos: Position) -> u8 {
        self.neighbors(pos).filter(|p| self.is_mine(*p)).count() as u8
    }

    /// Row-major iteration over every position on the board.
    pub fn iter_positions(&self) -> impl Iterator<Item = Position> {
        let (rows, cols) = self.dimensions();
        iproduct!(0..rows as i32, 0..cols as i32).map(|(row, col)| Position::new(row, col))
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        self.cells.dim()
    }

    pub fn mines_count(&self) -> usize {
        self.mines_count
    }

    pub fn safe_cell_count(&self) -> usize {
        self.cells.len().saturating_sub(self.mines_count)
    }

    pub fn flagged_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.flagged).count()
    }

    pub fn revealed_safe_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.revealed && !cell.is_mine)
            .count()
    }

    pub(crate) fn reveal_all_mines(&mut self) {
        for cell in self.cells.iter_mut().filter(|cell| cell.is_mine) {
            cell.revealed = true;
        }
    }
}

/// True once every safe cell has been revealed.
pub fn check_win(board: &Board) -> bool {
    board
        .cells
        .iter()
        .all(|cell| cell.is_mine || cell.revealed)
}
