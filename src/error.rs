use crate::Position;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Board dimensions must be positive, got {rows}x{cols}")]
    EmptyBoard { rows: usize, cols: usize },
    #[error("Board size {rows}x{cols} is too large")]
    BoardTooLarge { rows: usize, cols: usize },
    #[error("Too many mines ({mines}) for board size {rows}x{cols}")]
    TooManyMines { rows: usize, cols: usize, mines: usize },
    #[error("Mine at {0} was placed twice")]
    DuplicateMine(Position),
    #[error("Unknown difficulty {0:?}, expected easy, medium or hard")]
    UnknownDifficulty(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Position {0} is out of bounds")]
    InvalidCoordinate(Position),
}

pub type Result<T> = std::result::Result<T, GameError>;
