pub mod board;
pub mod difficulty;
pub mod error;
pub mod flood;
pub mod game;
pub mod history;
pub mod position;
pub mod state;
pub mod timer;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use board::{check_win, Board, Cell};
pub use difficulty::{BoardConfig, Difficulty};
pub use error::{ConfigError, GameError, Result};
pub use flood::{flood_region, flood_reveal, flood_reveal_with, Frontier};
pub use game::{Action, ActionOutcome, Game, GameOptions, UndoOutcome};
pub use history::{History, DEFAULT_HISTORY_CAPACITY};
pub use position::Position;
pub use state::{FlagOutcome, FlagPolicy, GameState, Outcome};
pub use timer::{TickListener, TickerId, Timer};
