use crate::{check_win, flood_reveal, Board, Difficulty, Position, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Terminal-status signal returned by a reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Continue,
    Win,
    Lose,
}

impl Outcome {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Outcome::Win | Outcome::Lose)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagOutcome {
    Flagged,
    Unflagged,
    Ignored,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, FlagOutcome::Ignored)
    }
}

/// Whether flags are limited to the number of mines on the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagPolicy {
    #[default]
    Capped,
    Unlimited,
}

/// Everything needed to render and continue a single game. Cloning it yields an
/// independent snapshot. Serialized for renderers only; a state is never
/// rebuilt from untrusted input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameState {
    board: Board,
    game_over: bool,
    won: bool,
    first_move_made: bool,
    elapsed_seconds: u32,
    flag_policy: FlagPolicy,
    triggered_mine: Option<Position>,
}

impl GameState {
    pub fn new(difficulty: Difficulty, flag_policy: FlagPolicy) -> Result<Self> {
        Self::with_rng(difficulty, flag_policy, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng>(
        difficulty: Difficulty,
        flag_policy: FlagPolicy,
        rng: &mut R,
    ) -> Result<Self> {
        let board = Board::from_config(difficulty.config(), rng)?;
        Ok(Self::from_board(board, flag_policy))
    }

    pub fn from_board(board: Board, flag_policy: FlagPolicy) -> Self {
        Self {
            board,
            game_over: false,
            won: false,
            first_move_made: false,
            elapsed_seconds: 0,
            flag_policy,
            triggered_mine: None,
        }
    }

    pub fn reveal(&mut self, pos: Position) -> Result<Outcome> {
        let cell = *self.board.get_cell(pos)?;

        if self.game_over {
            log::trace!("ignoring reveal at {pos}, game is over");
            return Ok(Outcome::Continue);
        }
        if cell.revealed || cell.flagged {
            log::trace!("ignoring reveal at {pos}, cell is not hidden");
            return Ok(Outcome::Continue);
        }

        self.first_move_made = true;
        self.board.cell_mut(pos)?.revealed = true;

        if cell.is_mine {
            self.board.reveal_all_mines();
            self.triggered_mine = Some(pos);
            self.game_over = true;
            log::debug!("mine hit at {pos}, game lost");
            return Ok(Outcome::Lose);
        }

        if cell.adjacent_mines == 0 {
            let opened = flood_reveal(&mut self.board, pos);
            log::trace!("flood from {pos} opened {opened} cells");
        }

        if check_win(&self.board) {
            self.game_over = true;
            self.won = true;
            log::debug!("all safe cells revealed, game won");
            return Ok(Outcome::Win);
        }

        Ok(Outcome::Continue)
    }

    pub fn toggle_flag(&mut self, pos: Position) -> Result<FlagOutcome> {
        let cell = *self.board.get_cell(pos)?;

        if self.game_over || cell.revealed {
            log::trace!("ignoring flag at {pos}");
            return Ok(FlagOutcome::Ignored);
        }

        if cell.flagged {
            self.board.cell_mut(pos)?.flagged = false;
            return Ok(FlagOutcome::Unflagged);
        }

        if self.flag_policy == FlagPolicy::Capped
            && self.board.flagged_count() >= self.board.mines_count()
        {
            log::trace!("ignoring flag at {pos}, all {} flags used", self.board.mines_count());
            return Ok(FlagOutcome::Ignored);
        }

        self.board.cell_mut(pos)?.flagged = true;
        Ok(FlagOutcome::Flagged)
    }

    /// Mines minus placed flags. Only negative under [`FlagPolicy::Unlimited`].
    pub fn remaining_flag_budget(&self) -> i64 {
        self.board.mines_count() as i64 - self.board.flagged_count() as i64
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn is_lost(&self) -> bool {
        self.game_over && !self.won
    }

    /// Started and not yet finished; the timer should be running.
    pub fn is_in_progress(&self) -> bool {
        self.first_move_made && !self.game_over
    }

    pub fn first_move_made(&self) -> bool {
        self.first_move_made
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub(crate) fn set_elapsed_seconds(&mut self, elapsed_seconds: u32) {
        self.elapsed_seconds = elapsed_seconds;
    }

    pub fn flag_count(&self) -> usize {
        self.board.flagged_count()
    }

    pub fn flag_policy(&self) -> FlagPolicy {
        self.flag_policy
    }

    pub fn triggered_mine(&self) -> Option<Position> {
        self.triggered_mine
    }
}
