use crate::{
    Difficulty, FlagOutcome, FlagPolicy, GameState, History, Outcome, Position, Result, TickerId,
    Timer, DEFAULT_HISTORY_CAPACITY,
};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Reveal,
    Flag,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionOutcome {
    Reveal(Outcome),
    Flag(FlagOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOutcome {
    Restored,
    NothingToUndo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOptions {
    pub difficulty: Difficulty,
    pub flag_policy: FlagPolicy,
    pub history_capacity: usize,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            flag_policy: FlagPolicy::default(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// A running game: the live state, its undo history and its timer.
#[derive(Debug)]
pub struct Game {
    state: GameState,
    history: History,
    timer: Timer,
    options: GameOptions,
}

impl Game {
    pub fn new(difficulty: Difficulty) -> Result<Self> {
        Self::with_options(GameOptions {
            difficulty,
            ..GameOptions::default()
        })
    }

    pub fn with_options(options: GameOptions) -> Result<Self> {
        Self::with_rng(options, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng>(options: GameOptions, rng: &mut R) -> Result<Self> {
        let state = GameState::with_rng(options.difficulty, options.flag_policy, rng)?;
        Ok(Self::from_parts(state, options))
    }

    /// Wraps an existing state, e.g. one built from a fixed mine layout.
    pub fn from_state(state: GameState) -> Self {
        let options = GameOptions {
            flag_policy: state.flag_policy(),
            ..GameOptions::default()
        };
        Self::from_parts(state, options)
    }

    fn from_parts(state: GameState, options: GameOptions) -> Self {
        Self {
            state,
            history: History::new(options.history_capacity),
            timer: Timer::new(),
            options,
        }
    }

    /// Install the display callback. It is invoked with the elapsed seconds on
    /// every accepted tick and whenever the timer starts, resets or is restored.
    pub fn on_tick(mut self, listener: impl FnMut(u32) + 'static) -> Self {
        self.timer.set_listener(listener);
        self
    }

    pub fn perform_action(&mut self, pos: Position, action: Action) -> Result<ActionOutcome> {
        match action {
            Action::Reveal => self.reveal(pos).map(ActionOutcome::Reveal),
            Action::Flag => self.toggle_flag(pos).map(ActionOutcome::Flag),
        }
    }

    pub fn reveal(&mut self, pos: Position) -> Result<Outcome> {
        if !self.accepts_action(pos)? {
            return Ok(Outcome::Continue);
        }
        self.history.push(&self.state);

        let was_started = self.state.first_move_made();
        let outcome = self.state.reveal(pos)?;

        if !was_started && self.state.first_move_made() {
            self.timer.start();
        }
        if outcome.is_terminal() {
            self.timer.stop();
        }
        self.sync_elapsed();
        Ok(outcome)
    }

    pub fn toggle_flag(&mut self, pos: Position) -> Result<FlagOutcome> {
        if !self.accepts_action(pos)? {
            return Ok(FlagOutcome::Ignored);
        }
        self.history.push(&self.state);
        self.state.toggle_flag(pos)
    }

    /// Make the latest snapshot live again. Undo itself is not recorded.
    pub fn undo(&mut self) -> UndoOutcome {
        let Some(snapshot) = self.history.pop() else {
            return UndoOutcome::NothingToUndo;
        };
        self.state = snapshot;

        let elapsed = self.state.elapsed_seconds();
        if self.state.is_in_progress() {
            self.timer.resume(elapsed);
        } else {
            self.timer.restore(elapsed);
        }
        UndoOutcome::Restored
    }

    /// New board with the current options.
    pub fn restart(&mut self) -> Result<()> {
        self.restart_with_rng(&mut rand::thread_rng())
    }

    pub fn restart_with_rng<R: Rng>(&mut self, rng: &mut R) -> Result<()> {
        self.state = GameState::with_rng(self.options.difficulty, self.options.flag_policy, rng)?;
        self.history.clear();
        self.timer.reset();
        log::debug!("started new {} game", self.options.difficulty);
        Ok(())
    }

    pub fn new_game(&mut self, difficulty: Difficulty) -> Result<()> {
        self.options.difficulty = difficulty;
        self.restart()
    }

    /// Forward the host's one-second callback. Stale tickers are ignored.
    pub fn tick(&mut self, ticker: TickerId) -> bool {
        let accepted = self.timer.tick(ticker);
        if accepted {
            self.sync_elapsed();
        }
        accepted
    }

    /// The ticker the host should be driving, if the clock is running.
    pub fn active_ticker(&self) -> Option<TickerId> {
        self.timer.active_ticker()
    }

    pub fn remaining_flag_budget(&self) -> i64 {
        self.state.remaining_flag_budget()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn options(&self) -> GameOptions {
        self.options
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.state.board().dimensions()
    }

    /// Bounds are checked before anything else; a finished game takes no
    /// snapshot and changes nothing.
    fn accepts_action(&self, pos: Position) -> Result<bool> {
        self.state.board().get_cell(pos)?;
        if self.state.is_game_over() {
            log::trace!("ignoring action at {pos}, game is over");
            return Ok(false);
        }
        Ok(true)
    }

    fn sync_elapsed(&mut self) {
        self.state.set_elapsed_seconds(self.timer.elapsed());
    }
}
