use minesweeper_core::{
    check_win, Board, Difficulty, FlagOutcome, FlagPolicy, Game, GameError, GameState, Outcome,
    Position, UndoOutcome,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;

fn pos(row: i32, col: i32) -> Position {
    Position::new(row, col)
}

fn game_with_mines(rows: usize, cols: usize, mines: &[Position]) -> Game {
    let board = Board::from_mine_positions(rows, cols, mines).unwrap();
    Game::from_state(GameState::from_board(board, FlagPolicy::Capped))
}

#[test]
fn test_corner_mine_single_reveal_wins() {
    let mut game = game_with_mines(3, 3, &[pos(0, 0)]);

    assert_eq!(game.reveal(pos(2, 2)).unwrap(), Outcome::Win);

    let state = game.state();
    assert!(state.is_game_over());
    assert!(state.is_won());
    assert!(check_win(state.board()));
    assert!(!state.board().get_cell(pos(0, 0)).unwrap().revealed);
}

#[test]
fn test_mine_reveal_ends_game() {
    let mines = [pos(0, 0), pos(3, 3), pos(1, 2)];
    let mut game = game_with_mines(4, 4, &mines);

    assert_eq!(game.reveal(pos(3, 3)).unwrap(), Outcome::Lose);

    let state = game.state();
    assert!(state.is_game_over());
    assert!(!state.is_won());
    for mine in mines {
        assert!(state.board().get_cell(mine).unwrap().revealed);
    }
    assert_eq!(state.board().revealed_safe_count(), 0);
}

#[test]
fn test_flag_cap_blocks_extra_flag() {
    let mut game = game_with_mines(3, 3, &[pos(0, 0)]);

    assert_eq!(game.toggle_flag(pos(1, 1)).unwrap(), FlagOutcome::Flagged);
    assert_eq!(game.toggle_flag(pos(2, 2)).unwrap(), FlagOutcome::Ignored);
    assert!(!game.state().board().get_cell(pos(2, 2)).unwrap().flagged);
    assert_eq!(game.remaining_flag_budget(), 0);
}

#[test]
fn test_terminal_state_ignores_everything_but_undo() {
    let mut game = game_with_mines(3, 3, &[pos(0, 0)]);
    game.reveal(pos(0, 0)).unwrap();
    let lost = game.state().clone();

    assert_eq!(game.reveal(pos(2, 2)).unwrap(), Outcome::Continue);
    assert_eq!(game.toggle_flag(pos(2, 2)).unwrap(), FlagOutcome::Ignored);
    assert_eq!(game.state(), &lost);

    assert_eq!(game.undo(), UndoOutcome::Restored);
    assert!(!game.state().is_game_over());
}

#[test]
fn test_out_of_bounds_is_rejected() {
    let mut game = game_with_mines(3, 3, &[pos(0, 0)]);

    assert_eq!(
        game.reveal(pos(3, 1)),
        Err(GameError::InvalidCoordinate(pos(3, 1)))
    );
    assert_eq!(
        game.toggle_flag(pos(1, -1)),
        Err(GameError::InvalidCoordinate(pos(1, -1)))
    );
}

#[test]
fn test_full_game_with_undo_and_timer() {
    let ticks = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&ticks);
    let board = Board::from_mine_positions(4, 4, &[pos(0, 3), pos(3, 0)]).unwrap();
    let mut game = Game::from_state(GameState::from_board(board, FlagPolicy::Capped))
        .on_tick(move |secs| sink.borrow_mut().push(secs));

    // Numbered cell first: no flood
    assert_eq!(game.reveal(pos(1, 2)).unwrap(), Outcome::Continue);
    let ticker = game.active_ticker().unwrap();
    game.tick(ticker);

    // Stepping on a mine, then taking it back
    assert_eq!(game.reveal(pos(0, 3)).unwrap(), Outcome::Lose);
    assert!(!game.tick(ticker));
    assert_eq!(game.undo(), UndoOutcome::Restored);
    assert_eq!(game.state().elapsed_seconds(), 1);
    let ticker = game.active_ticker().unwrap();
    game.tick(ticker);

    game.toggle_flag(pos(0, 3)).unwrap();
    game.toggle_flag(pos(3, 0)).unwrap();
    assert_eq!(game.remaining_flag_budget(), 0);

    // Every safe cell is reachable from the zero cell at (0, 0)
    assert_eq!(game.reveal(pos(0, 0)).unwrap(), Outcome::Win);
    assert_eq!(game.state().board().revealed_safe_count(), 14);
    assert!(game.active_ticker().is_none());
    assert_eq!(game.state().elapsed_seconds(), 2);
    assert_eq!(*ticks.borrow(), vec![0, 1, 1, 2]);
}

#[test]
fn test_seeded_games_are_reproducible() {
    let first = GameState::with_rng(
        Difficulty::Hard,
        FlagPolicy::Capped,
        &mut StdRng::seed_from_u64(42),
    )
    .unwrap();
    let second = GameState::with_rng(
        Difficulty::Hard,
        FlagPolicy::Capped,
        &mut StdRng::seed_from_u64(42),
    )
    .unwrap();

    assert_eq!(first, second);
    assert_eq!(first.board().mines_count(), 99);
}

#[test]
fn test_every_difficulty_builds() {
    for difficulty in Difficulty::ALL {
        let game = Game::new(difficulty).unwrap();
        let config = difficulty.config();
        let mines = game
            .state()
            .board()
            .cells()
            .iter()
            .filter(|cell| cell.is_mine)
            .count();

        assert_eq!(game.dimensions(), (config.rows, config.cols));
        assert_eq!(mines, config.mines);
        assert_eq!(game.remaining_flag_budget(), config.mines as i64);
    }
}
