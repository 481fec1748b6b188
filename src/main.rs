use clap::Parser;
use minesweeper_core::{
    Action, ActionOutcome, Difficulty, FlagPolicy, Game, GameError, GameOptions, Outcome,
    Position, TickerId, UndoOutcome,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::Cell as SharedCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Terminal minesweeper")]
struct Args {
    /// easy (12x12, 48 mines), medium (16x16, 80) or hard (18x18, 99)
    #[arg(short, long, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Allow more flags than there are mines
    #[arg(long)]
    unlimited_flags: bool,

    /// Seed for mine placement
    #[arg(long)]
    seed: Option<u64>,
}

enum Command {
    Act(Position, Action),
    Undo,
    NewGame(Option<Difficulty>),
    Quit,
}

/// Drives the game's ticker from wall-clock time between prompts.
struct Clock {
    ticker: Option<TickerId>,
    last_tick: Instant,
}

impl Clock {
    fn new() -> Self {
        Self {
            ticker: None,
            last_tick: Instant::now(),
        }
    }

    fn catch_up(&mut self, game: &mut Game) {
        match game.active_ticker() {
            Some(id) if self.ticker == Some(id) => {
                while self.last_tick.elapsed() >= Duration::from_secs(1) {
                    self.last_tick += Duration::from_secs(1);
                    game.tick(id);
                }
            }
            Some(id) => {
                self.ticker = Some(id);
                self.last_tick = Instant::now();
            }
            None => self.ticker = None,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run_game(args) {
        Ok(_) => println!("Thanks for playing!"),
        Err(e) => eprintln!("Game error: {}", e),
    }
}

fn run_game(args: Args) -> Result<(), GameError> {
    let options = GameOptions {
        difficulty: args.difficulty,
        flag_policy: if args.unlimited_flags {
            FlagPolicy::Unlimited
        } else {
            FlagPolicy::Capped
        },
        ..GameOptions::default()
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let seconds = Rc::new(SharedCell::new(0));
    let display = Rc::clone(&seconds);
    let mut game = Game::with_rng(options, &mut rng)?.on_tick(move |secs| display.set(secs));
    let mut clock = Clock::new();

    loop {
        clock.catch_up(&mut game);
        print_board(&game, seconds.get());

        let Some(command) = get_user_input() else {
            continue;
        };

        match command {
            Command::Act(pos, action) => match game.perform_action(pos, action) {
                Ok(ActionOutcome::Reveal(Outcome::Win)) => println!("You win!"),
                Ok(ActionOutcome::Reveal(Outcome::Lose)) => println!("Game Over!"),
                Ok(ActionOutcome::Flag(outcome)) if !outcome.has_update() => {
                    println!("Cannot flag that cell")
                }
                Ok(_) => {}
                Err(e) => println!("Error: {}", e),
            },
            Command::Undo => {
                if game.undo() == UndoOutcome::NothingToUndo {
                    println!("Nothing to undo");
                }
            }
            Command::NewGame(difficulty) => {
                let difficulty = difficulty.unwrap_or(game.options().difficulty);
                game.new_game(difficulty)?;
            }
            Command::Quit => break,
        }
        clock.catch_up(&mut game);
    }

    Ok(())
}

fn print_board(game: &Game, seconds: u32) {
    let state = game.state();
    let (rows, cols) = game.dimensions();

    println!(
        "Mines left: {:03}   Time: {:03}",
        state.remaining_flag_budget(),
        seconds
    );

    // Print column numbers
    print!("   ");
    for col in 0..cols {
        print!("{:>2} ", col);
    }
    println!();

    // Print rows
    for row in 0..rows {
        print!("{:>2} ", row);
        for col in 0..cols {
            let pos = Position::new(row as i32, col as i32);
            let symbol = match state.board().get_cell(pos) {
                Ok(cell) if cell.revealed && cell.is_mine => " *".to_string(),
                Ok(cell) if cell.revealed && cell.adjacent_mines == 0 => "  ".to_string(),
                Ok(cell) if cell.revealed => format!("{:>2}", cell.adjacent_mines),
                Ok(cell) if cell.flagged => " F".to_string(),
                _ => " #".to_string(),
            };
            print!("{} ", symbol);
        }
        println!();
    }
}

fn get_user_input() -> Option<Command> {
    print!("Enter command (r row col | f row col | u | n [difficulty] | q): ");
    io::stdout().flush().ok()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input).ok()? == 0 {
        return Some(Command::Quit);
    }

    let mut parts = input.split_whitespace();
    let command = parts.next()?;

    let action = match command {
        "r" => Action::Reveal,
        "f" => Action::Flag,
        "u" => return Some(Command::Undo),
        "q" => return Some(Command::Quit),
        "n" => {
            let difficulty = match parts.next().map(str::parse::<Difficulty>) {
                Some(Ok(difficulty)) => Some(difficulty),
                Some(Err(e)) => {
                    println!("{}", e);
                    return None;
                }
                None => None,
            };
            return Some(Command::NewGame(difficulty));
        }
        _ => {
            println!("Invalid command. Use 'r' to reveal, 'f' to flag, 'u' to undo");
            return None;
        }
    };

    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;

    Some(Command::Act(Position::new(row, col), action))
}
