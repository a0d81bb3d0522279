use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;
use log::{error, info};
use snake_arena::config::{DEFAULT_BOARD, THEME_MEADOW};
use snake_arena::error::AppError;
use snake_arena::game::Session;
use snake_arena::input::{GameInput, InputHandler};
use snake_arena::logging;
use snake_arena::terminal_runtime::{RenderContext, install_panic_hook};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Seed for the random stream; defaults to the current time.
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the session log.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log every state transition with a full snapshot.
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(app_error) => {
            error!("{app_error}");
            eprintln!("snake-arena: {app_error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let log_path = cli.log_file.unwrap_or_else(logging::default_log_path);
    logging::init(&log_path, cli.debug)?;

    let seed = cli.seed.unwrap_or_else(seed_from_clock);
    info!("starting with seed {seed}");

    install_panic_hook();
    let mut context = RenderContext::enter(&THEME_MEADOW)?;
    let mut input = InputHandler::new();
    let mut session = Session::new_with_seed(DEFAULT_BOARD, seed);

    'game: loop {
        context.draw(&session.snapshot(Instant::now()))?;

        for game_input in input.drain()? {
            if game_input == GameInput::Quit {
                break 'game;
            }
            session.apply_input(game_input, Instant::now());
        }

        session.tick(Instant::now());
        thread::sleep(session.tick_delay());
    }

    info!("quit with score {}", session.score);
    Ok(())
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
