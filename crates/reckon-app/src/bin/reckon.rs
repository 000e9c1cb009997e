//! Terminal front end for Reckon.
//!
//! Reads one command per line:
//!
//! | input       | action                          |
//! |-------------|---------------------------------|
//! | `1`-`9`     | pick the tile in that slot      |
//! | `+ - * /`   | pick an operation               |
//! | `u`         | undo the last move              |
//! | `r`         | restart the level               |
//! | `c`         | clear the selection             |
//! | `h`         | show a hint                     |
//! | `l N`       | jump to level N                 |
//! | `q`         | quit                            |
//!
//! Once the target is reached, an empty line moves on to the next level.

use std::{
    io::{self, BufRead as _},
    sync::mpsc::{self, RecvTimeoutError},
    thread,
    time::{Duration, Instant},
};

use clap::Parser as _;
use reckon_app::{
    AppConfig, FileStore, GameController, KeyValueStore, LevelProgression, MemoryStore,
    ProgressStore, StoreError, block_on,
};
use reckon_core::{Operation, Tile};
use reckon_game::{PickOutcome, Selection, Session};
use reckon_levels::LevelDataError;

const TICK: Duration = Duration::from_millis(50);

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
enum AppError {
    #[display("failed to load levels: {_0}")]
    Levels(#[from] LevelDataError),
    #[display("failed to open progress store: {_0}")]
    Store(#[from] StoreError),
}

fn main() -> Result<(), AppError> {
    better_panic::install();
    env_logger::init();

    let config = AppConfig::parse();
    if config.in_memory {
        run(&config, MemoryStore::new())
    } else {
        run(&config, FileStore::open(&config.data_dir)?)
    }
}

fn run<S>(config: &AppConfig, store: S) -> Result<(), AppError>
where
    S: KeyValueStore + Clone + 'static,
{
    let resolver = config.resolver()?;
    let progression = block_on(LevelProgression::load(ProgressStore::new(store)));
    let mut game = GameController::new(resolver, progression, config.session_settings());
    if let Some(Err(e)) = config.level.map(|level| game.select_level(level)) {
        log::warn!("ignoring start level: {e}");
    }

    let lines = spawn_stdin_reader();
    render(&game);
    loop {
        match lines.recv_timeout(TICK) {
            Ok(line) => {
                if !handle_line(&mut game, line.trim()) {
                    break;
                }
                render(&game);
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        if game.tick(Instant::now()) {
            render(&game);
        }
    }

    game.flush();
    Ok(())
}

fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Applies one command. Returns `false` when the player quits.
fn handle_line<S>(game: &mut GameController<S>, line: &str) -> bool
where
    S: KeyValueStore + Clone + 'static,
{
    let now = Instant::now();
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        if game.session().is_won() {
            match game.confirm_win() {
                Ok(advance) => println!("Level {} complete!", advance.completed),
                Err(e) => println!("{e}"),
            }
        }
        return true;
    };

    match command {
        "q" => return false,
        "u" => {
            if !game.undo() {
                println!("Nothing to undo.");
            }
        }
        "r" => game.restart(),
        "c" => game.clear_selection(),
        "h" => match game.hint() {
            Some(hint) => println!("Hint: {hint}"),
            None => println!("No moves left."),
        },
        "l" => match words.next().map(str::parse::<u32>) {
            Some(Ok(level)) => {
                if let Err(e) = game.select_level(level) {
                    println!("{e}");
                }
            }
            _ => println!("Usage: l <level>"),
        },
        _ => {
            if let Ok(slot) = command.parse::<usize>() {
                pick_slot(game, slot, now);
            } else if let Ok(operation) = command.parse::<Operation>() {
                if let Err(e) = game.pick_operation(operation) {
                    println!("{e}");
                }
            } else {
                println!("Unknown command {command:?}.");
            }
        }
    }
    true
}

fn pick_slot<S>(game: &mut GameController<S>, slot: usize, now: Instant)
where
    S: KeyValueStore + Clone + 'static,
{
    let Some(tile) = slot
        .checked_sub(1)
        .and_then(|position| game.session().tile_at(position))
        .copied()
    else {
        println!("Slot {slot} is empty.");
        return;
    };
    match game.pick_tile(tile.id(), now) {
        Ok(PickOutcome::Rejected(invalid)) => println!("Invalid move: {}", invalid.error),
        Ok(_) => {}
        Err(e) => println!("{e}"),
    }
}

fn render<S>(game: &GameController<S>)
where
    S: KeyValueStore + Clone + 'static,
{
    let session = game.session();
    println!();
    println!("Level {}  target {}", game.level(), session.target());

    let layout = session.layout();
    let mut slot = 0;
    for row in layout.rows() {
        let cells: Vec<String> = row
            .iter()
            .map(|tile| {
                slot += 1;
                render_slot(session, slot, tile.as_ref())
            })
            .collect();
        println!("  {}", cells.join("  "));
    }

    match session.selection() {
        Selection::Empty => {}
        Selection::FirstPicked(tile) => println!("  {}", tile.value()),
        Selection::FirstAndOperation(tile, operation) => {
            println!("  {} {operation}", tile.value());
        }
    }
    if session.is_won() {
        println!("Solved! Press Enter for the next level.");
    }
}

fn render_slot(session: &Session, slot: usize, tile: Option<&Tile>) -> String {
    match tile {
        Some(tile) if session.selection().is_selected(tile.id()) => {
            format!("{slot}:>{:>4}<", tile.value())
        }
        Some(tile) => format!("{slot}:[{:>4}]", tile.value()),
        None => format!("{slot}:[    ]"),
    }
}
