// Terminal Sokoban session with ratatui
// Controls: W/A/S/D or arrow keys move, U undo, H hint, R restart level, X reset, Q quit.
// Tiles: '#' wall, '@' player, '$' box, '.' target, '*' box on target, '+' player on target, ' ' floor.

use clap::{Parser, Subcommand};
use log::{info, warn};
use puzzle_session::console_interface::{
    ConsoleInput, cleanup_terminal, handle_input, render_game, render_game_to_string,
    setup_terminal,
};
use puzzle_session::core::{COUNTDOWN_INTERVAL_MS, MAX_SOLVER_NODES};
use puzzle_session::game::{PuzzleGame, SokobanGame};
use puzzle_session::levels::{LevelPack, LevelProvider, format_solution};
use puzzle_session::models::GameRenderState;
use puzzle_session::session::{
    CompletionPayload, Difficulty, SessionCommand, SessionConfig, SessionController,
    SessionObserver, SessionPhase,
};
use puzzle_session::state_graph::solve;
use puzzle_session::ticker::Ticker;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(version, about = "Timed Sokoban sessions in the terminal")]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,

    /// Difficulty tier selected at startup
    #[arg(short, long, value_enum, default_value_t = Difficulty::Moderate)]
    difficulty: Difficulty,

    /// JSON level pack to use instead of the built-in levels
    #[arg(short, long)]
    levels: Option<PathBuf>,

    /// Write the log to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Rejected moves cost a life
    #[arg(long)]
    charge_illegal_moves: bool,

    /// Maximum number of undo steps kept per level
    #[arg(long)]
    undo_cap: Option<usize>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Mode {
    /// Play interactively (default)
    Play,
    /// Print a shortest solution for every level of the selected tier
    Solve,
}

/// Logs the completion payload; score upload would hook in here.
struct CompletionLog;

impl SessionObserver for CompletionLog {
    fn on_game_complete(&mut self, payload: &CompletionPayload) {
        info!(
            "Game complete: {:?} score {} ({} levels, {} moves, {}s)",
            payload.ending,
            payload.final_score,
            payload.levels_completed,
            payload.total_moves,
            payload.duration_seconds
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let pack = match &cli.levels {
        Some(path) => LevelPack::from_file(path)?,
        None => LevelPack::builtin(),
    };
    let mut config = SessionConfig {
        undo_capacity: cli.undo_cap,
        charge_illegal_moves: cli.charge_illegal_moves,
        ..SessionConfig::default()
    };
    pack.apply_settings(&mut config);

    match cli.mode.unwrap_or(Mode::Play) {
        Mode::Solve => run_solver(&pack, cli.difficulty),
        Mode::Play => {
            let session = SessionController::<SokobanGame>::new(pack, config, cli.difficulty)
                .with_observer(CompletionLog);
            let mut terminal = setup_terminal()?;
            let result = run_interactive(session, &mut terminal);
            cleanup_terminal()?;
            result
        }
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(path) = log_file {
        let log_out = std::fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(log_out)));
    }
    builder.init();
    Ok(())
}

fn run_solver(pack: &LevelPack, difficulty: Difficulty) -> Result<(), Box<dyn std::error::Error>> {
    for level in pack.levels(difficulty)? {
        let game = SokobanGame::load(&level, None)?;
        println!("{} (par {}):", level.name, level.par_moves);
        println!("{}", render_game_to_string(game.shared(), game.state()));
        match solve(game.shared(), game.state(), MAX_SOLVER_NODES) {
            Some(solution) => println!(
                "Solved in {} moves, {} pushes: {}\n",
                solution.len(),
                solution.pushes(),
                format_solution(&solution.steps)
            ),
            None => println!("No solution found within {} states\n", MAX_SOLVER_NODES),
        }
    }
    Ok(())
}

fn run_interactive(
    mut session: SessionController<SokobanGame>,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (tick_sender, tick_receiver) = mpsc::channel();
    let mut ticker: Option<Ticker> = None;
    let mut message: Option<String> = None;

    loop {
        // Keep exactly one ticker alive, for the countdown the session currently runs.
        if session.timer_token() != ticker.as_ref().map(Ticker::token) {
            ticker = session.timer_token().map(|token| {
                Ticker::spawn(
                    token,
                    Duration::from_millis(COUNTDOWN_INTERVAL_MS),
                    tick_sender.clone(),
                )
            });
        }

        render_game(terminal, &render_state(&session, message.clone()))?;

        match handle_input(Duration::from_millis(50))? {
            ConsoleInput::Quit => break,
            ConsoleInput::Command(command) => {
                message = apply_command(&mut session, command);
            }
            ConsoleInput::Timeout | ConsoleInput::Unknown => {}
        }

        while let Ok(token) = tick_receiver.try_recv() {
            session.tick(token);
        }
    }

    Ok(())
}

fn apply_command(
    session: &mut SessionController<SokobanGame>,
    command: SessionCommand<puzzle_session::core::Direction>,
) -> Option<String> {
    match command {
        SessionCommand::UseHint => match session.use_hint() {
            Some(direction) => Some(format!("Hint: move {direction:?}")),
            None => Some("No hint available".to_string()),
        },
        SessionCommand::Submit(direction) => {
            session.submit(direction)?;
            session
                .game()
                .and_then(SokobanGame::last_rejection)
                .map(|reason| format!("Error: {reason}"))
        }
        command => match session.dispatch(command) {
            Ok(_) => None,
            Err(err) => {
                warn!("Cannot apply {command:?}: {err}");
                Some(format!("Error: {err}"))
            }
        },
    }
}

fn render_state(session: &SessionController<SokobanGame>, message: Option<String>) -> GameRenderState {
    let game = session.game();
    GameRenderState {
        board: game
            .map(|game| render_game_to_string(game.shared(), game.state()))
            .unwrap_or_default(),
        level_name: (session.phase() == SessionPhase::Playing)
            .then(|| format!("Level {}", session.stats().level_index + 1)),
        phase: session.phase(),
        difficulty: session.difficulty(),
        stats: *session.stats(),
        message,
        last_change: game.and_then(SokobanGame::last_change),
    }
}
