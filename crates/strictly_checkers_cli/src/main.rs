//! Strictly Checkers - command-line driver
//!
//! Interactive play against the engine, saved-match replay and analysis,
//! and engine-versus-engine matches.

#![warn(missing_docs)]

mod cli;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use render::{render_board, status_line};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use strictly_checkers::{
    EngineSpec, GameSession, Match, MoveError, SavedMatch, SessionConfig, Side, TurnOutcome,
    best_move, try_parse_move,
};
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            depth,
            two_player,
            engine_first,
            save,
        } => run_play(config, depth, two_player, engine_first, save),
        Command::Replay { file, json } => run_replay(&file, json),
        Command::Match {
            games,
            depth_a,
            depth_b,
            max_turns,
            parallel,
        } => run_match(games, depth_a, depth_b, max_turns, parallel),
        Command::Analyze { file, depth } => run_analyze(&file, depth),
    }
}

/// Builds the session configuration from an optional file plus flags.
fn load_config(
    path: Option<PathBuf>,
    depth: Option<u32>,
    two_player: bool,
    engine_first: bool,
) -> Result<SessionConfig> {
    let mut config = match path {
        Some(path) => SessionConfig::from_file(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if let Some(depth) = depth {
        config = config.with_search_depth(depth);
    }
    if two_player {
        config = config.with_engine_side(None);
    } else if engine_first {
        let engine = (*config.engine_side()).unwrap_or(Side::Black);
        config = config
            .with_engine_side(Some(engine))
            .with_first_side(engine);
    }
    config.validate()?;
    Ok(config)
}

/// Interactive game on stdin/stdout.
#[instrument(skip_all)]
fn run_play(
    config: Option<PathBuf>,
    depth: Option<u32>,
    two_player: bool,
    engine_first: bool,
    save: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config, depth, two_player, engine_first)?;
    info!(?config, "Starting interactive game");

    let mut session = GameSession::new(config);
    session.start()?;

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = std::io::stdout();
    let mut last = Instant::now();

    while !session.status().is_over() {
        if session.is_engine_turn() {
            let started = Instant::now();
            let turn = session.play_engine_turn()?;
            session.charge(turn.side, started.elapsed());
            let hops: Vec<String> = turn.hops.iter().map(ToString::to_string).collect();
            println!(
                "{} plays {} (score {:.2}, {} nodes)",
                turn.side,
                hops.join(" | "),
                turn.score,
                turn.nodes
            );
            last = Instant::now();
            continue;
        }

        println!("\n{}{}", render_board(session.board()), status_line(&session));
        print!("> ");
        stdout.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        session.tick(last.elapsed());
        last = Instant::now();

        match line.trim() {
            "" => {}
            "quit" | "exit" => break,
            "pause" => report(session.pause()),
            "resume" => report(session.resume()),
            "skip" => report_turn(session.skip_extra_hops()),
            "moves" => {
                let moves: Vec<String> =
                    session.legal_moves().iter().map(ToString::to_string).collect();
                println!("{}", moves.join("  "));
            }
            text => match try_parse_move(text) {
                Some(mv) => report_turn(session.make_move(mv)),
                None => println!("Expected a move like (5,0)->(4,1), or skip/pause/resume/moves/quit"),
            },
        }
    }

    println!("\n{}{}", render_board(session.board()), status_line(&session));
    if let Some(path) = save {
        session.save_to_path(&path)?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}

fn report<E: std::fmt::Display>(result: Result<(), E>) {
    if let Err(e) = result {
        println!("{}", e);
    }
}

fn report_turn(result: Result<TurnOutcome, MoveError>) {
    match result {
        Ok(TurnOutcome::Continue { from, captures }) => {
            let options: Vec<String> = captures.iter().map(ToString::to_string).collect();
            println!("Keep jumping from {}: {}", from, options.join("  "));
        }
        Ok(TurnOutcome::Passed { next }) => debug!(%next, "Turn passed"),
        Ok(TurnOutcome::GameOver(outcome)) => println!("{}", outcome),
        Err(e) => {
            warn!(error = %e, "Move rejected");
            println!("{}", e);
        }
    }
}

/// Replays a saved match and prints the position.
#[instrument]
fn run_replay(file: &Path, json: bool) -> Result<()> {
    let session = GameSession::load_from_path(SessionConfig::two_player(), file)
        .with_context(|| format!("replaying {}", file.display()))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    } else {
        for line in session.saved_match().lines() {
            println!("{}", line);
        }
        println!("\n{}{}", render_board(session.board()), status_line(&session));
    }
    Ok(())
}

/// Runs an engine match and prints the standings.
#[instrument]
fn run_match(games: u32, depth_a: u32, depth_b: u32, max_turns: u32, parallel: bool) -> Result<()> {
    let mut engines = Match::new(
        EngineSpec::new(format!("depth-{}", depth_a), depth_a),
        EngineSpec::new(format!("depth-{}", depth_b), depth_b),
    )
    .with_games(games)
    .with_max_turns(max_turns)
    .with_parallel_search(parallel);
    let report = engines.run()?;

    for game in &report.games {
        println!(
            "Game {}: {} (red) vs {} (black): {} after {} turns",
            game.number, game.red, game.black, game.outcome, game.turns
        );
    }
    for (name, points) in &report.scores {
        println!("{}: {}", name, points);
    }
    match &report.winner {
        Some(name) => println!("Winner: {}", name),
        None => println!("Match tied"),
    }
    Ok(())
}

/// Prints the engine's best move for the side to move in a saved match.
#[instrument]
fn run_analyze(file: &Path, depth: u32) -> Result<()> {
    let saved = SavedMatch::load_from_path(file)?;
    let session = GameSession::load(SessionConfig::two_player(), &saved)?;
    println!("{}{}", render_board(session.board()), status_line(&session));
    if session.status().is_over() {
        return Ok(());
    }

    let depth = i32::try_from(depth).context("depth out of range")?;
    let limits = session.config().search_limits();
    let result = best_move(session.board(), session.to_move(), depth, limits)?;
    match result.best_move {
        Some(mv) => println!(
            "Best for {}: {} (score {:.2}, {} nodes)",
            session.to_move(),
            mv,
            result.score,
            result.nodes
        ),
        None => println!("{} has no legal move", session.to_move()),
    }
    Ok(())
}
