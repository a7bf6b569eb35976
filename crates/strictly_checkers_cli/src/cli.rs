//! Command-line interface for the checkers engine.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Checkers - play, replay and benchmark a checkers engine
#[derive(Parser, Debug)]
#[command(name = "checkers")]
#[command(about = "Checkers engine with alpha-beta search", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game, reading moves like "(5,0)->(4,1)" from stdin
    Play {
        /// Session configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Engine search depth (overrides the config file)
        #[arg(short, long)]
        depth: Option<u32>,

        /// Two human players, no engine
        #[arg(long, conflicts_with = "engine_first")]
        two_player: bool,

        /// Let the engine move first
        #[arg(long)]
        engine_first: bool,

        /// Write the match here when the game ends or on quit
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Load a saved match and print the resulting position
    Replay {
        /// Saved match file
        file: PathBuf,

        /// Print the session snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run an engine-versus-engine match
    Match {
        /// Number of games
        #[arg(short, long, default_value = "3")]
        games: u32,

        /// Search depth of the first engine
        #[arg(long, default_value = "2")]
        depth_a: u32,

        /// Search depth of the second engine
        #[arg(long, default_value = "3")]
        depth_b: u32,

        /// Turn cap per game; reaching it is a draw
        #[arg(long, default_value = "100")]
        max_turns: u32,

        /// Search root moves in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// Load a saved match and print the engine's choice for the side to move
    Analyze {
        /// Saved match file
        file: PathBuf,

        /// Search depth
        #[arg(short, long, default_value = "4")]
        depth: u32,
    },
}
