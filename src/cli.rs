//! Command-line interface for strictly_darts.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Darts - voice-scored darts for two players
#[derive(Parser, Debug)]
#[command(name = "strictly_darts")]
#[command(about = "Score a two-player darts match from spoken input", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score one match from start to finish
    Play {
        /// Path to a TOML file with match rules
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Points each player starts from (overrides the config file)
        #[arg(long)]
        starting_score: Option<u32>,

        /// Recognizer selection: primary-only, secondary-only, primary-with-fallback
        #[arg(long, default_value = "primary-with-fallback")]
        recognizer: String,

        /// Path of the match history file
        #[arg(long, default_value = "history.json")]
        history: PathBuf,

        /// Seat that throws first (1 or 2); flips a coin when omitted
        #[arg(long)]
        first_player: Option<u8>,
    },

    /// Print the matches recorded in the history file
    History {
        /// Path of the match history file
        #[arg(long, default_value = "history.json")]
        history: PathBuf,
    },
}
