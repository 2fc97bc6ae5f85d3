//! Strictly Darts - voice-scored darts for two players.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use strictly_darts::{
    Cli, Command, DigitExtractor, HistoryStore, JsonFileStore, MatchConfig, MatchSession,
    RecognizerChoice, Seat, VoicePipeline,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            starting_score,
            recognizer,
            history,
            first_player,
        } => run_play(config, starting_score, recognizer, history, first_player),
        Command::History { history } => run_history(history),
    }
}

/// Run one match to completion
fn run_play(
    config_path: Option<PathBuf>,
    starting_score: Option<u32>,
    recognizer: String,
    history: PathBuf,
    first_player: Option<u8>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => MatchConfig::from_file(path)?,
        None => MatchConfig::default(),
    };
    if let Some(score) = starting_score {
        config = config.with_starting_score(score);
    }

    let choice: RecognizerChoice = recognizer
        .parse()
        .map_err(|_| anyhow::anyhow!("Unknown recognizer selection: {}", recognizer))?;

    let starting_seat = match first_player {
        None => None,
        Some(1) => Some(Seat::One),
        Some(2) => Some(Seat::Two),
        Some(other) => anyhow::bail!("first-player must be 1 or 2, got {}", other),
    };

    info!(?choice, starting_score = *config.starting_score(), "Starting match");

    let mut voice = VoicePipeline::console(choice);
    let extractor = DigitExtractor::new();
    let store = JsonFileStore::new(history);

    let mut session = MatchSession::new(&mut voice, &extractor, &store, config);
    if let Some(seat) = starting_seat {
        session = session.with_starting_seat(seat);
    }

    let report = session.run()?;
    info!(
        winner = %report.winner(),
        turns = report.turns(),
        timestamp = %report.timestamp(),
        "Match recorded"
    );
    Ok(())
}

/// Print the recorded match log
fn run_history(history: PathBuf) -> Result<()> {
    let store = JsonFileStore::new(history);
    let log = store.load()?;

    if log.is_empty() {
        println!("No matches recorded yet");
        return Ok(());
    }

    for (timestamp, turns) in &log {
        println!("{}", timestamp);
        for turn in turns {
            let throws = turn
                .throws()
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            println!("  {}: {}", turn.player(), throws);
        }
    }
    Ok(())
}
