//! Wizard duel terminal client.
//!
//! Composition root: reads configuration from the environment, loads content,
//! sets up logging, then plays duels on stdin/stdout until the player quits.
mod config;
mod input;
mod logging;
mod observer;
mod terminal;

use anyhow::{Context, Result};
use game_content::{ConfigLoader, ContentFactory, SpellLoader};
use game_core::{GameConfig, SpellCatalog};
use runtime::{GameSession, Pacing, RuntimeConfig, RuntimeError};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use config::ClientConfig;
use input::{Command, parse_line};
use terminal::TerminalHost;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let (_guard, _log_dir) = logging::setup_logging(config.log_dir.as_deref())?;

    let game_config = load_game_config(&config)?;
    let spells = load_spells(&config)?;
    tracing::info!(
        width = game_config.width,
        height = game_config.height,
        spells = spells.len(),
        ai = ?config.ai_players,
        "content loaded"
    );

    let (input_tx, mut input_rx) = mpsc::channel(32);
    let (answer_tx, answer_rx) = mpsc::channel(4);
    tokio::spawn(read_stdin(input_tx, answer_tx));

    let runtime_config = RuntimeConfig {
        ai_players: config.ai_players.clone(),
        game_seed: config.seed.unwrap_or_else(rand::random),
        pacing: if config.fast {
            Pacing::instant()
        } else {
            Pacing::default()
        },
        ..RuntimeConfig::default()
    };

    let mut session = GameSession::builder(TerminalHost::new(answer_rx))
        .game_config(game_config)
        .spells(spells)
        .runtime_config(runtime_config)
        .build()?;
    let _event_log = observer::spawn_event_log(session.events());

    print_help();
    loop {
        match session.run(&mut input_rx).await {
            Ok(result) => tracing::info!(winner = %result.winner, turns = result.turns, "duel finished"),
            Err(RuntimeError::InputClosed) => {
                tracing::info!("input closed, leaving");
                return Ok(());
            }
            Err(RuntimeError::Stalled { passes }) => {
                println!("\n*** Stalemate: nobody acted for {passes} turns ***");
            }
            Err(error) => return Err(error).context("duel aborted"),
        }

        if !session.host().ask("Play again?").await {
            return Ok(());
        }
        session.restart(config.seed.unwrap_or_else(rand::random))?;
    }
}

fn load_game_config(config: &ClientConfig) -> Result<GameConfig> {
    match (&config.config_path, &config.data_dir) {
        (Some(path), _) => ConfigLoader::load(path),
        (None, Some(dir)) => ContentFactory::new(dir).load_config(),
        (None, None) => ConfigLoader::embedded(),
    }
}

fn load_spells(config: &ClientConfig) -> Result<SpellCatalog> {
    match (&config.spells_path, &config.data_dir) {
        (Some(path), _) => SpellLoader::load(path),
        (None, Some(dir)) => ContentFactory::new(dir).load_spells(),
        (None, None) => SpellLoader::embedded(),
    }
}

/// Forwards stdin lines as session inputs and prompt answers. Returning
/// drops both senders, which ends the session loop.
async fn read_stdin(inputs: mpsc::Sender<runtime::Input>, answers: mpsc::Sender<bool>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(error) => {
                tracing::warn!(%error, "failed to read stdin");
                break;
            }
        };

        for command in parse_line(&line) {
            let delivered = match command {
                Command::Input(input) => inputs.send(input).await.is_ok(),
                Command::Answer(answer) => answers.try_send(answer).is_ok() || !answers.is_closed(),
                Command::Quit => return,
            };
            if !delivered {
                return;
            }
        }
    }
}

fn print_help() {
    println!("Wizard Duel");
    println!("  move cursor: q w e / a d / z x c    select/confirm: s or Enter");
    println!("  menu: 1-9    cancel: k    pause: p    answer: y / n    quit: quit");
}
