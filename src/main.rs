//! Game Empire - terminal front end
//!
//! Thin shell over the library: every command forwards to [`Arcade`] and
//! prints the result.

#![warn(missing_docs)]

mod cli;
mod play;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use game_empire::{Arcade, EmpireConfig, StorageConfig};
use tracing::{debug, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    // Logs go to stderr so they never interleave with the board on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    debug!(?config, "Starting Game Empire");
    let arcade = Arcade::new(config.open_store());

    match cli.command {
        Command::Login { username } => play::login(&arcade, &username),
        Command::Logout => play::logout(&arcade),
        Command::Status => play::status(&arcade),
        Command::Theme => play::toggle_theme(&arcade),
        Command::Sound => play::toggle_sound(&arcade),
        Command::Click => play::click(&arcade).await,
        Command::Tictactoe { seed } => play::tictactoe(&arcade, seed),
        Command::Multiplayer => play::multiplayer(&arcade),
        Command::Shop => play::shop(&arcade),
        Command::Buy { item } => play::buy(&arcade, item.into()),
        Command::Leaderboard => play::leaderboard(&arcade),
        Command::Achievements => play::achievements(&arcade),
    }
}

/// Reads the config file, then applies command-line overrides.
#[instrument(skip(cli))]
fn load_config(cli: &Cli) -> Result<EmpireConfig> {
    let config = EmpireConfig::load_or_default(&cli.config)?;
    let config = if cli.memory {
        config.with_storage(StorageConfig::Memory)
    } else if let Some(path) = &cli.db_path {
        config.with_storage(StorageConfig::Sqlite { path: path.clone() })
    } else {
        config
    };
    Ok(config)
}
