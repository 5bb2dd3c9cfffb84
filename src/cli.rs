//! Command-line interface for game_empire.

use clap::{Parser, Subcommand, ValueEnum};
use game_empire::{DEFAULT_CONFIG_FILE, ShopItem};

/// Game Empire - click challenge, tic-tac-toe, shop and leaderboard
#[derive(Parser, Debug)]
#[command(name = "game_empire")]
#[command(about = "Mini-game arcade with coins, achievements and a leaderboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: std::path::PathBuf,

    /// Override the SQLite database path
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Keep everything in memory for this run
    #[arg(long, global = true, conflicts_with = "db_path")]
    pub memory: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in (creates the profile on first use)
    Login {
        /// Username
        username: String,
    },

    /// Log out and wipe all stored progress
    Logout,

    /// Show the current profile
    Status,

    /// Toggle between dark and light theme
    Theme,

    /// Toggle sound on or off
    Sound,

    /// Play the 15-second click challenge (press Enter to click)
    Click,

    /// Play tic-tac-toe against the AI
    Tictactoe {
        /// Seed the AI for a reproducible game
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play tic-tac-toe with two players on this terminal
    Multiplayer,

    /// List items for sale
    Shop,

    /// Buy an item
    Buy {
        /// Item to buy
        #[arg(value_enum)]
        item: ItemArg,
    },

    /// Show the 20 most recent scores
    Leaderboard,

    /// List unlocked achievements
    Achievements,
}

/// Shop items selectable on the command line.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ItemArg {
    /// Elite Badge
    EliteBadge,
}

impl From<ItemArg> for ShopItem {
    fn from(item: ItemArg) -> Self {
        match item {
            ItemArg::EliteBadge => ShopItem::EliteBadge,
        }
    }
}
