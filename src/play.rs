//! Terminal rendering and input for each command.

use anyhow::Result;
use game_empire::{
    Arcade, CLICK_DURATION_SECS, Cell, KeyValueStore, Mark, MoveReport, Outcome, Phase,
    ProfileError, RandomOpponent, STRATEGIST_COINS, ShopItem, drive_click_session,
};
use std::io::{BufRead, Write};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, instrument};

/// Stores the username and prints the profile.
pub fn login<S: KeyValueStore + Clone>(arcade: &Arcade<S>, username: &str) -> Result<()> {
    let profile = arcade.login(username)?;
    println!(
        "Welcome, {}! Coins: {}",
        profile.username(),
        profile.coin_balance()
    );
    Ok(())
}

/// Wipes stored progress.
pub fn logout<S: KeyValueStore + Clone>(arcade: &Arcade<S>) -> Result<()> {
    arcade.logout()?;
    println!("Logged out. All progress cleared.");
    Ok(())
}

/// Prints profile fields.
pub fn status<S: KeyValueStore + Clone>(arcade: &Arcade<S>) -> Result<()> {
    let profile = arcade.profile();
    match profile.load() {
        Some(p) => {
            println!("User:         {}", p.username());
            println!("Coins:        {}", p.coin_balance());
            println!("Theme:        {}", p.theme());
            println!("Sound:        {}", if *p.sound_enabled() { "on" } else { "off" });
            println!("Achievements: {}", p.achievements().len());
        }
        None => {
            println!("Not logged in. Scores are not recorded until you log in.");
            println!("Coins: {}", profile.coin_balance());
        }
    }
    Ok(())
}

/// Flips the theme.
pub fn toggle_theme<S: KeyValueStore + Clone>(arcade: &Arcade<S>) -> Result<()> {
    let theme = arcade.profile().toggle_theme()?;
    println!("Theme: {}", theme);
    Ok(())
}

/// Flips the sound preference.
pub fn toggle_sound<S: KeyValueStore + Clone>(arcade: &Arcade<S>) -> Result<()> {
    let enabled = arcade.profile().toggle_sound()?;
    println!("Sound: {}", if enabled { "on" } else { "off" });
    Ok(())
}

/// Runs the click challenge, one click per line read from stdin.
#[instrument(skip(arcade))]
pub async fn click<S: KeyValueStore + Clone>(arcade: &Arcade<S>) -> Result<()> {
    println!(
        "Click Challenge: press Enter as many times as you can in {} seconds!",
        CLICK_DURATION_SECS
    );

    // A plain thread: a blocked stdin read must not hold up runtime shutdown.
    let (tx, rx) = mpsc::channel(64);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            if line.is_err() || tx.blocking_send(()).is_err() {
                break;
            }
        }
        debug!("Click reader finished");
    });

    let mut session = arcade.click_session();
    match drive_click_session(&mut session, rx, Duration::from_secs(1)).await {
        Some(summary) => {
            println!("Time! Score: {}", summary.score());
            println!("Coins: {}", summary.coin_balance());
            if *summary.speed_demon_unlocked() {
                println!("Achievement unlocked: Speed Demon");
            }
            if !summary.recorded() {
                println!("Log in to put your scores on the leaderboard.");
            }
        }
        None => println!("Click challenge abandoned."),
    }
    Ok(())
}

/// Reads cells from stdin until one parses. `None` on end of input.
fn prompt_cell(
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
    who: &str,
) -> Result<Option<Cell>> {
    loop {
        print!("{} move (1-9): ", who);
        std::io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(None);
        };
        match Cell::parse(&line?) {
            Some(cell) => return Ok(Some(cell)),
            None => println!("Enter a number from 1 to 9."),
        }
    }
}

/// Plays against the random AI.
#[instrument(skip(arcade))]
pub fn tictactoe<S: KeyValueStore + Clone>(arcade: &Arcade<S>, seed: Option<u64>) -> Result<()> {
    let opponent = match seed {
        Some(seed) => RandomOpponent::seeded(seed),
        None => RandomOpponent::from_os_rng(),
    };
    let mut game = arcade.single_player(opponent);
    game.start();

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    while game.phase() == Phase::Running {
        println!("\n{}\n", game.board().display());
        let Some(cell) = prompt_cell(&mut lines, "Your")? else {
            println!("\nGame abandoned.");
            return Ok(());
        };
        match game.play(cell) {
            MoveReport::Ignored => println!("{} is taken.", cell),
            MoveReport::Accepted {
                reply: Some(reply), ..
            } => println!("AI plays {}.", reply),
            MoveReport::Accepted { .. } => {}
        }
    }

    println!("\n{}\n", game.board().display());
    match game.outcome() {
        Outcome::Win(Mark::X) => println!("You win! +{} coins", STRATEGIST_COINS),
        Outcome::Win(_) => println!("The AI wins."),
        Outcome::Draw => println!("Draw."),
        Outcome::InProgress => {}
    }
    Ok(())
}

/// Two players alternate on one terminal.
#[instrument(skip(arcade))]
pub fn multiplayer<S: KeyValueStore + Clone>(arcade: &Arcade<S>) -> Result<()> {
    let mut game = arcade.multiplayer();
    game.start();

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    while game.phase() == Phase::Running {
        println!("\n{}\n", game.board().display());
        let who = format!("Player {}", game.to_move());
        let Some(cell) = prompt_cell(&mut lines, &who)? else {
            println!("\nGame abandoned.");
            return Ok(());
        };
        if game.play(cell) == MoveReport::Ignored {
            println!("{} is taken.", cell);
        }
    }

    println!("\n{}\n", game.board().display());
    println!("{}", game.outcome());
    Ok(())
}

/// Lists the catalog with prices.
pub fn shop<S: KeyValueStore + Clone>(arcade: &Arcade<S>) -> Result<()> {
    let shop = arcade.shop();
    println!("Coins: {}", arcade.profile().coin_balance());
    for item in shop.catalog() {
        let note = if shop.can_afford(item) { "" } else { "  (not enough coins)" };
        println!("- {}{}", item, note);
    }
    Ok(())
}

/// Buys one item.
pub fn buy<S: KeyValueStore + Clone>(arcade: &Arcade<S>, item: ShopItem) -> Result<()> {
    match arcade.shop().buy(item) {
        Ok(remaining) => println!("Bought {}. Coins left: {}", item.name(), remaining),
        Err(ProfileError::InsufficientFunds { balance, requested }) => {
            println!("{} costs {} coins; you have {}.", item.name(), requested, balance)
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Prints ledger rows, newest first.
pub fn leaderboard<S: KeyValueStore + Clone>(arcade: &Arcade<S>) -> Result<()> {
    let rows = arcade.leaderboard();
    if rows.is_empty() {
        println!("No scores yet.");
    }
    for row in rows {
        println!("{}", row);
    }
    Ok(())
}

/// Prints unlocked achievements.
pub fn achievements<S: KeyValueStore + Clone>(arcade: &Arcade<S>) -> Result<()> {
    let unlocked = arcade.profile().achievements();
    if unlocked.is_empty() {
        println!("No achievements unlocked yet.");
    }
    for name in unlocked {
        println!("* {}", name);
    }
    Ok(())
}
