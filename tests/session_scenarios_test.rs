//! End-to-end session scenarios through the arcade facade.

use std::collections::VecDeque;

use game_empire::{
    Arcade, Board, CLICK_DURATION_SECS, Cell, MemoryStore, Mark, MoveReport, Opponent, Outcome,
    Phase, ScoreEntry, TickReport,
};

/// Opponent replaying a fixed list of cells.
struct Scripted(VecDeque<Cell>);

impl Scripted {
    fn new(cells: &[Cell]) -> Self {
        Self(cells.iter().copied().collect())
    }
}

impl Opponent for Scripted {
    fn choose(&mut self, _board: &Board) -> Option<Cell> {
        self.0.pop_front()
    }
}

fn arcade() -> Arcade<MemoryStore> {
    let arcade = Arcade::new(MemoryStore::new());
    arcade.login("olga").unwrap();
    arcade
}

/// Human takes the middle column while the script plays 0 then 6.
fn win_middle_column(arcade: &Arcade<MemoryStore>) -> MoveReport {
    let mut game = arcade.single_player(Scripted::new(&[Cell::TopLeft, Cell::BottomLeft]));
    assert!(game.start());
    game.play(Cell::Center);
    game.play(Cell::TopCenter);
    let report = game.play(Cell::BottomCenter);
    assert_eq!(game.phase(), Phase::Ended);
    report
}

#[test]
fn test_click_challenge_with_23_clicks() {
    let arcade = arcade();
    let mut session = arcade.click_session();
    session.start();
    for _ in 0..23 {
        assert!(session.click());
    }

    let mut last = TickReport::Ignored;
    for _ in 0..CLICK_DURATION_SECS {
        last = session.tick();
    }

    assert!(matches!(last, TickReport::Finished(_)));
    assert_eq!(arcade.profile().coin_balance(), 23);
    assert_eq!(
        arcade.leaderboard(),
        vec![ScoreEntry::new("olga".into(), "Click".into(), 23)]
    );
    assert!(
        arcade
            .profile()
            .achievements()
            .contains(&"Speed Demon".to_string())
    );
}

#[test]
fn test_beating_the_ai_pays_once_per_win() {
    let arcade = arcade();

    let report = win_middle_column(&arcade);
    assert_eq!(report.outcome(), Some(Outcome::Win(Mark::X)));
    assert_eq!(arcade.profile().coin_balance(), 25);
    assert_eq!(
        arcade.leaderboard(),
        vec![ScoreEntry::new("olga".into(), "TicTacToe".into(), 50)]
    );
    assert_eq!(arcade.profile().achievements(), vec!["Strategist".to_string()]);

    win_middle_column(&arcade);
    assert_eq!(arcade.profile().coin_balance(), 50);
    assert_eq!(arcade.leaderboard().len(), 2);
    assert_eq!(arcade.profile().achievements(), vec!["Strategist".to_string()]);
}

#[test]
fn test_winning_move_gets_no_reply() {
    let arcade = arcade();
    let report = win_middle_column(&arcade);
    assert_eq!(
        report,
        MoveReport::Accepted {
            outcome: Outcome::Win(Mark::X),
            reply: None
        }
    );
}

#[test]
fn test_anonymous_win_pays_coins_but_no_ledger() {
    let arcade = Arcade::new(MemoryStore::new());
    win_middle_column(&arcade);
    assert_eq!(arcade.profile().coin_balance(), 25);
    assert!(arcade.leaderboard().is_empty());
}

#[test]
fn test_multiplayer_x_win_unlocks_without_coins() {
    let arcade = arcade();
    let mut game = arcade.multiplayer();
    game.start();
    // X: 0, 4, 8   O: 1, 2
    for cell in [
        Cell::TopLeft,
        Cell::TopCenter,
        Cell::Center,
        Cell::TopRight,
        Cell::BottomRight,
    ] {
        assert!(game.play(cell).is_accepted());
    }
    assert_eq!(game.outcome(), Outcome::Win(Mark::X));
    assert!(
        arcade
            .profile()
            .achievements()
            .contains(&"Multiplayer Winner".to_string())
    );
    assert_eq!(arcade.profile().coin_balance(), 0);
    assert!(arcade.leaderboard().is_empty());
}

#[test]
fn test_logout_wipes_everything() {
    let arcade = arcade();
    win_middle_column(&arcade);
    arcade.logout().unwrap();

    assert_eq!(arcade.profile().load(), None);
    assert_eq!(arcade.profile().coin_balance(), 0);
    assert!(arcade.profile().achievements().is_empty());
    assert!(arcade.leaderboard().is_empty());
}

#[test]
fn test_shop_spends_session_winnings() {
    let arcade = arcade();
    for _ in 0..4 {
        win_middle_column(&arcade);
    }
    assert_eq!(arcade.profile().coin_balance(), 100);
    assert_eq!(
        arcade.shop().buy(game_empire::ShopItem::EliteBadge).unwrap(),
        0
    );
    assert!(arcade.shop().buy(game_empire::ShopItem::EliteBadge).is_err());
}
