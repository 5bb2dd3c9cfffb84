//! Tests for the SQLite key/value backend and the stores built on it.

use tempfile::NamedTempFile;

use game_empire::{
    Arcade, EmpireConfig, KeyValueStore, Profile, ProfileStore, ScoreEntry, ScoreStore,
    SqliteStore, StorageConfig, Theme, keys,
};

/// Creates a temporary database file with the schema applied. The file
/// handle must stay in scope to keep the file alive.
fn setup_test_db() -> (NamedTempFile, SqliteStore) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let store = SqliteStore::open(db_path).expect("Failed to open store");
    (db_file, store)
}

#[test]
fn test_get_missing_key() {
    let (_db, store) = setup_test_db();
    assert_eq!(store.get("nope").expect("Get failed"), None);
}

#[test]
fn test_set_then_get() {
    let (_db, store) = setup_test_db();
    store.set(keys::COINS, "15").expect("Set failed");
    assert_eq!(
        store.get(keys::COINS).expect("Get failed").as_deref(),
        Some("15")
    );
}

#[test]
fn test_set_overwrites() {
    let (_db, store) = setup_test_db();
    store.set(keys::THEME, "dark").expect("Set failed");
    store.set(keys::THEME, "light").expect("Set failed");
    assert_eq!(
        store.get(keys::THEME).expect("Get failed").as_deref(),
        Some("light")
    );
}

#[test]
fn test_remove_and_clear() {
    let (_db, store) = setup_test_db();
    store.set("a", "1").expect("Set failed");
    store.set("b", "2").expect("Set failed");

    store.remove("a").expect("Remove failed");
    assert_eq!(store.get("a").expect("Get failed"), None);
    assert!(store.get("b").expect("Get failed").is_some());

    store.clear().expect("Clear failed");
    assert_eq!(store.get("b").expect("Get failed"), None);
}

#[test]
fn test_reopen_keeps_data() {
    let (db, store) = setup_test_db();
    store.set(keys::USER, "kim").expect("Set failed");

    let reopened =
        SqliteStore::open(store.db_path().to_string()).expect("Failed to reopen store");
    assert_eq!(
        reopened.get(keys::USER).expect("Get failed").as_deref(),
        Some("kim")
    );
    drop(db);
}

#[test]
fn test_profile_survives_restart() {
    let (_db, store) = setup_test_db();
    let profile = Profile::new("lee".to_string())
        .with_coin_balance(75)
        .with_achievements(vec!["Strategist".to_string()])
        .with_theme(Theme::Light)
        .with_sound_enabled(false);
    ProfileStore::new(store.clone())
        .save(&profile)
        .expect("Save failed");

    let restarted = SqliteStore::open(store.db_path().to_string()).expect("Reopen failed");
    assert_eq!(ProfileStore::new(restarted).load(), Some(profile));
}

#[test]
fn test_ledger_survives_restart() {
    let (_db, store) = setup_test_db();
    let scores = ScoreStore::new(store.clone());
    scores
        .record(ScoreEntry::new("max".into(), "Click".into(), 12))
        .expect("Record failed");

    let restarted = SqliteStore::open(store.db_path().to_string()).expect("Reopen failed");
    let list = ScoreStore::new(restarted).list();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].username(), "max");
}

#[test]
fn test_configured_arcade_persists_click_results() {
    let (_db, store) = setup_test_db();
    let config = EmpireConfig::default().with_storage(StorageConfig::Sqlite {
        path: store.db_path().to_string(),
    });

    let first = Arcade::new(config.open_store());
    first.login("ines").expect("Login failed");
    let mut session = first.click_session();
    session.start();
    for _ in 0..3 {
        session.click();
    }
    while session.remaining() > 0 {
        session.tick();
    }

    let second = Arcade::new(config.open_store());
    assert_eq!(second.profile().username().as_deref(), Some("ines"));
    assert_eq!(second.profile().coin_balance(), 3);
    assert_eq!(second.leaderboard()[0].to_string(), "ines - Click - 3");
}
