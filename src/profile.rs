//! Player profile: identity, coins, achievements and display preferences.

use derive_getters::Getters;
use derive_more::{Display, Error, From};
use std::collections::HashSet;
use std::str::FromStr;
use tracing::{debug, info, instrument, warn};

use crate::storage::{KeyValueStore, StorageError, keys};

/// Colour theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    /// Dark theme (default).
    #[default]
    Dark,
    /// Light theme.
    Light,
}

impl Theme {
    /// Returns the other theme.
    #[instrument]
    pub fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Durable per-user record.
///
/// Two profiles are equal when their achievement *sets* match; the stored
/// order only drives display.
#[derive(Debug, Clone, Getters)]
pub struct Profile {
    /// Login name.
    username: String,
    /// Coins available to spend.
    coin_balance: u64,
    /// Unlocked achievement names, in unlock order.
    achievements: Vec<String>,
    /// Colour theme.
    theme: Theme,
    /// Whether sound effects play.
    sound_enabled: bool,
}

impl Profile {
    /// Creates a fresh profile with default balance and preferences.
    #[instrument(skip(username), fields(username = %username))]
    pub fn new(username: String) -> Self {
        Self {
            username,
            coin_balance: 0,
            achievements: Vec::new(),
            theme: Theme::default(),
            sound_enabled: true,
        }
    }

    /// Returns this profile with the given balance.
    pub fn with_coin_balance(mut self, coin_balance: u64) -> Self {
        self.coin_balance = coin_balance;
        self
    }

    /// Returns this profile with the given achievements, duplicates dropped.
    pub fn with_achievements(mut self, achievements: Vec<String>) -> Self {
        self.achievements = dedup(achievements);
        self
    }

    /// Returns this profile with the given theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Returns this profile with sound switched on or off.
    pub fn with_sound_enabled(mut self, sound_enabled: bool) -> Self {
        self.sound_enabled = sound_enabled;
        self
    }

    /// True if the named achievement is unlocked.
    pub fn has_achievement(&self, name: &str) -> bool {
        self.achievements.iter().any(|a| a == name)
    }
}

impl PartialEq for Profile {
    fn eq(&self, other: &Self) -> bool {
        let mine: HashSet<&String> = self.achievements.iter().collect();
        let theirs: HashSet<&String> = other.achievements.iter().collect();
        self.username == other.username
            && self.coin_balance == other.coin_balance
            && self.theme == other.theme
            && self.sound_enabled == other.sound_enabled
            && mine == theirs
    }
}

impl Eq for Profile {}

fn dedup(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Profile operation error.
#[derive(Debug, Clone, Display, Error, From)]
pub enum ProfileError {
    /// Spending more coins than the balance holds.
    #[display("Insufficient funds: balance {} < requested {}", balance, requested)]
    #[from(ignore)]
    InsufficientFunds {
        /// Balance at the time of the attempt.
        balance: u64,
        /// Amount requested.
        requested: u64,
    },
    /// Login with a blank username.
    #[display("Username must not be empty")]
    #[from(ignore)]
    EmptyUsername,
    /// The backing store failed.
    #[display("{}", _0)]
    Storage(StorageError),
}

/// Reads and writes the profile record, one key per field.
///
/// Holds no cached state: every read goes to the store and every mutation is
/// written through immediately, so clones of the same store stay consistent.
#[derive(Debug, Clone)]
pub struct ProfileStore<S> {
    store: S,
}

impl<S: KeyValueStore> ProfileStore<S> {
    /// Creates a profile store over `store`.
    #[instrument(skip(store))]
    pub fn new(store: S) -> Self {
        debug!("Creating ProfileStore");
        Self { store }
    }

    /// Reads a key, surfacing storage failure. Mutations go through here so
    /// a failed read never turns into a default written over stored data.
    fn try_read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.store.get(key)
    }

    /// Reads a key, treating storage failure as absence.
    fn read(&self, key: &str) -> Option<String> {
        self.try_read(key).unwrap_or_else(|e| {
            warn!(key, error = %e, "Failed to read key, using default");
            None
        })
    }

    /// Loads the persisted profile, `None` when nobody is logged in.
    ///
    /// Missing or corrupt fields fall back to their defaults.
    #[instrument(skip(self))]
    pub fn load(&self) -> Option<Profile> {
        let username = self.username()?;
        let profile = Profile::new(username)
            .with_coin_balance(self.coin_balance())
            .with_achievements(self.achievements())
            .with_theme(self.theme())
            .with_sound_enabled(self.sound_enabled());
        debug!(username = %profile.username, coins = profile.coin_balance, "Profile loaded");
        Some(profile)
    }

    /// Persists every field of `profile`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if any field cannot be written.
    #[instrument(skip(self, profile), fields(username = %profile.username))]
    pub fn save(&self, profile: &Profile) -> Result<(), StorageError> {
        self.store.set(keys::USER, &profile.username)?;
        self.store.set(keys::COINS, &profile.coin_balance.to_string())?;
        self.write_achievements(&profile.achievements)?;
        self.store.set(keys::THEME, &profile.theme.to_string())?;
        self.store.set(keys::SOUND, &profile.sound_enabled.to_string())?;
        info!("Profile saved");
        Ok(())
    }

    /// Stores `username` and returns the resulting profile.
    ///
    /// Coins, achievements and preferences already in the store are kept.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::EmptyUsername`] for a blank name, or
    /// [`ProfileError::Storage`] if the name cannot be written.
    #[instrument(skip(self))]
    pub fn login(&self, username: &str) -> Result<Profile, ProfileError> {
        let username = username.trim();
        if username.is_empty() {
            warn!("Rejected blank username");
            return Err(ProfileError::EmptyUsername);
        }

        self.store.set(keys::USER, username)?;
        let profile = self
            .load()
            .unwrap_or_else(|| Profile::new(username.to_string()));
        info!(username = %username, "Logged in");
        Ok(profile)
    }

    /// Logged-in username, `None` when absent or blank.
    #[instrument(skip(self))]
    pub fn username(&self) -> Option<String> {
        self.read(keys::USER).filter(|name| !name.trim().is_empty())
    }

    /// Current balance; 0 when missing or unparsable.
    #[instrument(skip(self))]
    pub fn coin_balance(&self) -> u64 {
        self.stored_balance().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read coin balance, using 0");
            0
        })
    }

    /// Unlocked achievement names; empty when missing or corrupt.
    #[instrument(skip(self))]
    pub fn achievements(&self) -> Vec<String> {
        self.stored_achievements().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read achievements, using empty set");
            Vec::new()
        })
    }

    /// Stored balance. Corrupt text reads as 0; a failed read is an error.
    fn stored_balance(&self) -> Result<u64, StorageError> {
        Ok(match self.try_read(keys::COINS)? {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(raw = %raw, "Corrupt coin balance, using 0");
                0
            }),
            None => 0,
        })
    }

    /// Stored achievement list. Corrupt JSON reads as empty; a failed read is
    /// an error.
    fn stored_achievements(&self) -> Result<Vec<String>, StorageError> {
        Ok(match self.try_read(keys::ACHIEVEMENTS)? {
            Some(raw) => serde_json::from_str::<Vec<String>>(&raw)
                .map(dedup)
                .unwrap_or_else(|e| {
                    warn!(error = %e, "Corrupt achievements, using empty set");
                    Vec::new()
                }),
            None => Vec::new(),
        })
    }

    /// Theme preference; dark unless `"light"` is stored.
    #[instrument(skip(self))]
    pub fn theme(&self) -> Theme {
        self.read(keys::THEME)
            .and_then(|raw| Theme::from_str(raw.trim()).ok())
            .unwrap_or_default()
    }

    /// Sound preference; on unless `"false"` is stored.
    #[instrument(skip(self))]
    pub fn sound_enabled(&self) -> bool {
        self.read(keys::SOUND)
            .map(|raw| raw.trim() != "false")
            .unwrap_or(true)
    }

    /// Adds `delta` coins (negative to deduct), clamping the result at zero.
    /// Returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the balance cannot be read or written.
    /// Nothing is written when the read fails.
    #[instrument(skip(self))]
    pub fn add_coins(&self, delta: i64) -> Result<u64, StorageError> {
        let balance = self.stored_balance()?;
        let next = (i128::from(balance) + i128::from(delta)).clamp(0, i128::from(u64::MAX)) as u64;
        self.store.set(keys::COINS, &next.to_string())?;
        info!(balance, delta, next, "Coins adjusted");
        Ok(next)
    }

    /// Deducts `amount` coins. Returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InsufficientFunds`] when the balance is below
    /// `amount` (nothing is written), or [`ProfileError::Storage`] if the
    /// balance cannot be read or written.
    #[instrument(skip(self))]
    pub fn spend_coins(&self, amount: u64) -> Result<u64, ProfileError> {
        let balance = self.stored_balance()?;
        if balance < amount {
            debug!(balance, amount, "Spend rejected");
            return Err(ProfileError::InsufficientFunds {
                balance,
                requested: amount,
            });
        }

        let next = balance - amount;
        self.store.set(keys::COINS, &next.to_string())?;
        info!(balance, amount, next, "Coins spent");
        Ok(next)
    }

    /// Adds `name` to the achievement set. Returns `true` only when it was
    /// not already present.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the set cannot be read or written.
    /// Nothing is written when the read fails.
    #[instrument(skip(self))]
    pub fn unlock_achievement(&self, name: &str) -> Result<bool, StorageError> {
        let mut achievements = self.stored_achievements()?;
        if achievements.iter().any(|a| a == name) {
            debug!("Achievement already unlocked");
            return Ok(false);
        }

        achievements.push(name.to_string());
        self.write_achievements(&achievements)?;
        info!(achievement = %name, "Achievement unlocked");
        Ok(true)
    }

    /// Stores the theme preference.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the preference cannot be written.
    #[instrument(skip(self))]
    pub fn set_theme(&self, theme: Theme) -> Result<(), StorageError> {
        self.store.set(keys::THEME, &theme.to_string())
    }

    /// Flips the theme and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the preference cannot be written.
    #[instrument(skip(self))]
    pub fn toggle_theme(&self) -> Result<Theme, StorageError> {
        let theme = self.theme().toggle();
        self.set_theme(theme)?;
        Ok(theme)
    }

    /// Stores the sound preference.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the preference cannot be written.
    #[instrument(skip(self))]
    pub fn set_sound_enabled(&self, enabled: bool) -> Result<(), StorageError> {
        self.store.set(keys::SOUND, &enabled.to_string())
    }

    /// Flips the sound preference and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the preference cannot be written.
    #[instrument(skip(self))]
    pub fn toggle_sound(&self) -> Result<bool, StorageError> {
        let enabled = !self.sound_enabled();
        self.set_sound_enabled(enabled)?;
        Ok(enabled)
    }

    /// Removes every profile key.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if a key cannot be removed.
    #[instrument(skip(self))]
    pub fn clear(&self) -> Result<(), StorageError> {
        for key in keys::PROFILE_KEYS {
            self.store.remove(key)?;
        }
        info!("Profile cleared");
        Ok(())
    }

    fn write_achievements(&self, achievements: &[String]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(achievements)
            .map_err(|e| StorageError::encoding(format!("Failed to encode achievements: {}", e)))?;
        self.store.set(keys::ACHIEVEMENTS, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn store() -> (MemoryStore, ProfileStore<MemoryStore>) {
        let memory = MemoryStore::new();
        (memory.clone(), ProfileStore::new(memory))
    }

    #[test]
    fn test_load_without_login_is_none() {
        let (_, profiles) = store();
        assert_eq!(profiles.load(), None);
    }

    #[test]
    fn test_save_then_load_is_equivalent() {
        let (_, profiles) = store();
        let profile = Profile::new("alice".to_string())
            .with_coin_balance(120)
            .with_achievements(vec!["Strategist".to_string(), "Speed Demon".to_string()])
            .with_theme(Theme::Light)
            .with_sound_enabled(false);

        profiles.save(&profile).unwrap();
        assert_eq!(profiles.load(), Some(profile));
    }

    #[test]
    fn test_equality_ignores_achievement_order() {
        let a = Profile::new("bob".to_string())
            .with_achievements(vec!["A".to_string(), "B".to_string()]);
        let b = Profile::new("bob".to_string())
            .with_achievements(vec!["B".to_string(), "A".to_string()]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_corrupt_fields_use_defaults() {
        let (memory, profiles) = store();
        memory.set(keys::USER, "carol").unwrap();
        memory.set(keys::COINS, "not a number").unwrap();
        memory.set(keys::ACHIEVEMENTS, "{broken").unwrap();
        memory.set(keys::THEME, "purple").unwrap();
        memory.set(keys::SOUND, "maybe").unwrap();

        let profile = profiles.load().unwrap();
        assert_eq!(profile, Profile::new("carol".to_string()));
    }

    #[test]
    fn test_stored_values_use_documented_text_format() {
        let (memory, profiles) = store();
        profiles.login("dave").unwrap();
        profiles.add_coins(42).unwrap();
        profiles.unlock_achievement("Strategist").unwrap();
        profiles.set_theme(Theme::Light).unwrap();
        profiles.set_sound_enabled(false).unwrap();

        assert_eq!(memory.get(keys::USER).unwrap().as_deref(), Some("dave"));
        assert_eq!(memory.get(keys::COINS).unwrap().as_deref(), Some("42"));
        assert_eq!(
            memory.get(keys::ACHIEVEMENTS).unwrap().as_deref(),
            Some(r#"["Strategist"]"#)
        );
        assert_eq!(memory.get(keys::THEME).unwrap().as_deref(), Some("light"));
        assert_eq!(memory.get(keys::SOUND).unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn test_add_coins_clamps_at_zero() {
        let (_, profiles) = store();
        assert_eq!(profiles.add_coins(10).unwrap(), 10);
        assert_eq!(profiles.add_coins(-25).unwrap(), 0);
        assert_eq!(profiles.coin_balance(), 0);
    }

    #[test]
    fn test_spend_coins_exact_balance() {
        let (_, profiles) = store();
        profiles.add_coins(100).unwrap();
        assert_eq!(profiles.spend_coins(100).unwrap(), 0);
    }

    #[test]
    fn test_spend_coins_insufficient_leaves_balance() {
        let (_, profiles) = store();
        profiles.add_coins(99).unwrap();
        let err = profiles.spend_coins(100).unwrap_err();
        assert!(matches!(
            err,
            ProfileError::InsufficientFunds {
                balance: 99,
                requested: 100
            }
        ));
        assert_eq!(profiles.coin_balance(), 99);
    }

    #[test]
    fn test_unlock_is_idempotent() {
        let (_, profiles) = store();
        assert!(profiles.unlock_achievement("Strategist").unwrap());
        assert!(!profiles.unlock_achievement("Strategist").unwrap());
        assert_eq!(profiles.achievements(), vec!["Strategist".to_string()]);
    }

    #[test]
    fn test_login_rejects_blank_name() {
        let (_, profiles) = store();
        assert!(matches!(
            profiles.login("   "),
            Err(ProfileError::EmptyUsername)
        ));
        assert_eq!(profiles.username(), None);
    }

    #[test]
    fn test_login_keeps_existing_progress() {
        let (_, profiles) = store();
        profiles.add_coins(30).unwrap();
        let profile = profiles.login("erin").unwrap();
        assert_eq!(*profile.coin_balance(), 30);
        assert_eq!(profile.username(), "erin");
    }

    #[test]
    fn test_toggles_persist() {
        let (_, profiles) = store();
        assert_eq!(profiles.toggle_theme().unwrap(), Theme::Light);
        assert_eq!(profiles.theme(), Theme::Light);
        assert!(!profiles.toggle_sound().unwrap());
        assert!(!profiles.sound_enabled());
    }

    #[test]
    fn test_clear_removes_profile() {
        let (_, profiles) = store();
        profiles.login("frank").unwrap();
        profiles.add_coins(5).unwrap();
        profiles.clear().unwrap();
        assert_eq!(profiles.load(), None);
        assert_eq!(profiles.coin_balance(), 0);
    }
}
