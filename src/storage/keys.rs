//! Storage keys. Values are plain text unless noted.

/// Logged-in username.
pub const USER: &str = "uge_user";

/// Coin balance as a decimal integer.
pub const COINS: &str = "uge_coins";

/// `"dark"` or `"light"`.
pub const THEME: &str = "uge_theme";

/// `"true"` or `"false"`.
pub const SOUND: &str = "uge_sound";

/// JSON array of achievement names.
pub const ACHIEVEMENTS: &str = "uge_achievements";

/// JSON array of `{user, game, score}` objects, newest first.
pub const SCORES: &str = "uge_scores";

/// Keys that make up the profile record.
pub const PROFILE_KEYS: [&str; 5] = [USER, COINS, THEME, SOUND, ACHIEVEMENTS];
