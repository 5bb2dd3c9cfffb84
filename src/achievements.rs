//! Achievement catalog.

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Achievements a session can unlock, stored by display name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, IntoStaticStr, EnumIter, EnumString,
)]
pub enum Achievement {
    /// Twenty or more clicks in one click challenge.
    #[strum(serialize = "Speed Demon")]
    SpeedDemon,
    /// Beat the tic-tac-toe AI.
    #[strum(serialize = "Strategist")]
    Strategist,
    /// A local two-player game ended in three-in-a-row.
    #[strum(serialize = "Multiplayer Winner")]
    MultiplayerWinner,
}

impl Achievement {
    /// Name as stored in the profile.
    pub fn name(self) -> &'static str {
        self.into()
    }
}
