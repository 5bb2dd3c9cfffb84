//! Timed click challenge.

use derive_getters::Getters;
use tracing::{debug, info, instrument, warn};

use super::phase::{GameKind, Phase};
use crate::achievements::Achievement;
use crate::profile::ProfileStore;
use crate::scores::{ScoreEntry, ScoreStore};
use crate::storage::KeyValueStore;

/// Length of a click challenge in one-second ticks.
pub const CLICK_DURATION_SECS: u32 = 15;

/// Score at which "Speed Demon" unlocks.
pub const SPEED_DEMON_THRESHOLD: u64 = 20;

/// What a finished click challenge committed.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ClickSummary {
    /// Clicks registered.
    score: u64,
    /// Balance after the payout.
    coin_balance: u64,
    /// Whether the score reached the ledger (requires a login).
    recorded: bool,
    /// Whether "Speed Demon" was newly unlocked by this session.
    speed_demon_unlocked: bool,
}

/// Result of one timer tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickReport {
    /// Session not running; nothing changed.
    Ignored,
    /// Time left after this tick.
    Counting(u32),
    /// The timer ran out and results were committed.
    Finished(ClickSummary),
}

/// Count as many clicks as possible before the timer runs out.
///
/// The session does no timekeeping itself: a tick source calls
/// [`tick`](Self::tick) once per second.
#[derive(Debug)]
pub struct TimedClickSession<S> {
    profile: ProfileStore<S>,
    scores: ScoreStore<S>,
    phase: Phase,
    score: u64,
    remaining: u32,
}

impl<S: KeyValueStore> TimedClickSession<S> {
    /// Creates an idle session.
    #[instrument(skip(profile, scores))]
    pub fn new(profile: ProfileStore<S>, scores: ScoreStore<S>) -> Self {
        Self {
            profile,
            scores,
            phase: Phase::Idle,
            score: 0,
            remaining: CLICK_DURATION_SECS,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Clicks counted so far.
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Seconds left on the timer.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Idle → Running. Returns `false` if the session was not idle.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Idle {
            debug!(phase = ?self.phase, "Start ignored");
            return false;
        }

        self.score = 0;
        self.remaining = CLICK_DURATION_SECS;
        self.phase = Phase::Running;
        info!(duration = CLICK_DURATION_SECS, "Click challenge started");
        true
    }

    /// Counts a click. Returns `false` if the session is not running.
    #[instrument(skip(self), fields(score = self.score))]
    pub fn click(&mut self) -> bool {
        if self.phase != Phase::Running {
            debug!("Click ignored");
            return false;
        }

        self.score += 1;
        true
    }

    /// Advances the timer by one second, committing results when it hits 0.
    #[instrument(skip(self), fields(remaining = self.remaining))]
    pub fn tick(&mut self) -> TickReport {
        if self.phase != Phase::Running {
            return TickReport::Ignored;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return TickReport::Counting(self.remaining);
        }

        self.phase = Phase::Ended;
        TickReport::Finished(self.commit())
    }

    /// Ends the session early without any payout.
    ///
    /// Returns `false` if it had already ended.
    #[instrument(skip(self))]
    pub fn cancel(&mut self) -> bool {
        if self.phase == Phase::Ended {
            return false;
        }

        info!(score = self.score, remaining = self.remaining, "Click challenge cancelled");
        self.phase = Phase::Ended;
        true
    }

    fn commit(&self) -> ClickSummary {
        let score = self.score;
        let delta = i64::try_from(score).unwrap_or(i64::MAX);

        let coin_balance = self.profile.add_coins(delta).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to award coins");
            self.profile.coin_balance()
        });

        let username = self.profile.username().unwrap_or_default();
        let entry = ScoreEntry::new(username, GameKind::Click.to_string(), score);
        let recorded = self.scores.record(entry).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to record score");
            false
        });

        let speed_demon_unlocked = score >= SPEED_DEMON_THRESHOLD
            && self
                .profile
                .unlock_achievement(Achievement::SpeedDemon.name())
                .unwrap_or_else(|e| {
                    warn!(error = %e, "Failed to unlock achievement");
                    false
                });

        info!(score, coin_balance, recorded, speed_demon_unlocked, "Click challenge finished");
        ClickSummary {
            score,
            coin_balance,
            recorded,
            speed_demon_unlocked,
        }
    }
}
