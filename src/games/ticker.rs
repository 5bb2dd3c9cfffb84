//! Periodic tick source for the click challenge.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, instrument};

use super::click::{ClickSummary, TickReport, TimedClickSession};
use crate::storage::KeyValueStore;

/// Background task delivering one tick per period.
///
/// Ticks stop when [`stop`](Self::stop) is called, when the ticker is
/// dropped, or when the receiver goes away.
#[derive(Debug)]
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawns a ticker on the current tokio runtime. The first tick arrives
    /// one full `period` after spawning.
    #[instrument]
    pub fn spawn(period: Duration) -> (Self, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(()).await.is_err() {
                    debug!("Tick receiver dropped");
                    break;
                }
            }
        });
        (Self { handle }, rx)
    }

    /// Stops scheduling further ticks.
    #[instrument(skip(self))]
    pub fn stop(&self) {
        self.handle.abort();
    }

    /// True once the background task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Runs a click challenge to completion.
///
/// Starts `session`, counts every message on `clicks` as one click and ticks
/// once per `period`. Returns the committed summary when time runs out, or
/// `None` if `clicks` closes first, in which case the session is cancelled
/// and nothing is committed.
#[instrument(skip(session, clicks))]
pub async fn drive_click_session<S: KeyValueStore>(
    session: &mut TimedClickSession<S>,
    mut clicks: mpsc::Receiver<()>,
    period: Duration,
) -> Option<ClickSummary> {
    if !session.start() {
        return None;
    }

    let (ticker, mut ticks) = Ticker::spawn(period);
    loop {
        tokio::select! {
            tick = ticks.recv() => {
                if tick.is_none() {
                    break;
                }
                match session.tick() {
                    TickReport::Finished(summary) => {
                        ticker.stop();
                        return Some(summary);
                    }
                    TickReport::Counting(remaining) => debug!(remaining, "Tick"),
                    TickReport::Ignored => break,
                }
            }
            click = clicks.recv() => {
                if click.is_none() {
                    break;
                }
                session.click();
            }
        }
    }

    ticker.stop();
    session.cancel();
    info!("Click challenge abandoned");
    None
}
