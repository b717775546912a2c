//! Background synchronization loop.
//!
//! Drives the board with `Poll`-kind refreshes from two sources: a fixed
//! interval and out-of-band triggers (the host regaining focus or becoming
//! visible). Both funnel through one loop that awaits each refresh to
//! completion before taking the next trigger, so polls can never overlap.
//!
//! The trigger channel has capacity 1 and is fed with `try_send`: a burst of
//! focus/visibility events while a poll is running collapses into at most
//! one queued follow-up poll.
//!
//! Poll failures are logged and swallowed; the board keeps its previous
//! state and the next tick retries (stale-but-available).

use crate::board_actor::{BoardClient, BoardError, RefreshKind};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Default poll period.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// What provoked an out-of-band poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshReason {
    /// The host window regained focus.
    FocusGained,
    /// The host window became visible again.
    BecameVisible,
}

/// The background poll loop. Create with [`new`], start with
/// [`SyncPoller::run`].
pub struct SyncPoller {
    board: BoardClient,
    trigger: mpsc::Receiver<RefreshReason>,
    period: Duration,
}

/// Handle for requesting out-of-band polls.
#[derive(Clone, Debug)]
pub struct PollerHandle {
    trigger: mpsc::Sender<RefreshReason>,
}

impl PollerHandle {
    /// Requests an immediate poll. If one is already queued behind the
    /// running poll, the request is coalesced into it and dropped.
    pub fn request_refresh(&self, reason: RefreshReason) {
        match self.trigger.try_send(reason) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => debug!(?reason, "poll trigger coalesced"),
            Err(TrySendError::Closed(_)) => debug!(?reason, "poller already stopped"),
        }
    }
}

/// Creates the poll loop and its trigger handle.
pub fn new(board: BoardClient, period: Duration) -> (SyncPoller, PollerHandle) {
    let (sender, receiver) = mpsc::channel(1);
    (
        SyncPoller {
            board,
            trigger: receiver,
            period,
        },
        PollerHandle { trigger: sender },
    )
}

impl SyncPoller {
    /// Runs until every trigger handle is dropped or the board actor goes
    /// away.
    pub async fn run(mut self) {
        let mut ticker = time::interval(self.period);
        // A slow fetch must delay the next tick, not stack missed ones.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // interval() fires immediately; the seed refresh already covered
        // that, so consume the first tick.
        ticker.tick().await;

        info!(period = ?self.period, "sync poller started");
        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                trigger = self.trigger.recv() => match trigger {
                    Some(reason) => debug!(?reason, "out-of-band poll"),
                    None => break,
                },
            }

            match self.board.refresh(RefreshKind::Poll).await {
                Ok(summary) => {
                    if summary.new_arrivals > 0 {
                        debug!(new_arrivals = summary.new_arrivals, "poll found new orders");
                    }
                }
                Err(BoardError::Closed | BoardError::Dropped) => break,
                Err(e) => warn!(error = %e, "poll failed, keeping previous orders"),
            }
        }
        info!("sync poller stopped");
    }
}
