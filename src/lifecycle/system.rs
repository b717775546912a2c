//! The dashboard system orchestrator.

use crate::api::DashboardApi;
use crate::board_actor::{self, BoardClient, BoardContext, BoardError, RefreshKind, RefreshSummary};
use crate::model::Session;
use crate::notify::NotificationSink;
use crate::poller::{self, PollerHandle, DEFAULT_POLL_INTERVAL};
use crate::session_gate::{AuthError, SessionGate};
use crate::storage::KeyValueStore;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::info;

/// Tunables for a running system.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub poll_interval: Duration,
    /// Capacity of the board actor's request channel.
    pub channel_capacity: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            channel_capacity: 32,
        }
    }
}

/// Why the system could not start.
#[derive(Debug, Error)]
pub enum StartError {
    /// Session gating failed; the operator must sign in again.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The seed fetch failed. The session has been invalidated — a session
    /// that cannot load its board is treated as part of the auth failure
    /// path, as the login flow re-establishes both.
    #[error("initial order fetch failed: {0}")]
    Seed(BoardError),
}

/// A fully wired, running dashboard engine.
///
/// Created by [`DashboardSystem::start`]; stopped by [`shutdown`]
/// (or [`logout`], which also clears the persisted session).
///
/// [`shutdown`]: DashboardSystem::shutdown
/// [`logout`]: DashboardSystem::logout
#[derive(Debug)]
pub struct DashboardSystem {
    /// The validated, merged session.
    pub session: Session,
    /// Handle to the board actor: views, transitions, manual refresh.
    pub board: BoardClient,
    /// Handle for focus/visibility poll triggers.
    pub poller: PollerHandle,
    gate: SessionGate,
    handles: Vec<JoinHandle<()>>,
}

impl DashboardSystem {
    /// Validates the session, spawns and seeds the board actor, and starts
    /// the poller.
    pub async fn start(
        api: Arc<dyn DashboardApi>,
        store: Arc<dyn KeyValueStore>,
        sink: Arc<dyn NotificationSink>,
        config: DashboardConfig,
    ) -> Result<Self, StartError> {
        let gate = SessionGate::new(Arc::clone(&api), Arc::clone(&store));
        let session = gate.initialize().await?;

        let (actor, board) = board_actor::new(config.channel_capacity);
        let context = BoardContext {
            api,
            sink,
            store,
            token: session.token.clone(),
        };
        let board_handle = tokio::spawn(actor.run(context));

        // Seeding rings no bell; it only establishes the baseline seen set.
        if let Err(e) = board.refresh(RefreshKind::Seed).await {
            gate.invalidate();
            drop(board);
            let _ = board_handle.await;
            return Err(StartError::Seed(e));
        }

        let (sync_poller, poller) = poller::new(board.clone(), config.poll_interval);
        let poller_handle = tokio::spawn(sync_poller.run());

        info!(user_id = %session.user_id, "dashboard system started");
        Ok(Self {
            session,
            board,
            poller,
            gate,
            handles: vec![board_handle, poller_handle],
        })
    }

    /// User-triggered refresh. Unlike background polls, errors surface to
    /// the caller.
    pub async fn refresh_now(&self) -> Result<RefreshSummary, BoardError> {
        self.board.refresh(RefreshKind::Manual).await
    }

    /// Clears the persisted session, then stops the engine.
    pub async fn logout(self) {
        self.gate.invalidate();
        info!("logged out");
        self.shutdown().await;
    }

    /// Stops the engine: drops the clients so the channels close, then
    /// awaits every task.
    pub async fn shutdown(self) {
        let DashboardSystem {
            board,
            poller,
            handles,
            ..
        } = self;
        drop(poller);
        drop(board);
        for handle in handles {
            let _ = handle.await;
        }
        info!("dashboard system stopped");
    }
}
