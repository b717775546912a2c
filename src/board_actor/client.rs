//! Client handle for the board actor.

use crate::board_actor::error::BoardError;
use crate::board_actor::message::{BoardRequest, RefreshKind, RefreshSummary};
use crate::model::{Order, OrderStatus};
use tokio::sync::{mpsc, oneshot};
use tracing::instrument;

/// A type-safe handle for talking to the board actor.
///
/// Holds only a sender, so cloning is cheap; clones can be handed to the
/// poller, the UI layer, and anything else that needs the board. The actor
/// shuts down once every clone is dropped.
#[derive(Clone, Debug)]
pub struct BoardClient {
    sender: mpsc::Sender<BoardRequest>,
}

impl BoardClient {
    pub(crate) fn new(sender: mpsc::Sender<BoardRequest>) -> Self {
        Self { sender }
    }

    /// Runs one full fetch/diff cycle. See [`RefreshKind`] for which kinds
    /// ring the notification sink.
    #[instrument(skip(self))]
    pub async fn refresh(&self, kind: RefreshKind) -> Result<RefreshSummary, BoardError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(BoardRequest::Refresh { kind, respond_to })
            .await
            .map_err(|_| BoardError::Closed)?;
        response.await.map_err(|_| BoardError::Dropped)?
    }

    /// Moves an order to `target`. Resolves once the server has confirmed
    /// (after the reconciling resync) or after the rollback on failure.
    #[instrument(skip(self))]
    pub async fn apply_transition(
        &self,
        order_id: &str,
        target: OrderStatus,
    ) -> Result<(), BoardError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(BoardRequest::ApplyTransition {
                order_id: order_id.to_string(),
                target,
                respond_to,
            })
            .await
            .map_err(|_| BoardError::Closed)?;
        response.await.map_err(|_| BoardError::Dropped)?
    }

    /// Orders still being worked: status ≠ completed, board order.
    pub async fn active_view(&self) -> Result<Vec<Order>, BoardError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(BoardRequest::ActiveView { respond_to })
            .await
            .map_err(|_| BoardError::Closed)?;
        response.await.map_err(|_| BoardError::Dropped)?
    }

    /// The 25 most recently created completed orders, most recent first.
    pub async fn history_view(&self) -> Result<Vec<Order>, BoardError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(BoardRequest::HistoryView { respond_to })
            .await
            .map_err(|_| BoardError::Closed)?;
        response.await.map_err(|_| BoardError::Dropped)?
    }

    /// Toggles the audible cue for new arrivals; persisted immediately.
    #[instrument(skip(self))]
    pub async fn set_sound_enabled(&self, enabled: bool) -> Result<(), BoardError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(BoardRequest::SetSoundEnabled {
                enabled,
                respond_to,
            })
            .await
            .map_err(|_| BoardError::Closed)?;
        response.await.map_err(|_| BoardError::Dropped)?
    }

    pub async fn sound_enabled(&self) -> Result<bool, BoardError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(BoardRequest::SoundEnabled { respond_to })
            .await
            .map_err(|_| BoardError::Closed)?;
        response.await.map_err(|_| BoardError::Dropped)?
    }
}
