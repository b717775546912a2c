//! The board actor's state and run loop.

use crate::api::{ApiError, DashboardApi};
use crate::board_actor::error::BoardError;
use crate::board_actor::message::{BoardRequest, RefreshKind, RefreshSummary, Response};
use crate::model::{sort_for_board, Order, OrderStatus};
use crate::normalize::normalize;
use crate::notify::NotificationSink;
use crate::storage::{KeyValueStore, SOUND_STORAGE_KEY};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// How many completed orders the history view keeps.
const HISTORY_LIMIT: usize = 25;

/// Dependencies injected when the actor starts.
///
/// Late binding keeps construction free of wiring concerns: the factory
/// builds the actor/client pair, the lifecycle layer decides what it talks to.
pub struct BoardContext {
    pub api: Arc<dyn DashboardApi>,
    pub sink: Arc<dyn NotificationSink>,
    pub store: Arc<dyn KeyValueStore>,
    /// Session token for the bearer-authenticated endpoints.
    pub token: String,
}

/// A transition whose remote update has not resolved yet.
struct PendingTransition {
    /// Exact pre-mutation copy of the collection, restored on failure.
    snapshot: Vec<Order>,
    respond_to: Response<()>,
}

/// The single owner of the order collection and all sync state.
///
/// Processes its messages sequentially; no locks anywhere. See the module
/// docs for why fetch ordering falls out of that for free.
pub struct BoardActor {
    receiver: mpsc::Receiver<BoardRequest>,
    /// Handle for spawned transition I/O to report back. Weak so pending
    /// requests never keep the actor alive past its last client.
    self_sender: mpsc::WeakSender<BoardRequest>,
    orders: Vec<Order>,
    /// Every order id observed this session. Grows monotonically; used only
    /// to detect new arrivals.
    seen: HashSet<String>,
    sound_enabled: bool,
    pending: HashMap<String, PendingTransition>,
}

impl BoardActor {
    pub(crate) fn new(
        receiver: mpsc::Receiver<BoardRequest>,
        self_sender: mpsc::WeakSender<BoardRequest>,
    ) -> Self {
        Self {
            receiver,
            self_sender,
            orders: Vec::new(),
            seen: HashSet::new(),
            sound_enabled: true,
            pending: HashMap::new(),
        }
    }

    /// Runs the actor's event loop, processing messages until every client
    /// is gone.
    pub async fn run(mut self, context: BoardContext) {
        self.sound_enabled = load_sound_preference(context.store.as_ref());
        info!(sound = self.sound_enabled, "board actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                BoardRequest::Refresh { kind, respond_to } => {
                    let result = self.refresh(&context, kind).await;
                    if let Err(e) = &result {
                        warn!(?kind, error = %e, "refresh failed");
                    }
                    let _ = respond_to.send(result);
                }
                BoardRequest::ApplyTransition {
                    order_id,
                    target,
                    respond_to,
                } => self.apply_transition(&context, order_id, target, respond_to),
                BoardRequest::TransitionResolved { order_id, result } => {
                    self.resolve_transition(&context, order_id, result).await;
                }
                BoardRequest::ActiveView { respond_to } => {
                    let _ = respond_to.send(Ok(self.active_view()));
                }
                BoardRequest::HistoryView { respond_to } => {
                    let _ = respond_to.send(Ok(self.history_view()));
                }
                BoardRequest::SetSoundEnabled {
                    enabled,
                    respond_to,
                } => {
                    self.set_sound_enabled(context.store.as_ref(), enabled);
                    let _ = respond_to.send(Ok(()));
                }
                BoardRequest::SoundEnabled { respond_to } => {
                    let _ = respond_to.send(Ok(self.sound_enabled));
                }
            }
        }

        info!(
            orders = self.orders.len(),
            seen = self.seen.len(),
            "board actor shutdown"
        );
    }

    /// Fetches the full order list, replaces the board, and reports what was
    /// new. New ids always enter the seen set; only `Poll` refreshes with
    /// sound enabled ring the sink.
    async fn refresh(
        &mut self,
        context: &BoardContext,
        kind: RefreshKind,
    ) -> Result<RefreshSummary, BoardError> {
        debug!(?kind, "refreshing orders");
        let response = context
            .api
            .fetch_orders(&context.token)
            .await
            .map_err(BoardError::Network)?;

        let mut orders: Vec<Order> = response.orders.iter().map(normalize).collect();
        sort_for_board(&mut orders);

        let mut new_arrivals = 0usize;
        for order in &orders {
            if self.seen.insert(order.id.clone()) {
                new_arrivals += 1;
                if kind == RefreshKind::Poll && self.sound_enabled {
                    context.sink.notify_new_order(order);
                }
            }
        }

        self.orders = orders;
        info!(
            ?kind,
            total = self.orders.len(),
            new_arrivals,
            "orders refreshed"
        );
        Ok(RefreshSummary {
            total: self.orders.len(),
            new_arrivals,
        })
    }

    /// Applies a transition optimistically and kicks off the remote update.
    ///
    /// The mutation is visible to view requests immediately; the remote call
    /// resolves later via [`BoardRequest::TransitionResolved`]. At most one
    /// transition per order id may be pending.
    fn apply_transition(
        &mut self,
        context: &BoardContext,
        order_id: String,
        target: OrderStatus,
        respond_to: Response<()>,
    ) {
        if self.pending.contains_key(&order_id) {
            warn!(%order_id, "transition rejected, another is in flight");
            let _ = respond_to.send(Err(BoardError::TransitionInFlight(order_id)));
            return;
        }
        let Some(pos) = self.orders.iter().position(|o| o.id == order_id) else {
            let _ = respond_to.send(Err(BoardError::NotFound(order_id)));
            return;
        };

        let snapshot = self.orders.clone();
        if target == OrderStatus::Completed {
            self.orders.remove(pos);
        } else {
            let order = &mut self.orders[pos];
            order.status = target;
            order.raw_status = target.as_str().to_string();
            sort_for_board(&mut self.orders);
        }
        info!(%order_id, %target, "transition applied optimistically");

        self.pending.insert(
            order_id.clone(),
            PendingTransition {
                snapshot,
                respond_to,
            },
        );

        let api = Arc::clone(&context.api);
        let token = context.token.clone();
        let reply = self.self_sender.clone();
        tokio::spawn(async move {
            let result = api.update_status(&token, &order_id, target).await;
            // During shutdown the actor may already be gone; the result is
            // dropped and the caller sees a closed channel.
            if let Some(sender) = reply.upgrade() {
                let _ = sender
                    .send(BoardRequest::TransitionResolved { order_id, result })
                    .await;
            }
        });
    }

    /// Finishes a transition: resync on confirmation, exact-snapshot rollback
    /// on failure.
    async fn resolve_transition(
        &mut self,
        context: &BoardContext,
        order_id: String,
        result: Result<(), ApiError>,
    ) {
        let Some(pending) = self.pending.remove(&order_id) else {
            warn!(%order_id, "resolution for a transition that is not pending");
            return;
        };

        match result {
            Ok(()) => {
                info!(%order_id, "status update confirmed");
                // Re-derive the board from the server instead of trusting the
                // local patch; renumbering and cascaded state land here. A
                // failed resync does not fail the mutation.
                if let Err(e) = self.refresh(context, RefreshKind::Resync).await {
                    warn!(%order_id, error = %e, "post-transition resync failed");
                }
                let _ = pending.respond_to.send(Ok(()));
            }
            Err(e) => {
                warn!(%order_id, error = %e, "status update failed, rolling back");
                self.orders = pending.snapshot;
                let _ = pending.respond_to.send(Err(BoardError::Mutation(e)));
            }
        }
    }

    fn active_view(&self) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|o| o.status != OrderStatus::Completed)
            .cloned()
            .collect()
    }

    fn history_view(&self) -> Vec<Order> {
        let mut completed: Vec<Order> = self
            .orders
            .iter()
            .filter(|o| o.status == OrderStatus::Completed)
            .cloned()
            .collect();
        completed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        completed.truncate(HISTORY_LIMIT);
        completed
    }

    fn set_sound_enabled(&mut self, store: &dyn KeyValueStore, enabled: bool) {
        self.sound_enabled = enabled;
        let value = if enabled { "true" } else { "false" };
        if let Err(e) = store.put(SOUND_STORAGE_KEY, value) {
            warn!(error = %e, "failed to persist sound preference");
        }
        info!(enabled, "sound preference updated");
    }
}

/// Absent or unreadable preference defaults to enabled.
fn load_sound_preference(store: &dyn KeyValueStore) -> bool {
    match store.get(SOUND_STORAGE_KEY) {
        Ok(Some(value)) => value == "true",
        _ => true,
    }
}
