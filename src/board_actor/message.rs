//! Messages understood by the board actor.

use crate::api::ApiError;
use crate::board_actor::error::BoardError;
use crate::model::{Order, OrderStatus};
use tokio::sync::oneshot;

/// One-shot response channel used by the board actor.
pub type Response<T> = oneshot::Sender<Result<T, BoardError>>;

/// Why a refresh is running. Decides whether new arrivals ring the bell:
/// only `Poll` does — seeding, manual refreshes, and post-mutation resyncs
/// record new ids silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshKind {
    /// The initial fetch right after session validation.
    Seed,
    /// A background poll (timer tick or focus/visibility trigger).
    Poll,
    /// A user-triggered refresh; errors surface to the caller.
    Manual,
    /// The reconciliation fetch after a confirmed status update.
    Resync,
}

/// What a refresh found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSummary {
    /// Orders now on the board (all statuses).
    pub total: usize,
    /// Ids never seen before this refresh.
    pub new_arrivals: usize,
}

/// Requests sent to the board actor.
#[derive(Debug)]
pub enum BoardRequest {
    /// Fetch, normalize, sort, diff against the seen set, maybe ring.
    Refresh {
        kind: RefreshKind,
        respond_to: Response<RefreshSummary>,
    },
    /// Optimistically move an order to `target` and confirm remotely.
    ApplyTransition {
        order_id: String,
        target: OrderStatus,
        respond_to: Response<()>,
    },
    /// Orders with status ≠ completed, in board order.
    ActiveView { respond_to: Response<Vec<Order>> },
    /// Completed orders, most recent first, bounded.
    HistoryView { respond_to: Response<Vec<Order>> },
    /// Toggle and persist the sound preference.
    SetSoundEnabled {
        enabled: bool,
        respond_to: Response<()>,
    },
    /// Current sound preference.
    SoundEnabled { respond_to: Response<bool> },
    /// Internal: a spawned status update finished. Carries no respond_to;
    /// the caller's channel was parked with the pending transition.
    TransitionResolved {
        order_id: String,
        result: Result<(), ApiError>,
    },
}
