//! Error types for the board actor.

use crate::api::ApiError;
use thiserror::Error;

/// Errors that can occur during board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// The requested order is not on the board.
    #[error("order not found: {0}")]
    NotFound(String),

    /// A status transition for this order is still awaiting the server.
    #[error("transition already in flight for order {0}")]
    TransitionInFlight(String),

    /// The server rejected or failed a status update. The optimistic change
    /// has already been rolled back when this is returned.
    #[error("status update failed: {0}")]
    Mutation(ApiError),

    /// An orders fetch failed; previous board state is untouched.
    #[error("order refresh failed: {0}")]
    Network(ApiError),

    /// The board actor's channel is closed.
    #[error("board actor closed")]
    Closed,

    /// The board actor dropped the response channel.
    #[error("board actor dropped response channel")]
    Dropped,
}
