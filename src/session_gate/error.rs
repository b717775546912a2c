//! Error types for session validation.

use crate::api::ApiError;
use thiserror::Error;

/// Errors that end the current session.
///
/// Always fatal: the caller must send the operator back through the login
/// flow. Except for `MissingSession`, raising one of these has already
/// cleared the persisted session record. Never retried automatically.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No stored session, or the stored blob is unreadable/incomplete.
    #[error("no usable stored session")]
    MissingSession,

    /// The server answered and rejected the session (invalid flag, missing
    /// identity fields, or an explicit error message).
    #[error("session rejected: {0}")]
    Rejected(String),

    /// Validation could not be completed. Fail-closed: an unreachable
    /// validation endpoint invalidates the session.
    #[error("session validation failed: {0}")]
    Network(#[source] ApiError),
}
