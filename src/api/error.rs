//! Error type for the remote service transport.

use thiserror::Error;

/// Errors that can occur while talking to the order service.
///
/// Transient by design: during background polling these are logged and
/// swallowed, during user-triggered operations they surface to the caller.
/// Neither variant terminates the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a usable response (DNS, connect, timeout,
    /// malformed body).
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered and rejected the request. `message` carries the
    /// server-supplied error text when present.
    #[error("{message}")]
    Server { status: u16, message: String },
}

impl ApiError {
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        ApiError::Server {
            status,
            message: message.into(),
        }
    }
}
