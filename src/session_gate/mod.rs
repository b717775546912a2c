//! Session validation and persistence.
//!
//! Everything else in the engine is gated behind [`SessionGate::initialize`]:
//! load the persisted session, re-validate it against the server, merge the
//! server-confirmed identity over the cached one, persist the result. The
//! policy is fail-closed — any ambiguity about validity (unreadable blob,
//! unreachable endpoint, missing identity fields) is treated as invalid.

pub mod error;

pub use error::AuthError;

use crate::api::DashboardApi;
use crate::model::Session;
use crate::storage::{KeyValueStore, SESSION_STORAGE_KEY};
use std::sync::Arc;
use tracing::{info, warn};

/// Validates and owns the persisted session record.
pub struct SessionGate {
    api: Arc<dyn DashboardApi>,
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for SessionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGate").finish_non_exhaustive()
    }
}

impl SessionGate {
    pub fn new(api: Arc<dyn DashboardApi>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { api, store }
    }

    /// Loads, validates, and refreshes the persisted session.
    ///
    /// On success the merged session has been persisted and is returned.
    /// On any failure the caller must treat the session as gone and route
    /// the operator to the login flow; server-side rejections also clear
    /// the persisted record.
    pub async fn initialize(&self) -> Result<Session, AuthError> {
        let stored = self.read_stored().ok_or(AuthError::MissingSession)?;

        let validation = match self.api.validate_session(&stored.token).await {
            Ok(v) => v,
            Err(e) => {
                self.invalidate();
                return Err(AuthError::Network(e));
            }
        };

        let valid = validation.valid.unwrap_or(false);
        let (user_id, client_id) = match (&validation.user_id, &validation.client_id) {
            (Some(u), Some(c)) if valid && !u.is_empty() && !c.is_empty() => {
                (u.clone(), c.clone())
            }
            _ => {
                self.invalidate();
                let message = validation
                    .error
                    .unwrap_or_else(|| "Sessão inválida".to_string());
                return Err(AuthError::Rejected(message));
            }
        };

        // Server identity wins; display fields fall back to the cached copy.
        let merged = Session {
            token: stored.token,
            user_id,
            client_id,
            user_name: validation.user_name.or(stored.user_name),
            user_email: validation.user_email.or(stored.user_email),
            client_name: validation.client_name.or(stored.client_name),
        };

        self.persist(&merged);
        info!(user_id = %merged.user_id, client_id = %merged.client_id, "session validated");
        Ok(merged)
    }

    /// Clears the persisted session record unconditionally. The sound
    /// preference is left alone.
    pub fn invalidate(&self) {
        if let Err(e) = self.store.remove(SESSION_STORAGE_KEY) {
            warn!(error = %e, "failed to clear stored session");
        }
    }

    /// A stored session that does not parse, or parses without all three
    /// identity fields, counts as absent.
    fn read_stored(&self) -> Option<Session> {
        let raw = self.store.get(SESSION_STORAGE_KEY).ok().flatten()?;
        let session: Session = serde_json::from_str(&raw).ok()?;
        session.is_complete().then_some(session)
    }

    fn persist(&self, session: &Session) {
        match serde_json::to_string(session) {
            Ok(blob) => {
                if let Err(e) = self.store.put(SESSION_STORAGE_KEY, &blob) {
                    warn!(error = %e, "failed to persist session");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize session"),
        }
    }
}
