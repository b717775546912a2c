//! Authenticated session record.

use serde::{Deserialize, Serialize};

/// The session persisted between runs and re-validated on startup.
///
/// Serialized field names stay camelCase (with the token as `sessionToken`)
/// so the persisted blob remains compatible with what the login flow writes.
/// `user_id` and `client_id` are server-authoritative; the display fields are
/// best-effort and may be carried over from a previous validation when the
/// server omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(rename = "sessionToken")]
    pub token: String,
    pub user_id: String,
    pub client_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
}

impl Session {
    /// A stored session is usable only when all three identity fields are
    /// present and non-empty.
    pub fn is_complete(&self) -> bool {
        !self.token.is_empty() && !self.user_id.is_empty() && !self.client_id.is_empty()
    }
}
