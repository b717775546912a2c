//! Wire types for the order service.
//!
//! Field names follow the service's camelCase JSON. Everything the engine
//! does not strictly need is optional; unknown raw statuses and free-form
//! `orderData` are handled downstream by [`crate::normalize`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response of `GET /api/admin/whatsflow-auth`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionValidationResponse {
    #[serde(default)]
    pub valid: Option<bool>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One order exactly as the server sent it.
///
/// `order_data` has no fixed schema; legacy deployments use alternate and
/// bilingual field names inside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrder {
    pub id: String,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub order_data: Value,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Client identity echoed alongside the order list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// User identity echoed alongside the order list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Response of `GET /api/whatsflow/orders`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersResponse {
    #[serde(default)]
    pub orders: Vec<RawOrder>,
    #[serde(default)]
    pub client: Option<ClientInfo>,
    #[serde(default)]
    pub user: Option<UserInfo>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `POST /api/whatsflow/orders/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    pub order_id: String,
    pub status: String,
}

/// Response of `POST /api/whatsflow/orders/status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}
