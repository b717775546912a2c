//! Canonical order model.
//!
//! Every raw payload the remote service returns is collapsed into this shape
//! by [`crate::normalize`], regardless of which legacy field names it used.
//! The board actor only ever deals with these types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Display;

/// Workflow status of an order on the board.
///
/// Derived from the raw server status by a fixed synonym mapping; anything
/// unrecognized collapses to [`OrderStatus::New`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    New,
    InProgress,
    Completed,
}

impl OrderStatus {
    /// Wire form of the status, as the remote service expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::InProgress => "in-progress",
            OrderStatus::Completed => "completed",
        }
    }

    /// Human-facing label shown to staff.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::New => "Novo",
            OrderStatus::InProgress => "Em preparação",
            OrderStatus::Completed => "Concluído",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single line item of an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub name: String,
    /// Always at least 1; non-numeric input defaults here during normalization.
    pub quantity: u32,
    /// Never negative; non-numeric input defaults to 0.
    pub price: f64,
    pub notes: Option<String>,
}

/// Canonical representation of one order on the board.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Server-issued id, globally unique within a session's seen set.
    pub id: String,
    /// Display number; falls back to `id` when the server sent none.
    pub order_no: String,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub table_label: String,
    pub status: OrderStatus,
    /// The untouched server status this `status` was derived from.
    pub raw_status: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

/// Sorts orders per the board's display policy: every `InProgress` order
/// first, ties broken by descending creation time.
pub fn sort_for_board(orders: &mut [Order]) {
    orders.sort_by(|a, b| {
        let a_prio = a.status == OrderStatus::InProgress;
        let b_prio = b.status == OrderStatus::InProgress;
        b_prio
            .cmp(&a_prio)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}
