//! Pure data structures shared across the engine.
//!
//! - [`Order`] / [`OrderItem`] — the canonical, schema-independent order
//!   representation produced by [`crate::normalize`].
//! - [`OrderStatus`] — the three-state workflow every raw status collapses to.
//! - [`Session`] — the authenticated session persisted between runs.

pub mod order;
pub mod session;

pub use order::{sort_for_board, Order, OrderItem, OrderStatus};
pub use session::Session;
