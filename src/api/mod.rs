//! Remote service interface.
//!
//! The engine talks to three endpoints: session validation, the bearer-
//! authenticated orders list, and the bearer-authenticated status update.
//! [`DashboardApi`] is the seam; [`HttpApi`] is the production transport and
//! [`MockApi`] the scripted in-memory one used by the test suites.

pub mod error;
pub mod http;
pub mod mock;
pub mod types;

pub use error::ApiError;
pub use http::HttpApi;
pub use mock::MockApi;
pub use types::{OrdersResponse, RawOrder, SessionValidationResponse};

use crate::model::OrderStatus;
use async_trait::async_trait;

/// The remote order service, as seen by the engine.
///
/// All methods take the session token explicitly; the trait itself holds no
/// session state. Implementations must be cheap to share behind an `Arc`.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// Validate a session token and fetch the identity attached to it.
    async fn validate_session(&self, token: &str)
        -> Result<SessionValidationResponse, ApiError>;

    /// Fetch the full current order list.
    async fn fetch_orders(&self, token: &str) -> Result<OrdersResponse, ApiError>;

    /// Ask the server to move one order to `target`.
    async fn update_status(
        &self,
        token: &str,
        order_id: &str,
        target: OrderStatus,
    ) -> Result<(), ApiError>;
}
