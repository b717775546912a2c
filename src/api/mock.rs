//! Scripted in-memory [`DashboardApi`] for tests.
//!
//! Works like the production transport from the engine's point of view but
//! serves pre-loaded responses instead of talking to a server. Responses are
//! queued per endpoint and popped in FIFO order; the orders endpoint can
//! additionally fall back to a default response so polling loops with an
//! unpredictable tick count stay deterministic.
//!
//! A status update can be held open with [`MockApi::hold_next_update`] to
//! observe the board while a transition is still in flight (optimistic state,
//! per-order in-flight guard).
//!
//! Unscripted calls panic — a test that triggers a request it did not script
//! is a broken test.

use crate::api::types::{OrdersResponse, SessionValidationResponse};
use crate::api::{ApiError, DashboardApi};
use crate::model::OrderStatus;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::oneshot;

/// Releases a held status update when triggered (or when dropped).
pub struct UpdateGate {
    release: Option<oneshot::Sender<()>>,
}

impl UpdateGate {
    /// Let the held update proceed.
    pub fn release(mut self) {
        if let Some(tx) = self.release.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for UpdateGate {
    fn drop(&mut self) {
        if let Some(tx) = self.release.take() {
            let _ = tx.send(());
        }
    }
}

/// Scripted double for the remote order service.
#[derive(Default)]
pub struct MockApi {
    validations: Mutex<VecDeque<Result<SessionValidationResponse, ApiError>>>,
    orders: Mutex<VecDeque<Result<OrdersResponse, ApiError>>>,
    default_orders: Mutex<Option<Result<OrdersResponse, ApiError>>>,
    updates: Mutex<VecDeque<Result<(), ApiError>>>,
    update_hold: Mutex<Option<oneshot::Receiver<()>>>,
    validate_count: Mutex<usize>,
    orders_count: Mutex<usize>,
    recorded_updates: Mutex<Vec<(String, OrderStatus)>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next `validate_session` call.
    pub fn push_validation(&self, response: Result<SessionValidationResponse, ApiError>) {
        self.validations.lock().unwrap().push_back(response);
    }

    /// Queue a response for the next `fetch_orders` call.
    pub fn push_orders(&self, response: Result<OrdersResponse, ApiError>) {
        self.orders.lock().unwrap().push_back(response);
    }

    /// Response served by `fetch_orders` whenever the queue is empty.
    pub fn set_default_orders(&self, response: Result<OrdersResponse, ApiError>) {
        *self.default_orders.lock().unwrap() = Some(response);
    }

    /// Queue a response for the next `update_status` call.
    pub fn push_update(&self, response: Result<(), ApiError>) {
        self.updates.lock().unwrap().push_back(response);
    }

    /// Make the next `update_status` call block until the returned gate is
    /// released (or dropped).
    pub fn hold_next_update(&self) -> UpdateGate {
        let (tx, rx) = oneshot::channel();
        *self.update_hold.lock().unwrap() = Some(rx);
        UpdateGate { release: Some(tx) }
    }

    /// How many times `validate_session` was called.
    pub fn validate_calls(&self) -> usize {
        *self.validate_count.lock().unwrap()
    }

    /// How many times `fetch_orders` was called.
    pub fn orders_calls(&self) -> usize {
        *self.orders_count.lock().unwrap()
    }

    /// Every `(order_id, target)` pair passed to `update_status`, in call
    /// order.
    pub fn update_calls(&self) -> Vec<(String, OrderStatus)> {
        self.recorded_updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl DashboardApi for MockApi {
    async fn validate_session(
        &self,
        _token: &str,
    ) -> Result<SessionValidationResponse, ApiError> {
        *self.validate_count.lock().unwrap() += 1;
        self.validations
            .lock()
            .unwrap()
            .pop_front()
            .expect("MockApi: no scripted validation response")
    }

    async fn fetch_orders(&self, _token: &str) -> Result<OrdersResponse, ApiError> {
        *self.orders_count.lock().unwrap() += 1;
        let queued = self.orders.lock().unwrap().pop_front();
        match queued {
            Some(response) => response,
            None => self
                .default_orders
                .lock()
                .unwrap()
                .clone()
                .expect("MockApi: no scripted orders response and no default"),
        }
    }

    async fn update_status(
        &self,
        _token: &str,
        order_id: &str,
        target: OrderStatus,
    ) -> Result<(), ApiError> {
        self.recorded_updates
            .lock()
            .unwrap()
            .push((order_id.to_string(), target));
        // Lock must not be held across the await below.
        let hold = self.update_hold.lock().unwrap().take();
        if let Some(rx) = hold {
            let _ = rx.await;
        }
        self.updates
            .lock()
            .unwrap()
            .pop_front()
            .expect("MockApi: no scripted status update response")
    }
}
