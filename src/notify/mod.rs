//! New-order notification seam.
//!
//! The board actor fires a signal once per newly observed order while the
//! sound preference is enabled. Playback itself lives outside the engine;
//! implementations just receive the signal. Fire-and-forget, no backpressure.

use crate::model::Order;
use std::sync::Mutex;
use tracing::info;

/// Audible-cue sink, signalled once per newly detected order.
pub trait NotificationSink: Send + Sync {
    fn notify_new_order(&self, order: &Order);
}

/// Stand-in bell for the daemon: logs the arrival instead of playing audio.
#[derive(Debug, Default)]
pub struct BellLogger;

impl NotificationSink for BellLogger {
    fn notify_new_order(&self, order: &Order) {
        info!(order_no = %order.order_no, customer = %order.customer_name, "new order");
    }
}

/// Test sink recording which order ids were signalled, in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    signalled: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signalled(&self) -> Vec<String> {
        self.signalled.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.signalled.lock().unwrap().len()
    }
}

impl NotificationSink for RecordingSink {
    fn notify_new_order(&self, order: &Order) {
        self.signalled.lock().unwrap().push(order.id.clone());
    }
}
