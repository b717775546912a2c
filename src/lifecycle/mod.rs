//! System lifecycle and orchestration.
//!
//! Individual pieces of the engine are simple; wiring them is where the
//! coordination lives. [`DashboardSystem`] is the conductor: it gates on
//! session validation, spawns the board actor with its injected context,
//! seeds the board, starts the poller, and coordinates clean shutdown
//! (drop the clients, let the channels close, await the tasks).
//!
//! [`setup_tracing`] initializes structured logging for the whole process;
//! levels come from `RUST_LOG`.

pub mod system;
pub mod tracing;

pub use self::tracing::setup_tracing;
pub use system::{DashboardConfig, DashboardSystem, StartError};
