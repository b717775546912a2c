//! # WhatsFlow Board
//!
//! The order synchronization and reconciliation engine behind a
//! point-of-sale order dashboard: it gates on a persisted session,
//! continuously syncs the order list from the remote service, collapses
//! heterogeneous payloads into one canonical model, and moves orders through
//! their status workflow with optimistic updates and exact rollback.
//!
//! ## Architecture
//!
//! One actor — the board actor — owns all mutable state and processes its
//! messages sequentially in its own Tokio task. Everything else is either a
//! pure function, a trait seam, or a task that sends the actor messages:
//!
//! - [`session_gate`] — fail-closed session validation; nothing runs until
//!   it succeeds.
//! - [`normalize`] — pure raw-payload → [`model::Order`] mapping that never
//!   fails.
//! - [`board_actor`] — the state owner: order collection, seen-id set,
//!   sound preference, per-order in-flight transition guard.
//! - [`poller`] — interval + coalesced focus/visibility triggers, serialized
//!   into `Poll` refreshes.
//! - [`api`] — the remote service behind an async trait, with a `reqwest`
//!   transport and a scripted mock.
//! - [`storage`] / [`notify`] — the persisted-blob and audible-cue seams.
//! - [`lifecycle`] — wiring: [`lifecycle::DashboardSystem`] starts, seeds,
//!   and shuts the whole thing down.
//!
//! ## Concurrency model
//!
//! Every orders fetch is awaited inside the board actor's message loop, so
//! at most one is in flight and results apply in issue order — the
//! single-flight discipline is structural. Status updates are the exception:
//! the optimistic mutation applies in the loop, the remote call runs in a
//! spawned task and reports back as a message, and a per-order pending table
//! rejects concurrent transitions for the same id.
//!
//! ## Error policy
//!
//! Only [`session_gate::AuthError`] is fatal (back to login, persisted
//! session cleared). Fetch failures during background polling are logged and
//! swallowed; during user-triggered operations they surface. A failed status
//! update always restores the exact pre-mutation board. Malformed order
//! payloads are not errors at all — normalization absorbs them.
//!
//! ## Running the daemon
//!
//! ```bash
//! RUST_LOG=info cargo run -- --base-url https://orders.example.com
//! ```

pub mod api;
pub mod board_actor;
pub mod lifecycle;
pub mod model;
pub mod normalize;
pub mod notify;
pub mod poller;
pub mod session_gate;
pub mod storage;
