//! The order board actor.
//!
//! One actor owns every piece of mutable engine state: the order collection,
//! the seen-id set, the sound preference, and the table of in-flight status
//! transitions. All refresh triggers — timer ticks, focus/visibility events,
//! manual refreshes, post-mutation resyncs — arrive as messages on its one
//! channel, and every orders fetch is awaited inside the message loop. That
//! makes the two timing invariants structural rather than conventional: at
//! most one fetch is ever in flight, and responses apply strictly in issue
//! order.
//!
//! Status transitions are the one deliberately concurrent piece: the
//! optimistic mutation applies synchronously in the loop, while the remote
//! update runs in a spawned task that reports back by message. Views stay
//! live (and show the optimistic state) until the update resolves.
//!
//! ## Structure
//!
//! - [`actor`] — [`BoardActor`] and its run loop
//! - [`client`] — [`BoardClient`], the cheap-to-clone handle
//! - [`message`] — the request enum and refresh kinds
//! - [`error`] — [`BoardError`]

pub mod actor;
pub mod client;
pub mod error;
pub mod message;

pub use actor::{BoardActor, BoardContext};
pub use client::BoardClient;
pub use error::BoardError;
pub use message::{BoardRequest, RefreshKind, RefreshSummary};

use tokio::sync::mpsc;

/// Creates a new board actor and its client.
///
/// The actor must be started with [`BoardActor::run`]; it shuts down when
/// every client clone has been dropped. Pending transition I/O holds only a
/// weak handle and never keeps the actor alive.
pub fn new(buffer_size: usize) -> (BoardActor, BoardClient) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let actor = BoardActor::new(receiver, sender.downgrade());
    let client = BoardClient::new(sender);
    (actor, client)
}
