//! Observability setup.
//!
//! One compact `tracing` subscriber for the whole process. The module path
//! is hidden (`with_target(false)`) because the interesting context is in
//! the structured fields, not the crate path.
//!
//! ```bash
//! RUST_LOG=info cargo run      # lifecycle + refresh summaries
//! RUST_LOG=debug cargo run     # per-request detail, coalesced triggers
//! ```

/// Initializes the global tracing subscriber. Call once, before anything
/// else logs.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
