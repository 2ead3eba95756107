//! Structured logging setup.
//!
//! Everything in the crate logs through the `tracing` crate: the store
//! actor and bridge log their lifecycles, the cache logs every degraded
//! path (store unreachable, lock contention, clamp-to-zero resync), and the
//! estimator instruments its public entry points.
//!
//! Levels follow the error-handling policy: validation failures are the
//! caller's problem and are not logged here; store failures are absorbed
//! and logged at `warn` (or `error` when even the authoritative source is
//! gone); clamped decrements log at `debug`, expected eventual-consistency
//! noise rather than a bug signal.
//!
//! ```bash
//! # Compact logs
//! RUST_LOG=info cargo run
//!
//! # Show every cache operation
//! RUST_LOG=debug cargo test
//! ```

/// Initializes the tracing subscriber. Call once at process start.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
