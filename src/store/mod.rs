//! Shared stores and collaborator seams.
//!
//! The counter cache talks to two external parties through the traits
//! defined here:
//!
//! - [`CounterStore`]: the shared, low-latency key/value store holding the
//!   per-location counts and miss-resolution locks. [`MemoryStore`] is the
//!   in-process implementation: a single actor task owns the map, so every
//!   read-modify-write arrives as one message and is applied atomically.
//! - [`ActiveOrderSource`]: the authoritative (slow but always correct)
//!   count of active orders, backed by the durable order store.
//! - [`OfferingSource`]: offering lookup for estimation-time validation.
//!
//! [`OrderLedger`] and [`Catalog`] are reference in-memory collaborators
//! used by the integration suite and small deployments; [`mock`] holds test
//! doubles.

pub mod counter_store;
pub mod error;
pub mod ledger;
pub mod memory;
pub mod mock;
pub mod source;

pub use counter_store::{CounterStore, Decrement};
pub use error::StoreError;
pub use ledger::{Catalog, OrderLedger};
pub use memory::{MemoryStore, StoreClient};
pub use source::{ActiveOrderSource, OfferingSource};
