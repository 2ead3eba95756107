//! # kitchen-eta
//!
//! A load-aware ETA engine for restaurant orders: it estimates when an
//! order will be ready by combining each item's fixed preparation time with
//! a real-time measure of how busy the kitchen is.
//!
//! ## How it fits together
//!
//! ```text
//!  order lifecycle events          estimate / load queries
//!          │                                │
//!          ▼                                ▼
//!   LifecycleBridge ──incr/decr──▶ CounterCache ◀──get── Estimator
//!                                      │    ▲
//!                             miss /   │    │ offerings
//!                             resync   ▼    │
//!                              ActiveOrderSource   OfferingSource
//! ```
//!
//! - [`cache::CounterCache`] keeps a shared per-location count of active
//!   orders in a [`store::CounterStore`], with TTL self-healing,
//!   single-flight miss resolution, and fallbacks to the authoritative
//!   source whenever the fast path is unavailable. Its callers never see a
//!   store failure, only a best-effort count.
//! - [`bridge::LifecycleBridge`] is the cache's only writer: it turns order
//!   status transitions into exactly one increment or decrement per
//!   active-set membership change.
//! - [`estimator::Estimator`] validates line items, sums base durations,
//!   scales by the [`load`] multiplier, and applies the ten-minute floor.
//! - [`system::EtaSystem`] wires it all up and owns the tasks.
//!
//! ## Concurrency model
//!
//! The shared counter store runs as a single actor task
//! ([`store::MemoryStore`]): every increment and decrement is one message,
//! so the read-modify-write-plus-TTL-refresh is atomic without locks.
//! Arbitrarily many request handlers can hold clones of the clients.
//!
//! ## Quick start
//!
//! ```ignore
//! let ledger = Arc::new(OrderLedger::new());
//! let system = EtaSystem::new(ledger.clone(), Arc::new(catalog));
//!
//! system.publish(ledger.create("o1", "loc_1", OrderStatus::Received).await).await?;
//! let estimate = system.estimator.estimate(&"loc_1".into(), &items).await?;
//! println!("ready at {}", estimate.ready_at);
//! ```

pub mod bridge;
pub mod cache;
pub mod estimator;
pub mod load;
pub mod model;
pub mod store;
pub mod system;
