//! The shared counter-store contract.

use crate::store::StoreError;
use async_trait::async_trait;
use std::time::Duration;

/// Result of a clamped decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decrement {
    /// The value after the decrement.
    pub value: u64,
    /// True if the stored value was already zero and was left at zero.
    pub clamped: bool,
}

/// A shared key/value store of non-negative counters with per-entry expiry.
///
/// Implementations must apply [`incr`](CounterStore::incr) and
/// [`decr`](CounterStore::decr) as a *single* atomic step (value change
/// plus expiry refresh together) under arbitrary concurrent callers.
/// Splitting them into a read followed by a write reintroduces the
/// lost-update race this trait exists to rule out.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Returns the live value for `key`, refreshing its expiry to `ttl` on
    /// a hit. An expired or absent entry yields `None`.
    async fn get(&self, key: &str, ttl: Duration) -> Result<Option<u64>, StoreError>;

    /// Overwrites `key` with `value`, expiring after `ttl`.
    async fn put(&self, key: &str, value: u64, ttl: Duration) -> Result<(), StoreError>;

    /// Atomically adds one to `key` (treating an absent entry as zero) and
    /// refreshes its expiry. Returns the new value.
    async fn incr(&self, key: &str, ttl: Duration) -> Result<u64, StoreError>;

    /// Atomically subtracts one from `key`, clamping at zero, and refreshes
    /// its expiry even when clamped.
    async fn decr(&self, key: &str, ttl: Duration) -> Result<Decrement, StoreError>;

    /// Removes `key` if present.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Acquires an advisory lock: creates `key` with `ttl` if no live entry
    /// exists and returns `true`, otherwise returns `false`. The TTL is the
    /// crash recovery: a holder that dies never blocks others past it.
    async fn lock(&self, key: &str, ttl: Duration) -> Result<bool, StoreError>;

    /// Releases a lock taken with [`lock`](CounterStore::lock).
    async fn unlock(&self, key: &str) -> Result<(), StoreError>;
}
