//! Load-counter cache with single-flight miss resolution and authoritative
//! fallbacks.
//!
//! Every public operation returns a plain count: store failures never cross
//! this boundary. A failed read degrades to a direct authoritative query; a
//! failed increment or decrement degrades to a full [`resync`], sacrificing
//! a point-in-time delta to re-establish the count from ground truth.
//!
//! [`resync`]: CounterCache::resync

use crate::model::LocationId;
use crate::store::{ActiveOrderSource, CounterStore, Decrement};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Key prefix shared by count and lock entries.
const KEY_PREFIX: &str = "active_orders";

/// Safety-net expiry for count entries; refreshed on every read and write,
/// so it only fires for locations nobody has touched in an hour.
const DEFAULT_COUNT_TTL: Duration = Duration::from_secs(3600);

/// Expiry for the miss-resolution lock. Short: it only needs to outlive one
/// authoritative query, and it doubles as crash recovery for a holder that
/// never released.
const DEFAULT_LOCK_TTL: Duration = Duration::from_secs(10);

/// Expiry settings for the cache's store entries.
#[derive(Debug, Clone, Copy)]
pub struct CacheTtls {
    pub count: Duration,
    pub lock: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT_TTL,
            lock: DEFAULT_LOCK_TTL,
        }
    }
}

/// Shared mapping from location to its current active-order count.
///
/// One entry per location lives in the [`CounterStore`] under
/// `active_orders:{location}`, with a sibling `…:lock` key used to
/// single-flight cache-miss resolution. The lifecycle bridge is the only
/// writer of increments and decrements; the estimator only reads.
#[derive(Clone)]
pub struct CounterCache {
    store: Arc<dyn CounterStore>,
    source: Arc<dyn ActiveOrderSource>,
    ttls: CacheTtls,
}

impl CounterCache {
    pub fn new(store: Arc<dyn CounterStore>, source: Arc<dyn ActiveOrderSource>) -> Self {
        Self::with_ttls(store, source, CacheTtls::default())
    }

    pub fn with_ttls(
        store: Arc<dyn CounterStore>,
        source: Arc<dyn ActiveOrderSource>,
        ttls: CacheTtls,
    ) -> Self {
        Self { store, source, ttls }
    }

    /// Current active-order count for `location`.
    ///
    /// Cache hit: the stored value, TTL refreshed. Miss: resolved under the
    /// per-location lock (or, if the lock is contended, answered with one
    /// uncached authoritative read). Store unreachable: answered straight
    /// from the authoritative source.
    pub async fn get(&self, location: &LocationId) -> u64 {
        let key = count_key(location);
        match self.store.get(&key, self.ttls.count).await {
            Ok(Some(count)) => count,
            Ok(None) => self.resolve_miss(location, &key).await,
            Err(e) => {
                warn!(%location, error = %e, "Counter store unreachable on read");
                self.authoritative(location).await
            }
        }
    }

    /// Overwrites the cached count for `location`.
    pub async fn set(&self, location: &LocationId, count: u64) {
        if let Err(e) = self.store.put(&count_key(location), count, self.ttls.count).await {
            warn!(%location, count, error = %e, "Could not write counter cache");
        }
    }

    /// Atomically adds one active order and returns the new count.
    ///
    /// Called by the lifecycle bridge when an order enters the active set.
    /// If the store is unreachable the delta is abandoned in favor of a
    /// [`resync`](CounterCache::resync).
    pub async fn increment(&self, location: &LocationId) -> u64 {
        match self.store.incr(&count_key(location), self.ttls.count).await {
            Ok(count) => {
                debug!(%location, count, "Active count incremented");
                count
            }
            Err(e) => {
                warn!(%location, error = %e, "Increment failed, resyncing");
                self.resync(location).await
            }
        }
    }

    /// Atomically removes one active order and returns the new count.
    ///
    /// A decrement that finds the counter already at zero means the cache
    /// has diverged from ground truth (a missed increment or an
    /// out-of-order event), so it triggers a resync instead of trusting the
    /// clamped value.
    pub async fn decrement(&self, location: &LocationId) -> u64 {
        match self.store.decr(&count_key(location), self.ttls.count).await {
            Ok(Decrement { value, clamped: false }) => {
                debug!(%location, count = value, "Active count decremented");
                value
            }
            Ok(Decrement { clamped: true, .. }) => {
                debug!(%location, "Decrement clamped at zero, resyncing");
                self.resync(location).await
            }
            Err(e) => {
                warn!(%location, error = %e, "Decrement failed, resyncing");
                self.resync(location).await
            }
        }
    }

    /// Drops the cached entry; the next read repopulates it.
    pub async fn invalidate(&self, location: &LocationId) {
        if let Err(e) = self.store.remove(&count_key(location)).await {
            warn!(%location, error = %e, "Could not invalidate counter cache");
        }
    }

    /// Re-derives the count from the authoritative source and overwrites
    /// the cache entry.
    ///
    /// The overwrite is not atomic with respect to concurrent increments;
    /// that relaxation is accepted only on the failure paths that call
    /// this, never during normal operation.
    pub async fn resync(&self, location: &LocationId) -> u64 {
        let key = count_key(location);
        match self.source.count_active(location).await {
            Ok(count) => {
                if let Err(e) = self.store.put(&key, count, self.ttls.count).await {
                    warn!(%location, count, error = %e, "Resync could not write the cache");
                }
                debug!(%location, count, "Resynced from authoritative source");
                count
            }
            Err(e) => {
                // Both stores down. Best effort: the stale cached value if
                // one is readable, otherwise zero.
                error!(%location, error = %e, "Resync failed, authoritative source unreachable");
                match self.store.get(&key, self.ttls.count).await {
                    Ok(Some(count)) => count,
                    _ => 0,
                }
            }
        }
    }

    /// Resolves a cache miss under the per-location lock.
    async fn resolve_miss(&self, location: &LocationId, key: &str) -> u64 {
        let lock_key = lock_key(location);
        match self.store.lock(&lock_key, self.ttls.lock).await {
            Ok(true) => {
                // Another caller may have populated the entry while we
                // raced for the lock.
                let count = match self.store.get(key, self.ttls.count).await {
                    Ok(Some(count)) => count,
                    _ => match self.source.count_active(location).await {
                        Ok(count) => {
                            if let Err(e) = self.store.put(key, count, self.ttls.count).await {
                                warn!(%location, count, error = %e, "Could not populate counter cache");
                            }
                            count
                        }
                        Err(e) => {
                            // Never cache the best-effort zero: leaving the
                            // entry absent makes the next read retry the
                            // source once it recovers.
                            error!(%location, error = %e, "Authoritative source unreachable, assuming zero load");
                            0
                        }
                    },
                };
                // The lock never outlives the holder's work.
                if let Err(e) = self.store.unlock(&lock_key).await {
                    warn!(%location, error = %e, "Could not release miss lock");
                }
                count
            }
            Ok(false) => {
                debug!(%location, "Miss lock contended, uncached authoritative read");
                self.authoritative(location).await
            }
            Err(e) => {
                warn!(%location, error = %e, "Miss lock unavailable");
                self.authoritative(location).await
            }
        }
    }

    /// Direct authoritative read, absorbing failures into a best-effort
    /// zero (zero load means the unconditional minimum applies downstream).
    async fn authoritative(&self, location: &LocationId) -> u64 {
        match self.source.count_active(location).await {
            Ok(count) => count,
            Err(e) => {
                error!(%location, error = %e, "Authoritative source unreachable, assuming zero load");
                0
            }
        }
    }
}

fn count_key(location: &LocationId) -> String {
    format!("{}:{}", KEY_PREFIX, location)
}

fn lock_key(location: &LocationId) -> String {
    format!("{}:{}:lock", KEY_PREFIX, location)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_namespace_separates_count_and_lock() {
        let loc: LocationId = "loc_42".into();
        assert_eq!(count_key(&loc), "active_orders:loc_42");
        assert_eq!(lock_key(&loc), "active_orders:loc_42:lock");
    }
}
