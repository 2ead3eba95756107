//! Test doubles for the store seams.
//!
//! Used by the cache and estimator suites to script authoritative counts
//! and to simulate an unreachable store without real network failures.

use crate::model::{LocationId, Offering, OfferingId};
use crate::store::{ActiveOrderSource, CounterStore, Decrement, OfferingSource, StoreError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

/// An [`ActiveOrderSource`] returning a scripted count.
///
/// Tracks how many times it was queried so tests can assert that the cache
/// hit the authoritative source exactly as often as expected (single-flight
/// miss resolution, fallback paths).
pub struct MockSource {
    count: AtomicU64,
    calls: AtomicUsize,
    available: AtomicBool,
}

impl MockSource {
    pub fn new(count: u64) -> Self {
        Self {
            count: AtomicU64::new(count),
            calls: AtomicUsize::new(0),
            available: AtomicBool::new(true),
        }
    }

    /// Changes the count returned by subsequent queries.
    pub fn set_count(&self, count: u64) {
        self.count.store(count, Ordering::SeqCst);
    }

    /// Makes subsequent queries fail with [`StoreError::Unavailable`].
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of `count_active` calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ActiveOrderSource for MockSource {
    async fn count_active(&self, _location: &LocationId) -> Result<u64, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.available.load(Ordering::SeqCst) {
            Ok(self.count.load(Ordering::SeqCst))
        } else {
            Err(StoreError::Unavailable("mock source down".into()))
        }
    }
}

/// A [`CounterStore`] where every call fails, simulating an unreachable
/// shared store.
pub struct DownStore;

#[async_trait]
impl CounterStore for DownStore {
    async fn get(&self, _key: &str, _ttl: Duration) -> Result<Option<u64>, StoreError> {
        Err(StoreError::Unavailable("store down".into()))
    }

    async fn put(&self, _key: &str, _value: u64, _ttl: Duration) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("store down".into()))
    }

    async fn incr(&self, _key: &str, _ttl: Duration) -> Result<u64, StoreError> {
        Err(StoreError::Unavailable("store down".into()))
    }

    async fn decr(&self, _key: &str, _ttl: Duration) -> Result<Decrement, StoreError> {
        Err(StoreError::Unavailable("store down".into()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("store down".into()))
    }

    async fn lock(&self, _key: &str, _ttl: Duration) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("store down".into()))
    }

    async fn unlock(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("store down".into()))
    }
}

/// An [`OfferingSource`] where every lookup fails.
pub struct DownOfferings;

#[async_trait]
impl OfferingSource for DownOfferings {
    async fn offering(&self, _id: &OfferingId) -> Result<Option<Offering>, StoreError> {
        Err(StoreError::Unavailable("offering source down".into()))
    }
}
