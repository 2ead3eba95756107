//! Counter cache behavior: miss resolution, atomicity, fallbacks, TTLs.

use kitchen_eta::cache::{CacheTtls, CounterCache};
use kitchen_eta::model::LocationId;
use kitchen_eta::store::mock::{DownStore, MockSource};
use kitchen_eta::store::{CounterStore, MemoryStore, StoreClient};
use std::sync::Arc;
use std::time::Duration;

fn spawn_store() -> StoreClient {
    let (store, client) = MemoryStore::new(64);
    tokio::spawn(store.run());
    client
}

fn cache_over(client: StoreClient, source: Arc<MockSource>) -> CounterCache {
    CounterCache::new(Arc::new(client), source)
}

#[tokio::test]
async fn miss_populates_from_authoritative_exactly_once() {
    let source = Arc::new(MockSource::new(7));
    let cache = cache_over(spawn_store(), source.clone());
    let loc: LocationId = "loc_1".into();

    assert_eq!(cache.get(&loc).await, 7);
    assert_eq!(source.calls(), 1);

    // Second read is a hit; the authoritative source is not consulted.
    assert_eq!(cache.get(&loc).await, 7);
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn concurrent_increments_are_never_lost() {
    let source = Arc::new(MockSource::new(0));
    let cache = cache_over(spawn_store(), source);
    let loc: LocationId = "loc_1".into();

    let mut tasks = Vec::new();
    for _ in 0..50 {
        let cache = cache.clone();
        let loc = loc.clone();
        tasks.push(tokio::spawn(async move { cache.increment(&loc).await }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(cache.get(&loc).await, 50);
}

#[tokio::test]
async fn interleaved_increments_and_decrements_net_out() {
    let source = Arc::new(MockSource::new(0));
    let cache = cache_over(spawn_store(), source);
    let loc: LocationId = "loc_1".into();

    // Seed well above zero so no decrement can clamp.
    cache.set(&loc, 100).await;

    let mut tasks = Vec::new();
    for i in 0..60 {
        let cache = cache.clone();
        let loc = loc.clone();
        tasks.push(tokio::spawn(async move {
            if i % 2 == 0 {
                cache.increment(&loc).await
            } else {
                cache.decrement(&loc).await
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    // 30 up, 30 down.
    assert_eq!(cache.get(&loc).await, 100);
}

#[tokio::test]
async fn decrement_at_zero_clamps_and_resyncs() {
    let source = Arc::new(MockSource::new(5));
    let cache = cache_over(spawn_store(), source.clone());
    let loc: LocationId = "loc_1".into();

    // Nothing cached, nothing to decrement: the clamp is treated as a
    // divergence signal and the count is re-derived from ground truth.
    assert_eq!(cache.decrement(&loc).await, 5);
    assert_eq!(source.calls(), 1);
    assert_eq!(cache.get(&loc).await, 5);
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn resync_overwrites_with_authoritative_value() {
    let source = Arc::new(MockSource::new(4));
    let cache = cache_over(spawn_store(), source.clone());
    let loc: LocationId = "loc_1".into();

    cache.set(&loc, 10).await;
    assert_eq!(cache.get(&loc).await, 10);

    assert_eq!(cache.resync(&loc).await, 4);
    assert_eq!(cache.get(&loc).await, 4);
}

#[tokio::test]
async fn invalidate_forces_repopulation() {
    let source = Arc::new(MockSource::new(3));
    let cache = cache_over(spawn_store(), source.clone());
    let loc: LocationId = "loc_1".into();

    assert_eq!(cache.get(&loc).await, 3);
    source.set_count(8);

    cache.invalidate(&loc).await;
    assert_eq!(cache.get(&loc).await, 8);
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn expired_entry_repopulates_on_next_read() {
    let source = Arc::new(MockSource::new(2));
    let ttls = CacheTtls {
        count: Duration::from_millis(50),
        lock: Duration::from_secs(10),
    };
    let cache = CounterCache::with_ttls(Arc::new(spawn_store()), source.clone(), ttls);
    let loc: LocationId = "loc_1".into();

    assert_eq!(cache.get(&loc).await, 2);
    assert_eq!(source.calls(), 1);

    tokio::time::sleep(Duration::from_millis(80)).await;
    source.set_count(9);

    assert_eq!(cache.get(&loc).await, 9);
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn contended_miss_lock_falls_back_to_uncached_read() {
    let store = spawn_store();
    let source = Arc::new(MockSource::new(6));
    let cache = cache_over(store.clone(), source.clone());
    let loc: LocationId = "loc_1".into();

    // Another worker is mid-resolution: its lock is held.
    assert!(store
        .lock("active_orders:loc_1:lock", Duration::from_secs(10))
        .await
        .unwrap());

    // The read still answers (from the authoritative source) but does not
    // populate the cache entry.
    assert_eq!(cache.get(&loc).await, 6);
    assert_eq!(source.calls(), 1);
    assert_eq!(
        store
            .get("active_orders:loc_1", Duration::from_secs(10))
            .await
            .unwrap(),
        None
    );

    // Once the lock is released, the next miss populates normally.
    store.unlock("active_orders:loc_1:lock").await.unwrap();
    assert_eq!(cache.get(&loc).await, 6);
    assert_eq!(source.calls(), 2);
    assert_eq!(cache.get(&loc).await, 6);
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn source_outage_during_miss_is_not_cached() {
    let store = spawn_store();
    let source = Arc::new(MockSource::new(7));
    source.set_available(false);
    let cache = cache_over(store.clone(), source.clone());
    let loc: LocationId = "loc_1".into();

    // The miss can't be resolved: best-effort zero, but nothing written,
    // so the outage is not frozen in for the entry's full TTL.
    assert_eq!(cache.get(&loc).await, 0);
    assert_eq!(
        store
            .get("active_orders:loc_1", Duration::from_secs(10))
            .await
            .unwrap(),
        None
    );

    // Once the source recovers the next read repopulates normally.
    source.set_available(true);
    assert_eq!(cache.get(&loc).await, 7);
    assert_eq!(cache.get(&loc).await, 7);
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn unreachable_store_degrades_to_authoritative_reads() {
    let source = Arc::new(MockSource::new(3));
    let cache = CounterCache::new(Arc::new(DownStore), source.clone());
    let loc: LocationId = "loc_1".into();

    assert_eq!(cache.get(&loc).await, 3);

    // Increment and decrement can't apply a delta; they resync instead.
    assert_eq!(cache.increment(&loc).await, 3);
    assert_eq!(cache.decrement(&loc).await, 3);
}

#[tokio::test]
async fn everything_down_yields_best_effort_zero() {
    let source = Arc::new(MockSource::new(3));
    source.set_available(false);
    let cache = CounterCache::new(Arc::new(DownStore), source);
    let loc: LocationId = "loc_1".into();

    assert_eq!(cache.get(&loc).await, 0);
    assert_eq!(cache.increment(&loc).await, 0);
}
