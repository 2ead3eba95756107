//! Lifecycle bridge: keeps the counter cache in step with order events.
//!
//! For every transition it compares the order's active-set membership
//! before and after and issues at most one cache call:
//!
//! - not active → active: increment
//! - active → not active: decrement
//! - membership unchanged: nothing
//!
//! The bridge is the only component that increments or decrements the
//! cache; the estimator only reads it.

use crate::cache::CounterCache;
use crate::model::OrderEvent;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Reacts to order lifecycle events by updating the counter cache.
#[derive(Clone)]
pub struct LifecycleBridge {
    cache: CounterCache,
}

impl LifecycleBridge {
    pub fn new(cache: CounterCache) -> Self {
        Self { cache }
    }

    /// Applies one lifecycle event.
    pub async fn apply(&self, event: &OrderEvent) {
        match (event.was_active(), event.is_active()) {
            (false, true) => {
                let count = self.cache.increment(&event.location).await;
                debug!(
                    order = %event.order_id,
                    location = %event.location,
                    count,
                    "Order entered active set"
                );
            }
            (true, false) => {
                let count = self.cache.decrement(&event.location).await;
                debug!(
                    order = %event.order_id,
                    location = %event.location,
                    count,
                    "Order left active set"
                );
            }
            // Transitions within the active set (received -> preparing ->
            // ready) and no-ops don't change the load.
            _ => {}
        }
    }

    /// Consumes events from `receiver` until the channel closes.
    pub async fn run(self, mut receiver: mpsc::Receiver<OrderEvent>) {
        info!("Lifecycle bridge started");
        while let Some(event) = receiver.recv().await {
            self.apply(&event).await;
        }
        info!("Lifecycle bridge shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LocationId, OrderEvent, OrderStatus};
    use crate::store::mock::MockSource;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn bridge_with_cache() -> (LifecycleBridge, CounterCache) {
        let (store, client) = MemoryStore::new(32);
        tokio::spawn(store.run());
        let cache = CounterCache::new(Arc::new(client), Arc::new(MockSource::new(0)));
        (LifecycleBridge::new(cache.clone()), cache)
    }

    #[tokio::test]
    async fn creation_increments_and_completion_decrements() {
        let (bridge, cache) = bridge_with_cache();
        let loc: LocationId = "loc_1".into();

        bridge
            .apply(&OrderEvent::created("o1", "loc_1", OrderStatus::Received))
            .await;
        assert_eq!(cache.get(&loc).await, 1);

        // Active -> active: no cache call, count unchanged.
        bridge
            .apply(&OrderEvent::status_changed(
                "o1",
                "loc_1",
                OrderStatus::Received,
                OrderStatus::Preparing,
            ))
            .await;
        bridge
            .apply(&OrderEvent::status_changed(
                "o1",
                "loc_1",
                OrderStatus::Preparing,
                OrderStatus::Ready,
            ))
            .await;
        assert_eq!(cache.get(&loc).await, 1);

        bridge
            .apply(&OrderEvent::status_changed(
                "o1",
                "loc_1",
                OrderStatus::Ready,
                OrderStatus::Completed,
            ))
            .await;
        assert_eq!(cache.get(&loc).await, 0);
    }

    #[tokio::test]
    async fn delete_and_restore_adjust_membership() {
        let (bridge, cache) = bridge_with_cache();
        let loc: LocationId = "loc_1".into();

        bridge
            .apply(&OrderEvent::created("o1", "loc_1", OrderStatus::Preparing))
            .await;
        bridge
            .apply(&OrderEvent::deleted("o1", "loc_1", OrderStatus::Preparing))
            .await;
        assert_eq!(cache.get(&loc).await, 0);

        bridge
            .apply(&OrderEvent::restored("o1", "loc_1", OrderStatus::Preparing))
            .await;
        assert_eq!(cache.get(&loc).await, 1);

        // Deleting an already-completed order is not a membership change.
        bridge
            .apply(&OrderEvent::created("o2", "loc_1", OrderStatus::Completed))
            .await;
        bridge
            .apply(&OrderEvent::deleted("o2", "loc_1", OrderStatus::Completed))
            .await;
        assert_eq!(cache.get(&loc).await, 1);
    }
}
