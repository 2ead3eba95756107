//! Reference in-memory collaborators.
//!
//! [`OrderLedger`] plays the durable order store: it records order statuses
//! and answers the authoritative active count. [`Catalog`] plays the menu
//! service. Both are real enough for the integration suite and for small
//! single-process deployments; production systems swap in their own
//! [`ActiveOrderSource`] / [`OfferingSource`] implementations.

use crate::model::{
    LocationId, MenuItem, MenuItemId, Offering, OfferingId, OrderEvent, OrderId, OrderStatus,
};
use crate::store::{ActiveOrderSource, OfferingSource, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

struct Record {
    location: LocationId,
    /// `None` marks a soft-deleted order; restore brings it back.
    status: Option<OrderStatus>,
}

/// In-memory order store keyed by order id.
///
/// Every mutation returns the [`OrderEvent`] describing the transition, so
/// callers can forward it straight to the lifecycle bridge.
#[derive(Default)]
pub struct OrderLedger {
    orders: Mutex<HashMap<OrderId, Record>>,
}

impl OrderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new order and returns its creation event.
    pub async fn create(
        &self,
        order_id: impl Into<OrderId>,
        location: impl Into<LocationId>,
        status: OrderStatus,
    ) -> OrderEvent {
        let order_id = order_id.into();
        let location = location.into();
        self.orders.lock().await.insert(
            order_id.clone(),
            Record {
                location: location.clone(),
                status: Some(status),
            },
        );
        OrderEvent::created(order_id, location, status)
    }

    /// Moves an order to `new` status. Returns `None` for an unknown or
    /// deleted order.
    pub async fn set_status(&self, order_id: &OrderId, new: OrderStatus) -> Option<OrderEvent> {
        let mut orders = self.orders.lock().await;
        let record = orders.get_mut(order_id)?;
        let old = record.status?;
        record.status = Some(new);
        Some(OrderEvent::status_changed(
            order_id.clone(),
            record.location.clone(),
            old,
            new,
        ))
    }

    /// Soft-deletes an order. Returns `None` if it is unknown or already
    /// deleted.
    pub async fn delete(&self, order_id: &OrderId) -> Option<OrderEvent> {
        let mut orders = self.orders.lock().await;
        let record = orders.get_mut(order_id)?;
        let old = record.status.take()?;
        Some(OrderEvent::deleted(
            order_id.clone(),
            record.location.clone(),
            old,
        ))
    }

    /// Restores a soft-deleted order into `status`.
    pub async fn restore(&self, order_id: &OrderId, status: OrderStatus) -> Option<OrderEvent> {
        let mut orders = self.orders.lock().await;
        let record = orders.get_mut(order_id)?;
        if record.status.is_some() {
            return None;
        }
        record.status = Some(status);
        Some(OrderEvent::restored(
            order_id.clone(),
            record.location.clone(),
            status,
        ))
    }
}

#[async_trait]
impl ActiveOrderSource for OrderLedger {
    async fn count_active(&self, location: &LocationId) -> Result<u64, StoreError> {
        let orders = self.orders.lock().await;
        let count = orders
            .values()
            .filter(|r| r.location == *location && r.status.is_some_and(OrderStatus::is_active))
            .count();
        Ok(count as u64)
    }
}

/// In-memory menu catalog: items plus per-location offerings.
#[derive(Default)]
pub struct Catalog {
    items: HashMap<MenuItemId, MenuItem>,
    offerings: HashMap<OfferingId, Offering>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, item: MenuItem) {
        self.items.insert(item.id.clone(), item);
    }

    /// Offers a catalog item at a location, copying the item's base
    /// preparation time onto the offering. Returns `None` for an unknown
    /// item.
    pub fn offer(
        &mut self,
        id: impl Into<OfferingId>,
        location: impl Into<LocationId>,
        menu_item: &MenuItemId,
    ) -> Option<OfferingId> {
        let item = self.items.get(menu_item)?;
        let id = id.into();
        self.offerings.insert(
            id.clone(),
            Offering::new(
                id.clone(),
                location,
                menu_item.clone(),
                item.base_prep_seconds,
            ),
        );
        Some(id)
    }

    /// Marks an offering unavailable. No-op for unknown ids.
    pub fn withdraw(&mut self, id: &OfferingId) {
        if let Some(offering) = self.offerings.get_mut(id) {
            offering.available = false;
        }
    }
}

#[async_trait]
impl OfferingSource for Catalog {
    async fn offering(&self, id: &OfferingId) -> Result<Option<Offering>, StoreError> {
        Ok(self.offerings.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ledger_counts_only_active_orders_at_location() {
        let ledger = OrderLedger::new();
        let loc: LocationId = "loc_1".into();

        ledger.create("o1", "loc_1", OrderStatus::Received).await;
        ledger.create("o2", "loc_1", OrderStatus::Preparing).await;
        ledger.create("o3", "loc_1", OrderStatus::Completed).await;
        ledger.create("o4", "loc_2", OrderStatus::Received).await;

        assert_eq!(ledger.count_active(&loc).await.unwrap(), 2);

        ledger
            .set_status(&"o1".into(), OrderStatus::Completed)
            .await
            .unwrap();
        assert_eq!(ledger.count_active(&loc).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_and_restore_round_trip_events() {
        let ledger = OrderLedger::new();
        ledger.create("o1", "loc_1", OrderStatus::Ready).await;

        let deleted = ledger.delete(&"o1".into()).await.unwrap();
        assert_eq!(deleted.old_status, Some(OrderStatus::Ready));
        assert_eq!(deleted.new_status, None);

        // Double delete is a no-op.
        assert!(ledger.delete(&"o1".into()).await.is_none());

        let restored = ledger
            .restore(&"o1".into(), OrderStatus::Ready)
            .await
            .unwrap();
        assert_eq!(restored.old_status, None);
        assert_eq!(restored.new_status, Some(OrderStatus::Ready));
    }
}
