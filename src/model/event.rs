//! Order lifecycle transition events.

use crate::model::{LocationId, OrderId, OrderStatus};
use serde::{Deserialize, Serialize};

/// A status transition reported by the order lifecycle.
///
/// `old_status` is `None` for a brand-new order; `new_status` is `None` for
/// a deleted one. The bridge only cares about the active-set membership
/// these two sides imply, not about the specific statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderEvent {
    pub order_id: OrderId,
    pub location: LocationId,
    pub old_status: Option<OrderStatus>,
    pub new_status: Option<OrderStatus>,
}

impl OrderEvent {
    /// A new order entered the system in `status`.
    pub fn created(
        order_id: impl Into<OrderId>,
        location: impl Into<LocationId>,
        status: OrderStatus,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            location: location.into(),
            old_status: None,
            new_status: Some(status),
        }
    }

    /// An existing order moved from `old` to `new`.
    pub fn status_changed(
        order_id: impl Into<OrderId>,
        location: impl Into<LocationId>,
        old: OrderStatus,
        new: OrderStatus,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            location: location.into(),
            old_status: Some(old),
            new_status: Some(new),
        }
    }

    /// An order was removed while in `old` status.
    pub fn deleted(
        order_id: impl Into<OrderId>,
        location: impl Into<LocationId>,
        old: OrderStatus,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            location: location.into(),
            old_status: Some(old),
            new_status: None,
        }
    }

    /// A previously deleted order was restored into `status`.
    pub fn restored(
        order_id: impl Into<OrderId>,
        location: impl Into<LocationId>,
        status: OrderStatus,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            location: location.into(),
            old_status: None,
            new_status: Some(status),
        }
    }

    /// Whether the order counted toward load before this event.
    pub fn was_active(&self) -> bool {
        self.old_status.is_some_and(OrderStatus::is_active)
    }

    /// Whether the order counts toward load after this event.
    pub fn is_active(&self) -> bool {
        self.new_status.is_some_and(OrderStatus::is_active)
    }
}
