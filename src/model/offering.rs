//! Menu items, location offerings, and order line items.

use crate::model::{LocationId, MenuItemId, OfferingId};
use serde::{Deserialize, Serialize};

/// A catalog menu item with its fixed preparation time.
///
/// The base duration is what the kitchen needs for one unit of this item
/// with nothing else on the board; load scaling happens on top of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    /// Preparation time for a single unit, in seconds.
    pub base_prep_seconds: u64,
}

impl MenuItem {
    pub fn new(id: impl Into<MenuItemId>, name: impl Into<String>, base_prep_seconds: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_prep_seconds,
        }
    }
}

/// A menu item made available at one location.
///
/// Only offerings with `available == true` are eligible for ordering and
/// estimation. The base duration is carried here as well so an estimate
/// needs a single lookup per line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offering {
    pub id: OfferingId,
    pub location: LocationId,
    pub menu_item: MenuItemId,
    pub base_prep_seconds: u64,
    pub available: bool,
}

impl Offering {
    pub fn new(
        id: impl Into<OfferingId>,
        location: impl Into<LocationId>,
        menu_item: impl Into<MenuItemId>,
        base_prep_seconds: u64,
    ) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
            menu_item: menu_item.into(),
            base_prep_seconds,
            available: true,
        }
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

/// One (offering, quantity) pair of an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub offering: OfferingId,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(offering: impl Into<OfferingId>, quantity: u32) -> Self {
        Self {
            offering: offering.into(),
            quantity,
        }
    }
}
