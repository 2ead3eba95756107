//! Prep-time estimator.
//!
//! Sums per-item base durations, scales the total by the location's load
//! multiplier, enforces the minimum ready time, and stamps the result
//! against the wall clock. Reads the counter cache; never writes it.

pub mod error;

pub use error::EstimateError;

use crate::cache::CounterCache;
use crate::load::{self, LoadInfo};
use crate::model::{LineItem, LocationId, Offering, OfferingId};
use crate::store::OfferingSource;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

/// No order is promised in under ten minutes, however fast the items and
/// however idle the kitchen.
pub const MIN_READY_SECONDS: u64 = 600;

/// A computed order-ready estimate.
///
/// Callers that persist an order store `ready_at` once, at creation; it
/// is never recomputed as load changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Estimate {
    /// When the order is expected to be ready.
    pub ready_at: DateTime<Utc>,
    /// Total wait from now, in seconds, after scaling and the floor.
    pub wait_seconds: u64,
    /// Unscaled sum of `base_prep_seconds * quantity` over the line items.
    pub base_seconds: u64,
    /// The load snapshot the estimate was computed under.
    pub load: LoadInfo,
}

/// Computes order-ready estimates for a location.
#[derive(Clone)]
pub struct Estimator {
    cache: CounterCache,
    offerings: Arc<dyn OfferingSource>,
}

impl Estimator {
    pub fn new(cache: CounterCache, offerings: Arc<dyn OfferingSource>) -> Self {
        Self { cache, offerings }
    }

    /// Estimates when an order of `line_items` at `location` will be ready.
    ///
    /// Validates every line item first (see [`EstimateError`]); validation
    /// failures leave all state untouched. The load count may be slightly
    /// stale; that is the accepted trade of the fast read path.
    #[instrument(skip(self, line_items), fields(items = line_items.len()))]
    pub async fn estimate(
        &self,
        location: &LocationId,
        line_items: &[LineItem],
    ) -> Result<Estimate, EstimateError> {
        let base_seconds = self.base_total(location, line_items).await?;
        let active_count = self.cache.get(location).await;

        // Scale in integer hundredths and round half-up, so a 1.2x band on
        // 300s is exactly 360s.
        let hundredths = load::multiplier_hundredths(active_count);
        let adjusted = base_seconds.saturating_mul(hundredths).saturating_add(50) / 100;
        let wait_seconds = adjusted.max(MIN_READY_SECONDS);

        let estimate = Estimate {
            ready_at: Utc::now() + TimeDelta::seconds(wait_seconds as i64),
            wait_seconds,
            base_seconds,
            load: LoadInfo::for_count(active_count),
        };
        debug!(
            base_seconds,
            active_count,
            wait_seconds,
            "Estimate computed"
        );
        Ok(estimate)
    }

    /// True only if every line item references an offering that exists,
    /// belongs to `location`, and is available. This is the precondition
    /// gate for both order creation and estimation-only queries.
    pub async fn validate_offerings(&self, line_items: &[LineItem], location: &LocationId) -> bool {
        self.base_total(location, line_items).await.is_ok()
    }

    /// Current load snapshot for `location`, independent of any order.
    pub async fn load_info(&self, location: &LocationId) -> LoadInfo {
        LoadInfo::for_count(self.cache.get(location).await)
    }

    /// Validates the line items and returns the unscaled duration total.
    async fn base_total(
        &self,
        location: &LocationId,
        line_items: &[LineItem],
    ) -> Result<u64, EstimateError> {
        if line_items.is_empty() {
            return Err(EstimateError::EmptyOrder);
        }

        let mut total: u64 = 0;
        for item in line_items {
            if item.quantity == 0 {
                return Err(EstimateError::ZeroQuantity(item.offering.clone()));
            }
            let offering = self.lookup(&item.offering).await?;
            if offering.location != *location {
                return Err(EstimateError::WrongLocation(item.offering.clone()));
            }
            if !offering.available {
                return Err(EstimateError::Unavailable(item.offering.clone()));
            }
            total = total
                .saturating_add(offering.base_prep_seconds.saturating_mul(item.quantity as u64));
        }
        Ok(total)
    }

    async fn lookup(&self, id: &OfferingId) -> Result<Offering, EstimateError> {
        self.offerings
            .offering(id)
            .await?
            .ok_or_else(|| EstimateError::UnknownOffering(id.clone()))
    }
}
