//! Collaborator seams: the authoritative counter and offering lookup.

use crate::model::{LocationId, Offering, OfferingId};
use crate::store::StoreError;
use async_trait::async_trait;

/// The authoritative count of active orders, derived from the durable
/// order store. Slow relative to the counter cache, but always correct at
/// the moment it answers; queried on cache misses and resyncs.
#[async_trait]
pub trait ActiveOrderSource: Send + Sync {
    async fn count_active(&self, location: &LocationId) -> Result<u64, StoreError>;
}

/// Lookup of offerings for estimation-time validation.
#[async_trait]
pub trait OfferingSource: Send + Sync {
    async fn offering(&self, id: &OfferingId) -> Result<Option<Offering>, StoreError>;
}
