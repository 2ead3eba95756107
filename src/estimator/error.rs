//! Error types for estimation and line-item validation.

use crate::model::OfferingId;
use crate::store::StoreError;
use thiserror::Error;

/// Why an estimate could not be produced.
///
/// Every variant except [`Lookup`](EstimateError::Lookup) is a validation
/// failure: surfaced to the caller with nothing mutated and the cache
/// untouched.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EstimateError {
    /// The order has no line items.
    #[error("order has no line items")]
    EmptyOrder,

    /// A line item has a quantity of zero.
    #[error("line item for {0} has zero quantity")]
    ZeroQuantity(OfferingId),

    /// The referenced offering does not exist.
    #[error("offering not found: {0}")]
    UnknownOffering(OfferingId),

    /// The offering exists but belongs to a different location.
    #[error("offering {0} does not belong to this location")]
    WrongLocation(OfferingId),

    /// The offering is currently not available for ordering.
    #[error("offering {0} is not available")]
    Unavailable(OfferingId),

    /// The offering source could not be reached.
    #[error("offering lookup failed: {0}")]
    Lookup(#[from] StoreError),
}
