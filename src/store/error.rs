//! Error type for store and collaborator calls.

use thiserror::Error;

/// A store or collaborator could not be reached.
///
/// Covers closed channels, dropped responses, and backend timeouts alike:
/// from the caller's point of view they are all "the store is unavailable
/// right now", and every caller has a defined fallback for that.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
