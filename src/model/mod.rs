//! Pure domain types: typed identifiers, order statuses, offerings, and
//! lifecycle events. Nothing in this module talks to a store.

pub mod event;
pub mod ids;
pub mod offering;
pub mod status;

pub use event::*;
pub use ids::*;
pub use offering::*;
pub use status::*;
