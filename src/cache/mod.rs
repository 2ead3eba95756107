//! The fast counter cache: low-latency active-order counts per location.

pub mod counter_cache;

pub use counter_cache::{CacheTtls, CounterCache};
