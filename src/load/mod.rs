//! Load multiplier policy.
//!
//! Converts an active-order count into a prep-time scaling factor: a step
//! function that grows by [`STEP_MULTIPLIER`] − 1.0 for every full band of
//! [`LOAD_STEP_ORDERS`] active orders and saturates at [`MAX_MULTIPLIER`].

use serde::{Deserialize, Serialize};

/// Band width: the multiplier steps up once per this many active orders.
pub const LOAD_STEP_ORDERS: u64 = 5;

/// Per-band increase in integer hundredths; the canonical form, since the
/// step function is computed in hundredths.
pub(crate) const STEP_HUNDREDTHS: u64 = 20;

/// Saturation point in integer hundredths.
pub(crate) const MAX_HUNDREDTHS: u64 = 300;

/// Multiplier applied per full band (1.2 → +20% per band).
pub const STEP_MULTIPLIER: f64 = 1.0 + STEP_HUNDREDTHS as f64 / 100.0;

/// Saturation point of the multiplier.
pub const MAX_MULTIPLIER: f64 = MAX_HUNDREDTHS as f64 / 100.0;

/// Multipliers above this mark the location as highly loaded.
pub const HIGH_LOAD_MULTIPLIER: f64 = 2.0;

/// Scaling factor expressed in integer hundredths.
///
/// Kept in integers so band values are exact (120 is 1.2, never
/// 1.1999…) and the adjusted duration can be computed without float
/// rounding surprises.
pub(crate) fn multiplier_hundredths(active_count: u64) -> u64 {
    let bands = active_count / LOAD_STEP_ORDERS;
    100u64
        .saturating_add(bands.saturating_mul(STEP_HUNDREDTHS))
        .min(MAX_HUNDREDTHS)
}

/// Scaling factor for the given active-order count.
///
/// Flat within each band of [`LOAD_STEP_ORDERS`] orders, monotonically
/// non-decreasing, capped at [`MAX_MULTIPLIER`].
pub fn multiplier(active_count: u64) -> f64 {
    multiplier_hundredths(active_count) as f64 / 100.0
}

/// Whether a multiplier indicates high load. False at exactly 2.0.
pub fn is_high_load(multiplier: f64) -> bool {
    multiplier > HIGH_LOAD_MULTIPLIER
}

/// Snapshot of a location's load, for diagnostics and response shaping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadInfo {
    pub active_count: u64,
    /// Scaling factor, rounded to two decimals.
    pub multiplier: f64,
    pub is_high_load: bool,
}

impl LoadInfo {
    pub fn for_count(active_count: u64) -> Self {
        let multiplier = multiplier(active_count);
        Self {
            active_count,
            multiplier,
            is_high_load: is_high_load(multiplier),
        }
    }
}
