//! Order statuses and the active-set rule.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Lifecycle status of an order.
///
/// An order contributes to kitchen load ("is active") from the moment it is
/// received until it is completed. `Completed` is the only terminal state
/// reachable from the active statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Received,
    Preparing,
    Ready,
    Completed,
}

impl OrderStatus {
    /// Whether an order in this status counts toward kitchen load.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Received | Self::Preparing | Self::Ready)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Received => "received",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Completed => "completed",
        };
        write!(f, "{}", s)
    }
}
