//! Type-safe identifiers for the domain entities.
//!
//! Each id is a newtype over `String` so the compiler rejects mixing up,
//! say, an offering id and a location id in a lookup call.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id!(
    /// Identifies a restaurant location.
    LocationId
);

string_id!(
    /// Identifies a catalog menu item.
    MenuItemId
);

string_id!(
    /// Identifies a menu item offered at a specific location.
    OfferingId
);

string_id!(
    /// Identifies an order.
    OrderId
);
