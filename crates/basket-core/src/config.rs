//! Cart store configuration.

use basket_kv::kv_key;
use serde::{Deserialize, Serialize};

use crate::cart::OrderingPolicy;

/// Settings for a [`CartStore`](crate::CartStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Key the cart is persisted under.
    #[serde(default = "default_key")]
    pub key: String,

    /// Position of items after a quantity change.
    #[serde(default)]
    pub ordering: OrderingPolicy,
}

fn default_key() -> String {
    kv_key!("cart", "products")
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            key: default_key(),
            ordering: OrderingPolicy::default(),
        }
    }
}

impl CartConfig {
    /// Set the storage key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Set the ordering policy.
    pub fn with_ordering(mut self, ordering: OrderingPolicy) -> Self {
        self.ordering = ordering;
        self
    }
}
