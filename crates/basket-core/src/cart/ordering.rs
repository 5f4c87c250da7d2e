//! Position of line items after a quantity change.

use serde::{Deserialize, Serialize};

/// Where a line item sits after its quantity changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPolicy {
    /// Items keep the position they were first added at.
    #[default]
    Stable,

    /// An item whose quantity changes, and which stays in the cart, moves to
    /// the end. Applies to add, increment and decrement alike.
    MoveToEnd,
}

impl OrderingPolicy {
    /// Check if a touched item is relocated to the end.
    pub fn moves_touched_items(&self) -> bool {
        matches!(self, Self::MoveToEnd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_stable() {
        assert_eq!(OrderingPolicy::default(), OrderingPolicy::Stable);
        assert!(!OrderingPolicy::Stable.moves_touched_items());
        assert!(OrderingPolicy::MoveToEnd.moves_touched_items());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&OrderingPolicy::MoveToEnd).unwrap(),
            r#""move_to_end""#
        );
        let parsed: OrderingPolicy = serde_json::from_str(r#""stable""#).unwrap();
        assert_eq!(parsed, OrderingPolicy::Stable);
    }
}
