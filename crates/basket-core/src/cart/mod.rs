//! Shopping cart module.
//!
//! Contains the cart value, its line items, and the ordering policy applied
//! when quantities change.

mod cart;
mod line_item;
mod ordering;

pub use cart::Cart;
pub use line_item::{LineItem, ProductRef};
pub use ordering::OrderingPolicy;
