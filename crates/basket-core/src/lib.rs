//! Persisted shopping-cart state for Basket.
//!
//! This crate owns the cart a storefront client works against:
//!
//! - **Cart**: immutable, id-keyed line items and the operations on them
//! - **Codec**: the versioned JSON layout carts are persisted in
//! - **CartStore**: the authoritative in-memory cart, kept in sync with a
//!   [`basket_kv::KvStore`] after every mutation
//!
//! # Example
//!
//! ```rust,ignore
//! use basket_core::prelude::*;
//! use basket_kv::MemoryStore;
//!
//! let carts = CartStore::open(MemoryStore::new(), CartConfig::default()).await?;
//!
//! carts.add_to_cart(ProductRef::new("p1", "Widget", "https://img/w.png", 9.99)).await?;
//! carts.add_to_cart(ProductRef::new("p1", "Widget", "https://img/w.png", 9.99)).await?;
//! carts.decrement(&"p1".into()).await?;
//!
//! assert_eq!(carts.snapshot().quantity_of(&"p1".into()), Some(1));
//! ```

pub mod cart;
pub mod codec;
pub mod config;
pub mod error;
pub mod ids;
pub mod store;

pub use cart::{Cart, LineItem, OrderingPolicy, ProductRef};
pub use codec::CodecError;
pub use config::CartConfig;
pub use error::CartError;
pub use ids::ProductId;
pub use store::CartStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{Cart, LineItem, OrderingPolicy, ProductRef};
    pub use crate::config::CartConfig;
    pub use crate::error::CartError;
    pub use crate::ids::ProductId;
    pub use crate::store::CartStore;
}
