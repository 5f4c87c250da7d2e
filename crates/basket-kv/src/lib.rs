//! Async key-value persistence layer for Basket.
//!
//! Defines the [`KvStore`] interface the cart core persists through, plus two
//! backends: [`MemoryStore`] for tests and ephemeral carts, and [`FileStore`]
//! for state that must survive a restart.
//!
//! # Example
//!
//! ```rust,ignore
//! use basket_kv::{kv_key, FileStore, KvStore};
//!
//! let store = FileStore::open(".basket").await?;
//! let key = kv_key!("cart", "products");
//!
//! store.set(&key, payload).await?;
//! let raw: Option<String> = store.get(&key).await?;
//! store.delete(&key).await?;
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::KvError;
pub use file::FileStore;
pub use kv::KvStore;
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{kv_key, FileStore, KvError, KvStore, MemoryStore};
}
