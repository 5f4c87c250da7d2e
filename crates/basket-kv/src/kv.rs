//! The key-value store interface.

use async_trait::async_trait;

use crate::KvError;

/// Durable string-keyed storage.
///
/// Values are opaque strings; callers own their encoding. Implementations
/// must make a successful `set` visible to every later `get` on the same
/// store, including after a process restart for durable backends.
///
/// # Example
///
/// ```rust,ignore
/// let store = FileStore::open(".basket").await?;
/// store.set("cart:products", payload).await?;
/// let raw: Option<String> = store.get("cart:products").await?;
/// ```
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Get the value stored under `key`.
    ///
    /// Returns `None` if the key doesn't exist.
    async fn get(&self, key: &str) -> Result<Option<String>, KvError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<(), KvError>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), KvError>;
}

/// Helper to build store keys with namespacing.
///
/// # Example
///
/// ```
/// let key = basket_kv::kv_key!("cart", "products");
/// assert_eq!(key, "cart:products");
/// ```
#[macro_export]
macro_rules! kv_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}
