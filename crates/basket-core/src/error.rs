//! Cart store error types.

use basket_kv::KvError;
use thiserror::Error;

use crate::codec::CodecError;
use crate::ids::ProductId;

/// Errors surfaced by [`CartStore`](crate::CartStore).
///
/// Besides a non-finite price, only persistence can fail. Unknown product ids
/// and repeated adds are ordinary inputs, and a malformed persisted cart
/// loads as an empty one.
#[derive(Error, Debug)]
pub enum CartError {
    /// The store could not be read at startup.
    #[error("Failed to load cart from {key}: {source}")]
    Load {
        key: String,
        #[source]
        source: KvError,
    },

    /// Writing the cart failed. The in-memory cart keeps the change.
    #[error("Failed to persist cart revision {revision}: {source}")]
    Persist {
        revision: u64,
        #[source]
        source: KvError,
    },

    /// A product was offered with a NaN or infinite price. The cart is
    /// left unchanged.
    #[error("Price of {id} is not a finite number: {price}")]
    InvalidPrice { id: ProductId, price: f64 },

    /// The cart could not be serialized.
    #[error("Failed to encode cart: {0}")]
    Encode(#[from] CodecError),
}
