//! Persisted cart representation.
//!
//! Carts are stored as a versioned JSON envelope:
//!
//! ```json
//! { "version": 1, "items": [ { "id": "p1", "title": "Widget",
//!   "imageUrl": "u", "price": 9.99, "quantity": 1 } ] }
//! ```
//!
//! The older layout, a bare array of items using `image_url` and possibly
//! omitting `quantity`, is still read. It is never written.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::{Cart, LineItem};
use crate::ids::ProductId;

/// Schema version written by [`encode`].
pub const CURRENT_VERSION: u32 = 1;

/// Errors produced while encoding or decoding a persisted cart.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Payload is not valid JSON or doesn't match either layout.
    #[error("Malformed cart payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Payload was written by a newer schema.
    #[error("Unsupported cart schema version {found} (newest readable is {newest})", newest = CURRENT_VERSION)]
    UnsupportedVersion { found: u32 },

    /// Two items share a product id.
    #[error("Duplicate line item: {0}")]
    DuplicateItem(ProductId),

    /// Price can't be represented in JSON.
    #[error("Price of {0} is not a finite number")]
    NonFinitePrice(ProductId),
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    items: &'a [LineItem],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Versioned { version: u32, items: Vec<LineItem> },
    Legacy(Vec<LineItem>),
}

/// Serialize `cart` in the current layout.
pub fn encode(cart: &Cart) -> Result<String, CodecError> {
    if let Some(item) = cart.iter().find(|i| !i.price.is_finite()) {
        return Err(CodecError::NonFinitePrice(item.id.clone()));
    }

    let envelope = EnvelopeRef {
        version: CURRENT_VERSION,
        items: cart.items(),
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Parse a persisted cart written in the current or the legacy layout.
pub fn decode(raw: &str) -> Result<Cart, CodecError> {
    let items = match serde_json::from_str::<Payload>(raw)? {
        Payload::Versioned { version, .. } if version > CURRENT_VERSION => {
            return Err(CodecError::UnsupportedVersion { found: version });
        }
        Payload::Versioned { items, .. } | Payload::Legacy(items) => items,
    };

    let mut seen = HashSet::with_capacity(items.len());
    for item in &items {
        if !seen.insert(&item.id) {
            return Err(CodecError::DuplicateItem(item.id.clone()));
        }
    }

    Ok(Cart::from_unique_items(items))
}
