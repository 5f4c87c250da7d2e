//! Line items and the product references they are created from.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::ids::ProductId;

/// Catalog data handed to [`CartStore::add_to_cart`](crate::CartStore::add_to_cart).
///
/// Title, image and price are opaque to the cart; they are copied into the
/// line item as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    pub id: ProductId,
    pub title: String,
    #[serde(alias = "image_url")]
    pub image_url: String,
    pub price: f64,
}

impl ProductRef {
    /// Create a product reference.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }
}

/// One distinct product in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product identifier, unique within a cart.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Product image location.
    #[serde(alias = "image_url")]
    pub image_url: String,
    /// Unit price, as supplied by the catalog.
    pub price: f64,
    /// Quantity, never zero.
    #[serde(default = "one")]
    pub quantity: NonZeroU32,
}

fn one() -> NonZeroU32 {
    NonZeroU32::MIN
}

impl LineItem {
    /// Create a line item with quantity 1 from a product reference.
    pub fn from_product(product: ProductRef) -> Self {
        Self {
            id: product.id,
            title: product.title,
            image_url: product.image_url,
            price: product.price,
            quantity: NonZeroU32::MIN,
        }
    }

    /// Quantity as a plain integer.
    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// Copy of this item with one more unit. Saturates at `u32::MAX`.
    pub(crate) fn incremented(&self) -> Self {
        Self {
            quantity: self.quantity.saturating_add(1),
            ..self.clone()
        }
    }

    /// Copy of this item with one unit less, or `None` when that would leave
    /// zero units.
    pub(crate) fn decremented(&self) -> Option<Self> {
        NonZeroU32::new(self.quantity.get() - 1).map(|quantity| Self {
            quantity,
            ..self.clone()
        })
    }
}

impl From<ProductRef> for LineItem {
    fn from(product: ProductRef) -> Self {
        Self::from_product(product)
    }
}
