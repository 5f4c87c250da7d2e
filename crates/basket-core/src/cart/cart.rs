//! The cart value.

use serde::Serialize;

use crate::cart::{LineItem, OrderingPolicy, ProductRef};
use crate::ids::ProductId;

/// An ordered collection of line items, keyed by product id.
///
/// A `Cart` is an immutable value. Every operation returns a new cart and
/// leaves `self` untouched, so a snapshot held by a reader never changes
/// underneath it.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from items already known to have distinct ids.
    pub(crate) fn from_unique_items(items: Vec<LineItem>) -> Self {
        Self { items }
    }

    /// Cart with `product` added.
    ///
    /// If the product is already present this is the same as
    /// [`with_incremented`](Self::with_incremented); otherwise a new line item
    /// with quantity 1 is appended.
    pub fn with_product(&self, product: ProductRef, ordering: OrderingPolicy) -> Cart {
        match self.with_incremented(&product.id, ordering) {
            Some(cart) => cart,
            None => {
                let mut items = self.items.clone();
                items.push(product.into());
                Cart { items }
            }
        }
    }

    /// Cart with one more unit of `id`, or `None` if `id` is not in the cart.
    pub fn with_incremented(&self, id: &ProductId, ordering: OrderingPolicy) -> Option<Cart> {
        let index = self.position(id)?;
        let item = self.items[index].incremented();
        Some(self.with_replaced(index, Some(item), ordering))
    }

    /// Cart with one unit less of `id`, or `None` if `id` is not in the cart.
    ///
    /// An item at quantity 1 is removed rather than kept at zero.
    pub fn with_decremented(&self, id: &ProductId, ordering: OrderingPolicy) -> Option<Cart> {
        let index = self.position(id)?;
        let item = self.items[index].decremented();
        Some(self.with_replaced(index, item, ordering))
    }

    fn with_replaced(
        &self,
        index: usize,
        replacement: Option<LineItem>,
        ordering: OrderingPolicy,
    ) -> Cart {
        let mut items = self.items.clone();
        match replacement {
            None => {
                items.remove(index);
            }
            Some(item) if ordering.moves_touched_items() => {
                items.remove(index);
                items.push(item);
            }
            Some(item) => items[index] = item,
        }
        Cart { items }
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|i| &i.id == id)
    }

    /// Line items in cart order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over line items in cart order.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Get an item by product id.
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Quantity of `id`, if present.
    pub fn quantity_of(&self, id: &ProductId) -> Option<u32> {
        self.get(id).map(LineItem::quantity)
    }

    /// Check if `id` is in the cart.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.position(id).is_some()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total units across all line items (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity())).sum()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
