//! The cart store: in-memory cart kept in sync with a key-value store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use basket_kv::KvStore;
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::cart::{Cart, ProductRef};
use crate::codec;
use crate::config::CartConfig;
use crate::error::CartError;
use crate::ids::ProductId;

/// Authoritative cart state plus its persistence.
///
/// Mutations apply to the in-memory cart synchronously and then persist the
/// full cart under [`CartConfig::key`]. Every applied mutation bumps a
/// revision. Writes are serialized and always encode the cart as it is at
/// write time, so a write can never replace the stored cart with an older
/// revision than the one already stored.
///
/// # Example
///
/// ```rust,ignore
/// use basket_core::prelude::*;
/// use basket_kv::FileStore;
///
/// let store = FileStore::open(".basket").await?;
/// let carts = CartStore::open(store, CartConfig::default()).await?;
///
/// carts.add_to_cart(ProductRef::new("p1", "Widget", "https://img/w.png", 9.99)).await?;
/// carts.increment(&"p1".into()).await?;
///
/// for item in carts.snapshot().iter() {
///     println!("{} x{}", item.title, item.quantity());
/// }
/// ```
pub struct CartStore<S> {
    store: S,
    config: CartConfig,
    state: Mutex<State>,
    /// Held for the duration of a store write.
    write_gate: tokio::sync::Mutex<()>,
    persisted: AtomicU64,
    changes: watch::Sender<Arc<Cart>>,
}

struct State {
    cart: Arc<Cart>,
    revision: u64,
}

impl<S: KvStore> CartStore<S> {
    /// Load the cart from `store` and build a cart store around it.
    ///
    /// A missing key yields an empty cart. A present but unreadable payload
    /// also yields an empty cart and is logged; it stays in the store until
    /// the first mutation overwrites it. Only a failing `get` is an error.
    pub async fn open(store: S, config: CartConfig) -> Result<Self, CartError> {
        let key = config.key.as_str();
        let cart = match store.get(key).await {
            Ok(None) => {
                debug!(key, "no persisted cart, starting empty");
                Cart::new()
            }
            Ok(Some(raw)) => match codec::decode(&raw) {
                Ok(cart) => {
                    info!(key, items = cart.len(), "loaded persisted cart");
                    cart
                }
                Err(e) => {
                    warn!(key, error = %e, "discarding malformed persisted cart");
                    Cart::new()
                }
            },
            Err(source) => {
                return Err(CartError::Load {
                    key: key.to_string(),
                    source,
                })
            }
        };

        Ok(Self::with_cart(store, config, cart))
    }

    fn with_cart(store: S, config: CartConfig, cart: Cart) -> Self {
        let cart = Arc::new(cart);
        let (changes, _) = watch::channel(Arc::clone(&cart));
        Self {
            store,
            config,
            state: Mutex::new(State { cart, revision: 0 }),
            write_gate: tokio::sync::Mutex::new(()),
            persisted: AtomicU64::new(0),
            changes,
        }
    }

    /// Add one unit of `product`.
    ///
    /// A product already in the cart is incremented exactly like
    /// [`increment`](Self::increment); otherwise it is appended with
    /// quantity 1. A NaN or infinite price is rejected with
    /// [`CartError::InvalidPrice`] before anything changes.
    pub async fn add_to_cart(&self, product: ProductRef) -> Result<(), CartError> {
        if !product.price.is_finite() {
            warn!(id = %product.id, price = product.price, "rejecting non-finite price");
            return Err(CartError::InvalidPrice {
                id: product.id,
                price: product.price,
            });
        }

        let id = product.id.clone();
        let ordering = self.config.ordering;
        self.apply("add_to_cart", &id, |cart| {
            Some(cart.with_product(product, ordering))
        })
        .await
    }

    /// Add one unit of an item already in the cart. Unknown ids are ignored.
    pub async fn increment(&self, id: &ProductId) -> Result<(), CartError> {
        let ordering = self.config.ordering;
        self.apply("increment", id, |cart| cart.with_incremented(id, ordering))
            .await
    }

    /// Remove one unit of an item; the item goes away at zero. Unknown ids
    /// are ignored.
    pub async fn decrement(&self, id: &ProductId) -> Result<(), CartError> {
        let ordering = self.config.ordering;
        self.apply("decrement", id, |cart| cart.with_decremented(id, ordering))
            .await
    }

    /// Current cart. The returned value never changes; later mutations
    /// produce new snapshots.
    pub fn snapshot(&self) -> Arc<Cart> {
        Arc::clone(&self.state.lock().cart)
    }

    /// Receive every new snapshot as mutations apply.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Cart>> {
        self.changes.subscribe()
    }

    /// Persist the current cart if the stored copy is behind.
    ///
    /// Use after a [`CartError::Persist`] once the store is healthy again.
    pub async fn flush(&self) -> Result<(), CartError> {
        self.persist_through(self.revision()).await
    }

    /// Number of mutations applied since the store was opened.
    pub fn revision(&self) -> u64 {
        self.state.lock().revision
    }

    /// Latest revision known to be in the key-value store.
    pub fn persisted_revision(&self) -> u64 {
        self.persisted.load(Ordering::Acquire)
    }

    /// Check if the in-memory cart has changes the store doesn't have.
    pub fn is_dirty(&self) -> bool {
        self.revision() > self.persisted_revision()
    }

    /// Key the cart is persisted under.
    pub fn key(&self) -> &str {
        &self.config.key
    }

    /// Store configuration.
    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// Underlying key-value store.
    pub fn store(&self) -> &S {
        &self.store
    }

    async fn apply<F>(&self, op: &'static str, id: &ProductId, mutate: F) -> Result<(), CartError>
    where
        F: FnOnce(&Cart) -> Option<Cart>,
    {
        let revision = {
            let mut state = self.state.lock();
            let Some(next) = mutate(&state.cart) else {
                debug!(op, %id, "product not in cart, nothing to do");
                return Ok(());
            };
            state.revision += 1;
            state.cart = Arc::new(next);
            self.changes.send_replace(Arc::clone(&state.cart));
            debug!(op, %id, revision = state.revision, "applied cart mutation");
            state.revision
        };

        self.persist_through(revision).await
    }

    /// Make sure everything up to `revision` is stored.
    async fn persist_through(&self, revision: u64) -> Result<(), CartError> {
        let _gate = self.write_gate.lock().await;

        if self.persisted_revision() >= revision {
            debug!(revision, "revision already persisted by a later write");
            return Ok(());
        }

        // Re-read: later mutations may have applied while we waited.
        let (cart, current) = {
            let state = self.state.lock();
            (Arc::clone(&state.cart), state.revision)
        };
        let payload = codec::encode(&cart)?;

        match self.store.set(&self.config.key, payload).await {
            Ok(()) => {
                self.persisted.store(current, Ordering::Release);
                debug!(key = %self.config.key, revision = current, "persisted cart");
                Ok(())
            }
            Err(source) => {
                warn!(
                    key = %self.config.key,
                    revision = current,
                    error = %source,
                    "failed to persist cart, keeping in-memory state"
                );
                Err(CartError::Persist {
                    revision: current,
                    source,
                })
            }
        }
    }
}
