//! Cart Model
//!
//! Canonical representation of the shopping cart. There is no in-memory
//! cart state: every accessor re-reads storage and every mutator performs
//! a full read-modify-write, then broadcasts the post-mutation state.
//!
//! Two keys are persisted: the item list and a denormalized quantity sum.
//! The count is recomputed on every write and is never treated as a
//! source of truth on its own.

pub mod rules;

use crate::events::{EventBus, StoreEvent};
use crate::money;
use crate::storage::{KvStore, keys};
use shared::models::cart::{CartEventDetail, CartItem, CartTotals, NewCartItem};

/// Floor a raw quantity and clamp it to at least `min`
///
/// Non-finite input degrades to `min` rather than failing; user-typed
/// quantities reach this layer as parsed floats.
pub fn normalize_quantity(quantity: f64, min: i64) -> i64 {
    if !quantity.is_finite() {
        return min;
    }
    (quantity.floor() as i64).max(min)
}

/// Shopping cart backed by the key-value store
#[derive(Debug, Clone)]
pub struct CartService {
    store: KvStore,
    events: EventBus,
}

impl CartService {
    pub fn new(store: KvStore, events: EventBus) -> Self {
        Self { store, events }
    }

    /// Current cart lines, sanitized
    ///
    /// Lines with a non-positive quantity or a malformed price are dropped
    /// on read; they are also filtered on every write, so a sanitized read
    /// of a healthy store is a no-op.
    pub fn items(&self) -> Vec<CartItem> {
        sanitize(self.store.read(keys::CART_ITEMS, Vec::new()))
    }

    /// Whether the cart has a line for `product_id`
    pub fn is_in_cart(&self, product_id: &str) -> bool {
        self.items().iter().any(|item| item.id == product_id)
    }

    /// Total quantity across all lines
    pub fn count(&self) -> i64 {
        self.items().iter().map(|item| item.quantity).sum()
    }

    /// Subtotal, taxes and total for the current cart
    pub fn totals(&self) -> CartTotals {
        money::cart_totals(&self.items())
    }

    /// Add a product to the cart
    ///
    /// `quantity` is floored and clamped to >= 1. If a line with the same
    /// id already exists, quantities are summed and the existing line's
    /// `price`/`name`/`image` are kept — the line created first stays
    /// authoritative for display metadata even if the product changed
    /// since (see DESIGN.md).
    pub fn add_item(&self, product: &NewCartItem, quantity: f64) -> Vec<CartItem> {
        let quantity = normalize_quantity(quantity, 1);
        let mut items = self.items();
        match items.iter_mut().find(|item| item.id == product.id) {
            Some(existing) => existing.quantity += quantity,
            None => items.push(CartItem {
                id: product.id.clone(),
                name: product.name.clone(),
                price: product.price,
                image: product.image.clone(),
                quantity,
            }),
        }
        self.persist(items)
    }

    /// Replace the quantity of a line
    ///
    /// `quantity` is floored and clamped to >= 0; zero removes the line.
    /// Unknown ids are a no-op (the write and event still happen).
    pub fn update_quantity(&self, product_id: &str, quantity: f64) -> Vec<CartItem> {
        let quantity = normalize_quantity(quantity, 0);
        let mut items = self.items();
        if quantity == 0 {
            items.retain(|item| item.id != product_id);
        } else if let Some(existing) = items.iter_mut().find(|item| item.id == product_id) {
            existing.quantity = quantity;
        }
        self.persist(items)
    }

    /// Remove a line entirely
    pub fn remove_item(&self, product_id: &str) -> Vec<CartItem> {
        self.update_quantity(product_id, 0.0)
    }

    /// Empty the cart
    pub fn clear(&self) {
        self.persist(Vec::new());
    }

    /// Sanitize, persist both keys and broadcast the post-mutation state
    fn persist(&self, items: Vec<CartItem>) -> Vec<CartItem> {
        let items = sanitize(items);
        let count: i64 = items.iter().map(|item| item.quantity).sum();
        self.store.write(keys::CART_ITEMS, &items);
        self.store.write(keys::CART_COUNT, &count);
        tracing::debug!(count, lines = items.len(), "Cart persisted");
        self.events.publish(StoreEvent::CartUpdated(CartEventDetail {
            count,
            items: items.clone(),
        }));
        items
    }
}

fn sanitize(items: Vec<CartItem>) -> Vec<CartItem> {
    items
        .into_iter()
        .filter(|item| item.quantity >= 1 && item.price.is_finite() && item.price >= 0.0)
        .collect()
}
