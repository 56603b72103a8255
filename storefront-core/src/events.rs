//! In-process event bus for cross-component state sync
//!
//! Stores publish a [`StoreEvent`] after every write so that other
//! components (cart badge, product cards, admin panels) can re-derive
//! their view without polling storage.
//!
//! # Delivery semantics
//!
//! - Synchronous publish: the event is enqueued before the mutator
//!   returns, one event per mutation, no debouncing.
//! - Current subscribers only: no replay for late subscribers.
//! - Events are "state may have changed" signals. [`StoreEvent::CartUpdated`]
//!   carries the post-mutation cart as a convenience; everything else is
//!   payload-free and consumers re-read the store.

use shared::models::cart::CartEventDetail;
use tokio::sync::broadcast;

/// Default broadcast channel capacity
const DEFAULT_CAPACITY: usize = 64;

/// Typed store-change events
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// Cart contents changed; carries the post-mutation state
    CartUpdated(CartEventDetail),
    /// Custom category list changed
    CustomCategoriesUpdated,
    /// Category override map changed
    CategoryOverridesUpdated,
    /// Category card content changed
    CategoryCardsUpdated,
    /// Services list changed
    ServicesUpdated,
}

/// Event bus - fan-out of store-change notifications
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<StoreEvent>,
}

impl EventBus {
    /// Create a bus with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a bus with the given channel capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event to all current subscribers
    ///
    /// Fire-and-forget: having no subscribers is not an error.
    pub fn publish(&self, event: StoreEvent) {
        let _ = self.tx.send(event);
    }

    /// Subscribe to store-change events
    ///
    /// Only events published after this call are delivered.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
