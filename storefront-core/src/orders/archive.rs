//! Local order archive
//!
//! Append-only log of submitted orders, most recent first. This is the
//! record that survives regardless of webhook delivery: submission
//! archives the order before any notification is attempted. No eviction;
//! growth is bounded only by what a single customer submits.

use crate::storage::{KvStore, keys};
use shared::models::order::OrderPayload;

/// Persisted order log
#[derive(Debug, Clone)]
pub struct OrderArchive {
    store: KvStore,
}

impl OrderArchive {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    /// Prepend an order to the archive
    pub fn save(&self, order: &OrderPayload) {
        let mut orders = self.orders();
        orders.insert(0, order.clone());
        self.store.write(keys::LOCAL_ORDERS, &orders);
        tracing::debug!(order_id = %order.id, total = orders.len(), "Order archived");
    }

    /// All archived orders, most recent first
    pub fn orders(&self) -> Vec<OrderPayload> {
        self.store.read(keys::LOCAL_ORDERS, Vec::new())
    }

    /// Drop the whole archive
    pub fn clear(&self) {
        self.store.remove(keys::LOCAL_ORDERS);
    }
}
