//! Special services store
//!
//! Flat CRUD list with lazy one-time seeding: the first read of a store
//! that has never been written gets the default service set. An
//! explicitly emptied list stays empty (missing key and empty list are
//! distinguishable).

use crate::events::{EventBus, StoreEvent};
use crate::storage::{KvStore, keys};
use shared::models::service::{ServiceStatus, SpecialService};
use shared::util::service_id;

fn default_services() -> Vec<SpecialService> {
    let defaults = [
        (
            "Same-Day Printing",
            "Order before noon and collect your prints the same evening.",
        ),
        (
            "Bulk Order Pricing",
            "Slab discounts on orders of 500 pieces or more.",
        ),
        (
            "Design Assistance",
            "Our studio prepares print-ready artwork from your brief.",
        ),
    ];
    defaults
        .into_iter()
        .enumerate()
        .map(|(i, (name, description))| SpecialService {
            id: format!("svc-default-{}", i + 1),
            name: name.to_string(),
            description: description.to_string(),
            status: ServiceStatus::Active,
        })
        .collect()
}

/// Special services backed by the key-value store
#[derive(Debug, Clone)]
pub struct ServicesStore {
    store: KvStore,
    events: EventBus,
}

impl ServicesStore {
    pub fn new(store: KvStore, events: EventBus) -> Self {
        Self { store, events }
    }

    /// All services, seeding the defaults on first access
    pub fn all_services(&self) -> Vec<SpecialService> {
        let value = self.store.read_value(keys::SERVICES);
        if value.is_null() {
            let defaults = default_services();
            self.store.write(keys::SERVICES, &defaults);
            tracing::debug!(count = defaults.len(), "Seeded default services");
            return defaults;
        }
        serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Unreadable services list, treating as empty");
            Vec::new()
        })
    }

    /// Services with `Active` status
    pub fn active_services(&self) -> Vec<SpecialService> {
        self.all_services()
            .into_iter()
            .filter(|service| service.status == ServiceStatus::Active)
            .collect()
    }

    /// Append a new service, returning the full list
    pub fn add_service(&self, name: &str, description: &str) -> Vec<SpecialService> {
        let mut services = self.all_services();
        services.push(SpecialService {
            id: service_id(),
            name: name.to_string(),
            description: description.to_string(),
            status: ServiceStatus::Active,
        });
        self.save_all_services(services.clone());
        services
    }

    /// Replace a service by id, returning the full list
    pub fn update_service(&self, service: SpecialService) -> Vec<SpecialService> {
        let mut services = self.all_services();
        if let Some(existing) = services.iter_mut().find(|s| s.id == service.id) {
            *existing = service;
        }
        self.save_all_services(services.clone());
        services
    }

    /// Remove a service by id, returning the full list
    pub fn remove_service(&self, id: &str) -> Vec<SpecialService> {
        let mut services = self.all_services();
        services.retain(|service| service.id != id);
        self.save_all_services(services.clone());
        services
    }

    /// Persist the full list and notify listeners
    pub fn save_all_services(&self, services: Vec<SpecialService>) {
        self.store.write(keys::SERVICES, &services);
        self.events.publish(StoreEvent::ServicesUpdated);
    }
}
