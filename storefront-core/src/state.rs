//! Storefront state composition
//!
//! Wires every store to one key-value database and one event bus. The
//! host application builds a [`Storefront`] once and hands the individual
//! services to the components that need them; all of them are cheap
//! clones over the same storage.

use crate::brands::BrandStore;
use crate::cart::CartService;
use crate::catalog::categories::CategoryStore;
use crate::catalog::ProductStore;
use crate::checkout::design_upload::DesignUploadService;
use crate::checkout::submission::OrderNotifier;
use crate::config::WebhookConfig;
use crate::events::EventBus;
use crate::orders::OrderArchive;
use crate::services::ServicesStore;
use crate::storage::{KvStore, StorageResult};
use shared::models::product::Product;
use std::path::Path;

/// All storefront state services, sharing one store and one bus
#[derive(Debug, Clone)]
pub struct Storefront {
    pub events: EventBus,
    pub cart: CartService,
    pub products: ProductStore,
    pub categories: CategoryStore,
    pub brands: BrandStore,
    pub services: ServicesStore,
    pub design_uploads: DesignUploadService,
    pub archive: OrderArchive,
    pub notifier: OrderNotifier,
}

impl Storefront {
    /// Open a durable storefront at the given database path
    pub fn open(
        path: impl AsRef<Path>,
        base_catalog: Vec<Product>,
        webhooks: WebhookConfig,
    ) -> StorageResult<Self> {
        Ok(Self::with_store(KvStore::open(path)?, base_catalog, webhooks))
    }

    /// Open a session-scoped (in-memory) storefront
    pub fn in_memory(base_catalog: Vec<Product>, webhooks: WebhookConfig) -> StorageResult<Self> {
        Ok(Self::with_store(
            KvStore::open_in_memory()?,
            base_catalog,
            webhooks,
        ))
    }

    fn with_store(store: KvStore, base_catalog: Vec<Product>, webhooks: WebhookConfig) -> Self {
        let events = EventBus::new();
        let cart = CartService::new(store.clone(), events.clone());
        let products = ProductStore::new(store.clone(), base_catalog);
        let categories = CategoryStore::new(store.clone(), events.clone());
        let brands = BrandStore::new(store.clone(), products.clone());
        let services = ServicesStore::new(store.clone(), events.clone());
        let design_uploads =
            DesignUploadService::new(store.clone(), cart.clone(), products.clone());
        let archive = OrderArchive::new(store);
        let notifier = OrderNotifier::new(webhooks);

        Self {
            events,
            cart,
            products,
            categories,
            brands,
            services,
            design_uploads,
            archive,
            notifier,
        }
    }
}
