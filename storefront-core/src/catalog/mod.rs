//! Catalog override store
//!
//! Merges the static base catalog with admin-entered extra products and
//! the hidden/deleted id sets. The base catalog is injected at
//! construction; only the overrides live in storage.

pub mod categories;

use crate::storage::{KvStore, keys};
use shared::models::product::{ExtraProductRecord, Product};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Product catalog with admin overrides
#[derive(Debug, Clone)]
pub struct ProductStore {
    store: KvStore,
    /// Static base catalog (compiled into the host application)
    base: Arc<Vec<Product>>,
}

impl ProductStore {
    pub fn new(store: KvStore, base: Vec<Product>) -> Self {
        Self {
            store,
            base: Arc::new(base),
        }
    }

    /// The static base catalog, without overrides
    pub fn base_catalog(&self) -> &[Product] {
        &self.base
    }

    /// Admin-added products, migrated to the current record shape
    pub fn extra_products(&self) -> Vec<Product> {
        let records: Vec<ExtraProductRecord> = self.store.read(keys::EXTRA_PRODUCTS, Vec::new());
        records.into_iter().map(ExtraProductRecord::migrate).collect()
    }

    /// The effective product list
    ///
    /// Base catalog overlaid with extras (extras win on id collision),
    /// minus anything in the deleted or hidden id sets. When there are no
    /// overrides at all the base list is returned without copying per-id.
    pub fn all_products_with_extras(&self) -> Vec<Product> {
        let extras = self.extra_products();
        let hidden = self.hidden_product_ids();
        let deleted = self.deleted_product_ids();

        // Fast path: nothing to merge or exclude
        if extras.is_empty() && hidden.is_empty() && deleted.is_empty() {
            return (*self.base).clone();
        }

        let mut merged: Vec<Product> = (*self.base).clone();
        let mut index: HashMap<String, usize> = merged
            .iter()
            .enumerate()
            .map(|(i, product)| (product.id.clone(), i))
            .collect();

        for extra in extras {
            match index.get(&extra.id) {
                Some(&i) => merged[i] = extra,
                None => {
                    index.insert(extra.id.clone(), merged.len());
                    merged.push(extra);
                }
            }
        }

        merged.retain(|product| !deleted.contains(&product.id) && !hidden.contains(&product.id));
        merged
    }

    /// Resolve a product from the effective list
    pub fn product_by_id(&self, id: &str) -> Option<Product> {
        self.all_products_with_extras()
            .into_iter()
            .find(|product| product.id == id)
    }

    /// Insert or replace an extra product, returning the effective list
    pub fn save_extra_product(&self, product: Product) -> Vec<Product> {
        let mut extras = self.extra_products();
        match extras.iter_mut().find(|existing| existing.id == product.id) {
            Some(existing) => *existing = product,
            None => extras.push(product),
        }
        self.store.write(keys::EXTRA_PRODUCTS, &extras);
        self.all_products_with_extras()
    }

    /// Remove an extra product record, returning the effective list
    pub fn remove_extra_product(&self, id: &str) -> Vec<Product> {
        let mut extras = self.extra_products();
        extras.retain(|product| product.id != id);
        self.store.write(keys::EXTRA_PRODUCTS, &extras);
        self.all_products_with_extras()
    }

    /// Ids excluded from derived views but kept recoverable
    pub fn hidden_product_ids(&self) -> HashSet<String> {
        self.store.read(keys::HIDDEN_PRODUCT_IDS, HashSet::new())
    }

    /// Tombstoned ids, excluded from every derived view
    pub fn deleted_product_ids(&self) -> HashSet<String> {
        self.store.read(keys::DELETED_PRODUCT_IDS, HashSet::new())
    }

    pub fn hide_product(&self, id: &str) {
        let mut hidden = self.hidden_product_ids();
        if hidden.insert(id.to_string()) {
            self.store.write(keys::HIDDEN_PRODUCT_IDS, &hidden);
        }
    }

    pub fn unhide_product(&self, id: &str) {
        let mut hidden = self.hidden_product_ids();
        if hidden.remove(id) {
            self.store.write(keys::HIDDEN_PRODUCT_IDS, &hidden);
        }
    }

    /// Tombstone a product id
    ///
    /// The tombstone is never cleared by a later extra-product write: a
    /// deleted id stays excluded even if an extra with the same id is
    /// saved again (see DESIGN.md).
    pub fn mark_product_deleted(&self, id: &str) {
        let mut deleted = self.deleted_product_ids();
        if deleted.insert(id.to_string()) {
            self.store.write(keys::DELETED_PRODUCT_IDS, &deleted);
            tracing::debug!(id, "Product tombstoned");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, category: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            category: category.to_string(),
            brand: None,
            price: 100.0,
            image: String::new(),
            image_gallery: Vec::new(),
            description: None,
        }
    }

    fn store_with_base(base: Vec<Product>) -> ProductStore {
        ProductStore::new(KvStore::open_in_memory().unwrap(), base)
    }

    #[test]
    fn test_fast_path_returns_base_unchanged() {
        let base = vec![product("p1", "Mug", "Drinkware")];
        let store = store_with_base(base.clone());
        assert_eq!(store.all_products_with_extras(), base);
    }

    #[test]
    fn test_extras_win_on_id_collision() {
        let store = store_with_base(vec![product("p1", "Mug", "Drinkware")]);
        let mut replacement = product("p1", "Mug XL", "Drinkware");
        replacement.price = 250.0;
        let merged = store.save_extra_product(replacement);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "Mug XL");
        assert_eq!(merged[0].price, 250.0);
    }

    #[test]
    fn test_new_extras_append_after_base() {
        let store = store_with_base(vec![product("p1", "Mug", "Drinkware")]);
        store.save_extra_product(product("x1", "Banner", "Signage"));
        let merged = store.all_products_with_extras();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id, "p1");
        assert_eq!(merged[1].id, "x1");
    }

    #[test]
    fn test_deleted_tombstone_beats_extras() {
        let store = store_with_base(vec![product("p1", "Mug", "Drinkware")]);
        store.save_extra_product(product("x1", "Banner", "Signage"));
        store.mark_product_deleted("x1");
        let merged = store.all_products_with_extras();
        assert!(!merged.iter().any(|p| p.id == "x1"));

        // Saving the extra again does not resurrect it
        store.save_extra_product(product("x1", "Banner", "Signage"));
        let merged = store.all_products_with_extras();
        assert!(!merged.iter().any(|p| p.id == "x1"));
    }

    #[test]
    fn test_hidden_ids_are_excluded_and_recoverable() {
        let store = store_with_base(vec![
            product("p1", "Mug", "Drinkware"),
            product("p2", "Pen", "Stationery"),
        ]);
        store.hide_product("p2");
        assert!(store.product_by_id("p2").is_none());

        store.unhide_product("p2");
        assert!(store.product_by_id("p2").is_some());
    }

    #[test]
    fn test_legacy_extra_records_gain_gallery() {
        let store = store_with_base(Vec::new());
        store.store.write(
            keys::EXTRA_PRODUCTS,
            &serde_json::json!([{
                "id": "x1",
                "name": "Foam Board",
                "category": "Signage",
                "price": 450.0,
                "image_url": "foam.jpg"
            }]),
        );
        let extras = store.extra_products();
        assert_eq!(extras[0].image_gallery, vec!["foam.jpg"]);
    }

    #[test]
    fn test_remove_extra_product() {
        let store = store_with_base(Vec::new());
        store.save_extra_product(product("x1", "Banner", "Signage"));
        let merged = store.remove_extra_product("x1");
        assert!(merged.is_empty());
    }
}
