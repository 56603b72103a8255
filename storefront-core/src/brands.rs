//! Brand store
//!
//! The brand list has no single source of truth: one half is derived
//! mechanically from the product catalog (every distinct `brand` value,
//! with the categories it appears in), the other half is persisted admin
//! edits (status, extra category associations, renames). Every view is
//! recomputed by merging both on read; deleted names are excluded via a
//! tombstone list.

use crate::catalog::ProductStore;
use crate::storage::{KvStore, keys};
use serde::Deserialize;
use shared::models::brand::{Brand, BrandStatus, BrandUpdate};
use std::collections::{BTreeMap, HashSet};

/// Persisted brand-edit shapes across schema versions
///
/// The legacy shape is a bare name list; it migrates to structured
/// records with no categories and `active` status.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredBrands {
    Current(Vec<Brand>),
    Legacy(Vec<String>),
}

impl StoredBrands {
    fn migrate(self) -> Vec<Brand> {
        match self {
            Self::Current(brands) => brands,
            Self::Legacy(names) => names.into_iter().map(Brand::new).collect(),
        }
    }
}

/// Brand catalogue with admin edits and soft delete
#[derive(Debug, Clone)]
pub struct BrandStore {
    store: KvStore,
    products: ProductStore,
}

impl BrandStore {
    pub fn new(store: KvStore, products: ProductStore) -> Self {
        Self { store, products }
    }

    /// The merged brand view, name-ordered
    ///
    /// Categories are the union of both sources, sorted and de-duplicated;
    /// status comes from the admin edit when one exists, else `active`.
    /// Tombstoned names never appear, regardless of source.
    pub fn all_brands(&self) -> Vec<Brand> {
        let mut merged: BTreeMap<String, Brand> = BTreeMap::new();

        // (a) brands derived from the effective product list
        for product in self.products.all_products_with_extras() {
            let Some(name) = product.brand.as_deref().map(str::trim) else {
                continue;
            };
            if name.is_empty() {
                continue;
            }
            merged
                .entry(name.to_string())
                .or_insert_with(|| Brand::new(name))
                .associated_categories
                .push(product.category.clone());
        }

        // (b) persisted admin edits overlay
        for edit in self.stored_edits() {
            let entry = merged
                .entry(edit.name.clone())
                .or_insert_with(|| Brand::new(&edit.name));
            entry.status = edit.status;
            entry
                .associated_categories
                .extend(edit.associated_categories);
        }

        let deleted = self.deleted_brand_names();
        merged.retain(|name, _| !deleted.contains(name));

        merged
            .into_values()
            .map(|mut brand| {
                brand.associated_categories.sort();
                brand.associated_categories.dedup();
                brand
            })
            .collect()
    }

    /// Add a brand (or extend an existing edit's categories)
    ///
    /// A tombstoned name stays excluded from the merged view even after a
    /// re-add; the tombstone is never cleared here (see DESIGN.md).
    pub fn add_brand(&self, name: &str, categories: Vec<String>) -> Vec<Brand> {
        let mut edits = self.stored_edits();
        match edits.iter_mut().find(|brand| brand.name == name) {
            Some(existing) => existing.associated_categories.extend(categories),
            None => edits.push(Brand {
                name: name.to_string(),
                status: BrandStatus::Active,
                associated_categories: categories,
            }),
        }
        self.write_edits(&edits);
        self.all_brands()
    }

    /// Apply an admin edit, optionally renaming via `original_name`
    pub fn save_brand(&self, update: BrandUpdate) -> Vec<Brand> {
        let target = update
            .original_name
            .as_deref()
            .unwrap_or(&update.name)
            .to_string();
        let mut edits = self.stored_edits();
        match edits.iter_mut().find(|brand| brand.name == target) {
            Some(existing) => {
                existing.name = update.name;
                if let Some(status) = update.status {
                    existing.status = status;
                }
                if let Some(categories) = update.associated_categories {
                    existing.associated_categories = categories;
                }
            }
            None => edits.push(Brand {
                name: update.name,
                status: update.status.unwrap_or_default(),
                associated_categories: update.associated_categories.unwrap_or_default(),
            }),
        }
        self.write_edits(&edits);
        self.all_brands()
    }

    /// Set a brand's visibility status
    pub fn set_brand_status(&self, name: &str, status: BrandStatus) -> Vec<Brand> {
        let mut edits = self.stored_edits();
        match edits.iter_mut().find(|brand| brand.name == name) {
            Some(existing) => existing.status = status,
            None => edits.push(Brand {
                name: name.to_string(),
                status,
                associated_categories: Vec::new(),
            }),
        }
        self.write_edits(&edits);
        self.all_brands()
    }

    /// Soft-delete a brand
    ///
    /// Adds the name to the tombstone list and drops the live edit
    /// record.
    pub fn delete_brand(&self, name: &str) -> Vec<Brand> {
        let mut edits = self.stored_edits();
        edits.retain(|brand| brand.name != name);
        self.write_edits(&edits);

        let mut deleted = self.deleted_brand_names();
        if deleted.insert(name.to_string()) {
            self.store.write(keys::DELETED_BRAND_NAMES, &deleted);
            tracing::debug!(name, "Brand tombstoned");
        }
        self.all_brands()
    }

    /// Tombstoned brand names
    pub fn deleted_brand_names(&self) -> HashSet<String> {
        self.store.read(keys::DELETED_BRAND_NAMES, HashSet::new())
    }

    fn stored_edits(&self) -> Vec<Brand> {
        let value = self.store.read_value(keys::BRAND_EDITS);
        if value.is_null() {
            return Vec::new();
        }
        match serde_json::from_value::<StoredBrands>(value) {
            Ok(stored) => stored.migrate(),
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable brand edits, treating as empty");
                Vec::new()
            }
        }
    }

    fn write_edits(&self, edits: &[Brand]) {
        self.store.write(keys::BRAND_EDITS, &edits);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::product::Product;

    fn product(id: &str, category: &str, brand: Option<&str>) -> Product {
        Product {
            id: id.to_string(),
            name: id.to_string(),
            slug: id.to_string(),
            category: category.to_string(),
            brand: brand.map(str::to_string),
            price: 100.0,
            image: String::new(),
            image_gallery: Vec::new(),
            description: None,
        }
    }

    fn store_with_base(base: Vec<Product>) -> BrandStore {
        let kv = KvStore::open_in_memory().unwrap();
        let products = ProductStore::new(kv.clone(), base);
        BrandStore::new(kv, products)
    }

    #[test]
    fn test_brands_derived_from_catalog() {
        let store = store_with_base(vec![
            product("p1", "Stationery", Some("Camlin")),
            product("p2", "Art Supplies", Some("Camlin")),
            product("p3", "Drinkware", Some("Milton")),
            product("p4", "Drinkware", None),
        ]);
        let brands = store.all_brands();
        assert_eq!(brands.len(), 2);
        assert_eq!(brands[0].name, "Camlin");
        assert_eq!(
            brands[0].associated_categories,
            vec!["Art Supplies", "Stationery"]
        );
        assert_eq!(brands[0].status, BrandStatus::Active);
        assert_eq!(brands[1].name, "Milton");
    }

    #[test]
    fn test_admin_edit_overrides_status_and_unions_categories() {
        let store = store_with_base(vec![product("p1", "Stationery", Some("Camlin"))]);
        store.save_brand(BrandUpdate {
            original_name: None,
            name: "Camlin".into(),
            status: Some(BrandStatus::Hidden),
            associated_categories: Some(vec!["Office".into(), "Stationery".into()]),
        });

        let brands = store.all_brands();
        assert_eq!(brands.len(), 1);
        assert_eq!(brands[0].status, BrandStatus::Hidden);
        // Union of catalog-derived and edited categories, sorted, deduped
        assert_eq!(brands[0].associated_categories, vec!["Office", "Stationery"]);
    }

    #[test]
    fn test_legacy_name_list_migrates() {
        let store = store_with_base(Vec::new());
        store
            .store
            .write(keys::BRAND_EDITS, &serde_json::json!(["Acme", "Bilt"]));

        let brands = store.all_brands();
        assert_eq!(brands.len(), 2);
        assert!(brands.iter().all(|b| b.status == BrandStatus::Active));
        assert!(brands.iter().all(|b| b.associated_categories.is_empty()));
    }

    #[test]
    fn test_delete_brand_tombstones_across_sources() {
        // Brand exists in the catalog AND as an edit; delete hides both
        let store = store_with_base(vec![product("p1", "Stationery", Some("Acme"))]);
        store.add_brand("Acme", vec!["Office".into()]);

        let brands = store.delete_brand("Acme");
        assert!(brands.is_empty());
    }

    #[test]
    fn test_re_add_after_delete_stays_excluded() {
        let store = store_with_base(Vec::new());
        store.add_brand("Acme", vec!["Stationery".into()]);
        store.delete_brand("Acme");

        // Re-adding with a different category does not resurrect the name:
        // the tombstone is never cleared
        let brands = store.add_brand("Acme", vec!["Office".into()]);
        assert!(brands.iter().all(|b| b.name != "Acme"));
    }

    #[test]
    fn test_rename_via_original_name() {
        let store = store_with_base(Vec::new());
        store.add_brand("Acme", vec!["Stationery".into()]);
        let brands = store.save_brand(BrandUpdate {
            original_name: Some("Acme".into()),
            name: "Acme Industries".into(),
            status: None,
            associated_categories: None,
        });
        assert_eq!(brands.len(), 1);
        assert_eq!(brands[0].name, "Acme Industries");
        assert_eq!(brands[0].associated_categories, vec!["Stationery"]);
    }

    #[test]
    fn test_set_brand_status_creates_edit_for_derived_brand() {
        let store = store_with_base(vec![product("p1", "Stationery", Some("Camlin"))]);
        let brands = store.set_brand_status("Camlin", BrandStatus::Hidden);
        assert_eq!(brands[0].status, BrandStatus::Hidden);
    }
}
