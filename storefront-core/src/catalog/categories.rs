//! Category management: custom categories, overrides, brand registration
//! and category card content
//!
//! Custom categories carry an optional `position` used to order the
//! storefront navigation. Older installs persisted a plain name list; the
//! read path migrates that shape transparently. Category overrides are
//! patches (rename/hide/reposition) applied against base category names at
//! read time by the consuming pages.

use crate::events::{EventBus, StoreEvent};
use crate::storage::{KvStore, keys};
use serde::Deserialize;
use shared::models::category::{CategoryCard, CategoryOverride, CustomCategory};
use std::collections::{BTreeMap, HashSet};

/// Persisted custom-category shapes across schema versions
///
/// The legacy shape is a bare `["Name", ...]` list; the current shape
/// carries position records. Tried in order: an array of objects decodes
/// as `Current`, an array of strings as `Legacy`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredCustomCategories {
    Current(Vec<CustomCategory>),
    Legacy(Vec<String>),
}

impl StoredCustomCategories {
    fn migrate(self) -> Vec<CustomCategory> {
        match self {
            Self::Current(categories) => categories,
            Self::Legacy(names) => names
                .into_iter()
                .map(|name| CustomCategory {
                    name,
                    position: None,
                })
                .collect(),
        }
    }
}

/// Category store backed by the key-value store
#[derive(Debug, Clone)]
pub struct CategoryStore {
    store: KvStore,
    events: EventBus,
}

impl CategoryStore {
    pub fn new(store: KvStore, events: EventBus) -> Self {
        Self { store, events }
    }

    // =========================================================================
    // Custom categories
    // =========================================================================

    /// Custom category names, position-ordered
    pub fn custom_categories(&self) -> Vec<String> {
        self.custom_categories_with_position()
            .into_iter()
            .map(|category| category.name)
            .collect()
    }

    /// Custom categories sorted by position (unset positions go last,
    /// name-ordered)
    pub fn custom_categories_with_position(&self) -> Vec<CustomCategory> {
        let mut categories = self.read_custom_categories();
        categories.sort_by(|a, b| match (a.position, b.position) {
            (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.name.cmp(&b.name)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.name.cmp(&b.name),
        });
        categories
    }

    /// Persist the custom category list
    ///
    /// Duplicate positions are not allowed: the later duplicate loses its
    /// position and falls back to the unordered, name-sorted tail.
    pub fn save_custom_categories(&self, mut categories: Vec<CustomCategory>) {
        let mut taken = HashSet::new();
        for category in &mut categories {
            if let Some(position) = category.position
                && !taken.insert(position)
            {
                tracing::warn!(
                    name = %category.name,
                    position,
                    "Duplicate category position dropped"
                );
                category.position = None;
            }
        }
        self.store.write(keys::CUSTOM_CATEGORIES, &categories);
        self.events.publish(StoreEvent::CustomCategoriesUpdated);
    }

    /// Append a custom category if the name is not already present
    pub fn add_custom_category(&self, name: &str) {
        let mut categories = self.read_custom_categories();
        if categories.iter().any(|category| category.name == name) {
            return;
        }
        categories.push(CustomCategory {
            name: name.to_string(),
            position: None,
        });
        self.save_custom_categories(categories);
    }

    /// Remove a custom category by name
    pub fn remove_custom_category(&self, name: &str) {
        let mut categories = self.read_custom_categories();
        let before = categories.len();
        categories.retain(|category| category.name != name);
        if categories.len() != before {
            self.save_custom_categories(categories);
        }
    }

    /// Seed positions for the given default ordering
    ///
    /// Additive-only and idempotent: a category that already has a
    /// position keeps it; missing records are created; each unpositioned
    /// default gets the next free slot in order.
    pub fn initialize_default_category_positions(&self, default_order: &[String]) {
        let mut categories = self.read_custom_categories();
        let mut taken: HashSet<u32> = categories.iter().filter_map(|c| c.position).collect();
        let mut next: u32 = 0;
        let mut changed = false;

        for name in default_order {
            let idx = match categories.iter().position(|c| &c.name == name) {
                Some(idx) => idx,
                None => {
                    categories.push(CustomCategory {
                        name: name.clone(),
                        position: None,
                    });
                    changed = true;
                    categories.len() - 1
                }
            };
            let entry = &mut categories[idx];
            if entry.position.is_none() {
                while taken.contains(&next) {
                    next += 1;
                }
                entry.position = Some(next);
                taken.insert(next);
                changed = true;
            }
        }

        if changed {
            self.save_custom_categories(categories);
        }
    }

    fn read_custom_categories(&self) -> Vec<CustomCategory> {
        let value = self.store.read_value(keys::CUSTOM_CATEGORIES);
        if value.is_null() {
            return Vec::new();
        }
        match serde_json::from_value::<StoredCustomCategories>(value) {
            Ok(stored) => stored.migrate(),
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable custom categories, treating as empty");
                Vec::new()
            }
        }
    }

    // =========================================================================
    // Category overrides
    // =========================================================================

    /// All persisted overrides, keyed by base category name
    pub fn category_overrides(&self) -> BTreeMap<String, CategoryOverride> {
        self.store.read(keys::CATEGORY_OVERRIDES, BTreeMap::new())
    }

    /// The override for one base category, if any
    pub fn override_for(&self, base_name: &str) -> Option<CategoryOverride> {
        self.category_overrides().remove(base_name)
    }

    /// Persist an override for a base category
    ///
    /// An override with no meaningful fields removes the record instead of
    /// storing a no-op.
    pub fn save_category_override(&self, base_name: &str, patch: CategoryOverride) {
        let mut overrides = self.category_overrides();
        if patch.is_noop() {
            overrides.remove(base_name);
        } else {
            overrides.insert(base_name.to_string(), patch);
        }
        self.store.write(keys::CATEGORY_OVERRIDES, &overrides);
        self.events.publish(StoreEvent::CategoryOverridesUpdated);
    }

    /// Drop the override for a base category
    pub fn clear_category_override(&self, base_name: &str) {
        self.save_category_override(base_name, CategoryOverride::default());
    }

    // =========================================================================
    // Category -> brand registration
    // =========================================================================

    /// Brands registered for a category
    pub fn brands_for_category(&self, category: &str) -> Vec<String> {
        self.category_brand_map().remove(category).unwrap_or_default()
    }

    /// Register a brand name under a category
    ///
    /// Set-like append: trimmed, case-sensitive exact match, no
    /// duplicates.
    pub fn register_brand_for_category(&self, category: &str, brand: &str) {
        let brand = brand.trim();
        if brand.is_empty() {
            return;
        }
        let mut map = self.category_brand_map();
        let brands = map.entry(category.to_string()).or_default();
        if brands.iter().any(|existing| existing == brand) {
            return;
        }
        brands.push(brand.to_string());
        self.store.write(keys::CATEGORY_BRAND_MAP, &map);
    }

    fn category_brand_map(&self) -> BTreeMap<String, Vec<String>> {
        self.store.read(keys::CATEGORY_BRAND_MAP, BTreeMap::new())
    }

    // =========================================================================
    // Category cards
    // =========================================================================

    /// All category card content records
    pub fn category_cards(&self) -> Vec<CategoryCard> {
        self.store.read(keys::CATEGORY_CARDS, Vec::new())
    }

    /// Card content for one category
    pub fn card_for(&self, category: &str) -> Option<CategoryCard> {
        self.category_cards()
            .into_iter()
            .find(|card| card.category == category)
    }

    /// Insert or replace one card's content
    pub fn save_category_card(&self, card: CategoryCard) {
        let mut cards = self.category_cards();
        match cards.iter_mut().find(|existing| existing.category == card.category) {
            Some(existing) => *existing = card,
            None => cards.push(card),
        }
        self.store.write(keys::CATEGORY_CARDS, &cards);
        self.events.publish(StoreEvent::CategoryCardsUpdated);
    }

    /// Replace the whole card set
    pub fn save_category_cards(&self, cards: Vec<CategoryCard>) {
        self.store.write(keys::CATEGORY_CARDS, &cards);
        self.events.publish(StoreEvent::CategoryCardsUpdated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CategoryStore {
        CategoryStore::new(KvStore::open_in_memory().unwrap(), EventBus::new())
    }

    fn category(name: &str, position: Option<u32>) -> CustomCategory {
        CustomCategory {
            name: name.to_string(),
            position,
        }
    }

    #[test]
    fn test_legacy_name_list_migrates() {
        let store = store();
        store
            .store
            .write(keys::CUSTOM_CATEGORIES, &serde_json::json!(["B", "A"]));

        let categories = store.custom_categories_with_position();
        assert_eq!(
            categories,
            vec![category("A", None), category("B", None)]
        );
        assert_eq!(store.custom_categories(), vec!["A", "B"]);
    }

    #[test]
    fn test_position_sort_puts_unset_last_by_name() {
        let store = store();
        store.save_custom_categories(vec![
            category("Zeta", None),
            category("Mugs", Some(1)),
            category("Alpha", None),
            category("Cards", Some(0)),
        ]);
        let names = store.custom_categories();
        assert_eq!(names, vec!["Cards", "Mugs", "Alpha", "Zeta"]);
    }

    #[test]
    fn test_duplicate_positions_drop_the_later_one() {
        let store = store();
        store.save_custom_categories(vec![
            category("First", Some(3)),
            category("Second", Some(3)),
        ]);
        let categories = store.custom_categories_with_position();
        assert_eq!(categories[0], category("First", Some(3)));
        assert_eq!(categories[1], category("Second", None));
    }

    #[test]
    fn test_default_position_seeding_is_idempotent_and_additive() {
        let store = store();
        store.save_custom_categories(vec![category("Mugs", Some(5))]);

        let defaults = vec!["Cards".to_string(), "Mugs".to_string(), "Banners".to_string()];
        store.initialize_default_category_positions(&defaults);

        let first = store.custom_categories_with_position();
        // Mugs keeps its explicit position; the others fill free slots
        assert_eq!(
            first,
            vec![
                category("Cards", Some(0)),
                category("Banners", Some(1)),
                category("Mugs", Some(5)),
            ]
        );

        store.initialize_default_category_positions(&defaults);
        assert_eq!(store.custom_categories_with_position(), first);
    }

    #[test]
    fn test_add_and_remove_custom_category() {
        let store = store();
        store.add_custom_category("Stickers");
        store.add_custom_category("Stickers");
        assert_eq!(store.custom_categories(), vec!["Stickers"]);

        store.remove_custom_category("Stickers");
        assert!(store.custom_categories().is_empty());
    }

    #[test]
    fn test_noop_override_is_pruned() {
        let store = store();
        store.save_category_override(
            "Drinkware",
            CategoryOverride {
                hidden: Some(true),
                ..Default::default()
            },
        );
        assert!(store.override_for("Drinkware").is_some());

        store.save_category_override("Drinkware", CategoryOverride::default());
        assert!(store.override_for("Drinkware").is_none());
        assert!(store.category_overrides().is_empty());
    }

    #[test]
    fn test_override_round_trip() {
        let store = store();
        let patch = CategoryOverride {
            renamed_to: Some("Business Cards".into()),
            hidden: None,
            position: Some(2),
        };
        store.save_category_override("Visiting Card", patch.clone());
        assert_eq!(store.override_for("Visiting Card"), Some(patch));
    }

    #[test]
    fn test_register_brand_is_set_like_and_trims() {
        let store = store();
        store.register_brand_for_category("Stationery", "  Camlin ");
        store.register_brand_for_category("Stationery", "Camlin");
        store.register_brand_for_category("Stationery", "camlin");
        store.register_brand_for_category("Stationery", "");

        // Case-sensitive: "camlin" is a distinct entry; blank is ignored
        assert_eq!(
            store.brands_for_category("Stationery"),
            vec!["Camlin", "camlin"]
        );
    }

    #[test]
    fn test_category_card_upsert_and_event() {
        let events = EventBus::new();
        let store = CategoryStore::new(KvStore::open_in_memory().unwrap(), events.clone());
        let mut rx = events.subscribe();

        store.save_category_card(CategoryCard {
            category: "Mugs".into(),
            title: "Custom Mugs".into(),
            description: String::new(),
            image: "mugs.jpg".into(),
        });
        store.save_category_card(CategoryCard {
            category: "Mugs".into(),
            title: "Photo Mugs".into(),
            description: String::new(),
            image: "mugs2.jpg".into(),
        });

        let cards = store.category_cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Photo Mugs");

        assert!(matches!(rx.try_recv(), Ok(StoreEvent::CategoryCardsUpdated)));
        assert!(matches!(rx.try_recv(), Ok(StoreEvent::CategoryCardsUpdated)));
    }

    #[test]
    fn test_category_writes_publish_events() {
        let events = EventBus::new();
        let store = CategoryStore::new(KvStore::open_in_memory().unwrap(), events.clone());
        let mut rx = events.subscribe();

        store.save_custom_categories(vec![category("Mugs", None)]);
        assert!(matches!(
            rx.try_recv(),
            Ok(StoreEvent::CustomCategoriesUpdated)
        ));

        store.save_category_override(
            "Mugs",
            CategoryOverride {
                position: Some(1),
                ..Default::default()
            },
        );
        assert!(matches!(
            rx.try_recv(),
            Ok(StoreEvent::CategoryOverridesUpdated)
        ));
    }
}
