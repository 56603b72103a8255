//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
///
/// Comes from two sources: the static base catalog compiled into the host
/// application, and admin-entered "extra" products persisted in storage.
/// Extras win on `id` collision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// URL slug, e.g. "premium-visiting-cards"
    #[serde(default)]
    pub slug: String,
    /// Category reference (display name, required)
    pub category: String,
    pub brand: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    /// Additional product images
    #[serde(default)]
    pub image_gallery: Vec<String>,
    pub description: Option<String>,
}

/// Persisted extra-product record, tolerant of the legacy shape
///
/// Older records carry a single `image_url` string instead of
/// `image_gallery`; [`ExtraProductRecord::migrate`] folds it into a
/// one-element gallery and drops the legacy field.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtraProductRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    pub category: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image: String,
    /// Legacy single-image field
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_gallery: Option<Vec<String>>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ExtraProductRecord {
    /// Convert to the current [`Product`] shape
    pub fn migrate(self) -> Product {
        let image_gallery = match (self.image_gallery, self.image_url) {
            (Some(gallery), _) => gallery,
            (None, Some(url)) => vec![url],
            (None, None) => Vec::new(),
        };
        Product {
            id: self.id,
            name: self.name,
            slug: self.slug,
            category: self.category,
            brand: self.brand,
            price: self.price,
            image: self.image,
            image_gallery,
            description: self.description,
        }
    }
}
