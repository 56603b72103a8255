//! Brand Model

use serde::{Deserialize, Serialize};

/// Brand visibility status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrandStatus {
    #[default]
    Active,
    Hidden,
}

/// Brand entity
///
/// Derived views merge two sources: brands mechanically extracted from the
/// product catalog and persisted admin edits. `associated_categories` is
/// always sorted and de-duplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub name: String,
    #[serde(default)]
    pub status: BrandStatus,
    #[serde(default)]
    pub associated_categories: Vec<String>,
}

impl Brand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: BrandStatus::Active,
            associated_categories: Vec::new(),
        }
    }
}

/// Update brand payload
///
/// `original_name` identifies the record when the update is a rename.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandUpdate {
    pub original_name: Option<String>,
    pub name: String,
    pub status: Option<BrandStatus>,
    pub associated_categories: Option<Vec<String>>,
}
