//! Category Model

use serde::{Deserialize, Serialize};

/// Admin-created category
///
/// `position` orders the category within the storefront navigation;
/// positions are unique across the whole set, `None` sorts to the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomCategory {
    pub name: String,
    #[serde(default)]
    pub position: Option<u32>,
}

/// Persisted patch applied against a base category name at read time
///
/// A record with no meaningful fields is pruned before persisting, never
/// stored as a no-op.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryOverride {
    #[serde(default)]
    pub renamed_to: Option<String>,
    #[serde(default)]
    pub hidden: Option<bool>,
    #[serde(default)]
    pub position: Option<u32>,
}

impl CategoryOverride {
    /// True when no field carries a value
    pub fn is_noop(&self) -> bool {
        self.renamed_to.is_none() && self.hidden.is_none() && self.position.is_none()
    }
}

/// Display content for a category card on the storefront home page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryCard {
    pub category: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_noop_detection() {
        assert!(CategoryOverride::default().is_noop());
        assert!(!CategoryOverride {
            hidden: Some(true),
            ..Default::default()
        }
        .is_noop());
    }
}
