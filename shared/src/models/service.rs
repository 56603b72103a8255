//! Special Service Model

use serde::{Deserialize, Serialize};

/// Service availability status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceStatus {
    #[default]
    Active,
    Inactive,
}

/// A "special service" offered alongside the catalog
/// (rush printing, bulk pricing, design assistance, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialService {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ServiceStatus,
}
