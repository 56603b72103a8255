//! Cart Model

use serde::{Deserialize, Serialize};

/// A single cart line
///
/// At most one line per product `id`; a line with `quantity <= 0` is never
/// persisted (filtered out on every write and again on read).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    /// Unit price at the time the line was created
    pub price: f64,
    pub image: String,
    #[serde(default)]
    pub quantity: i64,
}

/// Product details for a new cart line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCartItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
}

/// Cart money totals (2-decimal values)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: f64,
    pub taxes: f64,
    pub total: f64,
}

/// Payload broadcast on every cart mutation
///
/// Carries the post-mutation state so observers can resync without a
/// second storage read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartEventDetail {
    pub count: i64,
    pub items: Vec<CartItem>,
}
