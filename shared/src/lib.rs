//! Shared types for the storefront commerce state layer
//!
//! Domain models used across the workspace: cart lines, catalog entities,
//! brands, services, orders and the design-upload record, plus the time/ID
//! utilities the stores share.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Model re-exports (for convenient access)
pub use models::brand::{Brand, BrandStatus, BrandUpdate};
pub use models::cart::{CartEventDetail, CartItem, CartTotals, NewCartItem};
pub use models::category::{CategoryCard, CategoryOverride, CustomCategory};
pub use models::customer::CustomerDetails;
pub use models::design::DesignUpload;
pub use models::order::{FulfillmentMethod, OrderKind, OrderMeta, OrderPayload};
pub use models::product::Product;
pub use models::service::{ServiceStatus, SpecialService};
