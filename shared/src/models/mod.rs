//! Domain models for the storefront state layer

pub mod brand;
pub mod cart;
pub mod category;
pub mod customer;
pub mod design;
pub mod order;
pub mod product;
pub mod service;

pub use brand::{Brand, BrandStatus, BrandUpdate};
pub use cart::{CartEventDetail, CartItem, CartTotals, NewCartItem};
pub use category::{CategoryCard, CategoryOverride, CustomCategory};
pub use customer::CustomerDetails;
pub use design::DesignUpload;
pub use order::{FulfillmentMethod, OrderKind, OrderMeta, OrderPayload};
pub use product::Product;
pub use service::{ServiceStatus, SpecialService};
