//! Cart business rules
//!
//! Cross-cutting predicates derived by joining cart lines against the
//! catalog. Used by the checkout flow to decide whether the design-upload
//! step is required.

use shared::models::cart::CartItem;
use shared::models::product::Product;

/// Product name/category fragments that identify a visiting-card line
const VISITING_CARD_KEYWORDS: [&str; 3] = ["visiting card", "visiting cards", "visiting-card"];

/// Lowercase and collapse runs of whitespace to single spaces
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn matches_keyword(text: &str) -> bool {
    let normalized = normalize(text);
    VISITING_CARD_KEYWORDS
        .iter()
        .any(|keyword| normalized.contains(keyword))
}

/// Whether any cart line is a visiting-card product
///
/// A line matches when a keyword appears in the catalog product's
/// `category`, `slug` or `name` (resolved by id), or in the line's own
/// stored name. Lines without a catalog entry degrade to name-only
/// matching; this never fails.
pub fn cart_has_visiting_card(items: &[CartItem], catalog: &[Product]) -> bool {
    items.iter().any(|line| {
        if matches_keyword(&line.name) {
            return true;
        }
        catalog
            .iter()
            .find(|product| product.id == line.id)
            .is_some_and(|product| {
                matches_keyword(&product.category)
                    || matches_keyword(&product.slug)
                    || matches_keyword(&product.name)
            })
    })
}
