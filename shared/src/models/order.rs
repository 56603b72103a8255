//! Order Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cart::{CartItem, CartTotals};
use super::customer::CustomerDetails;
use super::design::DesignUpload;

/// How the customer chose to settle the order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FulfillmentMethod {
    #[serde(rename = "Cash on Delivery")]
    CashOnDelivery,
    #[serde(rename = "Get a Quote")]
    GetAQuote,
    #[serde(rename = "Online Payment")]
    OnlinePayment,
}

impl FulfillmentMethod {
    /// Quote requests are not orders; everything else is.
    pub fn kind(self) -> OrderKind {
        match self {
            Self::GetAQuote => OrderKind::Quote,
            _ => OrderKind::Order,
        }
    }
}

/// Record classification derived from the fulfillment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    Order,
    Quote,
}

/// Order record metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderMeta {
    #[serde(rename = "type")]
    pub kind: OrderKind,
    pub source: String,
}

/// Immutable order record built at submission time
///
/// Once constructed the payload is never mutated; the same value is fanned
/// out to the notification webhooks and prepended to the local archive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub id: String,
    pub submitted_at: DateTime<Utc>,
    pub fulfillment_method: FulfillmentMethod,
    pub totals: CartTotals,
    pub cart: Vec<CartItem>,
    pub customer: CustomerDetails,
    #[serde(default)]
    pub design_upload: Option<DesignUpload>,
    pub meta: OrderMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_kind_derivation() {
        assert_eq!(FulfillmentMethod::GetAQuote.kind(), OrderKind::Quote);
        assert_eq!(FulfillmentMethod::CashOnDelivery.kind(), OrderKind::Order);
        assert_eq!(FulfillmentMethod::OnlinePayment.kind(), OrderKind::Order);
    }

    #[test]
    fn test_fulfillment_method_wire_names() {
        let json = serde_json::to_string(&FulfillmentMethod::CashOnDelivery).unwrap();
        assert_eq!(json, "\"Cash on Delivery\"");
        let back: FulfillmentMethod = serde_json::from_str("\"Get a Quote\"").unwrap();
        assert_eq!(back, FulfillmentMethod::GetAQuote);
    }

    #[test]
    fn test_meta_kind_serializes_as_type() {
        let meta = OrderMeta {
            kind: OrderKind::Quote,
            source: "web-checkout".into(),
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["type"], "quote");
    }
}
