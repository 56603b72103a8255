//! Customer Model

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// Customer details captured by the checkout form
///
/// Required fields are validated before order submission; everything else
/// is optional. `extra` keeps any additional form fields the host
/// application collects without a schema change here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CustomerDetails {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "pincode is required"))]
    pub pincode: String,
    #[serde(default)]
    pub landmark: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub gst: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    /// Additional free-form fields
    #[serde(flatten)]
    pub extra: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_customer() -> CustomerDetails {
        CustomerDetails {
            name: "Asha Verma".into(),
            email: "asha@example.com".into(),
            phone: "9876543210".into(),
            address: "12 MG Road".into(),
            pincode: "560001".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_customer_passes() {
        assert!(valid_customer().validate().is_ok());
    }

    #[test]
    fn test_missing_required_field_fails() {
        let mut customer = valid_customer();
        customer.pincode = String::new();
        assert!(customer.validate().is_err());
    }

    #[test]
    fn test_bad_email_fails() {
        let mut customer = valid_customer();
        customer.email = "not-an-email".into();
        assert!(customer.validate().is_err());
    }

    #[test]
    fn test_extra_fields_round_trip() {
        let mut customer = valid_customer();
        customer
            .extra
            .insert("referral_code".into(), "PRINT10".into());

        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["referral_code"], "PRINT10");

        let back: CustomerDetails = serde_json::from_value(json).unwrap();
        assert_eq!(back.extra.get("referral_code").unwrap(), "PRINT10");
    }
}
