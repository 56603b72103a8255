//! Webhook endpoint configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Purpose |
//! |----------|---------|---------|
//! | STOREFRONT_WHATSAPP_WEBHOOK_URL | unset | WhatsApp notification endpoint |
//! | STOREFRONT_EMAIL_WEBHOOK_URL | unset | Email notification endpoint |
//! | STOREFRONT_ORDERS_WEBHOOK_URL | unset | Admin order-record endpoint |
//! | STOREFRONT_WEBHOOK_TIMEOUT_MS | 8000 | Per-call timeout (milliseconds) |
//!
//! Unset or blank endpoint variables disable that channel; with all three
//! unset, order submission still archives locally but sends nothing.

use std::time::Duration;

/// Per-call webhook timeout default (8 seconds)
const DEFAULT_TIMEOUT_MS: u64 = 8_000;

/// Outbound webhook endpoints for order notifications
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub whatsapp_url: Option<String>,
    pub email_url: Option<String>,
    pub orders_url: Option<String>,
    /// Hard timeout applied independently to each call
    pub timeout: Duration,
}

impl WebhookConfig {
    /// Load endpoints from the environment
    pub fn from_env() -> Self {
        Self {
            whatsapp_url: env_url("STOREFRONT_WHATSAPP_WEBHOOK_URL"),
            email_url: env_url("STOREFRONT_EMAIL_WEBHOOK_URL"),
            orders_url: env_url("STOREFRONT_ORDERS_WEBHOOK_URL"),
            timeout: Duration::from_millis(
                std::env::var("STOREFRONT_WEBHOOK_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_MS),
            ),
        }
    }

    /// Build a config with explicit endpoints
    ///
    /// Used by tests and by hosts that manage their own configuration.
    pub fn with_endpoints(
        whatsapp_url: Option<String>,
        email_url: Option<String>,
        orders_url: Option<String>,
    ) -> Self {
        Self {
            whatsapp_url,
            email_url,
            orders_url,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    /// True when no endpoint is configured
    pub fn is_empty(&self) -> bool {
        self.whatsapp_url.is_none() && self.email_url.is_none() && self.orders_url.is_none()
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self::with_endpoints(None, None, None)
    }
}

fn env_url(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty_with_8s_timeout() {
        let config = WebhookConfig::default();
        assert!(config.is_empty());
        assert_eq!(config.timeout, Duration::from_secs(8));
    }

    #[test]
    fn test_with_endpoints() {
        let config = WebhookConfig::with_endpoints(
            Some("http://localhost:9000/wa".into()),
            None,
            Some("http://localhost:9000/orders".into()),
        );
        assert!(!config.is_empty());
        assert!(config.email_url.is_none());
    }
}
