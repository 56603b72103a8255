//! Order submission pipeline
//!
//! Builds the immutable order record and fans it out to the configured
//! notification webhooks. Delivery is fire-and-forget with a settled
//! join: each endpoint gets its own task, its own timeout and its own
//! cancellation token, and no failure crosses over to another endpoint or
//! to the caller. There are no retries — the durable record is the local
//! archive, written by the caller regardless of delivery outcome.

use crate::config::WebhookConfig;
use futures::future::join_all;
use shared::models::cart::{CartItem, CartTotals};
use shared::models::customer::CustomerDetails;
use shared::models::design::DesignUpload;
use shared::models::order::{FulfillmentMethod, OrderMeta, OrderPayload};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Notification channels, at most one endpoint each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Whatsapp,
    Email,
    AdminRecord,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Whatsapp => "whatsapp",
            Self::Email => "email",
            Self::AdminRecord => "admin-record",
        }
    }
}

/// Everything checkout collects before submission
#[derive(Debug, Clone)]
pub struct OrderSubmission {
    pub fulfillment_method: FulfillmentMethod,
    pub totals: CartTotals,
    pub cart: Vec<CartItem>,
    pub customer: CustomerDetails,
    pub design_upload: Option<DesignUpload>,
}

/// Build the immutable order record
///
/// Stamps the submission time, assigns the order id and derives the
/// record kind from the fulfillment method.
pub fn build_order_payload(submission: OrderSubmission) -> OrderPayload {
    OrderPayload {
        id: uuid::Uuid::new_v4().to_string(),
        submitted_at: chrono::Utc::now(),
        meta: OrderMeta {
            kind: submission.fulfillment_method.kind(),
            source: "web-checkout".to_string(),
        },
        fulfillment_method: submission.fulfillment_method,
        totals: submission.totals,
        cart: submission.cart,
        customer: submission.customer,
        design_upload: submission.design_upload,
    }
}

/// Per-endpoint delivery failure
#[derive(Debug, Error)]
enum NotifyError {
    #[error("request timed out")]
    Timeout,

    #[error("cancelled by shutdown")]
    Cancelled,

    #[error("endpoint returned status {0}")]
    Status(u16),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Webhook fan-out for submitted orders
#[derive(Debug, Clone)]
pub struct OrderNotifier {
    config: WebhookConfig,
    client: reqwest::Client,
    shutdown: CancellationToken,
}

impl OrderNotifier {
    pub fn new(config: WebhookConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            shutdown: CancellationToken::new(),
        }
    }

    /// Token that aborts in-flight deliveries when cancelled
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Deliver the order to every configured endpoint
    ///
    /// Settled join: all configured calls run concurrently, each with its
    /// own timeout; per-endpoint outcomes are logged and never surface to
    /// the caller. A no-op (with a warning) when nothing is configured.
    pub async fn send_order_communications(&self, payload: &OrderPayload) {
        let endpoints = self.configured_endpoints();
        if endpoints.is_empty() {
            tracing::warn!(
                order_id = %payload.id,
                "No order webhooks configured, skipping notifications"
            );
            return;
        }

        let deliveries = endpoints
            .into_iter()
            .map(|(channel, url)| async move {
                (channel, self.deliver(channel, &url, payload).await)
            });

        for (channel, outcome) in join_all(deliveries).await {
            match outcome {
                Ok(()) => {
                    tracing::debug!(order_id = %payload.id, channel = channel.as_str(), "Order notification delivered");
                }
                Err(e) => {
                    tracing::warn!(
                        order_id = %payload.id,
                        channel = channel.as_str(),
                        error = %e,
                        "Order notification failed"
                    );
                }
            }
        }
    }

    fn configured_endpoints(&self) -> Vec<(Channel, String)> {
        [
            (Channel::Whatsapp, self.config.whatsapp_url.clone()),
            (Channel::Email, self.config.email_url.clone()),
            (Channel::AdminRecord, self.config.orders_url.clone()),
        ]
        .into_iter()
        .filter_map(|(channel, url)| url.map(|url| (channel, url)))
        .collect()
    }

    async fn deliver(
        &self,
        channel: Channel,
        url: &str,
        payload: &OrderPayload,
    ) -> Result<(), NotifyError> {
        let body = envelope(channel, payload);
        let cancel = self.shutdown.child_token();
        let request = self
            .client
            .post(url)
            .timeout(self.config.timeout)
            .json(&body)
            .send();

        tokio::select! {
            _ = cancel.cancelled() => Err(NotifyError::Cancelled),
            result = request => match result {
                Ok(response) if response.status().is_success() => Ok(()),
                Ok(response) => Err(NotifyError::Status(response.status().as_u16())),
                Err(e) if e.is_timeout() => Err(NotifyError::Timeout),
                Err(e) => Err(NotifyError::Http(e)),
            },
        }
    }
}

/// Channel-specific request body
///
/// WhatsApp gets a pre-rendered message next to the raw payload; the
/// other channels get the generic `{channel, payload}` envelope.
fn envelope(channel: Channel, payload: &OrderPayload) -> serde_json::Value {
    match channel {
        Channel::Whatsapp => serde_json::json!({
            "channel": channel.as_str(),
            "phone": payload.customer.phone,
            "message": whatsapp_message(payload),
            "payload": payload,
        }),
        Channel::Email | Channel::AdminRecord => serde_json::json!({
            "channel": channel.as_str(),
            "payload": payload,
        }),
    }
}

fn whatsapp_message(payload: &OrderPayload) -> String {
    let mut lines = vec![format!(
        "New {} from {}",
        match payload.meta.kind {
            shared::models::order::OrderKind::Quote => "quote request",
            shared::models::order::OrderKind::Order => "order",
        },
        payload.customer.name
    )];
    for item in &payload.cart {
        lines.push(format!("- {} x{}", item.name, item.quantity));
    }
    lines.push(format!("Total: INR {:.2}", payload.totals.total));
    lines.join("\n")
}
