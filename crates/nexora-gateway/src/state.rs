use chrono::{DateTime, Utc};
use concierge::LlmClient;
use mmqr::MerchantConfig;

use crate::orders::OrderStore;

/// Shared application state for the gateway.
pub struct AppState {
    pub orders: OrderStore,
    /// Merchant profile fed into the payment QR encoder.
    pub merchant: MerchantConfig,
    /// HMAC shared secret for authenticating /orders/{id}/confirm
    /// callbacks. This is mandatory — the gateway will not start without it.
    pub callback_secret: Vec<u8>,
    /// Model client; `None` runs the concierge endpoints dormant (503).
    pub concierge: Option<LlmClient>,
    /// Separate bearer token for /metrics (not the callback secret).
    pub metrics_token: Option<Vec<u8>>,
    pub started_at: DateTime<Utc>,
}
