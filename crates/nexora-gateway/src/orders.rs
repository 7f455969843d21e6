//! In-memory order store.
//!
//! Orders are a demo-scale concern: a `DashMap` keyed by order id, with a
//! payment window enforced on read. Persistence belongs to the upstream
//! order service, not this gateway.

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use mmqr::{MerchantConfig, MmqrError};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::EsimPlan;

/// Mobile network the plan is provisioned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    MPT,
    ATOM,
    Ooredoo,
    Mytel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderState {
    Pending,
    Paid,
    Expired,
}

/// One checkout attempt.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    pub plan_id: String,
    pub operator: Operator,
    pub contact: String,
    /// Amount due in MMK.
    pub amount: u32,
    pub currency: &'static str,
    /// Encoded payment QR payload for this order.
    pub qr_data: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub state: OrderState,
}

/// Outcome of a payment-confirmation callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    NotFound,
    Expired,
    Paid,
}

pub struct OrderStore {
    orders: DashMap<String, Order>,
    payment_window: TimeDelta,
}

impl OrderStore {
    /// Create a store whose orders expire `ttl_secs` after creation.
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            orders: DashMap::new(),
            payment_window: TimeDelta::seconds(ttl_secs),
        }
    }

    /// Create an order for `plan`, encoding its payment QR payload.
    ///
    /// Fails without storing anything if the encoder rejects the input —
    /// a QR code known to be malformed must never reach a customer.
    pub fn create(
        &self,
        plan: &EsimPlan,
        operator: Operator,
        contact: String,
        merchant: &MerchantConfig,
    ) -> Result<Order, MmqrError> {
        let order_id = new_order_id();
        let qr_data = mmqr::encode_payment(merchant, &order_id, f64::from(plan.price))?;

        let now = Utc::now();
        let order = Order {
            order_id: order_id.clone(),
            plan_id: plan.id.to_string(),
            operator,
            contact,
            amount: plan.price,
            currency: "MMK",
            qr_data,
            created_at: now,
            expires_at: now + self.payment_window,
            state: OrderState::Pending,
        };
        self.orders.insert(order_id, order.clone());
        Ok(order)
    }

    /// Look up an order, settling the expiry transition on read: a pending
    /// order past its payment window reports (and stays) `Expired`.
    pub fn get(&self, order_id: &str) -> Option<Order> {
        let mut entry = self.orders.get_mut(order_id)?;
        if entry.state == OrderState::Pending && Utc::now() > entry.expires_at {
            entry.state = OrderState::Expired;
        }
        Some(entry.clone())
    }

    /// Mark an order paid. Idempotent for already-paid orders; expired
    /// orders can no longer be confirmed.
    pub fn confirm(&self, order_id: &str) -> ConfirmOutcome {
        let Some(mut entry) = self.orders.get_mut(order_id) else {
            return ConfirmOutcome::NotFound;
        };
        match entry.state {
            OrderState::Paid => ConfirmOutcome::Paid,
            OrderState::Expired => ConfirmOutcome::Expired,
            OrderState::Pending => {
                if Utc::now() > entry.expires_at {
                    entry.state = OrderState::Expired;
                    ConfirmOutcome::Expired
                } else {
                    entry.state = OrderState::Paid;
                    ConfirmOutcome::Paid
                }
            }
        }
    }
}

/// Generate an order id: `NEX-` plus six uppercase base36 characters.
fn new_order_id() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut rng = rand::rng();
    let suffix: String = (0..6)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect();
    format!("NEX-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn store(ttl_secs: i64) -> OrderStore {
        OrderStore::new(ttl_secs)
    }

    fn plan() -> &'static EsimPlan {
        catalog::find("power-30").unwrap()
    }

    #[test]
    fn test_create_produces_pending_order_with_valid_payload() {
        let store = store(600);
        let order = store
            .create(
                plan(),
                Operator::MPT,
                "user@example.com".to_string(),
                &MerchantConfig::default(),
            )
            .unwrap();

        assert_eq!(order.state, OrderState::Pending);
        assert_eq!(order.amount, 80_000);
        assert!(order.order_id.starts_with("NEX-"));
        assert_eq!(order.order_id.len(), 10);
        assert!(mmqr::verify_payload(&order.qr_data));
        assert!(order.qr_data.contains("540880000.00"));
    }

    #[test]
    fn test_get_unknown_order() {
        assert!(store(600).get("NEX-MISSING").is_none());
    }

    #[test]
    fn test_pending_order_expires_on_read() {
        let store = store(0);
        let order = store
            .create(
                plan(),
                Operator::ATOM,
                "user@example.com".to_string(),
                &MerchantConfig::default(),
            )
            .unwrap();

        let read = store.get(&order.order_id).unwrap();
        assert_eq!(read.state, OrderState::Expired);
    }

    #[test]
    fn test_confirm_transitions_to_paid() {
        let store = store(600);
        let order = store
            .create(
                plan(),
                Operator::Ooredoo,
                "09650000000".to_string(),
                &MerchantConfig::default(),
            )
            .unwrap();

        assert_eq!(store.confirm(&order.order_id), ConfirmOutcome::Paid);
        assert_eq!(store.get(&order.order_id).unwrap().state, OrderState::Paid);

        // Idempotent for already-paid orders.
        assert_eq!(store.confirm(&order.order_id), ConfirmOutcome::Paid);
    }

    #[test]
    fn test_confirm_expired_order_fails() {
        let store = store(0);
        let order = store
            .create(
                plan(),
                Operator::Mytel,
                "09650000000".to_string(),
                &MerchantConfig::default(),
            )
            .unwrap();

        assert_eq!(store.confirm(&order.order_id), ConfirmOutcome::Expired);
    }

    #[test]
    fn test_confirm_unknown_order() {
        assert_eq!(store(600).confirm("NEX-MISSING"), ConfirmOutcome::NotFound);
    }

    #[test]
    fn test_paid_order_does_not_expire() {
        let store = store(600);
        let order = store
            .create(
                plan(),
                Operator::MPT,
                "user@example.com".to_string(),
                &MerchantConfig::default(),
            )
            .unwrap();
        assert_eq!(store.confirm(&order.order_id), ConfirmOutcome::Paid);

        // Backdate the window; a paid order must not flip to expired.
        store.orders.get_mut(&order.order_id).unwrap().expires_at =
            Utc::now() - TimeDelta::seconds(60);
        let read = store.get(&order.order_id).unwrap();
        assert_eq!(read.state, OrderState::Paid);
    }
}
