use prometheus::{
    register_int_counter_vec, Encoder, IntCounterVec, TextEncoder,
};
use std::sync::LazyLock;

pub static ORDER_REQUESTS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "nexora_gateway_orders_total",
        "Checkout order requests",
        &["result"]
    )
    .unwrap()
});

pub static CONFIRM_REQUESTS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "nexora_gateway_confirmations_total",
        "Payment confirmation callbacks",
        &["result"]
    )
    .unwrap()
});

pub static CHAT_REQUESTS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "nexora_gateway_chat_total",
        "Concierge chat requests",
        &["result"]
    )
    .unwrap()
});

pub static AUTH_FAILURES: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "nexora_gateway_auth_failures_total",
        "Callback authentication failures",
        &["reason"]
    )
    .unwrap()
});

pub fn metrics_output() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if encoder.encode(&metric_families, &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
