use actix_web::{get, post, web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde::Deserialize;

use concierge::{prompts, ChatTurn, Role};

use crate::auth;
use crate::catalog;
use crate::metrics;
use crate::orders::{ConfirmOutcome, Operator};
use crate::state::AppState;
use crate::status;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub plan_id: String,
    pub operator: Operator,
    pub contact: String,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
    #[serde(default)]
    pub locale: prompts::Locale,
}

#[derive(Deserialize)]
pub struct CompatibilityRequest {
    pub device: String,
}

/// Validate the HMAC header on a payment-confirmation callback.
/// The shared secret is mandatory and set at startup.
/// Returns an error response if the signature is missing or invalid.
fn validate_callback_auth(
    req: &HttpRequest,
    body_bytes: &[u8],
    state: &AppState,
) -> Result<(), HttpResponse> {
    let header_value = req
        .headers()
        .get("X-Gateway-Auth")
        .and_then(|v| v.to_str().ok());

    match header_value {
        Some(sig) => {
            if auth::verify(&state.callback_secret, body_bytes, sig) {
                Ok(())
            } else {
                tracing::warn!("callback signature mismatch");
                metrics::AUTH_FAILURES.with_label_values(&["invalid"]).inc();
                Err(HttpResponse::Unauthorized().json(serde_json::json!({
                    "error": "authentication failed"
                })))
            }
        }
        None => {
            tracing::warn!("callback signature missing");
            metrics::AUTH_FAILURES.with_label_values(&["missing"]).inc();
            Err(HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "authentication required"
            })))
        }
    }
}

#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    let uptime_secs = (Utc::now() - state.started_at).num_seconds();
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "nexora-gateway",
        "uptimeSecs": uptime_secs,
    }))
}

#[get("/plans")]
pub async fn plans() -> HttpResponse {
    HttpResponse::Ok().json(catalog::PLANS)
}

#[post("/orders")]
pub async fn create_order(
    state: web::Data<AppState>,
    body: web::Json<CreateOrderRequest>,
) -> HttpResponse {
    let Some(plan) = catalog::find(&body.plan_id) else {
        metrics::ORDER_REQUESTS
            .with_label_values(&["unknown_plan"])
            .inc();
        return HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("unknown plan: {}", body.plan_id)
        }));
    };

    if !plan.is_available {
        metrics::ORDER_REQUESTS
            .with_label_values(&["unavailable"])
            .inc();
        return HttpResponse::Conflict().json(serde_json::json!({
            "error": format!("plan {} is not currently available", plan.id)
        }));
    }

    match state
        .orders
        .create(plan, body.operator, body.contact.clone(), &state.merchant)
    {
        Ok(order) => {
            metrics::ORDER_REQUESTS.with_label_values(&["created"]).inc();
            tracing::info!(
                order_id = %order.order_id,
                plan = plan.id,
                amount = order.amount,
                "order created"
            );
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "orderId": order.order_id,
                "paymentInfo": {
                    "qrData": order.qr_data,
                    "amount": order.amount,
                    "currency": order.currency,
                    "expires": order.expires_at,
                },
                "message": "Purchase initiated. Please proceed with payment.",
            }))
        }
        Err(e) => {
            // Hard stop on checkout: never hand out a payload that failed
            // to encode.
            metrics::ORDER_REQUESTS.with_label_values(&["error"]).inc();
            tracing::error!(error = %e, "payment payload encoding failed");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "payment encoding failed"
            }))
        }
    }
}

#[get("/orders/{id}")]
pub async fn get_order(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    match state.orders.get(&path.into_inner()) {
        Some(order) => HttpResponse::Ok().json(order),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "not found" })),
    }
}

#[post("/orders/{id}/confirm")]
pub async fn confirm_order(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> HttpResponse {
    if let Err(resp) = validate_callback_auth(&req, &body, &state) {
        return resp;
    }

    let order_id = path.into_inner();
    match state.orders.confirm(&order_id) {
        ConfirmOutcome::NotFound => {
            metrics::CONFIRM_REQUESTS
                .with_label_values(&["not_found"])
                .inc();
            HttpResponse::NotFound().json(serde_json::json!({ "error": "not found" }))
        }
        ConfirmOutcome::Expired => {
            metrics::CONFIRM_REQUESTS
                .with_label_values(&["expired"])
                .inc();
            tracing::warn!(order_id = %order_id, "confirmation for expired order");
            HttpResponse::Conflict().json(serde_json::json!({ "error": "order expired" }))
        }
        ConfirmOutcome::Paid => {
            metrics::CONFIRM_REQUESTS.with_label_values(&["paid"]).inc();
            tracing::info!(order_id = %order_id, "order paid");
            // get() cannot miss here, confirm just saw the order
            match state.orders.get(&order_id) {
                Some(order) => HttpResponse::Ok().json(order),
                None => HttpResponse::NotFound().json(serde_json::json!({ "error": "not found" })),
            }
        }
    }
}

#[get("/status")]
pub async fn system_status(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(status::report(state.concierge.is_some()))
}

#[post("/chat")]
pub async fn chat(state: web::Data<AppState>, body: web::Json<ChatRequest>) -> HttpResponse {
    let Some(llm) = &state.concierge else {
        metrics::CHAT_REQUESTS.with_label_values(&["dormant"]).inc();
        return HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "error": "concierge is not configured"
        }));
    };

    let mut turns = body.history.clone();
    turns.push(ChatTurn {
        role: Role::User,
        text: body.message.clone(),
    });

    match llm
        .generate(&prompts::support_system_prompt(body.locale), &turns)
        .await
    {
        Ok(reply) => {
            metrics::CHAT_REQUESTS.with_label_values(&["ok"]).inc();
            HttpResponse::Ok().json(serde_json::json!({ "reply": reply }))
        }
        Err(e) => {
            metrics::CHAT_REQUESTS.with_label_values(&["error"]).inc();
            tracing::error!(error = %e, "model request failed");
            HttpResponse::BadGateway().json(serde_json::json!({
                "error": "model request failed"
            }))
        }
    }
}

#[post("/compatibility")]
pub async fn compatibility(
    state: web::Data<AppState>,
    body: web::Json<CompatibilityRequest>,
) -> HttpResponse {
    let Some(llm) = &state.concierge else {
        return HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "error": "concierge is not configured"
        }));
    };

    let turns = vec![ChatTurn {
        role: Role::User,
        text: prompts::compatibility_prompt(&body.device),
    }];

    match llm
        .generate("You are a device compatibility checker.", &turns)
        .await
    {
        Ok(text) => match serde_json::from_str::<serde_json::Value>(text.trim()) {
            Ok(verdict) if verdict.get("isCompatible").is_some() => {
                HttpResponse::Ok().json(verdict)
            }
            _ => {
                tracing::warn!("model returned an unparseable compatibility verdict");
                HttpResponse::BadGateway().json(serde_json::json!({
                    "error": "model returned an unparseable verdict"
                }))
            }
        },
        Err(e) => {
            tracing::error!(error = %e, "model request failed");
            HttpResponse::BadGateway().json(serde_json::json!({
                "error": "model request failed"
            }))
        }
    }
}

#[get("/metrics")]
pub async fn metrics_endpoint(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    // Separate METRICS_TOKEN for metrics auth (not the callback secret).
    match &state.metrics_token {
        Some(token) => {
            let authorized = req
                .headers()
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(|t| auth::constant_time_eq(t.as_bytes(), token))
                .unwrap_or(false);

            if !authorized {
                return HttpResponse::Unauthorized().json(serde_json::json!({
                    "error": "unauthorized",
                    "message": "Valid Bearer token required for /metrics"
                }));
            }
        }
        None => {
            // No token configured — metrics stay protected by default.
            // Set NEXORA_PUBLIC_METRICS=true to opt in to open access.
            let public_metrics = std::env::var("NEXORA_PUBLIC_METRICS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false);
            if !public_metrics {
                return HttpResponse::Forbidden().json(serde_json::json!({
                    "error": "forbidden",
                    "message": "Set METRICS_TOKEN or NEXORA_PUBLIC_METRICS=true to access /metrics"
                }));
            }
        }
    }
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(metrics::metrics_output())
}
