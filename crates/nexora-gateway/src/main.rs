use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{web, App, HttpServer};
use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use concierge::{ConciergeConfig, LlmClient};
use gateway::orders::OrderStore;
use gateway::routes;
use gateway::state::AppState;

fn parse_cors_origins() -> Vec<String> {
    match std::env::var("ALLOWED_ORIGINS") {
        Ok(origins) => origins
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Err(_) => vec![],
    }
}

fn build_cors(origins: &[String]) -> Cors {
    if origins.is_empty() {
        // Default: allow localhost on any port
        Cors::default()
            .allowed_origin_fn(|origin, _| {
                origin
                    .to_str()
                    .map(|o| {
                        // Match http://localhost or http://localhost:PORT exactly
                        o == "http://localhost" || o.starts_with("http://localhost:")
                    })
                    .unwrap_or(false)
            })
            .allow_any_method()
            .allowed_headers(vec!["content-type", "authorization", "x-gateway-auth"])
            .max_age(3600)
    } else {
        let mut cors = Cors::default();
        for origin in origins {
            cors = cors.allowed_origin(origin);
        }
        cors.allow_any_method()
            .allowed_headers(vec!["content-type", "authorization", "x-gateway-auth"])
            .max_age(3600)
    }
}

/// Merchant profile: defaults from the encoder crate, with optional env
/// overrides for multi-market deployments.
fn merchant_config() -> mmqr::MerchantConfig {
    let mut merchant = mmqr::MerchantConfig::default();
    if let Ok(name) = std::env::var("MERCHANT_NAME") {
        if !name.is_empty() {
            merchant.merchant_name = name;
        }
    }
    if let Ok(city) = std::env::var("MERCHANT_CITY") {
        if !city.is_empty() {
            merchant.merchant_city = city;
        }
    }
    if let Ok(id) = std::env::var("MERCHANT_ID") {
        if !id.is_empty() {
            merchant.merchant_id = id;
        }
    }
    merchant
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let callback_secret: Vec<u8> = match std::env::var("GATEWAY_SHARED_SECRET")
        .ok()
        .filter(|s| !s.is_empty())
    {
        Some(s) => {
            let bytes = s.into_bytes();
            if bytes.len() < 32 {
                tracing::warn!(
                    "GATEWAY_SHARED_SECRET is only {} bytes (minimum 32 recommended) — \
                     use `openssl rand -hex 32` to generate a secure secret",
                    bytes.len()
                );
            }
            bytes
        }
        None => {
            tracing::error!(
                "GATEWAY_SHARED_SECRET is required. \
                 Set it to a secure random value (e.g. `openssl rand -hex 32`). \
                 For local development, any non-empty value will work."
            );
            std::process::exit(1);
        }
    };

    // Separate metrics token; without it /metrics stays closed.
    let metrics_token = std::env::var("METRICS_TOKEN")
        .ok()
        .filter(|s| !s.is_empty())
        .map(|s| s.into_bytes());

    if metrics_token.is_none() {
        tracing::warn!("METRICS_TOKEN not set — /metrics requires NEXORA_PUBLIC_METRICS=true");
    }

    let order_ttl_secs: i64 = std::env::var("ORDER_TTL_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(600);

    let merchant = merchant_config();

    let concierge_config = ConciergeConfig::from_env();
    let concierge_client = match &concierge_config.api_key {
        Some(key) => {
            tracing::info!(model = %concierge_config.model, "concierge enabled");
            Some(LlmClient::new(
                key.clone(),
                concierge_config.model.clone(),
                concierge_config.request_timeout_secs,
            ))
        }
        None => {
            tracing::warn!("GEMINI_API_KEY not set — concierge endpoints will return 503");
            None
        }
    };

    let state = web::Data::new(AppState {
        orders: OrderStore::new(order_ttl_secs),
        merchant,
        callback_secret,
        concierge: concierge_client,
        metrics_token,
        started_at: Utc::now(),
    });

    let port: u16 = std::env::var("GATEWAY_PORT")
        .or_else(|_| std::env::var("PORT"))
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(4030);

    let rate_limit_rpm: u64 = std::env::var("RATE_LIMIT_RPM")
        .ok()
        .and_then(|r| r.parse().ok())
        .unwrap_or(120);

    let cors_origins = parse_cors_origins();

    tracing::info!("Nexora gateway listening on port {port}");
    tracing::info!("Rate limit: {rate_limit_rpm} req/min per IP");
    tracing::info!("Payment window: {order_ttl_secs}s per order");
    tracing::info!("  GET  http://localhost:{port}/plans");
    tracing::info!("  POST http://localhost:{port}/orders");

    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_minute(rate_limit_rpm)
        .finish()
        .expect("failed to build rate limiter config");

    HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&cors_origins))
            .wrap(Governor::new(&governor_conf))
            .app_data(state.clone())
            .app_data(web::JsonConfig::default().limit(65_536))
            .service(routes::health)
            .service(routes::metrics_endpoint)
            .service(routes::plans)
            .service(routes::create_order)
            .service(routes::get_order)
            .service(routes::confirm_order)
            .service(routes::system_status)
            .service(routes::chat)
            .service(routes::compatibility)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
