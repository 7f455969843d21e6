//! Concierge configuration from environment variables.

/// Configuration for the concierge.
#[derive(Debug, Clone)]
pub struct ConciergeConfig {
    /// Model API key (env: GEMINI_API_KEY). If absent, the concierge runs
    /// in dormant mode and callers surface 503.
    pub api_key: Option<String>,
    /// Model used for chat and compatibility checks (default: gemini-2.5-flash).
    pub model: String,
    /// Per-request timeout in seconds (default: 60).
    pub request_timeout_secs: u64,
}

impl ConciergeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|s| !s.is_empty());

        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string());

        let request_timeout_secs: u64 = std::env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);

        Self {
            api_key,
            model,
            request_timeout_secs,
        }
    }
}
