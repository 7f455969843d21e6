//! Concierge error types.

/// Errors that can occur talking to the model service.
#[derive(Debug, thiserror::Error)]
pub enum ConciergeError {
    #[error("model API error: {0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}
