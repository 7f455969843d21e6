//! Model client with retry and backoff.
//!
//! Currently backed by the Gemini API. The public types (`LlmClient`,
//! `ChatTurn`) are provider-agnostic so callers don't need to change when
//! the backend changes.

use serde::{Deserialize, Serialize};

use crate::error::ConciergeError;

/// Client for the external generative-model service.
pub struct LlmClient {
    api_key: String,
    model: String,
    http: reqwest::Client,
}

// ── Gemini wire types (private) ─────────────────────────────────────────

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<Part>>,
}

// ── Public types (provider-agnostic) ────────────────────────────────────

/// Who authored a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// One turn of conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

impl LlmClient {
    /// Create a new model client.
    pub fn new(api_key: String, model: String, request_timeout_secs: u64) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(request_timeout_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_default();

        Self {
            api_key,
            model,
            http,
        }
    }

    /// Send a system instruction plus conversation turns and return the
    /// response text. Retries up to 3 times with exponential backoff and
    /// jitter.
    pub async fn generate(
        &self,
        system_instruction: &str,
        turns: &[ChatTurn],
    ) -> Result<String, ConciergeError> {
        let contents: Vec<Content> = turns
            .iter()
            .map(|turn| Content {
                role: Some(turn.role.as_str().to_string()),
                parts: vec![Part {
                    text: Some(turn.text.clone()),
                }],
            })
            .collect();

        let request = GeminiRequest {
            contents,
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part {
                    text: Some(system_instruction.to_string()),
                }],
            }),
        };

        self.send_request(&request).await
    }

    /// Low-level: send a request to the Gemini API and parse the response.
    async fn send_request(&self, request: &GeminiRequest) -> Result<String, ConciergeError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let backoff_ms = [500u64, 1000, 2000];
        let mut last_err = None;

        for (attempt, base_delay) in backoff_ms.iter().enumerate() {
            match self.http.post(&url).json(request).send().await {
                Ok(resp) => {
                    let status = resp.status();
                    let body = resp.text().await.map_err(ConciergeError::Http)?;

                    if !status.is_success() {
                        tracing::warn!(status = %status, attempt, "model API returned an error");
                        last_err = Some(ConciergeError::Api(format!(
                            "HTTP {}: {}",
                            status,
                            body.chars().take(200).collect::<String>()
                        )));
                        if attempt < backoff_ms.len() - 1 {
                            let jitter = jitter_ms(*base_delay);
                            tokio::time::sleep(std::time::Duration::from_millis(jitter)).await;
                            continue;
                        }
                        break;
                    }

                    let parsed: GeminiResponse = serde_json::from_str(&body)
                        .map_err(|e| ConciergeError::Api(format!("failed to parse response: {e}")))?;

                    let text: String = parsed
                        .candidates
                        .and_then(|c| c.into_iter().next())
                        .and_then(|c| c.content)
                        .and_then(|c| c.parts)
                        .unwrap_or_default()
                        .iter()
                        .filter_map(|p| p.text.as_ref())
                        .cloned()
                        .collect::<Vec<_>>()
                        .join("");

                    return Ok(text);
                }
                Err(e) => {
                    tracing::warn!(attempt, "model request failed: {e}");
                    last_err = Some(ConciergeError::Http(e));
                    if attempt < backoff_ms.len() - 1 {
                        let jitter = jitter_ms(*base_delay);
                        tokio::time::sleep(std::time::Duration::from_millis(jitter)).await;
                    }
                }
            }
        }

        Err(last_err.unwrap_or_else(|| ConciergeError::Api("all retries exhausted".to_string())))
    }
}

/// Add ±25% jitter to a base delay.
fn jitter_ms(base: u64) -> u64 {
    let quarter = base / 4;
    let offset = simple_random() % (quarter * 2 + 1);
    base - quarter + offset
}

/// Simple pseudo-random using timestamp nanos (not cryptographic, just for jitter).
fn simple_random() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as u64)
        .unwrap_or(0)
}
