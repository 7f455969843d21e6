//! AI concierge for the Nexora storefront.
//!
//! A thin pass-through to an external generative-model API: support chat
//! grounded in the service FAQ, and a device compatibility check. The
//! model does all the thinking; this crate owns the request plumbing,
//! retries, and prompts.

pub mod config;
pub mod error;
pub mod llm;
pub mod prompts;

pub use config::ConciergeConfig;
pub use error::ConciergeError;
pub use llm::{ChatTurn, LlmClient, Role};
pub use prompts::Locale;
