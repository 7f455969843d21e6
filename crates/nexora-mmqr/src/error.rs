use thiserror::Error;

/// Errors returned by payload encoding and parsing.
#[derive(Debug, Error, PartialEq)]
pub enum MmqrError {
    #[error("field {tag} value is {len} characters, over the 99-character TLV limit")]
    FieldOverflow { tag: String, len: usize },

    #[error("field {tag} value contains non-ASCII characters")]
    NonAscii { tag: String },

    #[error("invalid tag {0:?}: tags are exactly two ASCII characters")]
    InvalidTag(String),

    #[error("invalid amount {0}: must be finite and non-negative")]
    InvalidAmount(f64),

    #[error("malformed payload: {0}")]
    Malformed(String),
}
