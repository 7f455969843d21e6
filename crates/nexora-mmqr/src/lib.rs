//! Merchant-presented payment QR payload encoder.
//!
//! Builds the deterministic, checksummed tag-length-value string a payment
//! scanner reads from a dynamic QR code: ordered fields for the merchant
//! profile, the transaction amount, and the order reference, closed by a
//! CRC-16/CCITT-FALSE trailer. The crate owns only the string; turning it
//! into pixels is the QR image renderer's job.

pub mod crc;
pub mod error;
pub mod merchant;
pub mod payload;
pub mod tlv;

// Re-exports
pub use error::MmqrError;
pub use merchant::MerchantConfig;
pub use payload::{encode_payment, verify_payload};
pub use tlv::{parse, TlvEntry};
