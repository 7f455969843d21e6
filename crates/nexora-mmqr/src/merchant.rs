//! Merchant identity and scheme constants.

/// Payload format indicator (tag 00).
pub const PAYLOAD_FORMAT: &str = "01";

/// Point-of-initiation method (tag 01). `12` marks a dynamic,
/// per-transaction QR.
pub const INITIATION_DYNAMIC: &str = "12";

/// Globally unique identifier of the payment scheme (tag 29, sub-tag 00).
pub const SCHEME_ID: &str = "A000000677010111";

/// Merchant identifier within the scheme (tag 29, sub-tag 01).
pub const MERCHANT_ID: &str = "09650000172";

/// Merchant category code (tag 52). 4814 is telecommunication services.
pub const CATEGORY_TELECOM: &str = "4814";

/// ISO 4217 numeric code for MMK (tag 53).
pub const CURRENCY_MMK: &str = "104";

/// ISO 3166 country code (tag 58).
pub const COUNTRY_MM: &str = "MM";

/// Merchant display name (tag 59).
pub const MERCHANT_NAME: &str = "eSIM Myanmar";

/// Merchant city (tag 60).
pub const MERCHANT_CITY: &str = "Yangon";

/// Runtime merchant configuration. Decouples the payload assembler from
/// compile-time constants, enabling per-market overrides and keeping the
/// encoder free of process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantConfig {
    pub payload_format: String,
    pub initiation_method: String,
    pub scheme_id: String,
    pub merchant_id: String,
    pub category_code: String,
    pub currency_code: String,
    pub country_code: String,
    pub merchant_name: String,
    pub merchant_city: String,
}

impl Default for MerchantConfig {
    /// Defaults to the Nexora MMK merchant profile.
    fn default() -> Self {
        Self {
            payload_format: PAYLOAD_FORMAT.to_string(),
            initiation_method: INITIATION_DYNAMIC.to_string(),
            scheme_id: SCHEME_ID.to_string(),
            merchant_id: MERCHANT_ID.to_string(),
            category_code: CATEGORY_TELECOM.to_string(),
            currency_code: CURRENCY_MMK.to_string(),
            country_code: COUNTRY_MM.to_string(),
            merchant_name: MERCHANT_NAME.to_string(),
            merchant_city: MERCHANT_CITY.to_string(),
        }
    }
}
