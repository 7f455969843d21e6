//! Payment payload assembly.
//!
//! Field order is fixed and significant: payload format (00), initiation
//! method (01), merchant account information (29), category code (52),
//! currency (53), amount (54), country (58), merchant name (59), merchant
//! city (60), additional data carrying the order id (62), checksum (63).
//! Consumers that re-parse the payload depend on this order.

use crate::crc;
use crate::error::MmqrError;
use crate::merchant::MerchantConfig;
use crate::tlv;

/// Tag and length prefix of the trailing checksum field. The checksum
/// covers every character up to and including these four.
const CRC_PREFIX: &str = "6304";

/// Encode a dynamic merchant payment request as a checksummed TLV string
/// ready to hand to a QR image renderer.
///
/// `amount` is in the merchant's local currency and is rendered with
/// exactly two fractional digits, no separators, no currency symbol.
/// Fails instead of emitting a malformed payload when the amount is
/// negative or non-finite, when any value is non-ASCII, or when a field
/// value (the order id included) exceeds the 99-character TLV limit.
pub fn encode_payment(
    config: &MerchantConfig,
    order_id: &str,
    amount: f64,
) -> Result<String, MmqrError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(MmqrError::InvalidAmount(amount));
    }

    let merchant_account = tlv::nested(
        "29",
        &[
            ("00", config.scheme_id.as_str()),
            ("01", config.merchant_id.as_str()),
        ],
    )?;
    let additional_data = tlv::nested("62", &[("01", order_id)])?;

    let mut payload = String::new();
    payload.push_str(&tlv::field("00", &config.payload_format)?);
    payload.push_str(&tlv::field("01", &config.initiation_method)?);
    payload.push_str(&merchant_account);
    payload.push_str(&tlv::field("52", &config.category_code)?);
    payload.push_str(&tlv::field("53", &config.currency_code)?);
    payload.push_str(&tlv::field("54", &format!("{amount:.2}"))?);
    payload.push_str(&tlv::field("58", &config.country_code)?);
    payload.push_str(&tlv::field("59", &config.merchant_name)?);
    payload.push_str(&tlv::field("60", &config.merchant_city)?);
    payload.push_str(&additional_data);
    payload.push_str(CRC_PREFIX);

    let trailer = crc::checksum(&payload);
    payload.push_str(&trailer);
    Ok(payload)
}

/// Check the trailing checksum of an encoded payload.
///
/// True when the final four characters equal the CRC-16/CCITT-FALSE of
/// everything before them, and the checksum field's own tag and length
/// prefix sit directly in front of them.
pub fn verify_payload(payload: &str) -> bool {
    if payload.len() < CRC_PREFIX.len() + 4 || !payload.is_ascii() {
        return false;
    }
    let (body, trailer) = payload.split_at(payload.len() - 4);
    body.ends_with(CRC_PREFIX) && crc::checksum(body) == trailer
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MerchantConfig {
        MerchantConfig::default()
    }

    #[test]
    fn test_known_payload_vector() {
        // Computed independently from the reference field layout.
        let payload = encode_payment(&config(), "NEX-ABCDEF", 80000.0).unwrap();
        assert_eq!(
            payload,
            "00020101021229350016A000000677010111011109650000172520448145303104540880000.00\
             5802MM5912eSIM Myanmar6006Yangon62140110NEX-ABCDEF63044690"
        );
    }

    #[test]
    fn test_deterministic() {
        let a = encode_payment(&config(), "NEX-XY12AB", 35000.0).unwrap();
        let b = encode_payment(&config(), "NEX-XY12AB", 35000.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_amount_formatting() {
        let payload = encode_payment(&config(), "NEX-ABCDEF", 80000.0).unwrap();
        assert!(payload.contains("540880000.00"));

        let payload = encode_payment(&config(), "NEX-ABCDEF", 99.5).unwrap();
        assert!(payload.contains("540599.50"));
    }

    #[test]
    fn test_zero_amount_encodes() {
        let payload = encode_payment(&config(), "NEX-ABCDEF", 0.0).unwrap();
        assert!(payload.contains("54040.00"));
    }

    #[test]
    fn test_rejects_negative_amount() {
        assert_eq!(
            encode_payment(&config(), "NEX-ABCDEF", -1.0),
            Err(MmqrError::InvalidAmount(-1.0))
        );
    }

    #[test]
    fn test_rejects_non_finite_amount() {
        assert!(matches!(
            encode_payment(&config(), "NEX-ABCDEF", f64::NAN),
            Err(MmqrError::InvalidAmount(_))
        ));
        assert!(matches!(
            encode_payment(&config(), "NEX-ABCDEF", f64::INFINITY),
            Err(MmqrError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_order_id() {
        let order_id = "X".repeat(100);
        assert!(matches!(
            encode_payment(&config(), &order_id, 1000.0),
            Err(MmqrError::FieldOverflow { .. })
        ));
    }

    #[test]
    fn test_rejects_order_id_overflowing_outer_field() {
        // 96 characters fit in sub-field 01 but push the wrapped tag-62
        // value to 100.
        let order_id = "X".repeat(96);
        assert!(matches!(
            encode_payment(&config(), &order_id, 1000.0),
            Err(MmqrError::FieldOverflow { .. })
        ));
    }

    #[test]
    fn test_rejects_non_ascii_order_id() {
        assert!(matches!(
            encode_payment(&config(), "NEX-မြန်မာ", 1000.0),
            Err(MmqrError::NonAscii { .. })
        ));
    }

    #[test]
    fn test_rejects_oversized_merchant_name() {
        let mut cfg = config();
        cfg.merchant_name = "N".repeat(100);
        assert!(matches!(
            encode_payment(&cfg, "NEX-ABCDEF", 1000.0),
            Err(MmqrError::FieldOverflow { .. })
        ));
    }

    #[test]
    fn test_verify_accepts_encoded_payload() {
        let payload = encode_payment(&config(), "NEX-ABCDEF", 120000.0).unwrap();
        assert!(verify_payload(&payload));
    }

    #[test]
    fn test_verify_rejects_tampered_amount() {
        let payload = encode_payment(&config(), "NEX-ABCDEF", 80000.0).unwrap();
        let tampered = payload.replace("80000.00", "80000.01");
        assert!(!verify_payload(&tampered));
    }

    #[test]
    fn test_verify_rejects_truncated_payload() {
        assert!(!verify_payload("6304"));
        assert!(!verify_payload(""));
    }
}
