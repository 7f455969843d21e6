//! Request authentication for the payment-confirmation callback.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Compute HMAC-SHA256 over the given body bytes using the shared secret.
/// Returns the hex-encoded MAC.
pub fn sign(secret: &[u8], body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(body);
    let result = mac.finalize();
    hex::encode(result.into_bytes())
}

/// Verify an HMAC-SHA256 signature against the expected body.
/// Returns `true` if the signature is valid.
///
/// Uses constant-time comparison to prevent timing attacks.
/// Invalid hex signatures are handled without timing side-channels.
pub fn verify(secret: &[u8], body: &[u8], signature: &str) -> bool {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(body);

    // Decode hex first - if invalid, compare against zeros to maintain constant-time
    let expected = hex::decode(signature).unwrap_or_else(|_| vec![0u8; 32]);

    // hmac crate's verify_slice uses constant-time comparison
    mac.verify_slice(&expected).is_ok()
}

/// Constant-time byte comparison for bearer tokens.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().fold(String::new(), |mut s, b| {
            use std::fmt::Write;
            let _ = write!(s, "{b:02x}");
            s
        })
    }

    pub fn decode(s: &str) -> Result<Vec<u8>, ()> {
        if s.len() % 2 != 0 || !s.is_ascii() {
            return Err(());
        }
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).map_err(|_| ()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_verify_roundtrip() {
        let secret = b"test-secret";
        let body = b"{\"orderId\":\"NEX-ABCDEF\"}";
        let sig = sign(secret, body);
        assert!(verify(secret, body, &sig));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let body = b"callback body";
        let sig = sign(b"secret-1", body);
        assert!(!verify(b"secret-2", body, &sig));
    }

    #[test]
    fn test_tampered_body_rejected() {
        let secret = b"test-secret";
        let sig = sign(secret, b"original");
        assert!(!verify(secret, b"tampered", &sig));
    }

    #[test]
    fn test_invalid_hex_rejected() {
        assert!(!verify(b"secret", b"body", "not-hex-zz"));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"token", b"token"));
        assert!(!constant_time_eq(b"token", b"other"));
        assert!(!constant_time_eq(b"token", b"toke"));
    }
}
