//! HMAC verification for OAuth callbacks.
//!
//! Shopify signs the callback query string with the app's shared secret.
//! The signed message is built from every query parameter except `hmac` and
//! `signature`: keys and values are escaped, pairs are sorted by key, and
//! joined as `key=value` with `&`.
//!
//! All digest comparisons are constant-time.
//!
//! # Example
//!
//! ```rust
//! use shopify_client::auth::oauth::hmac::{compute_signature, signable_message};
//!
//! let params = vec![
//!     ("timestamp".to_string(), "1337178173".to_string()),
//!     ("code".to_string(), "abc".to_string()),
//!     ("hmac".to_string(), "ignored".to_string()),
//! ];
//! assert_eq!(signable_message(&params), "code=abc&timestamp=1337178173");
//!
//! let signature = compute_signature(&signable_message(&params), "secret");
//! assert_eq!(signature.len(), 64);
//! ```

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Query parameters that never take part in the signed message.
const UNSIGNED_PARAMS: &[&str] = &["hmac", "signature"];

/// Computes an HMAC-SHA256 signature for the given message.
///
/// The signature is returned as a lowercase hexadecimal string.
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature(message: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Performs constant-time comparison of two strings.
#[must_use]
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

fn escape_key(key: &str) -> String {
    key.replace('%', "%25").replace('&', "%26").replace('=', "%3D")
}

fn escape_value(value: &str) -> String {
    value.replace('%', "%25").replace('&', "%26")
}

/// Builds the message Shopify signs from decoded callback parameters.
///
/// `hmac` and `signature` are excluded. Keys are escaped for `%`, `&` and
/// `=`; values for `%` and `&`. Pairs are sorted by escaped key.
#[must_use]
pub fn signable_message(params: &[(String, String)]) -> String {
    let mut pairs: Vec<(String, String)> = params
        .iter()
        .filter(|(key, _)| !UNSIGNED_PARAMS.contains(&key.as_str()))
        .map(|(key, value)| (escape_key(key), escape_value(value)))
        .collect();

    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Returns `true` if the `hmac` parameter matches the signature of the
/// remaining parameters under `secret`.
///
/// A missing `hmac` parameter never verifies.
#[must_use]
pub fn verify_callback(params: &[(String, String)], secret: &str) -> bool {
    let Some(received) = params
        .iter()
        .find(|(key, _)| key == "hmac")
        .map(|(_, value)| value.as_str())
    else {
        return false;
    };

    let computed = compute_signature(&signable_message(params), secret);
    constant_time_compare(&computed, &received.to_ascii_lowercase())
}

mod hex {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        let bytes = bytes.as_ref();
        let mut result = String::with_capacity(bytes.len() * 2);
        for &byte in bytes {
            result.push(HEX_CHARS[(byte >> 4) as usize] as char);
            result.push(HEX_CHARS[(byte & 0x0f) as usize] as char);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "hush";
    const REFERENCE_DIGEST: &str =
        "16b4e1966e7bc00e322dc79ef6afe16f79caa8f7c163533513e1141a64ae5442";

    fn callback_params() -> Vec<(String, String)> {
        vec![
            ("shop".to_string(), "some-shop.myshopify.com".to_string()),
            ("code".to_string(), "0907a61c0c8d55e99db179b68161bc00".to_string()),
            ("timestamp".to_string(), "1337178173".to_string()),
            ("state".to_string(), "abc123".to_string()),
            ("signature".to_string(), "legacy".to_string()),
        ]
    }

    #[test]
    fn test_compute_signature_matches_known_value() {
        // HMAC-SHA256("message", "key")
        let sig = compute_signature("message", "key");
        assert_eq!(
            sig,
            "6e9ef29b75fffc5b7abae527d58fdadb2fe42e7219011976917343065f58ed4a"
        );
    }

    #[test]
    fn test_signable_message_sorts_and_excludes_signature_fields() {
        let message = signable_message(&callback_params());
        assert_eq!(
            message,
            "code=0907a61c0c8d55e99db179b68161bc00&shop=some-shop.myshopify.com&state=abc123&timestamp=1337178173"
        );
    }

    #[test]
    fn test_callback_digest_matches_reference() {
        let digest = compute_signature(&signable_message(&callback_params()), SECRET);
        assert_eq!(digest, REFERENCE_DIGEST);
    }

    #[test]
    fn test_flipping_any_value_changes_digest() {
        let params = callback_params();
        for i in 0..params.len() {
            if params[i].0 == "signature" {
                continue;
            }
            let mut flipped = params.clone();
            flipped[i].1.push('x');
            let digest = compute_signature(&signable_message(&flipped), SECRET);
            assert_ne!(digest, REFERENCE_DIGEST, "param {} did not affect digest", params[i].0);
        }
    }

    #[test]
    fn test_escaping_of_reserved_characters() {
        let params = vec![
            ("a=b".to_string(), "1&2".to_string()),
            ("pct".to_string(), "50%".to_string()),
        ];
        assert_eq!(signable_message(&params), "a%3Db=1%262&pct=50%25");
    }

    #[test]
    fn test_verify_callback_accepts_valid_and_rejects_tampered() {
        let mut params = callback_params();
        params.push(("hmac".to_string(), REFERENCE_DIGEST.to_string()));
        assert!(verify_callback(&params, SECRET));
        assert!(!verify_callback(&params, "wrong-secret"));

        params[0].1 = "other-shop.myshopify.com".to_string();
        assert!(!verify_callback(&params, SECRET));
    }

    #[test]
    fn test_verify_callback_requires_hmac_param() {
        assert!(!verify_callback(&callback_params(), SECRET));
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("abc123", "abc123"));
        assert!(!constant_time_compare("abc123", "abc124"));
        assert!(!constant_time_compare("abc", "abcd"));
    }
}
