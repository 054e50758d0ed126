//! Pay and user signature computation.
//!
//! All functions are pure: the same key and message always yield the same
//! 64-character lowercase hex digest. Empty keys are accepted here; callers
//! that require a key reject empty ones before signing.

use hmac::{Hmac, KeyInit, Mac};
use sha2::Sha256;

use super::keys::{AppSecret, SessionKey};
use crate::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

/// URI token signed into the pay signature of `wx.requestCommonPayment` payloads.
pub const REQUEST_COMMON_PAYMENT_URI: &str = "requestCommonPayment";

/// Compute the pay signature: `hex(HMAC-SHA256(app_secret, uri + "&" + body))`.
#[allow(clippy::result_large_err)]
pub fn pay_signature(uri: &str, body: &[u8], app_secret: &AppSecret) -> Result<String> {
    let mut mac = new_mac(app_secret.as_bytes())?;
    mac.update(uri.as_bytes());
    mac.update(b"&");
    mac.update(body);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Compute the user signature: `hex(HMAC-SHA256(session_key, body))`.
#[allow(clippy::result_large_err)]
pub fn user_signature(body: &[u8], session_key: &SessionKey) -> Result<String> {
    let mut mac = new_mac(session_key.as_bytes())?;
    mac.update(body);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Check a received pay signature in constant time.
///
/// Malformed hex never verifies.
pub fn verify_pay_signature(
    uri: &str,
    body: &[u8],
    app_secret: &AppSecret,
    signature: &str,
) -> bool {
    let Ok(mut mac) = new_mac(app_secret.as_bytes()) else {
        return false;
    };
    mac.update(uri.as_bytes());
    mac.update(b"&");
    mac.update(body);
    verify_hex(mac, signature)
}

/// Check a received user signature in constant time.
pub fn verify_user_signature(body: &[u8], session_key: &SessionKey, signature: &str) -> bool {
    let Ok(mut mac) = new_mac(session_key.as_bytes()) else {
        return false;
    };
    mac.update(body);
    verify_hex(mac, signature)
}

#[allow(clippy::result_large_err)]
fn new_mac(key: &[u8]) -> Result<HmacSha256> {
    HmacSha256::new_from_slice(key).map_err(|e| Error::Signing {
        message: format!("Failed to create HMAC: {}", e),
    })
}

fn verify_hex(mac: HmacSha256, signature: &str) -> bool {
    // Decode failures compare against zeros so timing does not depend on the input shape
    let expected = hex::decode(signature).unwrap_or_else(|_| vec![0u8; 32]);
    mac.verify_slice(&expected).is_ok()
}
