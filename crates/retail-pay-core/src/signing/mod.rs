//! HMAC-SHA256 signatures required by the payment platform.
//!
//! Two signatures travel with every payment request:
//!
//! ```text
//! pay_sig   = hex(HMAC-SHA256(app_secret,  uri + "&" + body))
//! signature = hex(HMAC-SHA256(session_key, body))
//! ```
//!
//! The pay signature proves the request comes from the merchant backend that
//! holds the application secret. The user signature binds the payload to the
//! session of the user who will confirm the payment.
//!
//! # Example
//!
//! ```
//! use retail_pay_core::signing::{pay_signature, user_signature, AppSecret, SessionKey};
//!
//! let body = br#"{"itemId":"A1","amount":100}"#;
//! let pay_sig = pay_signature("requestCommonPayment", body, &AppSecret::new("key123"))?;
//! let signature = user_signature(body, &SessionKey::new("sk_test"))?;
//! assert_eq!(pay_sig.len(), 64);
//! assert_eq!(signature.len(), 64);
//! # Ok::<(), retail_pay_core::Error>(())
//! ```

pub mod keys;
pub mod signer;

pub use keys::{AppSecret, SessionKey};
pub use signer::{
    pay_signature, user_signature, verify_pay_signature, verify_user_signature,
    REQUEST_COMMON_PAYMENT_URI,
};
