//! Retail Pay Core Library
//!
//! Signature computation, authenticated API access and payment-parameter
//! building for the mobile-app in-store retail payment flow.
//!
//! ```text
//! order ──► PaymentBuilder ──► serde_json ──► signData
//!                │                              │
//!                │   app secret ──► pay_sig ◄───┤
//!                │   session key ─► signature ◄─┘
//!                ▼
//!        CommonPaymentParams ──► mobile client
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod payment;
pub mod signing;
pub mod types;

pub use api::{ApiClient, Credentials};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use payment::PaymentBuilder;
pub use types::{CombinedPaymentRequest, CommonPaymentParams, MerchantPaySig, PaymentMode, SubOrder};
