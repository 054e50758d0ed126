//! Payment parameter building for `wx.requestCommonPayment`.
//!
//! Turns an order into the `signData` / `mode` / `paySig` / `signature`
//! quadruple the mobile client passes to the platform. Each call validates
//! its inputs, serializes the order once, and signs that exact text; either a
//! complete parameter set comes back or an error does.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::api::ApiClient;
use crate::signing::{self, AppSecret, SessionKey, REQUEST_COMMON_PAYMENT_URI};
use crate::types::{CombinedPaymentRequest, CommonPaymentParams, MerchantPaySig, PaymentMode};
use crate::{Error, Result};

/// Where the builder gets its application secret.
#[derive(Debug, Clone)]
enum SecretSource {
    /// Read the client's current credential snapshot on every call.
    Client(Arc<ApiClient>),
    Fixed(AppSecret),
}

/// Builds signed payment parameters.
#[derive(Debug, Clone)]
pub struct PaymentBuilder {
    source: SecretSource,
}

impl PaymentBuilder {
    /// Sign with the application secret of `client`, following its rotations.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            source: SecretSource::Client(client),
        }
    }

    /// Sign with a fixed application secret, without an API client.
    ///
    /// An empty secret is reported when parameters are built.
    pub fn standalone(app_secret: impl Into<AppSecret>) -> Self {
        Self {
            source: SecretSource::Fixed(app_secret.into()),
        }
    }

    fn app_secret(&self) -> AppSecret {
        match &self.source {
            SecretSource::Client(client) => client.app_secret(),
            SecretSource::Fixed(secret) => secret.clone(),
        }
    }

    /// Validate the signing keys shared by both payment shapes.
    #[allow(clippy::result_large_err)]
    fn signing_keys(&self, session_key: &str) -> Result<(AppSecret, SessionKey)> {
        let app_secret = self.app_secret();
        if app_secret.is_empty() {
            return Err(Error::config("app secret is empty"));
        }
        if session_key.is_empty() {
            return Err(Error::validation("session_key", "session key is empty"));
        }
        Ok((app_secret, SessionKey::new(session_key)))
    }

    /// Build parameters for a single-merchant order.
    ///
    /// `order` is serialized verbatim; `signData` is that text, `paySig` signs
    /// it under the application secret and `signature` under `session_key`.
    #[allow(clippy::result_large_err)]
    pub fn build_payment_params<T>(
        &self,
        order: &T,
        session_key: &str,
    ) -> Result<CommonPaymentParams>
    where
        T: Serialize + ?Sized,
    {
        let (app_secret, session_key) = self.signing_keys(session_key)?;

        let body = serde_json::to_string(order)?;
        let pay_sig =
            signing::pay_signature(REQUEST_COMMON_PAYMENT_URI, body.as_bytes(), &app_secret)?;
        let signature = signing::user_signature(body.as_bytes(), &session_key)?;

        debug!(mode = %PaymentMode::Goods, body_len = body.len(), "Built payment params");

        Ok(CommonPaymentParams {
            sign_data: body,
            mode: PaymentMode::Goods,
            pay_sig,
            signature,
        })
    }

    /// Build parameters for a combined payment across several merchants.
    ///
    /// `paySig` is a JSON array with one `{mchid, paysig}` entry per
    /// sub-order, in list order. Every entry signs the same message, the URI
    /// token plus the whole serialized request, so all `paysig` values are
    /// equal. The platform may intend a per-merchant message here; the shared
    /// message is kept until a per-merchant scheme is confirmed.
    #[allow(clippy::result_large_err)]
    pub fn build_combined_payment_params(
        &self,
        request: &CombinedPaymentRequest,
        session_key: &str,
    ) -> Result<CommonPaymentParams> {
        let (app_secret, session_key) = self.signing_keys(session_key)?;
        if request.combined_order_list.is_empty() {
            return Err(Error::validation(
                "combined_order_list",
                "combined_order_list is required",
            ));
        }

        // Extra keys shadowing typed fields would serialize twice and let the
        // platform read a different merchant id than the one in paySig
        if let Some(key) = request.reserved_extra_key() {
            return Err(Error::validation(
                "combined_order_list",
                format!("extra field `{}` duplicates a typed field", key),
            ));
        }
        if let Some((index, key)) = request
            .combined_order_list
            .iter()
            .enumerate()
            .find_map(|(i, o)| o.reserved_extra_key().map(|k| (i, k)))
        {
            return Err(Error::validation(
                "combined_order_list",
                format!("sub-order {} extra field `{}` duplicates a typed field", index, key),
            ));
        }

        let body = serde_json::to_string(request)?;

        let items = request
            .merchant_ids()
            .map(|mchid| {
                let paysig = signing::pay_signature(
                    REQUEST_COMMON_PAYMENT_URI,
                    body.as_bytes(),
                    &app_secret,
                )?;
                Ok(MerchantPaySig {
                    mchid: mchid.to_string(),
                    paysig,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let pay_sig = serde_json::to_string(&items)?;

        let signature = signing::user_signature(body.as_bytes(), &session_key)?;

        debug!(
            mode = %PaymentMode::CombinedGoods,
            sub_orders = items.len(),
            body_len = body.len(),
            "Built combined payment params"
        );

        Ok(CommonPaymentParams {
            sign_data: body,
            mode: PaymentMode::CombinedGoods,
            pay_sig,
            signature,
        })
    }
}
