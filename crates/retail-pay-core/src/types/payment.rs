//! Payment parameters handed to the mobile client's payment API.

use serde::{Deserialize, Serialize};

/// Payment mode tag consumed by the mobile runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMode {
    /// Single-merchant goods payment.
    #[serde(rename = "retail_pay_goods")]
    Goods,
    /// Combined payment across several merchants.
    #[serde(rename = "retail_pay_combined_goods")]
    CombinedGoods,
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Goods => "retail_pay_goods",
            PaymentMode::CombinedGoods => "retail_pay_combined_goods",
        }
    }
}

impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four fields passed to `wx.requestCommonPayment`.
///
/// Field names are fixed by the mobile runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonPaymentParams {
    /// Serialized order JSON, exactly the bytes that were signed.
    pub sign_data: String,
    pub mode: PaymentMode,
    /// Hex pay signature, or a JSON array of [`MerchantPaySig`] in combined mode.
    pub pay_sig: String,
    /// Hex user signature over `sign_data`.
    pub signature: String,
}

/// Pay signature entry for one merchant in a combined payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantPaySig {
    pub mchid: String,
    pub paysig: String,
}
