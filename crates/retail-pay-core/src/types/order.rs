//! Order payloads signed into payment parameters.
//!
//! Single orders are opaque to the SDK: any `Serialize` value is accepted and
//! encoded verbatim. Combined orders carry one structural requirement, the
//! per-merchant sub-order list, so they get a typed wrapper. Every other
//! platform field passes through untouched via the flattened `extra` maps.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys a [`SubOrder`]'s `extra` map must not carry; they would duplicate typed fields.
pub const SUB_ORDER_RESERVED_KEYS: &[&str] = &["mchid"];

/// Keys a [`CombinedPaymentRequest`]'s `extra` map must not carry.
pub const COMBINED_REQUEST_RESERVED_KEYS: &[&str] = &["combined_order_list"];

/// One merchant's share of a combined payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubOrder {
    /// Merchant id settling this sub-order.
    pub mchid: String,
    /// Remaining sub-order fields (out_trade_no, amount, description, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SubOrder {
    pub fn new(mchid: impl Into<String>) -> Self {
        Self {
            mchid: mchid.into(),
            extra: Map::new(),
        }
    }

    /// Attach a platform field to the sub-order.
    ///
    /// Reserved keys (`mchid`) are ignored; set the typed field instead.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if !SUB_ORDER_RESERVED_KEYS.contains(&key.as_str()) {
            self.extra.insert(key, value.into());
        }
        self
    }

    /// First reserved key present in `extra`, if any.
    pub fn reserved_extra_key(&self) -> Option<&str> {
        first_reserved(&self.extra, SUB_ORDER_RESERVED_KEYS)
    }
}

/// A payment spanning several merchant sub-orders settled together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedPaymentRequest {
    /// Sub-orders in the order the platform should see them. Must not be empty.
    #[serde(default)]
    pub combined_order_list: Vec<SubOrder>,
    /// Top-level fields besides the sub-order list (env, combined_out_trade_no, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CombinedPaymentRequest {
    pub fn new(combined_order_list: Vec<SubOrder>) -> Self {
        Self {
            combined_order_list,
            extra: Map::new(),
        }
    }

    /// Attach a top-level platform field. `combined_order_list` is ignored.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if !COMBINED_REQUEST_RESERVED_KEYS.contains(&key.as_str()) {
            self.extra.insert(key, value.into());
        }
        self
    }

    /// First reserved key present in `extra`, if any.
    pub fn reserved_extra_key(&self) -> Option<&str> {
        first_reserved(&self.extra, COMBINED_REQUEST_RESERVED_KEYS)
    }

    /// Merchant ids of all sub-orders, in list order.
    pub fn merchant_ids(&self) -> impl Iterator<Item = &str> {
        self.combined_order_list.iter().map(|o| o.mchid.as_str())
    }
}

fn first_reserved<'a>(extra: &'a Map<String, Value>, reserved: &[&str]) -> Option<&'a str> {
    extra
        .keys()
        .map(String::as_str)
        .find(|key| reserved.contains(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sub_order_flattens_extra_fields() {
        let order = SubOrder::new("1900000001")
            .with_field("out_trade_no", "T-1")
            .with_field("amount", json!({"order_amount": 100}));

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["mchid"], "1900000001");
        assert_eq!(value["out_trade_no"], "T-1");
        assert_eq!(value["amount"]["order_amount"], 100);
    }

    #[test]
    fn test_combined_request_parses_platform_json() {
        let raw = json!({
            "env": 0,
            "combined_order_list": [
                {"mchid": "m1", "out_trade_no": "a"},
                {"mchid": "m2", "out_trade_no": "b"}
            ]
        });

        let request: CombinedPaymentRequest = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(request.merchant_ids().collect::<Vec<_>>(), vec!["m1", "m2"]);
        assert_eq!(request.extra["env"], 0);
        assert_eq!(serde_json::to_value(&request).unwrap(), raw);
    }

    #[test]
    fn test_missing_order_list_defaults_to_empty() {
        let request: CombinedPaymentRequest = serde_json::from_value(json!({"env": 1})).unwrap();
        assert!(request.combined_order_list.is_empty());
    }

    #[test]
    fn test_with_field_ignores_reserved_keys() {
        let order = SubOrder::new("m1").with_field("mchid", "other");
        assert_eq!(order.mchid, "m1");
        assert!(order.extra.is_empty());
        assert_eq!(serde_json::to_string(&order).unwrap(), r#"{"mchid":"m1"}"#);

        let request = CombinedPaymentRequest::new(vec![order])
            .with_field("combined_order_list", json!([]));
        assert!(request.extra.is_empty());
        assert_eq!(request.merchant_ids().collect::<Vec<_>>(), vec!["m1"]);
    }

    #[test]
    fn test_reserved_extra_key_detects_direct_edits() {
        let mut order = SubOrder::new("m1").with_field("out_trade_no", "a");
        assert_eq!(order.reserved_extra_key(), None);
        order.extra.insert("mchid".to_string(), json!("other"));
        assert_eq!(order.reserved_extra_key(), Some("mchid"));

        let mut request = CombinedPaymentRequest::new(vec![]).with_field("env", 0);
        assert_eq!(request.reserved_extra_key(), None);
        request
            .extra
            .insert("combined_order_list".to_string(), json!([]));
        assert_eq!(request.reserved_extra_key(), Some("combined_order_list"));
    }
}
