//! Query order (`/pay/orderquery`)

use serde::{Deserialize, Serialize};

use super::common::{de_number, de_opt_number, PayRequest};
use super::sign::SignType;

/// Looks an order up by WeChat `transaction_id` or merchant `out_trade_no`.
///
/// When both are given the gateway prefers `transaction_id`.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOrderParams {
    pub transaction_id: String,
    pub out_trade_no: String,
    pub sub_appid: Option<String>,
    pub sub_mch_id: Option<String>,
    pub sign_type: Option<SignType>,
}

impl QueryOrderParams {
    pub fn by_out_trade_no(out_trade_no: impl Into<String>) -> Self {
        Self {
            out_trade_no: out_trade_no.into(),
            ..Default::default()
        }
    }

    pub fn by_transaction_id(transaction_id: impl Into<String>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            ..Default::default()
        }
    }

    pub fn with_sub_appid(mut self, sub_appid: impl Into<String>) -> Self {
        self.sub_appid = Some(sub_appid.into());
        self
    }

    pub fn with_sub_mch_id(mut self, sub_mch_id: impl Into<String>) -> Self {
        self.sub_mch_id = Some(sub_mch_id.into());
        self
    }

    pub fn with_sign_type(mut self, sign_type: SignType) -> Self {
        self.sign_type = Some(sign_type);
        self
    }

    pub(crate) fn has_identifier(&self) -> bool {
        !self.transaction_id.is_empty() || !self.out_trade_no.is_empty()
    }
}

impl PayRequest for QueryOrderParams {
    const ENDPOINT: &'static str = "/pay/orderquery";
    type Response = QueryOrderResponse;

    fn sub_appid(&self) -> Option<&str> {
        self.sub_appid.as_deref()
    }

    fn sub_mch_id(&self) -> Option<&str> {
        self.sub_mch_id.as_deref()
    }

    fn sign_type(&self) -> SignType {
        self.sign_type.unwrap_or_default()
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("transaction_id", self.transaction_id.clone()),
            ("out_trade_no", self.out_trade_no.clone()),
        ]
    }
}

/// Order details returned by `/pay/orderquery`.
///
/// Amounts are in fen (1/100 CNY).
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct QueryOrderResponse {
    pub result_msg: String,
    pub openid: String,
    pub sub_openid: String,
    pub is_subscribe: String,
    pub trade_type: String,
    /// SUCCESS, REFUND, NOTPAY, CLOSED, REVOKED, USERPAYING or PAYERROR
    pub trade_state: String,
    pub trade_state_desc: String,
    pub bank_type: String,
    #[serde(deserialize_with = "de_number")]
    pub total_fee: i64,
    #[serde(deserialize_with = "de_opt_number")]
    pub settlement_total_fee: Option<i64>,
    pub fee_type: String,
    #[serde(deserialize_with = "de_number")]
    pub cash_fee: i64,
    pub cash_fee_type: String,
    #[serde(deserialize_with = "de_opt_number")]
    pub coupon_fee: Option<i64>,
    #[serde(deserialize_with = "de_opt_number")]
    pub coupon_count: Option<u32>,
    pub coupon_type_0: Option<String>,
    pub coupon_id_0: Option<String>,
    #[serde(deserialize_with = "de_opt_number")]
    pub coupon_fee_0: Option<i64>,
    pub coupon_type_1: Option<String>,
    pub coupon_id_1: Option<String>,
    #[serde(deserialize_with = "de_opt_number")]
    pub coupon_fee_1: Option<i64>,
    pub coupon_type_2: Option<String>,
    pub coupon_id_2: Option<String>,
    #[serde(deserialize_with = "de_opt_number")]
    pub coupon_fee_2: Option<i64>,
    pub transaction_id: String,
    pub out_trade_no: String,
    pub attach: String,
    /// `yyyyMMddHHmmss`, Beijing time
    pub time_end: String,
}

/// One coupon applied to a paid order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coupon {
    pub coupon_type: Option<String>,
    pub coupon_id: String,
    pub coupon_fee: i64,
}

impl QueryOrderResponse {
    pub fn is_paid(&self) -> bool {
        self.trade_state == "SUCCESS"
    }

    /// Coupons carried in the indexed `coupon_*_$n` fields (up to three).
    pub fn coupons(&self) -> Vec<Coupon> {
        [
            (&self.coupon_type_0, &self.coupon_id_0, self.coupon_fee_0),
            (&self.coupon_type_1, &self.coupon_id_1, self.coupon_fee_1),
            (&self.coupon_type_2, &self.coupon_id_2, self.coupon_fee_2),
        ]
        .into_iter()
        .filter_map(|(coupon_type, coupon_id, coupon_fee)| {
            coupon_id.as_ref().map(|id| Coupon {
                coupon_type: coupon_type.clone(),
                coupon_id: id.clone(),
                coupon_fee: coupon_fee.unwrap_or(0),
            })
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_fields_include_both_identifiers() {
        let params = QueryOrderParams::by_transaction_id("4200000001");
        assert_eq!(
            params.fields(),
            vec![
                ("transaction_id", "4200000001".to_string()),
                ("out_trade_no", String::new()),
            ]
        );
        assert!(params.has_identifier());
    }

    #[test]
    fn test_query_without_identifier() {
        assert!(!QueryOrderParams::default().has_identifier());
    }

    #[test]
    fn test_query_response_deserializes() {
        let raw = "<xml>\
            <return_code>SUCCESS</return_code>\
            <result_code>SUCCESS</result_code>\
            <openid>oUpF8uMuAJO_M2pxb1Q9zNjWeS6o</openid>\
            <trade_type>JSAPI</trade_type>\
            <trade_state>SUCCESS</trade_state>\
            <bank_type>CMC</bank_type>\
            <total_fee>101</total_fee>\
            <cash_fee>91</cash_fee>\
            <coupon_fee>10</coupon_fee>\
            <coupon_count>1</coupon_count>\
            <coupon_type_0>CASH</coupon_type_0>\
            <coupon_id_0>10000</coupon_id_0>\
            <coupon_fee_0>10</coupon_fee_0>\
            <transaction_id>1008450740201411110005820873</transaction_id>\
            <out_trade_no>1415757673</out_trade_no>\
            <time_end>20141111170043</time_end>\
            </xml>";

        let response: QueryOrderResponse = serde_xml_rs::from_str(raw).unwrap();
        assert!(response.is_paid());
        assert_eq!(response.total_fee, 101);
        assert_eq!(response.cash_fee, 91);
        assert_eq!(response.settlement_total_fee, None);
        assert_eq!(
            response.coupons(),
            vec![Coupon {
                coupon_type: Some("CASH".to_string()),
                coupon_id: "10000".to_string(),
                coupon_fee: 10,
            }]
        );
        assert_eq!(response.time_end, "20141111170043");
    }

    #[test]
    fn test_query_response_empty_numeric_elements() {
        let raw = "<xml>\
            <trade_state>NOTPAY</trade_state>\
            <total_fee>1</total_fee>\
            <cash_fee></cash_fee>\
            <settlement_total_fee></settlement_total_fee>\
            <out_trade_no>T001</out_trade_no>\
            </xml>";

        let response: QueryOrderResponse = serde_xml_rs::from_str(raw).unwrap();
        assert_eq!(response.total_fee, 1);
        assert_eq!(response.cash_fee, 0);
        assert_eq!(response.settlement_total_fee, None);
        assert_eq!(response.out_trade_no, "T001");
        assert!(!response.is_paid());
    }

    #[test]
    fn test_query_response_rejects_non_numeric_fee() {
        let raw = "<xml><total_fee>ten</total_fee></xml>";
        assert!(serde_xml_rs::from_str::<QueryOrderResponse>(raw).is_err());
    }
}
