//! WeChat Pay v2 merchant API
//!
//! Each call signs its parameters with the merchant API key (see [`sign`]),
//! posts them as an `<xml>` body, and checks both `return_code` and
//! `result_code` of the answer before handing back a [`PayResponse`].
//!
//! ## Example
//!
//! ```ignore
//! use wechat_pay_sdk::api::pay::{PayApi, QueryOrderParams};
//!
//! let pay_api = PayApi::new(context);
//! let order = pay_api
//!     .query_order(&QueryOrderParams::by_out_trade_no("T001"))
//!     .await?;
//! println!("trade_state: {}", order.trade_state);
//! ```

pub mod close;
pub mod common;
pub mod query;
pub mod sign;

use std::sync::Arc;

use log::{debug, warn};

pub use close::{CloseOrderParams, CloseOrderResponse};
pub use common::{CommonRequest, CommonResponse, PayRequest, PayResponse, SignedRequest, SUCCESS};
pub use query::{Coupon, QueryOrderParams, QueryOrderResponse};
pub use sign::{sign, verify_signature, ParamSet, ParamValue, SignType};

use super::WechatContext;
use crate::error::WechatError;
use crate::types::Credentials;
use crate::utils::{random_nonce, NONCE_LEN};

/// WeChat Pay API
pub struct PayApi {
    context: Arc<WechatContext>,
}

impl PayApi {
    pub fn new(context: Arc<WechatContext>) -> Self {
        Self { context }
    }

    /// Close an unpaid order.
    ///
    /// POST /pay/closeorder
    ///
    /// # Errors
    /// - `WechatError::Http` on network failure
    /// - `WechatError::Transport` when the answer is unparseable or
    ///   `return_code != SUCCESS`
    /// - `WechatError::Business` when `result_code != SUCCESS`
    pub async fn close_order(
        &self,
        params: &CloseOrderParams,
    ) -> Result<PayResponse<CloseOrderResponse>, WechatError> {
        self.execute(params).await
    }

    /// Query an order by `transaction_id` or `out_trade_no`.
    ///
    /// POST /pay/orderquery
    ///
    /// # Errors
    /// As [`close_order`](Self::close_order), plus `WechatError::Config` when
    /// neither identifier is set (nothing is sent in that case).
    pub async fn query_order(
        &self,
        params: &QueryOrderParams,
    ) -> Result<PayResponse<QueryOrderResponse>, WechatError> {
        if !params.has_identifier() {
            return Err(WechatError::Config(
                "query_order requires transaction_id or out_trade_no".to_string(),
            ));
        }
        self.execute(params).await
    }

    /// Sign `request` and post it, returning the verified response.
    ///
    /// Every [`PayRequest`] goes through here.
    pub async fn execute<R>(&self, request: &R) -> Result<PayResponse<R::Response>, WechatError>
    where
        R: PayRequest + Clone,
    {
        let signed = build_request(self.context.credentials(), request.clone());
        let body = signed.to_xml()?;

        debug!(
            "[WechatPay] {} nonce_str={} sign_type={}",
            R::ENDPOINT,
            signed.common.nonce_str,
            signed.common.sign_type
        );

        let raw = self.context.client().post_xml(R::ENDPOINT, body).await?;

        common::verify_response(&raw, &signed.canonical, &signed.common.sign).map_err(|e| {
            warn!("[WechatPay] {} failed: {}", R::ENDPOINT, e);
            e
        })
    }
}

/// Assemble and sign the envelope for one call.
///
/// Draws a fresh nonce; per-request sub ids take precedence over the
/// credentials' defaults.
pub fn build_request<R: PayRequest>(credentials: &Credentials, request: R) -> SignedRequest<R> {
    let sign_type = request.sign_type();
    let nonce_str = random_nonce(NONCE_LEN);
    let sub_appid = request
        .sub_appid()
        .or(credentials.sub_appid())
        .unwrap_or_default()
        .to_string();
    let sub_mch_id = request
        .sub_mch_id()
        .or(credentials.sub_mch_id())
        .unwrap_or_default()
        .to_string();

    let mut params = ParamSet::new();
    params.insert("appid", credentials.appid());
    params.insert("mch_id", credentials.mch_id());
    params.insert("sub_appid", &sub_appid);
    params.insert("sub_mch_id", &sub_mch_id);
    params.insert("nonce_str", &nonce_str);
    params.insert("sign_type", sign_type);
    for (name, value) in request.fields() {
        params.insert(name, value);
    }

    let canonical = params.canonical_string(credentials.api_key());
    let signature = sign(&canonical, sign_type, credentials.api_key());

    SignedRequest {
        common: CommonRequest {
            appid: credentials.appid().to_string(),
            mch_id: credentials.mch_id().to_string(),
            sub_appid,
            sub_mch_id,
            nonce_str,
            sign: signature,
            sign_type,
        },
        body: request,
        params,
        canonical,
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ApiKey, AppId, MchId};
    use crate::WechatClient;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> Credentials {
        Credentials::new(
            AppId::new("wx1234567890abcdef").unwrap(),
            MchId::new("1900000109").unwrap(),
            ApiKey::new("192006250b4c09247ec02edce69f6a2d").unwrap(),
        )
    }

    fn create_test_context(base_url: &str, credentials: Credentials) -> Arc<WechatContext> {
        let client = Arc::new(WechatClient::builder().base_url(base_url).build().unwrap());
        Arc::new(WechatContext::new(client, Arc::new(credentials)))
    }

    #[test]
    fn test_build_request_signs_all_parameters() {
        let credentials = credentials();
        let signed = build_request(&credentials, CloseOrderParams::new("T001"));

        assert_eq!(signed.common.appid, "wx1234567890abcdef");
        assert_eq!(signed.common.mch_id, "1900000109");
        assert_eq!(signed.common.nonce_str.len(), 32);
        assert_eq!(signed.common.sign_type, SignType::Md5);
        assert_eq!(signed.params().get("out_trade_no"), Some("T001"));
        assert_eq!(signed.params().get("sign_type"), Some("MD5"));
        assert_eq!(signed.params().get("sub_appid"), Some(""));
        assert!(!signed.canonical_string().contains("sub_appid"));
        assert!(signed
            .canonical_string()
            .ends_with("&key=192006250b4c09247ec02edce69f6a2d"));
        assert!(verify_signature(
            signed.params(),
            &signed.common.sign,
            credentials.api_key(),
            SignType::Md5
        ));
    }

    #[test]
    fn test_build_request_uses_fresh_nonce() {
        let credentials = credentials();
        let first = build_request(&credentials, CloseOrderParams::new("T001"));
        let second = build_request(&credentials, CloseOrderParams::new("T001"));
        assert_ne!(first.common.nonce_str, second.common.nonce_str);
        assert_ne!(first.common.sign, second.common.sign);
    }

    #[test]
    fn test_build_request_sub_id_precedence() {
        let credentials = credentials()
            .with_sub_appid("wx_default_sub")
            .with_sub_mch_id("1900000110");
        let signed = build_request(
            &credentials,
            QueryOrderParams::by_out_trade_no("T001").with_sub_mch_id("1900000999"),
        );
        assert_eq!(signed.common.sub_appid, "wx_default_sub");
        assert_eq!(signed.common.sub_mch_id, "1900000999");
        assert_eq!(signed.params().get("sub_mch_id"), Some("1900000999"));
    }

    #[test]
    fn test_build_request_hmac_sign_type() {
        let credentials = credentials();
        let signed = build_request(
            &credentials,
            QueryOrderParams::by_transaction_id("4200000001").with_sign_type(SignType::HmacSha256),
        );
        assert_eq!(signed.common.sign.len(), 64);
        assert_eq!(signed.params().get("sign_type"), Some("HMAC-SHA256"));
        assert!(verify_signature(
            signed.params(),
            &signed.common.sign,
            credentials.api_key(),
            SignType::HmacSha256
        ));
    }

    #[test]
    fn test_signed_request_xml_body() {
        let credentials = credentials();
        let signed = build_request(&credentials, CloseOrderParams::new("T001"));
        let xml = signed.to_xml().unwrap();

        assert!(xml.contains("<xml>"));
        assert!(xml.contains("<appid>wx1234567890abcdef</appid>"));
        assert!(xml.contains("<mch_id>1900000109</mch_id>"));
        assert!(xml.contains("<out_trade_no>T001</out_trade_no>"));
        assert!(xml.contains("<sign_type>MD5</sign_type>"));
        assert!(xml.contains(&format!("<sign>{}</sign>", signed.common.sign)));
        assert!(xml.contains(&format!(
            "<nonce_str>{}</nonce_str>",
            signed.common.nonce_str
        )));
        assert!(!xml.contains("sub_appid"));
        assert!(!xml.contains("192006250b4c09247ec02edce69f6a2d"));
    }

    #[tokio::test]
    async fn test_close_order_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/pay/closeorder"))
            .and(body_string_contains("<out_trade_no>T001</out_trade_no>"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<xml>\
                <return_code><![CDATA[SUCCESS]]></return_code>\
                <return_msg><![CDATA[OK]]></return_msg>\
                <appid><![CDATA[wx1234567890abcdef]]></appid>\
                <mch_id><![CDATA[1900000109]]></mch_id>\
                <nonce_str><![CDATA[BFK89FC6rxKCOjLX]]></nonce_str>\
                <sign><![CDATA[72B321D92A7BFA0B2509F3D13C7B1631]]></sign>\
                <result_code><![CDATA[SUCCESS]]></result_code>\
                <result_msg><![CDATA[OK]]></result_msg>\
                </xml>",
            ))
            .mount(&mock_server)
            .await;

        let pay_api = PayApi::new(create_test_context(&mock_server.uri(), credentials()));
        let response = pay_api
            .close_order(&CloseOrderParams::new("T001"))
            .await
            .unwrap();

        assert_eq!(response.common.return_msg, "OK");
        assert_eq!(response.result_msg, "OK");
    }

    #[tokio::test]
    async fn test_query_order_business_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/pay/orderquery"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<xml>\
                <return_code>SUCCESS</return_code>\
                <return_msg>OK</return_msg>\
                <result_code>FAIL</result_code>\
                <err_code>ORDERNOTEXIST</err_code>\
                <err_code_des>order does not exist</err_code_des>\
                </xml>",
            ))
            .mount(&mock_server)
            .await;

        let pay_api = PayApi::new(create_test_context(&mock_server.uri(), credentials()));
        let result = pay_api
            .query_order(&QueryOrderParams::by_out_trade_no("T404"))
            .await;

        match result {
            Err(WechatError::Business { code, description }) => {
                assert_eq!(code, "ORDERNOTEXIST");
                assert_eq!(description, "order does not exist");
            }
            other => panic!("Expected Business error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_query_order_requires_identifier() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let pay_api = PayApi::new(create_test_context(&mock_server.uri(), credentials()));
        let result = pay_api.query_order(&QueryOrderParams::default()).await;

        assert!(matches!(result, Err(WechatError::Config(_))));
    }
}
