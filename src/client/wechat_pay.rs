//! Unified WeChat Pay SDK client

use std::sync::Arc;

use crate::api::pay::{
    CloseOrderParams, CloseOrderResponse, PayApi, PayRequest, PayResponse, QueryOrderParams,
    QueryOrderResponse,
};
use crate::api::WechatContext;
use crate::error::WechatError;
use crate::types::Credentials;

/// Unified WeChat Pay client
///
/// This is the main entry point for the SDK. Cheap to clone and safe to
/// share between tasks: calls are independent and only read the shared
/// credentials.
///
/// # Example
///
/// ```rust,ignore
/// use wechat_pay_sdk::WechatPay;
/// use wechat_pay_sdk::api::pay::QueryOrderParams;
/// use wechat_pay_sdk::types::{ApiKey, AppId, MchId};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pay = WechatPay::builder()
///         .appid(AppId::new("wx1234567890abcdef")?)
///         .mch_id(MchId::new("1900000109")?)
///         .api_key(ApiKey::new("your_api_key")?)
///         .build()?;
///
///     let order = pay.query_order(&QueryOrderParams::by_out_trade_no("T001")).await?;
///     println!("trade_state: {}", order.trade_state);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct WechatPay {
    context: Arc<WechatContext>,
}

impl std::fmt::Debug for WechatPay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WechatPay")
            .field("context", &self.context)
            .finish()
    }
}

impl From<Arc<WechatContext>> for WechatPay {
    fn from(context: Arc<WechatContext>) -> Self {
        Self { context }
    }
}

impl WechatPay {
    pub fn builder() -> super::builder::WechatPayBuilder {
        super::builder::WechatPayBuilder::default()
    }

    pub fn appid(&self) -> &str {
        self.context.credentials().appid()
    }

    pub fn mch_id(&self) -> &str {
        self.context.credentials().mch_id()
    }

    pub fn credentials(&self) -> &Credentials {
        self.context.credentials()
    }

    fn pay_api(&self) -> PayApi {
        PayApi::new(self.context.clone())
    }

    // Pay API

    pub async fn close_order(
        &self,
        params: &CloseOrderParams,
    ) -> Result<PayResponse<CloseOrderResponse>, WechatError> {
        self.pay_api().close_order(params).await
    }

    pub async fn query_order(
        &self,
        params: &QueryOrderParams,
    ) -> Result<PayResponse<QueryOrderResponse>, WechatError> {
        self.pay_api().query_order(params).await
    }

    /// Run any [`PayRequest`] through the signing and verification pipeline.
    pub async fn execute<R>(&self, request: &R) -> Result<PayResponse<R::Response>, WechatError>
    where
        R: PayRequest + Clone,
    {
        self.pay_api().execute(request).await
    }
}
