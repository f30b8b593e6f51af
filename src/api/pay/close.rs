//! Close order (`/pay/closeorder`)

use serde::{Deserialize, Serialize};

use super::common::PayRequest;
use super::sign::SignType;

/// Closes an unpaid order so it can no longer be paid.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloseOrderParams {
    pub out_trade_no: String,
    pub sub_appid: Option<String>,
    pub sub_mch_id: Option<String>,
    pub sign_type: Option<SignType>,
}

impl CloseOrderParams {
    pub fn new(out_trade_no: impl Into<String>) -> Self {
        Self {
            out_trade_no: out_trade_no.into(),
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
}

impl PayRequest for CloseOrderParams {
    const ENDPOINT: &'static str = "/pay/closeorder";
    type Response = CloseOrderResponse;

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
        vec![("out_trade_no", self.out_trade_no.clone())]
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CloseOrderResponse {
    pub result_msg: String,
}
