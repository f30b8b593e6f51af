//! Envelopes shared by every WeChat Pay v2 operation
//!
//! Requests are a [`CommonRequest`] composed with operation fields
//! ([`SignedRequest`]); responses are a [`CommonResponse`] composed with an
//! operation body ([`PayResponse`]).

use serde::de::DeserializeOwned;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::sign::{ParamSet, SignType};
use crate::error::{redact_key, WechatError};

/// Literal value of a successful `return_code` / `result_code`.
pub const SUCCESS: &str = "SUCCESS";

/// Fields every payment request starts with.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonRequest {
    pub appid: String,
    pub mch_id: String,
    pub sub_appid: String,
    pub sub_mch_id: String,
    pub nonce_str: String,
    pub sign: String,
    pub sign_type: SignType,
}

impl CommonRequest {
    fn fields(&self) -> [(&'static str, &str); 7] {
        [
            ("appid", self.appid.as_str()),
            ("mch_id", self.mch_id.as_str()),
            ("sub_appid", self.sub_appid.as_str()),
            ("sub_mch_id", self.sub_mch_id.as_str()),
            ("nonce_str", self.nonce_str.as_str()),
            ("sign", self.sign.as_str()),
            ("sign_type", self.sign_type.as_str()),
        ]
    }
}

/// A payment operation: where it is posted, what it answers, and the
/// fields it adds to the common envelope.
pub trait PayRequest {
    /// Gateway path, e.g. `/pay/orderquery`.
    const ENDPOINT: &'static str;

    /// Operation-specific part of the response.
    type Response: DeserializeOwned;

    /// Per-request override of the credentials' `sub_appid`.
    fn sub_appid(&self) -> Option<&str> {
        None
    }

    /// Per-request override of the credentials' `sub_mch_id`.
    fn sub_mch_id(&self) -> Option<&str> {
        None
    }

    fn sign_type(&self) -> SignType {
        SignType::Md5
    }

    /// Operation fields in wire order. Empty values are neither signed nor
    /// sent.
    fn fields(&self) -> Vec<(&'static str, String)>;
}

/// Fully signed request, ready to be serialized as the `<xml>` body.
#[derive(Clone)]
pub struct SignedRequest<R> {
    pub common: CommonRequest,
    pub body: R,
    pub(crate) params: ParamSet,
    pub(crate) canonical: String,
}

impl<R: std::fmt::Debug> std::fmt::Debug for SignedRequest<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedRequest")
            .field("common", &self.common)
            .field("body", &self.body)
            .field("params", &self.params)
            .field("canonical", &redact_key(&self.canonical))
            .finish()
    }
}

impl<R> SignedRequest<R> {
    /// Every parameter that went into the signature.
    pub fn params(&self) -> &ParamSet {
        &self.params
    }

    /// The string that was digested. Contains the API key.
    pub fn canonical_string(&self) -> &str {
        &self.canonical
    }
}

impl<R: PayRequest> SignedRequest<R> {
    pub fn to_xml(&self) -> Result<String, WechatError> {
        Ok(serde_xml_rs::to_string(self)?)
    }
}

impl<R: PayRequest> Serialize for SignedRequest<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let body = self.body.fields();
        let mut state = serializer.serialize_struct("xml", 7 + body.len())?;
        for (name, value) in self.common.fields() {
            if !value.is_empty() {
                state.serialize_field(name, value)?;
            }
        }
        for (name, value) in body {
            if !value.is_empty() {
                state.serialize_field(name, &value)?;
            }
        }
        state.end()
    }
}

/// Fields every payment response starts with.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CommonResponse {
    pub return_code: String,
    pub return_msg: String,
    pub appid: String,
    pub mch_id: String,
    pub sub_appid: String,
    pub sub_mch_id: String,
    pub nonce_str: String,
    pub sign: String,
    pub result_code: String,
    pub err_code: String,
    pub err_code_des: String,
}

impl CommonResponse {
    pub fn is_return_success(&self) -> bool {
        self.return_code == SUCCESS
    }

    pub fn is_result_success(&self) -> bool {
        self.result_code == SUCCESS
    }
}

/// A verified response: both status codes were `SUCCESS`.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct PayResponse<T> {
    pub common: CommonResponse,
    pub data: T,
}

impl<T> std::ops::Deref for PayResponse<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

/// Numeric element that may be empty (`<cash_fee></cash_fee>`); empty reads as zero.
pub(crate) fn de_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr + Default,
    T::Err: std::fmt::Display,
{
    Ok(de_opt_number(deserializer)?.unwrap_or_default())
}

/// Optional numeric element; empty reads as `None`. Absent fields fall back
/// to the container default.
pub(crate) fn de_opt_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    use serde::de::Error;
    let text = String::deserialize(deserializer)?;
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse().map(Some).map_err(Error::custom)
}

/// Parse a raw gateway answer and apply the two-level status check.
///
/// `params` and `sign` are the canonical string and signature of the request
/// that produced `raw`; they are attached to transport failures.
pub(crate) fn verify_response<T: DeserializeOwned>(
    raw: &str,
    params: &str,
    sign: &str,
) -> Result<PayResponse<T>, WechatError> {
    let transport_failure = |reason: String| WechatError::Transport {
        reason,
        raw: raw.to_string(),
        params: params.to_string(),
        sign: sign.to_string(),
    };

    let common: CommonResponse = serde_xml_rs::from_str(raw)
        .map_err(|e| transport_failure(format!("malformed response: {e}")))?;

    if !common.is_return_success() {
        return Err(transport_failure(format!(
            "return_code={} return_msg={}",
            common.return_code, common.return_msg
        )));
    }

    if !common.is_result_success() {
        return Err(WechatError::Business {
            code: common.err_code,
            description: common.err_code_des,
        });
    }

    let data: T = serde_xml_rs::from_str(raw)
        .map_err(|e| transport_failure(format!("malformed response body: {e}")))?;

    Ok(PayResponse { common, data })
}
