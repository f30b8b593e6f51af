//! Push-event payloads
//!
//! WeChat delivers events to the configured callback URL either as XML or,
//! when the message format is set to JSON, as a JSON object with the same
//! field names.

use serde::{Deserialize, Serialize};

use crate::error::WechatError;

/// `wxa_nickname_audit`: result of a mini program nickname review.
///
/// See <https://developers.weixin.qq.com/doc/oplatform/Third-party_Platforms/Mini_Programs/wxa_nickname_audit.html>
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename = "xml")]
pub struct WxaNicknameAuditEvent {
    /// 2 = rejected, 3 = approved
    pub ret: i32,
    pub nick_name: String,
    /// Rejection reason, empty when approved
    pub reason: String,
}

impl WxaNicknameAuditEvent {
    pub const EVENT: &'static str = "wxa_nickname_audit";

    pub fn from_xml(xml: &str) -> Result<Self, WechatError> {
        Ok(serde_xml_rs::from_str(xml)?)
    }

    pub fn from_json(json: &str) -> Result<Self, WechatError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_approved(&self) -> bool {
        self.ret == 3
    }
}
