use super::{ApiKey, AppId, MchId};

/// Merchant account used to sign every payment request.
///
/// Shared read-only between concurrent calls. `sub_appid` / `sub_mch_id`
/// are service-provider defaults and may be overridden per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub(crate) appid: AppId,
    pub(crate) mch_id: MchId,
    pub(crate) api_key: ApiKey,
    pub(crate) sub_appid: Option<String>,
    pub(crate) sub_mch_id: Option<String>,
}

impl Credentials {
    pub fn new(appid: AppId, mch_id: MchId, api_key: ApiKey) -> Self {
        Self {
            appid,
            mch_id,
            api_key,
            sub_appid: None,
            sub_mch_id: None,
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

    pub fn appid(&self) -> &str {
        self.appid.as_str()
    }

    pub fn mch_id(&self) -> &str {
        self.mch_id.as_str()
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn sub_appid(&self) -> Option<&str> {
        self.sub_appid.as_deref()
    }

    pub fn sub_mch_id(&self) -> Option<&str> {
        self.sub_mch_id.as_deref()
    }
}
