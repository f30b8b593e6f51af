//! Shared context for the API modules

use std::sync::Arc;

use crate::client::WechatClient;
use crate::types::Credentials;

/// Context holding shared resources for WeChat API implementations.
///
/// Contains the HTTP transport and the merchant credentials every signed
/// request needs. Both are read-only once built.
#[derive(Clone)]
pub struct WechatContext {
    /// The HTTP transport for gateway requests
    pub(crate) client: Arc<WechatClient>,
    /// The merchant account used for signing
    pub(crate) credentials: Arc<Credentials>,
}

impl std::fmt::Debug for WechatContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WechatContext")
            .field("client", &"WechatClient { .. }")
            .field("appid", &self.credentials.appid())
            .field("mch_id", &self.credentials.mch_id())
            .finish()
    }
}

impl WechatContext {
    /// Create a new WechatContext
    pub fn new(client: Arc<WechatClient>, credentials: Arc<Credentials>) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// Get a reference to the HTTP transport.
    pub fn client(&self) -> &WechatClient {
        &self.client
    }

    /// Get a reference to the merchant credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}
