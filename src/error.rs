use thiserror::Error;

/// WeChat Pay SDK error types
#[derive(Error)]
pub enum WechatError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("XML serialization error: {0}")]
    Xml(#[from] serde_xml_rs::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The gateway answered but the exchange itself failed: the body did not
    /// parse, or `return_code` was not `SUCCESS`.
    #[error(
        "WeChat Pay transport failure: {reason} [raw: {raw}] [params: {}] [sign: {sign}]",
        redact_key(.params)
    )]
    Transport {
        reason: String,
        raw: String,
        params: String,
        sign: String,
    },

    /// `return_code` was `SUCCESS` but `result_code` was not.
    #[error("WeChat Pay business error (err_code={code}): {description}")]
    Business { code: String, description: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl WechatError {
    /// Vendor `err_code` of a business failure.
    pub fn business_code(&self) -> Option<&str> {
        match self {
            WechatError::Business { code, .. } => Some(code),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, WechatError::Transport { .. })
    }
}

impl std::fmt::Debug for WechatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WechatError::Http(e) => f.debug_tuple("Http").field(e).finish(),
            WechatError::Xml(e) => f.debug_tuple("Xml").field(e).finish(),
            WechatError::Json(e) => f.debug_tuple("Json").field(e).finish(),
            WechatError::Transport {
                reason,
                raw,
                params,
                sign,
            } => f
                .debug_struct("Transport")
                .field("reason", reason)
                .field("raw", raw)
                .field("params", &redact_key(params))
                .field("sign", sign)
                .finish(),
            WechatError::Business { code, description } => f
                .debug_struct("Business")
                .field("code", code)
                .field("description", description)
                .finish(),
            WechatError::Config(msg) => f.debug_tuple("Config").field(msg).finish(),
        }
    }
}

/// Masks the secret suffix of a canonical parameter string.
pub(crate) fn redact_key(params: &str) -> String {
    match params.rfind("&key=") {
        Some(idx) => format!("{}&key=[REDACTED]", &params[..idx]),
        None => params.to_string(),
    }
}
