//! Middleware components for WeChat Pay SDK.
//!
//! Middleware wraps the HTTP transport using Tower patterns and is
//! installed with [`WechatPayBuilder::with_middleware`](crate::WechatPayBuilder::with_middleware).
//! Compose several layers with `ServiceBuilder`.
//!
//! ## Middleware Types
//!
//! - [`LoggingMiddleware`] - Logs request/response information
//!
//! ## Usage
//!
//! ```ignore
//! use wechat_pay_sdk::middleware::LoggingMiddleware;
//!
//! let pay = WechatPay::builder()
//!     .appid(appid)
//!     .mch_id(mch_id)
//!     .api_key(api_key)
//!     .with_middleware(LoggingMiddleware::new())
//!     .build()?;
//! ```

// Re-export tower types for convenience
pub use tower::{Layer, Service, ServiceBuilder};

mod logging;

pub use logging::{LoggingMiddleware, LoggingMiddlewareService};
