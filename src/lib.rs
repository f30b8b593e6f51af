//! WeChat Pay SDK for Rust
//!
//! A client for the WeChat Pay v2 merchant API. Requests are signed with
//! the merchant API key, sent as XML, and answers are checked at both the
//! transport (`return_code`) and business (`result_code`) level.
//!
//! ## API Coverage
//!
//! | Operation | Endpoint |
//! |-----------|----------|
//! | Query order | `/pay/orderquery` |
//! | Close order | `/pay/closeorder` |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wechat_pay_sdk::{WechatPay, api::pay::CloseOrderParams};
//! use wechat_pay_sdk::types::{ApiKey, AppId, MchId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pay = WechatPay::builder()
//!         .appid(AppId::new("wx1234567890abcdef")?)
//!         .mch_id(MchId::new("1900000109")?)
//!         .api_key(ApiKey::new("your_api_key")?)
//!         .build()?;
//!
//!     pay.close_order(&CloseOrderParams::new("T001")).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`api`] - WeChat Pay operations and request signing
//! - [`client`] - HTTP transport and the [`WechatPay`] facade
//! - [`error`] - Error types
//! - [`message`] - Push-event payloads
//! - [`middleware`] - Tower layers for the transport
//! - [`types`] - Account identifiers and credentials
//!
//! ## Error Handling
//!
//! ```rust,ignore
//! use wechat_pay_sdk::WechatError;
//!
//! match result {
//!     Ok(order) => { /* both codes were SUCCESS */ }
//!     Err(WechatError::Business { code, description }) => {
//!         eprintln!("rejected: {} - {}", code, description);
//!     }
//!     Err(WechatError::Transport { reason, .. }) => {
//!         eprintln!("gateway failure: {}", reason);
//!     }
//!     Err(e) => {
//!         eprintln!("Other error: {}", e);
//!     }
//! }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod message;
pub mod middleware;
pub mod types;
mod utils;

pub use client::{WechatClient, WechatClientBuilder, WechatPay, WechatPayBuilder};
pub use error::WechatError;
