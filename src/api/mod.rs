//! WeChat API modules
//!
//! - [`pay`] - WeChat Pay v2 order query and close, with request signing
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wechat_pay_sdk::api::pay::{PayApi, CloseOrderParams};
//! ```

pub mod pay;
pub mod context;

pub use pay::{
    CloseOrderParams, CloseOrderResponse, CommonRequest, CommonResponse, PayApi, PayRequest,
    PayResponse, QueryOrderParams, QueryOrderResponse, SignType,
};
pub use context::WechatContext;
