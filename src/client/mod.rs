//! WeChat Pay HTTP Client module
//!
//! This module contains the WechatClient transport and the WechatPay facade.

mod wechat_client;
pub use wechat_client::{WechatClient, WechatClientBuilder};

mod wechat_pay;
pub use wechat_pay::WechatPay;

mod builder;
pub use builder::WechatPayBuilder;
