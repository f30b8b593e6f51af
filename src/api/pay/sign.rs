//! Request signing for the WeChat Pay v2 API
//!
//! Every request carries a `sign` field computed over the *canonical string*
//! of its parameters:
//!
//! 1. drop parameters whose value is empty,
//! 2. sort the rest by name (byte-wise ascending),
//! 3. join them as `name=value` with `&`,
//! 4. append `&key=<api key>`.
//!
//! The digest is rendered as uppercase hex. The gateway compares it
//! case-sensitively.
//!
//! ```rust
//! use wechat_pay_sdk::api::pay::sign::{sign, ParamSet, SignType};
//! use wechat_pay_sdk::types::ApiKey;
//!
//! let mut params = ParamSet::new();
//! params.insert("appid", "wx123");
//! params.insert("mch_id", 100);
//! params.insert("nonce_str", "abc");
//! params.insert("out_trade_no", "T001");
//! params.insert("sign_type", "MD5");
//!
//! let key = ApiKey::new("key1").unwrap();
//! let canonical = params.canonical_string(&key);
//! assert_eq!(
//!     canonical,
//!     "appid=wx123&mch_id=100&nonce_str=abc&out_trade_no=T001&sign_type=MD5&key=key1"
//! );
//! assert_eq!(sign(&canonical, SignType::Md5, &key), "7833F566695E1FE1B63B33BF2741B6CF");
//! ```

use std::collections::BTreeMap;

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::types::ApiKey;

type HmacSha256 = Hmac<Sha256>;

/// Digest algorithm named by the `sign_type` request field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignType {
    #[default]
    #[serde(rename = "MD5")]
    Md5,
    #[serde(rename = "HMAC-SHA256")]
    HmacSha256,
}

impl SignType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignType::Md5 => "MD5",
            SignType::HmacSha256 => "HMAC-SHA256",
        }
    }
}

impl std::fmt::Display for SignType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scalar that can appear in a signed parameter set.
///
/// Implemented for strings and integers, not `bool`.
/// `Option::None` inserts nothing.
pub trait ParamValue {
    fn into_param(self) -> Option<String>;
}

impl ParamValue for String {
    fn into_param(self) -> Option<String> {
        Some(self)
    }
}

impl ParamValue for &str {
    fn into_param(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl ParamValue for &String {
    fn into_param(self) -> Option<String> {
        Some(self.clone())
    }
}

impl ParamValue for SignType {
    fn into_param(self) -> Option<String> {
        Some(self.as_str().to_string())
    }
}

impl<T: ParamValue> ParamValue for Option<T> {
    fn into_param(self) -> Option<String> {
        self.and_then(ParamValue::into_param)
    }
}

macro_rules! impl_param_value_for_int {
    ($($ty:ty),*) => {
        $(
            impl ParamValue for $ty {
                fn into_param(self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

impl_param_value_for_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

/// Parameters of one request, keyed by field name.
///
/// Insertion order is irrelevant: entries are kept sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamSet {
    entries: BTreeMap<String, String>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a parameter. Absent optional values are ignored.
    pub fn insert(&mut self, name: impl Into<String>, value: impl ParamValue) {
        if let Some(value) = value.into_param() {
            self.entries.insert(name.into(), value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries.remove(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Non-empty entries in canonical (name) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// The exact input to the signing digest.
    pub fn canonical_string(&self, key: &ApiKey) -> String {
        let mut canonical = String::new();
        for (name, value) in self.iter() {
            if !canonical.is_empty() {
                canonical.push('&');
            }
            canonical.push_str(name);
            canonical.push('=');
            canonical.push_str(value);
        }
        canonical.push_str("&key=");
        canonical.push_str(key.as_str());
        canonical
    }
}

impl<K: Into<String>, V: ParamValue> FromIterator<(K, V)> for ParamSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = ParamSet::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// Digest `canonical` and render it as uppercase hex.
///
/// MD5 yields 32 characters, HMAC-SHA256 (keyed by `key`) yields 64.
pub fn sign(canonical: &str, sign_type: SignType, key: &ApiKey) -> String {
    match sign_type {
        SignType::Md5 => hex::encode_upper(md5::compute(canonical.as_bytes()).0),
        SignType::HmacSha256 => {
            let mut mac = HmacSha256::new_from_slice(key.as_str().as_bytes())
                .expect("HMAC accepts any key length");
            mac.update(canonical.as_bytes());
            hex::encode_upper(mac.finalize().into_bytes())
        }
    }
}

/// Recompute the signature of `params` and compare it with `signature`.
///
/// A `sign` entry in `params` is not part of its own input and is skipped.
pub fn verify_signature(
    params: &ParamSet,
    signature: &str,
    key: &ApiKey,
    sign_type: SignType,
) -> bool {
    let mut unsigned = params.clone();
    unsigned.remove("sign");
    sign(&unsigned.canonical_string(key), sign_type, key) == signature
}
