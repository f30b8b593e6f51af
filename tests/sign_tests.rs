//! Signing contract tests against known digests.

use wechat_pay_sdk::api::pay::{
    build_request, sign, verify_signature, CloseOrderParams, ParamSet, QueryOrderParams, SignType,
};
use wechat_pay_sdk::types::{ApiKey, AppId, Credentials, MchId};

fn fixture_params() -> ParamSet {
    vec![
        ("out_trade_no", "T001"),
        ("sign_type", "MD5"),
        ("appid", "wx123"),
        ("nonce_str", "abc"),
        ("mch_id", "100"),
    ]
    .into_iter()
    .collect()
}

fn credentials() -> Credentials {
    Credentials::new(
        AppId::new("wx1234567890abcdef").unwrap(),
        MchId::new("1900000109").unwrap(),
        ApiKey::new("key1").unwrap(),
    )
}

#[test]
fn test_md5_fixture() {
    let key = ApiKey::new("key1").unwrap();
    let canonical = fixture_params().canonical_string(&key);

    assert_eq!(
        canonical,
        "appid=wx123&mch_id=100&nonce_str=abc&out_trade_no=T001&sign_type=MD5&key=key1"
    );
    assert_eq!(
        sign(&canonical, SignType::Md5, &key),
        "7833F566695E1FE1B63B33BF2741B6CF"
    );
}

#[test]
fn test_hmac_sha256_fixture() {
    let key = ApiKey::new("key1").unwrap();
    let mut params = fixture_params();
    params.insert("sign_type", SignType::HmacSha256);

    let signature = sign(&params.canonical_string(&key), SignType::HmacSha256, &key);
    assert_eq!(
        signature,
        "54D13F92CEDF181B2D27CC86506B1B6190955EAB1390191A1CDE3F3C9377F112"
    );
}

#[test]
fn test_empty_values_do_not_affect_signature() {
    let key = ApiKey::new("key1").unwrap();
    let mut params = fixture_params();
    params.insert("sub_mch_id", "");
    params.insert("attach", None::<String>);

    assert_eq!(
        sign(&params.canonical_string(&key), SignType::Md5, &key),
        "7833F566695E1FE1B63B33BF2741B6CF"
    );
}

#[test]
fn test_verify_ignores_sign_entry() {
    let key = ApiKey::new("key1").unwrap();
    let mut params = fixture_params();
    params.insert("sign", "7833F566695E1FE1B63B33BF2741B6CF");

    assert!(verify_signature(
        &params,
        "7833F566695E1FE1B63B33BF2741B6CF",
        &key,
        SignType::Md5
    ));
    assert!(!verify_signature(
        &params,
        "7833f566695e1fe1b63b33bf2741b6cf",
        &key,
        SignType::Md5
    ));
}

#[test]
fn test_built_request_signature_verifies() {
    let request = build_request(&credentials(), CloseOrderParams::new("T001"));
    let key = ApiKey::new("key1").unwrap();

    assert_eq!(request.common.sign_type, SignType::Md5);
    assert!(verify_signature(
        request.params(),
        &request.common.sign,
        &key,
        SignType::Md5
    ));
}

#[test]
fn test_built_request_xml_matches_signed_params() {
    let request = build_request(
        &credentials(),
        QueryOrderParams::by_transaction_id("4200000001").with_sign_type(SignType::HmacSha256),
    );
    let xml = request.to_xml().unwrap();

    assert!(xml.contains("<transaction_id>4200000001</transaction_id>"));
    assert!(xml.contains("<sign_type>HMAC-SHA256</sign_type>"));
    assert!(xml.contains(&format!("<sign>{}</sign>", request.common.sign)));
    assert!(!xml.contains("out_trade_no"));
    assert!(!xml.contains("<key>"));
    for (name, value) in request.params().iter() {
        assert!(xml.contains(&format!("<{name}>{value}</{name}>")));
    }
}

#[test]
fn test_signed_request_debug_hides_key() {
    let request = build_request(&credentials(), CloseOrderParams::new("T001"));
    assert!(request.canonical_string().ends_with("&key=key1"));

    let debug = format!("{request:?}");
    assert!(debug.contains("&key=[REDACTED]"));
    assert!(!debug.contains("key=key1"));
}
