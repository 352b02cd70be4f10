//! Tests for the proxy connectivity self-check

use torfetch::config::Config;
use torfetch::fetch;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn direct_client() -> reqwest::Client {
    let mut config = Config::default();
    config.transport.use_proxy = false;
    fetch::build_http_client(&config).expect("failed to build client")
}

#[tokio::test]
async fn test_selfcheck_confirms_proxy() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/ip"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"IsTor":true,"IP":"185.220.101.4"}"#)
                .insert_header("content-type", "application/json"),
        )
        .mount(&server)
        .await;

    let client = direct_client();
    let confirmed = fetch::verify_proxy(&client, &format!("{}/api/ip", server.uri())).await;
    assert!(confirmed);
}

#[tokio::test]
async fn test_selfcheck_detects_direct_traffic() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/ip"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"IsTor":false,"IP":"203.0.113.9"}"#)
                .insert_header("content-type", "application/json"),
        )
        .mount(&server)
        .await;

    let client = direct_client();
    let confirmed = fetch::verify_proxy(&client, &format!("{}/api/ip", server.uri())).await;
    assert!(!confirmed);
}

#[tokio::test]
async fn test_selfcheck_survives_malformed_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/ip"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let client = direct_client();
    let confirmed = fetch::verify_proxy(&client, &format!("{}/api/ip", server.uri())).await;
    assert!(!confirmed);
}

#[tokio::test]
async fn test_selfcheck_survives_unreachable_endpoint() {
    let server = MockServer::start().await;
    let dead_uri = server.uri();
    drop(server);

    let client = direct_client();
    let confirmed = fetch::verify_proxy(&client, &format!("{}/api/ip", dead_uri)).await;
    assert!(!confirmed);
}
