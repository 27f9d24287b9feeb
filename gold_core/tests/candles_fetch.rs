mod common;

use common::{candles_body, test_config};
use gold_core::candles::handler::{CandleSource, OandaClient};
use gold_core::GoldError;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_sends_mid_price_request_with_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/instruments/XAU_USD/candles"))
        .and(query_param("count", "150"))
        .and(query_param("granularity", "M1"))
        .and(query_param("price", "M"))
        .and(header("Authorization", "Bearer oanda-test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candles_body(&[
            2301.25, 2302.5, 2300.125,
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = OandaClient::new(&test_config(&server.uri())).unwrap();
    let series = client.fetch("XAU_USD", 150, "M1").await.unwrap();

    assert_eq!(series.len(), 3);
    assert_eq!(series.closes(), vec![2301.25, 2302.5, 2300.125]);
    assert_eq!(series.candles()[0].high, 2301.75);
    assert_eq!(series.candles()[0].low, 2300.75);
    assert_eq!(
        series.latest().unwrap().time,
        "2024-05-01T08:02:00.000000000Z"
    );
}

#[tokio::test]
async fn test_fetch_keeps_short_responses() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/instruments/XAU_USD/candles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candles_body(&[2300.0])))
        .mount(&server)
        .await;

    let client = OandaClient::new(&test_config(&server.uri())).unwrap();
    let series = client.fetch("XAU_USD", 150, "M1").await.unwrap();

    assert_eq!(series.len(), 1);
}

#[tokio::test]
async fn test_fetch_reports_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"errorMessage":"Insufficient authorization"}"#),
        )
        .mount(&server)
        .await;

    let client = OandaClient::new(&test_config(&server.uri())).unwrap();

    match client.fetch("XAU_USD", 150, "M1").await {
        Err(GoldError::Status { status, body }) => {
            assert_eq!(status.as_u16(), 401);
            assert!(body.contains("Insufficient authorization"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_reports_malformed_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let client = OandaClient::new(&test_config(&server.uri())).unwrap();
    let result = client.fetch("XAU_USD", 150, "M1").await;

    assert!(matches!(result, Err(GoldError::Parse(_))));
}

#[tokio::test]
async fn test_fetch_times_out_on_stalled_provider() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(candles_body(&[2300.0]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri());
    config.settings.request_timeout_secs = 1;
    let client = OandaClient::new(&config).unwrap();

    match client.fetch("XAU_USD", 150, "M1").await {
        Err(GoldError::Http(e)) => assert!(e.is_timeout()),
        other => panic!("expected timeout, got {:?}", other),
    }
}
