//! # Integration Tests for the HTTP Record Fetcher
//!
//! Runs `HttpRecordFetcher` against wiremock servers to verify request
//! construction, response parsing, and error mapping, and exercises the
//! orchestrator end-to-end over real HTTP.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use regintel_fire::{
    FetchError, FetcherConfig, HttpRecordFetcher, RecordFetcher, ValidationOrchestrator,
    ValidationRequest,
};
use regintel_schema::SchemaValidator;

fn fetcher(server: &MockServer) -> HttpRecordFetcher {
    HttpRecordFetcher::new(FetcherConfig::new(server.uri())).expect("fetcher build")
}

#[tokio::test]
async fn fetch_json_returns_payload_on_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/fire/entities/ent-001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "ent-001",
            "name": "Acme Capital",
            "type": "company"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = fetcher(&server)
        .fetch_json("/api/fire/entities/ent-001")
        .await
        .expect("fetch");
    assert_eq!(payload["name"], "Acme Capital");
}

#[tokio::test]
async fn fetch_json_maps_non_2xx_to_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/fire/entities/ent-missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such entity"))
        .expect(1)
        .mount(&server)
        .await;

    let err = fetcher(&server)
        .fetch_json("/api/fire/entities/ent-missing")
        .await
        .expect_err("should fail");
    match err {
        FetchError::Status { status, body, .. } => {
            assert_eq!(status, 404);
            assert_eq!(body, "no such entity");
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_json_maps_bad_body_to_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/fire/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .expect(1)
        .mount(&server)
        .await;

    let err = fetcher(&server)
        .fetch_json("/api/fire/accounts")
        .await
        .expect_err("should fail");
    assert!(matches!(err, FetchError::Decode { .. }));
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_tolerated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/fire/customers/cus-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cus-1",
            "name": "Jordan Example"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let f = HttpRecordFetcher::new(FetcherConfig::new(format!("{}/", server.uri())))
        .expect("fetcher build");
    let payload = f.fetch_json("/api/fire/customers/cus-1").await.expect("fetch");
    assert_eq!(payload["id"], "cus-1");
}

#[tokio::test]
async fn orchestrator_over_http_assembles_full_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/fire/entities/ent-001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "ent-001",
            "name": "Acme Capital",
            "type": "company",
            "country_code": "DE"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/fire/securities/sec-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "sec-1",
            "identifiers": [{ "id": "DE0001234567", "type": "isin" }],
            "currency": "EUR"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/fire/accounts"))
        .and(query_param("entityId", "ent-001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "acc-1",
            "entity_id": "ent-001",
            "type": "deposit",
            "currency": "EUR"
        })))
        .mount(&server)
        .await;

    let orchestrator = ValidationOrchestrator::new(
        Arc::new(fetcher(&server)),
        SchemaValidator::new().expect("schemas compile"),
    );
    let request = ValidationRequest {
        entity_id: "ent-001".to_string(),
        security_ids: vec!["sec-1".to_string()],
        customer_id: None,
        start_date: chrono::NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        end_date: chrono::NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
    };

    let result = orchestrator.run(&request).await.expect("run");
    assert_eq!(result.entity.name, "Acme Capital");
    assert_eq!(result.securities.len(), 1);
    // A single account object comes back as a one-element list.
    assert_eq!(result.accounts.len(), 1);
    assert!(result.validated);
}
