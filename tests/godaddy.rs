//! GoDaddy client against a local mock registrar

use httpmock::prelude::*;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use typo_forge::{
    availability::{AvailabilityCache, AvailabilityService, GoDaddyClient, GoDaddyConfig},
    types::{AvailabilityStatus, LookupConfig},
    TypoForgeError, TypoPipeline,
};

fn client_for(server: &MockServer) -> GoDaddyClient {
    let config = GoDaddyConfig {
        api_key: "key".to_string(),
        api_secret: "secret".to_string(),
        base_url: Some(server.base_url()),
        timeout: Duration::from_secs(5),
        ..Default::default()
    };
    GoDaddyClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_available_domain() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/domains/available")
                .query_param("domain", "tset.com")
                .header("Authorization", "sso-key key:secret")
                .header("Accept", "application/json");
            then.status(200).json_body(json!({
                "available": true,
                "currency": "USD",
                "definitive": false,
                "domain": "tset.com",
                "period": 1,
                "price": 11990000
            }));
        })
        .await;

    let result = client_for(&server).check("tset.com").await.unwrap();

    mock.assert_async().await;
    assert_eq!(result.status(), AvailabilityStatus::Available);
    assert_eq!(result.price, Some(11_990_000));
    assert_eq!(result.price_amount(), Some(11.99));
    assert_eq!(result.currency.as_deref(), Some("USD"));
}

#[tokio::test]
async fn test_unmodelled_fields_are_kept() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/domains/available");
            then.status(200).json_body(json!({
                "available": false,
                "domain": "google.com",
                "definitive": true,
                "registrarHint": "premium"
            }));
        })
        .await;

    let result = client_for(&server).check("google.com").await.unwrap();

    assert_eq!(result.status(), AvailabilityStatus::Taken);
    assert_eq!(result.metadata.get("registrarHint"), Some(&json!("premium")));
}

#[tokio::test]
async fn test_error_status_is_external_service_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/domains/available");
            then.status(401)
                .body(r#"{"code":"UNABLE_TO_AUTHENTICATE","message":"Unauthorized"}"#);
        })
        .await;

    let err = client_for(&server).check("tset.com").await.unwrap_err();

    match err {
        TypoForgeError::ExternalService { status_code, message } => {
            assert_eq!(status_code, 401);
            assert!(message.contains("UNABLE_TO_AUTHENTICATE"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_cached_pipeline_calls_registrar_once_per_domain() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/domains/available");
            then.status(200).json_body(json!({"available": true, "definitive": false}));
        })
        .await;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cache.json");
    let config = LookupConfig::cached(true, true).with_delay(Duration::ZERO);

    for _ in 0..2 {
        let service: Arc<dyn AvailabilityService> = Arc::new(client_for(&server));
        let cache = AvailabilityCache::open(&path, config.clone(), Some(service)).unwrap();
        let mut pipeline = TypoPipeline::new(cache);
        let reports = pipeline
            .generate("test", "com", Some("B2"))
            .unwrap()
            .collect_all()
            .await
            .unwrap();
        assert_eq!(reports.len(), 3);
        pipeline.into_cache().close().unwrap();
    }

    assert_eq!(mock.hits_async().await, 3);
}

#[tokio::test]
async fn test_invalid_body_is_parse_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/domains/available");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let err = client_for(&server).check("tset.com").await.unwrap_err();
    assert!(matches!(err, TypoForgeError::Parse { .. }));
}

#[tokio::test]
async fn test_unreachable_registrar_is_network_error() {
    let config = GoDaddyConfig {
        api_key: "key".to_string(),
        api_secret: "secret".to_string(),
        base_url: Some("http://127.0.0.1:1".to_string()),
        timeout: Duration::from_secs(5),
        ..Default::default()
    };
    let client = GoDaddyClient::new(&config).unwrap();

    let err = client.check("tset.com").await.unwrap_err();
    assert!(matches!(err, TypoForgeError::Network { .. }));
    assert_eq!(err.status_code(), None);
}
