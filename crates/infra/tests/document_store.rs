//! REST document store integration tests
//!
//! Runs the store against a wiremock server: wire decoding, bearer auth,
//! absent-record handling, and masked patches.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use unilink_core::{ProfileStore, ProviderError};
use unilink_domain::{DocumentFields, FieldValue};
use unilink_infra::{HttpClient, RestDocumentStore, TokenSource};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct FixedToken(&'static str);

#[async_trait]
impl TokenSource for FixedToken {
    async fn bearer_token(&self) -> Result<String, ProviderError> {
        Ok(self.0.to_string())
    }
}

fn store_for(server: &MockServer) -> RestDocumentStore {
    let http = HttpClient::builder()
        .timeout(Duration::from_secs(5))
        .max_attempts(1)
        .build()
        .expect("http client");
    RestDocumentStore::new(http, &server.uri(), Arc::new(FixedToken("bearer-1")))
}

#[tokio::test]
async fn get_decodes_typed_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/u1"))
        .and(header("authorization", "Bearer bearer-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "users/u1",
            "fields": {
                "name": { "stringValue": "Ana" },
                "graduation_year": { "integerValue": "2020" },
                "created_at": { "timestampValue": "2024-05-01T12:00:00Z" },
                "nickname": { "nullValue": null },
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let fields = store.get("users", "u1").await.expect("get").expect("present");

    assert_eq!(fields.get("name"), Some(&FieldValue::Str("Ana".into())));
    assert_eq!(fields.get("graduation_year"), Some(&FieldValue::Int(2020)));
    assert_eq!(fields.get("nickname"), Some(&FieldValue::Null));
    assert!(fields.get("created_at").and_then(|v| v.as_timestamp()).is_some());
}

#[tokio::test]
async fn missing_records_map_to_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": { "status": "NOT_FOUND", "message": "document missing" }
        })))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let fields = store.get("users", "ghost").await.expect("get");
    assert!(fields.is_none());
}

#[tokio::test]
async fn set_writes_the_full_document_without_a_mask() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/users/u1"))
        .and(header("authorization", "Bearer bearer-1"))
        .and(body_string_contains("\"integerValue\":\"2020\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let mut fields = DocumentFields::new();
    fields.insert("name".into(), FieldValue::Str("Ana".into()));
    fields.insert("graduation_year".into(), FieldValue::Int(2020));

    let store = store_for(&server);
    store.set("users", "u1", &fields).await.expect("set");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].url.as_str().contains("updateMask"));
}

#[tokio::test]
async fn patch_restricts_the_write_with_an_update_mask() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/users/u1"))
        .and(query_param("updateMask.fieldPaths", "name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let mut fields = DocumentFields::new();
    fields.insert("name".into(), FieldValue::Str("Ana Lima".into()));

    let store = store_for(&server);
    store.patch("users", "u1", &fields).await.expect("patch");
}

#[tokio::test]
async fn store_errors_carry_the_status_code() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/users/u1"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "error": { "status": "PERMISSION_DENIED", "message": "missing scope" }
        })))
        .mount(&server)
        .await;

    let mut fields = DocumentFields::new();
    fields.insert("name".into(), FieldValue::Str("Ana".into()));

    let store = store_for(&server);
    let err = store.set("users", "u1", &fields).await.unwrap_err();
    match err {
        ProviderError::Api { code, message } => {
            assert_eq!(code, "PERMISSION_DENIED");
            assert_eq!(message, "missing scope");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}
