use serde_json::json;
use sift::api::{ApiError, Backend, HttpBackend};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

// ============================================================================
// Chat
// ============================================================================

#[tokio::test]
async fn test_chat_success_with_sources_and_metadata() {
    let mock_server = MockServer::start().await;

    let body = json!({
        "response": "Trainers praised the **hands-on sessions**.",
        "sources": [{
            "feedback_id": "FB-1042",
            "project": "Coastal Livelihoods",
            "course": "Seaweed Cultivation",
            "centre": "Rameswaram",
            "batch": "B-07",
            "date": "2024-03-18",
            "trainer": "A. Kumar",
            "logged_by": "field-office",
            "content_types": ["observation", "suggestion"],
            "relevance_score": 0.873
        }],
        "metadata": {
            "relevant_count": 1,
            "filters_applied": {"course": "Seaweed Cultivation"}
        }
    });

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({"query": "How did the course go?"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(mock_server.uri());
    let reply = backend.chat("How did the course go?").await.unwrap();

    assert!(reply.response.contains("hands-on sessions"));
    assert_eq!(reply.sources.len(), 1);
    assert_eq!(reply.sources[0].feedback_id, "FB-1042");
    assert_eq!(reply.sources[0].relevance_score, 0.873);
    let metadata = reply.metadata.unwrap();
    assert_eq!(metadata.relevant_count, 1);
    assert_eq!(
        metadata.filters_applied.get("course").map(String::as_str),
        Some("Seaweed Cultivation")
    );
}

#[tokio::test]
async fn test_chat_success_with_sparse_body() {
    let mock_server = MockServer::start().await;

    // Only the response field; sources and metadata omitted entirely
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "No matching feedback found."
        })))
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(mock_server.uri());
    let reply = backend.chat("anything").await.unwrap();

    assert_eq!(reply.response, "No matching feedback found.");
    assert!(reply.sources.is_empty());
    assert!(reply.metadata.is_none());
}

#[tokio::test]
async fn test_chat_backend_error_carries_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "index not built"})),
        )
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(mock_server.uri());
    let err = backend.chat("query").await.unwrap_err();

    assert_eq!(err, ApiError::Backend("index not built".to_string()));
}

#[tokio::test]
async fn test_chat_non_json_error_body_surfaces_raw_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(mock_server.uri());
    let err = backend.chat("query").await.unwrap_err();

    assert_eq!(err, ApiError::Backend("Bad Gateway".to_string()));
}

#[tokio::test]
async fn test_chat_malformed_success_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    // 200 with a body that doesn't match the contract
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(mock_server.uri());
    let err = backend.chat("query").await.unwrap_err();

    assert!(matches!(err, ApiError::Parse(_)));
}

#[tokio::test]
async fn test_chat_unreachable_backend_is_transport_error() {
    // Nothing listens on port 1
    let backend = HttpBackend::new("http://127.0.0.1:1");
    let err = backend.chat("query").await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
}

// ============================================================================
// Initialize
// ============================================================================

#[tokio::test]
async fn test_initialize_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/initialize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Index built with 128 chunks."
        })))
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(mock_server.uri());
    let reply = backend.initialize().await.unwrap();

    assert_eq!(reply.message, "Index built with 128 chunks.");
}

#[tokio::test]
async fn test_initialize_failure_carries_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/initialize"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "no feedback data found"})),
        )
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(mock_server.uri());
    let err = backend.initialize().await.unwrap_err();

    assert_eq!(err, ApiError::Backend("no feedback data found".to_string()));
}

// ============================================================================
// Status
// ============================================================================

#[tokio::test]
async fn test_status_flattens_nested_vector_store() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "initialized": true,
            "vector_store": {"total_chunks": 128}
        })))
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(mock_server.uri());
    let snapshot = backend.status().await.unwrap();

    assert!(snapshot.initialized);
    assert_eq!(snapshot.total_chunks, 128);
}

#[tokio::test]
async fn test_status_uninitialized_backend() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "initialized": false
        })))
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(mock_server.uri());
    let snapshot = backend.status().await.unwrap();

    assert!(!snapshot.initialized);
    assert_eq!(snapshot.total_chunks, 0);
}

#[tokio::test]
async fn test_status_error_is_backend_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"error": "starting up"})))
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(mock_server.uri());
    let err = backend.status().await.unwrap_err();

    assert_eq!(err, ApiError::Backend("starting up".to_string()));
}
