use std::time::Duration;

use matcher_engine::{
    Backend, BackendSettings, BooleanRequest, FailureKind, PointersRequest, ReqwestBackend, Upload,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> ReqwestBackend {
    ReqwestBackend::new(BackendSettings {
        base_url: server.uri(),
        ..BackendSettings::default()
    })
    .expect("backend")
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn extract_jd_text_posts_json_and_decodes_groups() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/extract-jd-text"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "text": "Senior Java developer" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "groups": [["java", "spring"], ["sql"]],
            "exclude": ["php"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = backend_for(&server)
        .extract_jd_text("Senior Java developer")
        .await
        .expect("extract ok");

    assert_eq!(response.text, None);
    assert_eq!(
        response.groups,
        vec![strings(&["java", "spring"]), strings(&["sql"])]
    );
    assert_eq!(response.exclude, strings(&["php"]));
}

#[tokio::test]
async fn extract_jd_file_uploads_multipart_field_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/extract-jd"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"jd.txt\""))
        .and(body_string_contains("We are hiring a Rust engineer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "text": "We are hiring a Rust engineer",
            "groups": [["rust"]],
            "exclude": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let upload = Upload::new("jd.txt", b"We are hiring a Rust engineer".to_vec());
    let response = backend_for(&server)
        .extract_jd_file(&upload)
        .await
        .expect("extract ok");

    assert_eq!(
        response.text.as_deref(),
        Some("We are hiring a Rust engineer")
    );
    assert_eq!(response.groups, vec![strings(&["rust"])]);
    assert!(response.exclude.is_empty());
}

#[tokio::test]
async fn generate_boolean_sends_groups_and_exclusions_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-boolean"))
        .and(body_json(json!({
            "groups": [["java"], ["sql", "mysql"]],
            "exclude": ["php"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "boolean_query": "(java) AND (sql OR mysql) NOT (php)"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = BooleanRequest {
        groups: vec![strings(&["java"]), strings(&["sql", "mysql"])],
        exclude: strings(&["php"]),
    };
    let response = backend_for(&server)
        .generate_boolean(&request)
        .await
        .expect("boolean ok");

    assert_eq!(response.boolean_query, "(java) AND (sql OR mysql) NOT (php)");
}

#[tokio::test]
async fn generate_pointers_sends_resume_target_and_jd_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-pointers"))
        .and(body_string_contains("name=\"resume\""))
        .and(body_string_contains("filename=\"cv.txt\""))
        .and(body_string_contains("name=\"target_match\"\r\n\r\n75\r\n"))
        .and(body_string_contains("name=\"jd_text\"\r\n\r\nJava role\r\n"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "match_score": 61.5,
            "role_title": "Backend Engineer",
            "role_type": "Engineering",
            "level": "Senior",
            "updated_pointers": ["Built a payments API in Java", "Tuned MySQL queries"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = PointersRequest {
        resume: Upload::new("cv.txt", b"Ten years of Java".to_vec()),
        target_match: 75,
        jd_text: "Java role".to_string(),
    };
    let response = backend_for(&server)
        .generate_pointers(&request)
        .await
        .expect("pointers ok");

    assert_eq!(response.match_score, 61.5);
    assert_eq!(response.role_title, "Backend Engineer");
    assert_eq!(response.role_type, "Engineering");
    assert_eq!(response.level, "Senior");
    assert_eq!(
        response.updated_pointers,
        strings(&["Built a payments API in Java", "Tuned MySQL queries"])
    );
}

#[tokio::test]
async fn http_errors_are_reported_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-boolean"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let request = BooleanRequest {
        groups: Vec::new(),
        exclude: Vec::new(),
    };
    let err = backend_for(&server)
        .generate_boolean(&request)
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn missing_fields_are_malformed_responses() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/extract-jd-text"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": "only text" })))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .extract_jd_text("anything")
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::MalformedResponse);
}

#[tokio::test]
async fn non_json_bodies_are_malformed_responses() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-boolean"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let request = BooleanRequest {
        groups: Vec::new(),
        exclude: Vec::new(),
    };
    let err = backend_for(&server)
        .generate_boolean(&request)
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::MalformedResponse);
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/extract-jd-text"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "groups": [], "exclude": [] })),
        )
        .mount(&server)
        .await;

    let backend = ReqwestBackend::new(BackendSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..BackendSettings::default()
    })
    .expect("backend");
    let err = backend.extract_jd_text("jd").await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_responses_are_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-boolean"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "boolean_query": "a very long query that exceeds the ceiling"
        })))
        .mount(&server)
        .await;

    let backend = ReqwestBackend::new(BackendSettings {
        base_url: server.uri(),
        max_response_bytes: 16,
        ..BackendSettings::default()
    })
    .expect("backend");
    let request = BooleanRequest {
        groups: Vec::new(),
        exclude: Vec::new(),
    };
    let err = backend.generate_boolean(&request).await.unwrap_err();

    assert!(matches!(
        err.kind,
        FailureKind::TooLarge { max_bytes: 16, .. }
    ));
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    // Bind and drop a server so the port is known to refuse connections.
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };
    let backend = ReqwestBackend::new(BackendSettings {
        base_url: uri,
        connect_timeout: Duration::from_millis(200),
        ..BackendSettings::default()
    })
    .expect("backend");

    let err = backend.extract_jd_text("jd").await.unwrap_err();
    assert!(matches!(
        err.kind,
        FailureKind::Network | FailureKind::Timeout
    ));
}
