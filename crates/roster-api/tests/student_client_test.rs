#![allow(clippy::unwrap_used)]
// Integration tests for `StudentClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use roster_api::{CreateStudentRequest, Error, StudentClient, WireId};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, StudentClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = StudentClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

// ── List ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_students_preserves_order() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 2, "name": "Bo", "code": "B2", "active": false},
            {"id": 1, "name": "Ann", "code": "A1", "active": true}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let students = client.list_students().await.unwrap();
    assert_eq!(students.len(), 2);
    assert_eq!(students[0].id, WireId::Int(2));
    assert_eq!(students[0].name, "Bo");
    assert_eq!(students[1].code, "A1");
    assert!(students[1].active);
}

#[tokio::test]
async fn test_list_students_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert!(client.list_students().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_students_server_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client.list_students().await;
    match result {
        Err(Error::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected Status error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_list_students_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let result = client.list_students().await;
    assert!(
        matches!(result, Err(Error::Deserialization { ref body, .. }) if body.contains("nope")),
        "expected Deserialization error, got: {result:?}"
    );
}

// ── Get ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_student() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/students/65f0c2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "65f0c2", "name": "Cy", "code": "C3", "active": true
        })))
        .mount(&server)
        .await;

    let student = client.get_student("65f0c2").await.unwrap();
    assert_eq!(student.id, WireId::Text("65f0c2".into()));
    assert_eq!(student.name, "Cy");
}

#[tokio::test]
async fn test_get_student_without_status_is_malformed() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/students/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "name": "Cy", "code": "C3"
        })))
        .mount(&server)
        .await;

    let result = client.get_student("3").await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_get_student_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/students/9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client.get_student("9").await.unwrap_err();
    assert!(err.is_not_found(), "got: {err:?}");
}

// ── Create ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_student_sends_camel_case_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/students"))
        .and(body_json(json!({
            "studentCode": "B2", "name": "Bo", "isActive": false
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 3, "name": "Bo", "code": "B2", "active": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client
        .create_student(&CreateStudentRequest {
            student_code: "B2".into(),
            name: "Bo".into(),
            is_active: false,
        })
        .await
        .unwrap();
    assert_eq!(created.id, WireId::Int(3));
}

#[tokio::test]
async fn test_create_student_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/students"))
        .respond_with(ResponseTemplate::new(400).set_body_string("code already used"))
        .mount(&server)
        .await;

    let result = client
        .create_student(&CreateStudentRequest {
            student_code: "A1".into(),
            name: "Ann".into(),
            is_active: true,
        })
        .await;
    assert_eq!(result.unwrap_err().status(), Some(400));
}

// ── Delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_student() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/students/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": true})))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_student("7").await.unwrap();
}

#[tokio::test]
async fn test_delete_student_empty_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/students/7"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    client.delete_student("7").await.unwrap();
}

#[tokio::test]
async fn test_delete_student_failure() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/students/7"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = client.delete_student("7").await;
    assert!(matches!(result, Err(Error::Status { status: 503, .. })));
}

// ── Transport ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_unreachable_service() {
    // Nothing listens on port 1.
    let client = StudentClient::with_client(
        reqwest::Client::new(),
        Url::parse("http://127.0.0.1:1").unwrap(),
    );

    let err = client.list_students().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got: {err:?}");
    assert!(err.is_unreachable());
}

#[tokio::test]
async fn test_base_url_with_path_prefix() {
    let server = MockServer::start().await;
    let base = Url::parse(&format!("{}/api/v1/", server.uri())).unwrap();
    let client = StudentClient::with_client(reqwest::Client::new(), base);

    Mock::given(method("GET"))
        .and(path("/api/v1/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    client.list_students().await.unwrap();
}
