#![allow(clippy::unwrap_used)]
// Integration tests for `DetailLookup` using wiremock.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tracing_test::traced_test;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use roster_core::{DetailLookup, DetailState, Roster, RosterConfig, StudentId, SyncOutcome};

async fn setup() -> (MockServer, DetailLookup) {
    let server = MockServer::start().await;
    let config = RosterConfig::new(Url::parse(&server.uri()).unwrap());
    let detail = Roster::from_config(&config).unwrap().detail_lookup();
    (server, detail)
}

#[tokio::test]
async fn test_load_shows_record() {
    let (server, detail) = setup().await;

    Mock::given(method("GET"))
        .and(path("/students/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7, "name": "Cy", "code": "C3", "active": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(detail.state(), DetailState::Unloaded);
    assert_eq!(detail.load(StudentId::from("7")).await, SyncOutcome::Applied);

    let state = detail.state();
    let record = state.record().unwrap();
    assert_eq!(record.name, "Cy");
    assert_eq!(record.status().to_string(), "Active");
    assert_eq!(detail.current_id(), Some(StudentId::from("7")));
}

#[tokio::test]
#[traced_test]
async fn test_not_found_fails_and_logs_once() {
    let (server, detail) = setup().await;

    Mock::given(method("GET"))
        .and(path("/students/42"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(detail.load(StudentId::from(42)).await, SyncOutcome::Failed);
    assert_eq!(detail.state(), DetailState::Failed);
    assert!(detail.state().record().is_none());

    logs_assert(|lines: &[&str]| {
        let hits = lines
            .iter()
            .filter(|line| line.contains("failed to fetch student details"))
            .count();
        if hits == 1 {
            Ok(())
        } else {
            Err(format!("expected one failure log, found {hits}"))
        }
    });
}

#[tokio::test]
async fn test_same_id_is_fetched_once() {
    let (server, detail) = setup().await;

    Mock::given(method("GET"))
        .and(path("/students/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7, "name": "Cy", "code": "C3", "active": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    detail.load("7".into()).await;
    assert_eq!(detail.load("7".into()).await, SyncOutcome::Skipped);
}

#[tokio::test]
async fn test_id_change_fetches_again() {
    let (server, detail) = setup().await;

    for (id, name) in [("1", "Ann"), ("2", "Bo")] {
        Mock::given(method("GET"))
            .and(path(format!("/students/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": id, "name": name, "code": "x", "active": false
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    detail.load("1".into()).await;
    detail.load("2".into()).await;
    assert_eq!(detail.state().record().unwrap().name, "Bo");
}

#[tokio::test]
async fn test_reload_fetches_current_id_again() {
    let (server, detail) = setup().await;

    Mock::given(method("GET"))
        .and(path("/students/7"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/students/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7, "name": "Cy", "code": "C3", "active": true
        })))
        .mount(&server)
        .await;

    assert_eq!(detail.load("7".into()).await, SyncOutcome::Failed);
    assert_eq!(detail.reload().await, SyncOutcome::Applied);
    assert!(detail.state().record().is_some());
}

#[tokio::test]
async fn test_reset_then_same_id_fetches_again() {
    let (server, detail) = setup().await;

    Mock::given(method("GET"))
        .and(path("/students/1"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/students/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "name": "Ann", "code": "A1", "active": true
        })))
        .mount(&server)
        .await;

    assert_eq!(detail.load("1".into()).await, SyncOutcome::Failed);
    detail.reset();
    assert_eq!(detail.current_id(), None);
    assert_eq!(detail.state(), DetailState::Unloaded);

    assert_eq!(detail.load("1".into()).await, SyncOutcome::Applied);
    assert_eq!(detail.state().record().unwrap().name, "Ann");
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_reload_without_id_is_skipped() {
    let (_server, detail) = setup().await;
    assert_eq!(detail.reload().await, SyncOutcome::Skipped);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_response_for_previous_id_is_discarded() {
    let (server, detail) = setup().await;

    Mock::given(method("GET"))
        .and(path("/students/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 1, "name": "Ann", "code": "A1", "active": true}))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/students/2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 2, "name": "Bo", "code": "B2", "active": false})),
        )
        .mount(&server)
        .await;

    let slow = tokio::spawn({
        let detail = detail.clone();
        async move { detail.load("1".into()).await }
    });
    while server.received_requests().await.unwrap().is_empty() {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    assert_eq!(detail.load("2".into()).await, SyncOutcome::Applied);
    assert_eq!(slow.await.unwrap(), SyncOutcome::Superseded);
    assert_eq!(detail.state().record().unwrap().name, "Bo");
    assert_eq!(detail.current_id(), Some(StudentId::from("2")));
}
