#![allow(clippy::unwrap_used)]
// Integration tests for `Roster` against a wiremock student service.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tracing_test::traced_test;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use roster_core::{NewStudentDraft, Roster, RosterConfig, StudentId, SyncOutcome};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Roster) {
    let server = MockServer::start().await;
    let config = RosterConfig::new(Url::parse(&server.uri()).unwrap());
    let roster = Roster::from_config(&config).unwrap();
    (server, roster)
}

fn ann() -> Value {
    json!({"id": 1, "name": "Ann", "code": "A1", "active": true})
}

fn bo() -> Value {
    json!({"id": 2, "name": "Bo", "code": "B2", "active": false})
}

fn listing(records: &[Value]) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(Value::Array(records.to_vec()))
}

fn ids(roster: &Roster) -> Vec<String> {
    roster
        .snapshot()
        .iter()
        .map(|r| r.id.to_string())
        .collect()
}

async fn mount_listing(server: &MockServer, records: &[Value]) {
    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(listing(records))
        .mount(server)
        .await;
}

// ── Initialize ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_initialize_keeps_received_order() {
    let (server, roster) = setup().await;
    mount_listing(&server, &[bo(), ann()]).await;

    assert_eq!(roster.initialize().await, SyncOutcome::Applied);

    assert_eq!(ids(&roster), vec!["2", "1"]);
    let first = &roster.snapshot()[0];
    assert_eq!(first.name, "Bo");
    assert_eq!(first.code, "B2");
    assert!(!first.active);
    assert!(roster.last_refresh().is_some());
}

#[tokio::test]
#[traced_test]
async fn test_initialize_failure_empties_snapshot() {
    let (server, roster) = setup().await;

    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(listing(&[ann()]))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    roster.initialize().await;
    assert_eq!(roster.snapshot().len(), 1);

    assert_eq!(roster.refresh().await, SyncOutcome::Failed);
    assert!(roster.snapshot().is_empty());
    assert!(logs_contain("failed to fetch students"));
}

#[tokio::test]
async fn test_malformed_listing_is_a_failure() {
    let (server, roster) = setup().await;

    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"not": "an array"})))
        .mount(&server)
        .await;

    assert_eq!(roster.initialize().await, SyncOutcome::Failed);
    assert!(roster.snapshot().is_empty());
    assert!(roster.last_refresh().is_none());
}

// ── Submit draft ────────────────────────────────────────────────────

#[tokio::test]
async fn test_submit_skips_incomplete_drafts() {
    let (server, roster) = setup().await;

    Mock::given(method("POST"))
        .and(path("/students"))
        .respond_with(ResponseTemplate::new(201).set_body_json(bo()))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(listing(&[]))
        .expect(0)
        .mount(&server)
        .await;

    for draft in [
        NewStudentDraft::new("", "B2", true),
        NewStudentDraft::new("Bo", "", true),
        NewStudentDraft::new("", "", false),
    ] {
        roster.set_draft(draft.clone());
        assert_eq!(roster.submit_draft().await, SyncOutcome::Skipped);
        assert_eq!(roster.draft(), draft);
    }
}

#[tokio::test]
async fn test_submit_creates_refreshes_and_resets_draft() {
    let (server, roster) = setup().await;

    Mock::given(method("POST"))
        .and(path("/students"))
        .and(body_json(json!({"studentCode": "B2", "name": "Bo", "isActive": false})))
        .respond_with(ResponseTemplate::new(201).set_body_json(bo()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(listing(&[ann(), bo()]))
        .expect(1)
        .mount(&server)
        .await;

    roster.set_draft(NewStudentDraft::new("Bo", "B2", false));
    assert_eq!(roster.submit_draft().await, SyncOutcome::Applied);

    assert_eq!(ids(&roster), vec!["1", "2"]);
    assert_eq!(roster.draft(), NewStudentDraft::default());

    let requests = server.received_requests().await.unwrap();
    let methods: Vec<_> = requests.iter().map(|r| r.method.to_string()).collect();
    assert_eq!(methods, vec!["POST", "GET"]);
}

#[tokio::test]
async fn test_draft_resets_regardless_of_submitted_values() {
    let (server, roster) = setup().await;

    Mock::given(method("POST"))
        .and(path("/students"))
        .respond_with(ResponseTemplate::new(201).set_body_json(ann()))
        .mount(&server)
        .await;
    mount_listing(&server, &[ann()]).await;

    roster.set_draft(NewStudentDraft::new("Ann", "A1", true));
    roster.submit_draft().await;
    assert_eq!(roster.draft(), NewStudentDraft::new("", "", false));
}

#[tokio::test]
#[traced_test]
async fn test_draft_resets_even_when_follow_up_refresh_fails() {
    let (server, roster) = setup().await;

    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(listing(&[ann()]))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/students"))
        .respond_with(ResponseTemplate::new(201).set_body_json(bo()))
        .expect(1)
        .mount(&server)
        .await;

    roster.initialize().await;
    assert_eq!(ids(&roster), vec!["1"]);

    roster.set_draft(NewStudentDraft::new("Bo", "B2", false));
    assert_eq!(roster.submit_draft().await, SyncOutcome::Applied);

    assert_eq!(roster.draft(), NewStudentDraft::default());
    assert!(roster.snapshot().is_empty());
    assert!(logs_contain("failed to fetch students"));
}

#[tokio::test]
#[traced_test]
async fn test_submit_failure_leaves_state_untouched() {
    let (server, roster) = setup().await;

    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(listing(&[ann()]))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/students"))
        .respond_with(ResponseTemplate::new(400).set_body_string("duplicate code"))
        .expect(1)
        .mount(&server)
        .await;

    roster.initialize().await;
    let draft = NewStudentDraft::new("Ann", "A1", true);
    roster.set_draft(draft.clone());

    assert_eq!(roster.submit_draft().await, SyncOutcome::Failed);
    assert_eq!(roster.draft(), draft);
    assert_eq!(ids(&roster), vec!["1"]);
    assert!(logs_contain("failed to add student"));
}

#[tokio::test]
async fn test_edit_draft_updates_fields() {
    let (_server, roster) = setup().await;
    let mut rx = roster.subscribe_draft();

    roster.edit_draft(|d| d.name.push_str("Bo"));
    roster.edit_draft(|d| d.active = true);
    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), NewStudentDraft::new("Bo", "", true));

    roster.edit_draft(|d| d.active = true);
    assert!(!rx.has_changed().unwrap());
}

// ── Remove ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_remove_scenario() {
    let (server, roster) = setup().await;

    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(listing(&[ann()]))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/students/1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(listing(&[]))
        .expect(1)
        .mount(&server)
        .await;

    roster.initialize().await;
    let snap = roster.snapshot();
    assert_eq!(snap.len(), 1);
    assert_eq!(snap[0].name, "Ann");

    assert_eq!(roster.remove_record(&StudentId::from(1)).await, SyncOutcome::Applied);
    assert!(roster.snapshot().is_empty());
}

#[tokio::test]
#[traced_test]
async fn test_remove_failure_leaves_state_untouched() {
    let (server, roster) = setup().await;

    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(listing(&[ann()]))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/students/9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    roster.initialize().await;
    assert_eq!(roster.remove_record(&"9".into()).await, SyncOutcome::Failed);
    assert_eq!(ids(&roster), vec!["1"]);
    assert!(logs_contain("failed to delete student"));
}

#[tokio::test]
async fn test_remove_prunes_selection_of_deleted_row() {
    let (server, roster) = setup().await;

    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(listing(&[ann(), bo()]))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/students/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    mount_listing(&server, &[bo()]).await;

    roster.initialize().await;
    roster.toggle_selection(&"1".into());
    roster.toggle_selection(&"2".into());
    assert_eq!(roster.selection().count(), 2);

    roster.remove_record(&"1".into()).await;
    let selection = roster.selection();
    assert_eq!(selection.count(), 1);
    assert!(selection.is_selected(&"2".into()));
}

// ── Clear ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_clear_local_makes_no_remote_call() {
    let (server, roster) = setup().await;
    mount_listing(&server, &[ann(), bo()]).await;

    roster.initialize().await;
    roster.toggle_selection(&"1".into());
    roster.on_toggle(true);
    let before = server.received_requests().await.unwrap().len();

    assert_eq!(roster.clear_local(), SyncOutcome::Applied);

    assert!(roster.snapshot().is_empty());
    assert_eq!(roster.selection().count(), 0);
    assert_eq!(server.received_requests().await.unwrap().len(), before);
}

#[tokio::test]
async fn test_refresh_after_clear_repopulates() {
    let (server, roster) = setup().await;
    mount_listing(&server, &[ann()]).await;

    roster.initialize().await;
    roster.clear_local();
    assert!(roster.snapshot().is_empty());

    roster.refresh().await;
    assert_eq!(ids(&roster), vec!["1"]);
}

// ── Overlapping refreshes ───────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_stale_refresh_is_superseded() {
    let (server, roster) = setup().await;

    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(listing(&[ann()]).set_delay(Duration::from_millis(400)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_listing(&server, &[bo()]).await;

    let slow = tokio::spawn({
        let roster = roster.clone();
        async move { roster.refresh().await }
    });

    // Wait until the slow request is on the wire before issuing the next.
    while server.received_requests().await.unwrap().is_empty() {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    assert_eq!(roster.refresh().await, SyncOutcome::Applied);
    assert_eq!(slow.await.unwrap(), SyncOutcome::Superseded);
    assert_eq!(ids(&roster), vec!["2"]);
}

// ── Subscriptions ───────────────────────────────────────────────────

#[tokio::test]
async fn test_subscribers_see_replacement() {
    let (server, roster) = setup().await;
    mount_listing(&server, &[ann()]).await;

    let mut stream = roster.subscribe();
    assert!(stream.current().is_empty());

    roster.initialize().await;
    let snap = stream.changed().await.unwrap();
    assert_eq!(snap.len(), 1);
    assert_eq!(stream.current().len(), 1);
}

#[tokio::test]
async fn test_snapshot_stream_yields_current_then_updates() {
    use futures::StreamExt;

    let (server, roster) = setup().await;
    mount_listing(&server, &[ann(), bo()]).await;

    let mut stream = roster.subscribe().into_stream();
    assert!(stream.next().await.unwrap().is_empty());

    roster.initialize().await;
    assert_eq!(stream.next().await.unwrap().len(), 2);
}
