use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use recpanel_client::{
    dispatch, BackgroundDispatcher, ClientError, RawResponse, Result, Transport,
};
use recpanel_core::{
    Action, ApiRequest, Applied, Dispatch, FormField, HttpMethod, NoticeKind, Panel,
};

/// Replays canned responses in order and records what was sent.
#[derive(Default)]
struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<RawResponse>>>,
    sent: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    fn with(responses: Vec<Result<RawResponse>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn sent(&self) -> Vec<ApiRequest> {
        self.sent.lock().expect("lock").clone()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse> {
        self.sent.lock().expect("lock").push(request.clone());
        self.responses
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Unavailable("script exhausted".to_string())))
    }
}

fn ok(body: &str) -> Result<RawResponse> {
    Ok(RawResponse::new(200, body))
}

fn record_json(id: u64, product: u64, code: i64, interested: u64) -> String {
    format!(
        r#"{{"id": {id}, "product_id": {product}, "rec_product_id": 500, "type": {code}, "interested": {interested}}}"#
    )
}

#[test]
fn create_sends_draft_and_populates_form() {
    let transport = ScriptedTransport::with(vec![Ok(RawResponse::new(
        201,
        record_json(7, 12, 3, 0),
    ))]);
    let mut panel = Panel::new();
    panel.form_mut().set(FormField::ProductId, "12");
    panel.form_mut().set(FormField::RecProductId, "500");
    panel.form_mut().set(FormField::Type, "UpSell");

    assert_eq!(
        dispatch(&mut panel, &transport, Action::Create),
        Some(Applied::Applied)
    );

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, HttpMethod::Post);
    let body = serde_json::to_value(sent[0].body.as_ref().expect("body")).expect("json");
    assert_eq!(
        body,
        serde_json::json!({"product_id": 12, "rec_product_id": 500, "type": 3})
    );
    assert_eq!(panel.form().value(FormField::Id), "7");
    assert_eq!(panel.form().value(FormField::Type), "UpSell");
    assert_eq!(panel.notice().expect("notice").text, "Success");
}

#[test]
fn server_error_message_is_shown_verbatim() {
    let transport = ScriptedTransport::with(vec![Ok(RawResponse::new(
        400,
        r#"{"status": 400, "error": "Bad Request", "message": "Invalid Query Product ID: x"}"#,
    ))]);
    let mut panel = Panel::new();
    panel.form_mut().set(FormField::Id, "3");
    panel.form_mut().set(FormField::ProductId, "x");

    dispatch(&mut panel, &transport, Action::Update);

    let notice = panel.notice().expect("notice");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.text, "Invalid Query Product ID: x");
    assert_eq!(panel.form().value(FormField::ProductId), "x");
}

#[test]
fn unreachable_server_shows_generic_message() {
    let transport = ScriptedTransport::with(vec![Err(ClientError::Unavailable(
        "connection refused".to_string(),
    ))]);
    let mut panel = Panel::new();
    panel.form_mut().set(FormField::Id, "3");

    dispatch(&mut panel, &transport, Action::Retrieve);

    assert!(panel.form().is_blank());
    assert_eq!(panel.notice().expect("notice").text, "Server error!");
}

#[test]
fn record_without_id_is_not_loaded() {
    let transport = ScriptedTransport::with(vec![ok(
        r#"{"product_id": 1, "rec_product_id": 2, "type": 0}"#,
    )]);
    let mut panel = Panel::new();
    panel.form_mut().set(FormField::ProductId, "1");
    panel.form_mut().set(FormField::RecProductId, "2");

    dispatch(&mut panel, &transport, Action::Create);

    assert!(panel.form().current().is_none());
    assert_eq!(panel.form().value(FormField::Id), "");
    assert_eq!(panel.notice().expect("notice").text, "Server error!");
}

#[test]
fn non_json_error_body_shows_generic_message() {
    let transport = ScriptedTransport::with(vec![Ok(RawResponse::new(
        502,
        "<html>Bad Gateway</html>",
    ))]);
    let mut panel = Panel::new();

    dispatch(&mut panel, &transport, Action::Search);

    assert_eq!(panel.notice().expect("notice").text, "Server error!");
    assert!(panel.results().is_none());
}

#[test]
fn delete_failure_keeps_form_and_uses_fixed_message() {
    let transport = ScriptedTransport::with(vec![
        ok(&record_json(4, 1, 0, 0)),
        Ok(RawResponse::new(404, r#"{"message": "Recommendation 4 not found"}"#)),
    ]);
    let mut panel = Panel::new();
    panel.form_mut().set(FormField::Id, "4");
    dispatch(&mut panel, &transport, Action::Retrieve);

    dispatch(&mut panel, &transport, Action::Delete);

    assert_eq!(panel.form().value(FormField::Id), "4");
    assert_eq!(panel.notice().expect("notice").text, "Server error!");
    assert_eq!(transport.sent()[1].target(), "/recommendations/4");
}

#[test]
fn delete_success_clears_form() {
    let transport = ScriptedTransport::with(vec![Ok(RawResponse::new(204, ""))]);
    let mut panel = Panel::new();
    panel.form_mut().set(FormField::Id, "4");
    panel.form_mut().set(FormField::ProductId, "1");

    dispatch(&mut panel, &transport, Action::Delete);

    assert!(panel.form().is_blank());
    assert_eq!(
        panel.notice().expect("notice").text,
        "Recommendation has been deleted!"
    );
}

#[test]
fn search_builds_query_and_adopts_first_result() {
    let body = format!(
        "[{}, {}]",
        record_json(1, 12, 1, 2),
        record_json(2, 12, 4, 0)
    );
    let transport = ScriptedTransport::with(vec![ok(&body)]);
    let mut panel = Panel::new();
    panel.form_mut().set(FormField::ProductId, "12");
    panel.form_mut().set(FormField::Type, "BoughtTogether");

    dispatch(&mut panel, &transport, Action::Search);

    assert_eq!(
        transport.sent()[0].target(),
        "/recommendations?product_id=12&type=1"
    );
    let table = panel.results().expect("table");
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[1][3], "4");
    assert_eq!(panel.form().value(FormField::Id), "1");
    assert_eq!(panel.form().value(FormField::Type), "BoughtTogether");
}

#[test]
fn rejected_and_local_actions_send_nothing() {
    let transport = ScriptedTransport::default();
    let mut panel = Panel::new();
    panel.form_mut().set(FormField::Type, "Nope");

    assert_eq!(dispatch(&mut panel, &transport, Action::Create), None);
    assert_eq!(dispatch(&mut panel, &transport, Action::Delete), None);
    assert_eq!(dispatch(&mut panel, &transport, Action::Clear), None);
    assert!(transport.sent().is_empty());
}

/// Answers retrieve requests after a per-id delay.
struct DelayedTransport {
    delays: Vec<(&'static str, Duration)>,
}

impl Transport for DelayedTransport {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse> {
        let id = request.segments.last().cloned().unwrap_or_default();
        if let Some((_, delay)) = self.delays.iter().find(|(key, _)| *key == id) {
            thread::sleep(*delay);
        }
        let numeric = if id == "A" { 1 } else { 2 };
        Ok(RawResponse::new(
            200,
            format!(
                r#"{{"id": "{id}", "product_id": {numeric}, "rec_product_id": 9, "type": 0, "interested": 0}}"#
            ),
        ))
    }
}

fn race(delay_a: Duration, delay_b: Duration) -> Panel {
    let transport = Arc::new(DelayedTransport {
        delays: vec![("A", delay_a), ("B", delay_b)],
    });
    let dispatcher = BackgroundDispatcher::new(transport);
    let mut panel = Panel::new();

    for id in ["A", "B"] {
        panel.form_mut().set(FormField::Id, id);
        match panel.begin(Action::Retrieve) {
            Dispatch::Pending(pending) => dispatcher.submit(pending),
            other => panic!("expected request, got {:?}", other),
        }
    }

    let mut received = 0;
    while received < 2 {
        let completion = dispatcher
            .wait_next(Duration::from_secs(5))
            .expect("completion");
        panel.complete(completion);
        received += 1;
    }
    panel
}

#[test]
fn newest_retrieve_wins_when_older_response_arrives_last() {
    let panel = race(Duration::from_millis(150), Duration::ZERO);
    assert_eq!(panel.form().value(FormField::Id), "B");
    assert_eq!(panel.form().value(FormField::ProductId), "2");
}

#[test]
fn newest_retrieve_wins_when_older_response_arrives_first() {
    let panel = race(Duration::ZERO, Duration::from_millis(150));
    assert_eq!(panel.form().value(FormField::Id), "B");
    assert!(!panel.is_waiting());
}

#[test]
fn drain_into_applies_arrived_completions() {
    let transport = Arc::new(DelayedTransport { delays: Vec::new() });
    let dispatcher = BackgroundDispatcher::new(transport);
    let mut panel = Panel::new();
    panel.form_mut().set(FormField::Id, "A");
    match panel.begin(Action::Retrieve) {
        Dispatch::Pending(pending) => dispatcher.submit(pending),
        other => panic!("expected request, got {:?}", other),
    }

    let mut applied = 0;
    for _ in 0..50 {
        applied += dispatcher.drain_into(&mut panel);
        if applied > 0 {
            break;
        }
        thread::sleep(Duration::from_millis(20));
    }
    assert_eq!(applied, 1);
    assert_eq!(panel.form().value(FormField::ProductId), "1");
}
