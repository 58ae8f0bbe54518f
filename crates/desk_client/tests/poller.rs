use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use desk_client::{
    AnswerResponse, ApiError, ChannelEventSink, ClientEvent, ClientHandle, EventSink,
    FailureKind, Poller, ResearchApi, ResearchReport, ResearchTicket, SessionInfo, StreamLog,
    UploadFile, UploadResponse,
};

/// Counts log fetches per task; every other endpoint is unreachable.
#[derive(Default)]
struct CountingApi {
    fetches: Mutex<HashMap<String, usize>>,
    fail_logs: bool,
}

impl CountingApi {
    fn failing() -> Self {
        Self {
            fail_logs: true,
            ..Self::default()
        }
    }

    fn fetches(&self, task_id: &str) -> usize {
        self.fetches
            .lock()
            .unwrap()
            .get(task_id)
            .copied()
            .unwrap_or(0)
    }
}

fn unreachable_endpoint() -> ApiError {
    ApiError {
        kind: FailureKind::Network,
        message: "not under test".to_string(),
        detail: None,
    }
}

#[async_trait::async_trait]
impl ResearchApi for CountingApi {
    async fn start_research(&self, _topic: &str) -> Result<ResearchTicket, ApiError> {
        Err(unreachable_endpoint())
    }

    async fn stream_logs(&self, task_id: &str) -> Result<Vec<StreamLog>, ApiError> {
        *self
            .fetches
            .lock()
            .unwrap()
            .entry(task_id.to_string())
            .or_default() += 1;
        if self.fail_logs {
            return Err(unreachable_endpoint());
        }
        Ok(vec![StreamLog {
            step: None,
            details: None,
            status: "Researching".to_string(),
        }])
    }

    async fn fetch_result(&self, _task_id: &str) -> Result<ResearchReport, ApiError> {
        Err(unreachable_endpoint())
    }

    async fn upload_documents(
        &self,
        _files: &[UploadFile],
        _session_id: Option<&str>,
    ) -> Result<UploadResponse, ApiError> {
        Err(unreachable_endpoint())
    }

    async fn delete_session(&self, _session_id: &str) -> Result<(), ApiError> {
        Err(unreachable_endpoint())
    }

    async fn session_info(&self, _session_id: &str) -> Result<SessionInfo, ApiError> {
        Err(unreachable_endpoint())
    }

    async fn ask_question(
        &self,
        _session_id: &str,
        _question: &str,
    ) -> Result<AnswerResponse, ApiError> {
        Err(unreachable_endpoint())
    }
}

#[derive(Default)]
struct TestSink {
    events: Mutex<Vec<ClientEvent>>,
}

impl TestSink {
    fn tickets(&self) -> Vec<u64> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                ClientEvent::LogsPolled { ticket, .. } => Some(*ticket),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for TestSink {
    fn emit(&self, event: ClientEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[tokio::test(start_paused = true)]
async fn ticks_at_fixed_cadence_after_one_period() {
    let api = Arc::new(CountingApi::default());
    let sink = Arc::new(TestSink::default());
    let mut poller = Poller::new();

    poller.start(
        &tokio::runtime::Handle::current(),
        api.clone(),
        sink.clone(),
        "task-a".to_string(),
        1,
        Duration::from_secs(1),
    );
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(api.fetches("task-a"), 0);

    tokio::time::sleep(Duration::from_millis(3_000)).await;
    assert_eq!(api.fetches("task-a"), 3);
    assert_eq!(sink.tickets(), vec![1, 1, 1]);
    assert!(poller.is_active());
}

#[tokio::test(start_paused = true)]
async fn starting_a_second_poll_leaves_exactly_one_timer() {
    let api = Arc::new(CountingApi::default());
    let sink = Arc::new(TestSink::default());
    let mut poller = Poller::new();
    let handle = tokio::runtime::Handle::current();

    poller.start(
        &handle,
        api.clone(),
        sink.clone(),
        "task-a".to_string(),
        1,
        Duration::from_secs(1),
    );
    tokio::time::sleep(Duration::from_millis(2_500)).await;
    let fetched_before_switch = api.fetches("task-a");
    assert_eq!(fetched_before_switch, 2);

    poller.start(
        &handle,
        api.clone(),
        sink.clone(),
        "task-b".to_string(),
        2,
        Duration::from_secs(1),
    );
    tokio::time::sleep(Duration::from_millis(3_500)).await;

    assert_eq!(api.fetches("task-a"), fetched_before_switch);
    assert_eq!(api.fetches("task-b"), 3);
    assert_eq!(poller.active_ticket(), Some(2));
    assert_eq!(sink.tickets(), vec![1, 1, 2, 2, 2]);
}

#[tokio::test(start_paused = true)]
async fn cancel_is_idempotent() {
    let api = Arc::new(CountingApi::default());
    let sink = Arc::new(TestSink::default());
    let mut poller = Poller::new();
    assert!(!poller.cancel());

    poller.start(
        &tokio::runtime::Handle::current(),
        api.clone(),
        sink,
        "task-a".to_string(),
        7,
        Duration::from_secs(1),
    );
    assert!(poller.cancel());
    assert!(!poller.cancel());
    assert!(!poller.is_active());

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(api.fetches("task-a"), 0);
}

#[tokio::test(start_paused = true)]
async fn fetch_failures_do_not_stop_the_loop() {
    let api = Arc::new(CountingApi::failing());
    let sink = Arc::new(TestSink::default());
    let mut poller = Poller::new();

    poller.start(
        &tokio::runtime::Handle::current(),
        api.clone(),
        sink.clone(),
        "task-a".to_string(),
        3,
        Duration::from_secs(1),
    );
    tokio::time::sleep(Duration::from_millis(4_500)).await;

    assert_eq!(api.fetches("task-a"), 4);
    assert!(poller.is_active());
    let failures = sink
        .events
        .lock()
        .unwrap()
        .iter()
        .filter(|event| matches!(event, ClientEvent::LogsPolled { result: Err(_), .. }))
        .count();
    assert_eq!(failures, 4);
}

#[test]
fn handle_switches_polls_without_leaking_ticks() {
    let api = Arc::new(CountingApi::default());
    let (tx, rx) = mpsc::channel();
    let mut client = ClientHandle::with_api(
        api.clone(),
        Duration::from_millis(40),
        Arc::new(ChannelEventSink::new(tx)),
    )
    .expect("client");

    client.start_polling("task-a".to_string(), 1);
    client.start_polling("task-b".to_string(), 2);
    assert!(client.is_polling());

    let event = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("poll event");
    assert!(matches!(event, ClientEvent::LogsPolled { ticket: 2, .. }));

    assert!(client.stop_polling());
    assert!(!client.stop_polling());
    assert!(!client.is_polling());
    assert_eq!(api.fetches("task-a"), 0);
}

#[test]
fn handle_reports_request_outcomes_through_the_sink() {
    let (tx, rx) = mpsc::channel();
    let client = ClientHandle::with_api(
        Arc::new(CountingApi::default()),
        Duration::from_secs(1),
        Arc::new(ChannelEventSink::new(tx)),
    )
    .expect("client");

    client.ask_question("sess-1".to_string(), "why?".to_string());
    let event = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("answer event");
    match event {
        ClientEvent::Answered { question, result } => {
            assert_eq!(question, "why?");
            assert_eq!(result.unwrap_err().kind, FailureKind::Network);
        }
        other => panic!("unexpected event {other:?}"),
    }
}
