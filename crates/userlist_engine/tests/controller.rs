mod common;

use std::sync::atomic::Ordering;
use std::sync::mpsc;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use common::{ada, FakeTransport, PanicOnceSource, SlowSource, ADA_JSON};
use pretty_assertions::assert_eq;
use userlist_core::{FailureKind, FetchFailure, ListEvent, ListPhase};
use userlist_engine::{FetchService, ListController, ListObserver, TransportError, UserRepository};

const WAIT: Duration = Duration::from_secs(5);

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(userlist_logging::initialize_for_tests);
}

fn controller_over(transport: Arc<FakeTransport>) -> ListController {
    let service = FetchService::new(transport, "https://users.test/users");
    ListController::new(Arc::new(UserRepository::new(service)))
}

fn subscribe_channel(controller: &mut ListController) -> mpsc::Receiver<ListEvent> {
    let (tx, rx) = mpsc::channel();
    controller.subscribe(tx);
    rx
}

#[test]
fn scenario_single_user_loads() {
    init_logging();
    let mut controller = controller_over(Arc::new(FakeTransport::body(ADA_JSON)));
    let events = subscribe_channel(&mut controller);

    controller.fetch();
    assert!(controller.wait_for_idle(WAIT));

    assert_eq!(controller.users(), &[ada()]);
    assert_eq!(controller.phase(), ListPhase::Loaded);
    assert_eq!(
        events.try_iter().collect::<Vec<_>>(),
        vec![
            ListEvent::LoadingChanged(true),
            ListEvent::LoadingChanged(false),
            ListEvent::UsersUpdated,
        ]
    );
}

#[test]
fn scenario_object_payload_reports_error_and_keeps_users() {
    init_logging();
    let mut controller = controller_over(Arc::new(FakeTransport::body(r#"{"error":"boom"}"#)));
    let events = subscribe_channel(&mut controller);

    controller.fetch();
    assert!(controller.wait_for_idle(WAIT));

    assert!(controller.users().is_empty());
    assert_eq!(controller.phase(), ListPhase::Failed);
    let events: Vec<_> = events.try_iter().collect();
    assert_eq!(events.len(), 3);
    assert_eq!(events[1], ListEvent::LoadingChanged(false));
    match &events[2] {
        ListEvent::Failed(message) => {
            assert!(!message.is_empty());
            assert_eq!(controller.last_error(), Some(message.as_str()));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn scenario_connection_failure_ends_not_loading() {
    init_logging();
    let transport = Arc::new(FakeTransport::failing(TransportError::Network(
        "Could not connect to the server.".to_string(),
    )));
    let mut controller = controller_over(transport);
    let events = subscribe_channel(&mut controller);

    controller.fetch();
    assert!(controller.wait_for_idle(WAIT));

    assert!(!controller.is_loading());
    assert_eq!(
        events.try_iter().last(),
        Some(ListEvent::Failed("Could not connect to the server.".to_string()))
    );
    let view = controller.view();
    assert!(view.show_error);
    assert_eq!(view.error.as_deref(), Some("Could not connect to the server."));
}

#[test]
fn loading_is_set_before_first_notification() {
    init_logging();
    let source = SlowSource::new(Ok(vec![ada()]), Duration::from_millis(100));
    let mut controller = ListController::new(Arc::new(source));
    let events = subscribe_channel(&mut controller);

    controller.fetch();

    assert!(controller.is_loading());
    assert_eq!(events.try_recv(), Ok(ListEvent::LoadingChanged(true)));
    assert!(events.try_recv().is_err());

    assert!(controller.wait_for_idle(WAIT));
    assert_eq!(events.try_recv(), Ok(ListEvent::LoadingChanged(false)));
    assert_eq!(events.try_recv(), Ok(ListEvent::UsersUpdated));
}

#[test]
fn overlapping_fetches_share_one_request() {
    init_logging();
    let source = SlowSource::new(Ok(vec![ada()]), Duration::from_millis(100));
    let calls = source.calls.clone();
    let mut controller = ListController::new(Arc::new(source));
    let events = subscribe_channel(&mut controller);

    controller.fetch();
    controller.fetch();
    assert!(controller.wait_for_idle(WAIT));

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        events.try_iter().collect::<Vec<_>>(),
        vec![
            ListEvent::LoadingChanged(true),
            ListEvent::LoadingChanged(false),
            ListEvent::UsersUpdated,
        ]
    );
}

#[test]
fn sequential_fetches_leave_users_identical() {
    init_logging();
    let transport = Arc::new(FakeTransport::body(ADA_JSON));
    let mut controller = controller_over(transport.clone());

    controller.fetch();
    assert!(controller.wait_for_idle(WAIT));
    let first = controller.users().to_vec();

    controller.fetch();
    assert!(controller.wait_for_idle(WAIT));

    assert_eq!(controller.users(), first.as_slice());
    assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn retry_after_failure_recovers() {
    init_logging();
    let failing = SlowSource::new(
        Err(FetchFailure::new(FailureKind::Network, "offline")),
        Duration::ZERO,
    );
    let mut controller = ListController::new(Arc::new(failing));

    controller.fetch();
    assert!(controller.wait_for_idle(WAIT));
    assert_eq!(controller.phase(), ListPhase::Failed);
    assert!(controller.consume_dirty());

    // Fetch again from Failed: a new cycle starts.
    controller.fetch();
    assert!(controller.is_loading());
    assert!(controller.wait_for_idle(WAIT));
    assert_eq!(controller.phase(), ListPhase::Failed);
}

#[derive(Default)]
struct Recorded {
    calls: Vec<String>,
}

struct CallbackObserver(Arc<Mutex<Recorded>>);

impl ListObserver for CallbackObserver {
    fn on_users_updated(&mut self) {
        self.0.lock().unwrap().calls.push("users_updated".to_string());
    }

    fn on_loading_state_changed(&mut self, is_loading: bool) {
        self.0
            .lock()
            .unwrap()
            .calls
            .push(format!("loading:{is_loading}"));
    }

    fn on_error(&mut self, message: &str) {
        self.0.lock().unwrap().calls.push(format!("error:{message}"));
    }
}

#[test]
fn callback_observer_receives_each_notification_once() {
    init_logging();
    let recorded = Arc::new(Mutex::new(Recorded::default()));
    let mut controller = controller_over(Arc::new(FakeTransport::body(ADA_JSON)));
    controller.subscribe(CallbackObserver(recorded.clone()));

    controller.fetch();
    assert!(controller.wait_for_idle(WAIT));

    assert_eq!(
        recorded.lock().unwrap().calls,
        vec!["loading:true", "loading:false", "users_updated"]
    );
}

#[test]
fn process_pending_applies_completions_without_blocking() {
    init_logging();
    let mut controller = controller_over(Arc::new(FakeTransport::body(ADA_JSON)));
    assert_eq!(controller.process_pending(), 0);

    controller.fetch();
    let mut applied = 0;
    for _ in 0..250 {
        applied += controller.process_pending();
        if !controller.is_loading() {
            break;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    assert_eq!(applied, 1);
    assert_eq!(controller.users().len(), 1);
}

#[test]
fn detail_for_selected_row_needs_no_fetch() {
    init_logging();
    let transport = Arc::new(FakeTransport::body(ADA_JSON));
    let mut controller = controller_over(transport.clone());
    controller.fetch();
    assert!(controller.wait_for_idle(WAIT));

    let detail = controller.detail(0).expect("row 0");

    assert_eq!(detail.user(), &ada());
    assert_eq!(detail.initials(), "AL");
    assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn crashed_fetch_reports_failure_and_retry_loads() {
    init_logging();
    let source = PanicOnceSource::new(vec![ada()]);
    let calls = source.calls.clone();
    let mut controller = ListController::new(Arc::new(source));
    let events = subscribe_channel(&mut controller);

    controller.fetch();
    assert!(controller.wait_for_idle(WAIT));

    assert_eq!(controller.phase(), ListPhase::Failed);
    let first: Vec<_> = events.try_iter().collect();
    assert_eq!(first.len(), 3);
    assert_eq!(first[1], ListEvent::LoadingChanged(false));
    match &first[2] {
        ListEvent::Failed(message) => assert!(message.contains("crashed"), "{message}"),
        other => panic!("expected failure, got {other:?}"),
    }

    controller.fetch();
    assert!(controller.wait_for_idle(WAIT));

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(controller.users(), &[ada()]);
    assert_eq!(events.try_iter().last(), Some(ListEvent::UsersUpdated));
}

#[test]
fn failed_source_outcome_reaches_observers_in_order() {
    init_logging();
    let failing = SlowSource::new(
        Err(FetchFailure::new(FailureKind::EmptyResponse, "No data received from the server")),
        Duration::ZERO,
    );
    let mut controller = ListController::new(Arc::new(failing));
    let events = subscribe_channel(&mut controller);

    controller.fetch();
    assert!(controller.wait_for_idle(WAIT));

    assert_eq!(
        events.try_iter().collect::<Vec<_>>(),
        vec![
            ListEvent::LoadingChanged(true),
            ListEvent::LoadingChanged(false),
            ListEvent::Failed("No data received from the server".to_string()),
        ]
    );
}

#[test]
fn unbounded_wait_does_not_overflow() {
    init_logging();
    let mut controller = controller_over(Arc::new(FakeTransport::body(ADA_JSON)));

    controller.fetch();

    assert!(controller.wait_for_idle(Duration::MAX));
    assert_eq!(controller.users().len(), 1);
}

#[test]
fn closed_channel_observer_is_dropped() {
    init_logging();
    let mut controller = controller_over(Arc::new(FakeTransport::body(ADA_JSON)));
    let events = subscribe_channel(&mut controller);
    let kept = subscribe_channel(&mut controller);
    drop(events);
    assert_eq!(controller.observer_count(), 2);

    controller.fetch();
    assert!(controller.wait_for_idle(WAIT));

    assert_eq!(controller.observer_count(), 1);
    assert_eq!(kept.try_iter().count(), 3);
}

#[test]
fn unsubscribed_observer_gets_nothing() {
    init_logging();
    let mut controller = controller_over(Arc::new(FakeTransport::body(ADA_JSON)));
    let (tx, rx) = mpsc::channel();
    let id = controller.subscribe(tx);

    assert!(controller.unsubscribe(id));
    assert!(!controller.unsubscribe(id));

    controller.fetch();
    assert!(controller.wait_for_idle(WAIT));
    assert!(rx.try_recv().is_err());
}
