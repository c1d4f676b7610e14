#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use userlist_core::{FetchOutcome, UserRecord};
use userlist_engine::{Transport, TransportError, UserSource};

pub const ADA_JSON: &str =
    r#"[{"id":1,"name":"Ada Lovelace","email":"ada@x.com","phone":"555","website":"ada.dev"}]"#;

pub fn ada() -> UserRecord {
    UserRecord {
        id: 1,
        name: "Ada Lovelace".to_string(),
        email: "ada@x.com".to_string(),
        phone: "555".to_string(),
        website: "ada.dev".to_string(),
    }
}

/// Transport that replays one canned result and counts calls.
pub struct FakeTransport {
    response: Result<Bytes, TransportError>,
    pub calls: AtomicUsize,
}

impl FakeTransport {
    pub fn body(body: &str) -> Self {
        Self {
            response: Ok(Bytes::copy_from_slice(body.as_bytes())),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(err: TransportError) -> Self {
        Self {
            response: Err(err),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl Transport for FakeTransport {
    async fn get(&self, _url: &str) -> Result<Bytes, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

/// Source that waits a little before answering, so overlapping fetches can be observed.
pub struct SlowSource {
    outcome: FetchOutcome,
    delay: Duration,
    pub calls: Arc<AtomicUsize>,
}

impl SlowSource {
    pub fn new(outcome: FetchOutcome, delay: Duration) -> Self {
        Self {
            outcome,
            delay,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait::async_trait]
impl UserSource for SlowSource {
    async fn get_users(&self) -> FetchOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.outcome.clone()
    }
}

/// Source whose first call panics; later calls answer normally.
pub struct PanicOnceSource {
    users: Vec<UserRecord>,
    pub calls: Arc<AtomicUsize>,
}

impl PanicOnceSource {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self {
            users,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait::async_trait]
impl UserSource for PanicOnceSource {
    async fn get_users(&self) -> FetchOutcome {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            panic!("source blew up");
        }
        Ok(self.users.clone())
    }
}
