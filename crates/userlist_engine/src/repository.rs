use userlist_core::FetchOutcome;

use crate::service::FetchService;

/// Anything that can produce the user list asynchronously.
///
/// The list controller only sees this trait, so a cache-backed or
/// multi-endpoint source can replace [`UserRepository`] without touching it.
#[async_trait::async_trait]
pub trait UserSource: Send + Sync {
    async fn get_users(&self) -> FetchOutcome;
}

/// Direct delegate to a [`FetchService`].
#[derive(Clone)]
pub struct UserRepository {
    service: FetchService,
}

impl UserRepository {
    pub fn new(service: FetchService) -> Self {
        Self { service }
    }
}

#[async_trait::async_trait]
impl UserSource for UserRepository {
    async fn get_users(&self) -> FetchOutcome {
        self.service.fetch_users().await
    }
}
