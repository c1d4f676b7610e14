use std::sync::Arc;

use userlist_core::{FailureKind, FetchFailure, FetchOutcome};
use userlist_logging::{ul_debug, ul_info, ul_warn};

use crate::decode::decode_users;
use crate::repository::UserSource;
use crate::transport::{ReqwestTransport, Transport, TransportError, TransportSettings};

/// Transport plus decoder behind a single `fetch_users` call.
///
/// Every failure comes back as a [`FetchFailure`]; nothing escapes as a panic
/// or a different error type.
#[derive(Clone)]
pub struct FetchService {
    transport: Arc<dyn Transport>,
    endpoint: String,
}

impl FetchService {
    pub fn new(transport: Arc<dyn Transport>, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
        }
    }

    pub fn from_settings(settings: &TransportSettings) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::from_settings(settings)?;
        Ok(Self::new(Arc::new(transport), settings.endpoint.clone()))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One transport attempt, then decode. No retries.
    pub async fn fetch_users(&self) -> FetchOutcome {
        ul_debug!("Fetching users from {}", self.endpoint);
        let bytes = self.transport.get(&self.endpoint).await.map_err(|err| {
            ul_warn!("Transport failed for {}: {}", self.endpoint, err);
            FetchFailure::new(err.kind(), err.to_string())
        })?;

        let users = decode_users(&bytes).map_err(|err| {
            ul_warn!(
                "Decoding {} bytes from {} failed at {}:{}: {}",
                bytes.len(),
                self.endpoint,
                err.line,
                err.column,
                err.message
            );
            FetchFailure::new(FailureKind::Decode, err.to_string())
        })?;

        ul_info!("Fetched {} users from {}", users.len(), self.endpoint);
        Ok(users)
    }
}

#[async_trait::async_trait]
impl UserSource for FetchService {
    async fn get_users(&self) -> FetchOutcome {
        self.fetch_users().await
    }
}
