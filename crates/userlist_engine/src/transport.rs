use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;
use userlist_core::FailureKind;
use userlist_logging::{ul_debug, ul_warn};

/// The users endpoint the app reads from.
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportSettings {
    pub endpoint: String,
    /// `None` keeps the HTTP client's default.
    pub connect_timeout: Option<Duration>,
    /// `None` keeps the HTTP client's default.
    pub request_timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: None,
            request_timeout: None,
            user_agent: concat!("userlist/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),
    #[error("{0}")]
    Network(String),
    #[error("No data received from the server")]
    EmptyResponse,
}

impl TransportError {
    pub fn kind(&self) -> FailureKind {
        match self {
            TransportError::InvalidUrl(_) => FailureKind::InvalidUrl,
            TransportError::Network(_) => FailureKind::Network,
            TransportError::EmptyResponse => FailureKind::EmptyResponse,
        }
    }
}

/// Issues one GET and hands back the raw body.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<Bytes, TransportError>;
}

/// [`Transport`] over an injected `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn from_settings(settings: &TransportSettings) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().user_agent(settings.user_agent.clone());
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| TransportError::Network(err.to_string()))?;
        Ok(Self::new(client))
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<Bytes, TransportError> {
        let parsed =
            url::Url::parse(url).map_err(|err| TransportError::InvalidUrl(err.to_string()))?;

        ul_debug!("GET {}", parsed);
        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        // The status is not judged here; an error page fails in the decoder.
        let status = response.status();
        if !status.is_success() {
            ul_warn!("GET {} returned {}", url, status);
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        if body.is_empty() {
            return Err(TransportError::EmptyResponse);
        }
        Ok(body)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_builder() {
        return TransportError::InvalidUrl(err.to_string());
    }
    TransportError::Network(err.to_string())
}
