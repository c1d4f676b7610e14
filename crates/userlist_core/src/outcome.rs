use std::fmt;

use crate::UserRecord;

/// Result of one pass through the fetch pipeline.
pub type FetchOutcome = Result<Vec<UserRecord>, FetchFailure>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Network,
    EmptyResponse,
    Decode,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::EmptyResponse => write!(f, "empty response"),
            FailureKind::Decode => write!(f, "decode error"),
        }
    }
}

/// A failed fetch, carried as data rather than raised.
///
/// `message` is what the view layer shows verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchFailure {
    /// An empty message is replaced with the kind's label so the user
    /// always has something to read.
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            kind.to_string()
        } else {
            message
        };
        Self { kind, message }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FetchFailure {}
