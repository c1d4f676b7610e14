use thiserror::Error;
use userlist_core::UserRecord;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("The data couldn't be read: {message}")]
pub struct DecodeError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

/// Decode a JSON array of users, all or nothing, preserving input order.
pub fn decode_users(bytes: &[u8]) -> Result<Vec<UserRecord>, DecodeError> {
    Ok(serde_json::from_slice(bytes)?)
}
