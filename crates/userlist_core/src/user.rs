use serde::{Deserialize, Serialize};

/// A single user as served by the users endpoint.
///
/// Fields beyond these five (the live endpoint also returns `username`,
/// `address` and `company`) are ignored when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub website: String,
}

impl UserRecord {
    /// First character of each space-separated word of the name.
    pub fn initials(&self) -> String {
        initials(&self.name)
    }
}

pub(crate) fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|word| word.chars().next())
        .collect()
}
