use crate::UserRecord;

pub const LIST_TITLE: &str = "Users";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListViewModel {
    pub title: String,
    pub rows: Vec<UserRowView>,
    pub is_loading: bool,
    pub error: Option<String>,
    /// True while the last fetch failed; the view shows `error` with a retry action.
    pub show_error: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRowView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub initials: String,
}

impl UserRowView {
    pub fn from_record(user: &UserRecord) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            initials: user.initials(),
        }
    }
}
