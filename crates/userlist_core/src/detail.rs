//! Read-only view-model for the user detail screen.

use crate::UserRecord;

/// One labelled line on the detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRow {
    pub label: &'static str,
    pub value: String,
}

/// Holds exactly one user for the lifetime of the detail view.
///
/// There is no fetching, mutation or error state here; the record comes from
/// the list that was already loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetailViewModel {
    user: UserRecord,
}

impl UserDetailViewModel {
    pub fn new(user: UserRecord) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &UserRecord {
        &self.user
    }

    /// Screen title.
    pub fn title(&self) -> &str {
        &self.user.name
    }

    pub fn initials(&self) -> String {
        self.user.initials()
    }

    /// Name, email, phone and website, in display order.
    pub fn info_rows(&self) -> Vec<InfoRow> {
        vec![
            InfoRow {
                label: "Name",
                value: self.user.name.clone(),
            },
            InfoRow {
                label: "Email",
                value: self.user.email.clone(),
            },
            InfoRow {
                label: "Phone",
                value: self.user.phone.clone(),
            },
            InfoRow {
                label: "Website",
                value: self.user.website.clone(),
            },
        ]
    }

    pub fn into_user(self) -> UserRecord {
        self.user
    }
}
