use crate::view_model::{ListViewModel, UserRowView, LIST_TITLE};
use crate::{RequestId, UserRecord, UserDetailViewModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListState {
    users: Vec<UserRecord>,
    phase: ListPhase,
    last_error: Option<String>,
    in_flight: Option<RequestId>,
    next_request_id: RequestId,
    dirty: bool,
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn phase(&self) -> ListPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ListPhase::Loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn view(&self) -> ListViewModel {
        ListViewModel {
            title: LIST_TITLE.to_string(),
            rows: self.users.iter().map(UserRowView::from_record).collect(),
            is_loading: self.is_loading(),
            error: self.last_error.clone(),
            show_error: self.phase == ListPhase::Failed,
            dirty: self.dirty,
        }
    }

    /// Detail view-model for the row the user selected, if it exists.
    pub fn detail(&self, index: usize) -> Option<UserDetailViewModel> {
        self.users.get(index).cloned().map(UserDetailViewModel::new)
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn begin_fetch(&mut self) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.phase = ListPhase::Loading;
        self.in_flight = Some(request_id);
        self.dirty = true;
        request_id
    }

    pub(crate) fn complete_with_users(&mut self, users: Vec<UserRecord>) {
        self.users = users;
        self.phase = ListPhase::Loaded;
        self.last_error = None;
        self.in_flight = None;
        self.dirty = true;
    }

    pub(crate) fn complete_with_error(&mut self, message: String) {
        self.phase = ListPhase::Failed;
        self.last_error = Some(message);
        self.in_flight = None;
        self.dirty = true;
    }
}
