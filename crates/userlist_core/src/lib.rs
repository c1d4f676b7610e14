//! UserList core: data model, pure list state machine and view-model helpers.
mod detail;
mod effect;
mod event;
mod msg;
mod outcome;
mod state;
mod update;
mod user;
mod view_model;

pub type RequestId = u64;

pub use detail::{InfoRow, UserDetailViewModel};
pub use effect::Effect;
pub use event::ListEvent;
pub use msg::Msg;
pub use outcome::{FailureKind, FetchFailure, FetchOutcome};
pub use state::{ListPhase, ListState};
pub use update::update;
pub use user::UserRecord;
pub use view_model::{ListViewModel, UserRowView, LIST_TITLE};
