use userlist_core::{FetchOutcome, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    FetchCompleted {
        request_id: RequestId,
        outcome: FetchOutcome,
    },
}
