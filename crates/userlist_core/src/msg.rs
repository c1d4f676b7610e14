use crate::{FetchOutcome, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Initial load, pull-to-refresh or retry.
    FetchRequested,
    /// Engine completion for a fetch.
    FetchCompleted {
        request_id: RequestId,
        outcome: FetchOutcome,
    },
}
