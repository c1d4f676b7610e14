use crate::{ListEvent, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one fetch through the user source.
    StartFetch { request_id: RequestId },
    /// Deliver a notification to observers, in order.
    Notify(ListEvent),
}
