/// Notifications the list controller delivers to its observers.
///
/// For one fetch the order is always `LoadingChanged(true)`, then
/// `LoadingChanged(false)`, then exactly one of `UsersUpdated` or `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    LoadingChanged(bool),
    UsersUpdated,
    Failed(String),
}
