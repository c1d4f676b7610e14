use userlist_logging::{ul_debug, ul_info, ul_warn};

use crate::{Effect, ListEvent, ListState, Msg};

/// Pure update function: applies a message to state and returns any effects.
///
/// Notification effects come out in delivery order.
pub fn update(mut state: ListState, msg: Msg) -> (ListState, Vec<Effect>) {
    let effects = match msg {
        Msg::FetchRequested => {
            if let Some(request_id) = state.in_flight() {
                // Single-flight: the caller joins the fetch already running.
                ul_debug!("Fetch requested while request {} is in flight; coalescing", request_id);
                return (state, Vec::new());
            }
            let request_id = state.begin_fetch();
            ul_debug!("Starting fetch request {}", request_id);
            vec![
                Effect::Notify(ListEvent::LoadingChanged(true)),
                Effect::StartFetch { request_id },
            ]
        }
        Msg::FetchCompleted {
            request_id,
            outcome,
        } => {
            if state.in_flight() != Some(request_id) {
                ul_warn!(
                    "Ignoring completion for request {} (in flight: {:?})",
                    request_id,
                    state.in_flight()
                );
                return (state, Vec::new());
            }
            match outcome {
                Ok(users) => {
                    ul_info!("Request {} loaded {} users", request_id, users.len());
                    state.complete_with_users(users);
                    vec![
                        Effect::Notify(ListEvent::LoadingChanged(false)),
                        Effect::Notify(ListEvent::UsersUpdated),
                    ]
                }
                Err(failure) => {
                    ul_warn!("Request {} failed ({}): {}", request_id, failure.kind, failure);
                    let message = failure.message;
                    state.complete_with_error(message.clone());
                    vec![
                        Effect::Notify(ListEvent::LoadingChanged(false)),
                        Effect::Notify(ListEvent::Failed(message)),
                    ]
                }
            }
        }
    };

    (state, effects)
}
