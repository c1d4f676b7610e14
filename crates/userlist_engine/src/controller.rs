//! List controller: owns the list state and delivers notifications.
//!
//! All state changes and observer callbacks happen inside `ListController`
//! methods, on the thread that owns the controller. Network work runs on the
//! engine's runtime and only comes back through [`ListController::process_pending`]
//! or [`ListController::wait_for_idle`].

use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

use userlist_core::{
    update, Effect, ListEvent, ListPhase, ListState, ListViewModel, Msg, UserDetailViewModel,
    UserRecord,
};
use userlist_logging::{ul_debug, ul_trace};

use crate::engine::EngineHandle;
use crate::repository::UserSource;
use crate::EngineEvent;

/// Identifies one subscription on a [`ListController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Receives list notifications.
///
/// Implement the three callbacks, or override [`ListObserver::on_event`] to
/// consume the typed event stream directly. Returning `false` from `on_event`
/// ends the subscription.
pub trait ListObserver {
    fn on_users_updated(&mut self) {}

    fn on_loading_state_changed(&mut self, _is_loading: bool) {}

    fn on_error(&mut self, _message: &str) {}

    fn on_event(&mut self, event: &ListEvent) -> bool {
        match event {
            ListEvent::LoadingChanged(is_loading) => self.on_loading_state_changed(*is_loading),
            ListEvent::UsersUpdated => self.on_users_updated(),
            ListEvent::Failed(message) => self.on_error(message),
        }
        true
    }
}

/// Stays subscribed until the receiving end is dropped.
impl ListObserver for mpsc::Sender<ListEvent> {
    fn on_event(&mut self, event: &ListEvent) -> bool {
        self.send(event.clone()).is_ok()
    }
}

pub struct ListController {
    state: ListState,
    engine: EngineHandle,
    observers: Vec<(SubscriptionId, Box<dyn ListObserver>)>,
    next_subscription: u64,
}

impl ListController {
    pub fn new(source: Arc<dyn UserSource>) -> Self {
        Self::with_engine(EngineHandle::new(source))
    }

    pub fn with_engine(engine: EngineHandle) -> Self {
        Self {
            state: ListState::new(),
            engine,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn subscribe(&mut self, observer: impl ListObserver + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns whether the subscription was still active.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Starts a fetch, or joins the one already in flight.
    pub fn fetch(&mut self) {
        self.dispatch(Msg::FetchRequested);
    }

    /// Applies every completion that has arrived so far. Returns how many.
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.engine.try_recv() {
            self.apply_engine_event(event);
            applied += 1;
        }
        applied
    }

    /// Blocks until no fetch is in flight or `timeout` elapses.
    ///
    /// Returns `true` when the controller is idle. A timeout too large to
    /// represent as a deadline waits without one.
    pub fn wait_for_idle(&mut self, timeout: Duration) -> bool {
        self.process_pending();
        let deadline = Instant::now().checked_add(timeout);
        while self.state.is_loading() {
            let event = match deadline {
                Some(deadline) => self
                    .engine
                    .recv_timeout(deadline.saturating_duration_since(Instant::now())),
                None => self.engine.recv(),
            };
            match event {
                Some(event) => self.apply_engine_event(event),
                None => break,
            }
        }
        !self.state.is_loading()
    }

    pub fn users(&self) -> &[UserRecord] {
        self.state.users()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn phase(&self) -> ListPhase {
        self.state.phase()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.state.last_error()
    }

    pub fn view(&self) -> ListViewModel {
        self.state.view()
    }

    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    pub fn detail(&self, index: usize) -> Option<UserDetailViewModel> {
        self.state.detail(index)
    }

    fn apply_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::FetchCompleted {
                request_id,
                outcome,
            } => self.dispatch(Msg::FetchCompleted {
                request_id,
                outcome,
            }),
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        for effect in effects {
            match effect {
                Effect::Notify(event) => {
                    ul_trace!("Notifying {} observers: {:?}", self.observers.len(), event);
                    self.observers.retain_mut(|(id, observer)| {
                        let keep = observer.on_event(&event);
                        if !keep {
                            ul_debug!("Dropping closed observer {:?}", id);
                        }
                        keep
                    });
                }
                Effect::StartFetch { request_id } => self.engine.fetch(request_id),
            }
        }
    }
}
