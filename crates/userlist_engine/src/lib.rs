//! UserList engine: fetch pipeline, user sources and the list controller.
mod controller;
mod decode;
mod engine;
mod repository;
mod service;
mod transport;
mod types;

pub use controller::{ListController, ListObserver, SubscriptionId};
pub use decode::{decode_users, DecodeError};
pub use engine::EngineHandle;
pub use repository::{UserRepository, UserSource};
pub use service::FetchService;
pub use transport::{
    ReqwestTransport, Transport, TransportError, TransportSettings, DEFAULT_ENDPOINT,
};
pub use types::EngineEvent;
