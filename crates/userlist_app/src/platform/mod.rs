//! Headless front-end: drives the list controller from stdin and renders
//! its view-models as text.
mod app;
mod input;
mod render;

pub use app::run_app;
