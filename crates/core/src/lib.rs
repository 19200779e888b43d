//! gallery-search — search controller for a media gallery.
//!
//! The controller is headless: it owns a view model and drives injected
//! collaborators (renderer, lightbox, history, infinite scroll, status
//! surface) plus a [`backend::SearchBackend`].
//!
//! # Modules
//!
//! - [`controller`] — search lifecycle, suggestions, pagination, history bookkeeping
//! - [`backend`] — backend trait and the reqwest-based HTTP client
//! - [`collaborators`] — traits for the capabilities the controller consumes
//! - [`view`] — inputs, dropdown, results panel and counter state
//! - [`keys`] — global keyboard shortcut routing
//! - [`debounce`] — keystroke debouncing on the tokio clock
//! - [`config`] — `.gallery-search.toml` loading
//! - [`types`] — wire types and shared constants

pub mod backend;
pub mod collaborators;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod keys;
pub mod types;
pub mod view;

pub use backend::{BackendError, HttpBackend, SearchBackend};
pub use collaborators::Collaborators;
pub use config::SearchConfig;
pub use controller::{SearchController, SearchError};
