//! Session state store.
//!
//! A pure reducer over [`AppState`] plus the process-wide [`SessionStore`]
//! that serializes dispatches and publishes every new state to observers.

mod session_store;
mod state;

pub use session_store::SessionStore;
pub use state::{Action, AppState, reduce};
