//! Process-wide session state store.

use std::sync::RwLock;

use tokio::sync::watch;

use super::state::{AppState, Action, reduce};

/// Single source of truth for [`AppState`].
///
/// Mutation happens only through [`dispatch`](Self::dispatch), which runs
/// the pure reducer and publishes the new state on a watch channel for
/// observers (the view layer). Dispatch is synchronous so provider
/// session listeners can call it from non-async callbacks; the write lock
/// is held only for the reduction itself.
#[derive(Debug)]
pub struct SessionStore {
    state: RwLock<AppState>,
    publisher: watch::Sender<AppState>,
}

impl SessionStore {
    /// Creates a store holding the initial state.
    #[must_use]
    pub fn new() -> Self {
        let initial = AppState::initial();
        let (publisher, _) = watch::channel(initial.clone());
        Self {
            state: RwLock::new(initial),
            publisher,
        }
    }

    /// Applies an action and publishes the resulting state.
    pub fn dispatch(&self, action: Action) {
        let Ok(mut state) = self.state.write() else {
            // Poisoned only if a reducer panicked; drop the action.
            return;
        };
        let next = reduce(state.clone(), action);
        *state = next.clone();
        drop(state);
        // Send fails only with zero receivers, which is fine.
        let _ = self.publisher.send(next);
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> AppState {
        self.state
            .read()
            .map_or_else(|_| AppState::initial(), |state| state.clone())
    }

    /// Subscribes to state changes. The receiver immediately holds the
    /// current state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.publisher.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
