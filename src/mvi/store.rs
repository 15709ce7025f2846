//! Intent → Reducer → State loop.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```

use crate::mvi::channel::StateChannel;

/// Marker for user actions and system events fed to a [`Reducer`].
pub trait Intent: Send + 'static {}

/// Marker for view state: cloned to render, compared to detect changes.
pub trait ViewState: Clone + PartialEq + Default + Send + Sync + 'static {}

/// The only place where state transitions happen.
pub trait Reducer {
    type State: ViewState;
    type Intent: Intent;

    /// Pure `(State, Intent) -> State`.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}

/// Holds the state of one reducer and publishes it on a [`StateChannel`].
pub struct Store<R: Reducer> {
    state: StateChannel<R::State>,
}

impl<R: Reducer> Store<R> {
    pub fn new() -> Self {
        Self::with_state(R::State::default())
    }

    pub fn with_state(state: R::State) -> Self {
        Self {
            state: StateChannel::new(state),
        }
    }

    /// Run the reducer on the current state.
    ///
    /// Observers are only woken when the state actually changed.
    pub fn dispatch(&self, intent: R::Intent) {
        self.state.update_if(|state| {
            let next = R::reduce(state.clone(), intent);
            if next == *state {
                return false;
            }
            *state = next;
            true
        });
    }

    pub fn state(&self) -> R::State {
        self.state.value()
    }

    /// Channel to observe, e.g. with [`crate::flow::collect`].
    pub fn channel(&self) -> &StateChannel<R::State> {
        &self.state
    }
}

impl<R: Reducer> Default for Store<R> {
    fn default() -> Self {
        Self::new()
    }
}
