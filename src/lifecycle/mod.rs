//! Host-driven lifecycle scopes.
//!
//! The host owns the real lifecycle (activity, window, view) and mirrors it
//! into a [`Scope`] with [`Scope::move_to`]. Everything in this crate only
//! looks at the current state and state changes.

mod scope;

pub(crate) use scope::Pass;
pub use scope::Scope;

/// Lifecycle states, ordered so that `a >= b` means "at least as alive as".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LifecycleState {
    Destroyed,
    Initialized,
    Created,
    Started,
    Resumed,
}

impl LifecycleState {
    pub fn is_at_least(self, other: LifecycleState) -> bool {
        self >= other
    }

    pub fn is_terminal(self) -> bool {
        self == LifecycleState::Destroyed
    }
}
