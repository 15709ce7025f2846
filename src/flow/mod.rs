//! Stream plumbing between UI triggers, view-model channels and callbacks.
//!
//! ```text
//! Trigger ──→ throttle / debounce ──→ callback ──→ ViewModel channel
//!                                                        │
//!          Scope (active?) ←── collect ←─────────────────┘
//! ```

mod collect;
mod debounce;
mod throttle;
mod trigger;

pub use collect::{collect, safe_collect};
pub use debounce::debounce_input;
pub use throttle::{
    throttle_first, throttle_latest, ThrottleConfig, ThrottleGate, INPUT_DEBOUNCE_WINDOW,
    THROTTLE_FIRST_WINDOW, THROTTLE_LATEST_WINDOW,
};
pub use trigger::{Emitter, Trigger, TriggerSource};
