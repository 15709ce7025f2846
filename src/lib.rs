//! Lifecycle-safe MVI helpers for screen-based UIs.
//!
//! - one-shot UI events ([`UiState`]) that survive observer re-attachment
//!   without firing twice
//! - click throttling ([`flow::throttle_first`], [`flow::throttle_latest`])
//! - text-input debouncing with switch-latest transforms
//!   ([`flow::debounce_input`])
//! - collection that follows a host lifecycle ([`flow::collect`],
//!   [`Scope`])
//!
//! Rendering, layout and the host's own lifecycle are out of scope: hosts
//! implement [`NotificationSink`] / [`BusyIndicator`] and mirror their
//! lifecycle into a [`Scope`].

pub mod config;
pub mod error;
pub mod flow;
pub mod host;
pub mod lifecycle;
pub mod logging;
pub mod mvi;
pub mod screen;

pub use config::{ConfigError, MviConfig, Settings};
pub use error::{FailureReporter, MviError};
pub use host::{BusyIndicator, IconRef, LogSink, NotificationSink};
pub use lifecycle::{LifecycleState, Scope};
pub use logging::{Logger, TracingLogger};
pub use mvi::{StateChannel, UiState, UiStateChannel, UiStateKind, ViewModel};
pub use screen::Screen;
