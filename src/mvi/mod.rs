//! Model-View-Intent building blocks.
//!
//! - [`UiState`]: one-shot envelope (`Init → Loading → Success/Error → End`)
//! - [`StateChannel`]: latest-value channel with replay-on-subscribe
//! - [`collect_ui_state`]: lifecycle-scoped, consume-once observation
//! - [`ViewModel`]: producer of loading, toast and business events
//! - [`Store`]: reducer-driven view state

mod channel;
mod hooks;
mod store;
mod ui_state;
mod view_model;

pub use channel::{StateChannel, UiStateChannel};
pub use hooks::{collect_ui_state, Consumption, UiStateHooks};
pub use store::{Intent, Reducer, Store, ViewState};
pub use ui_state::{ErrorInfo, UiState, UiStateKind};
pub use view_model::{LoadingMsg, ToastMsg, ViewModel};
