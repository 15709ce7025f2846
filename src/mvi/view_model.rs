//! View-model base: loading, toast and business channels.

use futures_core::Stream;
use futures_util::StreamExt;

use crate::config::Settings;
use crate::host::IconRef;
use crate::mvi::channel::UiStateChannel;

/// Toast request published on [`ViewModel::toasts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastMsg {
    pub message: String,
    pub icon: Option<IconRef>,
}

/// Loading indicator request published on [`ViewModel::loading`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingMsg {
    pub message: String,
    pub show: bool,
}

/// Producer side of a screen. `V` is the payload of the business channel.
///
/// All channels are single-writer: only the view-model emits, screens
/// observe.
pub struct ViewModel<V> {
    loading: UiStateChannel<LoadingMsg>,
    toasts: UiStateChannel<ToastMsg>,
    ui_state: UiStateChannel<V>,
    loading_message: String,
}

impl<V: Clone + Send + Sync + 'static> ViewModel<V> {
    pub fn new(settings: &Settings) -> Self {
        Self {
            loading: UiStateChannel::default(),
            toasts: UiStateChannel::default(),
            ui_state: UiStateChannel::default(),
            loading_message: settings.loading_message.clone(),
        }
    }

    pub fn loading(&self) -> &UiStateChannel<LoadingMsg> {
        &self.loading
    }

    pub fn toasts(&self) -> &UiStateChannel<ToastMsg> {
        &self.toasts
    }

    pub fn ui_state(&self) -> &UiStateChannel<V> {
        &self.ui_state
    }

    pub fn show_loading(&self, message: impl Into<String>) {
        self.loading.emit_success(
            LoadingMsg {
                message: message.into(),
                show: true,
            },
            "",
        );
    }

    pub fn show_default_loading(&self) {
        self.show_loading(self.loading_message.clone());
    }

    pub fn dismiss_loading(&self) {
        self.loading.emit_success(
            LoadingMsg {
                message: String::new(),
                show: false,
            },
            "",
        );
    }

    pub fn toast(&self, message: impl Into<String>) {
        self.toasts.emit_success(
            ToastMsg {
                message: message.into(),
                icon: None,
            },
            "",
        );
    }

    pub fn toast_with_icon(&self, message: impl Into<String>, icon: IconRef) {
        self.toasts.emit_success(
            ToastMsg {
                message: message.into(),
                icon: Some(icon),
            },
            "",
        );
    }

    /// Run a load with the standard loading/error wiring.
    ///
    /// Shows the default loading message, emits every item as `Success`
    /// on the business channel, emits the first failure as `Error` and
    /// stops. Loading is dismissed however this ends, including when the
    /// future is dropped.
    pub async fn run_simple<St>(&self, stream: St)
    where
        St: Stream<Item = anyhow::Result<V>>,
    {
        self.show_default_loading();
        let _dismiss = scopeguard::guard((), |()| self.dismiss_loading());

        tokio::pin!(stream);
        while let Some(item) = stream.next().await {
            match item {
                Ok(value) => self.ui_state.emit_success(value, ""),
                Err(err) => {
                    self.ui_state.emit_error(err, None, "");
                    break;
                }
            }
        }
    }
}
