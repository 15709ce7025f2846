//! Binds a view-model to a host screen.
//!
//! A [`Screen`] wires the view-model's loading and toast channels to the
//! host's indicator and sink, follows the host lifecycle through its
//! [`Scope`], and offers the throttle/debounce/collect helpers with the
//! configured default windows.

use std::future::Future;
use std::sync::Arc;

use futures_core::Stream;
use tokio::task::JoinHandle;

use crate::config::MviConfig;
use crate::error::FailureReporter;
use crate::flow::{self, TriggerSource};
use crate::host::{BusyIndicator, NotificationSink};
use crate::lifecycle::{LifecycleState, Scope};
use crate::logging::Logger;
use crate::mvi::{
    collect_ui_state, Consumption, LoadingMsg, StateChannel, ToastMsg, UiState, UiStateChannel,
    UiStateHooks, ViewModel,
};

/// State from which screen collectors are active.
pub const DEFAULT_ACTIVE_STATE: LifecycleState = LifecycleState::Started;

pub struct Screen<V> {
    scope: Scope,
    config: MviConfig,
    view_model: Arc<ViewModel<V>>,
    sink: Arc<dyn NotificationSink>,
    busy: Arc<dyn BusyIndicator>,
}

impl<V: Clone + Send + Sync + 'static> Screen<V> {
    /// Attach `view_model` to the screen whose lifecycle `scope` mirrors.
    ///
    /// Must be called from within a tokio runtime.
    pub fn bind(
        scope: Scope,
        config: MviConfig,
        view_model: Arc<ViewModel<V>>,
        sink: Arc<dyn NotificationSink>,
        busy: Arc<dyn BusyIndicator>,
    ) -> Self {
        let screen = Self {
            scope,
            config,
            view_model,
            sink,
            busy,
        };
        screen.observe_lifecycle();
        screen.subscribe_loading();
        screen.subscribe_toasts();
        screen
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn view_model(&self) -> &Arc<ViewModel<V>> {
        &self.view_model
    }

    /// Reporter that logs failures and shows them as toasts.
    pub fn reporter(&self) -> FailureReporter {
        self.config.reporter_with_sink(Arc::clone(&self.sink))
    }

    pub fn toast(&self, message: impl Into<String>) {
        self.view_model.toast(message);
    }

    pub fn show_loading(&self, message: impl Into<String>) {
        self.view_model.show_loading(message);
    }

    pub fn show_default_loading(&self) {
        self.view_model.show_default_loading();
    }

    pub fn dismiss_loading(&self) {
        self.view_model.dismiss_loading();
    }

    /// Click throttling with the configured window. Source failures are
    /// logged, not shown.
    pub fn throttle_first<T, S, F>(&self, source: S, on_trigger: F) -> JoinHandle<()>
    where
        T: Send + 'static,
        S: TriggerSource<T>,
        F: FnMut() + Send + 'static,
    {
        let config = self.config.settings().windows.throttle_first_config();
        flow::throttle_first(source, &self.scope, config, self.config.reporter(), on_trigger)
    }

    pub fn throttle_latest<T, S, F>(&self, source: S, on_trigger: F) -> JoinHandle<()>
    where
        T: Send + 'static,
        S: TriggerSource<T>,
        F: FnMut() + Send + 'static,
    {
        let config = self.config.settings().windows.throttle_latest_config();
        flow::throttle_latest(source, &self.scope, config, self.config.reporter(), on_trigger)
    }

    pub fn debounce_input<S, F, R, T, H>(
        &self,
        source: S,
        transform: F,
        on_result: H,
    ) -> JoinHandle<()>
    where
        S: TriggerSource<String>,
        F: FnMut(String) -> R + Send + 'static,
        R: Stream<Item = anyhow::Result<T>> + Send + 'static,
        T: Send + 'static,
        H: FnMut(T) + Send + 'static,
    {
        let config = self.config.settings().windows.input_debounce_config();
        flow::debounce_input(source, &self.scope, config, self.reporter(), transform, on_result)
    }

    /// Observe a latest-value channel while the screen is started.
    pub fn collect_data<T, F>(&self, channel: &StateChannel<T>, on_value: F) -> JoinHandle<()>
    where
        T: Clone + Send + Sync + 'static,
        F: FnMut(T) -> anyhow::Result<()> + Send + 'static,
    {
        let source = channel.clone();
        flow::collect(
            &self.scope,
            DEFAULT_ACTIVE_STATE,
            move || source.stream(),
            self.reporter(),
            on_value,
        )
    }

    /// Observe an envelope channel while the screen is started.
    pub fn collect_ui_data<T>(
        &self,
        channel: &UiStateChannel<T>,
        consumption: Consumption,
        hooks: UiStateHooks<T>,
    ) -> JoinHandle<()>
    where
        T: Clone + Send + Sync + 'static,
    {
        collect_ui_state(
            channel,
            &self.scope,
            DEFAULT_ACTIVE_STATE,
            consumption,
            self.reporter(),
            hooks,
        )
    }

    /// Run `block` each time the screen reaches `min_state`, cancelling it
    /// when the screen drops below.
    pub fn launch_and_repeat<F, Fut>(&self, min_state: LifecycleState, block: F) -> JoinHandle<()>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let scope = self.scope.clone();
        self.scope
            .spawn(async move { scope.repeat_on_lifecycle(min_state, block).await })
    }

    fn subscribe_loading(&self) {
        let busy = Arc::clone(&self.busy);
        let logger = Arc::clone(self.config.logger());
        let hooks = UiStateHooks::on_success(move |envelope: &UiState<LoadingMsg>| {
            if let Some(loading) = envelope.data() {
                if loading.show {
                    logger.info(&format!("[UI] show loading {}", loading.message));
                    busy.show(&loading.message);
                } else {
                    logger.info("[UI] dismiss loading");
                    busy.dismiss();
                }
            }
            Ok(())
        });
        self.collect_ui_data(self.view_model.loading(), Consumption::OneShot, hooks);
    }

    fn subscribe_toasts(&self) {
        let sink = Arc::clone(&self.sink);
        let logger = Arc::clone(self.config.logger());
        let hooks = UiStateHooks::on_success(move |envelope: &UiState<ToastMsg>| {
            if let Some(toast) = envelope.data() {
                logger.info(&format!("[UI] toast {}", toast.message));
                sink.notify(&toast.message, toast.icon);
            }
            Ok(())
        });
        self.collect_ui_data(self.view_model.toasts(), Consumption::OneShot, hooks);
    }

    fn observe_lifecycle(&self) {
        let mut states = self.scope.subscribe();
        let name = self.scope.name().to_string();
        let logger = Arc::clone(self.config.logger());
        let view_model = Arc::clone(&self.view_model);
        let sink = Arc::clone(&self.sink);
        let dismiss_on_inactive = self.config.settings().dismiss_on_inactive;
        // Taken before spawning so transitions made right after `bind` are seen.
        let mut previous = *states.borrow_and_update();

        tokio::spawn(async move {
            loop {
                if previous.is_terminal() || states.changed().await.is_err() {
                    break;
                }
                let current = *states.borrow_and_update();
                log_transition(logger.as_ref(), &name, previous, current);

                if previous == LifecycleState::Resumed && dismiss_on_inactive {
                    view_model.dismiss_loading();
                }
                if current.is_terminal() {
                    sink.clear();
                }
                previous = current;
            }
        });
    }
}

fn log_transition(
    logger: &dyn Logger,
    name: &str,
    previous: LifecycleState,
    current: LifecycleState,
) {
    if current.is_terminal() {
        if previous == LifecycleState::Resumed {
            logger.info(&format!("[UI] leave {}", name));
        }
        logger.info(&format!("[UI] destroyed {}", name));
        return;
    }
    if previous < LifecycleState::Created && current >= LifecycleState::Created {
        logger.info(&format!("[UI] created {}", name));
    }
    if current == LifecycleState::Resumed && previous != LifecycleState::Resumed {
        logger.info(&format!("[UI] enter {}", name));
    }
    if previous == LifecycleState::Resumed && current != LifecycleState::Resumed {
        logger.info(&format!("[UI] leave {}", name));
    }
}
