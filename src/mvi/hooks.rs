//! Dispatching envelopes to per-kind hooks and one-shot consumption.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::error::FailureReporter;
use crate::flow::collect;
use crate::lifecycle::{LifecycleState, Scope};
use crate::logging::Logger;
use crate::mvi::channel::UiStateChannel;
use crate::mvi::ui_state::{UiState, UiStateKind};

type Hook<T> = Box<dyn FnMut(&UiState<T>) -> anyhow::Result<()> + Send>;

/// How a handled `Success` envelope is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Consumption {
    /// Claim the envelope (mark it `End`) before the success hook runs, so
    /// exactly one observer handles it.
    #[default]
    OneShot,
    /// Leave the envelope as is; every (re)attached observer handles it.
    Repeatable,
}

/// Per-kind callbacks for [`UiState`] envelopes. Only the success hook is
/// mandatory.
pub struct UiStateHooks<T> {
    on_success: Hook<T>,
    on_init: Option<Hook<T>>,
    on_loading: Option<Hook<T>>,
    on_error: Option<Hook<T>>,
    on_end: Option<Hook<T>>,
}

impl<T> UiStateHooks<T> {
    pub fn on_success<F>(hook: F) -> Self
    where
        F: FnMut(&UiState<T>) -> anyhow::Result<()> + Send + 'static,
    {
        Self {
            on_success: Box::new(hook),
            on_init: None,
            on_loading: None,
            on_error: None,
            on_end: None,
        }
    }

    pub fn with_init<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&UiState<T>) -> anyhow::Result<()> + Send + 'static,
    {
        self.on_init = Some(Box::new(hook));
        self
    }

    pub fn with_loading<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&UiState<T>) -> anyhow::Result<()> + Send + 'static,
    {
        self.on_loading = Some(Box::new(hook));
        self
    }

    pub fn with_error<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&UiState<T>) -> anyhow::Result<()> + Send + 'static,
    {
        self.on_error = Some(Box::new(hook));
        self
    }

    pub fn with_end<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&UiState<T>) -> anyhow::Result<()> + Send + 'static,
    {
        self.on_end = Some(Box::new(hook));
        self
    }

    /// Route `envelope` to its hook. Errors are always logged before the
    /// optional error hook runs.
    ///
    /// Returns `Ok(true)` when the success hook handled the envelope.
    pub fn dispatch(
        &mut self,
        envelope: &UiState<T>,
        logger: &dyn Logger,
    ) -> anyhow::Result<bool> {
        let hook = match envelope.kind() {
            UiStateKind::Success => {
                (self.on_success)(envelope)?;
                return Ok(true);
            }
            UiStateKind::Error => {
                let message = envelope
                    .error_info()
                    .map(|info| info.message().to_string())
                    .unwrap_or_default();
                logger.error(&format!("[UiState Error] {}", message));
                self.on_error.as_mut()
            }
            UiStateKind::Loading => self.on_loading.as_mut(),
            UiStateKind::End => self.on_end.as_mut(),
            UiStateKind::Init => self.on_init.as_mut(),
        };

        if let Some(hook) = hook {
            hook(envelope)?;
        }
        Ok(false)
    }
}

/// Observe `channel` while `scope` is at least `active_when`, dispatching
/// each envelope to `hooks`.
///
/// With [`Consumption::OneShot`] a success is claimed in the channel before
/// its hook runs. Only the observer whose claim succeeds acts on it; every
/// other observer, current or attaching later (after rotation, after the
/// screen comes back to the foreground), skips it and replays `End`. A
/// claimed event stays consumed even if its hook fails.
/// A failing hook is reported through `reporter` and ends the collection.
pub fn collect_ui_state<T>(
    channel: &UiStateChannel<T>,
    scope: &Scope,
    active_when: LifecycleState,
    consumption: Consumption,
    reporter: FailureReporter,
    mut hooks: UiStateHooks<T>,
) -> JoinHandle<()>
where
    T: Clone + Send + Sync + 'static,
{
    let source = channel.clone();
    let consumer = channel.clone();
    let logger = Arc::clone(reporter.logger());
    collect(
        scope,
        active_when,
        move || source.stream(),
        reporter,
        move |envelope: UiState<T>| {
            if envelope.kind() == UiStateKind::Success
                && consumption == Consumption::OneShot
                && !consumer.consume(&envelope)
            {
                return Ok(());
            }
            hooks.dispatch(&envelope, logger.as_ref())?;
            Ok(())
        },
    )
}
