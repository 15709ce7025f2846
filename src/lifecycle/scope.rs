use std::fmt;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::LifecycleState;

/// Outcome of one active pass of [`Scope::run_while_active`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pass {
    /// Run again on the next activation.
    Continue,
    /// Stop for good.
    Stop,
}

/// Cancellable execution context bound to a host lifecycle.
///
/// Clones share the same state. Destroying the scope is terminal: every
/// task started through [`Scope::spawn`] is dropped, which runs the
/// destructors of whatever it held (listeners, timers, in-flight work).
#[derive(Clone)]
pub struct Scope {
    inner: Arc<ScopeInner>,
}

struct ScopeInner {
    name: String,
    state: watch::Sender<LifecycleState>,
}

impl Scope {
    pub fn new(name: impl Into<String>) -> Self {
        let (state, _) = watch::channel(LifecycleState::Initialized);
        Self {
            inner: Arc::new(ScopeInner {
                name: name.into(),
                state,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn state(&self) -> LifecycleState {
        *self.inner.state.borrow()
    }

    /// Receiver of state changes, starting from the current state.
    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.inner.state.subscribe()
    }

    /// Mirror a host lifecycle transition.
    ///
    /// Returns `false` when nothing changed: same state, or the scope is
    /// already destroyed.
    pub fn move_to(&self, next: LifecycleState) -> bool {
        self.inner.state.send_if_modified(|current| {
            if current.is_terminal() || *current == next {
                return false;
            }
            *current = next;
            true
        })
    }

    pub fn destroy(&self) {
        self.move_to(LifecycleState::Destroyed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.state().is_terminal()
    }

    /// Resolves once the scope is destroyed.
    pub async fn cancelled(&self) {
        let mut states = self.subscribe();
        wait_until(&mut states, LifecycleState::is_terminal).await;
    }

    /// Run `task` until it completes or the scope is destroyed.
    pub fn spawn<F>(&self, task: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let scope = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = scope.cancelled() => {}
                _ = task => {}
            }
        })
    }

    /// Run `block` every time the state enters `min_state` or above, and
    /// cancel it whenever the state drops below. Returns when the scope is
    /// destroyed.
    ///
    /// `min_state` is clamped to at least `Created`.
    pub async fn repeat_on_lifecycle<F, Fut>(&self, min_state: LifecycleState, mut block: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        self.run_while_active(min_state, || {
            let pass = block();
            async move {
                pass.await;
                Pass::Continue
            }
        })
        .await
    }

    pub(crate) async fn run_while_active<F, Fut>(&self, min_state: LifecycleState, mut block: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Pass>,
    {
        let min_state = min_state.max(LifecycleState::Created);
        let mut states = self.subscribe();

        loop {
            match wait_until(&mut states, |s| s.is_terminal() || s.is_at_least(min_state)).await {
                Some(state) if !state.is_terminal() => {}
                _ => return,
            }

            let pass = tokio::select! {
                biased;
                left = wait_until(&mut states, |s| !s.is_at_least(min_state)) => match left {
                    Some(state) if !state.is_terminal() => Pass::Continue,
                    _ => return,
                },
                pass = block() => pass,
            };

            if pass == Pass::Stop {
                return;
            }

            // A block that finished on its own is not restarted until the
            // next activation.
            match wait_until(&mut states, |s| !s.is_at_least(min_state)).await {
                Some(state) if !state.is_terminal() => {}
                _ => return,
            }
        }
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("name", &self.inner.name)
            .field("state", &self.state())
            .finish()
    }
}

async fn wait_until<P>(
    states: &mut watch::Receiver<LifecycleState>,
    mut accept: P,
) -> Option<LifecycleState>
where
    P: FnMut(LifecycleState) -> bool,
{
    states.wait_for(|state| accept(*state)).await.ok().map(|state| *state)
}
