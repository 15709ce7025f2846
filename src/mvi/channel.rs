//! Latest-value channels.

use std::fmt;
use std::sync::Arc;

use futures_core::Stream;
use futures_util::stream;
use tokio::sync::watch;

use crate::mvi::ui_state::{ErrorInfo, UiState, UiStateKind};

/// Holder of exactly one current value, broadcast to every observer.
///
/// New observers see the current value first; observers that fall behind
/// only see the freshest value, not every intermediate one.
pub struct StateChannel<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T> Clone for StateChannel<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for StateChannel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateChannel")
            .field("value", &*self.tx.borrow())
            .field("observers", &self.tx.receiver_count())
            .finish()
    }
}

impl<T: Default> Default for StateChannel<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> StateChannel<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    pub fn update(&self, modify: impl FnOnce(&mut T)) {
        self.tx.send_modify(modify);
    }

    /// Modify in place; observers are woken only if `modify` returns `true`.
    pub fn update_if(&self, modify: impl FnOnce(&mut T) -> bool) -> bool {
        self.tx.send_if_modified(modify)
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    pub fn observer_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T: Clone> StateChannel<T> {
    pub fn value(&self) -> T {
        self.tx.borrow().clone()
    }
}

impl<T: Clone + Send + Sync + 'static> StateChannel<T> {
    /// Current value, then every change. Ends when all channel handles are
    /// dropped.
    pub fn stream(&self) -> impl Stream<Item = T> + Send + 'static {
        let rx = self.tx.subscribe();
        stream::unfold((rx, true), |(mut rx, first)| async move {
            if !first && rx.changed().await.is_err() {
                return None;
            }
            let value = rx.borrow_and_update().clone();
            Some((value, (rx, false)))
        })
    }
}

/// Channel of one-shot envelopes.
///
/// Envelopes only enter through the `emit_*` operations, which stamp each
/// one with the next emission number. There is no raw `set`: that is what
/// lets [`UiStateChannel::consume`] tell the handled emission from a newer
/// one.
pub struct UiStateChannel<T> {
    inner: StateChannel<UiState<T>>,
}

impl<T> Clone for UiStateChannel<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for UiStateChannel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UiStateChannel").field(&self.inner).finish()
    }
}

impl<T> Default for UiStateChannel<T> {
    fn default() -> Self {
        Self {
            inner: StateChannel::new(UiState::new()),
        }
    }
}

impl<T> UiStateChannel<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn emit(&self, envelope: UiState<T>) {
        self.inner.update(|current| {
            let seq = current.seq().wrapping_add(1).max(1);
            *current = envelope.with_seq(seq);
        });
    }

    pub fn emit_success(&self, data: T, tag: impl Into<String>) {
        self.emit(UiState::success(data, tag));
    }

    pub fn emit_error(
        &self,
        error: impl Into<ErrorInfo>,
        data: Option<T>,
        tag: impl Into<String>,
    ) {
        self.emit(UiState::error(error, data, tag));
    }

    pub fn emit_loading(&self, data: Option<T>, tag: impl Into<String>) {
        self.emit(UiState::loading(data, tag));
    }

    pub fn emit_end(&self, data: Option<T>, tag: impl Into<String>) {
        self.emit(UiState::end(data, tag));
    }

    pub fn emit_init(&self) {
        self.emit(UiState::new());
    }

    /// Kind of the envelope currently held.
    pub fn kind(&self) -> UiStateKind {
        self.inner.tx.borrow().kind()
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState<T>> {
        self.inner.subscribe()
    }

    pub fn observer_count(&self) -> usize {
        self.inner.observer_count()
    }

    /// Mark `handled` as consumed in the channel.
    ///
    /// Only applies if the channel still holds that very emission and no
    /// one consumed it yet; returns whether this call did. An envelope that
    /// never went through `emit_*` matches nothing. Observers are not woken:
    /// the change is only visible to whoever reads the channel next, which
    /// keeps a re-attached observer from handling the event again.
    pub fn consume(&self, handled: &UiState<T>) -> bool {
        if handled.seq() == 0 {
            return false;
        }
        let mut consumed = false;
        self.inner.update_if(|current| {
            if current.seq() == handled.seq() && !current.is_consumed() {
                current.to_end();
                consumed = true;
            }
            false
        });
        consumed
    }
}

impl<T: Clone> UiStateChannel<T> {
    pub fn value(&self) -> UiState<T> {
        self.inner.value()
    }
}

impl<T: Clone + Send + Sync + 'static> UiStateChannel<T> {
    /// Held envelope, then every new emission.
    pub fn stream(&self) -> impl Stream<Item = UiState<T>> + Send + 'static {
        self.inner.stream()
    }
}
