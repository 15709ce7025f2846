//! Event sources: anything that can register and unregister a listener.

use std::sync::Arc;

use parking_lot::Mutex;
use scopeguard::ScopeGuard;
use tokio::sync::mpsc;

type Event<T> = Result<T, anyhow::Error>;

/// Listener handed to a [`TriggerSource`] on registration.
pub struct Emitter<T> {
    tx: mpsc::UnboundedSender<Event<T>>,
}

impl<T> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> Emitter<T> {
    /// Push an event. Returns `false` once the subscription is gone.
    pub fn emit(&self, value: T) -> bool {
        self.tx.send(Ok(value)).is_ok()
    }

    /// Report a failure while producing events. The subscription stops
    /// after delivering it.
    pub fn fail(&self, err: impl Into<anyhow::Error>) -> bool {
        self.tx.send(Err(err.into())).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// A UI element producing events: a button's clicks, a text field's edits.
pub trait TriggerSource<T>: Send + 'static {
    fn register(&mut self, emitter: Emitter<T>);
    fn unregister(&mut self);
}

fn unregister_source<T, S: TriggerSource<T>>(mut source: S) {
    source.unregister();
}

/// Live registration on a trigger source.
///
/// Dropping it unregisters the listener, whichever way the owning task
/// ends.
pub(crate) struct Subscription<T, S: TriggerSource<T>> {
    events: mpsc::UnboundedReceiver<Event<T>>,
    _source: ScopeGuard<S, fn(S)>,
}

impl<T, S: TriggerSource<T>> Subscription<T, S> {
    pub(crate) fn open(mut source: S) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        source.register(Emitter { tx });
        Self {
            events,
            _source: scopeguard::guard(source, unregister_source::<T, S> as fn(S)),
        }
    }

    /// Next raw event; `None` when the source dropped every emitter.
    pub(crate) async fn next(&mut self) -> Option<Event<T>> {
        self.events.recv().await
    }
}

/// In-memory trigger: a clonable stand-in for a UI element.
///
/// Holds at most one listener, like a view's click listener slot.
pub struct Trigger<T> {
    listener: Arc<Mutex<Option<Emitter<T>>>>,
}

impl<T> Clone for Trigger<T> {
    fn clone(&self) -> Self {
        Self {
            listener: Arc::clone(&self.listener),
        }
    }
}

impl<T> Default for Trigger<T> {
    fn default() -> Self {
        Self {
            listener: Arc::new(Mutex::new(None)),
        }
    }
}

impl<T> Trigger<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver an event to the registered listener, if any.
    pub fn fire(&self, value: T) -> bool {
        match self.listener.lock().as_ref() {
            Some(emitter) => emitter.emit(value),
            None => false,
        }
    }

    pub fn fail(&self, err: impl Into<anyhow::Error>) -> bool {
        match self.listener.lock().as_ref() {
            Some(emitter) => emitter.fail(err),
            None => false,
        }
    }

    /// Drop the listener, ending the subscription as a normal completion.
    pub fn close(&self) {
        self.listener.lock().take();
    }

    pub fn has_listener(&self) -> bool {
        self.listener.lock().is_some()
    }
}

impl<T: Send + 'static> TriggerSource<T> for Trigger<T> {
    fn register(&mut self, emitter: Emitter<T>) {
        *self.listener.lock() = Some(emitter);
    }

    fn unregister(&mut self) {
        self.listener.lock().take();
    }
}
