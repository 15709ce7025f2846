//! Failure taxonomy and reporting for the event and collection layers.
//!
//! Every engine in this crate follows the same policy: cancellation is
//! expected teardown and is swallowed, anything else is logged and (for
//! user-facing engines) forwarded to the notification sink. Nothing is
//! retried and nothing propagates to the caller.

use std::sync::Arc;

use thiserror::Error;

use crate::host::NotificationSink;
use crate::logging::Logger;

/// Errors surfaced by triggers, transforms and consumer hooks.
#[derive(Debug, Error)]
pub enum MviError {
    /// The owning scope was torn down while work was in flight.
    #[error("scope cancelled")]
    Cancelled,

    /// A caller-supplied transform failed.
    #[error("transform failed: {0}")]
    Transform(#[source] anyhow::Error),

    /// A trigger source failed while producing events.
    #[error("trigger source failed: {0}")]
    Stream(#[source] anyhow::Error),

    /// A consumer hook returned an error.
    #[error("hook failed: {0}")]
    Hook(#[source] anyhow::Error),
}

impl MviError {
    /// Classify a transform error. A transform that bails out with
    /// [`MviError::Cancelled`] is treated as cancellation, not failure.
    pub fn from_transform(err: anyhow::Error) -> Self {
        if is_cancellation(&err) {
            MviError::Cancelled
        } else {
            MviError::Transform(err)
        }
    }

    /// Classify a hook error, with the same cancellation rule as transforms.
    pub fn from_hook(err: anyhow::Error) -> Self {
        if is_cancellation(&err) {
            MviError::Cancelled
        } else {
            MviError::Hook(err)
        }
    }

    /// Classify a trigger source error.
    pub fn from_stream(err: anyhow::Error) -> Self {
        if is_cancellation(&err) {
            MviError::Cancelled
        } else {
            MviError::Stream(err)
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, MviError::Cancelled)
    }

    /// Message suitable for a toast: the underlying cause, without the
    /// classification prefix.
    pub fn user_message(&self) -> String {
        match self {
            MviError::Cancelled => "cancelled".to_string(),
            MviError::Transform(err) | MviError::Stream(err) | MviError::Hook(err) => {
                err.to_string()
            }
        }
    }
}

/// True when `err` is (or wraps) a scope cancellation.
pub fn is_cancellation(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<MviError>(),
            Some(MviError::Cancelled)
        )
    })
}

/// Applies the failure policy: swallow cancellation, log the rest and
/// optionally surface it to the user.
#[derive(Clone)]
pub struct FailureReporter {
    logger: Arc<dyn Logger>,
    sink: Option<Arc<dyn NotificationSink>>,
}

impl FailureReporter {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger, sink: None }
    }

    pub fn with_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    /// Log the failure without notifying the user.
    ///
    /// Returns `false` if the error was a cancellation and was swallowed.
    pub fn log(&self, err: &MviError) -> bool {
        if err.is_cancelled() {
            return false;
        }
        self.logger.error(&err.to_string());
        true
    }

    /// Log the failure and forward it to the notification sink, if any.
    ///
    /// Returns `false` if the error was a cancellation and was swallowed.
    pub fn report(&self, err: &MviError) -> bool {
        if !self.log(err) {
            return false;
        }
        if let Some(sink) = &self.sink {
            sink.notify(&err.user_message(), None);
        }
        true
    }
}
