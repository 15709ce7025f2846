//! One-shot event envelope.

use std::fmt;

/// Phase of a [`UiState`] envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UiStateKind {
    #[default]
    Init,
    Loading,
    Success,
    Error,
    /// Already handled; the payload must not trigger business effects.
    End,
}

/// Error carried by an `Error` envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    message: String,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<anyhow::Error> for ErrorInfo {
    fn from(err: anyhow::Error) -> Self {
        Self::new(format!("{:#}", err))
    }
}

impl From<&str> for ErrorInfo {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for ErrorInfo {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// Envelope around an emitted value.
///
/// `error()` is `Some` exactly when `kind()` is [`UiStateKind::Error`].
/// Envelopes are replaced on every emission; the only in-place change is
/// [`UiState::to_end`].
#[derive(Debug, Clone, PartialEq)]
pub struct UiState<T> {
    data: Option<T>,
    kind: UiStateKind,
    tag: String,
    error: Option<ErrorInfo>,
    seq: u64,
}

impl<T> UiState<T> {
    /// Fresh `Init` envelope without payload.
    pub fn new() -> Self {
        Self::build(UiStateKind::Init, None, String::new(), None)
    }

    pub fn success(data: T, tag: impl Into<String>) -> Self {
        Self::build(UiStateKind::Success, Some(data), tag.into(), None)
    }

    pub fn error(error: impl Into<ErrorInfo>, data: Option<T>, tag: impl Into<String>) -> Self {
        Self::build(UiStateKind::Error, data, tag.into(), Some(error.into()))
    }

    pub fn loading(data: Option<T>, tag: impl Into<String>) -> Self {
        Self::build(UiStateKind::Loading, data, tag.into(), None)
    }

    pub fn end(data: Option<T>, tag: impl Into<String>) -> Self {
        Self::build(UiStateKind::End, data, tag.into(), None)
    }

    fn build(kind: UiStateKind, data: Option<T>, tag: String, error: Option<ErrorInfo>) -> Self {
        Self {
            data,
            kind,
            tag,
            error,
            seq: 0,
        }
    }

    pub fn kind(&self) -> UiStateKind {
        self.kind
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Disambiguates logical streams sharing one channel.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn error_info(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }

    pub fn is_consumed(&self) -> bool {
        self.kind == UiStateKind::End
    }

    /// Mark the envelope as handled. Idempotent; drops the error so the
    /// error-iff-`Error` invariant keeps holding.
    pub fn to_end(&mut self) {
        self.kind = UiStateKind::End;
        self.error = None;
    }

    /// Emission number stamped by the channel; 0 until emitted.
    pub(crate) fn seq(&self) -> u64 {
        self.seq
    }

    pub(crate) fn with_seq(mut self, seq: u64) -> Self {
        self.seq = seq;
        self
    }
}

impl<T> Default for UiState<T> {
    fn default() -> Self {
        Self::new()
    }
}
