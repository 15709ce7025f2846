//! Shared test utilities and recording fakes for host collaborators.

#![allow(dead_code, unused_imports)]

use std::sync::Arc;
use std::time::Duration;

use mvikit::{
    BusyIndicator, IconRef, LifecycleState, Logger, MviConfig, NotificationSink, Scope, Settings,
};
use parking_lot::Mutex;

/// Let spawned tasks run and move the paused clock forward by `ms`.
pub async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// A scope already in `Resumed`.
pub fn resumed_scope(name: &str) -> Scope {
    let scope = Scope::new(name);
    scope.move_to(LifecycleState::Resumed);
    scope
}

/// Notification sink that records every call.
#[derive(Default)]
pub struct RecordingSink {
    notified: Mutex<Vec<(String, Option<IconRef>)>>,
    clears: Mutex<usize>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn messages(&self) -> Vec<String> {
        self.notified.lock().iter().map(|(message, _)| message.clone()).collect()
    }

    pub fn icons(&self) -> Vec<Option<IconRef>> {
        self.notified.lock().iter().map(|(_, icon)| *icon).collect()
    }

    pub fn clears(&self) -> usize {
        *self.clears.lock()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, message: &str, icon: Option<IconRef>) {
        self.notified.lock().push((message.to_string(), icon));
    }

    fn clear(&self) {
        *self.clears.lock() += 1;
    }
}

/// Busy indicator that records `show:<message>` / `dismiss` calls.
#[derive(Default)]
pub struct RecordingBusy {
    calls: Mutex<Vec<String>>,
}

impl RecordingBusy {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

impl BusyIndicator for RecordingBusy {
    fn show(&self, message: &str) {
        self.calls.lock().push(format!("show:{}", message));
    }

    fn dismiss(&self) {
        self.calls.lock().push("dismiss".to_string());
    }
}

/// Logger that keeps `(level, message)` pairs.
#[derive(Default)]
pub struct RecordingLogger {
    lines: Mutex<Vec<(&'static str, String)>>,
}

impl RecordingLogger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn lines(&self, level: &str) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.lines("error")
    }

    pub fn infos(&self) -> Vec<String> {
        self.lines("info")
    }
}

impl Logger for RecordingLogger {
    fn debug(&self, message: &str) {
        self.lines.lock().push(("debug", message.to_string()));
    }

    fn info(&self, message: &str) {
        self.lines.lock().push(("info", message.to_string()));
    }

    fn warn(&self, message: &str) {
        self.lines.lock().push(("warn", message.to_string()));
    }

    fn error(&self, message: &str) {
        self.lines.lock().push(("error", message.to_string()));
    }
}

/// Config with default settings that logs into `logger`.
pub fn recording_config(logger: &Arc<RecordingLogger>) -> MviConfig {
    MviConfig::new(Settings::default()).with_logger(Arc::clone(logger) as Arc<dyn Logger>)
}
