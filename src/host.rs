//! Collaborators implemented by the host UI layer.

use parking_lot::Mutex;

/// Reference to a host-side icon resource shown next to a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconRef(pub u32);

/// Displays and clears transient user notifications (toasts).
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str, icon: Option<IconRef>);
    fn clear(&self);
}

/// Displays and hides a busy/loading indicator.
pub trait BusyIndicator: Send + Sync {
    fn show(&self, message: &str);
    fn dismiss(&self);
}

/// Notification sink and busy indicator that renders through `tracing`.
///
/// Holds the currently shown notification explicitly: every `notify`
/// replaces it, `clear` drops it.
#[derive(Debug, Default)]
pub struct LogSink {
    current: Mutex<Option<String>>,
    busy: Mutex<Option<String>>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Message of the notification currently on screen.
    pub fn current(&self) -> Option<String> {
        self.current.lock().clone()
    }

    /// Message of the busy indicator, if shown.
    pub fn busy_message(&self) -> Option<String> {
        self.busy.lock().clone()
    }
}

impl NotificationSink for LogSink {
    fn notify(&self, message: &str, icon: Option<IconRef>) {
        let mut current = self.current.lock();
        if let Some(previous) = current.take() {
            tracing::debug!(target: "mvi", "[UI] cancel toast {}", previous);
        }
        match icon {
            Some(IconRef(id)) => {
                tracing::info!(target: "mvi", "[UI] toast {} (icon {})", message, id)
            }
            None => tracing::info!(target: "mvi", "[UI] toast {}", message),
        }
        *current = Some(message.to_string());
    }

    fn clear(&self) {
        self.current.lock().take();
    }
}

impl BusyIndicator for LogSink {
    fn show(&self, message: &str) {
        tracing::info!(target: "mvi", "[UI] show loading {}", message);
        *self.busy.lock() = Some(message.to_string());
    }

    fn dismiss(&self) {
        if self.busy.lock().take().is_some() {
            tracing::info!(target: "mvi", "[UI] dismiss loading");
        }
    }
}
