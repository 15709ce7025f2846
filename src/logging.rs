//! Logging collaborator and tracing setup.

use tracing_subscriber::EnvFilter;

/// Log sink injected into engines and screens through [`crate::MviConfig`].
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Default [`Logger`] forwarding to `tracing` under the `mvi` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "mvi", "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "mvi", "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "mvi", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "mvi", "{}", message);
    }
}

/// Install a fmt subscriber filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();
}
