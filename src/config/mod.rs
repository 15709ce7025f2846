//! Settings and the injected runtime configuration.

mod loader;
mod types;

use std::sync::Arc;

pub use loader::ConfigError;
pub use types::{Settings, WindowSettings};

use crate::error::FailureReporter;
use crate::host::NotificationSink;
use crate::logging::{Logger, TracingLogger};

/// Configuration handed explicitly to screens and engines.
#[derive(Clone)]
pub struct MviConfig {
    logger: Arc<dyn Logger>,
    settings: Settings,
}

impl MviConfig {
    pub fn new(settings: Settings) -> Self {
        Self {
            logger: Arc::new(TracingLogger),
            settings,
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Reporter that only logs.
    pub fn reporter(&self) -> FailureReporter {
        FailureReporter::new(Arc::clone(&self.logger))
    }

    /// Reporter that logs and surfaces failures through `sink`.
    pub fn reporter_with_sink(&self, sink: Arc<dyn NotificationSink>) -> FailureReporter {
        self.reporter().with_sink(sink)
    }
}

impl Default for MviConfig {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
