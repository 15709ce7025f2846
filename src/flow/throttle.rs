//! Click throttling: leading-edge ("first of burst wins") and
//! settle-on-quiet ("fire once the burst is over").

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};

use crate::config::WindowSettings;
use crate::error::{FailureReporter, MviError};
use crate::flow::trigger::{Subscription, TriggerSource};
use crate::lifecycle::Scope;

pub const THROTTLE_FIRST_WINDOW: Duration = Duration::from_millis(500);
pub const THROTTLE_LATEST_WINDOW: Duration = Duration::from_millis(1000);
pub const INPUT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// Window of one trigger-to-callback wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleConfig {
    pub window: Duration,
}

impl ThrottleConfig {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    pub fn throttle_first() -> Self {
        Self::new(THROTTLE_FIRST_WINDOW)
    }

    pub fn throttle_latest() -> Self {
        Self::new(THROTTLE_LATEST_WINDOW)
    }

    pub fn input_debounce() -> Self {
        Self::new(INPUT_DEBOUNCE_WINDOW)
    }
}

impl WindowSettings {
    pub fn throttle_first_config(&self) -> ThrottleConfig {
        ThrottleConfig::new(self.throttle_first())
    }

    pub fn throttle_latest_config(&self) -> ThrottleConfig {
        ThrottleConfig::new(self.throttle_latest())
    }

    pub fn input_debounce_config(&self) -> ThrottleConfig {
        ThrottleConfig::new(self.input_debounce())
    }
}

/// Leading-edge gate.
///
/// An event is accepted if nothing was accepted yet, or if strictly more
/// than `window` has passed since the last accepted one.
#[derive(Debug, Clone)]
pub struct ThrottleGate {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl ThrottleGate {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    pub fn try_accept(&mut self, now: Instant) -> bool {
        let accept = match self.last_accepted {
            None => true,
            Some(last) => now.saturating_duration_since(last) > self.window,
        };
        if accept {
            self.last_accepted = Some(now);
        }
        accept
    }
}

/// Invoke `on_trigger` for the first event of a burst, then ignore events
/// until more than `config.window` has passed since the accepted one.
///
/// Source failures go to `reporter` and end the wiring. The listener is
/// unregistered when the wiring ends or `scope` is destroyed.
pub fn throttle_first<T, S, F>(
    source: S,
    scope: &Scope,
    config: ThrottleConfig,
    reporter: FailureReporter,
    mut on_trigger: F,
) -> JoinHandle<()>
where
    T: Send + 'static,
    S: TriggerSource<T>,
    F: FnMut() + Send + 'static,
{
    let mut events = Subscription::open(source);
    scope.spawn(async move {
        let mut gate = ThrottleGate::new(config.window);
        while let Some(event) = events.next().await {
            match event {
                Ok(_) => {
                    if gate.try_accept(Instant::now()) {
                        on_trigger();
                    }
                }
                Err(err) => {
                    reporter.report(&MviError::from_stream(err));
                    break;
                }
            }
        }
    })
}

/// Invoke `on_trigger` once a burst of events has been quiet for
/// `config.window`. Each new event restarts the wait; only the latest wait
/// can fire.
///
/// If the source completes normally with a wait pending, the wait is
/// allowed to finish. Source failures go to `reporter` and end the wiring
/// without firing.
pub fn throttle_latest<T, S, F>(
    source: S,
    scope: &Scope,
    config: ThrottleConfig,
    reporter: FailureReporter,
    mut on_trigger: F,
) -> JoinHandle<()>
where
    T: Send + 'static,
    S: TriggerSource<T>,
    F: FnMut() + Send + 'static,
{
    let mut events = Subscription::open(source);
    scope.spawn(async move {
        let window = config.window;
        let settle = sleep(window);
        tokio::pin!(settle);
        let mut pending = false;

        loop {
            tokio::select! {
                biased;
                event = events.next() => match event {
                    Some(Ok(_)) => {
                        settle.as_mut().reset(Instant::now() + window);
                        pending = true;
                    }
                    Some(Err(err)) => {
                        reporter.report(&MviError::from_stream(err));
                        return;
                    }
                    None => break,
                },
                () = &mut settle, if pending => {
                    pending = false;
                    on_trigger();
                }
            }
        }

        if pending {
            settle.await;
            on_trigger();
        }
    })
}
