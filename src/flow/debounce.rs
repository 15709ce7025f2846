//! Text-input debouncing with a switch-latest transform.

use std::pin::Pin;

use futures_core::Stream;
use futures_util::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};

use crate::error::{FailureReporter, MviError};
use crate::flow::throttle::ThrottleConfig;
use crate::flow::trigger::{Subscription, TriggerSource};
use crate::lifecycle::Scope;

/// Debounce text edits and run `transform` on the settled text.
///
/// - Empty text is dropped before debouncing: it neither reaches
///   `transform` nor restarts the quiet period.
/// - After `config.window` without a new edit, `transform` is called with
///   the latest text and its result stream is polled.
/// - A newer non-empty edit drops the in-flight result stream, so stale
///   results never reach `on_result`. Side effects a transform already
///   committed are not undone.
/// - A failing transform is reported through `reporter` (log + sink) and
///   input handling continues. Cancellation is swallowed.
/// - Source failures are reported the same way and end the wiring.
/// - When the source completes normally, pending text still settles and
///   the in-flight result stream is drained before the wiring ends.
pub fn debounce_input<S, F, R, T, H>(
    source: S,
    scope: &Scope,
    config: ThrottleConfig,
    reporter: FailureReporter,
    mut transform: F,
    mut on_result: H,
) -> JoinHandle<()>
where
    S: TriggerSource<String>,
    F: FnMut(String) -> R + Send + 'static,
    R: Stream<Item = anyhow::Result<T>> + Send + 'static,
    T: Send + 'static,
    H: FnMut(T) + Send + 'static,
{
    let mut events = Subscription::open(source);
    scope.spawn(async move {
        let window = config.window;
        let quiet = sleep(window);
        tokio::pin!(quiet);
        let mut latest: Option<String> = None;
        let mut in_flight: Option<Pin<Box<R>>> = None;

        loop {
            tokio::select! {
                biased;
                event = events.next() => match event {
                    Some(Ok(text)) => {
                        if !text.is_empty() {
                            in_flight = None;
                            latest = Some(text);
                            quiet.as_mut().reset(Instant::now() + window);
                        }
                    }
                    Some(Err(err)) => {
                        reporter.report(&MviError::from_stream(err));
                        return;
                    }
                    None => break,
                },
                () = &mut quiet, if latest.is_some() => {
                    if let Some(text) = latest.take() {
                        in_flight = Some(Box::pin(transform(text)));
                    }
                }
                item = next_result(&mut in_flight), if in_flight.is_some() => match item {
                    Some(Ok(value)) => on_result(value),
                    Some(Err(err)) => {
                        in_flight = None;
                        reporter.report(&MviError::from_transform(err));
                    }
                    None => in_flight = None,
                },
            }
        }

        if let Some(text) = latest.take() {
            quiet.await;
            in_flight = Some(Box::pin(transform(text)));
        }
        if let Some(mut results) = in_flight {
            while let Some(item) = results.next().await {
                match item {
                    Ok(value) => on_result(value),
                    Err(err) => {
                        reporter.report(&MviError::from_transform(err));
                        break;
                    }
                }
            }
        }
    })
}

async fn next_result<R>(stream: &mut Option<Pin<Box<R>>>) -> Option<R::Item>
where
    R: Stream,
{
    match stream {
        Some(stream) => stream.next().await,
        None => std::future::pending().await,
    }
}
