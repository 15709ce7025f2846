//! Lifecycle-scoped collection of value streams.

use std::sync::Arc;

use futures_core::Stream;
use futures_util::StreamExt;
use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::error::{FailureReporter, MviError};
use crate::lifecycle::{LifecycleState, Pass, Scope};

/// Feed every item of `stream` to `on_value` until the stream ends or the
/// hook fails.
///
/// A hook failure is reported (cancellation excepted) and ends the
/// collection. Returns `false` in that case.
pub async fn safe_collect<St, F>(stream: St, reporter: &FailureReporter, mut on_value: F) -> bool
where
    St: Stream,
    F: FnMut(St::Item) -> anyhow::Result<()>,
{
    tokio::pin!(stream);
    while let Some(value) = stream.next().await {
        if let Err(err) = on_value(value) {
            reporter.report(&MviError::from_hook(err));
            return false;
        }
    }
    true
}

/// Collect a stream only while `scope` is at least `active_when`.
///
/// `subscribe` is called on every activation and the resulting stream is
/// dropped on deactivation, so nothing is observed or buffered while the
/// scope is inactive. Replaying the current value on reactivation is the
/// job of the source (see [`crate::StateChannel::stream`]).
///
/// A failing hook ends the collection for good; it is not restarted on the
/// next activation.
pub fn collect<S, St, F>(
    scope: &Scope,
    active_when: LifecycleState,
    mut subscribe: S,
    reporter: FailureReporter,
    on_value: F,
) -> JoinHandle<()>
where
    S: FnMut() -> St + Send + 'static,
    St: Stream + Send + 'static,
    St::Item: Send,
    F: FnMut(St::Item) -> anyhow::Result<()> + Send + 'static,
{
    let on_value = Arc::new(Mutex::new(on_value));
    let runner = scope.clone();
    scope.spawn(async move {
        runner
            .run_while_active(active_when, || {
                let stream = subscribe();
                let on_value = Arc::clone(&on_value);
                let reporter = reporter.clone();
                async move {
                    let completed = safe_collect(stream, &reporter, |value| {
                        (&mut *on_value.lock())(value)
                    })
                    .await;
                    if completed {
                        Pass::Continue
                    } else {
                        Pass::Stop
                    }
                }
            })
            .await;
    })
}
