mod common;

use std::sync::Arc;

use common::{advance, recording_config, resumed_scope, RecordingLogger};
use mvikit::mvi::{collect_ui_state, Consumption, UiStateHooks};
use mvikit::{LifecycleState, UiState, UiStateChannel, UiStateKind};
use parking_lot::Mutex;

type Calls = Arc<Mutex<Vec<String>>>;

/// Hooks that record `<kind>:<payload>` for every dispatched envelope.
fn recording_hooks(calls: &Calls) -> UiStateHooks<String> {
    let record = |calls: &Calls, label: &'static str| {
        let calls = Arc::clone(calls);
        move |envelope: &UiState<String>| {
            let payload = envelope.data().cloned().unwrap_or_default();
            calls.lock().push(format!("{}:{}", label, payload));
            Ok(())
        }
    };
    UiStateHooks::on_success(record(calls, "success"))
        .with_loading(record(calls, "loading"))
        .with_error(record(calls, "error"))
        .with_end(record(calls, "end"))
}

fn count(calls: &Calls, prefix: &str) -> usize {
    calls.lock().iter().filter(|c| c.starts_with(prefix)).count()
}

#[tokio::test(start_paused = true)]
async fn test_one_shot_event_survives_reattach_without_refiring() {
    let logger = RecordingLogger::new();
    let config = recording_config(&logger);
    let scope = resumed_scope("checkout");
    let channel = UiStateChannel::<String>::default();
    let calls: Calls = Arc::default();

    collect_ui_state(
        &channel,
        &scope,
        LifecycleState::Started,
        Consumption::OneShot,
        config.reporter(),
        recording_hooks(&calls),
    );
    advance(1).await;

    channel.emit_success("hello".to_string(), "greeting");
    advance(1).await;
    assert_eq!(count(&calls, "success"), 1);
    assert_eq!(channel.kind(), UiStateKind::End);

    // Rotation: the observer detaches and a new one attaches.
    scope.move_to(LifecycleState::Created);
    advance(1).await;
    scope.move_to(LifecycleState::Resumed);
    advance(1).await;

    assert_eq!(count(&calls, "success"), 1);
    assert_eq!(count(&calls, "end"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_event_emitted_while_detached_is_delivered_on_attach() {
    let logger = RecordingLogger::new();
    let config = recording_config(&logger);
    let scope = resumed_scope("checkout");
    scope.move_to(LifecycleState::Created);
    let channel = UiStateChannel::<String>::default();
    let calls: Calls = Arc::default();

    collect_ui_state(
        &channel,
        &scope,
        LifecycleState::Started,
        Consumption::OneShot,
        config.reporter(),
        recording_hooks(&calls),
    );
    advance(1).await;

    channel.emit_success("queued".to_string(), "");
    advance(1).await;
    assert!(calls.lock().is_empty());

    scope.move_to(LifecycleState::Started);
    advance(1).await;
    assert_eq!(*calls.lock(), vec!["success:queued"]);
}

#[tokio::test(start_paused = true)]
async fn test_later_observer_sees_end_instead_of_consumed_event() {
    let logger = RecordingLogger::new();
    let config = recording_config(&logger);
    let first_scope = resumed_scope("list");
    let channel = UiStateChannel::<String>::default();
    let first: Calls = Arc::default();
    let second: Calls = Arc::default();

    collect_ui_state(
        &channel,
        &first_scope,
        LifecycleState::Started,
        Consumption::OneShot,
        config.reporter(),
        recording_hooks(&first),
    );
    channel.emit_success("saved".to_string(), "");
    advance(1).await;

    let second_scope = resumed_scope("detail");
    collect_ui_state(
        &channel,
        &second_scope,
        LifecycleState::Started,
        Consumption::OneShot,
        config.reporter(),
        recording_hooks(&second),
    );
    advance(1).await;

    assert_eq!(*first.lock(), vec!["success:saved"]);
    assert_eq!(*second.lock(), vec!["end:saved"]);
}

#[tokio::test(start_paused = true)]
async fn test_repeatable_event_refires_on_reattach() {
    let logger = RecordingLogger::new();
    let config = recording_config(&logger);
    let scope = resumed_scope("feed");
    let channel = UiStateChannel::<String>::default();
    let calls: Calls = Arc::default();

    collect_ui_state(
        &channel,
        &scope,
        LifecycleState::Started,
        Consumption::Repeatable,
        config.reporter(),
        recording_hooks(&calls),
    );
    channel.emit_success("items".to_string(), "");
    advance(1).await;
    assert_eq!(channel.kind(), UiStateKind::Success);

    scope.move_to(LifecycleState::Created);
    advance(1).await;
    scope.move_to(LifecycleState::Started);
    advance(1).await;

    assert_eq!(count(&calls, "success"), 2);
}

#[tokio::test(start_paused = true)]
async fn test_each_emission_is_delivered_even_with_equal_payload() {
    let logger = RecordingLogger::new();
    let config = recording_config(&logger);
    let scope = resumed_scope("cart");
    let channel = UiStateChannel::<String>::default();
    let calls: Calls = Arc::default();

    collect_ui_state(
        &channel,
        &scope,
        LifecycleState::Started,
        Consumption::OneShot,
        config.reporter(),
        recording_hooks(&calls),
    );
    advance(1).await;

    channel.emit_success("added".to_string(), "");
    advance(1).await;
    channel.emit_success("added".to_string(), "");
    advance(1).await;

    assert_eq!(count(&calls, "success"), 2);
}

#[tokio::test(start_paused = true)]
async fn test_error_is_logged_and_routed_to_error_hook() {
    let logger = RecordingLogger::new();
    let config = recording_config(&logger);
    let scope = resumed_scope("login");
    let channel = UiStateChannel::<String>::default();
    let calls: Calls = Arc::default();

    collect_ui_state(
        &channel,
        &scope,
        LifecycleState::Started,
        Consumption::OneShot,
        config.reporter(),
        recording_hooks(&calls),
    );
    channel.emit_loading(None, "");
    advance(1).await;
    channel.emit_error("wrong password", Some("alice".to_string()), "");
    advance(1).await;

    assert_eq!(*calls.lock(), vec!["loading:", "error:alice"]);
    assert_eq!(logger.errors(), vec!["[UiState Error] wrong password"]);
    assert_eq!(channel.kind(), UiStateKind::Error);
}

#[tokio::test(start_paused = true)]
async fn test_failing_success_hook_is_reported_and_not_retried() {
    let logger = RecordingLogger::new();
    let config = recording_config(&logger);
    let scope = resumed_scope("checkout");
    let channel = UiStateChannel::<String>::default();

    let handle = collect_ui_state(
        &channel,
        &scope,
        LifecycleState::Started,
        Consumption::OneShot,
        config.reporter(),
        UiStateHooks::on_success(|_: &UiState<String>| Err(anyhow::anyhow!("render failed"))),
    );
    channel.emit_success("receipt".to_string(), "");
    handle.await.unwrap();

    assert_eq!(channel.kind(), UiStateKind::End);
    let errors = logger.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("render failed"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_one_shot_event_handled_by_one_of_two_active_observers() {
    let logger = RecordingLogger::new();
    let config = recording_config(&logger);
    let channel = UiStateChannel::<String>::default();
    let handled = Arc::new(Mutex::new(Vec::new()));
    let scopes = [resumed_scope("list"), resumed_scope("detail")];

    for scope in &scopes {
        let record = Arc::clone(&handled);
        let name = scope.name().to_string();
        collect_ui_state(
            &channel,
            scope,
            LifecycleState::Started,
            Consumption::OneShot,
            config.reporter(),
            UiStateHooks::on_success(move |_: &UiState<String>| {
                std::thread::sleep(std::time::Duration::from_millis(50));
                record.lock().push(name.clone());
                Ok(())
            }),
        );
    }
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    channel.emit_success("toast".to_string(), "");
    tokio::time::sleep(std::time::Duration::from_millis(300)).await;

    let handled = handled.lock().clone();
    assert_eq!(handled.len(), 1, "handled by {:?}", handled);
    assert_eq!(channel.kind(), UiStateKind::End);
}
