use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use futures_util::stream;
use parking_lot::Mutex;
use tokio::time::{sleep, sleep_until, Instant};

use mvikit::flow::{self, ThrottleConfig, Trigger};
use mvikit::logging::init_tracing;
use mvikit::{
    LifecycleState, LogSink, MviConfig, NotificationSink, Scope, Screen, Settings, ViewModel,
};

#[derive(Parser)]
#[command(name = "mvikit", about = "Replay scripted UI events through the mvikit engines")]
struct Cli {
    /// Settings file (TOML). Defaults apply when omitted or missing.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Clicks at the given millisecond offsets, first-of-burst wins.
    ThrottleFirst {
        #[arg(long)]
        window_ms: Option<u64>,
        #[arg(long, value_delimiter = ',', required = true)]
        at: Vec<u64>,
    },
    /// Clicks at the given millisecond offsets, fires once the burst settles.
    ThrottleLatest {
        #[arg(long)]
        window_ms: Option<u64>,
        #[arg(long, value_delimiter = ',', required = true)]
        at: Vec<u64>,
    },
    /// Text edits given as `text@ms`, debounced into a fake search.
    Search {
        #[arg(long)]
        window_ms: Option<u64>,
        #[arg(long, value_delimiter = ',', value_parser = parse_edit, required = true)]
        input: Vec<Edit>,
    },
    /// Show a toast, then rotate the screen and show it is not repeated.
    Toast {
        #[arg(long)]
        message: String,
    },
}

#[derive(Debug, Clone)]
struct Edit {
    text: String,
    at_ms: u64,
}

fn parse_edit(raw: &str) -> Result<Edit, String> {
    let (text, at) = raw
        .rsplit_once('@')
        .ok_or_else(|| format!("expected text@ms, got '{}'", raw))?;
    let at_ms = at
        .parse()
        .map_err(|e| format!("invalid offset '{}': {}", at, e))?;
    Ok(Edit {
        text: text.to_string(),
        at_ms,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::default(),
    };
    let config = MviConfig::new(settings);

    match cli.command {
        Command::ThrottleFirst { window_ms, at } => {
            let window = window_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| config.settings().windows.throttle_first());
            let fired = replay_clicks(&config, &at, window, false).await;
            print_fired("throttle-first", &fired);
        }
        Command::ThrottleLatest { window_ms, at } => {
            let window = window_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| config.settings().windows.throttle_latest());
            let fired = replay_clicks(&config, &at, window, true).await;
            print_fired("throttle-latest", &fired);
        }
        Command::Search { window_ms, input } => {
            let window = window_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| config.settings().windows.input_debounce());
            run_search(&config, &input, window).await;
        }
        Command::Toast { message } => run_toast(config, message).await,
    }

    Ok(())
}

async fn replay_clicks(
    config: &MviConfig,
    at: &[u64],
    window: Duration,
    latest: bool,
) -> Vec<u128> {
    let scope = Scope::new("demo");
    scope.move_to(LifecycleState::Resumed);
    let button = Trigger::<()>::new();
    let start = Instant::now();
    let fired = Arc::new(Mutex::new(Vec::new()));

    let record = Arc::clone(&fired);
    let on_trigger = move || record.lock().push(start.elapsed().as_millis());
    let throttle = ThrottleConfig::new(window);
    if latest {
        flow::throttle_latest(button.clone(), &scope, throttle, config.reporter(), on_trigger);
    } else {
        flow::throttle_first(button.clone(), &scope, throttle, config.reporter(), on_trigger);
    }

    for offset in at {
        sleep_until(start + Duration::from_millis(*offset)).await;
        button.fire(());
    }
    sleep(window + Duration::from_millis(50)).await;
    scope.destroy();

    let fired = fired.lock().clone();
    fired
}

fn print_fired(label: &str, fired: &[u128]) {
    println!("{}: {} callback(s)", label, fired.len());
    for ms in fired {
        println!("  fired at {} ms", ms);
    }
}

async fn run_search(config: &MviConfig, edits: &[Edit], window: Duration) {
    let scope = Scope::new("search");
    scope.move_to(LifecycleState::Resumed);
    let field = Trigger::<String>::new();
    let start = Instant::now();
    let sink = Arc::new(LogSink::new());

    flow::debounce_input(
        field.clone(),
        &scope,
        ThrottleConfig::new(window),
        config.reporter_with_sink(sink),
        |query: String| {
            stream::once(async move {
                sleep(Duration::from_millis(100)).await;
                Ok::<_, anyhow::Error>(format!("results for '{}'", query))
            })
        },
        move |result: String| println!("  {} ms: {}", start.elapsed().as_millis(), result),
    );

    for edit in edits {
        sleep_until(start + Duration::from_millis(edit.at_ms)).await;
        field.fire(edit.text.clone());
    }
    sleep(window + Duration::from_millis(200)).await;
    scope.destroy();
}

async fn run_toast(config: MviConfig, message: String) {
    let scope = Scope::new("toast-demo");
    let sink = Arc::new(LogSink::new());
    let view_model = Arc::new(ViewModel::<String>::new(config.settings()));
    let screen = Screen::bind(
        scope.clone(),
        config,
        Arc::clone(&view_model),
        sink.clone(),
        sink.clone(),
    );

    scope.move_to(LifecycleState::Resumed);
    screen.toast(message);
    sleep(Duration::from_millis(20)).await;
    println!("shown: {:?}", sink.current());

    sink.clear();
    scope.move_to(LifecycleState::Created);
    sleep(Duration::from_millis(20)).await;
    scope.move_to(LifecycleState::Resumed);
    sleep(Duration::from_millis(20)).await;
    println!("after re-attach: {:?} ({:?})", sink.current(), view_model.toasts().kind());

    scope.destroy();
}
