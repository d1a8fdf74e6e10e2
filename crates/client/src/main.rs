//! `countdown-client` -- terminal front end for the countdown service.
//!
//! Loads the latest countdown, follows the server's change feed, animates the
//! value once a second, and sends commands typed on stdin.
//!
//! # Environment variables
//!
//! | Variable            | Required | Default                     | Description                   |
//! |---------------------|----------|-----------------------------|-------------------------------|
//! | `COUNTDOWN_API_URL` | no       | `http://localhost:3000/api` | HTTP base URL of the service  |
//! | `COUNTDOWN_WS_URL`  | no       | derived from the API URL    | WebSocket change feed URL     |

use std::io::Write;
use std::time::Duration;

use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use countdown_client::api::{ClientError, CountdownApi};
use countdown_client::command::{Command, HELP};
use countdown_client::config::ClientConfig;
use countdown_client::feed;
use countdown_client::record::CountdownRecord;
use countdown_client::view::TimerView;

/// How often the running value is re-projected.
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// How long to wait for the feed task after cancelling it.
const FEED_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "countdown_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env();
    tracing::info!(api_url = %config.api_url, ws_url = %config.ws_url, "Starting countdown-client");

    let api = CountdownApi::new(config.api_url.clone());
    let mut view = TimerView::new();

    match api.fetch_latest().await {
        Ok(record) => view.on_loaded(record, Utc::now()),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load countdown");
            view.on_load_failed();
        }
    }
    notice(HELP);
    render(&view)?;

    let cancel = CancellationToken::new();
    let (changes_tx, mut changes) = feed::channel();
    let feed_handle = tokio::spawn(feed::run(config.ws_url.clone(), changes_tx, cancel.clone()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick(), if view.is_running() => {
                if view.on_tick(Utc::now()) {
                    tracing::info!("Countdown reached zero");
                }
                render(&view)?;
            }
            Some(()) = changes.recv() => {
                refresh(&api, &mut view).await;
                render(&view)?;
            }
            line = lines.next_line() => match line? {
                Some(line) => match Command::parse(&line) {
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(command)) => {
                        handle_command(&api, &mut view, command).await;
                        render(&view)?;
                    }
                    Ok(None) => render(&view)?,
                    Err(e) => notice(e),
                },
                None => break,
            },
        }
    }

    cancel.cancel();
    if tokio::time::timeout(FEED_SHUTDOWN_TIMEOUT, feed_handle)
        .await
        .is_err()
    {
        tracing::warn!("Change feed did not stop in time");
    }
    println!();
    Ok(())
}

/// Re-read the countdown after a push. A missing record or a failed request
/// leaves the view as it is.
async fn refresh(api: &CountdownApi, view: &mut TimerView) {
    match api.fetch_latest().await {
        Ok(Some(record)) => view.adopt(record, Utc::now()),
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "Failed to refresh countdown"),
    }
}

async fn handle_command(api: &CountdownApi, view: &mut TimerView, command: Command) {
    match command {
        Command::Start => {
            if !view.can_start() {
                notice("Start is unavailable (value or rate is zero, or already running)");
                return;
            }
            let result = api.start(view.start_value(), view.rate()).await;
            apply(view, result, "start");
        }
        Command::Pause => {
            if !view.can_pause() {
                notice("Nothing is running");
                return;
            }
            apply(view, api.pause().await, "pause");
        }
        Command::Resume => {
            if view.stopped_locally() {
                notice("Countdown finished; reset to run it again");
                return;
            }
            if !view.can_resume() {
                notice("Nothing to resume");
                return;
            }
            apply(view, api.resume().await, "resume");
        }
        Command::Reset => {
            let result = api.reset(view.start_value(), view.rate()).await;
            apply(view, result, "reset");
        }
        Command::SetStart(text) => {
            if !view.set_start_input(&text) {
                reject_input(view, &text);
            }
        }
        Command::SetRate(text) => {
            if !view.set_rate_input(&text) {
                reject_input(view, &text);
            }
        }
        Command::Show => {}
        Command::Help => notice(HELP),
        Command::Quit => {}
    }
}

/// Adopt a command's returned record, or log the failure and keep the
/// current view.
fn apply(view: &mut TimerView, result: Result<CountdownRecord, ClientError>, action: &str) {
    match result {
        Ok(record) => {
            tracing::debug!(countdown_id = record.id, action, "Command applied");
            view.adopt(record, Utc::now());
        }
        Err(e) => tracing::error!(error = %e, action, "Countdown command failed"),
    }
}

fn reject_input(view: &TimerView, text: &str) {
    if view.inputs_locked() {
        notice("Inputs are locked while the countdown is running");
    } else {
        notice(format!("'{text}' is not a valid decimal number"));
    }
}

/// Print a message on its own line, clearing the status line first.
fn notice(message: impl std::fmt::Display) {
    println!("\r\x1b[2K{message}");
}

/// Redraw the status line in place.
fn render(view: &TimerView) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "\r\x1b[2K{}", view.status_line())?;
    stdout.flush()
}
