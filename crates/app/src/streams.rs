//! Subscription streams.
//!
//! Each free function acts as both the stream builder AND the unique identity
//! key for `Subscription::run(fn_ptr)`.  Iced uses the function pointer address
//! to deduplicate subscriptions across redraws.

use dash_client::{spawn_poller, MetricsClient};
use dash_config::{default_path, load as load_config, ConfigWatcher, DashConfig};
use dash_core::{Message, Polled};
use futures::{channel::mpsc::Sender, SinkExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info};

/// Intervals below this are clamped; a zero period would stall the runtime.
const MIN_PERIOD_MS: u64 = 100;

pub(crate) fn period(ms: u64) -> Duration {
    Duration::from_millis(ms.max(MIN_PERIOD_MS))
}

/// `/status` every `polling.status_ms` for the resource cards.
pub(crate) fn status_stream() -> impl iced::futures::Stream<Item = Message> {
    poll_stream(Message::Status, |client, cfg| {
        spawn_poller(period(cfg.polling.status_ms), false, move || {
            let client = client.clone();
            async move { client.status().await }
        })
    })
}

/// `/status` every `polling.uptime_ms`, feeding only the uptime display.
pub(crate) fn uptime_stream() -> impl iced::futures::Stream<Item = Message> {
    poll_stream(Message::Uptime, |client, cfg| {
        spawn_poller(period(cfg.polling.uptime_ms), false, move || {
            let client = client.clone();
            async move { client.status().await }
        })
    })
}

/// `/diskio` every `polling.diskio_ms`.
pub(crate) fn disk_io_stream() -> impl iced::futures::Stream<Item = Message> {
    poll_stream(Message::DiskIo, |client, cfg| {
        spawn_poller(period(cfg.polling.diskio_ms), false, move || {
            let client = client.clone();
            async move { client.disk_io().await }
        })
    })
}

/// `/history` once at startup, then every `polling.history_ms`.
pub(crate) fn history_stream() -> impl iced::futures::Stream<Item = Message> {
    poll_stream(Message::History, |client, cfg| {
        spawn_poller(period(cfg.polling.history_ms), true, move || {
            let client = client.clone();
            async move { client.history().await }
        })
    })
}

/// Watches the config file for writes and sends `ConfigReloaded`.
pub(crate) fn config_stream() -> impl iced::futures::Stream<Item = Message> {
    iced::stream::channel(1, |mut sender: Sender<Message>| async move {
        let (watcher, mut rx) = ConfigWatcher::spawn(default_path());
        info!("Live reload enabled for {}", watcher.path().display());

        while rx.recv().await.is_some() {
            let _ = sender.try_send(Message::ConfigReloaded);
        }

        idle().await
    })
}

/// Build a backend client from the on-disk config, start one poller with
/// `start`, and forward its outcomes wrapped by `wrap`.
fn poll_stream<T, S>(wrap: fn(Polled<T>) -> Message, start: S) -> impl iced::futures::Stream<Item = Message>
where
    T: Send + 'static,
    S: FnOnce(MetricsClient, &DashConfig) -> mpsc::Receiver<Polled<T>> + Send + 'static,
{
    iced::stream::channel(8, move |mut sender: Sender<Message>| async move {
        let config = load_config(default_path()).unwrap_or_default();

        match MetricsClient::new(&config.backend) {
            Ok(client) => {
                info!("Polling {}", client.base_url());
                let mut rx = start(client, &config);
                while let Some(polled) = rx.recv().await {
                    if sender.send(wrap(polled)).await.is_err() {
                        break; // subscription dropped
                    }
                }
            }
            // Nothing to poll without a client; the rest of the UI keeps running.
            Err(e) => error!("Backend client unavailable: {e}"),
        }

        idle().await
    })
}

/// Park a finished stream; a subscription stream must never end.
async fn idle() {
    loop {
        tokio::time::sleep(Duration::from_secs(3600)).await;
    }
}
