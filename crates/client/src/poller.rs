use dash_core::{Polled, Result};
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Spawn a background Tokio task that calls `fetch` every `period` and
/// forwards each outcome, tagged with its request sequence number, through
/// the returned channel.
///
/// Every tick spawns its request separately, so a slow response never holds
/// back the next tick and requests may overlap; outcomes arrive in completion
/// order, not issue order.  With `fire_immediately` the first request goes
/// out at once, otherwise one full `period` after spawning.
///
/// The task stops automatically when the receiver is dropped.
pub fn spawn_poller<T, F, Fut>(
    period: Duration,
    fire_immediately: bool,
    fetch: F,
) -> mpsc::Receiver<Polled<T>>
where
    T: Send + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    let (tx, rx) = mpsc::channel(8);

    tokio::spawn(async move {
        let start = if fire_immediately { Instant::now() } else { Instant::now() + period };
        let mut ticker = time::interval_at(start, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut seq: u64 = 0;

        loop {
            ticker.tick().await;
            if tx.is_closed() {
                break; // all receivers dropped
            }

            let request = fetch();
            let tx = tx.clone();
            let this_seq = seq;
            seq += 1;

            tokio::spawn(async move {
                let result = request.await;
                let _ = tx.send(Polled::new(this_seq, result)).await;
            });
        }
    });

    rx
}
