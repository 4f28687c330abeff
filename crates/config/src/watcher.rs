use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Bursts of filesystem events closer together than this collapse into one
/// reload signal.
const SETTLE: Duration = Duration::from_millis(250);

/// Watches the config file for changes and signals once per burst of writes.
///
/// The parent directory is watched rather than the file itself: editors that
/// save via rename replace the inode, which would silently end a file watch.
///
/// # Example
/// ```no_run
/// # async fn demo() {
/// let (_, mut rx) = dash_config::ConfigWatcher::spawn("/home/user/.config/sysdash/sysdash.toml");
/// while rx.recv().await.is_some() {
///     println!("config changed — reloading");
/// }
/// # }
/// ```
pub struct ConfigWatcher {
    path: PathBuf,
}

impl ConfigWatcher {
    /// Spawn a filesystem watcher for `path`.
    /// Returns the watcher handle and a receiver that fires after each change.
    pub fn spawn(path: impl AsRef<Path>) -> (Self, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        let path = path.as_ref().to_path_buf();
        let watcher = Self { path: path.clone() };

        tokio::spawn(watch_loop(path, tx));

        (watcher, rx)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn watch_loop(path: PathBuf, tx: mpsc::Sender<()>) {
    use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

    let Some(dir) = path.parent().map(Path::to_path_buf) else {
        error!("Config path '{}' has no parent directory", path.display());
        return;
    };

    let (sync_tx, mut sync_rx) = mpsc::channel::<notify::Result<Event>>(16);

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = sync_tx.blocking_send(res);
        },
        Config::default().with_poll_interval(Duration::from_secs(2)),
    ) {
        Ok(w) => w,
        Err(e) => {
            error!("Failed to create filesystem watcher: {e}");
            return;
        }
    };

    if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
        error!("Failed to watch '{}': {e}", dir.display());
        return;
    }

    info!("Watching config file: {}", path.display());

    while let Some(event) = sync_rx.recv().await {
        let touches_config = match event {
            Ok(e) => {
                matches!(e.kind, EventKind::Modify(_) | EventKind::Create(_))
                    && e.paths.iter().any(|p| p.file_name() == path.file_name())
            }
            Err(e) => {
                warn!("Watcher error: {e}");
                false
            }
        };
        if !touches_config {
            continue;
        }

        // Swallow the rest of the burst before signalling.
        while let Ok(Some(_)) = tokio::time::timeout(SETTLE, sync_rx.recv()).await {}

        if tx.send(()).await.is_err() {
            break; // receiver dropped
        }
    }
}
