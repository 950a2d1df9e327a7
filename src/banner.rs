use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

pub const BANNER_TIMEOUT: Duration = Duration::from_secs(5);

/// A single transient error message that clears itself after a delay.
///
/// Showing a new message replaces the old one and restarts the delay.
pub struct ErrorBanner {
    tx: Arc<watch::Sender<Option<String>>>,
    timeout: Duration,
    timer: Option<JoinHandle<()>>,
}

impl ErrorBanner {
    pub fn new() -> Self {
        Self::with_timeout(BANNER_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let (tx, _rx) = watch::channel(None);
        ErrorBanner {
            tx: Arc::new(tx),
            timeout,
            timer: None,
        }
    }

    pub fn show(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!("Showing banner: {message}");

        self.cancel_timer();
        self.tx.send_replace(Some(message));

        // Outside a runtime there is nothing to drive the timer; the message stays
        // until dismissed.
        let Ok(handle) = Handle::try_current() else {
            return;
        };
        let tx = Arc::clone(&self.tx);
        let timeout = self.timeout;
        self.timer = Some(handle.spawn(async move {
            tokio::time::sleep(timeout).await;
            tx.send_replace(None);
        }));
    }

    pub fn dismiss(&mut self) {
        self.cancel_timer();
        self.tx.send_replace(None);
    }

    pub fn message(&self) -> Option<String> {
        self.tx.borrow().clone()
    }

    pub fn is_visible(&self) -> bool {
        self.tx.borrow().is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.tx.subscribe()
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Default for ErrorBanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ErrorBanner {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
