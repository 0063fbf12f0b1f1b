//! Background refetch of a value with staleness detection.
//!
//! A [`Poller`] owns a task that fetches immediately, then again on every
//! interval tick or [`Poller::refresh`]. Consumers read the latest
//! [`PollState`] or subscribe to changes. Identical results do not replace the
//! data, so subscribers only wake up when something actually changed.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tokio::sync::{Notify, watch};
use tokio_util::sync::CancellationToken;

use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq)]
pub struct PollState<T> {
    pub data: T,
    pub loading: bool,
    /// Operator-facing message of the last failed fetch.
    pub error: Option<String>,
    /// When `data` last changed.
    pub last_updated: Option<SystemTime>,
}

impl<T> PollState<T> {
    fn new(data: T, loading: bool) -> Self {
        Self {
            data,
            loading,
            error: None,
            last_updated: None,
        }
    }
}

/// Fold a fetch result into `state`. Returns whether anything changed.
pub fn apply<T: PartialEq>(
    state: &mut PollState<T>,
    result: Result<T, ClientError>,
    failure_message: &str,
) -> bool {
    match result {
        Ok(data) if data == state.data => {
            let changed = state.loading || state.error.is_some();
            state.loading = false;
            state.error = None;
            changed
        }
        Ok(data) => {
            state.data = data;
            state.loading = false;
            state.error = None;
            state.last_updated = Some(SystemTime::now());
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "poll failed");
            let message = match e {
                ClientError::Unauthorized | ClientError::Forbidden => e.friendly_message(),
                _ => failure_message.to_owned(),
            };
            state.loading = false;
            state.error = Some(message);
            true
        }
    }
}

/// Handle to a polling task. Dropping it stops the task.
pub struct Poller<T> {
    state: watch::Receiver<PollState<T>>,
    refresh: Arc<Notify>,
    cancel: CancellationToken,
}

impl<T> Poller<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Start polling on the current tokio runtime.
    ///
    /// `initial` is shown while the first fetch runs. Without an `interval`
    /// the value is fetched once and then only on [`refresh`](Self::refresh).
    pub fn spawn<F, Fut>(
        initial: T,
        interval: Option<Duration>,
        failure_message: &'static str,
        fetch: F,
    ) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        let (tx, rx) = watch::channel(PollState::new(initial, true));
        let refresh = Arc::new(Notify::new());
        let cancel = CancellationToken::new();

        tokio::spawn(run(
            tx,
            fetch,
            interval,
            failure_message,
            Arc::clone(&refresh),
            cancel.clone(),
        ));

        Self {
            state: rx,
            refresh,
            cancel,
        }
    }

    /// A poller that never fetches and always holds `data`.
    pub fn idle(data: T) -> Self {
        let (_tx, rx) = watch::channel(PollState::new(data, false));
        Self {
            state: rx,
            refresh: Arc::new(Notify::new()),
            cancel: CancellationToken::new(),
        }
    }

    pub fn state(&self) -> PollState<T> {
        self.state.borrow().clone()
    }

    /// Receiver woken on every state change.
    pub fn subscribe(&self) -> watch::Receiver<PollState<T>> {
        self.state.clone()
    }

    /// Fetch again now instead of waiting for the next tick.
    pub fn refresh(&self) {
        self.refresh.notify_one();
    }

    /// Stop polling. Results still in flight are discarded.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl<T> Drop for Poller<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run<T, F, Fut>(
    tx: watch::Sender<PollState<T>>,
    fetch: F,
    interval: Option<Duration>,
    failure_message: &'static str,
    refresh: Arc<Notify>,
    cancel: CancellationToken,
) where
    T: PartialEq,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    loop {
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return,
            result = fetch() => result,
        };
        // Checked under the state lock so nothing lands once `cancel()` returned.
        tx.send_if_modified(|state| {
            !cancel.is_cancelled() && apply(state, result, failure_message)
        });
        if cancel.is_cancelled() {
            return;
        }

        let tick = async {
            match interval {
                Some(period) => tokio::time::sleep(period).await,
                None => std::future::pending::<()>().await,
            }
        };
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return,
            _ = refresh.notified() => {
                tx.send_if_modified(|state| {
                    let changed = !state.loading || state.error.is_some();
                    state.loading = true;
                    state.error = None;
                    changed
                });
            }
            _ = tick => {}
        }
    }
}
