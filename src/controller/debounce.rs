//! Timer-based coalescing of rapid value changes

use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Runs an action with the last value of each burst of calls, once no new
/// value has arrived for `delay`.
///
/// Dropping the debouncer or cancelling its token discards a pending value.
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
    token: CancellationToken,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F, Fut>(delay: Duration, token: CancellationToken, action: F) -> Self
    where
        F: Fn(T) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(Self::run(rx, delay, token.clone(), action));
        Self { tx, token }
    }

    pub fn call(&self, value: T) {
        if self.tx.send(value).is_err() {
            tracing::trace!("Debouncer stopped, value dropped");
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    async fn run<F, Fut>(mut rx: mpsc::UnboundedReceiver<T>, delay: Duration, token: CancellationToken, action: F)
    where
        F: Fn(T) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        loop {
            let mut pending = tokio::select! {
                _ = token.cancelled() => return,
                value = rx.recv() => match value {
                    Some(value) => value,
                    None => return,
                },
            };

            loop {
                tokio::select! {
                    _ = token.cancelled() => return,
                    value = rx.recv() => match value {
                        Some(value) => pending = value,
                        None => return,
                    },
                    _ = tokio::time::sleep(delay) => {
                        tokio::spawn(action(pending));
                        break;
                    }
                }
            }
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
