//! Timer-based debounce for query inputs.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Default debounce window.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Delays a value until input settles.
///
/// Each [`schedule`](Self::schedule) cancels the timer of the previous
/// call, so only the last value within the window is ever released.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<CancellationToken>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    /// Creates a debouncer with the given window.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Returns the debounce window.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `value` for release after the window.
    ///
    /// The returned future resolves to `Some(value)` once the window
    /// elapses, or to `None` as soon as a newer schedule or
    /// [`cancel`](Self::cancel) supersedes it.
    pub fn schedule<T: Send + 'static>(
        &mut self,
        value: T,
    ) -> impl Future<Output = Option<T>> + Send + use<T> {
        self.cancel();
        let token = CancellationToken::new();
        self.pending = Some(token.clone());
        let delay = self.delay;

        async move {
            tokio::select! {
                biased;
                () = token.cancelled() => None,
                () = tokio::time::sleep(delay) => Some(value),
            }
        }
    }

    /// Cancels the pending timer, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }

    /// Returns whether a timer is waiting to fire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|t| !t.is_cancelled())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_only_last_value_fires() {
        let mut debouncer = Debouncer::default();
        let first = debouncer.schedule("a");
        let second = debouncer.schedule("ab");
        let third = debouncer.schedule("abc");

        let (first, second, third) = tokio::join!(first, second, third);
        assert_eq!(first, None);
        assert_eq!(second, None);
        assert_eq!(third, Some("abc"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_window() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        let started = tokio::time::Instant::now();
        let value = debouncer.schedule(42).await;
        assert_eq!(value, Some(42));
        assert!(started.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_never_fires() {
        let mut debouncer = Debouncer::default();
        let pending = debouncer.schedule("q");
        assert!(debouncer.is_pending());
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        assert_eq!(pending.await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_after_partial_wait() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        let early = tokio::spawn(debouncer.schedule("early"));
        tokio::time::sleep(Duration::from_millis(200)).await;
        let late = debouncer.schedule("late");

        assert_eq!(early.await.unwrap(), None);
        assert_eq!(late.await, Some("late"));
    }
}
