use std::future::Future;

use tokio_util::sync::CancellationToken;

/// Cancellation scope tied to a view's lifetime.
///
/// Fetches started while the view is mounted run under a child of the
/// scope's token; unmounting cancels all of them at once.
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    /// Creates a live scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a token cancelled together with this scope.
    #[must_use]
    pub fn child(&self) -> CancellationToken {
        self.token.child_token()
    }

    /// Cancels every fetch in this scope.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the scope has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Runs `fut` until it completes or `token` is cancelled.
    pub async fn run<F: Future>(token: &CancellationToken, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            () = token.cancelled() => None,
            out = fut => Some(out),
        }
    }
}
