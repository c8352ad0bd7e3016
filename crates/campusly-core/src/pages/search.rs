//! Debounced user search.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use campusly_api::{SocialApi, UserSummary};
use tracing::debug;

use crate::debounce::Debouncer;
use crate::sync::ViewError;

/// Results for one settled query.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Query the results belong to.
    pub query: String,
    /// Matching users or the failure.
    pub result: Result<Vec<UserSummary>, ViewError>,
}

/// Search page state.
#[derive(Debug, Default)]
pub struct SearchPage {
    /// Raw input text.
    pub query: String,
    /// Results for the current query.
    pub results: Vec<UserSummary>,
    /// True while a query is waiting or in flight.
    pub loading: bool,
    /// Failure of the last search.
    pub error: Option<ViewError>,
    debouncer: Debouncer,
}

impl SearchPage {
    /// Creates a search page with the given debounce window.
    #[must_use]
    pub fn new(debounce: Duration) -> Self {
        Self {
            debouncer: Debouncer::new(debounce),
            ..Self::default()
        }
    }

    /// Updates the input.
    ///
    /// A blank query clears the results and schedules nothing. Otherwise
    /// the returned future resolves to the trimmed query once typing
    /// pauses, or to `None` if superseded.
    pub fn set_query(
        &mut self,
        query: String,
    ) -> Option<impl Future<Output = Option<String>> + Send + use<>> {
        self.query = query;
        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            self.debouncer.cancel();
            self.results.clear();
            self.error = None;
            self.loading = false;
            return None;
        }
        self.loading = true;
        Some(self.debouncer.schedule(trimmed.to_string()))
    }

    /// Runs the search for a settled query.
    pub async fn search(api: Arc<dyn SocialApi>, query: String) -> SearchOutcome {
        debug!(%query, "Searching users");
        let result = api
            .search_users(&query)
            .await
            .map_err(|e| ViewError::from_api(&e, "No users found."));
        SearchOutcome { query, result }
    }

    /// Applies results unless the input has moved on.
    pub fn apply(&mut self, outcome: SearchOutcome) -> bool {
        if outcome.query != self.query.trim() {
            debug!(stale = %outcome.query, "Discarding search results");
            return false;
        }
        self.loading = false;
        match outcome.result {
            Ok(results) => {
                self.results = results;
                self.error = None;
            }
            Err(error) => {
                self.results.clear();
                self.error = Some(error);
            }
        }
        true
    }

    /// Clears everything and cancels any pending timer.
    pub fn reset(&mut self) {
        self.debouncer.cancel();
        self.query.clear();
        self.results.clear();
        self.error = None;
        self.loading = false;
    }
}
