//! User search, profile and follow endpoints.

use reqwest::Method;

use crate::client::{ApiClient, Call};
use crate::error::Result;
use crate::model::{Acknowledgement, Profile, UserSummary};

impl ApiClient {
    /// Searches users by username or email.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>> {
        let query = [("search", query.to_string())];
        self.json(Call::get(&["users"]).with_query(&query)).await
    }

    /// Fetches a public profile.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] for an unknown username.
    pub async fn profile(&self, username: &str) -> Result<Profile> {
        self.json(Call::get(&["users", username])).await
    }

    /// Follows a user.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] when already following.
    pub async fn follow(&self, username: &str) -> Result<Acknowledgement> {
        let body = serde_json::json!({});
        self.json(Call::post(&["follow", username], &body)).await
    }

    /// Unfollows a user.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] when not following.
    pub async fn unfollow(&self, username: &str) -> Result<()> {
        self.empty(Call::get(&["follow", username]).with_method(Method::DELETE))
            .await
    }
}
