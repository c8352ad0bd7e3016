//! Session, current-user and registration endpoints.

use reqwest::Method;
use tracing::info;

use crate::client::{ApiClient, Call, Payload};
use crate::error::{Error, Result};
use crate::model::{Acknowledgement, CurrentUser, ProfileUpdate};
use crate::session::{Credential, TokenPair};

const ME: &[&str] = &["auth", "users", "me"];

impl ApiClient {
    /// Exchanges email and password for a token pair and stores it in the session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] or [`Error::Validation`] when the
    /// server rejects the credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<Credential> {
        let body = serde_json::json!({ "email": email, "password": password });
        let pair: TokenPair = self.json(Call::post(&["auth", "token"], &body)).await?;
        let credential = Credential::from(pair);
        self.session().set(credential.clone()).await;
        info!("Signed in as {email}");
        Ok(credential)
    }

    /// Refreshes the access token using the session's refresh token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] if there is no refresh token or the
    /// server rejects it.
    pub async fn refresh(&self) -> Result<Credential> {
        let refresh = self
            .session()
            .refresh_token()
            .await
            .ok_or_else(|| Error::Unauthorized {
                status: 401,
                message: "No refresh token available".into(),
            })?;
        self.refresh_locked(&refresh).await
    }

    /// Forgets the session credential.
    pub async fn logout(&self) {
        self.session().clear().await;
        info!("Signed out");
    }

    /// Fetches the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn current_user(&self) -> Result<CurrentUser> {
        self.json(Call::get(ME)).await
    }

    /// Updates bio and optionally the profile photo.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update_current_user(&self, update: &ProfileUpdate) -> Result<CurrentUser> {
        let call = Call {
            method: Method::PATCH,
            segments: ME,
            query: &[],
            payload: Payload::Profile(update),
        };
        self.json(call).await
    }

    /// Starts registration; the server emails a one-time code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] with the server's reason on rejection.
    pub async fn register(&self, email: &str, password: &str) -> Result<Acknowledgement> {
        let body = serde_json::json!({ "email": email, "password": password });
        self.json(Call::post(&["register"], &body)).await
    }

    /// Completes registration with the emailed code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] with the server's reason on rejection.
    pub async fn verify_registration(&self, otp: &str) -> Result<Acknowledgement> {
        let body = serde_json::json!({ "otp": otp });
        self.json(Call::post(&["register", "verify"], &body)).await
    }
}
