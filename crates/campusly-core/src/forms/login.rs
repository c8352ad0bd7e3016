//! Sign-in form.

use std::sync::Arc;

use campusly_api::{Credential, SocialApi};
use tracing::info;

use crate::sync::ViewError;

const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";

/// Sign-in form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Email input.
    pub email: String,
    /// Password input.
    pub password: String,
    /// True while signing in.
    pub submitting: bool,
    /// Status or error message.
    pub message: Option<String>,
}

impl LoginForm {
    /// Validates the inputs into `(email, password)`.
    pub fn submit(&mut self) -> Option<(String, String)> {
        if self.submitting {
            return None;
        }
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            self.message = Some("Email and password are required.".to_string());
            return None;
        }
        self.submitting = true;
        self.message = Some("Logging in...".to_string());
        Some((email.to_string(), self.password.clone()))
    }

    /// Signs in; the session is updated by the client.
    pub async fn login(
        api: Arc<dyn SocialApi>,
        email: String,
        password: String,
    ) -> Result<Credential, ViewError> {
        api.login(&email, &password)
            .await
            .map_err(|e| ViewError::from_api(&e, LOGIN_FAILED))
    }

    /// Applies the result; on success returns the credential to persist.
    pub fn finish(&mut self, result: Result<Credential, ViewError>) -> Option<Credential> {
        self.submitting = false;
        match result {
            Ok(credential) => {
                info!("Login successful");
                self.password.clear();
                self.message = Some("Login successful! Redirecting...".to_string());
                Some(credential)
            }
            Err(ViewError::Validation(fields)) => {
                self.message = Some(fields.summary().unwrap_or(LOGIN_FAILED).to_string());
                None
            }
            Err(_) => {
                self.message = Some(LOGIN_FAILED.to_string());
                None
            }
        }
    }
}
