//! Two-step registration: details, then the emailed one-time code.

use std::sync::Arc;

use campusly_api::{Acknowledgement, SocialApi};

use crate::sync::ViewError;

/// Length of the emailed code.
pub const OTP_LEN: usize = 6;

const REGISTER_FAILED: &str = "Registration failed. Please try again.";
const VERIFY_FAILED: &str = "Verification failed. Please try again.";

/// Registration step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegisterStep {
    /// Entering email and password.
    #[default]
    Details,
    /// Entering the emailed code.
    Verify,
    /// Account created.
    Done,
}

/// Registration form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    /// Current step.
    pub step: RegisterStep,
    /// Email input.
    pub email: String,
    /// Password input.
    pub password: String,
    /// Code input.
    pub otp: String,
    /// True while a request is in flight.
    pub submitting: bool,
    /// Server message.
    pub message: Option<String>,
    /// Error message.
    pub error: Option<String>,
}

impl RegisterForm {
    /// Updates the code input, keeping at most [`OTP_LEN`] digits.
    pub fn set_otp(&mut self, input: &str) {
        self.otp = input
            .chars()
            .filter(char::is_ascii_digit)
            .take(OTP_LEN)
            .collect();
    }

    /// Validates the details step into `(email, password)`.
    pub fn submit_details(&mut self) -> Option<(String, String)> {
        if self.submitting || self.step != RegisterStep::Details {
            return None;
        }
        let email = self.email.trim().to_string();
        if email.is_empty() || self.password.is_empty() {
            self.error = Some("Email and password are required.".to_string());
            return None;
        }
        self.begin_request();
        Some((email, self.password.clone()))
    }

    /// Validates the verify step into the code.
    pub fn submit_otp(&mut self) -> Option<String> {
        if self.submitting || self.step != RegisterStep::Verify {
            return None;
        }
        if self.otp.len() != OTP_LEN {
            self.error = Some(format!("Enter the {OTP_LEN}-digit code from your email."));
            return None;
        }
        self.begin_request();
        Some(self.otp.clone())
    }

    fn begin_request(&mut self) {
        self.submitting = true;
        self.error = None;
        self.message = None;
    }

    /// Requests a code.
    pub async fn register(
        api: Arc<dyn SocialApi>,
        email: String,
        password: String,
    ) -> Result<Acknowledgement, ViewError> {
        api.register(&email, &password)
            .await
            .map_err(|e| ViewError::from_api(&e, REGISTER_FAILED))
    }

    /// Verifies the code.
    pub async fn verify(api: Arc<dyn SocialApi>, otp: String) -> Result<Acknowledgement, ViewError> {
        api.verify_registration(&otp)
            .await
            .map_err(|e| ViewError::from_api(&e, VERIFY_FAILED))
    }

    /// Applies the details result; advances to the verify step on success.
    pub fn finish_details(&mut self, result: Result<Acknowledgement, ViewError>) {
        self.submitting = false;
        match result {
            Ok(ack) => {
                self.message = Some(ack.text().to_string());
                self.step = RegisterStep::Verify;
            }
            Err(error) => self.error = Some(server_message(&error, REGISTER_FAILED)),
        }
    }

    /// Applies the verify result; returns `true` once the account exists.
    pub fn finish_verify(&mut self, result: Result<Acknowledgement, ViewError>) -> bool {
        self.submitting = false;
        match result {
            Ok(ack) => {
                self.message = Some(format!("{} You can now log in.", ack.text()).trim().to_string());
                self.step = RegisterStep::Done;
                self.password.clear();
                true
            }
            Err(error) => {
                self.error = Some(server_message(&error, VERIFY_FAILED));
                false
            }
        }
    }
}

fn server_message(error: &ViewError, fallback: &str) -> String {
    match error {
        ViewError::Validation(fields) => fields.first("error").unwrap_or(fallback).to_string(),
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusly_api::FieldErrors;

    #[test]
    fn test_otp_keeps_six_digits() {
        let mut form = RegisterForm::default();
        form.set_otp("12a3 4567");
        assert_eq!(form.otp, "123456");
    }

    #[test]
    fn test_steps_advance() {
        let mut form = RegisterForm {
            email: "asha@college.ac.in".into(),
            password: "pw".into(),
            ..RegisterForm::default()
        };
        assert!(form.submit_otp().is_none());
        assert!(form.submit_details().is_some());
        form.finish_details(Ok(Acknowledgement {
            detail: None,
            message: Some("OTP sent to your email.".into()),
        }));
        assert_eq!(form.step, RegisterStep::Verify);
        assert_eq!(form.message.as_deref(), Some("OTP sent to your email."));

        form.set_otp("123");
        assert!(form.submit_otp().is_none());
        form.set_otp("123456");
        assert_eq!(form.submit_otp().as_deref(), Some("123456"));
        assert!(form.finish_verify(Ok(Acknowledgement {
            detail: None,
            message: Some("Registration successful.".into()),
        })));
        assert_eq!(form.step, RegisterStep::Done);
        assert_eq!(
            form.message.as_deref(),
            Some("Registration successful. You can now log in.")
        );
    }

    #[test]
    fn test_details_trim_email_and_require_password() {
        let mut form = RegisterForm {
            email: "  asha@college.ac.in ".into(),
            ..RegisterForm::default()
        };
        assert!(form.submit_details().is_none());
        assert_eq!(form.error.as_deref(), Some("Email and password are required."));

        form.password = "pw".into();
        assert_eq!(
            form.submit_details(),
            Some(("asha@college.ac.in".to_string(), "pw".to_string()))
        );
        assert!(form.submitting);
        assert!(form.error.is_none());
    }

    #[test]
    fn test_server_error_echoed() {
        let mut form = RegisterForm::default();
        let mut fields = FieldErrors::new();
        fields.push("error", "Only college emails are allowed.");
        form.finish_details(Err(ViewError::Validation(fields)));
        assert_eq!(form.step, RegisterStep::Details);
        assert_eq!(form.error.as_deref(), Some("Only college emails are allowed."));
    }

    #[test]
    fn test_unknown_failure_falls_back() {
        let mut form = RegisterForm {
            step: RegisterStep::Verify,
            ..RegisterForm::default()
        };
        assert!(!form.finish_verify(Err(ViewError::Unknown)));
        assert_eq!(form.error.as_deref(), Some(VERIFY_FAILED));
    }
}
