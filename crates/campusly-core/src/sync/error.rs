use campusly_api::{ErrorKind, FieldErrors};

/// Error surfaced to the view layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// Route parameter absent or empty; no request was made.
    #[error("Nothing to show here.")]
    MissingParameter,

    /// Primary resource does not exist; carries the page's message.
    #[error("{0}")]
    NotFound(String),

    /// Session missing or expired.
    #[error("Your session has expired. Please sign in again.")]
    Unauthorized,

    /// Signed in, but the server refused this action.
    #[error("You don't have permission to do that.")]
    Forbidden,

    /// Input rejected with field-level messages.
    #[error("{0}")]
    Validation(FieldErrors),

    /// Anything else.
    #[error("Something went wrong. Please try again.")]
    Unknown,

    /// The view went away before the request finished.
    #[error("Request cancelled.")]
    Cancelled,
}

impl ViewError {
    /// Classifies an API error, using `not_found` as the 404 message.
    #[must_use]
    pub fn from_api(error: &campusly_api::Error, not_found: &str) -> Self {
        match error.kind() {
            ErrorKind::NotFound => Self::NotFound(not_found.to_string()),
            ErrorKind::Unauthorized => Self::Unauthorized,
            ErrorKind::Forbidden => Self::Forbidden,
            ErrorKind::ValidationFailed => error
                .field_errors()
                .cloned()
                .map_or(Self::Unknown, Self::Validation),
            ErrorKind::Unknown => Self::Unknown,
        }
    }

    /// The most relevant message, preferring server-provided text.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Validation(fields) => fields
                .summary()
                .map_or_else(|| fields.to_string(), ToString::to_string),
            other => other.to_string(),
        }
    }

    /// Whether the session should be dropped.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use campusly_api::Error;

    fn status(code: u16, body: &str) -> Error {
        match code {
            404 => Error::NotFound(body.to_string()),
            401 => Error::Unauthorized {
                status: 401,
                message: body.to_string(),
            },
            403 => Error::Forbidden(body.to_string()),
            400 => Error::Validation(FieldErrors::from_body(body)),
            _ => Error::Status {
                status: code,
                message: body.to_string(),
            },
        }
    }

    #[test]
    fn test_not_found_uses_page_text() {
        let err = ViewError::from_api(&status(404, "No Group matches"), "Group not found.");
        assert_eq!(err, ViewError::NotFound("Group not found.".into()));
        assert_eq!(err.to_string(), "Group not found.");
    }

    #[test]
    fn test_validation_summary_is_verbatim() {
        let err = ViewError::from_api(
            &status(400, r#"{"detail":"User is already a member."}"#),
            "",
        );
        assert_eq!(err.summary(), "User is already a member.");
    }

    #[test]
    fn test_server_error_is_unknown() {
        let err = ViewError::from_api(&status(502, "bad gateway"), "");
        assert_eq!(err, ViewError::Unknown);
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_unauthorized() {
        assert!(ViewError::from_api(&status(401, ""), "").is_unauthorized());
    }

    #[test]
    fn test_forbidden_keeps_session() {
        let err = ViewError::from_api(&status(403, "You do not have permission"), "");
        assert_eq!(err, ViewError::Forbidden);
        assert!(!err.is_unauthorized());
        assert_eq!(err.summary(), "You don't have permission to do that.");
    }
}
