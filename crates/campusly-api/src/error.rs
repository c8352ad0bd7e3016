//! Error types for API operations.
//!
//! HTTP failures are decoded exactly once, here, into a closed set of kinds
//! that the view layer can match on without looking at status codes.

use std::collections::BTreeMap;
use std::fmt;

use reqwest::StatusCode;
use serde_json::Value;

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Field that carries messages not tied to a single input.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// API error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport-level HTTP failure (connect, timeout, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// I/O error (reading an upload from disk).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The server answered 404.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The server answered 401; the credential is missing or expired.
    #[error("Unauthorized ({status}): {message}")]
    Unauthorized {
        /// HTTP status code.
        status: u16,
        /// Server-provided reason.
        message: String,
    },

    /// The server answered 403; the session is fine but the action is not allowed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The server rejected the input (400) with field-level messages.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Any other non-success status.
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided reason or raw body.
        message: String,
    },

    /// Client configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Closed classification of every [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Requested resource does not exist.
    NotFound,
    /// Credential missing or expired.
    Unauthorized,
    /// Signed in, but not allowed to touch this resource.
    Forbidden,
    /// Input rejected with field-level messages.
    ValidationFailed,
    /// Anything else; the user may retry.
    Unknown,
}

impl Error {
    /// Builds an error from a non-success HTTP response.
    #[must_use]
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let fields = FieldErrors::from_body(body);
        let message = fields
            .summary()
            .map_or_else(|| reason(status, body), ToString::to_string);

        match status {
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::UNAUTHORIZED => Self::Unauthorized {
                status: status.as_u16(),
                message,
            },
            StatusCode::FORBIDDEN => Self::Forbidden(message),
            StatusCode::BAD_REQUEST if !fields.is_empty() => Self::Validation(fields),
            _ => Self::Status {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Returns the closed kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::Validation(_) => ErrorKind::ValidationFailed,
            Self::Http(_)
            | Self::Json(_)
            | Self::Url(_)
            | Self::Io(_)
            | Self::Status { .. }
            | Self::InvalidConfig(_) => ErrorKind::Unknown,
        }
    }

    /// Returns the field-level messages if this is a validation error.
    #[must_use]
    pub const fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(fields) => Some(fields),
            _ => None,
        }
    }
}

fn reason(status: StatusCode, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.starts_with('<') {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}

/// Field-level error messages returned by the server.
///
/// Messages are kept verbatim so the view can echo them next to the
/// offending input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a response body.
    ///
    /// Accepts `{"field": ["msg", ...]}`, `{"field": "msg"}`, bare strings
    /// and bare arrays. Anything that is not JSON becomes empty.
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str::<Value>(body).map_or_else(|_| Self::new(), |v| Self::from_value(&v))
    }

    /// Decodes an already-parsed JSON value.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let mut errors = Self::new();
        match value {
            Value::Object(map) => {
                for (field, messages) in map {
                    for message in flatten(messages) {
                        errors.push(field.clone(), message);
                    }
                }
            }
            other => {
                for message in flatten(other) {
                    errors.push(NON_FIELD_ERRORS, message);
                }
            }
        }
        errors
    }

    /// Adds a message for a field.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Returns all messages for a field.
    #[must_use]
    pub fn get(&self, field: &str) -> &[String] {
        self.fields.get(field).map_or(&[], Vec::as_slice)
    }

    /// Returns the first message for a field.
    #[must_use]
    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field).first().map(String::as_str)
    }

    /// Returns whether any field carries a message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.values().all(Vec::is_empty)
    }

    /// Iterates over `(field, messages)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// Picks the single most general message.
    ///
    /// Order: `non_field_errors`, `detail`, `error`, then the first field.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        [NON_FIELD_ERRORS, "detail", "error"]
            .iter()
            .find_map(|field| self.first(field))
            .or_else(|| self.fields.values().find_map(|m| m.first()).map(String::as_str))
    }
}

fn flatten(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items.iter().flat_map(flatten).collect(),
        Value::Object(map) => map.values().flat_map(flatten).collect(),
        other => vec![other.to_string()],
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in self.iter() {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                first = false;
                if field == NON_FIELD_ERRORS {
                    write!(f, "{message}")?;
                } else {
                    write!(f, "{field}: {message}")?;
                }
            }
        }
        Ok(())
    }
}
