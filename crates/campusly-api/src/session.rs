//! Session credential shared between the client and the application.
//!
//! The session is created once and handed to [`crate::ApiClient::new`];
//! the client reads it for every outbound request instead of reaching
//! into ambient storage.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// JWT access/refresh pair issued by `/auth/token/`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Short-lived access token sent as `Bearer`.
    pub access: String,
    /// Long-lived refresh token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
}

impl Credential {
    /// Creates a credential with only an access token.
    #[must_use]
    pub fn new(access: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: None,
        }
    }

    /// Sets the refresh token.
    #[must_use]
    pub fn with_refresh(mut self, refresh: impl Into<String>) -> Self {
        self.refresh = Some(refresh.into());
        self
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access", &"<redacted>")
            .field("refresh", &self.refresh.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Token pair response from `/auth/token/`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    /// Access token.
    pub access: String,
    /// Refresh token.
    pub refresh: String,
}

impl From<TokenPair> for Credential {
    fn from(pair: TokenPair) -> Self {
        Self::new(pair.access).with_refresh(pair.refresh)
    }
}

/// Response from `/auth/token/refresh/`.
///
/// `refresh` is only present when the server rotates refresh tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshedToken {
    /// New access token.
    pub access: String,
    /// Rotated refresh token.
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Shared, mutable holder of the current credential.
#[derive(Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<Option<Credential>>>,
}

impl Session {
    /// Creates an anonymous session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session already holding a credential.
    #[must_use]
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(credential))),
        }
    }

    /// Returns a copy of the current credential.
    pub async fn credential(&self) -> Option<Credential> {
        self.inner.read().await.clone()
    }

    /// Returns the access token to attach as `Bearer`.
    pub async fn bearer(&self) -> Option<String> {
        self.inner.read().await.as_ref().map(|c| c.access.clone())
    }

    /// Returns the refresh token if one is held.
    pub async fn refresh_token(&self) -> Option<String> {
        self.inner
            .read()
            .await
            .as_ref()
            .and_then(|c| c.refresh.clone())
    }

    /// Returns whether a credential is held.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.is_some()
    }

    /// Replaces the credential.
    pub async fn set(&self, credential: Credential) {
        *self.inner.write().await = Some(credential);
    }

    /// Applies a refresh response, keeping the old refresh token unless rotated.
    pub async fn apply_refresh(&self, refreshed: RefreshedToken) -> Credential {
        let mut guard = self.inner.write().await;
        let refresh = refreshed
            .refresh
            .or_else(|| guard.as_ref().and_then(|c| c.refresh.clone()));
        let credential = Credential {
            access: refreshed.access,
            refresh,
        };
        *guard = Some(credential.clone());
        credential
    }

    /// Drops the credential.
    pub async fn clear(&self) {
        *self.inner.write().await = None;
    }

    /// Drops the credential only if it still carries `access`.
    ///
    /// Returns `false` when a newer credential has replaced it.
    pub async fn clear_if(&self, access: &str) -> bool {
        let mut guard = self.inner.write().await;
        if guard.as_ref().is_some_and(|c| c.access == access) {
            *guard = None;
            true
        } else {
            false
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_anonymous_session_has_no_bearer() {
        let session = Session::new();
        assert!(!session.is_authenticated().await);
        assert!(session.bearer().await.is_none());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let session = Session::new();
        let other = session.clone();
        session.set(Credential::new("abc")).await;
        assert_eq!(other.bearer().await.as_deref(), Some("abc"));
        other.clear().await;
        assert!(!session.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_refresh_keeps_refresh_token_unless_rotated() {
        let session = Session::with_credential(Credential::new("old").with_refresh("r1"));
        let cred = session
            .apply_refresh(RefreshedToken {
                access: "new".into(),
                refresh: None,
            })
            .await;
        assert_eq!(cred.access, "new");
        assert_eq!(cred.refresh.as_deref(), Some("r1"));

        let cred = session
            .apply_refresh(RefreshedToken {
                access: "newer".into(),
                refresh: Some("r2".into()),
            })
            .await;
        assert_eq!(cred.refresh.as_deref(), Some("r2"));
    }

    #[tokio::test]
    async fn test_clear_if_keeps_newer_credential() {
        let session = Session::with_credential(Credential::new("newer"));
        assert!(!session.clear_if("older").await);
        assert_eq!(session.bearer().await.as_deref(), Some("newer"));
        assert!(session.clear_if("newer").await);
        assert!(!session.is_authenticated().await);
    }

    #[test]
    fn test_refresh_token_absent_for_access_only_credential() {
        let session = Session::with_credential(Credential::new("only-access"));
        assert!(tokio_test::block_on(session.refresh_token()).is_none());
        assert_eq!(
            tokio_test::block_on(session.bearer()).as_deref(),
            Some("only-access")
        );
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let cred = Credential::new("secret-access").with_refresh("secret-refresh");
        let shown = format!("{cred:?}");
        assert!(!shown.contains("secret"));
    }

    #[test]
    fn test_token_pair_deserialization() {
        let pair: TokenPair = serde_json::from_str(r#"{"access":"a","refresh":"r"}"#).unwrap();
        let cred = Credential::from(pair);
        assert_eq!(cred.access, "a");
        assert_eq!(cred.refresh.as_deref(), Some("r"));
    }
}
