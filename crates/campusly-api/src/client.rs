//! Configured HTTP client.
//!
//! Every request is built by [`ApiClient::send`], which attaches the
//! session's bearer token, decodes failures into [`Error`], and replays
//! a request once after refreshing an expired access token.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, Response, StatusCode, multipart};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::model::ProfileUpdate;
use crate::session::{Credential, Session};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Request body variants.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Payload<'a> {
    /// No body.
    Empty,
    /// JSON body.
    Json(&'a serde_json::Value),
    /// Multipart profile update.
    Profile(&'a ProfileUpdate),
}

/// One API call, rebuilt on replay.
#[derive(Debug, Clone)]
pub(crate) struct Call<'a> {
    pub method: Method,
    pub segments: &'a [&'a str],
    pub query: &'a [(&'static str, String)],
    pub payload: Payload<'a>,
}

impl<'a> Call<'a> {
    pub const fn get(segments: &'a [&'a str]) -> Self {
        Self {
            method: Method::GET,
            segments,
            query: &[],
            payload: Payload::Empty,
        }
    }

    pub const fn post(segments: &'a [&'a str], body: &'a serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            segments,
            query: &[],
            payload: Payload::Json(body),
        }
    }

    pub fn with_query(mut self, query: &'a [(&'static str, String)]) -> Self {
        self.query = query;
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }
}

/// Called with every credential obtained by a token refresh.
pub type RefreshHook = Arc<dyn Fn(&Credential) + Send + Sync>;

/// HTTP client bound to one API base URL and one [`Session`].
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
    /// Held for the whole refresh exchange so parallel 401s refresh once.
    refresh_lock: Arc<Mutex<()>>,
    on_refresh: Option<RefreshHook>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str, session: Session) -> Result<Self> {
        Self::with_timeout(base_url, session, DEFAULT_TIMEOUT)
    }

    /// Creates a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn with_timeout(base_url: &str, session: Session, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url.trim())?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidConfig(format!(
                "API base URL {base_url} cannot carry a path"
            )));
        }

        // Cookies carry the pending registration between the two OTP steps.
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            http,
            base_url,
            session,
            refresh_lock: Arc::new(Mutex::new(())),
            on_refresh: None,
        })
    }

    /// Registers a callback for refreshed credentials, e.g. to persist them.
    #[must_use]
    pub fn on_refresh(mut self, hook: impl Fn(&Credential) + Send + Sync + 'static) -> Self {
        self.on_refresh = Some(Arc::new(hook));
        self
    }

    /// Returns the session this client authenticates with.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the URL for a path given as segments; always ends in `/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot carry path segments.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| Error::InvalidConfig("API base URL cannot carry a path".into()))?;
            path.pop_if_empty();
            path.extend(segments);
            path.push("");
        }
        Ok(url)
    }

    /// Sends a call and decodes a JSON response.
    pub(crate) async fn json<R: DeserializeOwned>(&self, call: Call<'_>) -> Result<R> {
        let response = self.send(call).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(Into::into)
    }

    /// Sends a call and discards the response body.
    pub(crate) async fn empty(&self, call: Call<'_>) -> Result<()> {
        self.send(call).await.map(drop)
    }

    /// Sends a call, refreshing the access token once on 401.
    pub(crate) async fn send(&self, call: Call<'_>) -> Result<Response> {
        let sent = self.session.bearer().await;
        let response = self.dispatch(&call, sent.as_deref()).await?;
        if response.status() != StatusCode::UNAUTHORIZED || is_token_call(call.segments) {
            return check(response).await;
        }
        let Some(stale) = sent else {
            return check(response).await;
        };

        let _guard = self.refresh_lock.lock().await;
        let Some(current) = self.session.credential().await else {
            return check(response).await;
        };
        if current.access != stale {
            debug!("Access token already refreshed, replaying request");
            return check(self.dispatch(&call, Some(&current.access)).await?).await;
        }
        let Some(refresh) = current.refresh else {
            return check(response).await;
        };

        debug!("Access token rejected, attempting refresh");
        match self.refresh_with(&refresh).await {
            Ok(credential) => check(self.dispatch(&call, Some(&credential.access)).await?).await,
            Err(e) => {
                warn!("Token refresh failed: {e}");
                if !matches!(e, Error::Http(_)) {
                    self.session.clear_if(&stale).await;
                }
                check(response).await
            }
        }
    }

    /// Builds and sends the request without interpreting the status.
    async fn dispatch(&self, call: &Call<'_>, bearer: Option<&str>) -> Result<Response> {
        let url = self.endpoint(call.segments)?;
        debug!(method = %call.method, %url, "Sending request");

        let mut builder = self.http.request(call.method.clone(), url);
        if !call.query.is_empty() {
            builder = builder.query(call.query);
        }
        builder = match call.payload {
            Payload::Empty => builder,
            Payload::Json(body) => builder.json(body),
            Payload::Profile(update) => builder.multipart(profile_form(update)?),
        };
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }

        builder.send().await.map_err(Into::into)
    }

    /// Exchanges the refresh token and stores the new credential.
    ///
    /// Callers that may race should hold `refresh_lock`.
    async fn refresh_with(&self, refresh: &str) -> Result<Credential> {
        let body = serde_json::json!({ "refresh": refresh });
        let response = self
            .dispatch(&Call::post(&["auth", "token", "refresh"], &body), None)
            .await?;
        let response = check(response).await?;
        let refreshed = response.json().await?;
        let credential = self.session.apply_refresh(refreshed).await;
        if let Some(hook) = &self.on_refresh {
            hook(&credential);
        }
        Ok(credential)
    }

    /// Refreshes under the client's refresh lock.
    pub(crate) async fn refresh_locked(&self, refresh: &str) -> Result<Credential> {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_with(refresh).await
    }
}

fn is_token_call(segments: &[&str]) -> bool {
    segments.starts_with(&["auth", "token"])
}

async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let error = Error::from_response(status, &body);
    debug!(%status, "Request failed: {error}");
    Err(error)
}

fn profile_form(update: &ProfileUpdate) -> Result<multipart::Form> {
    let mut form = multipart::Form::new().text("bio", update.bio.clone());
    if let Some(photo) = &update.photo {
        let part = multipart::Part::bytes(photo.bytes.clone())
            .file_name(photo.file_name.clone())
            .mime_str(&photo.mime)?;
        form = form.part("profile_photo", part);
    }
    Ok(form)
}
