use std::sync::Arc;

use campusly_api::{CurrentUser, ErrorKind, SocialApi};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::error::ViewError;
use super::resource::Resource;
use super::scope::ViewScope;

/// What the caller should do after a load settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadEffect {
    /// State now reflects the server.
    Ready,
    /// Load failed; `error` is set.
    Failed,
    /// Session is invalid; the stored credential must be cleared.
    RedirectToLogin,
    /// Result was stale or the view is gone; nothing changed.
    Discarded,
}

/// What the caller should do after a mutation settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationEffect {
    /// Local state was patched with confirmed values.
    Patched,
    /// A full reload is needed.
    Reload,
    /// Write failed; `notice` is set and state is unchanged.
    Failed,
    /// Session is invalid; the stored credential must be cleared.
    RedirectToLogin,
    /// Result belongs to a different parameter or an unmounted view.
    Discarded,
}

/// Everything a load needs, detached from the view.
#[derive(Debug, Clone)]
pub struct LoadTicket<R: Resource> {
    generation: u64,
    param: R::Param,
    token: CancellationToken,
}

/// Everything a load read, all at once.
#[derive(Debug, Clone)]
pub struct Snapshot<R: Resource> {
    /// Signed-in user.
    pub user: CurrentUser,
    /// Primary resource.
    pub resource: R::Item,
    /// Related list.
    pub list: Vec<R::Entry>,
}

/// Settled load, ready for [`SyncedView::apply`].
#[derive(Debug, Clone)]
pub struct Loaded<R: Resource> {
    generation: u64,
    outcome: Result<Snapshot<R>, ViewError>,
}

impl<R: Resource> Loaded<R> {
    /// The load outcome.
    #[must_use]
    pub const fn outcome(&self) -> &Result<Snapshot<R>, ViewError> {
        &self.outcome
    }
}

/// One pending write, detached from the view.
#[derive(Debug, Clone)]
pub struct MutationTicket<R: Resource> {
    param: R::Param,
    action: R::Action,
    token: CancellationToken,
}

/// Settled write, ready for [`SyncedView::apply_mutation`].
#[derive(Debug, Clone)]
pub struct Mutated<R: Resource> {
    param: R::Param,
    outcome: Result<R::Confirmed, ViewError>,
}

/// View state for one page.
#[derive(Debug)]
pub struct SyncedView<R: Resource> {
    /// Signed-in user from the last successful load.
    pub user: Option<CurrentUser>,
    /// Primary resource from the last successful load.
    pub resource: Option<R::Item>,
    /// Related list from the last successful load.
    pub list: Vec<R::Entry>,
    /// True from `begin` until the matching `apply`.
    pub loading: bool,
    /// Load failure shown in place of content.
    pub error: Option<ViewError>,
    /// Transient message from a failed mutation.
    pub notice: Option<String>,
    param: Option<R::Param>,
    generation: u64,
    scope: ViewScope,
}

impl<R: Resource> Default for SyncedView<R> {
    fn default() -> Self {
        Self {
            user: None,
            resource: None,
            list: Vec::new(),
            loading: false,
            error: None,
            notice: None,
            param: None,
            generation: 0,
            scope: ViewScope::new(),
        }
    }
}

impl<R: Resource> SyncedView<R> {
    /// Creates an empty, mounted view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The parameter of the most recent load.
    #[must_use]
    pub const fn param(&self) -> Option<&R::Param> {
        self.param.as_ref()
    }

    /// Starts a load.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::MissingParameter`] for an empty parameter and
    /// the page's not-found error for one that names nothing. Either way no
    /// request should be made and `loading` stays false.
    pub fn begin(&mut self, raw: &str) -> Result<LoadTicket<R>, ViewError> {
        let raw = raw.trim();
        if R::REQUIRES_PARAM && raw.is_empty() {
            return Err(self.reject(ViewError::MissingParameter));
        }
        let Some(param) = R::parse_param(raw) else {
            self.resource = None;
            self.list.clear();
            return Err(self.reject(ViewError::NotFound(R::NOT_FOUND.to_string())));
        };

        if self.scope.is_cancelled() {
            self.scope = ViewScope::new();
        }
        self.generation += 1;
        self.loading = true;
        self.param = Some(param.clone());
        debug!(generation = self.generation, ?param, "Loading view");

        Ok(LoadTicket {
            generation: self.generation,
            param,
            token: self.scope.child(),
        })
    }

    fn reject(&mut self, error: ViewError) -> ViewError {
        self.generation += 1;
        self.loading = false;
        self.error = Some(error.clone());
        error
    }

    /// Applies a settled load.
    pub fn apply(&mut self, loaded: Loaded<R>) -> LoadEffect {
        if loaded.generation != self.generation || self.scope.is_cancelled() {
            debug!(
                stale = loaded.generation,
                current = self.generation,
                "Discarding load result"
            );
            return LoadEffect::Discarded;
        }
        self.loading = false;

        match loaded.outcome {
            Ok(snapshot) => {
                self.user = Some(snapshot.user);
                self.resource = Some(snapshot.resource);
                self.list = snapshot.list;
                self.error = None;
                LoadEffect::Ready
            }
            Err(ViewError::Cancelled) => LoadEffect::Discarded,
            Err(ViewError::Unauthorized) => {
                self.user = None;
                self.resource = None;
                self.list.clear();
                self.error = Some(ViewError::Unauthorized);
                LoadEffect::RedirectToLogin
            }
            Err(error @ ViewError::NotFound(_)) => {
                self.resource = None;
                self.list.clear();
                self.error = Some(error);
                LoadEffect::Failed
            }
            Err(error) => {
                self.error = Some(error);
                LoadEffect::Failed
            }
        }
    }

    /// Begins, fetches and applies a load in one step.
    pub async fn load(&mut self, api: &Arc<dyn SocialApi>, raw: &str) -> LoadEffect {
        match self.begin(raw) {
            Ok(ticket) => {
                let loaded = fetch(Arc::clone(api), ticket).await;
                self.apply(loaded)
            }
            Err(_) => LoadEffect::Failed,
        }
    }

    /// Starts a write against the currently loaded parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::MissingParameter`] if nothing has been loaded.
    pub fn begin_mutation(&mut self, action: R::Action) -> Result<MutationTicket<R>, ViewError> {
        let Some(param) = self.param.clone() else {
            self.notice = Some(ViewError::MissingParameter.to_string());
            return Err(ViewError::MissingParameter);
        };
        self.notice = None;
        Ok(MutationTicket {
            param,
            action,
            token: self.scope.child(),
        })
    }

    /// Applies a settled write.
    pub fn apply_mutation(&mut self, mutated: Mutated<R>) -> MutationEffect {
        if self.scope.is_cancelled() || self.param.as_ref() != Some(&mutated.param) {
            debug!("Discarding mutation result for another view");
            return MutationEffect::Discarded;
        }

        match mutated.outcome {
            Ok(confirmed) => R::reconcile(&mut self.resource, &mut self.list, confirmed),
            Err(ViewError::Cancelled) => MutationEffect::Discarded,
            Err(ViewError::Unauthorized) => {
                self.notice = Some(ViewError::Unauthorized.to_string());
                MutationEffect::RedirectToLogin
            }
            Err(error) => {
                self.notice = Some(error.summary());
                MutationEffect::Failed
            }
        }
    }

    /// Begins, performs and applies a write in one step.
    pub async fn mutate(&mut self, api: &Arc<dyn SocialApi>, action: R::Action) -> MutationEffect {
        match self.begin_mutation(action) {
            Ok(ticket) => {
                let mutated = perform(Arc::clone(api), ticket).await;
                self.apply_mutation(mutated)
            }
            Err(_) => MutationEffect::Failed,
        }
    }

    /// Cancels in-flight work; later results are discarded.
    pub fn unmount(&mut self) {
        self.scope.cancel();
        self.loading = false;
    }

    /// Whether the view has been unmounted.
    #[must_use]
    pub fn is_unmounted(&self) -> bool {
        self.scope.is_cancelled()
    }
}

/// Reads user, resource and list concurrently.
///
/// The first failure short-circuits the others. A parameter that names the
/// user (see [`Resource::needs_user`]) is resolved from one user read first.
/// An expired session is also cleared so the client stops sending a dead
/// token.
pub async fn fetch<R: Resource>(api: Arc<dyn SocialApi>, ticket: LoadTicket<R>) -> Loaded<R> {
    let LoadTicket {
        generation,
        param,
        token,
    } = ticket;

    let reads = async {
        if !R::needs_user(&param) {
            return tokio::try_join!(
                api.current_user(),
                R::fetch_resource(api.as_ref(), &param),
                R::fetch_list(api.as_ref(), &param),
            );
        }
        let user = api.current_user().await?;
        let param = R::resolve_param(&param, &user);
        let (resource, list) = tokio::try_join!(
            R::fetch_resource(api.as_ref(), &param),
            R::fetch_list(api.as_ref(), &param),
        )?;
        Ok::<_, campusly_api::Error>((user, resource, list))
    };

    let outcome = match ViewScope::run(&token, reads).await {
        None => Err(ViewError::Cancelled),
        Some(Ok((user, resource, list))) => Ok(Snapshot {
            user,
            resource,
            list,
        }),
        Some(Err(error)) => Err(classify(api.as_ref(), &error, R::NOT_FOUND).await),
    };

    Loaded {
        generation,
        outcome,
    }
}

/// Issues the ticket's single write request.
pub async fn perform<R: Resource>(api: Arc<dyn SocialApi>, ticket: MutationTicket<R>) -> Mutated<R> {
    let MutationTicket {
        param,
        action,
        token,
    } = ticket;
    debug!(?action, "Performing mutation");

    let outcome = match ViewScope::run(&token, R::perform(api.as_ref(), &param, &action)).await {
        None => Err(ViewError::Cancelled),
        Some(Ok(confirmed)) => Ok(confirmed),
        Some(Err(error)) => {
            Err(classify(api.as_ref(), &error, R::missing_target(&action)).await)
        }
    };

    Mutated { param, outcome }
}

async fn classify(api: &dyn SocialApi, error: &campusly_api::Error, not_found: &str) -> ViewError {
    if error.kind() == ErrorKind::Unauthorized {
        warn!("Session rejected: {error}");
        api.logout().await;
    } else {
        warn!("Request failed: {error}");
    }
    ViewError::from_api(error, not_found)
}
