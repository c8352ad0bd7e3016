use std::fmt;

use async_trait::async_trait;
use campusly_api::{CurrentUser, SocialApi};

use super::view::MutationEffect;

/// A page backed by one primary resource and one related list.
///
/// Implementations are zero-sized markers; state lives in
/// [`super::SyncedView`].
#[async_trait]
pub trait Resource: fmt::Debug + Clone + Send + Sync + 'static {
    /// Parsed route parameter.
    type Param: fmt::Debug + Clone + PartialEq + Send + Sync + 'static;
    /// Primary resource.
    type Item: fmt::Debug + Clone + Send + Sync + 'static;
    /// Element of the related list.
    type Entry: fmt::Debug + Clone + Send + Sync + 'static;
    /// Write the page can issue.
    type Action: fmt::Debug + Clone + Send + Sync + 'static;
    /// Server-confirmed result of an action.
    type Confirmed: fmt::Debug + Clone + Send + Sync + 'static;

    /// Message shown when the primary resource does not exist.
    const NOT_FOUND: &'static str;

    /// Message shown when the target of a write no longer exists.
    fn missing_target(_action: &Self::Action) -> &'static str {
        Self::NOT_FOUND
    }

    /// Whether the parameter can only be resolved once the user is known.
    fn needs_user(_param: &Self::Param) -> bool {
        false
    }

    /// Rewrites the parameter using the signed-in user.
    fn resolve_param(param: &Self::Param, _user: &CurrentUser) -> Self::Param {
        param.clone()
    }

    /// Whether an empty route parameter is an error.
    const REQUIRES_PARAM: bool = true;

    /// Parses a non-empty route parameter; `None` means it names nothing.
    fn parse_param(raw: &str) -> Option<Self::Param>;

    /// Reads the primary resource.
    async fn fetch_resource(
        api: &dyn SocialApi,
        param: &Self::Param,
    ) -> campusly_api::Result<Self::Item>;

    /// Reads the related list.
    async fn fetch_list(
        api: &dyn SocialApi,
        param: &Self::Param,
    ) -> campusly_api::Result<Vec<Self::Entry>>;

    /// Issues exactly one write request.
    async fn perform(
        api: &dyn SocialApi,
        param: &Self::Param,
        action: &Self::Action,
    ) -> campusly_api::Result<Self::Confirmed>;

    /// Folds a confirmed result into local state.
    ///
    /// Must be idempotent: applying the same value twice changes nothing.
    fn reconcile(
        resource: &mut Option<Self::Item>,
        list: &mut Vec<Self::Entry>,
        confirmed: Self::Confirmed,
    ) -> MutationEffect;
}
