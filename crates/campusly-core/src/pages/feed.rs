//! Home feed: the user's aggregated posts plus their groups.

use async_trait::async_trait;
use campusly_api::{Group, Post, SocialApi};

use super::posts::{self, PostAction, PostConfirmed};
use crate::sync::{MutationEffect, Resource, SyncedView};

/// Home feed page.
#[derive(Debug, Clone, Copy, Default)]
pub struct Feed;

/// Feed view state.
pub type FeedView = SyncedView<Feed>;

#[async_trait]
impl Resource for Feed {
    type Param = ();
    /// Groups the user belongs to, offered as composer destinations.
    type Item = Vec<Group>;
    type Entry = Post;
    type Action = PostAction;
    type Confirmed = PostConfirmed;

    const NOT_FOUND: &'static str = "Feed is unavailable.";
    const REQUIRES_PARAM: bool = false;

    fn parse_param(_raw: &str) -> Option<()> {
        Some(())
    }

    fn missing_target(_action: &PostAction) -> &'static str {
        posts::NOT_FOUND
    }

    async fn fetch_resource(api: &dyn SocialApi, _param: &()) -> campusly_api::Result<Vec<Group>> {
        api.my_groups().await
    }

    async fn fetch_list(api: &dyn SocialApi, _param: &()) -> campusly_api::Result<Vec<Post>> {
        api.feed().await
    }

    async fn perform(
        api: &dyn SocialApi,
        _param: &(),
        action: &PostAction,
    ) -> campusly_api::Result<PostConfirmed> {
        posts::perform(api, action).await
    }

    fn reconcile(
        _resource: &mut Option<Vec<Group>>,
        list: &mut Vec<Post>,
        confirmed: PostConfirmed,
    ) -> MutationEffect {
        posts::reconcile(list, confirmed)
    }
}
