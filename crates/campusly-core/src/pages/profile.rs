//! Profile page: one user's public profile and posts.

use async_trait::async_trait;
use campusly_api::{CurrentUser, Post, PostFilter, Profile, SocialApi};

use super::posts::{self, PostAction, PostConfirmed};
use crate::sync::{MutationEffect, Resource, SyncedView};

/// Route alias for the signed-in user's own profile.
pub const ME: &str = "me";

/// Profile page.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfilePage;

/// Profile view state.
pub type ProfileView = SyncedView<ProfilePage>;

/// A write on the profile page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileAction {
    /// Start following.
    Follow,
    /// Stop following.
    Unfollow,
    /// Post write.
    Post(PostAction),
}

/// Confirmed outcome of a [`ProfileAction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileConfirmed {
    /// Follow state after the write.
    Following(bool),
    /// Post write outcome.
    Post(PostConfirmed),
}

impl ProfileAction {
    /// The follow toggle for a profile in its current state.
    #[must_use]
    pub const fn toggle_follow(profile: &Profile) -> Self {
        if profile.is_following {
            Self::Unfollow
        } else {
            Self::Follow
        }
    }
}

async fn resolve(api: &dyn SocialApi, username: &str) -> campusly_api::Result<String> {
    if username == ME {
        Ok(api.current_user().await?.username)
    } else {
        Ok(username.to_string())
    }
}

#[async_trait]
impl Resource for ProfilePage {
    /// Username, or [`ME`].
    type Param = String;
    type Item = Profile;
    type Entry = Post;
    type Action = ProfileAction;
    type Confirmed = ProfileConfirmed;

    const NOT_FOUND: &'static str = "Profile not found.";

    fn parse_param(raw: &str) -> Option<String> {
        Some(raw.trim_start_matches('@').to_string()).filter(|u| !u.is_empty())
    }

    fn needs_user(username: &String) -> bool {
        username == ME
    }

    fn resolve_param(username: &String, user: &CurrentUser) -> String {
        if username == ME {
            user.username.clone()
        } else {
            username.clone()
        }
    }

    fn missing_target(action: &ProfileAction) -> &'static str {
        match action {
            ProfileAction::Follow | ProfileAction::Unfollow => Self::NOT_FOUND,
            ProfileAction::Post(_) => posts::NOT_FOUND,
        }
    }

    /// Expects a resolved username; [`ME`] is rewritten before the fetch.
    async fn fetch_resource(api: &dyn SocialApi, username: &String) -> campusly_api::Result<Profile> {
        api.profile(username).await
    }

    async fn fetch_list(api: &dyn SocialApi, username: &String) -> campusly_api::Result<Vec<Post>> {
        api.posts(&PostFilter::Author(username.clone())).await
    }

    async fn perform(
        api: &dyn SocialApi,
        username: &String,
        action: &ProfileAction,
    ) -> campusly_api::Result<ProfileConfirmed> {
        match action {
            ProfileAction::Follow => {
                let username = resolve(api, username).await?;
                api.follow(&username).await?;
                Ok(ProfileConfirmed::Following(true))
            }
            ProfileAction::Unfollow => {
                let username = resolve(api, username).await?;
                api.unfollow(&username).await?;
                Ok(ProfileConfirmed::Following(false))
            }
            ProfileAction::Post(action) => {
                posts::perform(api, action).await.map(ProfileConfirmed::Post)
            }
        }
    }

    fn reconcile(
        resource: &mut Option<Profile>,
        list: &mut Vec<Post>,
        confirmed: ProfileConfirmed,
    ) -> MutationEffect {
        match confirmed {
            ProfileConfirmed::Following(following) => {
                if let Some(profile) = resource {
                    apply_follow(profile, following);
                }
                MutationEffect::Patched
            }
            ProfileConfirmed::Post(confirmed) => posts::reconcile(list, confirmed),
        }
    }
}

fn apply_follow(profile: &mut Profile, following: bool) {
    if profile.is_following == following {
        return;
    }
    profile.is_following = following;
    profile.follower_count = if following {
        profile.follower_count.saturating_add(1)
    } else {
        profile.follower_count.saturating_sub(1)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusly_api::UserId;
    use proptest::prelude::*;

    fn profile(is_following: bool, follower_count: u32) -> Profile {
        Profile {
            id: UserId(2),
            username: "ravi".into(),
            bio: None,
            profile_photo: None,
            follower_count,
            following_count: 0,
            is_following,
        }
    }

    #[test]
    fn test_parse_param_strips_at() {
        assert_eq!(ProfilePage::parse_param("@ravi"), Some("ravi".into()));
        assert_eq!(ProfilePage::parse_param("@"), None);
    }

    #[test]
    fn test_toggle_follow_picks_opposite() {
        assert_eq!(ProfileAction::toggle_follow(&profile(false, 0)), ProfileAction::Follow);
        assert_eq!(ProfileAction::toggle_follow(&profile(true, 1)), ProfileAction::Unfollow);
    }

    proptest! {
        #[test]
        fn follow_patch_is_idempotent(start in any::<bool>(), target in any::<bool>(), count in 1u32..1000) {
            let mut once = profile(start, count);
            apply_follow(&mut once, target);
            let mut twice = once.clone();
            apply_follow(&mut twice, target);
            prop_assert_eq!(&once, &twice);
            prop_assert_eq!(once.is_following, target);
        }
    }
}
