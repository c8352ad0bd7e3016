//! Object-safe view of every API operation.
//!
//! Higher layers depend on [`SocialApi`] rather than [`ApiClient`] so that
//! tests can substitute an in-memory backend.

use async_trait::async_trait;

use crate::client::ApiClient;
use crate::error::Result;
use crate::model::{
    Acknowledgement, Comment, CurrentUser, Group, GroupId, MembershipChange, NewGroup, NewPost,
    Post, PostFilter, PostId, Profile, ProfileUpdate, UserSummary,
};
use crate::session::Credential;

/// Every remote operation the application performs.
#[async_trait]
pub trait SocialApi: Send + Sync + 'static {
    /// Signs in and stores the credential in the session.
    async fn login(&self, email: &str, password: &str) -> Result<Credential>;
    /// Forgets the session credential.
    async fn logout(&self);
    /// Starts registration.
    async fn register(&self, email: &str, password: &str) -> Result<Acknowledgement>;
    /// Completes registration with the emailed code.
    async fn verify_registration(&self, otp: &str) -> Result<Acknowledgement>;
    /// Fetches the signed-in user.
    async fn current_user(&self) -> Result<CurrentUser>;
    /// Updates the signed-in user's bio and photo.
    async fn update_current_user(&self, update: &ProfileUpdate) -> Result<CurrentUser>;

    /// Fetches the personal feed.
    async fn feed(&self) -> Result<Vec<Post>>;
    /// Lists posts matching a filter.
    async fn posts(&self, filter: &PostFilter) -> Result<Vec<Post>>;
    /// Creates a post.
    async fn create_post(&self, post: &NewPost) -> Result<Post>;
    /// Replaces a post's content.
    async fn update_post(&self, id: PostId, content: &str) -> Result<Post>;
    /// Deletes a post.
    async fn delete_post(&self, id: PostId) -> Result<()>;
    /// Comments on a post.
    async fn add_comment(&self, post: PostId, content: &str) -> Result<Comment>;

    /// Lists all groups.
    async fn groups(&self) -> Result<Vec<Group>>;
    /// Lists the signed-in user's groups.
    async fn my_groups(&self) -> Result<Vec<Group>>;
    /// Fetches one group.
    async fn group(&self, id: GroupId) -> Result<Group>;
    /// Creates a group.
    async fn create_group(&self, group: &NewGroup) -> Result<Group>;
    /// Joins or leaves a group.
    async fn toggle_membership(&self, id: GroupId) -> Result<MembershipChange>;
    /// Adds a member to an owned group.
    async fn add_member(&self, id: GroupId, username: &str) -> Result<Acknowledgement>;

    /// Searches users.
    async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>>;
    /// Fetches a public profile.
    async fn profile(&self, username: &str) -> Result<Profile>;
    /// Follows a user.
    async fn follow(&self, username: &str) -> Result<Acknowledgement>;
    /// Unfollows a user.
    async fn unfollow(&self, username: &str) -> Result<()>;
}

#[async_trait]
impl SocialApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<Credential> {
        Self::login(self, email, password).await
    }

    async fn logout(&self) {
        Self::logout(self).await;
    }

    async fn register(&self, email: &str, password: &str) -> Result<Acknowledgement> {
        Self::register(self, email, password).await
    }

    async fn verify_registration(&self, otp: &str) -> Result<Acknowledgement> {
        Self::verify_registration(self, otp).await
    }

    async fn current_user(&self) -> Result<CurrentUser> {
        Self::current_user(self).await
    }

    async fn update_current_user(&self, update: &ProfileUpdate) -> Result<CurrentUser> {
        Self::update_current_user(self, update).await
    }

    async fn feed(&self) -> Result<Vec<Post>> {
        Self::feed(self).await
    }

    async fn posts(&self, filter: &PostFilter) -> Result<Vec<Post>> {
        Self::posts(self, filter).await
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post> {
        Self::create_post(self, post).await
    }

    async fn update_post(&self, id: PostId, content: &str) -> Result<Post> {
        Self::update_post(self, id, content).await
    }

    async fn delete_post(&self, id: PostId) -> Result<()> {
        Self::delete_post(self, id).await
    }

    async fn add_comment(&self, post: PostId, content: &str) -> Result<Comment> {
        Self::add_comment(self, post, content).await
    }

    async fn groups(&self) -> Result<Vec<Group>> {
        Self::groups(self).await
    }

    async fn my_groups(&self) -> Result<Vec<Group>> {
        Self::my_groups(self).await
    }

    async fn group(&self, id: GroupId) -> Result<Group> {
        Self::group(self, id).await
    }

    async fn create_group(&self, group: &NewGroup) -> Result<Group> {
        Self::create_group(self, group).await
    }

    async fn toggle_membership(&self, id: GroupId) -> Result<MembershipChange> {
        Self::toggle_membership(self, id).await
    }

    async fn add_member(&self, id: GroupId, username: &str) -> Result<Acknowledgement> {
        Self::add_member(self, id, username).await
    }

    async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>> {
        Self::search_users(self, query).await
    }

    async fn profile(&self, username: &str) -> Result<Profile> {
        Self::profile(self, username).await
    }

    async fn follow(&self, username: &str) -> Result<Acknowledgement> {
        Self::follow(self, username).await
    }

    async fn unfollow(&self, username: &str) -> Result<()> {
        Self::unfollow(self, username).await
    }
}
