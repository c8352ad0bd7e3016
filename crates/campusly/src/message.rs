//! Application messages for the Elm architecture.

use campusly_api::{
    Acknowledgement, Comment, Credential, CurrentUser, Group, GroupId, Post, PostId, UserId,
    UserSummary,
};
use campusly_core::pages::{Destination, Feed, GroupDetail, GroupsIndex, ProfilePage, SearchOutcome};
use campusly_core::{Loaded, Mutated, ViewError};

/// All messages that can be sent in the application.
#[derive(Debug, Clone)]
pub enum Message {
    // Navigation
    /// Switch to a page.
    Navigate(Route),
    /// Reload the current page.
    Refresh,
    /// Sign out and forget the stored session.
    Logout,
    /// Flip between light and dark.
    ToggleTheme,
    /// Config write finished.
    ConfigSaved(Result<(), String>),
    /// Keyboard shortcut (or an ignored key).
    Keyboard(Option<Shortcut>),

    // Authentication
    /// Login form interaction.
    Login(LoginMessage),
    /// Registration form interaction.
    Register(RegisterMessage),

    // Page loads
    /// Feed load settled.
    FeedLoaded(Loaded<Feed>),
    /// Groups index load settled.
    GroupsLoaded(Loaded<GroupsIndex>),
    /// Group detail load settled.
    GroupLoaded(Loaded<GroupDetail>),
    /// Profile load settled.
    ProfileLoaded(Loaded<ProfilePage>),

    // Page writes
    /// Feed write settled.
    FeedMutated(Mutated<Feed>),
    /// Groups index write settled.
    GroupsMutated(Mutated<GroupsIndex>),
    /// Group detail write settled.
    GroupMutated(Mutated<GroupDetail>),
    /// Profile write settled.
    ProfileMutated(Mutated<ProfilePage>),
    /// Join or leave a group.
    ToggleMembership(GroupId),
    /// Follow or unfollow the shown profile.
    ToggleFollow,

    // Sub-views
    /// Post card interaction (comments, edit, delete).
    Post(PostMessage),
    /// User search page.
    Search(SearchMessage),
    /// Settings page.
    Settings(SettingsMessage),
    /// Create-post page.
    CreatePost(CreatePostMessage),
    /// Create-group modal.
    CreateGroup(CreateGroupMessage),
    /// Add-member modal.
    AddMember(AddMemberMessage),
}

/// Pages the app can show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    /// Sign-in form.
    #[default]
    Login,
    /// Two-step registration.
    Register,
    /// Home feed.
    Feed,
    /// All groups.
    Groups,
    /// One group, by raw route id.
    Group(String),
    /// One profile, by username or `me`.
    Profile(String),
    /// User search.
    Search,
    /// Profile settings.
    Settings,
    /// New post.
    CreatePost,
}

impl Route {
    /// Whether the page needs a signed-in user.
    pub const fn requires_session(&self) -> bool {
        !matches!(self, Self::Login | Self::Register)
    }
}

/// Keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Escape: close whatever modal is open.
    Dismiss,
    /// Ctrl+R: reload the page.
    Refresh,
}

/// Login form messages.
#[derive(Debug, Clone)]
pub enum LoginMessage {
    EmailChanged(String),
    PasswordChanged(String),
    Submit,
    Finished(Result<Credential, ViewError>),
}

/// Registration form messages.
#[derive(Debug, Clone)]
pub enum RegisterMessage {
    EmailChanged(String),
    PasswordChanged(String),
    OtpChanged(String),
    SubmitDetails,
    DetailsFinished(Result<Acknowledgement, ViewError>),
    SubmitOtp,
    VerifyFinished(Result<Acknowledgement, ViewError>),
}

/// Post card messages, routed to whichever page shows the post.
#[derive(Debug, Clone)]
pub enum PostMessage {
    CommentChanged(PostId, String),
    CommentSubmit(PostId),
    CommentFinished(PostId, Result<Comment, ViewError>),
    /// Open the edit modal for a post.
    Edit(Post),
    EditChanged(String),
    EditSubmit,
    EditCancel,
    /// Ask for delete confirmation.
    Delete(PostId),
    DeleteConfirm,
    DeleteCancel,
}

/// Search page messages.
#[derive(Debug, Clone)]
pub enum SearchMessage {
    QueryChanged(String),
    /// Debounce window elapsed; `None` if superseded.
    Settled(Option<String>),
    Finished(SearchOutcome),
}

/// Settings page messages.
#[derive(Debug, Clone)]
pub enum SettingsMessage {
    Loaded(Result<CurrentUser, ViewError>),
    BioChanged(String),
    PhotoPathChanged(String),
    Submit,
    Saved(Result<CurrentUser, ViewError>),
}

/// Create-post page messages.
#[derive(Debug, Clone)]
pub enum CreatePostMessage {
    GroupsLoaded(Result<Vec<Group>, ViewError>),
    ContentChanged(String),
    DestinationSelected(Destination),
    Submit,
    Finished(Result<Post, ViewError>),
}

/// Create-group modal messages.
#[derive(Debug, Clone)]
pub enum CreateGroupMessage {
    Open,
    NameChanged(String),
    DescriptionChanged(String),
    Submit,
    Cancel,
    Finished(Result<Group, ViewError>),
}

/// Add-member modal messages.
#[derive(Debug, Clone)]
pub enum AddMemberMessage {
    Open(GroupId),
    QueryChanged(String),
    Settled(Option<String>),
    Results(SearchOutcome),
    Add(UserSummary),
    Finished(UserId, Result<Acknowledgement, ViewError>),
    Close,
}
