//! Page view-state containers.
//!
//! Feed, groups index, group detail and profile are [`crate::Resource`]
//! implementations driven by [`crate::SyncedView`]. Search, settings and
//! create-post have their own small state machines.

mod create_post;
mod feed;
mod group;
mod groups;
mod posts;
mod profile;
mod search;
mod settings;

pub use create_post::{CreatePostPage, Destination};
pub use feed::{Feed, FeedView};
pub use group::{GroupAction, GroupConfirmed, GroupDetail, GroupView};
pub use groups::{GroupsAction, GroupsConfirmed, GroupsIndex, GroupsView};
pub use posts::{PostAction, PostConfirmed};
pub use profile::{ME, ProfileAction, ProfileConfirmed, ProfilePage, ProfileView};
pub use search::{SearchOutcome, SearchPage};
pub use settings::{SettingsPage, SettingsSubmission};

pub(crate) use group::apply_membership;
