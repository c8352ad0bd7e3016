//! Payload types exchanged with the API.
//!
//! These mirror the server's serializers; the client never treats them
//! as authoritative.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Creates an identifier.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

id_type!(
    /// User identifier.
    UserId
);
id_type!(
    /// Post identifier.
    PostId
);
id_type!(
    /// Comment identifier.
    CommentId
);
id_type!(
    /// Group identifier.
    GroupId
);

/// The signed-in user, from `/auth/users/me/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User ID.
    pub id: UserId,
    /// Public handle.
    pub username: String,
    /// Login email.
    #[serde(default)]
    pub email: Option<String>,
    /// Free-form biography.
    #[serde(default)]
    pub bio: Option<String>,
    /// Photo URL.
    #[serde(default)]
    pub profile_photo: Option<String>,
}

/// A user's public profile, from `/users/{username}/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// User ID.
    pub id: UserId,
    /// Public handle.
    pub username: String,
    /// Free-form biography.
    #[serde(default)]
    pub bio: Option<String>,
    /// Photo URL.
    #[serde(default)]
    pub profile_photo: Option<String>,
    /// Number of followers.
    #[serde(default)]
    pub follower_count: u32,
    /// Number of followed users.
    #[serde(default)]
    pub following_count: u32,
    /// Whether the signed-in user follows this profile.
    #[serde(default)]
    pub is_following: bool,
}

/// A comment embedded in a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment ID.
    pub id: CommentId,
    /// Text.
    pub content: String,
    /// Author user ID.
    pub author: UserId,
    /// Author handle.
    pub author_username: String,
    /// Post the comment belongs to.
    pub post: PostId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// A post, personal or in a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Post ID.
    pub id: PostId,
    /// Text.
    pub content: String,
    /// Author user ID.
    pub author: UserId,
    /// Author handle.
    pub author_username: String,
    /// Author photo URL.
    #[serde(default)]
    pub author_profile_photo: Option<String>,
    /// Group the post was made in, `None` for the personal feed.
    #[serde(default)]
    pub group: Option<GroupId>,
    /// Comments in server order.
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last edit time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Returns whether the given user wrote this post.
    #[must_use]
    pub fn is_authored_by(&self, username: &str) -> bool {
        self.author_username == username
    }
}

/// A group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Group ID.
    pub id: GroupId,
    /// Unique name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Number of members.
    #[serde(default)]
    pub member_count: u32,
    /// Owner user ID.
    #[serde(default)]
    pub owner: Option<UserId>,
    /// Owner handle.
    #[serde(default)]
    pub owner_username: String,
    /// Whether the signed-in user is a member.
    #[serde(default)]
    pub is_member: bool,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Group {
    /// Returns whether the given user owns this group.
    #[must_use]
    pub fn is_owned_by(&self, username: &str) -> bool {
        self.owner_username == username
    }
}

/// A user search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// User ID.
    pub id: UserId,
    /// Public handle.
    pub username: String,
    /// Free-form biography.
    #[serde(default)]
    pub bio: Option<String>,
    /// Photo URL.
    #[serde(default)]
    pub profile_photo: Option<String>,
}

/// Response to `/groups/{id}/toggle_membership/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipChange {
    /// Human-readable outcome.
    #[serde(default)]
    pub detail: String,
    /// Membership after the toggle.
    pub is_member: bool,
}

/// Generic `{"detail": ...}` / `{"message": ...}` acknowledgement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    /// DRF-style detail.
    #[serde(default)]
    pub detail: Option<String>,
    /// Registration-style message.
    #[serde(default)]
    pub message: Option<String>,
}

impl Acknowledgement {
    /// Returns whichever text the server sent.
    #[must_use]
    pub fn text(&self) -> &str {
        self.message
            .as_deref()
            .or(self.detail.as_deref())
            .unwrap_or_default()
    }
}

/// Body for creating a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPost {
    /// Text.
    pub content: String,
    /// Target group, `None` for the personal feed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupId>,
}

impl NewPost {
    /// A personal post.
    #[must_use]
    pub fn personal(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            group: None,
        }
    }

    /// A post in a group.
    #[must_use]
    pub fn in_group(content: impl Into<String>, group: GroupId) -> Self {
        Self {
            content: content.into(),
            group: Some(group),
        }
    }
}

/// Body for creating a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewGroup {
    /// Unique name.
    pub name: String,
    /// Description, may be empty.
    pub description: String,
}

/// Photo to upload with a profile update.
#[derive(Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    /// File name sent in the multipart part.
    pub file_name: String,
    /// MIME type.
    pub mime: String,
    /// Raw bytes.
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    /// Reads a photo from disk, guessing the MIME type from the extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub async fn from_path(path: &std::path::Path) -> crate::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("photo")
            .to_string();
        let mime = mime_for(&file_name).to_string();
        Ok(Self {
            file_name,
            mime,
            bytes,
        })
    }
}

impl fmt::Debug for PhotoUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoUpload")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// Multipart `PATCH /auth/users/me/` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// New biography.
    pub bio: String,
    /// New photo, if changed.
    pub photo: Option<PhotoUpload>,
}

/// Filter for `GET /posts/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostFilter {
    /// Every post visible to the user.
    All,
    /// Posts in one group.
    Group(GroupId),
    /// Posts by one author.
    Author(String),
}

impl PostFilter {
    /// Query pairs for this filter.
    #[must_use]
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::All => Vec::new(),
            Self::Group(id) => vec![("group", id.to_string())],
            Self::Author(username) => vec![("author_username", username.clone())],
        }
    }
}
