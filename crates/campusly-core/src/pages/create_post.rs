//! Create-post page with destination selection.

use std::fmt;
use std::sync::Arc;

use campusly_api::{Group, GroupId, NewPost, Post, SocialApi};

use crate::sync::ViewError;

const EMPTY_CONTENT: &str = "Post content cannot be empty.";
const CREATE_FAILED: &str = "Could not create post. Please try again.";

/// Where a new post goes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Destination {
    /// The author's personal feed.
    #[default]
    Personal,
    /// One of the author's groups.
    Group {
        /// Group ID.
        id: GroupId,
        /// Group name, for display.
        name: String,
    },
}

impl Destination {
    /// The group to post into, if any.
    #[must_use]
    pub const fn group(&self) -> Option<GroupId> {
        match self {
            Self::Personal => None,
            Self::Group { id, .. } => Some(*id),
        }
    }
}

impl From<&Group> for Destination {
    fn from(group: &Group) -> Self {
        Self::Group {
            id: group.id,
            name: group.name.clone(),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Personal => f.write_str("My feed"),
            Self::Group { name, .. } => write!(f, "Group: {name}"),
        }
    }
}

/// Create-post page state.
#[derive(Debug, Clone, Default)]
pub struct CreatePostPage {
    /// Post text.
    pub content: String,
    /// Selected destination.
    pub destination: Destination,
    /// Destinations: personal first, then the user's groups.
    pub destinations: Vec<Destination>,
    /// True while the groups load.
    pub loading: bool,
    /// True while submitting.
    pub submitting: bool,
    /// Error message.
    pub error: Option<String>,
}

impl CreatePostPage {
    /// Resets the form and marks destinations as loading.
    pub fn begin(&mut self) {
        *self = Self {
            loading: true,
            destinations: vec![Destination::Personal],
            ..Self::default()
        };
    }

    /// Fetches the user's groups.
    pub async fn fetch_groups(api: Arc<dyn SocialApi>) -> Result<Vec<Group>, ViewError> {
        api.my_groups()
            .await
            .map_err(|e| ViewError::from_api(&e, "No groups found."))
    }

    /// Applies the fetched groups. A failure leaves only the personal feed.
    ///
    /// Returns `false` if the session is no longer valid.
    pub fn apply_groups(&mut self, result: Result<Vec<Group>, ViewError>) -> bool {
        self.loading = false;
        self.destinations = vec![Destination::Personal];
        match result {
            Ok(groups) => {
                self.destinations.extend(groups.iter().map(Destination::from));
                true
            }
            Err(error) => !error.is_unauthorized(),
        }
    }

    /// Validates the form into a request.
    pub fn submit(&mut self) -> Option<NewPost> {
        if self.submitting {
            return None;
        }
        let content = self.content.trim();
        if content.is_empty() {
            self.error = Some(EMPTY_CONTENT.to_string());
            return None;
        }
        self.error = None;
        self.submitting = true;
        Some(match self.destination.group() {
            Some(group) => NewPost::in_group(content, group),
            None => NewPost::personal(content),
        })
    }

    /// Sends the post.
    pub async fn create(api: Arc<dyn SocialApi>, post: NewPost) -> Result<Post, ViewError> {
        api.create_post(&post)
            .await
            .map_err(|e| ViewError::from_api(&e, CREATE_FAILED))
    }

    /// Applies the result; on success returns where to navigate.
    pub fn apply_created(&mut self, result: Result<Post, ViewError>) -> Option<Option<GroupId>> {
        self.submitting = false;
        match result {
            Ok(post) => {
                self.content.clear();
                Some(post.group)
            }
            Err(_) => {
                self.error = Some(CREATE_FAILED.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content_rejected() {
        let mut page = CreatePostPage {
            content: "   ".into(),
            ..CreatePostPage::default()
        };
        assert_eq!(page.submit(), None);
        assert_eq!(page.error.as_deref(), Some(EMPTY_CONTENT));
        assert!(!page.submitting);
    }

    #[test]
    fn test_group_destination() {
        let mut page = CreatePostPage {
            content: "meetup at 5".into(),
            destination: Destination::Group {
                id: GroupId(4),
                name: "Chess".into(),
            },
            ..CreatePostPage::default()
        };
        assert_eq!(page.submit(), Some(NewPost::in_group("meetup at 5", GroupId(4))));
        assert_eq!(page.destination.to_string(), "Group: Chess");
    }

    #[test]
    fn test_failed_groups_leave_personal_only() {
        let mut page = CreatePostPage::default();
        page.begin();
        assert!(page.apply_groups(Err(ViewError::Unknown)));
        assert_eq!(page.destinations, vec![Destination::Personal]);
    }
}
