//! Edit-post modal.

use campusly_api::{Post, PostId};

use crate::pages::PostAction;
use crate::sync::MutationEffect;

/// Edit-post modal state. Closed when `post` is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPostModal {
    post: Option<PostId>,
    /// Editor text.
    pub content: String,
    /// True while saving.
    pub saving: bool,
    /// Error message.
    pub error: Option<String>,
}

impl EditPostModal {
    /// Opens the modal seeded with the post's current text.
    pub fn open(&mut self, post: &Post) {
        *self = Self {
            post: Some(post.id),
            content: post.content.clone(),
            ..Self::default()
        };
    }

    /// Whether the modal is showing.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.post.is_some()
    }

    /// The post being edited.
    #[must_use]
    pub const fn post(&self) -> Option<PostId> {
        self.post
    }

    /// Closes the modal, discarding edits.
    pub fn close(&mut self) {
        *self = Self::default();
    }

    /// Validates the edit into an action for the owning page.
    pub fn submit(&mut self) -> Option<PostAction> {
        let id = self.post?;
        if self.saving {
            return None;
        }
        let content = self.content.trim();
        if content.is_empty() {
            self.error = Some("Post content cannot be empty.".to_string());
            return None;
        }
        self.saving = true;
        self.error = None;
        Some(PostAction::Edit {
            id,
            content: content.to_string(),
        })
    }

    /// Applies the owning page's mutation outcome; closes on success.
    pub fn finish(&mut self, effect: MutationEffect, notice: Option<&str>) {
        match effect {
            MutationEffect::Patched | MutationEffect::Reload | MutationEffect::RedirectToLogin => {
                self.close();
            }
            MutationEffect::Failed => {
                self.saving = false;
                self.error = Some(notice.unwrap_or("Failed to update post.").to_string());
            }
            MutationEffect::Discarded => self.saving = false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn post() -> Post {
        Post {
            id: PostId(8),
            content: "draft".into(),
            author: campusly_api::UserId(1),
            author_username: "asha".into(),
            author_profile_photo: None,
            group: None,
            comments: Vec::new(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_open_seeds_content() {
        let mut modal = EditPostModal::default();
        assert!(!modal.is_open());
        modal.open(&post());
        assert!(modal.is_open());
        assert_eq!(modal.content, "draft");
    }

    #[test]
    fn test_submit_and_close() {
        let mut modal = EditPostModal::default();
        modal.open(&post());
        modal.content = " final ".into();
        assert_eq!(
            modal.submit(),
            Some(PostAction::Edit {
                id: PostId(8),
                content: "final".into()
            })
        );
        modal.finish(MutationEffect::Patched, None);
        assert!(!modal.is_open());
    }

    #[test]
    fn test_failure_keeps_modal_open() {
        let mut modal = EditPostModal::default();
        modal.open(&post());
        modal.submit();
        modal.finish(MutationEffect::Failed, Some("You do not have permission."));
        assert!(modal.is_open());
        assert!(!modal.saving);
        assert_eq!(modal.error.as_deref(), Some("You do not have permission."));
    }

    #[test]
    fn test_closed_modal_submits_nothing() {
        let mut modal = EditPostModal::default();
        assert_eq!(modal.submit(), None);
    }
}
