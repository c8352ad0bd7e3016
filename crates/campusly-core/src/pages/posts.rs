//! Post writes shared by every page that lists posts.

use campusly_api::{NewPost, Post, PostId, SocialApi};

use crate::sync::MutationEffect;

/// Shown when a post write targets a post that is gone.
pub(crate) const NOT_FOUND: &str = "This post no longer exists.";

/// A write against a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostAction {
    /// Publish a new post.
    Create(NewPost),
    /// Replace a post's content.
    Edit {
        /// Post to edit.
        id: PostId,
        /// New text.
        content: String,
    },
    /// Delete a post.
    Delete(PostId),
}

/// Server-confirmed outcome of a [`PostAction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostConfirmed {
    /// Post was created.
    Created(Post),
    /// Post now has this content.
    Edited(Post),
    /// Post is gone.
    Deleted(PostId),
}

pub(crate) async fn perform(
    api: &dyn SocialApi,
    action: &PostAction,
) -> campusly_api::Result<PostConfirmed> {
    match action {
        PostAction::Create(post) => api.create_post(post).await.map(PostConfirmed::Created),
        PostAction::Edit { id, content } => api
            .update_post(*id, content)
            .await
            .map(PostConfirmed::Edited),
        PostAction::Delete(id) => api.delete_post(*id).await.map(|()| PostConfirmed::Deleted(*id)),
    }
}

/// Folds a confirmed post write into a post list.
///
/// Creation changes list membership and ordering, so it asks for a reload.
pub(crate) fn reconcile(list: &mut Vec<Post>, confirmed: PostConfirmed) -> MutationEffect {
    match confirmed {
        PostConfirmed::Created(_) => MutationEffect::Reload,
        PostConfirmed::Edited(post) => match list.iter_mut().find(|p| p.id == post.id) {
            Some(slot) => {
                // Server responses to PATCH omit nested comments.
                let comments = std::mem::take(&mut slot.comments);
                *slot = post;
                if slot.comments.is_empty() {
                    slot.comments = comments;
                }
                MutationEffect::Patched
            }
            None => MutationEffect::Reload,
        },
        PostConfirmed::Deleted(id) => {
            list.retain(|p| p.id != id);
            MutationEffect::Patched
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn post(id: i64, content: &str) -> Post {
        Post {
            id: PostId(id),
            content: content.into(),
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
    fn test_delete_removes_exactly_one() {
        let mut list = vec![post(1, "a"), post(2, "b"), post(3, "c")];
        let effect = reconcile(&mut list, PostConfirmed::Deleted(PostId(2)));
        assert_eq!(effect, MutationEffect::Patched);
        assert_eq!(list.iter().map(|p| p.id.0).collect::<Vec<_>>(), vec![1, 3]);

        reconcile(&mut list, PostConfirmed::Deleted(PostId(2)));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_edit_replaces_in_place() {
        let mut list = vec![post(1, "a"), post(2, "b")];
        let effect = reconcile(&mut list, PostConfirmed::Edited(post(2, "edited")));
        assert_eq!(effect, MutationEffect::Patched);
        assert_eq!(list[1].content, "edited");
    }

    #[test]
    fn test_edit_of_unknown_post_reloads() {
        let mut list = vec![post(1, "a")];
        let effect = reconcile(&mut list, PostConfirmed::Edited(post(9, "x")));
        assert_eq!(effect, MutationEffect::Reload);
    }

    #[test]
    fn test_create_reloads() {
        let mut list = Vec::new();
        assert_eq!(
            reconcile(&mut list, PostConfirmed::Created(post(1, "new"))),
            MutationEffect::Reload
        );
    }
}
