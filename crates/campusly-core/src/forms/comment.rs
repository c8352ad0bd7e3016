//! Inline comment composer shown under each post.

use std::collections::HashMap;
use std::sync::Arc;

use campusly_api::{Comment, PostId, SocialApi};
use tracing::debug;

use crate::sync::ViewError;

/// Composer for one post's comments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentComposer {
    /// Input text.
    pub input: String,
    /// True while posting.
    pub submitting: bool,
    /// Error from the last attempt.
    pub error: Option<String>,
}

impl CommentComposer {
    /// Takes the text to post. Whitespace-only input yields nothing and
    /// is left untouched.
    pub fn submit(&mut self) -> Option<String> {
        if self.submitting {
            return None;
        }
        let content = self.input.trim();
        if content.is_empty() {
            return None;
        }
        self.submitting = true;
        self.error = None;
        Some(content.to_string())
    }

    /// Posts a comment.
    pub async fn send(
        api: Arc<dyn SocialApi>,
        post: PostId,
        content: String,
    ) -> Result<Comment, ViewError> {
        debug!(%post, "Posting comment");
        api.add_comment(post, &content)
            .await
            .map_err(|e| ViewError::from_api(&e, "Post not found."))
    }

    /// Applies the result; returns `true` when the parent should refresh.
    pub fn finish(&mut self, result: &Result<Comment, ViewError>) -> bool {
        self.submitting = false;
        match result {
            Ok(_) => {
                self.input.clear();
                true
            }
            Err(error) => {
                self.error = Some(error.summary());
                false
            }
        }
    }

    /// Submits, sends and finishes in one step, calling `on_added` once on
    /// success.
    pub async fn post(
        &mut self,
        api: &Arc<dyn SocialApi>,
        post: PostId,
        on_added: impl FnOnce() + Send,
    ) -> Option<Result<Comment, ViewError>> {
        let content = self.submit()?;
        let result = Self::send(Arc::clone(api), post, content).await;
        if self.finish(&result) {
            on_added();
        }
        Some(result)
    }
}

/// One composer per post, created on first use.
#[derive(Debug, Clone, Default)]
pub struct CommentDrafts {
    drafts: HashMap<PostId, CommentComposer>,
}

impl CommentDrafts {
    /// The composer for `post`.
    pub fn entry(&mut self, post: PostId) -> &mut CommentComposer {
        self.drafts.entry(post).or_default()
    }

    /// Input text for `post`.
    #[must_use]
    pub fn input(&self, post: PostId) -> &str {
        self.drafts.get(&post).map_or("", |c| c.input.as_str())
    }

    /// The composer for `post`, if one exists.
    #[must_use]
    pub fn get(&self, post: PostId) -> Option<&CommentComposer> {
        self.drafts.get(&post)
    }

    /// Drops composers for posts no longer shown.
    pub fn retain_posts(&mut self, visible: &[PostId]) {
        self.drafts.retain(|id, _| visible.contains(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_only_is_ignored() {
        let mut composer = CommentComposer {
            input: "  \n\t ".into(),
            ..CommentComposer::default()
        };
        assert_eq!(composer.submit(), None);
        assert_eq!(composer.input, "  \n\t ");
        assert!(!composer.submitting);
    }

    #[test]
    fn test_failure_keeps_input() {
        let mut composer = CommentComposer {
            input: "hello".into(),
            ..CommentComposer::default()
        };
        assert_eq!(composer.submit().as_deref(), Some("hello"));
        assert!(!composer.finish(&Err(ViewError::Unknown)));
        assert_eq!(composer.input, "hello");
        assert!(composer.error.is_some());
    }

    #[test]
    fn test_drafts_are_per_post() {
        let mut drafts = CommentDrafts::default();
        drafts.entry(PostId(1)).input = "one".into();
        drafts.entry(PostId(2)).input = "two".into();
        assert_eq!(drafts.input(PostId(1)), "one");
        drafts.retain_posts(&[PostId(2)]);
        assert_eq!(drafts.input(PostId(1)), "");
        assert_eq!(drafts.input(PostId(2)), "two");
    }
}
