//! Delete confirmation step.

use campusly_api::PostId;

/// Two-step confirmation before deleting a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfirmDelete {
    pending: Option<PostId>,
}

impl ConfirmDelete {
    /// Asks for confirmation to delete `post`.
    pub const fn request(&mut self, post: PostId) {
        self.pending = Some(post);
    }

    /// The post awaiting confirmation.
    #[must_use]
    pub const fn pending(&self) -> Option<PostId> {
        self.pending
    }

    /// Confirms; returns the post to delete exactly once.
    pub const fn confirm(&mut self) -> Option<PostId> {
        self.pending.take()
    }

    /// Abandons the pending deletion.
    pub const fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_yields_once() {
        let mut confirm = ConfirmDelete::default();
        assert_eq!(confirm.confirm(), None);
        confirm.request(PostId(5));
        assert_eq!(confirm.pending(), Some(PostId(5)));
        assert_eq!(confirm.confirm(), Some(PostId(5)));
        assert_eq!(confirm.confirm(), None);
    }

    #[test]
    fn test_cancel() {
        let mut confirm = ConfirmDelete::default();
        confirm.request(PostId(5));
        confirm.cancel();
        assert_eq!(confirm.confirm(), None);
    }
}
