//! Add-member modal with debounced user search.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use campusly_api::{Acknowledgement, GroupId, SocialApi, UserId, UserSummary};
use tracing::info;

use crate::debounce::Debouncer;
use crate::pages::{SearchOutcome, SearchPage};
use crate::sync::ViewError;

/// Add-member modal state. Closed when `group` is `None`.
#[derive(Debug, Default)]
pub struct AddMemberModal {
    group: Option<GroupId>,
    /// Group the `added` set belongs to; kept across close.
    added_for: Option<GroupId>,
    /// Search input.
    pub query: String,
    /// Search results.
    pub results: Vec<UserSummary>,
    /// Users added while the modal has been open this session.
    pub added: HashSet<UserId>,
    /// User currently being added.
    pub adding: Option<UserId>,
    /// Error message.
    pub error: Option<String>,
    debouncer: Debouncer,
}

impl AddMemberModal {
    /// Creates a closed modal with the given debounce window.
    #[must_use]
    pub fn new(debounce: Duration) -> Self {
        Self {
            debouncer: Debouncer::new(debounce),
            ..Self::default()
        }
    }

    /// Opens the modal for a group.
    pub fn open(&mut self, group: GroupId) {
        if self.added_for != Some(group) {
            self.added.clear();
            self.added_for = Some(group);
        }
        self.group = Some(group);
        self.query.clear();
        self.results.clear();
        self.adding = None;
        self.error = None;
    }

    /// Closes the modal; the added set survives for the same group.
    pub fn close(&mut self) {
        self.debouncer.cancel();
        self.group = None;
    }

    /// Group the modal is adding to.
    #[must_use]
    pub const fn group(&self) -> Option<GroupId> {
        self.group
    }

    /// Whether the modal is showing.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.group.is_some()
    }

    /// Updates the search input; see [`SearchPage::set_query`].
    pub fn set_query(
        &mut self,
        query: String,
    ) -> Option<impl Future<Output = Option<String>> + Send + use<>> {
        self.query = query;
        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            self.debouncer.cancel();
            self.results.clear();
            return None;
        }
        Some(self.debouncer.schedule(trimmed.to_string()))
    }

    /// Applies search results unless the input has moved on.
    pub fn apply_search(&mut self, outcome: SearchOutcome) {
        if outcome.query != self.query.trim() {
            return;
        }
        match outcome.result {
            Ok(results) => self.results = results,
            Err(error) => self.error = Some(error.summary()),
        }
    }

    /// Runs a settled search.
    pub async fn search(api: Arc<dyn SocialApi>, query: String) -> SearchOutcome {
        SearchPage::search(api, query).await
    }

    /// Starts adding a user; `None` if already added or busy.
    pub fn begin_add(&mut self, user: &UserSummary) -> Option<(GroupId, UserSummary)> {
        let group = self.group?;
        if self.adding.is_some() || self.added.contains(&user.id) {
            return None;
        }
        self.adding = Some(user.id);
        self.error = None;
        Some((group, user.clone()))
    }

    /// Adds a user to the group.
    pub async fn add(
        api: Arc<dyn SocialApi>,
        group: GroupId,
        user: UserSummary,
    ) -> (UserId, Result<Acknowledgement, ViewError>) {
        let result = api
            .add_member(group, &user.username)
            .await
            .map_err(|e| ViewError::from_api(&e, "Group not found."));
        if result.is_ok() {
            info!("Added {} to group {group}", user.username);
        }
        (user.id, result)
    }

    /// Applies an add result; returns `true` when the parent should reload.
    pub fn finish_add(&mut self, user: UserId, result: &Result<Acknowledgement, ViewError>) -> bool {
        self.adding = None;
        match result {
            Ok(_) => {
                self.added.insert(user);
                true
            }
            Err(error) => {
                self.error = Some(error.summary());
                false
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use campusly_api::FieldErrors;

    fn user(id: i64) -> UserSummary {
        UserSummary {
            id: UserId(id),
            username: format!("user{id}"),
            bio: None,
            profile_photo: None,
        }
    }

    #[test]
    fn test_closed_modal_adds_nothing() {
        let mut modal = AddMemberModal::default();
        assert_eq!(modal.begin_add(&user(1)), None);
    }

    #[test]
    fn test_added_user_cannot_be_added_again() {
        let mut modal = AddMemberModal::default();
        modal.open(GroupId(3));
        let (group, target) = modal.begin_add(&user(1)).unwrap();
        assert_eq!(group, GroupId(3));
        assert!(modal.finish_add(target.id, &Ok(Acknowledgement::default())));
        assert!(modal.added.contains(&UserId(1)));
        assert_eq!(modal.begin_add(&user(1)), None);
    }

    #[test]
    fn test_already_member_error_is_verbatim() {
        let mut modal = AddMemberModal::default();
        modal.open(GroupId(3));
        modal.begin_add(&user(2));
        let mut fields = FieldErrors::new();
        fields.push("detail", "User is already a member.");
        assert!(!modal.finish_add(UserId(2), &Err(ViewError::Validation(fields))));
        assert_eq!(modal.error.as_deref(), Some("User is already a member."));
        assert!(modal.adding.is_none());
    }

    #[test]
    fn test_reopening_other_group_resets_added() {
        let mut modal = AddMemberModal::default();
        modal.open(GroupId(3));
        modal.added.insert(UserId(1));
        modal.close();
        modal.open(GroupId(3));
        assert!(modal.added.contains(&UserId(1)));
        modal.close();
        modal.open(GroupId(4));
        assert!(modal.added.is_empty());
    }

    #[test]
    fn test_added_survives_close_and_reopen() {
        let mut modal = AddMemberModal::default();
        modal.open(GroupId(3));
        let (_, target) = modal.begin_add(&user(5)).unwrap();
        assert!(modal.finish_add(target.id, &Ok(Acknowledgement::default())));
        modal.close();
        assert!(!modal.is_open());

        modal.open(GroupId(3));
        assert!(modal.added.contains(&UserId(5)));
        assert_eq!(modal.begin_add(&user(5)), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_query_schedules_nothing() {
        let mut modal = AddMemberModal::default();
        modal.open(GroupId(3));
        modal.results.push(user(1));
        assert!(modal.set_query("  ".into()).is_none());
        assert!(modal.results.is_empty());
        let pending = modal.set_query("ra".into());
        assert_eq!(pending.unwrap().await, Some("ra".to_string()));
    }
}
