//! Group detail: one group and its posts.

use async_trait::async_trait;
use campusly_api::{Group, GroupId, MembershipChange, Post, PostFilter, SocialApi};
use tracing::debug;

use super::posts::{self, PostAction, PostConfirmed};
use crate::sync::{MutationEffect, Resource, SyncedView};

/// Group detail page.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupDetail;

/// Group detail view state.
pub type GroupView = SyncedView<GroupDetail>;

/// A write on the group page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupAction {
    /// Join or leave.
    ToggleMembership,
    /// Post write.
    Post(PostAction),
}

/// Confirmed outcome of a [`GroupAction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupConfirmed {
    /// Membership after the toggle.
    Membership(MembershipChange),
    /// Post write outcome.
    Post(PostConfirmed),
}

#[async_trait]
impl Resource for GroupDetail {
    type Param = GroupId;
    type Item = Group;
    type Entry = Post;
    type Action = GroupAction;
    type Confirmed = GroupConfirmed;

    const NOT_FOUND: &'static str = "Group not found.";

    fn parse_param(raw: &str) -> Option<GroupId> {
        raw.parse().ok()
    }

    fn missing_target(action: &GroupAction) -> &'static str {
        match action {
            GroupAction::ToggleMembership => Self::NOT_FOUND,
            GroupAction::Post(_) => posts::NOT_FOUND,
        }
    }

    async fn fetch_resource(api: &dyn SocialApi, id: &GroupId) -> campusly_api::Result<Group> {
        api.group(*id).await
    }

    async fn fetch_list(api: &dyn SocialApi, id: &GroupId) -> campusly_api::Result<Vec<Post>> {
        api.posts(&PostFilter::Group(*id)).await
    }

    async fn perform(
        api: &dyn SocialApi,
        id: &GroupId,
        action: &GroupAction,
    ) -> campusly_api::Result<GroupConfirmed> {
        match action {
            GroupAction::ToggleMembership => api
                .toggle_membership(*id)
                .await
                .map(GroupConfirmed::Membership),
            GroupAction::Post(action) => posts::perform(api, action).await.map(GroupConfirmed::Post),
        }
    }

    fn reconcile(
        resource: &mut Option<Group>,
        list: &mut Vec<Post>,
        confirmed: GroupConfirmed,
    ) -> MutationEffect {
        match confirmed {
            GroupConfirmed::Membership(change) => {
                if let Some(group) = resource {
                    apply_membership(group, &change);
                }
                MutationEffect::Patched
            }
            GroupConfirmed::Post(confirmed) => posts::reconcile(list, confirmed),
        }
    }
}

/// Sets the confirmed membership flag, adjusting the count only when the
/// flag actually changes.
pub(crate) fn apply_membership(group: &mut Group, change: &MembershipChange) {
    if group.is_member == change.is_member {
        debug!(group = %group.id, "Membership already up to date");
        return;
    }
    group.is_member = change.is_member;
    group.member_count = if change.is_member {
        group.member_count.saturating_add(1)
    } else {
        group.member_count.saturating_sub(1)
    };
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn group(is_member: bool, member_count: u32) -> Group {
        Group {
            id: GroupId(3),
            name: "Robotics".into(),
            description: None,
            member_count,
            owner: None,
            owner_username: "asha".into(),
            is_member,
            created_at: None,
        }
    }

    fn change(is_member: bool) -> MembershipChange {
        MembershipChange {
            detail: String::new(),
            is_member,
        }
    }

    #[test]
    fn test_parse_param() {
        assert_eq!(GroupDetail::parse_param("42"), Some(GroupId(42)));
        assert_eq!(GroupDetail::parse_param("abc"), None);
    }

    #[test]
    fn test_join_increments() {
        let mut g = group(false, 4);
        apply_membership(&mut g, &change(true));
        assert!(g.is_member);
        assert_eq!(g.member_count, 5);
    }

    #[test]
    fn test_leave_never_underflows() {
        let mut g = group(true, 0);
        apply_membership(&mut g, &change(false));
        assert_eq!(g.member_count, 0);
    }

    proptest! {
        #[test]
        fn membership_patch_is_idempotent(start in any::<bool>(), target in any::<bool>(), count in 1u32..1000) {
            let mut once = group(start, count);
            apply_membership(&mut once, &change(target));
            let mut twice = once.clone();
            apply_membership(&mut twice, &change(target));
            prop_assert_eq!(once, twice);
        }
    }
}
