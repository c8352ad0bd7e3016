//! Groups index: every group, with the user's own groups alongside.

use async_trait::async_trait;
use campusly_api::{Group, GroupId, MembershipChange, SocialApi};

use super::apply_membership;
use crate::sync::{MutationEffect, Resource, SyncedView};

/// Groups index page.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupsIndex;

/// Groups index view state.
pub type GroupsView = SyncedView<GroupsIndex>;

/// A write on the groups index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupsAction {
    /// Join or leave one group.
    ToggleMembership(GroupId),
}

/// Confirmed outcome of a [`GroupsAction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupsConfirmed {
    /// Membership of one group after the toggle.
    Membership(GroupId, MembershipChange),
}

#[async_trait]
impl Resource for GroupsIndex {
    type Param = ();
    /// Groups the user belongs to.
    type Item = Vec<Group>;
    type Entry = Group;
    type Action = GroupsAction;
    type Confirmed = GroupsConfirmed;

    const NOT_FOUND: &'static str = "No groups found.";
    const REQUIRES_PARAM: bool = false;

    fn parse_param(_raw: &str) -> Option<()> {
        Some(())
    }

    fn missing_target(_action: &GroupsAction) -> &'static str {
        "Group not found."
    }

    async fn fetch_resource(api: &dyn SocialApi, _param: &()) -> campusly_api::Result<Vec<Group>> {
        api.my_groups().await
    }

    async fn fetch_list(api: &dyn SocialApi, _param: &()) -> campusly_api::Result<Vec<Group>> {
        api.groups().await
    }

    async fn perform(
        api: &dyn SocialApi,
        _param: &(),
        action: &GroupsAction,
    ) -> campusly_api::Result<GroupsConfirmed> {
        let GroupsAction::ToggleMembership(id) = *action;
        let change = api.toggle_membership(id).await?;
        Ok(GroupsConfirmed::Membership(id, change))
    }

    fn reconcile(
        mine: &mut Option<Vec<Group>>,
        all: &mut Vec<Group>,
        confirmed: GroupsConfirmed,
    ) -> MutationEffect {
        let GroupsConfirmed::Membership(id, change) = confirmed;
        let Some(group) = all.iter_mut().find(|g| g.id == id) else {
            return MutationEffect::Reload;
        };
        apply_membership(group, &change);

        // Same order as the full list.
        *mine = Some(all.iter().filter(|g| g.is_member).cloned().collect());
        MutationEffect::Patched
    }
}
