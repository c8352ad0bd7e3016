//! Group endpoints.

use crate::client::{ApiClient, Call};
use crate::error::Result;
use crate::model::{Acknowledgement, Group, GroupId, MembershipChange, NewGroup};

impl ApiClient {
    /// Lists every group.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn groups(&self) -> Result<Vec<Group>> {
        self.json(Call::get(&["groups"])).await
    }

    /// Lists groups the signed-in user belongs to.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn my_groups(&self) -> Result<Vec<Group>> {
        self.json(Call::get(&["my-groups"])).await
    }

    /// Fetches one group.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] for an unknown ID.
    pub async fn group(&self, id: GroupId) -> Result<Group> {
        let id = id.to_string();
        self.json(Call::get(&["groups", id.as_str()])).await
    }

    /// Creates a group owned by the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] for a duplicate name.
    pub async fn create_group(&self, group: &NewGroup) -> Result<Group> {
        let body = serde_json::to_value(group)?;
        self.json(Call::post(&["groups"], &body)).await
    }

    /// Joins or leaves a group.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn toggle_membership(&self, id: GroupId) -> Result<MembershipChange> {
        let id = id.to_string();
        let body = serde_json::json!({});
        self.json(Call::post(&["groups", id.as_str(), "toggle_membership"], &body))
            .await
    }

    /// Adds a user to a group the signed-in user owns.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] if the user is already a member.
    pub async fn add_member(&self, id: GroupId, username: &str) -> Result<Acknowledgement> {
        let id = id.to_string();
        let body = serde_json::json!({ "username": username });
        self.json(Call::post(&["groups", id.as_str(), "add_member"], &body))
            .await
    }
}
