//! Create-group modal.

use std::sync::Arc;

use campusly_api::{Group, NewGroup, SocialApi};
use tracing::info;

use crate::sync::ViewError;

const NAME_REQUIRED: &str = "Group name is required.";
const NAME_TAKEN: &str = "A group with this name already exists.";
const GENERIC: &str = "An error occurred. Please try again.";

/// Create-group modal state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateGroupModal {
    /// Whether the modal is showing.
    pub open: bool,
    /// Name input.
    pub name: String,
    /// Description input.
    pub description: String,
    /// True while creating.
    pub submitting: bool,
    /// Error message.
    pub error: Option<String>,
}

impl CreateGroupModal {
    /// Opens an empty modal.
    pub fn open(&mut self) {
        *self = Self {
            open: true,
            ..Self::default()
        };
    }

    /// Closes and clears the modal.
    pub fn close(&mut self) {
        *self = Self::default();
    }

    /// Validates the inputs into a request.
    pub fn submit(&mut self) -> Option<NewGroup> {
        if self.submitting {
            return None;
        }
        let name = self.name.trim();
        if name.is_empty() {
            self.error = Some(NAME_REQUIRED.to_string());
            return None;
        }
        self.error = None;
        self.submitting = true;
        Some(NewGroup {
            name: name.to_string(),
            description: self.description.trim().to_string(),
        })
    }

    /// Creates the group.
    pub async fn create(api: Arc<dyn SocialApi>, group: NewGroup) -> Result<Group, ViewError> {
        api.create_group(&group)
            .await
            .map_err(|e| ViewError::from_api(&e, GENERIC))
    }

    /// Applies the result; returns `true` when the parent should reload.
    pub fn finish(&mut self, result: &Result<Group, ViewError>) -> bool {
        self.submitting = false;
        match result {
            Ok(group) => {
                info!("Created group {}", group.name);
                self.close();
                true
            }
            Err(ViewError::Validation(fields)) if !fields.get("name").is_empty() => {
                self.error = Some(NAME_TAKEN.to_string());
                false
            }
            Err(_) => {
                self.error = Some(GENERIC.to_string());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusly_api::FieldErrors;

    #[test]
    fn test_blank_name_rejected() {
        let mut modal = CreateGroupModal::default();
        modal.open();
        modal.name = "   ".into();
        assert_eq!(modal.submit(), None);
        assert_eq!(modal.error.as_deref(), Some(NAME_REQUIRED));
    }

    #[test]
    fn test_duplicate_name_message() {
        let mut modal = CreateGroupModal::default();
        modal.open();
        modal.name = "Chess".into();
        assert!(modal.submit().is_some());

        let mut fields = FieldErrors::new();
        fields.push("name", "group with this name already exists.");
        assert!(!modal.finish(&Err(ViewError::Validation(fields))));
        assert_eq!(modal.error.as_deref(), Some(NAME_TAKEN));
        assert!(modal.open);
    }

    #[test]
    fn test_other_failure_is_generic() {
        let mut modal = CreateGroupModal::default();
        modal.open();
        modal.name = "Chess".into();
        modal.submit();
        assert!(!modal.finish(&Err(ViewError::Unknown)));
        assert_eq!(modal.error.as_deref(), Some(GENERIC));
    }
}
