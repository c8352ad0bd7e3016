//! Profile settings: bio and photo.

use std::path::PathBuf;
use std::sync::Arc;

use campusly_api::{CurrentUser, PhotoUpload, ProfileUpdate, SocialApi};
use tracing::warn;

use crate::sync::ViewError;

const SAVE_FAILED: &str = "Failed to update profile. Please try again.";

/// A validated settings save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsSubmission {
    /// New biography.
    pub bio: String,
    /// Local image to upload.
    pub photo: Option<PathBuf>,
}

/// Settings page state.
#[derive(Debug, Clone, Default)]
pub struct SettingsPage {
    /// User as last loaded or saved.
    pub user: Option<CurrentUser>,
    /// Bio input.
    pub bio: String,
    /// Photo file path input.
    pub photo_path: String,
    /// True until the user is loaded.
    pub loading: bool,
    /// True while saving.
    pub saving: bool,
    /// Error message.
    pub error: Option<String>,
}

impl SettingsPage {
    /// Marks the page as loading.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Fetches the current user.
    pub async fn fetch(api: Arc<dyn SocialApi>) -> Result<CurrentUser, ViewError> {
        api.current_user()
            .await
            .map_err(|e| ViewError::from_api(&e, "Profile not found."))
    }

    /// Applies the fetched user, seeding the inputs.
    ///
    /// Returns `false` if the session is no longer valid.
    pub fn apply_user(&mut self, result: Result<CurrentUser, ViewError>) -> bool {
        self.loading = false;
        match result {
            Ok(user) => {
                self.bio = user.bio.clone().unwrap_or_default();
                self.photo_path.clear();
                self.user = Some(user);
                true
            }
            Err(error) => {
                let unauthorized = error.is_unauthorized();
                self.error = Some(error.to_string());
                !unauthorized
            }
        }
    }

    /// Validates the inputs into a submission.
    pub fn submit(&mut self) -> Option<SettingsSubmission> {
        if self.saving {
            return None;
        }
        let photo = self.photo_path.trim();
        self.saving = true;
        self.error = None;
        Some(SettingsSubmission {
            bio: self.bio.trim().to_string(),
            photo: (!photo.is_empty()).then(|| PathBuf::from(photo)),
        })
    }

    /// Reads the photo (if any) and sends the multipart update.
    pub async fn save(
        api: Arc<dyn SocialApi>,
        submission: SettingsSubmission,
    ) -> Result<CurrentUser, ViewError> {
        let photo = match &submission.photo {
            Some(path) => Some(PhotoUpload::from_path(path).await.map_err(|e| {
                warn!("Cannot read {}: {e}", path.display());
                ViewError::Unknown
            })?),
            None => None,
        };
        let update = ProfileUpdate {
            bio: submission.bio,
            photo,
        };
        api.update_current_user(&update)
            .await
            .map_err(|e| ViewError::from_api(&e, "Profile not found."))
    }

    /// Applies a save result; on success returns the username to show.
    pub fn apply_saved(&mut self, result: Result<CurrentUser, ViewError>) -> Option<String> {
        self.saving = false;
        match result {
            Ok(user) => {
                let username = user.username.clone();
                self.bio = user.bio.clone().unwrap_or_default();
                self.photo_path.clear();
                self.user = Some(user);
                Some(username)
            }
            Err(ViewError::Validation(fields)) => {
                self.error = Some(fields.summary().unwrap_or(SAVE_FAILED).to_string());
                None
            }
            Err(_) => {
                self.error = Some(SAVE_FAILED.to_string());
                None
            }
        }
    }
}
