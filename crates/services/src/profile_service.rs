use std::sync::Arc;

use storage::ProfileRepository;
use tracker_core::model::UserProfile;

use crate::error::ProfileError;

/// Read-only access to the signed-in user's identity.
#[derive(Clone)]
pub struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    #[must_use]
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// # Errors
    ///
    /// Returns `ProfileError::Storage` if the remote call fails.
    pub async fn fetch_profile(&self) -> Result<UserProfile, ProfileError> {
        let profile = self.profiles.fetch_profile().await?;
        Ok(profile)
    }
}
