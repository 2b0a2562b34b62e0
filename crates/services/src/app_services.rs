use std::sync::Arc;

use storage::{CompletionRepository, Storage};

use crate::error::LoadError;
use crate::loader::SessionLoader;
use crate::profile_service::ProfileService;
use crate::progress::ProgressTracker;

/// Assembles app-facing services over one `Storage` backend.
#[derive(Clone)]
pub struct AppServices {
    loader: Arc<SessionLoader>,
    profiles: Arc<ProfileService>,
    completions: Arc<dyn CompletionRepository>,
}

impl AppServices {
    #[must_use]
    pub fn new(storage: &Storage) -> Self {
        Self {
            loader: Arc::new(SessionLoader::new(
                Arc::clone(&storage.curriculum),
                Arc::clone(&storage.completions),
            )),
            profiles: Arc::new(ProfileService::new(Arc::clone(&storage.profiles))),
            completions: Arc::clone(&storage.completions),
        }
    }

    #[must_use]
    pub fn loader(&self) -> Arc<SessionLoader> {
        Arc::clone(&self.loader)
    }

    #[must_use]
    pub fn profiles(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profiles)
    }

    /// Load the session and hand its completion state to a new tracker.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if loading fails.
    pub async fn start_tracking(&self) -> Result<ProgressTracker, LoadError> {
        let loaded = self.loader.load_session().await?;
        Ok(ProgressTracker::new(Arc::clone(&self.completions), loaded))
    }
}
