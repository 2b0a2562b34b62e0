use chrono::{DateTime, Utc};
use storage::{RemoteConfig, Storage};
use tracing::info;
use tracker_core::model::Credential;

use crate::Clock;
use crate::app_services::AppServices;
use crate::error::SessionError;

/// Everything scoped to one signed-in user.
///
/// Created once a credential is available and dropped on logout; the
/// credential lives inside the storage backend rather than in global state.
pub struct SessionContext {
    opened_at: DateTime<Utc>,
    services: AppServices,
}

impl SessionContext {
    /// Open a session against the remote HTTP API.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::MissingCredential` for a blank token and
    /// `SessionError::Http` if the HTTP client cannot be built.
    pub fn open(config: RemoteConfig, token: &str, clock: Clock) -> Result<Self, SessionError> {
        let credential = Credential::new(token).ok_or(SessionError::MissingCredential)?;
        info!(api = %config.base_url(), "opening session");
        let storage = Storage::http(config, credential)?;
        Ok(Self::with_storage(&storage, clock))
    }

    /// Open a session over an already-built backend.
    #[must_use]
    pub fn with_storage(storage: &Storage, clock: Clock) -> Self {
        Self {
            opened_at: clock.now(),
            services: AppServices::new(storage),
        }
    }

    #[must_use]
    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    #[must_use]
    pub fn services(&self) -> &AppServices {
        &self.services
    }

    /// End the session (logout).
    pub fn close(self) {
        info!(opened_at = %self.opened_at, "session closed");
    }
}
