use std::sync::Arc;

use storage::{CompletionRepository, CurriculumRepository};
use tracing::{info, warn};
use tracker_core::model::{CompletionSet, Curriculum};

use crate::error::LoadError;

/// Curriculum and completion set fetched together for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSession {
    pub curriculum: Curriculum,
    pub completed: CompletionSet,
}

/// Fetches the two independent collections a session needs.
#[derive(Clone)]
pub struct SessionLoader {
    curriculum: Arc<dyn CurriculumRepository>,
    completions: Arc<dyn CompletionRepository>,
}

impl SessionLoader {
    #[must_use]
    pub fn new(
        curriculum: Arc<dyn CurriculumRepository>,
        completions: Arc<dyn CompletionRepository>,
    ) -> Self {
        Self {
            curriculum,
            completions,
        }
    }

    /// Fetch curriculum and completion list concurrently and wait for both.
    ///
    /// Duplicate completion ids collapse into one set member. Ids unknown to
    /// the curriculum are kept but logged, as are problem ids the curriculum
    /// lists more than once.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if either fetch fails.
    pub async fn load_session(&self) -> Result<LoadedSession, LoadError> {
        let (topics, completed_ids) = tokio::try_join!(
            async {
                self.curriculum
                    .fetch_curriculum()
                    .await
                    .map_err(LoadError::CurriculumFetch)
            },
            async {
                self.completions
                    .fetch_completed()
                    .await
                    .map_err(LoadError::CompletionFetch)
            },
        )?;

        let curriculum = Curriculum::new(topics);
        let completed = CompletionSet::from_ids(completed_ids);

        let repeated = curriculum.duplicate_problem_ids();
        if !repeated.is_empty() {
            warn!(ids = ?repeated, "curriculum lists some problem ids more than once");
        }

        let stale = completed.stale_ids(&curriculum);
        if !stale.is_empty() {
            warn!(count = stale.len(), ids = ?stale, "completed ids missing from curriculum");
        }
        info!(
            topics = curriculum.topics().len(),
            problems = curriculum.problem_count(),
            completed = completed.len(),
            "session loaded"
        );

        Ok(LoadedSession {
            curriculum,
            completed,
        })
    }
}
