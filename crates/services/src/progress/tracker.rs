use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};

use storage::CompletionRepository;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{info, warn};
use tracker_core::model::{CompletionSet, Curriculum, ProblemId};
use tracker_core::progress::ProgressReport;

use super::cache::ReportCache;
use crate::error::MutationError;
use crate::loader::LoadedSession;
use crate::toggle::toggle_problem;

/// Curriculum and completion set as they were at one instant.
#[derive(Debug, Clone)]
pub struct ProgressSnapshot {
    pub curriculum: Arc<Curriculum>,
    pub completed: Arc<CompletionSet>,
}

/// Owns a session's completion state and is its only writer.
///
/// Readers always get a whole `Arc<CompletionSet>`; writers swap in a new
/// `Arc`, so nobody observes a set mid-mutation. Toggles of the same problem
/// run one after another; toggles of different problems run concurrently.
pub struct ProgressTracker {
    completions: Arc<dyn CompletionRepository>,
    curriculum: Arc<Curriculum>,
    completed: RwLock<Arc<CompletionSet>>,
    in_flight: Mutex<HashMap<ProblemId, Weak<AsyncMutex<()>>>>,
    reports: ReportCache,
}

impl ProgressTracker {
    #[must_use]
    pub fn new(completions: Arc<dyn CompletionRepository>, loaded: LoadedSession) -> Self {
        Self {
            completions,
            curriculum: Arc::new(loaded.curriculum),
            completed: RwLock::new(Arc::new(loaded.completed)),
            in_flight: Mutex::new(HashMap::new()),
            reports: ReportCache::new(),
        }
    }

    #[must_use]
    pub fn curriculum(&self) -> Arc<Curriculum> {
        Arc::clone(&self.curriculum)
    }

    #[must_use]
    pub fn completed(&self) -> Arc<CompletionSet> {
        let guard = self.completed.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            curriculum: self.curriculum(),
            completed: self.completed(),
        }
    }

    #[must_use]
    pub fn is_completed(&self, problem_id: &ProblemId) -> bool {
        self.completed().contains(problem_id)
    }

    /// Derived progress for the current snapshot, memoized until the next change.
    #[must_use]
    pub fn report(&self) -> Arc<ProgressReport> {
        self.reports.get_or_build(&self.snapshot())
    }

    /// Flip one problem's completion and return whether it is now completed.
    ///
    /// Waits for any in-flight toggle of the same id, then decides the
    /// action from the latest state and makes exactly one remote call. The
    /// local set changes only after the remote call succeeds, and only in
    /// `problem_id`.
    ///
    /// # Errors
    ///
    /// Returns `MutationError::RemoteRejected` if the remote call fails; the
    /// completion set is left as it was.
    pub async fn toggle(&self, problem_id: &ProblemId) -> Result<bool, MutationError> {
        let key_lock = self.key_lock(problem_id);
        let _serialized = key_lock.lock().await;

        if !self.curriculum.contains_problem(problem_id) {
            warn!(problem = %problem_id, "toggling a problem missing from the curriculum");
        }

        let before = self.completed();
        let after = toggle_problem(self.completions.as_ref(), problem_id, &before).await?;
        let now_completed = after.contains(problem_id);

        // Other ids may have changed while the remote call was pending.
        {
            let mut slot = self.completed.write().unwrap_or_else(PoisonError::into_inner);
            let latest = if now_completed {
                slot.with(problem_id.clone())
            } else {
                slot.without(problem_id)
            };
            *slot = Arc::new(latest);
        }

        info!(problem = %problem_id, completed = now_completed, "toggle confirmed");
        Ok(now_completed)
    }

    fn key_lock(&self, problem_id: &ProblemId) -> Arc<AsyncMutex<()>> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        in_flight.retain(|_, lock| lock.strong_count() > 0);

        if let Some(lock) = in_flight.get(problem_id).and_then(Weak::upgrade) {
            return lock;
        }
        let lock = Arc::new(AsyncMutex::new(()));
        in_flight.insert(problem_id.clone(), Arc::downgrade(&lock));
        lock
    }
}
