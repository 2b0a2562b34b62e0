use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tracker_core::model::{ProblemId, Topic, UserProfile};

/// Errors surfaced by remote-service adapters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not authorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("remote service responded with status {0}")]
    Status(u16),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Read access to the curriculum tree.
#[async_trait]
pub trait CurriculumRepository: Send + Sync {
    /// Fetch every topic with its nested subtopics and problems, in remote order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the remote call or decoding fails.
    async fn fetch_curriculum(&self) -> Result<Vec<Topic>, StorageError>;
}

/// Completion records of the authenticated user.
///
/// `mark_complete` and `mark_incomplete` are idempotent on the remote side.
#[async_trait]
pub trait CompletionRepository: Send + Sync {
    /// Fetch completed problem ids as received, duplicates included.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the remote call or decoding fails.
    async fn fetch_completed(&self) -> Result<Vec<ProblemId>, StorageError>;

    /// Persist "completed" for one problem.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the remote service does not acknowledge the change.
    async fn mark_complete(&self, id: &ProblemId) -> Result<(), StorageError>;

    /// Persist "not completed" for one problem.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the remote service does not acknowledge the change.
    async fn mark_incomplete(&self, id: &ProblemId) -> Result<(), StorageError>;
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the signed-in user's identity fields.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the remote call or decoding fails.
    async fn fetch_profile(&self) -> Result<UserProfile, StorageError>;
}

/// A call observed by `InMemoryRepository`, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    FetchCurriculum,
    FetchCompleted,
    MarkComplete(ProblemId),
    MarkIncomplete(ProblemId),
    FetchProfile,
}

#[derive(Default)]
struct InMemoryState {
    topics: Vec<Topic>,
    completed: Vec<ProblemId>,
    profile: Option<UserProfile>,
    curriculum_failure: Option<StorageError>,
    completed_failure: Option<StorageError>,
    mark_failure: Option<StorageError>,
    calls: Vec<RemoteCall>,
}

/// In-memory stand-in for the remote service, for tests and offline use.
///
/// Failures can be injected per operation; every call is recorded.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, InMemoryState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }

    /// Replace the served curriculum.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the state lock is poisoned.
    pub fn seed_topics(&self, topics: Vec<Topic>) -> Result<(), StorageError> {
        self.lock()?.topics = topics;
        Ok(())
    }

    /// Replace the served completion list verbatim (duplicates are kept).
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the state lock is poisoned.
    pub fn seed_completed(&self, ids: Vec<ProblemId>) -> Result<(), StorageError> {
        self.lock()?.completed = ids;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the state lock is poisoned.
    pub fn set_profile(&self, profile: UserProfile) -> Result<(), StorageError> {
        self.lock()?.profile = Some(profile);
        Ok(())
    }

    /// Make `fetch_curriculum` fail with `error` until cleared with `None`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the state lock is poisoned.
    pub fn fail_curriculum(&self, error: Option<StorageError>) -> Result<(), StorageError> {
        self.lock()?.curriculum_failure = error;
        Ok(())
    }

    /// Make `fetch_completed` fail with `error` until cleared with `None`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the state lock is poisoned.
    pub fn fail_completed(&self, error: Option<StorageError>) -> Result<(), StorageError> {
        self.lock()?.completed_failure = error;
        Ok(())
    }

    /// Make both mark operations fail with `error` until cleared with `None`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the state lock is poisoned.
    pub fn reject_marks(&self, error: Option<StorageError>) -> Result<(), StorageError> {
        self.lock()?.mark_failure = error;
        Ok(())
    }

    /// Calls received so far.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the state lock is poisoned.
    pub fn calls(&self) -> Result<Vec<RemoteCall>, StorageError> {
        Ok(self.lock()?.calls.clone())
    }

    /// Completion list as the remote side currently holds it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the state lock is poisoned.
    pub fn completed_ids(&self) -> Result<Vec<ProblemId>, StorageError> {
        Ok(self.lock()?.completed.clone())
    }
}

#[async_trait]
impl CurriculumRepository for InMemoryRepository {
    async fn fetch_curriculum(&self) -> Result<Vec<Topic>, StorageError> {
        let mut guard = self.lock()?;
        guard.calls.push(RemoteCall::FetchCurriculum);
        if let Some(err) = guard.curriculum_failure.clone() {
            return Err(err);
        }
        Ok(guard.topics.clone())
    }
}

#[async_trait]
impl CompletionRepository for InMemoryRepository {
    async fn fetch_completed(&self) -> Result<Vec<ProblemId>, StorageError> {
        let mut guard = self.lock()?;
        guard.calls.push(RemoteCall::FetchCompleted);
        if let Some(err) = guard.completed_failure.clone() {
            return Err(err);
        }
        Ok(guard.completed.clone())
    }

    async fn mark_complete(&self, id: &ProblemId) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        guard.calls.push(RemoteCall::MarkComplete(id.clone()));
        if let Some(err) = guard.mark_failure.clone() {
            return Err(err);
        }
        if !guard.completed.contains(id) {
            guard.completed.push(id.clone());
        }
        Ok(())
    }

    async fn mark_incomplete(&self, id: &ProblemId) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        guard.calls.push(RemoteCall::MarkIncomplete(id.clone()));
        if let Some(err) = guard.mark_failure.clone() {
            return Err(err);
        }
        guard.completed.retain(|done| done != id);
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryRepository {
    async fn fetch_profile(&self) -> Result<UserProfile, StorageError> {
        let mut guard = self.lock()?;
        guard.calls.push(RemoteCall::FetchProfile);
        guard.profile.clone().ok_or(StorageError::NotFound)
    }
}

/// Aggregates the remote repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub curriculum: Arc<dyn CurriculumRepository>,
    pub completions: Arc<dyn CompletionRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_in_memory(InMemoryRepository::new())
    }

    /// Share one in-memory repository across all three roles.
    #[must_use]
    pub fn from_in_memory(repo: InMemoryRepository) -> Self {
        let curriculum: Arc<dyn CurriculumRepository> = Arc::new(repo.clone());
        let completions: Arc<dyn CompletionRepository> = Arc::new(repo.clone());
        let profiles: Arc<dyn ProfileRepository> = Arc::new(repo);
        Self {
            curriculum,
            completions,
            profiles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker_core::model::{Difficulty, Problem, ProblemLinks, Subtopic, SubtopicId, TopicId};
    use tracker_core::time::fixed_now;

    fn topic() -> Topic {
        Topic::new(
            TopicId::new("t1"),
            "Arrays",
            "",
            vec![Subtopic::new(
                SubtopicId::new("s1"),
                "Basics",
                vec![Problem::new(
                    ProblemId::new("p1"),
                    "Two Sum",
                    Some(Difficulty::Easy),
                    ProblemLinks::new(),
                )],
            )],
        )
    }

    #[tokio::test]
    async fn serves_seeded_data_and_records_calls() {
        let repo = InMemoryRepository::new();
        repo.seed_topics(vec![topic()]).unwrap();
        repo.seed_completed(vec![ProblemId::new("p1"), ProblemId::new("p1")])
            .unwrap();

        assert_eq!(repo.fetch_curriculum().await.unwrap(), vec![topic()]);
        assert_eq!(repo.fetch_completed().await.unwrap().len(), 2);
        assert_eq!(
            repo.calls().unwrap(),
            vec![RemoteCall::FetchCurriculum, RemoteCall::FetchCompleted]
        );
    }

    #[tokio::test]
    async fn marks_are_idempotent() {
        let repo = InMemoryRepository::new();
        let id = ProblemId::new("p1");

        repo.mark_complete(&id).await.unwrap();
        repo.mark_complete(&id).await.unwrap();
        assert_eq!(repo.completed_ids().unwrap(), vec![id.clone()]);

        repo.mark_incomplete(&id).await.unwrap();
        repo.mark_incomplete(&id).await.unwrap();
        assert!(repo.completed_ids().unwrap().is_empty());
    }

    #[tokio::test]
    async fn injected_failures_leave_remote_state_alone() {
        let repo = InMemoryRepository::new();
        repo.reject_marks(Some(StorageError::Status(500))).unwrap();

        let err = repo.mark_complete(&ProblemId::new("p1")).await.unwrap_err();
        assert_eq!(err, StorageError::Status(500));
        assert!(repo.completed_ids().unwrap().is_empty());

        repo.fail_curriculum(Some(StorageError::Unauthorized)).unwrap();
        assert_eq!(
            repo.fetch_curriculum().await.unwrap_err(),
            StorageError::Unauthorized
        );
    }

    #[tokio::test]
    async fn profile_is_not_found_until_set() {
        let repo = InMemoryRepository::new();
        assert_eq!(
            repo.fetch_profile().await.unwrap_err(),
            StorageError::NotFound
        );

        let profile = UserProfile {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            joined_at: fixed_now(),
        };
        repo.set_profile(profile.clone()).unwrap();
        assert_eq!(repo.fetch_profile().await.unwrap(), profile);
    }
}
