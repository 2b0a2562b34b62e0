//! Shared error types for the services crate.

use thiserror::Error;

use storage::{HttpInitError, StorageError};
use tracker_core::model::ProblemId;

use crate::toggle::ToggleAction;

/// Errors emitted while loading a session's curriculum and completion set.
///
/// Either fetch failing fails the whole load; no partial data is returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("failed to fetch curriculum: {0}")]
    CurriculumFetch(#[source] StorageError),
    #[error("failed to fetch completed problems: {0}")]
    CompletionFetch(#[source] StorageError),
}

/// Errors emitted by the mutation coordinator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MutationError {
    /// The remote service did not acknowledge the change; local state is untouched.
    #[error("remote service rejected {action} of problem {problem_id}: {source}")]
    RemoteRejected {
        problem_id: ProblemId,
        action: ToggleAction,
        #[source]
        source: StorageError,
    },
}

/// Errors emitted by `ProfileService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while opening a session context.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("a bearer token is required")]
    MissingCredential,
    #[error(transparent)]
    Http(#[from] HttpInitError),
}
