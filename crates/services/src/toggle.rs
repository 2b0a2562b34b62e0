use std::fmt;

use storage::CompletionRepository;
use tracing::debug;
use tracker_core::model::{CompletionSet, ProblemId};

use crate::error::MutationError;

/// Which remote operation a toggle resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Complete,
    Uncomplete,
}

impl ToggleAction {
    /// The action that flips `problem_id`'s membership in `current`.
    #[must_use]
    pub fn for_problem(problem_id: &ProblemId, current: &CompletionSet) -> Self {
        if current.contains(problem_id) {
            ToggleAction::Uncomplete
        } else {
            ToggleAction::Complete
        }
    }
}

impl fmt::Display for ToggleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ToggleAction::Complete => "complete",
            ToggleAction::Uncomplete => "uncomplete",
        })
    }
}

/// Flip one problem's completion through the remote service.
///
/// Issues exactly one remote call. The returned set differs from `current`
/// only in `problem_id`, and only once the remote call succeeded; `current`
/// itself is never modified, so on error the caller still holds the
/// unchanged set.
///
/// Calls for the same id are not serialized here. Use
/// [`ProgressTracker::toggle`](crate::progress::ProgressTracker::toggle) for that.
///
/// # Errors
///
/// Returns `MutationError::RemoteRejected` when the remote call fails.
pub async fn toggle_problem(
    completions: &dyn CompletionRepository,
    problem_id: &ProblemId,
    current: &CompletionSet,
) -> Result<CompletionSet, MutationError> {
    let action = ToggleAction::for_problem(problem_id, current);
    debug!(problem = %problem_id, %action, "sending toggle");

    let result = match action {
        ToggleAction::Complete => completions.mark_complete(problem_id).await,
        ToggleAction::Uncomplete => completions.mark_incomplete(problem_id).await,
    };
    result.map_err(|source| MutationError::RemoteRejected {
        problem_id: problem_id.clone(),
        action,
        source,
    })?;

    Ok(match action {
        ToggleAction::Complete => current.with(problem_id.clone()),
        ToggleAction::Uncomplete => current.without(problem_id),
    })
}
