use std::collections::BTreeSet;

use crate::model::curriculum::Curriculum;
use crate::model::ids::ProblemId;

/// Problem ids the user has completed.
///
/// Membership is the only meaningful query; iteration is sorted so that
/// two equal sets always render the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionSet(BTreeSet<ProblemId>);

impl CompletionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from ids as received, dropping duplicates.
    pub fn from_ids(ids: impl IntoIterator<Item = ProblemId>) -> Self {
        Self(ids.into_iter().collect())
    }

    #[must_use]
    pub fn contains(&self, id: &ProblemId) -> bool {
        self.0.contains(id)
    }

    /// Returns `true` if the id was not already present.
    pub fn insert(&mut self, id: ProblemId) -> bool {
        self.0.insert(id)
    }

    /// Returns `true` if the id was present.
    pub fn remove(&mut self, id: &ProblemId) -> bool {
        self.0.remove(id)
    }

    /// Copy of this set with `id` added.
    #[must_use]
    pub fn with(&self, id: ProblemId) -> Self {
        let mut next = self.clone();
        next.insert(id);
        next
    }

    /// Copy of this set with `id` removed.
    #[must_use]
    pub fn without(&self, id: &ProblemId) -> Self {
        let mut next = self.clone();
        next.remove(id);
        next
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProblemId> {
        self.0.iter()
    }

    /// Members that no longer exist anywhere in `curriculum`.
    #[must_use]
    pub fn stale_ids(&self, curriculum: &Curriculum) -> Vec<&ProblemId> {
        self.0
            .iter()
            .filter(|id| !curriculum.contains_problem(id))
            .collect()
    }
}

impl FromIterator<ProblemId> for CompletionSet {
    fn from_iter<I: IntoIterator<Item = ProblemId>>(iter: I) -> Self {
        Self::from_ids(iter)
    }
}
