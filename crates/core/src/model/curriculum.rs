use std::collections::HashSet;

use crate::model::difficulty::Difficulty;
use crate::model::ids::{ProblemId, SubtopicId, TopicId};
use crate::model::link::ProblemLinks;

//
// ─── PROBLEM ───────────────────────────────────────────────────────────────────
//

/// A single practice problem.
///
/// `difficulty` is `None` when the remote data carried no tier or one
/// outside the closed [`Difficulty`] set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    id: ProblemId,
    name: String,
    difficulty: Option<Difficulty>,
    links: ProblemLinks,
}

impl Problem {
    #[must_use]
    pub fn new(
        id: ProblemId,
        name: impl Into<String>,
        difficulty: Option<Difficulty>,
        links: ProblemLinks,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            difficulty,
            links,
        }
    }

    #[must_use]
    pub fn id(&self) -> &ProblemId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    #[must_use]
    pub fn links(&self) -> &ProblemLinks {
        &self.links
    }
}

//
// ─── SUBTOPIC ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtopic {
    id: SubtopicId,
    title: String,
    problems: Vec<Problem>,
}

impl Subtopic {
    #[must_use]
    pub fn new(id: SubtopicId, title: impl Into<String>, problems: Vec<Problem>) -> Self {
        Self {
            id,
            title: title.into(),
            problems,
        }
    }

    #[must_use]
    pub fn id(&self) -> &SubtopicId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }
}

//
// ─── TOPIC ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    id: TopicId,
    title: String,
    description: String,
    subtopics: Vec<Subtopic>,
}

impl Topic {
    #[must_use]
    pub fn new(
        id: TopicId,
        title: impl Into<String>,
        description: impl Into<String>,
        subtopics: Vec<Subtopic>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            subtopics,
        }
    }

    #[must_use]
    pub fn id(&self) -> &TopicId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn subtopics(&self) -> &[Subtopic] {
        &self.subtopics
    }

    /// All problems of every subtopic, subtopic order first.
    pub fn problems(&self) -> impl Iterator<Item = &Problem> {
        self.subtopics.iter().flat_map(|sub| sub.problems.iter())
    }
}

//
// ─── CURRICULUM ────────────────────────────────────────────────────────────────
//

/// The full topic → subtopic → problem hierarchy for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Curriculum {
    topics: Vec<Topic>,
}

impl Curriculum {
    /// Build a curriculum from fetched topics.
    ///
    /// Problem ids are expected to be unique but are not required to be: a
    /// repeated id is kept at every position and counted once per position.
    /// See [`Curriculum::duplicate_problem_ids`].
    #[must_use]
    pub fn new(topics: Vec<Topic>) -> Self {
        Self { topics }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    #[must_use]
    pub fn topic(&self, id: &TopicId) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.id() == id)
    }

    /// Every problem in traversal order: topic, then subtopic, then problem.
    pub fn problems(&self) -> impl Iterator<Item = &Problem> {
        self.topics.iter().flat_map(Topic::problems)
    }

    /// Ids listed more than once, each reported once, in traversal order of
    /// their second occurrence.
    #[must_use]
    pub fn duplicate_problem_ids(&self) -> Vec<&ProblemId> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        self.problems()
            .map(Problem::id)
            .filter(|id| !seen.insert(*id) && reported.insert(*id))
            .collect()
    }

    /// First problem with `id` in traversal order.
    #[must_use]
    pub fn problem(&self, id: &ProblemId) -> Option<&Problem> {
        self.problems().find(|problem| problem.id() == id)
    }

    #[must_use]
    pub fn contains_problem(&self, id: &ProblemId) -> bool {
        self.problem(id).is_some()
    }

    #[must_use]
    pub fn problem_count(&self) -> usize {
        self.problems().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}
