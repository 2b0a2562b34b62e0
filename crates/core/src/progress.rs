//! Derived progress: topic status and per-difficulty statistics.
//!
//! Everything here is a pure function of a `Curriculum` and a
//! `CompletionSet`. Nothing is stored; callers recompute or memoize on
//! snapshot identity.

use std::fmt;

use crate::model::{CompletionSet, Curriculum, Difficulty, Problem, Topic, TopicId};

//
// ─── TOPIC STATUS ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopicStatus {
    Completed,
    InProgress,
}

impl TopicStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicStatus::Completed => "Completed",
            TopicStatus::InProgress => "In Progress",
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, TopicStatus::Completed)
    }
}

impl fmt::Display for TopicStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Completion status of a topic.
///
/// A topic is `Completed` when the number of its problems found in
/// `completed` equals its problem count, so a topic without problems is
/// vacuously `Completed`.
///
/// # Examples
///
/// ```
/// # use tracker_core::model::{CompletionSet, Topic, TopicId};
/// # use tracker_core::progress::{topic_status, TopicStatus};
/// let empty = Topic::new(TopicId::new("t"), "Empty", "", vec![]);
/// assert_eq!(topic_status(&empty, &CompletionSet::new()), TopicStatus::Completed);
/// ```
#[must_use]
pub fn topic_status(topic: &Topic, completed: &CompletionSet) -> TopicStatus {
    let (total, solved) = count_solved(topic.problems(), completed);
    if solved == total {
        TopicStatus::Completed
    } else {
        TopicStatus::InProgress
    }
}

/// Per-topic counts alongside the status, for listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicProgress {
    pub topic_id: TopicId,
    pub title: String,
    pub total: usize,
    pub solved: usize,
    pub status: TopicStatus,
}

#[must_use]
pub fn topic_progress(topic: &Topic, completed: &CompletionSet) -> TopicProgress {
    let (total, solved) = count_solved(topic.problems(), completed);
    TopicProgress {
        topic_id: topic.id().clone(),
        title: topic.title().to_owned(),
        total,
        solved,
        status: if solved == total {
            TopicStatus::Completed
        } else {
            TopicStatus::InProgress
        },
    }
}

/// Progress of every topic in curriculum order.
#[must_use]
pub fn topic_overview(curriculum: &Curriculum, completed: &CompletionSet) -> Vec<TopicProgress> {
    curriculum
        .topics()
        .iter()
        .map(|topic| topic_progress(topic, completed))
        .collect()
}

//
// ─── DIFFICULTY STATS ──────────────────────────────────────────────────────────
//

/// Aggregate for one difficulty tier across the whole curriculum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultyStats {
    pub difficulty: Difficulty,
    pub total: usize,
    pub solved: usize,
    /// `round(solved / total * 100)`, half rounding up; 0 when `total` is 0.
    pub percentage: u8,
    /// Names of solved problems in curriculum traversal order.
    pub solved_names: Vec<String>,
}

impl DifficultyStats {
    fn empty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            total: 0,
            solved: 0,
            percentage: 0,
            solved_names: Vec::new(),
        }
    }
}

/// Statistics for each tier, always in `[Easy, Medium, Hard]` order.
///
/// Problems without a recognized tier are skipped, as are completion ids
/// that do not appear in the curriculum.
#[must_use]
pub fn difficulty_stats(curriculum: &Curriculum, completed: &CompletionSet) -> [DifficultyStats; 3] {
    let mut stats = Difficulty::ALL.map(DifficultyStats::empty);

    for problem in curriculum.problems() {
        let Some(tier) = problem.difficulty() else {
            continue;
        };
        let Some(entry) = stats.iter_mut().find(|s| s.difficulty == tier) else {
            continue;
        };
        entry.total += 1;
        if completed.contains(problem.id()) {
            entry.solved += 1;
            entry.solved_names.push(problem.name().to_owned());
        }
    }

    for entry in &mut stats {
        entry.percentage = percentage(entry.solved, entry.total);
    }
    stats
}

//
// ─── OVERALL ───────────────────────────────────────────────────────────────────
//

/// Totals across every problem, tiered or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverallStats {
    pub total: usize,
    pub solved: usize,
    pub percentage: u8,
}

#[must_use]
pub fn overall_stats(curriculum: &Curriculum, completed: &CompletionSet) -> OverallStats {
    let (total, solved) = count_solved(curriculum.problems(), completed);
    OverallStats {
        total,
        solved,
        percentage: percentage(solved, total),
    }
}

/// Everything a progress screen needs, derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressReport {
    pub topics: Vec<TopicProgress>,
    pub difficulties: [DifficultyStats; 3],
    pub overall: OverallStats,
}

impl ProgressReport {
    #[must_use]
    pub fn build(curriculum: &Curriculum, completed: &CompletionSet) -> Self {
        Self {
            topics: topic_overview(curriculum, completed),
            difficulties: difficulty_stats(curriculum, completed),
            overall: overall_stats(curriculum, completed),
        }
    }

    #[must_use]
    pub fn difficulty(&self, tier: Difficulty) -> &DifficultyStats {
        // `difficulties` is indexed by `Difficulty::ALL` order.
        &self.difficulties[tier as usize]
    }
}

//
// ─── HELPERS ───────────────────────────────────────────────────────────────────
//

fn count_solved<'a>(
    problems: impl Iterator<Item = &'a Problem>,
    completed: &CompletionSet,
) -> (usize, usize) {
    problems.fold((0, 0), |(total, solved), problem| {
        (total + 1, solved + usize::from(completed.contains(problem.id())))
    })
}

/// Integer percentage rounded half up. `solved` never exceeds `total`.
fn percentage(solved: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (solved * 200 + total) / (total * 2);
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProblemId, ProblemLinks, Subtopic, SubtopicId};

    fn problem(id: &str, name: &str, tier: Option<Difficulty>) -> Problem {
        Problem::new(ProblemId::new(id), name, tier, ProblemLinks::new())
    }

    fn arrays_topic() -> Topic {
        Topic::new(
            TopicId::new("arrays"),
            "Arrays",
            "",
            vec![Subtopic::new(
                SubtopicId::new("basics"),
                "Basics",
                vec![
                    problem("p1", "Two Sum", Some(Difficulty::Easy)),
                    problem("p2", "3Sum", Some(Difficulty::Medium)),
                ],
            )],
        )
    }

    fn completed(raw: &[&str]) -> CompletionSet {
        raw.iter().map(|id| ProblemId::new(*id)).collect()
    }

    #[test]
    fn arrays_scenario_matches_expected_stats() {
        let curriculum = Curriculum::new(vec![arrays_topic()]);
        let set = completed(&["p1"]);

        assert_eq!(
            topic_status(&curriculum.topics()[0], &set),
            TopicStatus::InProgress
        );

        let [easy, medium, hard] = difficulty_stats(&curriculum, &set);
        assert_eq!(
            easy,
            DifficultyStats {
                difficulty: Difficulty::Easy,
                total: 1,
                solved: 1,
                percentage: 100,
                solved_names: vec!["Two Sum".to_owned()],
            }
        );
        assert_eq!((medium.total, medium.solved, medium.percentage), (1, 0, 0));
        assert!(medium.solved_names.is_empty());
        assert_eq!(hard, DifficultyStats::empty(Difficulty::Hard));
    }

    #[test]
    fn topic_completes_when_every_problem_is_done() {
        let topic = arrays_topic();
        assert_eq!(
            topic_status(&topic, &completed(&["p1", "p2"])),
            TopicStatus::Completed
        );
    }

    #[test]
    fn stale_ids_do_not_count_towards_completion() {
        let topic = arrays_topic();
        // Two members, but only one of them belongs to the topic.
        let set = completed(&["p1", "deleted"]);
        assert_eq!(topic_status(&topic, &set), TopicStatus::InProgress);

        let curriculum = Curriculum::new(vec![topic]);
        let solved: usize = difficulty_stats(&curriculum, &set)
            .iter()
            .map(|s| s.solved)
            .sum();
        assert_eq!(solved, 1);
    }

    #[test]
    fn empty_curriculum_yields_zeroed_tiers() {
        let stats = difficulty_stats(&Curriculum::empty(), &completed(&["p1"]));
        for (entry, tier) in stats.iter().zip(Difficulty::ALL) {
            assert_eq!(*entry, DifficultyStats::empty(tier));
        }
    }

    #[test]
    fn untiered_problems_are_excluded_from_tiers_but_not_topics() {
        let topic = Topic::new(
            TopicId::new("t"),
            "Misc",
            "",
            vec![Subtopic::new(
                SubtopicId::new("s"),
                "S",
                vec![
                    problem("a", "Tiered", Some(Difficulty::Hard)),
                    problem("b", "Untiered", None),
                ],
            )],
        );
        let curriculum = Curriculum::new(vec![topic]);
        let set = completed(&["a"]);

        let total: usize = difficulty_stats(&curriculum, &set)
            .iter()
            .map(|s| s.total)
            .sum();
        assert_eq!(total, 1);
        assert_eq!(
            topic_status(&curriculum.topics()[0], &set),
            TopicStatus::InProgress
        );
        assert_eq!(overall_stats(&curriculum, &set).total, 2);
    }

    #[test]
    fn solved_names_follow_traversal_order() {
        let topics = vec![
            Topic::new(
                TopicId::new("t1"),
                "First",
                "",
                vec![
                    Subtopic::new(
                        SubtopicId::new("s1"),
                        "A",
                        vec![problem("z", "Zeta", Some(Difficulty::Easy))],
                    ),
                    Subtopic::new(
                        SubtopicId::new("s2"),
                        "B",
                        vec![problem("a", "Alpha", Some(Difficulty::Easy))],
                    ),
                ],
            ),
            Topic::new(
                TopicId::new("t2"),
                "Second",
                "",
                vec![Subtopic::new(
                    SubtopicId::new("s1"),
                    "C",
                    vec![problem("m", "Mu", Some(Difficulty::Easy))],
                )],
            ),
        ];
        let curriculum = Curriculum::new(topics);
        let [easy, _, _] = difficulty_stats(&curriculum, &completed(&["a", "m", "z"]));
        assert_eq!(easy.solved_names, ["Zeta", "Alpha", "Mu"]);
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(1, 200), 1);
        assert_eq!(percentage(5, 5), 100);
    }

    #[test]
    fn solved_never_exceeds_total() {
        let curriculum = Curriculum::new(vec![arrays_topic()]);
        let set = completed(&["p1", "p2", "x", "y", "z"]);
        for entry in difficulty_stats(&curriculum, &set) {
            assert!(entry.solved <= entry.total);
            assert!(entry.percentage <= 100);
        }
    }

    #[test]
    fn report_bundles_all_views() {
        let curriculum = Curriculum::new(vec![arrays_topic()]);
        let report = ProgressReport::build(&curriculum, &completed(&["p2"]));

        assert_eq!(report.topics.len(), 1);
        assert_eq!(report.topics[0].solved, 1);
        assert_eq!(report.topics[0].status.to_string(), "In Progress");
        assert_eq!(report.difficulty(Difficulty::Medium).solved, 1);
        assert_eq!(report.difficulty(Difficulty::Hard).total, 0);
        assert_eq!(
            report.overall,
            OverallStats {
                total: 2,
                solved: 1,
                percentage: 50
            }
        );
    }

    #[test]
    fn repeated_problem_counts_at_every_position() {
        let topic = Topic::new(
            TopicId::new("arrays"),
            "Arrays",
            "",
            vec![
                Subtopic::new(
                    SubtopicId::new("basics"),
                    "Basics",
                    vec![problem("p1", "Two Sum", Some(Difficulty::Easy))],
                ),
                Subtopic::new(
                    SubtopicId::new("review"),
                    "Review",
                    vec![problem("p1", "Two Sum", Some(Difficulty::Easy))],
                ),
            ],
        );
        let curriculum = Curriculum::new(vec![topic]);
        let set = completed(&["p1"]);

        assert_eq!(topic_status(&curriculum.topics()[0], &set), TopicStatus::Completed);
        let easy = &difficulty_stats(&curriculum, &set)[0];
        assert_eq!((easy.total, easy.solved, easy.percentage), (2, 2, 100));
        assert_eq!(easy.solved_names, ["Two Sum", "Two Sum"]);
    }
}
