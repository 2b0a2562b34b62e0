//! Plain-text rendering of derived progress.

use std::fmt;

use tracker_core::model::{CompletionSet, Curriculum, Problem, ProblemId, UserProfile};
use tracker_core::progress::{ProgressReport, topic_progress};

/// Every topic with its status, then its subtopics and their problems.
pub fn topics(curriculum: &Curriculum, completed: &CompletionSet) -> String {
    TopicsView {
        curriculum,
        completed,
    }
    .to_string()
}

pub fn progress(report: &ProgressReport) -> String {
    ProgressView(report).to_string()
}

pub fn toggled(curriculum: &Curriculum, problem_id: &ProblemId, completed: bool) -> String {
    let name = curriculum
        .problem(problem_id)
        .map_or(problem_id.as_str(), |problem| problem.name());
    let state = if completed { "completed" } else { "not completed" };
    format!("{name}: {state}\n")
}

pub fn profile(profile: &UserProfile) -> String {
    format!(
        "Name:   {}\nEmail:  {}\nJoined: {}\n",
        profile.name,
        profile.email,
        profile.joined_at.format("%Y-%m-%d")
    )
}

struct TopicsView<'a> {
    curriculum: &'a Curriculum,
    completed: &'a CompletionSet,
}

impl fmt::Display for TopicsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for topic in self.curriculum.topics() {
            let summary = topic_progress(topic, self.completed);
            writeln!(
                f,
                "{:<32} {:<12} {}/{}",
                summary.title, summary.status, summary.solved, summary.total
            )?;
            if !topic.description().is_empty() {
                writeln!(f, "  {}", topic.description())?;
            }
            for subtopic in topic.subtopics() {
                writeln!(f, "  {}", subtopic.title())?;
                for problem in subtopic.problems() {
                    write_problem(f, problem, self.completed.contains(problem.id()))?;
                }
            }
        }
        Ok(())
    }
}

fn write_problem(f: &mut fmt::Formatter<'_>, problem: &Problem, done: bool) -> fmt::Result {
    let mark = if done { 'x' } else { ' ' };
    write!(f, "    [{mark}] {}  {}", problem.id(), problem.name())?;
    if let Some(tier) = problem.difficulty() {
        write!(f, " ({tier})")?;
    }
    let mut links = problem.links().iter();
    if let Some((first, _)) = links.next() {
        write!(f, "  {first}")?;
        for (kind, _) in links {
            write!(f, " | {kind}")?;
        }
    }
    writeln!(f)
}

struct ProgressView<'a>(&'a ProgressReport);

impl fmt::Display for ProgressView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tier in &self.0.difficulties {
            writeln!(
                f,
                "{}: {}% ({}/{})",
                tier.difficulty, tier.percentage, tier.solved, tier.total
            )?;
            for name in &tier.solved_names {
                writeln!(f, "  - {name}")?;
            }
        }
        let overall = self.0.overall;
        writeln!(
            f,
            "Overall: {}% ({}/{})",
            overall.percentage, overall.solved, overall.total
        )
    }
}
