mod account;
mod completion;
mod curriculum;
mod difficulty;
mod ids;
mod link;

pub use ids::{ParseIdError, ProblemId, SubtopicId, TopicId};

pub use account::{Credential, UserProfile};
pub use completion::CompletionSet;
pub use curriculum::{Curriculum, Problem, Subtopic, Topic};
pub use difficulty::Difficulty;
pub use link::{LinkKind, ProblemLinks};
