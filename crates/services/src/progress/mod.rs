mod cache;
mod tracker;

pub use cache::ReportCache;
pub use tracker::{ProgressSnapshot, ProgressTracker};
pub use tracker_core::progress::{
    DifficultyStats, OverallStats, ProgressReport, TopicProgress, TopicStatus,
};
