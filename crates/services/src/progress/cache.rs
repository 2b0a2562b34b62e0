use std::sync::{Arc, Mutex, PoisonError};

use tracker_core::model::{CompletionSet, Curriculum};
use tracker_core::progress::ProgressReport;

use super::tracker::ProgressSnapshot;

struct CachedReport {
    curriculum: Arc<Curriculum>,
    completed: Arc<CompletionSet>,
    report: Arc<ProgressReport>,
}

/// Memoizes the last `ProgressReport`, keyed on the identity of both snapshot `Arc`s.
///
/// A new completion set is always a new `Arc`, so a hit means the inputs
/// are exactly the ones the report was built from.
#[derive(Default)]
pub struct ReportCache {
    last: Mutex<Option<CachedReport>>,
}

impl ReportCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(&self, snapshot: &ProgressSnapshot) -> Arc<ProgressReport> {
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = last.as_ref() {
            if Arc::ptr_eq(&cached.curriculum, &snapshot.curriculum)
                && Arc::ptr_eq(&cached.completed, &snapshot.completed)
            {
                return Arc::clone(&cached.report);
            }
        }

        let report = Arc::new(ProgressReport::build(
            &snapshot.curriculum,
            &snapshot.completed,
        ));
        *last = Some(CachedReport {
            curriculum: Arc::clone(&snapshot.curriculum),
            completed: Arc::clone(&snapshot.completed),
            report: Arc::clone(&report),
        });
        report
    }
}
