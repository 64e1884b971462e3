//! Collected outcome of a build pass

use crate::content::Violation;
use crate::error::Error;

/// A validation problem in a file that was still emitted
#[derive(Debug, Clone)]
pub struct FileWarning {
    pub source: String,
    pub violation: Violation,
}

/// Two files resolved to the same output path; the later one was dropped
#[derive(Debug, Clone)]
pub struct UrlCollision {
    pub path: String,
    pub kept: String,
    pub dropped: String,
}

/// Everything that happened in one pass, reported once at the end
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Pages handed to the sink
    pub emitted: usize,
    /// Files excluded from the build because they could not be read or parsed
    pub skipped: Vec<Error>,
    pub warnings: Vec<FileWarning>,
    pub collisions: Vec<UrlCollision>,
}

impl BuildReport {
    pub fn problem_count(&self) -> usize {
        self.skipped.len() + self.warnings.len() + self.collisions.len()
    }

    pub fn is_clean(&self) -> bool {
        self.problem_count() == 0
    }

    /// Log every problem, then a one-line summary
    pub fn log(&self) {
        for err in &self.skipped {
            tracing::warn!("Skipped: {}", err);
        }
        for w in &self.warnings {
            tracing::warn!("{}: {}", w.source, w.violation);
        }
        for c in &self.collisions {
            tracing::warn!(
                "{} and {} both resolve to {}; dropped {}",
                c.kept,
                c.dropped,
                c.path,
                c.dropped
            );
        }

        tracing::info!("{}", self.summary());
    }

    pub fn summary(&self) -> String {
        format!(
            "{} pages, {} skipped, {} warnings, {} collisions",
            self.emitted,
            self.skipped.len(),
            self.warnings.len(),
            self.collisions.len()
        )
    }
}
