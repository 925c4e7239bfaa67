//! Batch runners that apply one transformation to every configured locale file.
//!
//! Each file is processed on its own: a failure is recorded in the report and
//! the next file is processed anyway.

mod merge;
mod sanitize;

use std::path::PathBuf;
use std::sync::Arc;

pub use merge::run_merge;
pub use sanitize::run_sanitize;
use thiserror::Error;

use crate::document::DocumentError;
use crate::ops::MergeStats;

/// Why a single locale file could not be processed.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The shared overlay file failed to load; every language reports it.
    #[error("Overlay file unavailable: {0}")]
    OverlayUnavailable(Arc<DocumentError>),

    #[error("Overlay for '{language}' in {} must be a JSON object", .path.display())]
    InvalidOverlayEntry { language: String, path: PathBuf },
}

/// What happened to one locale file.
#[derive(Debug)]
pub enum FileOutcome {
    /// Overlays were merged and the file rewritten. Counts as a failure when
    /// some additions files were rejected.
    Merged {
        stats: MergeStats,
        /// Overlay sources in the order they were applied
        overlays: Vec<PathBuf>,
        /// Additions files that could not be loaded and were left in place
        rejected: Vec<DocumentError>,
    },
    /// Nothing to merge; the file was left untouched.
    Skipped,
    /// Numeric keys were removed and the file rewritten.
    Sanitized { removed: usize, size_before: usize, size_after: usize },
    Failed(RunError),
}

impl FileOutcome {
    #[must_use]
    pub fn is_failure(&self) -> bool {
        match self {
            Self::Failed(_) => true,
            Self::Merged { rejected, .. } => !rejected.is_empty(),
            Self::Skipped | Self::Sanitized { .. } => false,
        }
    }
}

#[derive(Debug)]
pub struct FileReport {
    pub language: String,
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

impl FileReport {
    fn log(&self) {
        let language = self.language.as_str();
        let path = self.path.display();
        match &self.outcome {
            FileOutcome::Merged { stats, overlays, rejected } if rejected.is_empty() => tracing::info!(
                language,
                %path,
                overlays = overlays.len(),
                added = stats.added,
                updated = stats.updated,
                unchanged = stats.unchanged,
                "Merged translations into {language}.json"
            ),
            FileOutcome::Merged { stats, overlays, rejected } => tracing::error!(
                language,
                %path,
                overlays = overlays.len(),
                rejected = rejected.len(),
                added = stats.added,
                updated = stats.updated,
                "Merged translations into {language}.json, {} additions files left in place",
                rejected.len()
            ),
            FileOutcome::Skipped => {
                tracing::info!(language, %path, "No overlays for {language}, skipping");
            }
            FileOutcome::Sanitized { removed, size_before, size_after } => tracing::info!(
                language,
                %path,
                removed,
                "Fixed {language}.json: removed {removed} numeric keys (size: {size_before} -> {size_after})"
            ),
            FileOutcome::Failed(err) => {
                tracing::error!(language, %path, "Error processing {language}.json: {err}");
            }
        }
    }
}

/// Per-file results of one run, in processing order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

impl BatchReport {
    fn record(&mut self, language: &str, path: PathBuf, result: Result<FileOutcome, RunError>) {
        let outcome = result.unwrap_or_else(FileOutcome::Failed);
        let report = FileReport { language: language.to_string(), path, outcome };
        report.log();
        self.files.push(report);
    }

    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.files
            .iter()
            .filter(|f| {
                matches!(f.outcome, FileOutcome::Merged { .. } | FileOutcome::Sanitized { .. })
                    && !f.outcome.is_failure()
            })
            .count()
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.files.iter().filter(|f| matches!(f.outcome, FileOutcome::Skipped)).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.files.iter().filter(|f| f.outcome.is_failure()).count()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.files.iter().any(|f| f.outcome.is_failure())
    }

    /// Outcome for `language`, if it was part of the run.
    #[must_use]
    pub fn outcome(&self, language: &str) -> Option<&FileOutcome> {
        self.files.iter().find(|f| f.language == language).map(|f| &f.outcome)
    }

    /// Emit the final summary line.
    pub fn log_summary(&self, action: &str) {
        let (succeeded, skipped, failed) = (self.succeeded(), self.skipped(), self.failed());
        if failed == 0 {
            tracing::info!(succeeded, skipped, failed, "Translation {action} completed");
        } else {
            tracing::warn!(succeeded, skipped, failed, "Translation {action} completed with errors");
        }
    }
}
