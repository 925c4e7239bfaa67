//! `merge-translations`: deep-merge the overlay file entry and every additions
//! file into each language's main file.

use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use serde_json::Value;

use super::{
    BatchReport,
    FileOutcome,
    RunError,
};
use crate::config::LocaleSettings;
use crate::document::{
    Document,
    DocumentError,
    load_document,
    store_document,
};
use crate::locales::{
    AdditionsMatcher,
    LocaleError,
    LocaleFile,
    resolve_locale_files,
};
use crate::ops::{
    MergeStats,
    deep_merge,
};

/// The shared overlay file, loaded once per run.
type OverlaySource = Option<(PathBuf, Result<Document, Arc<DocumentError>>)>;

/// Merge every overlay for every configured language into its main file.
///
/// Overlays come from `merge.overlayFile` (the entry keyed by the language)
/// followed by the language's additions files in file-name order. Languages
/// without any overlay are skipped and their file is not rewritten. An
/// additions file that fails to load is left in place and reported; the others
/// are still merged.
///
/// # Errors
/// Only when the additions pattern cannot be compiled; per-file problems are
/// reported in the returned [`BatchReport`].
pub fn run_merge(root: &Path, settings: &LocaleSettings) -> Result<BatchReport, LocaleError> {
    let matcher = AdditionsMatcher::new(root, settings)?;
    let overlay_source = load_overlay_source(root, settings);
    let mut report = BatchReport::default();

    for locale in resolve_locale_files(root, settings) {
        tracing::debug!(language = %locale.language, path = %locale.path.display(), "Merging");
        let result = merge_locale(&locale, overlay_source.as_ref(), &matcher, settings);
        report.record(&locale.language, locale.path, result);
    }

    report.log_summary("merge");
    Ok(report)
}

fn load_overlay_source(root: &Path, settings: &LocaleSettings) -> OverlaySource {
    let path = root.join(settings.merge.overlay_file.as_ref()?);
    tracing::debug!("Loading overlay file: {:?}", path);
    let document = load_document(&path).map_err(Arc::new);
    Some((path, document))
}

fn merge_locale(
    locale: &LocaleFile,
    overlay_source: Option<&(PathBuf, Result<Document, Arc<DocumentError>>)>,
    matcher: &AdditionsMatcher,
    settings: &LocaleSettings,
) -> Result<FileOutcome, RunError> {
    let mut document = load_document(&locale.path)?;

    let mut overlays: Vec<(PathBuf, Document)> = Vec::new();

    if let Some((path, source)) = overlay_source {
        let source = source.as_ref().map_err(|e| RunError::OverlayUnavailable(Arc::clone(e)))?;
        match source.get(&locale.language) {
            Some(Value::Object(overlay)) => overlays.push((path.clone(), overlay.clone())),
            Some(_) => {
                return Err(RunError::InvalidOverlayEntry {
                    language: locale.language.clone(),
                    path: path.clone(),
                });
            }
            None => tracing::debug!(language = %locale.language, "No entry in overlay file"),
        }
    }

    let mut consumed = Vec::new();
    let mut rejected = Vec::new();
    for path in matcher.find_additions(locale) {
        match load_document(&path) {
            Ok(overlay) => {
                consumed.push(path.clone());
                overlays.push((path, overlay));
            }
            Err(err) => {
                tracing::error!(language = %locale.language, "Skipping additions file: {err}");
                rejected.push(err);
            }
        }
    }

    if overlays.is_empty() {
        return match rejected.into_iter().next() {
            Some(err) => Err(err.into()),
            None => Ok(FileOutcome::Skipped),
        };
    }

    let mut stats = MergeStats::default();
    for (path, overlay) in &overlays {
        let applied = deep_merge(&mut document, overlay);
        tracing::debug!(overlay = %path.display(), ?applied, "Overlay applied");
        stats += applied;
    }

    store_document(&locale.path, &document)?;

    if settings.merge.remove_consumed_additions {
        remove_consumed(&consumed);
    }

    Ok(FileOutcome::Merged {
        stats,
        overlays: overlays.into_iter().map(|(path, _)| path).collect(),
        rejected,
    })
}

/// Delete additions files that were merged; rejected ones stay in place.
/// Failures are logged, not propagated: the main file has already been written
/// at this point.
fn remove_consumed(additions: &[PathBuf]) {
    for path in additions {
        match std::fs::remove_file(path) {
            Ok(()) => tracing::info!(path = %path.display(), "Removed consumed additions file"),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "Failed to remove additions file");
            }
        }
    }
}
