//! `fix-translations`: remove numeric keys below `sanitize.targetPath` in
//! each language's main file.

use std::path::Path;

use super::{
    BatchReport,
    FileOutcome,
    RunError,
};
use crate::config::LocaleSettings;
use crate::document::{
    Document,
    load_document,
    store_document,
    to_pretty_string,
};
use crate::locales::{
    LocaleFile,
    resolve_locale_files,
};
use crate::ops::sanitize_at_path;

/// Strip numeric keys from `sanitize.targetPath` in every configured locale file.
///
/// Every file that loads is rewritten, even when nothing was removed, so the
/// output formatting stays uniform across languages.
pub fn run_sanitize(root: &Path, settings: &LocaleSettings) -> BatchReport {
    let mut report = BatchReport::default();

    for locale in resolve_locale_files(root, settings) {
        tracing::debug!(language = %locale.language, path = %locale.path.display(), "Sanitizing");
        let result = sanitize_locale(&locale, &settings.sanitize.target_path);
        report.record(&locale.language, locale.path, result);
    }

    report.log_summary("cleanup");
    report
}

fn sanitize_locale(locale: &LocaleFile, target_path: &[String]) -> Result<FileOutcome, RunError> {
    let mut document = load_document(&locale.path)?;
    let size_before = serialized_size(&document);

    let removed = sanitize_at_path(&mut document, target_path);
    store_document(&locale.path, &document)?;

    Ok(FileOutcome::Sanitized { removed, size_before, size_after: serialized_size(&document) })
}

fn serialized_size(document: &Document) -> usize {
    to_pretty_string(document).map_or(0, |text| text.len())
}
