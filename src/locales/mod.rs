//! Locale file resolution: which file belongs to which language, and which
//! additions files are waiting to be merged into it.

use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobMatcher,
};
use ignore::WalkBuilder;

use crate::config::LocaleSettings;

#[derive(Debug, thiserror::Error)]
pub enum LocaleError {
    #[error("Invalid additions pattern '{pattern}' for language '{language}': {source}")]
    InvalidAdditionsPattern {
        language: String,
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// A language and the main translation file that holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleFile {
    pub language: String,
    pub path: PathBuf,
}

/// Resolve every configured language to its main file, in configured order.
///
/// `files` overrides win; everything else is `<root>/<localesDir>/<lang>.json`.
#[must_use]
pub fn resolve_locale_files(root: &Path, settings: &LocaleSettings) -> Vec<LocaleFile> {
    let locales_dir = root.join(&settings.locales_dir);

    settings
        .languages
        .iter()
        .map(|language| {
            let path = settings.files.get(language).map_or_else(
                || locales_dir.join(format!("{language}.json")),
                |custom| root.join(custom),
            );
            LocaleFile { language: language.clone(), path }
        })
        .collect()
}

/// Matches additions files per language against `merge.additionsPattern`.
#[derive(Debug, Clone)]
pub struct AdditionsMatcher {
    locales_dir: PathBuf,
    matchers: HashMap<String, GlobMatcher>,
}

impl AdditionsMatcher {
    /// Compile the additions pattern once per configured language.
    pub fn new(root: &Path, settings: &LocaleSettings) -> Result<Self, LocaleError> {
        let mut matchers = HashMap::with_capacity(settings.languages.len());
        for language in &settings.languages {
            let pattern = settings.merge.additions_pattern_for(language);
            let glob = Glob::new(&pattern).map_err(|source| {
                LocaleError::InvalidAdditionsPattern {
                    language: language.clone(),
                    pattern: pattern.clone(),
                    source,
                }
            })?;
            matchers.insert(language.clone(), glob.compile_matcher());
        }

        Ok(Self { locales_dir: root.join(&settings.locales_dir), matchers })
    }

    /// Returns true if `file_name` is an additions file for `language`.
    #[must_use]
    pub fn is_additions_file(&self, language: &str, file_name: &str) -> bool {
        self.matchers.get(language).is_some_and(|m| m.is_match(file_name))
    }

    /// List additions files for `locale` directly inside `localesDir`, sorted by
    /// file name. The main file itself is never returned.
    ///
    /// A missing or unreadable directory yields no additions.
    #[must_use]
    pub fn find_additions(&self, locale: &LocaleFile) -> Vec<PathBuf> {
        let mut found = Vec::new();

        for result in WalkBuilder::new(&self.locales_dir)
            .max_depth(Some(1))
            .hidden(false)
            .ignore(false)
            .parents(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .follow_links(false)
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(?err, "Failed to read locales directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            if path == locale.path {
                continue;
            }

            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            if self.is_additions_file(&locale.language, file_name) {
                found.push(path.to_path_buf());
            }
        }

        found.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        tracing::debug!(language = %locale.language, count = found.len(), "Additions files found");
        found
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::config::MergeConfig;

    fn locale(language: &str, path: PathBuf) -> LocaleFile {
        LocaleFile { language: language.to_string(), path }
    }

    #[rstest]
    fn resolves_default_paths_in_language_order() {
        let settings = LocaleSettings::default();

        let files = resolve_locale_files(Path::new("/workspace"), &settings);

        assert_eq!(
            files,
            vec![
                locale("ru", PathBuf::from("/workspace/locales/ru.json")),
                locale("en", PathBuf::from("/workspace/locales/en.json")),
                locale("ar", PathBuf::from("/workspace/locales/ar.json")),
            ]
        );
    }

    #[rstest]
    fn file_override_wins() {
        let mut settings = LocaleSettings {
            languages: vec!["en".to_string(), "ar".to_string()],
            ..LocaleSettings::default()
        };
        settings.files.insert("ar".to_string(), PathBuf::from("rtl/arabic.json"));

        let files = resolve_locale_files(Path::new("/workspace"), &settings);

        assert_eq!(files[1], locale("ar", PathBuf::from("/workspace/rtl/arabic.json")));
        assert_eq!(files[0], locale("en", PathBuf::from("/workspace/locales/en.json")));
    }

    #[rstest]
    #[case("en", "en_additions.json", true)]
    #[case("en", "en_additions_2.json", true)]
    #[case("en", "en_additions-library.json", true)]
    #[case("en", "en.json", false)]
    #[case("en", "ru_additions.json", false)]
    #[case("en", "en_additions.json.bak", false)]
    #[case("ar", "ar_additions.json", true)]
    #[case("de", "de_additions.json", false)]
    fn additions_file_matching(#[case] language: &str, #[case] file_name: &str, #[case] expected: bool) {
        let matcher =
            AdditionsMatcher::new(Path::new("/workspace"), &LocaleSettings::default()).expect("valid");

        assert_eq!(matcher.is_additions_file(language, file_name), expected);
    }

    #[rstest]
    fn finds_sorted_additions_for_language_only() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("locales");
        fs::create_dir_all(dir.join("nested")).unwrap();
        for name in ["en.json", "en_additions_b.json", "en_additions_a.json", "ru_additions.json"] {
            fs::write(dir.join(name), "{}").unwrap();
        }
        fs::write(dir.join("nested").join("en_additions_c.json"), "{}").unwrap();

        let settings = LocaleSettings::default();
        let matcher = AdditionsMatcher::new(temp_dir.path(), &settings).unwrap();
        let en = locale("en", dir.join("en.json"));

        let found = matcher.find_additions(&en);

        assert_that!(
            found,
            elements_are![eq(&dir.join("en_additions_a.json")), eq(&dir.join("en_additions_b.json"))]
        );
    }

    #[rstest]
    fn main_file_is_never_its_own_addition() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("locales");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("en.json"), "{}").unwrap();

        let settings = LocaleSettings {
            merge: MergeConfig { additions_pattern: "{lang}*.json".to_string(), ..MergeConfig::default() },
            ..LocaleSettings::default()
        };
        let matcher = AdditionsMatcher::new(temp_dir.path(), &settings).unwrap();

        assert_that!(matcher.find_additions(&locale("en", dir.join("en.json"))), is_empty());
    }

    #[rstest]
    fn missing_directory_yields_no_additions() {
        let temp_dir = TempDir::new().unwrap();
        let matcher = AdditionsMatcher::new(temp_dir.path(), &LocaleSettings::default()).unwrap();

        let found = matcher.find_additions(&locale("ru", temp_dir.path().join("locales/ru.json")));

        assert_that!(found, is_empty());
    }

    #[rstest]
    fn invalid_pattern_is_reported_with_language() {
        let settings = LocaleSettings {
            merge: MergeConfig {
                additions_pattern: "{lang}[.json".to_string(),
                ..MergeConfig::default()
            },
            ..LocaleSettings::default()
        };

        let result = AdditionsMatcher::new(Path::new("/workspace"), &settings);

        assert!(matches!(
            result,
            Err(LocaleError::InvalidAdditionsPattern { ref language, .. }) if language == "ru"
        ));
    }
}
