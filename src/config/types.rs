use std::collections::{
    BTreeMap,
    HashSet,
};
use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Placeholder substituted with the language code in `merge.additionsPattern`.
pub const LANGUAGE_PLACEHOLDER: &str = "{lang}";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "languages[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocaleSettings {
    /// Directory holding `<lang>.json` files, relative to the config root.
    pub locales_dir: PathBuf,

    /// Processed in this order.
    pub languages: Vec<String>,

    /// Per-language file overrides, relative to the config root.
    /// Languages not listed here use `<localesDir>/<lang>.json`.
    pub files: BTreeMap<String, PathBuf>,

    pub merge: MergeConfig,
    pub sanitize: SanitizeConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MergeConfig {
    /// JSON object keyed by language code whose values are overlay documents.
    pub overlay_file: Option<PathBuf>,

    /// File name glob inside `localesDir`; `{lang}` is replaced by the language code.
    pub additions_pattern: String,

    /// Delete merged additions files once the main file has been written.
    pub remove_consumed_additions: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SanitizeConfig {
    /// Key path of the mapping whose numeric keys are removed.
    pub target_path: Vec<String>,
}

impl MergeConfig {
    /// `additions_pattern` with the placeholder replaced by `language`.
    #[must_use]
    pub fn additions_pattern_for(&self, language: &str) -> String {
        self.additions_pattern.replace(LANGUAGE_PLACEHOLDER, language)
    }
}

impl LocaleSettings {
    /// # Errors
    /// - Required field is empty
    /// - Duplicate or unknown language
    /// - Invalid additions glob pattern
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.locales_dir.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "localesDir",
                "The directory cannot be empty. Example: \"src/i18n/locales\"",
            ));
        }

        if self.languages.is_empty() {
            errors.push(ValidationError::new(
                "languages",
                "At least one language is required. Example: [\"en\"]",
            ));
        }

        let mut seen = HashSet::new();
        for (index, language) in self.languages.iter().enumerate() {
            if language.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("languages[{index}]"),
                    "The language code cannot be empty",
                ));
            } else if !seen.insert(language.as_str()) {
                errors.push(ValidationError::new(
                    format!("languages[{index}]"),
                    format!("Duplicate language '{language}'"),
                ));
            }
        }

        for (language, path) in &self.files {
            if !self.languages.contains(language) {
                errors.push(ValidationError::new(
                    format!("files.{language}"),
                    format!("'{language}' is not listed in 'languages'"),
                ));
            }
            if path.as_os_str().is_empty() {
                errors.push(ValidationError::new(
                    format!("files.{language}"),
                    "The path cannot be empty. Please specify a file, or remove this entry",
                ));
            }
        }

        self.validate_merge(&mut errors);

        for (index, segment) in self.sanitize.target_path.iter().enumerate() {
            if segment.is_empty() {
                errors.push(ValidationError::new(
                    format!("sanitize.targetPath[{index}]"),
                    "Path segments cannot be empty",
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    fn validate_merge(&self, errors: &mut Vec<ValidationError>) {
        if let Some(path) = &self.merge.overlay_file
            && path.as_os_str().is_empty()
        {
            errors.push(ValidationError::new(
                "merge.overlayFile",
                "The path cannot be empty. Please specify a file, or remove this field",
            ));
        }

        let pattern = &self.merge.additions_pattern;

        if pattern.is_empty() {
            errors.push(ValidationError::new(
                "merge.additionsPattern",
                "The pattern cannot be empty. Example: \"{lang}_additions*.json\"",
            ));
            return;
        }

        if !pattern.contains(LANGUAGE_PLACEHOLDER) {
            errors.push(ValidationError::new(
                "merge.additionsPattern",
                format!("The pattern must contain '{LANGUAGE_PLACEHOLDER}'. Example: \"{{lang}}_additions*.json\""),
            ));
            return;
        }

        // Report a broken pattern once, not once per language.
        if let Some(e) = self
            .languages
            .iter()
            .find_map(|language| globset::Glob::new(&self.merge.additions_pattern_for(language)).err())
        {
            errors.push(ValidationError::new(
                "merge.additionsPattern",
                format!("Invalid glob pattern '{pattern}': {e}"),
            ));
        }
    }
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            locales_dir: PathBuf::from("locales"),
            languages: vec!["ru".to_string(), "en".to_string(), "ar".to_string()],
            files: BTreeMap::new(),
            merge: MergeConfig::default(),
            sanitize: SanitizeConfig::default(),
        }
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            overlay_file: None,
            additions_pattern: format!("{LANGUAGE_PLACEHOLDER}_additions*.json"),
            remove_consumed_additions: true,
        }
    }
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self { target_path: vec!["library".to_string(), "categories".to_string()] }
    }
}
