//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    LocaleSettings,
    loader,
};

/// 検証済みの設定と、相対パスの基準となるルートディレクトリ
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// バリデーション済みの設定
    settings: LocaleSettings,

    /// `localesDir` / `files` / `merge.overlayFile` の基準ディレクトリ
    root: PathBuf,
}

impl ConfigManager {
    /// `root` の `.locale-tools.json` を読み込み、検証する
    ///
    /// 設定ファイルがなければデフォルト値を使う
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー（全件まとめて返す）
    pub fn load(root: PathBuf) -> Result<Self, ConfigError> {
        tracing::debug!("Loading settings from: {:?}", root);

        let settings = loader::load_from_root(&root)?.unwrap_or_else(|| {
            tracing::debug!("Using default settings");
            LocaleSettings::default()
        });

        settings.validate().map_err(ConfigError::ValidationErrors)?;
        tracing::debug!(languages = ?settings.languages, "Settings loaded");

        Ok(Self { settings, root })
    }

    #[must_use]
    pub const fn settings(&self) -> &LocaleSettings {
        &self.settings
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::config::CONFIG_FILE_NAME;

    /// load: 設定ファイルがある場合
    #[rstest]
    fn test_load_with_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{"languages": ["en", "de"]}"#;
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content).unwrap();

        let manager = ConfigManager::load(temp_dir.path().to_path_buf()).unwrap();

        assert_eq!(manager.settings().languages, ["en", "de"]);
        assert_eq!(manager.root(), temp_dir.path());
    }

    /// load: 設定ファイルがない場合はデフォルト値
    #[rstest]
    fn test_load_without_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let manager = ConfigManager::load(temp_dir.path().to_path_buf()).unwrap();

        assert_eq!(manager.settings().languages, ["ru", "en", "ar"]);
        assert_eq!(manager.settings().sanitize.target_path, ["library", "categories"]);
    }

    /// load: バリデーションエラーは全件返す
    #[rstest]
    fn test_load_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            r#"{"languages": [], "sanitize": {"targetPath": [""]}}"#,
        )
        .unwrap();

        let result = ConfigManager::load(temp_dir.path().to_path_buf());

        match result {
            Err(ConfigError::ValidationErrors(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation errors, got {other:?}"),
        }
    }

    /// load: パースエラー
    #[rstest]
    fn test_load_unparsable_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "{").unwrap();

        let result = ConfigManager::load(temp_dir.path().to_path_buf());

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
