//! `.locale-tools.json` の読み込みとバリデーション
mod loader;
mod manager;
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use types::{
    ConfigError,
    LANGUAGE_PLACEHOLDER,
    LocaleSettings,
    MergeConfig,
    SanitizeConfig,
    ValidationError,
};
