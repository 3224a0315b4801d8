//! jsonts configuration file handling

use anyhow::{Context, Result};
use jsonts_i18n::{Language, MessageTable};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "jsonts.toml";

/// POSIX locale variables consulted for the initial language, highest priority first.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// Top-level jsonts configuration (jsonts.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct JsontsConfig {
    #[serde(default)]
    pub i18n: I18nConfig,

    /// Directory containing the config file; relative paths resolve against it.
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

/// Localization settings
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct I18nConfig {
    /// Initial UI language (`en`, `zh`, or a locale tag such as `zh-CN`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    /// Directory with `<lang>.yaml` catalogs replacing the built-in ones
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_dir: Option<PathBuf>,
}

impl JsontsConfig {
    /// Load configuration from a file or a directory (looks for jsonts.toml)
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No {} found at {}. Run `jsonts init` to create one.",
                CONFIG_FILE,
                config_path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let mut config: JsontsConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        config.base_dir = config_path.parent().map(Path::to_path_buf);

        debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    /// Load an explicitly named config, or `./jsonts.toml` if present, or defaults.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        let default_path = cwd.join(CONFIG_FILE);
        if default_path.is_file() {
            Self::load_from(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Initial language: flag, then config, then environment locale.
    pub fn initial_language(&self, flag: Option<Language>) -> Language {
        flag.or(self.i18n.language)
            .unwrap_or_else(language_from_env)
    }

    /// Catalog directory, resolved against the config file location.
    pub fn catalog_dir(&self) -> Option<PathBuf> {
        let dir = self.i18n.catalog_dir.as_ref()?;
        Some(match &self.base_dir {
            Some(base) if dir.is_relative() => base.join(dir),
            _ => dir.clone(),
        })
    }

    /// The message table this configuration selects.
    pub fn message_table(&self) -> Result<Arc<MessageTable>> {
        match self.catalog_dir() {
            Some(dir) => load_catalog_dir(&dir).map(Arc::new),
            None => Ok(MessageTable::shared_builtin()),
        }
    }
}

/// Detect the language from POSIX locale variables.
pub fn language_from_env() -> Language {
    let values: Vec<Option<String>> = LOCALE_VARS
        .iter()
        .map(|var| std::env::var(var).ok())
        .collect();
    Language::detect(values.iter().map(|v| v.as_deref()))
}

/// Load `<dir>/<code>.yaml` for every supported language.
pub fn load_catalog_dir(dir: &Path) -> Result<MessageTable> {
    let mut sources = Vec::with_capacity(Language::ALL.len());
    for lang in Language::ALL {
        let path = dir.join(format!("{}.yaml", lang.code()));
        let src = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        sources.push((lang, src));
    }

    MessageTable::from_sources(sources.iter().map(|(lang, src)| (*lang, src.as_str())))
        .with_context(|| format!("Invalid catalogs in {}", dir.display()))
}
