//! Config scaffolding for `jsonts init`

use anyhow::{Context, Result};
use jsonts_i18n::{Language, MessageTable};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::{JsontsConfig, CONFIG_FILE};

/// Directory name used for exported catalogs.
const CATALOG_DIR: &str = "i18n";

/// Write a jsonts.toml into `path`, optionally exporting the built-in catalogs
/// next to it so they can be edited.
pub fn init_project(
    path: &Path,
    language: Option<Language>,
    with_catalogs: bool,
    force: bool,
) -> Result<PathBuf> {
    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            config_path.display()
        );
    }

    let mut config = JsontsConfig::default();
    config.i18n.language = language;

    if with_catalogs {
        let dir = path.join(CATALOG_DIR);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        for lang in Language::ALL {
            let file = dir.join(format!("{}.yaml", lang.code()));
            if file.exists() && !force {
                anyhow::bail!(
                    "{} already exists. Use --force to overwrite it.",
                    file.display()
                );
            }
            fs::write(&file, MessageTable::builtin_source(lang))
                .with_context(|| format!("Failed to write {}", file.display()))?;
        }
        config.i18n.catalog_dir = Some(PathBuf::from(CATALOG_DIR));
    }

    fs::write(&config_path, config.to_toml()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    info!(path = %config_path.display(), with_catalogs, "initialized config");
    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_catalog_dir;
    use pretty_assertions::assert_eq;

    #[test]
    fn writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = init_project(dir.path(), Some(Language::Zh), false, false).unwrap();

        let config = JsontsConfig::load_from(&path).unwrap();
        assert_eq!(config.i18n.language, Some(Language::Zh));
        assert_eq!(config.catalog_dir(), None);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        init_project(dir.path(), None, false, false).unwrap();

        let err = init_project(dir.path(), None, false, false).unwrap_err();
        assert!(err.to_string().contains("--force"));

        init_project(dir.path(), Some(Language::En), false, true).unwrap();
    }

    #[test]
    fn exported_catalogs_match_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let path = init_project(dir.path(), None, true, false).unwrap();

        let config = JsontsConfig::load_from(&path).unwrap();
        let catalog_dir = config.catalog_dir().unwrap();
        assert_eq!(catalog_dir, dir.path().join(CATALOG_DIR));

        let table = load_catalog_dir(&catalog_dir).unwrap();
        assert_eq!(&table, MessageTable::builtin());
    }
}
