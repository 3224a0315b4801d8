use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::catalog::MessageTree;
use crate::locale::Language;
use crate::I18nError;

static BUILTIN: OnceLock<Arc<MessageTable>> = OnceLock::new();

const BUILTIN_SOURCES: [(Language, &str); 2] = [
    (
        Language::En,
        include_str!("../../../resource/i18n/en.yaml"),
    ),
    (
        Language::Zh,
        include_str!("../../../resource/i18n/zh.yaml"),
    ),
];

/// One [`MessageTree`] per [`Language`], all sharing the same set of leaf paths.
///
/// Tables are immutable once built; share them between resolvers with `Arc`.
#[derive(Clone, Debug, PartialEq)]
pub struct MessageTable {
    trees: BTreeMap<Language, MessageTree>,
}

impl MessageTable {
    /// The embedded English/Chinese UI catalogs.
    pub fn builtin() -> &'static MessageTable {
        Self::builtin_arc()
    }

    /// Shared handle to [`MessageTable::builtin`], for handing to resolvers.
    pub fn shared_builtin() -> Arc<MessageTable> {
        Arc::clone(Self::builtin_arc())
    }

    fn builtin_arc() -> &'static Arc<MessageTable> {
        BUILTIN.get_or_init(|| {
            Arc::new(
                MessageTable::from_sources(BUILTIN_SOURCES)
                    .expect("embedded catalogs are valid and share one schema"),
            )
        })
    }

    /// Raw YAML of the embedded catalog for `lang`.
    pub fn builtin_source(lang: Language) -> &'static str {
        BUILTIN_SOURCES
            .iter()
            .find(|(l, _)| *l == lang)
            .map(|(_, src)| *src)
            .unwrap_or_default()
    }

    /// Parse one YAML catalog per language and check schema parity.
    pub fn from_sources<'a>(
        sources: impl IntoIterator<Item = (Language, &'a str)>,
    ) -> Result<Self, I18nError> {
        let mut trees = BTreeMap::new();
        for (lang, src) in sources {
            let tree = MessageTree::parse_yaml(src).map_err(|source| I18nError::Catalog {
                language: lang,
                source,
            })?;
            trees.insert(lang, tree);
        }
        Self::from_trees(trees)
    }

    /// Build a table from already-constructed trees.
    ///
    /// Every [`Language`] must be present, and every leaf path of the primary
    /// language must exist in every other language and vice versa.
    pub fn from_trees(trees: BTreeMap<Language, MessageTree>) -> Result<Self, I18nError> {
        if let Some(missing) = Language::ALL.into_iter().find(|l| !trees.contains_key(l)) {
            return Err(I18nError::MissingCatalog(missing));
        }

        let table = Self { trees };
        table.check_parity()?;
        debug!(
            languages = table.trees.len(),
            keys = table.tree(Language::PRIMARY).leaf_paths().len(),
            "message table loaded"
        );
        Ok(table)
    }

    /// Compare every language's leaf paths against the primary language.
    ///
    /// Groups only exist to hold leaves (parsing rejects empty ones), so equal
    /// leaf paths mean equal shape.
    pub fn check_parity(&self) -> Result<(), I18nError> {
        let reference: BTreeSet<String> = self
            .tree(Language::PRIMARY)
            .leaf_paths()
            .into_iter()
            .collect();

        for (&lang, tree) in &self.trees {
            if lang == Language::PRIMARY {
                continue;
            }
            let paths: BTreeSet<String> = tree.leaf_paths().into_iter().collect();
            if paths != reference {
                return Err(I18nError::SchemaMismatch {
                    language: lang,
                    missing: reference.difference(&paths).cloned().collect(),
                    extra: paths.difference(&reference).cloned().collect(),
                });
            }
        }
        Ok(())
    }

    /// The catalog for `lang`.
    pub fn tree(&self, lang: Language) -> &MessageTree {
        // `from_trees` guarantees every language is present.
        &self.trees[&lang]
    }

    /// Resolve `path` in the catalog for `lang`.
    pub fn lookup(&self, lang: Language, path: &str) -> Option<&str> {
        self.tree(lang).lookup(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_table_has_every_language() {
        let table = MessageTable::builtin();
        for lang in Language::ALL {
            assert!(!table.tree(lang).is_empty(), "{lang} catalog is empty");
        }
        assert_eq!(table.lookup(Language::En, "toolbar.reset"), Some("Reset"));
        assert_eq!(table.lookup(Language::Zh, "toolbar.reset"), Some("重置"));
    }

    #[test]
    fn builtin_table_is_shared() {
        assert!(std::ptr::eq(MessageTable::builtin(), MessageTable::builtin()));
        assert!(Arc::ptr_eq(
            &MessageTable::shared_builtin(),
            &MessageTable::shared_builtin()
        ));
        assert!(std::ptr::eq(
            MessageTable::builtin(),
            Arc::as_ptr(&MessageTable::shared_builtin())
        ));
    }

    #[test]
    fn builtin_sources_parse_on_their_own() {
        for lang in Language::ALL {
            let tree = MessageTree::parse_yaml(MessageTable::builtin_source(lang)).unwrap();
            assert_eq!(&tree, MessageTable::builtin().tree(lang));
        }
    }

    #[test]
    fn missing_language_is_rejected() {
        let err = MessageTable::from_sources([(Language::En, "a: \"b\"\n")]).unwrap_err();
        assert!(matches!(err, I18nError::MissingCatalog(Language::Zh)));
    }

    #[test]
    fn parity_mismatch_names_paths() {
        let err = MessageTable::from_sources([
            (Language::En, "toolbar:\n  reset: Reset\n  format: Format\n"),
            (Language::Zh, "toolbar:\n  reset: 重置\n  indent: 缩进\n"),
        ])
        .unwrap_err();

        match err {
            I18nError::SchemaMismatch {
                language,
                missing,
                extra,
            } => {
                assert_eq!(language, Language::Zh);
                assert_eq!(missing, vec!["toolbar.format".to_string()]);
                assert_eq!(extra, vec!["toolbar.indent".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parity_requires_same_depth() {
        // `editor.error` is a leaf in one tree and a group in the other.
        let err = MessageTable::from_sources([
            (Language::En, "editor:\n  error: Error\n"),
            (Language::Zh, "editor:\n  error:\n    emptyInput: 空\n"),
        ])
        .unwrap_err();
        assert!(matches!(err, I18nError::SchemaMismatch { .. }));
    }

    #[test]
    fn empty_group_in_one_language_is_rejected() {
        let err = MessageTable::from_sources([
            (Language::En, "toolbar:\n  reset: Reset\neditor: {}\n"),
            (Language::Zh, "toolbar:\n  reset: 重置\n"),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            I18nError::Catalog {
                language: Language::En,
                ..
            }
        ));
    }

    #[test]
    fn catalog_errors_carry_language() {
        let err = MessageTable::from_sources([
            (Language::En, "a: \"b\"\n"),
            (Language::Zh, "a: 1\n"),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            I18nError::Catalog {
                language: Language::Zh,
                ..
            }
        ));
        assert!(err.to_string().contains("zh"));
    }
}
