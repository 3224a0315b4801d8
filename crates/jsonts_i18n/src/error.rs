use thiserror::Error;

use crate::catalog::CatalogError;
use crate::locale::Language;

#[derive(Debug, Error)]
pub enum I18nError {
    #[error("{language} catalog: {source}")]
    Catalog {
        language: Language,
        #[source]
        source: CatalogError,
    },

    #[error("no catalog for language `{0}`")]
    MissingCatalog(Language),

    #[error("{language} catalog does not match the primary schema (missing: {missing:?}, extra: {extra:?})")]
    SchemaMismatch {
        language: Language,
        missing: Vec<String>,
        extra: Vec<String>,
    },

    #[error("unknown language `{0}`")]
    UnknownLanguage(String),
}
