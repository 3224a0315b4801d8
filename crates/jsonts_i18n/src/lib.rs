//! jsonts internationalization (i18n)
//!
//! Goals:
//! - A closed [`Language`] set with an English primary locale
//! - Nested YAML message catalogs, looked up by dotted key paths
//!   (`editor.error.emptyInput`), with every language sharing one schema
//! - An owned, observable resolver ([`I18n`]) instead of a global singleton
//!
//! Unresolved keys never fail: [`I18n::t`] returns the key itself.

mod catalog;
mod error;
mod label;
mod locale;
mod state;
mod table;

pub use catalog::{CatalogError, MessageNode, MessageTree, PATH_SEPARATOR};
pub use error::I18nError;
pub use label::Label;
pub use locale::{locale_fallback_chain, normalize_locale, Language};
pub use state::{I18n, SubscriptionId};
pub use table::MessageTable;

/// Convenience macro for building a translatable [`Label`] from a key path.
///
/// Examples:
/// - `t!("toolbar.reset")`
/// - `t!("editor", "error", "emptyInput")`
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::Label::key($key)
    };
    ($head:literal $(, $seg:literal)+ $(,)?) => {
        $crate::Label::key(concat!($head $(, ".", $seg)+))
    };
}
