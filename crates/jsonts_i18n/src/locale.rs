use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::I18nError;

/// A supported UI language.
///
/// The set is closed: every variant must have a catalog in the message table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    /// English (primary locale).
    #[default]
    En,
    /// Simplified Chinese.
    Zh,
}

impl Language {
    /// All languages, primary first.
    pub const ALL: [Language; 2] = [Language::En, Language::Zh];

    /// The primary locale, used when nothing else is configured.
    pub const PRIMARY: Language = Language::En;

    /// Short language code (`en`, `zh`).
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    /// Human-readable name of the language, in that language.
    pub fn native_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Zh => "中文",
        }
    }

    /// Match a locale tag (`zh-CN`, `en_US`, `ZH`) against the supported set.
    ///
    /// Walks [`locale_fallback_chain`] from most to least specific.
    pub fn from_locale(tag: &str) -> Option<Language> {
        locale_fallback_chain(tag).iter().find_map(|candidate| {
            Language::ALL
                .into_iter()
                .find(|lang| candidate.eq_ignore_ascii_case(lang.code()))
        })
    }

    /// Pick a language from POSIX locale values, in priority order.
    ///
    /// Values look like `zh_CN.UTF-8` or `en_US@euro`; `C` and `POSIX` are ignored.
    /// Falls back to [`Language::PRIMARY`].
    pub fn detect<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> Language {
        values
            .into_iter()
            .flatten()
            .map(strip_posix_suffix)
            .filter(|v| !v.is_empty() && *v != "C" && *v != "POSIX")
            .find_map(Language::from_locale)
            .unwrap_or(Language::PRIMARY)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_locale(s).ok_or_else(|| I18nError::UnknownLanguage(s.to_string()))
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Normalize locale identifiers to a canonical-ish form for lookup.
///
/// - Converts `_` to `-` (POSIX reports `zh_CN`).
/// - Trims whitespace.
pub fn normalize_locale(s: &str) -> String {
    s.trim().replace('_', "-")
}

/// Create a fallback chain for language matching.
///
/// Example:
/// - `zh-Hans-CN` -> `["zh-Hans-CN", "zh-Hans", "zh"]`
/// - `en` -> `["en"]`
pub fn locale_fallback_chain(locale: &str) -> Vec<String> {
    let l = normalize_locale(locale);
    let mut chain: Vec<String> = Vec::new();

    let mut current = l.as_str();
    while !current.is_empty() {
        if !chain.iter().any(|c| c == current) {
            chain.push(current.to_string());
        }
        match current.rfind('-') {
            Some(idx) => current = &current[..idx],
            None => break,
        }
    }
    chain
}

fn strip_posix_suffix(value: &str) -> &str {
    let value = value.trim();
    let end = value.find(['.', '@']).unwrap_or(value.len());
    &value[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fallback_chain_strips_subtags() {
        assert_eq!(
            locale_fallback_chain("zh_Hans_CN"),
            vec!["zh-Hans-CN", "zh-Hans", "zh"]
        );
        assert_eq!(locale_fallback_chain(" en "), vec!["en"]);
        assert!(locale_fallback_chain("").is_empty());
    }

    #[test]
    fn from_locale_matches_region_tags() {
        assert_eq!(Language::from_locale("zh-CN"), Some(Language::Zh));
        assert_eq!(Language::from_locale("zh_TW"), Some(Language::Zh));
        assert_eq!(Language::from_locale("EN"), Some(Language::En));
        assert_eq!(Language::from_locale("en-US"), Some(Language::En));
        assert_eq!(Language::from_locale("fr-FR"), None);
        assert_eq!(Language::from_locale(""), None);
    }

    #[test]
    fn parse_rejects_unknown_language() {
        assert_eq!("zh".parse::<Language>().unwrap(), Language::Zh);
        let err = "ko-KR".parse::<Language>().unwrap_err();
        assert!(matches!(err, I18nError::UnknownLanguage(ref s) if s == "ko-KR"));
    }

    #[test]
    fn detect_uses_first_supported_posix_value() {
        assert_eq!(
            Language::detect([None, Some("zh_CN.UTF-8"), Some("en_US.UTF-8")]),
            Language::Zh
        );
        assert_eq!(Language::detect([Some("C"), Some("en_GB@euro")]), Language::En);
        assert_eq!(Language::detect([Some("de_DE.UTF-8")]), Language::En);
        assert_eq!(Language::detect([Some("fr_FR"), Some("zh_SG")]), Language::Zh);
        assert_eq!(Language::detect([]), Language::PRIMARY);
    }

    #[test]
    fn serde_uses_language_code() {
        assert_eq!(serde_json::to_string(&Language::Zh).unwrap(), "\"zh\"");
        let lang: Language = serde_json::from_str("\"zh-CN\"").unwrap();
        assert_eq!(lang, Language::Zh);
        assert!(serde_json::from_str::<Language>("\"xx\"").is_err());
    }
}
