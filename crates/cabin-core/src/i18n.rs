//! Interface languages and localized label maps

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use core::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{UiError, UiResult};

// ============================================================================
// Language
// ============================================================================

/// Interface language of the settings screen.
///
/// Serialized through its two-letter code. Parsing never fails: an unknown
/// or absent code yields [`Language::En`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Ru,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Ru];

    /// Stable string code
    pub const fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
        }
    }

    /// Parse a code case-insensitively, falling back to English
    pub fn from_code(code: Option<&str>) -> Self {
        code.and_then(|code| {
            Self::ALL
                .into_iter()
                .find(|language| language.code().eq_ignore_ascii_case(code.trim()))
        })
        .unwrap_or_default()
    }
}

impl From<&str> for Language {
    fn from(code: &str) -> Self {
        Self::from_code(Some(code))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LanguageVisitor;

        impl Visitor<'_> for LanguageVisitor {
            type Value = Language;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a language code")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Language, E> {
                Ok(Language::from_code(Some(value)))
            }

            fn visit_none<E: de::Error>(self) -> Result<Language, E> {
                Ok(Language::default())
            }

            fn visit_unit<E: de::Error>(self) -> Result<Language, E> {
                Ok(Language::default())
            }
        }

        deserializer.deserialize_any(LanguageVisitor)
    }
}

// ============================================================================
// Localized labels
// ============================================================================

/// A label with one string per language.
///
/// Maps do not have to cover every language; see [`ResolvedText`] for how a
/// missing translation is handled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Localized {
    entries: BTreeMap<Language, String>,
}

impl Localized {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Localized::insert`]
    pub fn with(mut self, language: Language, text: &str) -> Self {
        self.insert(language, text);
        self
    }

    pub fn insert(&mut self, language: Language, text: &str) {
        self.entries.insert(language, text.to_string());
    }

    pub fn get(&self, language: Language) -> Option<&str> {
        self.entries.get(&language).map(String::as_str)
    }

    /// Translation of the lowest-ordered language present
    pub fn first(&self) -> Option<&str> {
        self.entries.values().next().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Language, &str)> {
        self.entries
            .iter()
            .map(|(language, text)| (*language, text.as_str()))
    }
}

impl<const N: usize> From<[(Language, &str); N]> for Localized {
    fn from(entries: [(Language, &str); N]) -> Self {
        let mut localized = Self::new();
        for (language, text) in entries {
            localized.insert(language, text);
        }
        localized
    }
}

// ============================================================================
// Resolved text
// ============================================================================

/// The text a widget currently shows for a [`Localized`] source.
///
/// Switching to a language the source has no entry for keeps the previously
/// resolved text. Demo content ships partial translations, so this must not
/// clear the label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedText {
    text: String,
}

impl ResolvedText {
    /// Initial resolution: the requested language, else the first available
    /// translation, else `fallback`.
    pub fn initial(source: &Localized, language: Option<Language>, fallback: &str) -> Self {
        let text = language
            .and_then(|language| source.get(language))
            .or_else(|| source.first())
            .unwrap_or(fallback);
        Self {
            text: text.to_string(),
        }
    }

    /// Re-resolve for `language`. Returns `true` if the text changed.
    pub fn resolve(&mut self, source: &Localized, language: Language) -> bool {
        match source.get(language) {
            Some(text) if text != self.text => {
                self.text = text.to_string();
                true
            }
            _ => false,
        }
    }

    /// Replace the text outright. Returns `true` if it changed.
    pub fn replace(&mut self, text: &str) -> bool {
        if self.text == text {
            return false;
        }
        self.text = text.to_string();
        true
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Shared validation for tab and radio items
pub(crate) fn validate_item(value: &str, label: &Localized) -> UiResult<()> {
    if value.trim().is_empty() {
        return Err(UiError::BlankValue);
    }
    if label.is_empty() {
        return Err(UiError::EmptyLabel);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::IntoDeserializer;
    use serde::de::value::Error as ValueError;

    fn parse(code: &str) -> Language {
        let deserializer: de::value::StrDeserializer<'_, ValueError> = code.into_deserializer();
        Language::deserialize(deserializer).unwrap()
    }

    #[test]
    fn test_code_round_trip() {
        for language in Language::ALL {
            assert_eq!(Language::from_code(Some(language.code())), language);
            assert_eq!(parse(language.code()), language);
        }
    }

    #[test]
    fn test_parse_fallbacks() {
        assert_eq!(Language::from_code(None), Language::En);
        assert_eq!(Language::from_code(Some("de")), Language::En);
        assert_eq!(Language::from_code(Some("")), Language::En);
        assert_eq!(Language::from("RU"), Language::Ru);
        assert_eq!(parse("klingon"), Language::En);
    }

    #[test]
    fn test_localized_lookup() {
        let label = Localized::from([(Language::Ru, "Язык"), (Language::En, "Language")]);
        assert_eq!(label.get(Language::En), Some("Language"));
        assert_eq!(label.get(Language::Ru), Some("Язык"));
        assert_eq!(label.first(), Some("Language"));
        assert_eq!(label.len(), 2);
    }

    #[test]
    fn test_resolved_text_keeps_previous_on_missing_language() {
        let label = Localized::new().with(Language::En, "Display");
        let mut resolved = ResolvedText::initial(&label, Some(Language::En), "display");
        assert_eq!(resolved.as_str(), "Display");

        assert!(!resolved.resolve(&label, Language::Ru));
        assert_eq!(resolved.as_str(), "Display");

        let empty = Localized::new();
        assert!(!resolved.resolve(&empty, Language::En));
        assert_eq!(resolved.as_str(), "Display");
    }

    #[test]
    fn test_resolved_text_initial_fallbacks() {
        let label = Localized::new().with(Language::Ru, "Звук");
        assert_eq!(
            ResolvedText::initial(&label, Some(Language::En), "sound").as_str(),
            "Звук"
        );
        assert_eq!(
            ResolvedText::initial(&Localized::new(), None, "sound").as_str(),
            "sound"
        );
    }

    #[test]
    fn test_item_validation() {
        let label = Localized::new().with(Language::En, "On");
        assert!(validate_item("on", &label).is_ok());
        assert_eq!(validate_item("  ", &label), Err(UiError::BlankValue));
        assert_eq!(validate_item("on", &Localized::new()), Err(UiError::EmptyLabel));
    }
}
