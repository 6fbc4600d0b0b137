//! Language type: validated language tag.
//!
//! A `Language` can only be built from a tag the registry knows and has
//! enabled, so holding one means its dictionary exists.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// Language tag (e.g., "en", "kn")
    code: &'static str,
}

impl Language {
    /// English, the default language.
    pub const ENGLISH: Language = Language { code: "en" };

    /// Kannada.
    pub const KANNADA: Language = Language { code: "kn" };

    /// Create a Language from a tag string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the tag is known and the language is enabled
    /// * `Err` if the tag is not found or the language is disabled
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Get the default language every lookup falls back to.
    pub fn canonical() -> Language {
        let config = LanguageRegistry::get().canonical();
        Language { code: config.code }
    }

    /// The other supported language.
    ///
    /// Applying it twice yields the starting language.
    pub fn toggle(self) -> Language {
        if self == Language::ENGLISH {
            Language::KANNADA
        } else {
            Language::ENGLISH
        }
    }

    /// Get the language tag.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the tag is not in the registry, which cannot happen for a
    /// Language built through `from_code` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// English name of the language.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Native name of the language.
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Check if this is the default language.
    pub fn is_canonical(&self) -> bool {
        self.config().is_canonical
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::canonical()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Language::from_code(&code).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Constant Tests ====================

    #[test]
    fn test_english_constant() {
        let english = Language::ENGLISH;
        assert_eq!(english.code(), "en");
        assert_eq!(english.name(), "English");
        assert!(english.is_canonical());
    }

    #[test]
    fn test_kannada_constant() {
        let kannada = Language::KANNADA;
        assert_eq!(kannada.code(), "kn");
        assert_eq!(kannada.name(), "Kannada");
        assert_eq!(kannada.native_name(), "ಕನ್ನಡ");
        assert!(!kannada.is_canonical());
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_valid() {
        assert_eq!(Language::from_code("en").unwrap(), Language::ENGLISH);
        assert_eq!(Language::from_code("kn").unwrap(), Language::KANNADA);
    }

    #[test]
    fn test_from_code_invalid() {
        let result = Language::from_code("es");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown"));
    }

    #[test]
    fn test_from_code_is_case_sensitive() {
        assert!(Language::from_code("KN").is_err());
        assert!(Language::from_code("").is_err());
    }

    // ==================== Toggle Tests ====================

    #[test]
    fn test_toggle_flips() {
        assert_eq!(Language::ENGLISH.toggle(), Language::KANNADA);
        assert_eq!(Language::KANNADA.toggle(), Language::ENGLISH);
    }

    #[test]
    fn test_toggle_is_involution() {
        for lang in [Language::ENGLISH, Language::KANNADA] {
            assert_eq!(lang.toggle().toggle(), lang);
        }
    }

    // ==================== Trait Tests ====================

    #[test]
    fn test_default_is_english() {
        assert_eq!(Language::default(), Language::ENGLISH);
        assert_eq!(Language::canonical(), Language::ENGLISH);
    }

    #[test]
    fn test_display_is_code() {
        assert_eq!(Language::KANNADA.to_string(), "kn");
    }

    #[test]
    fn test_serializes_as_bare_tag() {
        let json = serde_json::to_string(&Language::KANNADA).unwrap();
        assert_eq!(json, "\"kn\"");
    }

    #[test]
    fn test_deserialize_rejects_unknown_tag() {
        let parsed: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Language::ENGLISH);
        assert!(serde_json::from_str::<Language>("\"xx\"").is_err());
    }
}
