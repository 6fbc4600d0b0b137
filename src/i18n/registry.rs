//! Bilingual dictionaries and the languages they belong to.
//!
//! The registry is built once, on first use, and is read-only afterwards.
//! Every display string the client shows goes through [`LanguageRegistry::lookup`].

use crate::i18n::strings::{Dictionary, ENGLISH_STRINGS, KANNADA_STRINGS};
use crate::i18n::{Language, TranslationMetrics};
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

/// One supported language and its dictionary.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// Tag persisted in the preference slot and sent to the service ("en", "kn")
    pub code: &'static str,

    pub name: &'static str,

    /// Name shown in the language switch (e.g., "ಕನ್ನಡ")
    pub native_name: &'static str,

    /// The language missing keys resolve through. Exactly one per registry.
    pub is_canonical: bool,

    pub enabled: bool,

    pub strings: Dictionary,
}

pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
    /// Language tag → (key → display string)
    dictionaries: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry::new(supported_languages()))
    }

    fn new(languages: Vec<LanguageConfig>) -> Self {
        let dictionaries = languages
            .iter()
            .map(|lang| (lang.code, lang.strings.iter().copied().collect()))
            .collect();

        Self {
            languages,
            dictionaries,
        }
    }

    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Languages in switch order, disabled ones included.
    pub fn languages(&self) -> &[LanguageConfig] {
        &self.languages
    }

    /// The fallback language.
    ///
    /// # Panics
    /// If `supported_languages` marks zero or several languages canonical.
    pub fn canonical(&self) -> &LanguageConfig {
        let mut canonical = self.languages.iter().filter(|lang| lang.is_canonical);
        match (canonical.next(), canonical.next()) {
            (Some(lang), None) => lang,
            (None, _) => panic!("registry has no canonical language"),
            (Some(_), Some(_)) => panic!("registry has more than one canonical language"),
        }
    }

    /// Look up the display string for `key` in `language`.
    ///
    /// Resolution order: the language's own dictionary, then the default
    /// language's dictionary, then `key` itself. Never fails.
    pub fn lookup<'a>(&self, language: Language, key: &'a str) -> &'a str {
        let metrics = TranslationMetrics::global();

        if let Some(value) = self.entry(language.code(), key) {
            metrics.record_hit();
            return value;
        }

        let canonical = self.canonical().code;
        if let Some(value) = self.entry(canonical, key) {
            if canonical != language.code() {
                debug!("'{}' missing in {}, using {}", key, language.code(), canonical);
            }
            metrics.record_fallback();
            return value;
        }

        debug!("'{}' missing in every dictionary", key);
        metrics.record_miss();
        key
    }

    /// Raw dictionary entry, without fallback.
    pub fn entry(&self, code: &str, key: &str) -> Option<&'static str> {
        self.dictionaries
            .get(code)
            .and_then(|dictionary| dictionary.get(key))
            .copied()
    }
}

/// English first: it is the default and the fallback.
fn supported_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_canonical: true,
            enabled: true,
            strings: ENGLISH_STRINGS,
        },
        LanguageConfig {
            code: "kn",
            name: "Kannada",
            native_name: "ಕನ್ನಡ",
            is_canonical: false,
            enabled: true,
            strings: KANNADA_STRINGS,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_is_shared() {
        assert!(std::ptr::eq(LanguageRegistry::get(), LanguageRegistry::get()));
    }

    #[test]
    fn test_english_is_canonical() {
        let registry = LanguageRegistry::get();
        assert_eq!(registry.canonical().code, "en");
        assert_eq!(registry.get_by_code("en").unwrap().native_name, "English");
    }

    #[test]
    fn test_kannada_metadata() {
        let kannada = LanguageRegistry::get().get_by_code("kn").unwrap();
        assert_eq!(kannada.name, "Kannada");
        assert_eq!(kannada.native_name, "ಕನ್ನಡ");
        assert!(kannada.enabled);
        assert!(!kannada.is_canonical);
    }

    #[test]
    fn test_unknown_tag() {
        assert!(LanguageRegistry::get().get_by_code("es").is_none());
    }

    #[test]
    fn test_languages_in_switch_order() {
        let codes: Vec<_> = LanguageRegistry::get()
            .languages()
            .iter()
            .map(|lang| lang.code)
            .collect();
        assert_eq!(codes, ["en", "kn"]);
    }

    #[test]
    #[should_panic(expected = "more than one canonical")]
    fn test_two_canonical_languages_panic() {
        let mut languages = supported_languages();
        languages[1].is_canonical = true;
        LanguageRegistry::new(languages).canonical();
    }

    // ==================== Lookup Tests ====================

    #[test]
    fn test_lookup_exact_match() {
        let registry = LanguageRegistry::get();
        assert_eq!(registry.lookup(Language::ENGLISH, "home_label"), "Home");
        assert_eq!(registry.lookup(Language::KANNADA, "home_label"), "ಮುಖಪುಟ");
    }

    #[test]
    fn test_lookup_falls_back_to_english() {
        let registry = LanguageRegistry::get();
        assert!(registry.entry("kn", "chat_thinking").is_none());
        assert_eq!(registry.lookup(Language::KANNADA, "chat_thinking"), "Thinking...");
    }

    #[test]
    fn test_lookup_unknown_key_returns_key() {
        let registry = LanguageRegistry::get();
        assert_eq!(registry.lookup(Language::ENGLISH, "no_such_key"), "no_such_key");
        assert_eq!(registry.lookup(Language::KANNADA, "no_such_key"), "no_such_key");
    }

    #[test]
    fn test_lookup_empty_key_returns_empty() {
        assert_eq!(LanguageRegistry::get().lookup(Language::KANNADA, ""), "");
    }

    #[test]
    fn test_entry_does_not_fall_back() {
        let registry = LanguageRegistry::get();
        assert_eq!(registry.entry("en", "chat_thinking"), Some("Thinking..."));
        assert_eq!(registry.entry("kn", "chat_thinking"), None);
        assert_eq!(registry.entry("fr", "home_label"), None);
    }
}
