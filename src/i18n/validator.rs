//! Dictionary coverage validation.
//!
//! Checks a translated dictionary against the default one: every key must
//! exist in the default dictionary, and `{placeholder}` tokens must survive
//! translation. Missing translations are only warnings since lookups fall
//! back to the default language.

use crate::i18n::strings::Dictionary;
use crate::i18n::LanguageRegistry;
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Validation report containing errors and warnings about a dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    /// Problems that break lookups or rendering
    pub errors: Vec<String>,

    /// Keys that will be served by the default language
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

/// Validator for dictionary coverage.
pub struct TranslationValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl TranslationValidator {
    /// Validate `translated` against the `default` dictionary.
    pub fn validate(default: Dictionary, translated: Dictionary) -> ValidationReport {
        let mut report = ValidationReport::new();
        let default_map: HashMap<&str, &str> = default.iter().copied().collect();
        let translated_map: HashMap<&str, &str> = translated.iter().copied().collect();

        for (key, value) in translated {
            match default_map.get(key) {
                None => report
                    .errors
                    .push(format!("Key '{}' has no default-language entry", key)),
                Some(original) => {
                    let expected = Self::extract_placeholders(original);
                    let found = Self::extract_placeholders(value);
                    if expected != found {
                        report.errors.push(format!(
                            "Placeholder mismatch for '{}': default has {:?}, translation has {:?}",
                            key, expected, found
                        ));
                    }
                }
            }
        }

        for (key, _) in default {
            if !translated_map.contains_key(key) {
                report
                    .warnings
                    .push(format!("Key '{}' is not translated", key));
            }
        }

        report
    }

    /// Validate every non-default registry language against the default one.
    pub fn validate_registry() -> Vec<(&'static str, ValidationReport)> {
        let registry = LanguageRegistry::get();
        let canonical = registry.canonical();

        registry
            .languages()
            .iter()
            .filter(|lang| !lang.is_canonical)
            .map(|lang| (lang.code, Self::validate(canonical.strings, lang.strings)))
            .collect()
    }

    /// Validate the registry and log the outcome.
    ///
    /// Returns `false` if any dictionary has errors. Untranslated keys are
    /// expected and only logged at debug level.
    pub fn check_registry() -> bool {
        let mut clean = true;

        for (code, report) in Self::validate_registry() {
            if report.has_errors() {
                clean = false;
                warn!("Dictionary errors for '{}': {:?}", code, report.errors);
            }
            if report.has_warnings() {
                debug!(
                    "{} keys in '{}' fall back to the default language",
                    report.warnings.len(),
                    code
                );
            }
        }

        clean
    }

    /// Extract all `{name}` tokens from text
    fn extract_placeholders(text: &str) -> BTreeSet<String> {
        let regex = PLACEHOLDER_REGEX
            .get_or_init(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is valid"));

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
