//! Internationalization (i18n) module for the bilingual front end.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for supported languages and their dictionaries
//! - `language`: Validated language tag (`en`, `kn`) with `toggle`
//! - `strings`: Key → display string tables
//! - `preference`: Persisted current-language controller
//! - `validator`: Dictionary coverage checks
//! - `metrics`: Lookup hit/fallback/miss counters
//!
//! # Example
//!
//! ```rust,ignore
//! use crop_sahayaka::i18n::{LanguagePreference, MemoryStore};
//!
//! let mut preference = LanguagePreference::load(MemoryStore::new());
//! preference.toggle();
//! println!("{}", preference.t("get_started"));
//! ```

mod language;
mod metrics;
mod preference;
mod registry;
pub mod strings;
mod validator;

pub use language::Language;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use preference::{FileStore, LanguagePreference, MemoryStore, PreferenceStore, STORAGE_KEY};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use validator::{TranslationValidator, ValidationReport};

/// Display string for `key` in `language`, falling back to the default
/// language and then to `key` itself.
pub fn lookup(language: Language, key: &str) -> &str {
    LanguageRegistry::get().lookup(language, key)
}
