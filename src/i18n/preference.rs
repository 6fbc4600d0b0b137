//! Persisted language preference.
//!
//! `LanguagePreference` is the single owner of the current language. It reads
//! the stored tag once when loaded and writes it back on every change.
//! Storage failures are logged and otherwise ignored: the in-memory language
//! stays authoritative for the session.

use crate::i18n::{Language, LanguageRegistry};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Slot holding the language tag.
pub const STORAGE_KEY: &str = "site_language";

/// Durable key-value slots.
pub trait PreferenceStore {
    /// Read a slot. `Ok(None)` means the slot was never written.
    fn read(&self, key: &str) -> io::Result<Option<String>>;

    /// Overwrite a slot.
    fn write(&self, key: &str, value: &str) -> io::Result<()>;
}

/// One file per slot inside a directory.
///
/// Writes go through a temp file in the same directory and are renamed into
/// place, so a crash never leaves a half-written slot.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl PreferenceStore for FileStore {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(value) => Ok(Some(value.trim().to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;

        let mut temp_file = NamedTempFile::new_in(&self.dir)?;
        temp_file.write_all(value.as_bytes())?;
        temp_file.persist(self.slot_path(key)).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Process-local slots, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(slots.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> io::Result<()> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Current language plus the store it is persisted to.
#[derive(Debug)]
pub struct LanguagePreference<S> {
    store: S,
    current: Language,
}

impl<S: PreferenceStore> LanguagePreference<S> {
    /// Read the stored tag once. Anything but a known, enabled tag (including
    /// a read error) yields the default language.
    pub fn load(store: S) -> Self {
        let current = match store.read(STORAGE_KEY) {
            Ok(Some(code)) => Language::from_code(&code).unwrap_or_else(|e| {
                debug!("Ignoring stored language: {}", e);
                Language::canonical()
            }),
            Ok(None) => Language::canonical(),
            Err(e) => {
                warn!("Failed to read language preference: {}", e);
                Language::canonical()
            }
        };

        debug!("Language preference loaded: {}", current);
        Self { store, current }
    }

    pub fn language(&self) -> Language {
        self.current
    }

    /// Switch to the other language and persist it.
    pub fn toggle(&mut self) -> Language {
        let next = self.current.toggle();
        self.set(next);
        next
    }

    /// Switch to `language`, persisting it if it differs from the current one.
    pub fn set(&mut self, language: Language) {
        if language == self.current {
            return;
        }

        self.current = language;
        info!("Language changed to {} ({})", language.name(), language.code());

        if let Err(e) = self.store.write(STORAGE_KEY, language.code()) {
            warn!("Failed to persist language preference: {}", e);
        }
    }

    /// Display string for `key` in the current language.
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        LanguageRegistry::get().lookup(self.current, key)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
