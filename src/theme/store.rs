//! Preference persistence
//!
//! A tiny key-value store for user preferences. The only key in use is
//! `theme`. Absence of a key is `Ok(None)`; an `Err` means the store itself
//! could not be used, and callers degrade to in-memory behaviour.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key under which the dark/light choice is stored
pub const THEME_KEY: &str = "theme";

/// File name of the preference store inside the config directory
pub const PREFERENCES_FILE: &str = "preferences.toml";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[allow(dead_code)] // Only the in-memory store reports this
    #[error("preference store unavailable")]
    Unavailable,
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed preferences file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to encode preferences: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Key-value persistence for preferences
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// File-backed store
// ─────────────────────────────────────────────────────────────────────────────

type PreferencesFile = BTreeMap<String, String>;

/// Preferences in a TOML file, e.g. `~/.config/apidocs/preferences.toml`
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<dir>/preferences.toml`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(PREFERENCES_FILE))
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<PreferencesFile, PreferenceError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => toml::from_str(&contents).map_err(|source| PreferenceError::Parse {
                path: self.path.clone(),
                source,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(PreferencesFile::default()),
            Err(source) => Err(PreferenceError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.read()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        // A corrupt file is replaced rather than blocking every future write
        let mut file = self.read().unwrap_or_default();
        file.insert(key.to_string(), value.to_string());

        let io_err = |source| PreferenceError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(&self.path, toml::to_string(&file)?).map_err(io_err)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory store
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::{Arc, Mutex, PoisonError};

/// Shared in-memory store; clones see the same values
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct MemoryPreferenceStore {
    values: Arc<Mutex<HashMap<String, String>>>,
    available: bool,
}

#[cfg(test)]
impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self {
            values: Arc::default(),
            available: true,
        }
    }

    /// A store whose every operation fails with [`PreferenceError::Unavailable`]
    pub fn unavailable() -> Self {
        Self {
            values: Arc::default(),
            available: false,
        }
    }

    fn values(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
impl Default for MemoryPreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        if !self.available {
            return Err(PreferenceError::Unavailable);
        }
        Ok(self.values().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        if !self.available {
            return Err(PreferenceError::Unavailable);
        }
        self.values().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
