//! # Preferences Store
//!
//! Two keys survive between sessions, stored as a flat JSON object:
//!
//! ```json
//! { "theme": "crimson", "user Role": "HEADQUARTERS" }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

pub const THEME_KEY: &str = "theme";
pub const ROLE_KEY: &str = "user Role";

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("failed to read preferences from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write preferences to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("preferences file {path} is not a JSON object: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Visual theme, cycled in declaration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    Crimson,
    Nebula,
    Gold,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Dark,
        Theme::Light,
        Theme::Crimson,
        Theme::Nebula,
        Theme::Gold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Crimson => "crimson",
            Self::Nebula => "nebula",
            Self::Gold => "gold",
        }
    }

    /// Unknown identifiers fall back to the default theme.
    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str() == key)
            .unwrap_or_default()
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access level granted by the login screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Headquarters,
    FieldAgent,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Headquarters => "HEADQUARTERS",
            Self::FieldAgent => "FIELD_AGENT",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "HEADQUARTERS" => Some(Self::Headquarters),
            "FIELD_AGENT" => Some(Self::FieldAgent),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File-backed key/value store. Every mutation is written through.
pub struct PreferencesStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl PreferencesStore {
    /// Open the store, starting empty when the file does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PreferencesError> {
        let path = path.as_ref().to_path_buf();

        let values = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|source| PreferencesError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No preferences file yet");
                BTreeMap::new()
            }
            Err(source) => return Err(PreferencesError::Read { path, source }),
        };

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), PreferencesError> {
        self.values.insert(key.to_string(), value.to_string());
        self.persist()
    }

    pub fn remove(&mut self, key: &str) -> Result<(), PreferencesError> {
        if self.values.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    pub fn theme(&self) -> Theme {
        match self.get(THEME_KEY) {
            Some(key) => {
                let theme = Theme::from_key(key);
                if theme.as_str() != key {
                    warn!(stored = key, "Unknown theme, falling back to {}", theme);
                }
                theme
            }
            None => Theme::default(),
        }
    }

    /// Advance to the next theme and persist it.
    pub fn cycle_theme(&mut self) -> Result<Theme, PreferencesError> {
        let next = self.theme().next();
        self.set(THEME_KEY, next.as_str())?;
        Ok(next)
    }

    pub fn role(&self) -> Option<UserRole> {
        self.get(ROLE_KEY).and_then(UserRole::from_key)
    }

    pub fn set_role(&mut self, role: UserRole) -> Result<(), PreferencesError> {
        self.set(ROLE_KEY, role.as_str())
    }

    pub fn clear_role(&mut self) -> Result<(), PreferencesError> {
        self.remove(ROLE_KEY)
    }

    fn persist(&self) -> Result<(), PreferencesError> {
        let text = serde_json::to_string_pretty(&self.values)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| PreferencesError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        fs::write(&self.path, text).map_err(|source| PreferencesError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
