//! Light/dark theme preference

mod storage;

pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};

use std::fmt;
use std::sync::Arc;

/// Storage key holding the preference
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Interpret a stored value. Anything other than `"dark"` is light.
    pub fn from_stored(value: &str) -> Self {
        match value {
            "dark" => Theme::Dark,
            "light" => Theme::Light,
            other => {
                tracing::debug!("Treating stored theme {:?} as light", other);
                Theme::Light
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current theme plus the store it is persisted in
pub struct ThemeService {
    store: Arc<dyn KeyValueStore>,
    theme: Theme,
}

impl ThemeService {
    /// Starts out light until [`ThemeService::initialize`] reads the store
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            theme: Theme::Light,
        }
    }

    pub fn current(&self) -> Theme {
        self.theme
    }

    /// Load the saved preference; a missing key means light
    pub fn initialize(&mut self) -> Result<Theme, StorageError> {
        self.theme = match self.store.get(THEME_KEY)? {
            Some(saved) => Theme::from_stored(&saved),
            None => Theme::Light,
        };
        Ok(self.theme)
    }

    /// Flip the theme and save it
    pub fn toggle(&mut self) -> Result<Theme, StorageError> {
        self.theme = self.theme.toggled();
        self.store.set(THEME_KEY, self.theme.as_str())?;
        tracing::info!("Theme set to {}", self.theme);
        Ok(self.theme)
    }
}
