//! User preferences and the storage seam behind them
//!
//! Preferences are an explicit object handed to whoever needs them. Platforms
//! persist them through `KeyValueStore`: a TOML table on desktop, localStorage
//! in the browser, a `HashMap` in tests.

use std::collections::HashMap;

use crate::error::Result;
use crate::i18n::{Language, Translator};

pub const LANGUAGE_KEY: &str = "nexus-language";
pub const THEME_KEY: &str = "nexus-theme";
pub const ONBOARDING_KEY: &str = "nexus-onboarding-seen";

/// String storage by key
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store, used by tests and as a fallback when no backing storage
/// is reachable
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn from_name(value: &str) -> Option<Self> {
        match value.trim() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub language: Language,
    pub theme: Theme,
    pub onboarding_seen: bool,
}

impl Preferences {
    /// Read preferences, falling back to defaults for absent or unknown values
    pub fn load(store: &impl KeyValueStore) -> Self {
        Self {
            language: store
                .get(LANGUAGE_KEY)
                .and_then(|v| Language::from_code(&v))
                .unwrap_or_default(),
            theme: store
                .get(THEME_KEY)
                .and_then(|v| Theme::from_name(&v))
                .unwrap_or_default(),
            onboarding_seen: store.get(ONBOARDING_KEY).as_deref() == Some("true"),
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<()> {
        store.set(LANGUAGE_KEY, self.language.code())?;
        store.set(THEME_KEY, self.theme.as_str())?;
        store.set(ONBOARDING_KEY, if self.onboarding_seen { "true" } else { "false" })?;
        Ok(())
    }

    pub fn translator(&self) -> Translator {
        Translator::new(self.language)
    }
}
