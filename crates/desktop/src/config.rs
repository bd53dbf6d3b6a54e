//! Configuration management using config.toml

use nexus_core::{
    KeyValueStore, NexusError, Provider, Result, DEFAULT_API_BASE_URL, DEFAULT_USER_ID,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_PATH: &str = "config.toml";
const ENV_API_BASE_URL: &str = "NEXUS_API_BASE_URL";
const ENV_USER_ID: &str = "NEXUS_USER_ID";
const ENV_RETURN_URL: &str = "NEXUS_RETURN_URL";

/// Where provider logins send the browser once linking finishes
pub const DEFAULT_RETURN_URL: &str = "http://localhost:3000/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Recap backend, including the API version prefix
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_user_id")]
    pub user_id: u64,

    /// Page the provider login redirects to when it is done
    #[serde(default = "default_return_url")]
    pub return_url: String,

    /// Linked providers, synced before every recap fetch
    #[serde(default = "default_providers")]
    pub providers: Vec<Provider>,

    /// Saved UI preferences (language, theme, onboarding)
    #[serde(default)]
    pub preferences: BTreeMap<String, String>,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_user_id() -> u64 {
    DEFAULT_USER_ID
}

fn default_return_url() -> String {
    DEFAULT_RETURN_URL.to_string()
}

fn default_providers() -> Vec<Provider> {
    vec![Provider::Steam]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            user_id: default_user_id(),
            return_url: default_return_url(),
            providers: default_providers(),
            preferences: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Parse a config file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| NexusError::Config(format!("reading {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| NexusError::Config(format!("parsing {}: {}", path.display(), e)))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| NexusError::Config(e.to_string()))?;
        fs::write(path, content)
            .map_err(|e| NexusError::Config(format!("writing {}: {}", path.display(), e)))
    }

    /// Apply `NEXUS_API_BASE_URL`, `NEXUS_RETURN_URL` and `NEXUS_USER_ID`
    /// overrides
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
        if let Some(url) = lookup(ENV_RETURN_URL).filter(|v| !v.trim().is_empty()) {
            self.return_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_USER_ID) {
            match raw.trim().parse() {
                Ok(id) => self.user_id = id,
                Err(_) => tracing::warn!(value = %raw, "Ignoring invalid {}", ENV_USER_ID),
            }
        }
    }
}

/// The config file plus where it lives, writing through on every change
pub struct ConfigStore {
    path: PathBuf,
    config: Config,
}

impl ConfigStore {
    /// Load `config.toml` next to the working directory, honoring `.env` and
    /// environment overrides. Parse errors fall back to defaults.
    pub fn load() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("No .env file loaded: {}", e);
        }
        let path = PathBuf::from(CONFIG_PATH);
        let existed = path.exists();
        let mut config = Config::load_from(&path).unwrap_or_else(|e| {
            tracing::warn!("{}; using defaults", e);
            Config::default()
        });
        config.apply_overrides(|key| std::env::var(key).ok());

        let store = Self { path, config };
        if !existed {
            // First run: write the defaults so users have something to edit
            if let Err(e) = store.config.save_to(&store.path) {
                tracing::warn!("Could not create {}: {}", CONFIG_PATH, e);
            }
        }
        store
    }

    pub fn at(path: PathBuf, config: Config) -> Self {
        Self { path, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn save(&self) -> Result<()> {
        self.config.save_to(&self.path)
    }
}

impl KeyValueStore for ConfigStore {
    fn get(&self, key: &str) -> Option<String> {
        self.config.preferences.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.config
            .preferences
            .insert(key.to_string(), value.to_string());
        self.save()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.config.preferences.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexus_core::{Language, Preferences, Theme};
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api_base_url, "http://localhost:8000/api/v1");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "user_id = 42\nproviders = [\"steam\", \"riot\"]\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.user_id, 42);
        assert_eq!(config.providers, vec![Provider::Steam, Provider::Riot]);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.return_url, DEFAULT_RETURN_URL);
    }

    #[test]
    fn login_returns_to_the_app_not_the_api() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "return_url = \"https://wrap.example/home\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.return_url, "https://wrap.example/home");

        let endpoint = nexus_core::ApiEndpoint::new(&config.api_base_url);
        let url = endpoint.provider_login_url(Provider::Steam, &config.return_url);
        assert!(url.ends_with("?next=https%3A%2F%2Fwrap.example%2Fhome"), "{}", url);
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "user_id = \"not a number").unwrap();
        assert!(matches!(Config::load_from(&path), Err(NexusError::Config(_))));
    }

    #[test]
    fn env_overrides_win() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            "NEXUS_API_BASE_URL" => Some("https://wrap.example/api/v1".to_string()),
            "NEXUS_USER_ID" => Some("nope".to_string()),
            "NEXUS_RETURN_URL" => Some(" https://wrap.example/ ".to_string()),
            _ => None,
        });
        assert_eq!(config.api_base_url, "https://wrap.example/api/v1");
        assert_eq!(config.return_url, "https://wrap.example/");
        assert_eq!(config.user_id, DEFAULT_USER_ID, "invalid id is ignored");
    }

    #[test]
    fn preferences_persist_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut store = ConfigStore::at(path.clone(), Config::default());
        let prefs = Preferences {
            language: Language::It,
            theme: Theme::Light,
            onboarding_seen: true,
        };
        prefs.save(&mut store).unwrap();

        let reloaded = ConfigStore::at(path.clone(), Config::load_from(&path).unwrap());
        assert_eq!(Preferences::load(&reloaded), prefs);
    }
}
