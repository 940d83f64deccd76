use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::api::client::DEFAULT_API_BASE;
use crate::utils::url::{is_http_url, normalize_base_url};

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the tutor API, e.g. `http://localhost:5000/api`
    pub api_base: Option<String>,
    /// Language code to preselect at startup, e.g. `es`
    pub default_language: Option<String>,
}

/// Keys accepted by `parlance set` / `parlance unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    ApiBase,
    DefaultLanguage,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 2] = [ConfigKey::ApiBase, ConfigKey::DefaultLanguage];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::ApiBase => "api-base",
            ConfigKey::DefaultLanguage => "default-language",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .ok_or_else(|| {
                let known: Vec<&str> = ConfigKey::ALL.iter().map(|key| key.as_str()).collect();
                format!("Unknown config key: {value} (expected one of: {})", known.join(", "))
            })
    }
}

impl Config {
    /// Resolve the API base: CLI flag first, then config, then the built-in default.
    pub fn resolve_api_base(&self, flag: Option<&str>) -> String {
        flag.filter(|value| !value.trim().is_empty())
            .map(str::to_string)
            .or_else(|| self.api_base.clone())
            .map(|value| normalize_base_url(&value))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    }

    pub fn resolve_language(&self, flag: Option<&str>) -> Option<String> {
        flag.map(str::to_string)
            .or_else(|| self.default_language.clone())
            .map(|code| code.trim().to_ascii_lowercase())
            .filter(|code| !code.is_empty())
    }

    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<(), String> {
        let value = value.trim();
        match key {
            ConfigKey::ApiBase => {
                if !is_http_url(value) {
                    return Err(format!("api-base must be an http(s) URL, got: {value}"));
                }
                self.api_base = Some(normalize_base_url(value));
            }
            ConfigKey::DefaultLanguage => {
                if value.is_empty() {
                    return Err("default-language needs a language code".to_string());
                }
                self.default_language = Some(value.to_ascii_lowercase());
            }
        }
        Ok(())
    }

    pub fn unset(&mut self, key: ConfigKey) {
        match key {
            ConfigKey::ApiBase => self.api_base = None,
            ConfigKey::DefaultLanguage => self.default_language = None,
        }
    }
}

/// Get a user-friendly display string for a path, using `~` for the home
/// directory on Unix-like systems.
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
