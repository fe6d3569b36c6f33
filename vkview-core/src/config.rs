//! CLI configuration management
//!
//! Loads the endpoint, API version, access token, and the ordered set of
//! menu options from a TOML file with `[API]`, `[App]`, `[MenuItems]`,
//! and `[Methods]` sections.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, VkViewError};

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the configuration file path.
pub const CONFIG_ENV_VAR: &str = "VKVIEW_CONFIG";

/// `[API]` section: endpoint and primary lookup method.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSection {
    /// API version sent as the `v` query parameter
    pub ver: String,
    /// Base request URL; method names are appended to it
    pub req_link: String,
    /// Method that resolves identifiers to profile records
    pub main_method: String,
}

/// `[App]` section: pre-obtained access token.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSection {
    pub token: String,
}

/// One configured menu entry: a display name and a remote method name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub name: String,
    pub method: String,
}

/// Application configuration, immutable once loaded.
///
/// `[MenuItems]` and `[Methods]` share keys; zipping them by key in
/// `[Methods]` declaration order yields the menu. That order defines the
/// 1-based numbering shown to the operator.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(rename = "API")]
    pub api: ApiSection,
    #[serde(rename = "App")]
    pub app: AppSection,
    #[serde(rename = "MenuItems")]
    menu_items: toml::Table,
    #[serde(rename = "Methods")]
    methods: toml::Table,
}

impl AppConfig {
    /// Load and validate the configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns a distinct error if the file is absent, and parse or
    /// validation errors otherwise. All of these are fatal at startup.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(VkViewError::MissingConfig(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Resolve the configuration path: explicit flag, then the
    /// `VKVIEW_CONFIG` environment variable, then the default file.
    pub fn resolve_path(explicit: Option<PathBuf>) -> PathBuf {
        explicit
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// The ordered menu, zipped from `[Methods]` and `[MenuItems]` by key.
    pub fn options(&self) -> Result<Vec<MenuOption>> {
        let mut options = Vec::with_capacity(self.methods.len());

        for (key, method) in &self.methods {
            let method = string_value("Methods", key, method)?;
            let name = self.menu_items.get(key).ok_or_else(|| {
                VkViewError::Config(format!("[MenuItems] has no entry for method key '{key}'"))
            })?;
            let name = string_value("MenuItems", key, name)?;

            options.push(MenuOption { name, method });
        }

        Ok(options)
    }

    fn validate(&self) -> Result<()> {
        if !self.api.req_link.starts_with("http://") && !self.api.req_link.starts_with("https://") {
            return Err(VkViewError::Config(
                "[API].req_link must start with http:// or https://".to_string(),
            ));
        }
        if self.api.ver.trim().is_empty() {
            return Err(VkViewError::Config("[API].ver must not be empty".to_string()));
        }
        if self.api.main_method.trim().is_empty() {
            return Err(VkViewError::Config(
                "[API].main_method must not be empty".to_string(),
            ));
        }
        if self.app.token.trim().is_empty() {
            return Err(VkViewError::Config("[App].token must not be empty".to_string()));
        }

        // Fail fast on key mismatches instead of at menu time
        self.options().map(|_| ())
    }
}

fn string_value(section: &str, key: &str, value: &toml::Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| VkViewError::Config(format!("[{section}].{key} must be a string")))
}
