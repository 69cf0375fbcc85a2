//! Reflector configuration
//!
//! Settings are stored as TOML and deserialized with serde. Missing keys
//! fall back to their defaults, and a missing file is created with the
//! default contents on first load.
//!
//! ```toml
//! version = 1
//! debug = false
//! cache_enabled = true
//! reserved_names = ["class", "serialVersionUID"]
//! reserved_prefix = "$"
//! ```

mod loader;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use loader::{config_path, CONFIG_ENV, CONFIG_FILE_NAME};

/// Configuration system errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read or write config file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML content
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config to TOML
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings for model building and the model store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReflectorConfig {
    /// Config version for future migration support
    pub version: u32,

    /// Enable debug logging
    pub debug: bool,

    /// Publish built models in the store instead of rebuilding per call
    pub cache_enabled: bool,

    /// Member names that never become properties
    pub reserved_names: Vec<String>,

    /// Names starting with this prefix never become properties.
    /// Empty disables the check.
    pub reserved_prefix: String,
}

impl Default for ReflectorConfig {
    fn default() -> Self {
        Self {
            version: 1,
            debug: false,
            cache_enabled: true,
            reserved_names: vec!["class".to_string(), "serialVersionUID".to_string()],
            reserved_prefix: "$".to_string(),
        }
    }
}

impl ReflectorConfig {
    /// Whether `name` may be exposed as a property
    pub fn is_valid_property_name(&self, name: &str) -> bool {
        let reserved_prefix =
            !self.reserved_prefix.is_empty() && name.starts_with(&self.reserved_prefix);
        !reserved_prefix && !self.reserved_names.iter().any(|reserved| reserved == name)
    }

    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from `path`, creating a default file if missing.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();

        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config = Self::from_toml_str(&content)?;
            tracing::debug!("Loaded reflector config from {:?}", path);
            Ok(config)
        } else {
            let default = Self::default();
            default.save(path)?;
            tracing::info!("Created default reflector config at {:?}", path);
            Ok(default)
        }
    }

    /// Save config to `path`.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::debug!("Saved reflector config to {:?}", path);
        Ok(())
    }

    /// Replace self with the current contents of `path`.
    pub fn reload(&mut self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        *self = Self::from_toml_str(&content)?;
        tracing::debug!("Reloaded reflector config from {:?}", path);
        Ok(())
    }
}
