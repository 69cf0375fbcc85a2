//! Config path resolution

use std::path::PathBuf;

/// Environment variable that overrides the config file location
pub const CONFIG_ENV: &str = "PROPMETA_CONFIG";

/// File name used when no override is set
pub const CONFIG_FILE_NAME: &str = "propmeta.toml";

/// Returns the config file path.
///
/// Uses `$PROPMETA_CONFIG` when set and non-empty, otherwise
/// `propmeta.toml` in the working directory.
pub fn config_path() -> PathBuf {
    resolve_config_path(std::env::var_os(CONFIG_ENV).map(PathBuf::from))
}

fn resolve_config_path(override_path: Option<PathBuf>) -> PathBuf {
    override_path
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}
