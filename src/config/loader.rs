//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::Config;

pub const CONFIG_FILENAME: &str = "storefront.toml";

/// Load configuration.
///
/// An explicit path must exist. Otherwise `storefront.toml` is searched for
/// upward from the current directory, and the defaults apply when none is found.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config_from_path(path);
    }

    match find_config_file()? {
        Some(path) => load_config_from_path(&path),
        None => {
            debug!("No {} found, using defaults", CONFIG_FILENAME);
            Ok(Config::default())
        }
    }
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;
    let content = interpolate_env_vars(&content);
    let mut config: Config = toml::from_str(&content)?;

    // Relative storage paths are anchored at the config file, not the cwd
    if config.storage.path.is_relative() {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            config.storage.path = dir.join(&config.storage.path);
        }
    }

    debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Find the configuration file, searching upward from current directory
fn find_config_file() -> Result<Option<PathBuf>> {
    let mut current = env::current_dir().map_err(|e| Error::Config(e.to_string()))?;

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Ok(Some(config_path));
        }

        if !current.pop() {
            return Ok(None);
        }
    }
}

/// Interpolate environment variables in the format ${VAR_NAME} or ${VAR_NAME:-default}
fn interpolate_env_vars(content: &str) -> String {
    // This regex is a compile-time constant, panicking is acceptable here
    // as it indicates a programming error in the codebase, not a runtime issue
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("Invalid regex pattern - this is a bug in the codebase");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        env::var(var_name).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r#"# Storefront Configuration

[api]
# Every endpoint (/auth/login, /products, ...) is appended to this URL
base_url = "${STOREFRONT_API_URL:-http://localhost:3000/api}"

[storage]
# Where the signed-in token and role are persisted between runs.
# Relative paths are resolved next to this file.
path = ".storefront/session.json"

[display]
currency = "LKR"
"#
}
