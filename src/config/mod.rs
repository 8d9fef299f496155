//! Configuration for the yamlsift command-line tool.
//!
//! Settings are loaded from `~/.config/yamlsift/config.toml` and provide
//! defaults that command-line flags can override. A missing or malformed
//! config file silently falls back to the defaults.
//!
//! # Example
//!
//! ```
//! use yamlsift::config::Config;
//!
//! let config = Config::default();
//! assert!(!config.raw_output);
//! assert!(!config.exit_status);
//! ```

use serde::{Deserialize, Serialize};

/// Settings for the `yamlsift` binary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Print raw YAML fragments instead of decoded string forms.
    #[serde(default)]
    pub raw_output: bool,

    /// Exit with a nonzero status when a path matches nothing.
    #[serde(default)]
    pub exit_status: bool,
}

impl Config {
    /// Returns the path to the config file
    /// (`~/.config/yamlsift/config.toml`).
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("yamlsift");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file, falling back to
    /// defaults when the file is missing or unreadable.
    pub fn load() -> Self {
        let config_path = match Self::config_path() {
            Some(path) => path,
            None => return Self::default(),
        };
        if !config_path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(&config_path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.raw_output);
        assert!(!config.exit_status);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: Config = toml::from_str("raw_output = true").unwrap();
        assert!(config.raw_output);
        assert!(!config.exit_status);
    }

    #[test]
    fn test_deserialize_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert!(!config.raw_output);
    }
}
