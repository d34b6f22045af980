//! Configuration management for manmark.
//!
//! This module provides TOML configuration file loading from
//! `~/.manmark/config.toml`.
//!
//! # Configuration File
//!
//! ```toml
//! # Command used to open a page (optional)
//! man_command = "man"
//!
//! # Pager selection flag passed to the command
//! pager_flag = "--pager=less"
//!
//! # Bookmark file location (optional)
//! bookmark_file = "/home/user/.manmark/bookmarks.toml"
//! ```
//!
//! Missing or malformed files fall back to the defaults silently; the
//! browser must come up even with a broken config.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Command used to open a page.
    pub man_command: String,
    /// Pager selection flag passed to the command.
    pub pager_flag: String,
    /// Bookmark file location.
    pub bookmark_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            man_command: "man".to_string(),
            pager_flag: "--pager=less".to_string(),
            bookmark_file: None,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                if let Ok(content) = fs::read_to_string(&path) {
                    if let Ok(config) = toml::from_str(&content) {
                        return config;
                    }
                }
            }
        }
        Self::default()
    }

    /// Where bookmarks live: the configured path, or the default next
    /// to the config file.
    pub fn bookmark_path(&self) -> PathBuf {
        if let Some(ref path) = self.bookmark_file {
            return path.clone();
        }
        config_dir()
            .map(|dir| dir.join("bookmarks.toml"))
            .unwrap_or_else(|| PathBuf::from("bookmarks.toml"))
    }

    /// Get config file path
    fn config_path() -> Option<PathBuf> {
        config_dir().map(|dir| dir.join("config.toml"))
    }
}

/// `~/.manmark`, created on demand.
pub fn config_dir() -> Option<PathBuf> {
    let home = std::env::var_os("HOME").map(PathBuf::from)?;
    let dir = home.join(".manmark");
    if !dir.exists() {
        let _ = fs::create_dir_all(&dir);
    }
    Some(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.man_command, "man");
        assert_eq!(config.pager_flag, "--pager=less");
        assert!(config.bookmark_file.is_none());
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = toml::from_str("man_command = \"mandoc\"").unwrap();
        assert_eq!(config.man_command, "mandoc");
        // Unset fields keep their defaults
        assert_eq!(config.pager_flag, "--pager=less");
    }

    #[test]
    fn test_bookmark_path_prefers_override() {
        let config = Config {
            bookmark_file: Some(PathBuf::from("/tmp/marks.toml")),
            ..Config::default()
        };
        assert_eq!(config.bookmark_path(), PathBuf::from("/tmp/marks.toml"));
    }
}
