use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReleaseError, Result};

/// Represents the complete configuration for git-release.
///
/// Contains the version declaration file location, conventional commit
/// settings, and the tag naming pattern.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub version_file: VersionFileConfig,

    #[serde(default)]
    pub conventional_commits: ConventionalCommitsConfig,

    #[serde(default = "default_tag_format")]
    pub tag_format: String,
}

/// Location of the `KEY = "X.Y.Z"` declaration that carries the released version.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersionFileConfig {
    #[serde(default = "default_version_file_path")]
    pub path: String,

    #[serde(default = "default_version_file_key")]
    pub key: String,
}

fn default_version_file_path() -> String {
    "data/version.py".to_string()
}

fn default_version_file_key() -> String {
    "APP_VERSION".to_string()
}

impl Default for VersionFileConfig {
    fn default() -> Self {
        VersionFileConfig {
            path: default_version_file_path(),
            key: default_version_file_key(),
        }
    }
}

/// Configuration for conventional commit classification.
///
/// Defines the header types that count as a feature-level change and the
/// footer markers that signal a breaking change.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConventionalCommitsConfig {
    #[serde(default = "default_feature_types")]
    pub feature_types: Vec<String>,

    #[serde(default = "default_breaking_change_indicators")]
    pub breaking_change_indicators: Vec<String>,
}

/// Returns the default list of commit types that trigger minor version bumps.
fn default_feature_types() -> Vec<String> {
    vec!["feat".to_string(), "deprecate".to_string()]
}

/// Returns the default list of breaking change indicators.
fn default_breaking_change_indicators() -> Vec<String> {
    vec!["BREAKING CHANGE:".to_string()]
}

impl Default for ConventionalCommitsConfig {
    fn default() -> Self {
        ConventionalCommitsConfig {
            feature_types: default_feature_types(),
            breaking_change_indicators: default_breaking_change_indicators(),
        }
    }
}

fn default_tag_format() -> String {
    "v{version}".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            version_file: VersionFileConfig::default(),
            conventional_commits: ConventionalCommitsConfig::default(),
            tag_format: default_tag_format(),
        }
    }
}

impl Config {
    /// Formats the tag name for a version using the configured pattern.
    pub fn tag_name(&self, version: &crate::version::Version) -> String {
        self.tag_format.replace("{version}", &version.to_string())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitrelease.toml` in current directory
/// 3. `.gitrelease.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./gitrelease.toml").exists() {
        fs::read_to_string("./gitrelease.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".gitrelease.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config =
        toml::from_str(&config_str).map_err(|e| ReleaseError::config(e.to_string()))?;
    Ok(config)
}
