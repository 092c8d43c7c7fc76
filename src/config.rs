//! Configuration management for gen-enum
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (gen-enum.toml)
//! - Environment variables (GEN_ENUM__*)
//!
//! ## Example config file (gen-enum.toml):
//! ```toml
//! [build]
//! duplicates = "reject"
//! serializable = true
//!
//! [restore]
//! descend_into_sequences = false
//!
//! [output]
//! format = "pretty"
//!
//! [codegen]
//! derives = ["Debug", "Clone", "Copy", "PartialEq", "Eq", "Hash"]
//! serde = false
//! ```

use std::path::PathBuf;

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Per-user config file (`~/.config/gen-enum/gen-enum.toml` on Linux)
pub fn user_config_file() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "gen-enum", "gen-enum")
        .map(|dirs| dirs.config_dir().join("gen-enum.toml"))
}

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenEnumConfig {
    /// Enumeration build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Restore settings
    #[serde(default)]
    pub restore: RestoreConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Rust codegen settings
    #[serde(default)]
    pub codegen: CodegenConfig,
}

/// How repeated keys in one input are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail with `DuplicateKey`
    #[default]
    Reject,
    /// The later occurrence replaces the earlier one, keeping its position
    LastWins,
}

/// Enumeration build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Duplicate key handling
    #[serde(default)]
    pub duplicates: DuplicatePolicy,

    /// Embed predicate metadata in the wire form so enumerants can be restored
    #[serde(default = "default_true")]
    pub serializable: bool,
}

/// Restore configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestoreConfig {
    /// Also walk into arrays when looking for enumerants
    #[serde(default)]
    pub descend_into_sequences: bool,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format (pretty or compact)
    #[serde(default)]
    pub format: OutputFormat,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

/// Rust codegen configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodegenConfig {
    /// Derives on the generated enum
    #[serde(default = "default_derives")]
    pub derives: Vec<String>,

    /// Also derive serde traits, renaming variants to their keys
    #[serde(default)]
    pub serde: bool,
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_derives() -> Vec<String> {
    ["Debug", "Clone", "Copy", "PartialEq", "Eq", "Hash"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            duplicates: DuplicatePolicy::Reject,
            serializable: true,
        }
    }
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            derives: default_derives(),
            serde: false,
        }
    }
}

impl GenEnumConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["gen-enum.toml", ".gen-enum.toml", "config/gen-enum.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // XDG config directory
        if let Some(xdg_config) = user_config_file() {
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // GEN_ENUM__BUILD__SERIALIZABLE=false etc.
        builder = builder.add_source(
            Environment::with_prefix("GEN_ENUM")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}
