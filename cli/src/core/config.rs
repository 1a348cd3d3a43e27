//! # Helpkit Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module implements configuration loading for helpkit: where helper files
//! live, which suffix generated names must carry, how load failures are treated,
//! and which stub file seeds new helpers.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.helpkit.toml` in current directory or ancestors
//! 2. User-specific `<config_dir>/helpkit/config.toml`
//! 3. Default values defined in the code
//!
//! Paths are tilde-expanded and the merged result is validated before use.
//!
//! ## Examples
//!
//! ```toml
//! [helpers]
//! directory = "Helpers"
//! suffix = "Helper"
//! load_policy = "fail-fast"
//! ```
//!
//! ```rust
//! let cfg = config::load_config()?;
//! let helpers_dir = cfg.helpers_dir(&app_root);
//! ```
//!
use crate::core::error::{HelpkitError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub helpers: HelpersConfig,
}

/// Settings for helper generation and loading.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HelpersConfig {
    /// Helper root, relative to the application root (can use ~).
    #[serde(default = "default_helper_dir")]
    pub directory: String,
    /// Suffix every generated leaf name must end with.
    #[serde(default = "default_suffix")]
    pub suffix: String,
    #[serde(default)]
    pub load_policy: LoadPolicy,
    /// Default author written into generated helpers.
    #[serde(default)]
    pub author: Option<String>,
    /// Custom stub replacing the built-in helper template (can use ~).
    #[serde(default)]
    pub stub: Option<String>,
}

impl Default for HelpersConfig {
    fn default() -> Self {
        Self {
            directory: default_helper_dir(),
            suffix: default_suffix(),
            load_policy: LoadPolicy::default(),
            author: None,
            stub: None,
        }
    }
}

/// What the registry does when a single helper file fails to load.
#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LoadPolicy {
    /// Skip the broken file and keep loading the rest.
    #[default]
    BestEffort,
    /// Stop at the first broken file and report it.
    FailFast,
}

fn default_helper_dir() -> String {
    "Helpers".to_string()
}
fn default_suffix() -> String {
    "Helper".to_string()
}

impl Config {
    /// Absolute helper root for the given application root.
    pub fn helpers_dir(&self, app_root: &Path) -> PathBuf {
        app_root.join(&self.helpers.directory)
    }
}

const PROJECT_CONFIG_FILENAME: &str = ".helpkit.toml";

pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config).context("Failed to expand paths in configuration")?;
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    let Some(proj_dirs) = ProjectDirs::from("com", "Helpkit", "helpkit") else {
        debug!("Could not determine user config directory.");
        return Ok(None);
    };
    let config_path = proj_dirs.config_dir().join("config.toml");
    if config_path.exists() {
        info!("Loading user configuration from: {}", config_path.display());
        load_config_from_path(&config_path).map(Some)
    } else {
        debug!(
            "User configuration file not found at {}",
            config_path.display()
        );
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    match find_project_config_path(&current_dir) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            load_config_from_path(&path).map(Some)
        }
        None => {
            debug!("No project configuration file (.helpkit.toml) found in current directory or ancestors.");
            Ok(None)
        }
    }
}

/// Walks up from `start` looking for `.helpkit.toml`, stopping at a repository root.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project values win over user values whenever they differ from the defaults.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let Some(project) = project else {
        return user;
    };
    let (user, project) = (user.helpers, project.helpers);
    let defaults = HelpersConfig::default();
    Config {
        helpers: HelpersConfig {
            directory: if project.directory != defaults.directory {
                project.directory
            } else {
                user.directory
            },
            suffix: if project.suffix != defaults.suffix {
                project.suffix
            } else {
                user.suffix
            },
            load_policy: if project.load_policy != defaults.load_policy {
                project.load_policy
            } else {
                user.load_policy
            },
            author: project.author.or(user.author),
            stub: project.stub.or(user.stub),
        },
    }
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    config.helpers.directory = shellexpand::tilde(&config.helpers.directory).into_owned();
    debug!("Expanded helper directory: {}", config.helpers.directory);
    if let Some(stub) = config.helpers.stub.as_mut() {
        *stub = shellexpand::tilde(stub).into_owned();
        debug!("Expanded stub path: {}", stub);
    }
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    let helpers = &config.helpers;
    if helpers.directory.trim().is_empty() {
        return Err(anyhow!(HelpkitError::Config(
            "Helper directory cannot be empty.".to_string()
        )));
    }
    if helpers.suffix.is_empty() || !helpers.suffix.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(anyhow!(HelpkitError::Config(format!(
            "Invalid helper suffix '{}'. Only letters and digits are allowed.",
            helpers.suffix
        ))));
    }
    if let Some(stub) = &helpers.stub {
        if !Path::new(stub).is_file() {
            return Err(anyhow!(HelpkitError::Config(format!(
                "Configured stub '{}' does not exist or is not a file.",
                stub
            ))));
        }
    }
    Ok(())
}
