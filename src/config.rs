//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treefs/treefs.toml`
//! 3. Local config: `./.treefs.toml` (working directory)
//! 4. Environment variables: `TREEFS_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::materialize::OnExists;
use crate::application::ApplicationError;

/// Unified configuration for treefs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Destination directory for created trees (default: current directory)
    pub dest: PathBuf,
    /// Policy for files that already exist: `skip` or `overwrite`
    pub on_exists: OnExists,
    /// Merge a single top-level folder into the destination
    pub collapse_root: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dest: PathBuf::from("."),
            on_exists: OnExists::Skip,
            collapse_root: false,
        }
    }
}

/// Raw settings for intermediate parsing.
///
/// Every field is an Option so a layer that does not mention a key
/// inherits it from the layer below instead of resetting it.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub dest: Option<PathBuf>,
    pub on_exists: Option<OnExists>,
    pub collapse_root: Option<bool>,
}

/// Get the XDG config directory for treefs.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treefs").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treefs.toml"))
}

/// Get the path to the local config file in a working directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".treefs.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge overlay config onto self (base): overlay wins if Some,
    /// otherwise keep base.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            dest: overlay.dest.clone().unwrap_or_else(|| self.dest.clone()),
            on_exists: overlay.on_exists.unwrap_or(self.on_exists),
            collapse_root: overlay.collapse_root.unwrap_or(self.collapse_root),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Directory searched for `.treefs.toml` (usually cwd)
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/treefs/treefs.toml`
    /// 3. Local config: `<local_dir>/.treefs.toml`
    /// 4. Environment variables: `TREEFS_*` prefix
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current)?;

        // Expand ~ and $VAR in path-like fields
        current.expand_paths()?;

        Ok(current)
    }

    /// Apply TREEFS_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let builder = Config::builder().add_source(Environment::with_prefix("TREEFS"));
        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("dest") {
            settings.dest = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("on_exists") {
            settings.on_exists = match val.as_str() {
                "skip" => OnExists::Skip,
                "overwrite" => OnExists::Overwrite,
                other => {
                    return Err(ApplicationError::Config {
                        message: format!(
                            "TREEFS_ON_EXISTS: expected 'skip' or 'overwrite', got {other:?}"
                        ),
                    })
                }
            };
        }
        if let Ok(val) = config.get_bool("collapse_root") {
            settings.collapse_root = val;
        }

        Ok(settings)
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) -> Result<(), ApplicationError> {
        let raw = self.dest.to_string_lossy().into_owned();
        let expanded = shellexpand::full(&raw).map_err(|e| ApplicationError::Config {
            message: format!("dest {raw:?}: {e}"),
        })?;
        self.dest = PathBuf::from(expanded.into_owned());
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# treefs configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/treefs/treefs.toml
#   Local:  ./.treefs.toml
#   Env:    TREEFS_* environment variables (explicit overrides)
#
# Keys a layer does not mention are inherited from the layer below.

# Destination directory for created trees (default: current directory)
# dest = "~/scratch"

# What to do with files that already exist: "skip" or "overwrite"
# on_exists = "skip"

# Merge a single top-level folder into the destination instead of
# creating it (tree drawings often repeat the project root)
# collapse_root = false
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
