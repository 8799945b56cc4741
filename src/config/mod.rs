//! Configuration loading.
//!
//! Sources, lowest priority first: built-in defaults, the YAML file, then
//! `CST_LENS_*` environment variables. The file is taken from an explicit
//! path when given, otherwise from the platform config directory
//! (`~/.config/cst-lens/config.yaml` on Linux) if it exists.

pub mod schema;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{AnalyzerError, Result};

pub use schema::{AnalyzerConfig, CommentaryConfig, LimitsConfig, RenderConfig};

/// Overrides `render.max_depth`.
pub const ENV_MAX_DEPTH: &str = "CST_LENS_MAX_DEPTH";
/// Overrides `limits.max_source_bytes`.
pub const ENV_MAX_SOURCE_BYTES: &str = "CST_LENS_MAX_SOURCE_BYTES";

/// Default location of the config file, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "cst-lens").map(|dirs| dirs.config_dir().join("config.yaml"))
}

impl AnalyzerConfig {
    /// Load, apply environment overrides, and validate.
    ///
    /// An explicit `path` must exist; the default path is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => match default_config_path() {
                Some(p) if p.is_file() => Self::from_file(&p)?,
                _ => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&text)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Apply overrides from `lookup` (normally the process environment).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_MAX_DEPTH) {
            self.render.max_depth = parse_usize(ENV_MAX_DEPTH, &value)?;
        }
        if let Some(value) = lookup(ENV_MAX_SOURCE_BYTES) {
            self.limits.max_source_bytes = parse_usize(ENV_MAX_SOURCE_BYTES, &value)?;
        }
        Ok(())
    }
}

fn parse_usize(key: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| AnalyzerError::Config(format!("{key}: expected a non-negative integer, got {value:?}")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
