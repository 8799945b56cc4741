//! Configuration data structures for cst-lens.
//!
//! Every field has a default, so an empty YAML document (or no file at all)
//! yields a working configuration.

use serde::{Deserialize, Serialize};

use crate::error::{AnalyzerError, Result};
use crate::render::{GraphStyle, NodeStyle};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub limits: LimitsConfig,

    #[serde(default)]
    pub commentary: CommentaryConfig,
}

impl AnalyzerConfig {
    /// Check values serde cannot reject on its own.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("render.named.fill", &self.render.named.fill),
            ("render.named.border", &self.render.named.border),
            ("render.anonymous.fill", &self.render.anonymous.fill),
            ("render.anonymous.border", &self.render.anonymous.border),
            ("render.graph_name", &self.render.graph_name),
        ] {
            if value.trim().is_empty() {
                return Err(AnalyzerError::Config(format!("{name} must not be empty")));
            }
        }
        if self.commentary.timeout_secs == 0 {
            return Err(AnalyzerError::Config(
                "commentary.timeout_secs must be greater than zero".into(),
            ));
        }
        if self.commentary.model.trim().is_empty() {
            return Err(AnalyzerError::Config("commentary.model must not be empty".into()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// RenderConfig
// ---------------------------------------------------------------------------

/// Graph rendering defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Depth cap for the rendered graph (root = 0).
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default = "default_graph_name")]
    pub graph_name: String,

    /// Graphviz `rankdir` (TB, LR, BT, RL).
    #[serde(default = "default_rankdir")]
    pub rankdir: String,

    #[serde(default = "default_font")]
    pub font: String,

    #[serde(default = "default_named_style")]
    pub named: NodeStyle,

    #[serde(default = "default_anonymous_style")]
    pub anonymous: NodeStyle,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            graph_name: default_graph_name(),
            rankdir: default_rankdir(),
            font: default_font(),
            named: default_named_style(),
            anonymous: default_anonymous_style(),
        }
    }
}

impl RenderConfig {
    pub fn style(&self) -> GraphStyle {
        GraphStyle {
            graph_name: self.graph_name.clone(),
            rankdir: self.rankdir.clone(),
            font: self.font.clone(),
            named: self.named.clone(),
            anonymous: self.anonymous.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// LimitsConfig
// ---------------------------------------------------------------------------

/// Hard ceilings applied before any work is done.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Largest accepted source in bytes. `0` disables the check.
    #[serde(default = "default_max_source_bytes")]
    pub max_source_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_source_bytes: default_max_source_bytes(),
        }
    }
}

// ---------------------------------------------------------------------------
// CommentaryConfig
// ---------------------------------------------------------------------------

/// Settings for the optional language-model commentary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentaryConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the API key. The key itself is never
    /// read from the config file.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How many top-level kinds the digest lists.
    #[serde(default = "default_top_level_limit")]
    pub top_level_limit: usize,

    /// Mask credential-looking strings in the source before sending it.
    #[serde(default = "default_true")]
    pub redact_secrets: bool,
}

impl Default for CommentaryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            model: default_model(),
            api_key_env: default_api_key_env(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            top_level_limit: default_top_level_limit(),
            redact_secrets: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_max_depth() -> usize {
    8
}

fn default_graph_name() -> String {
    "AST".to_string()
}

fn default_rankdir() -> String {
    "TB".to_string()
}

fn default_font() -> String {
    "Arial".to_string()
}

fn default_named_style() -> NodeStyle {
    GraphStyle::default().named
}

fn default_anonymous_style() -> NodeStyle {
    GraphStyle::default().anonymous
}

fn default_max_source_bytes() -> usize {
    2 * 1024 * 1024
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_top_level_limit() -> usize {
    crate::summary::DIGEST_TOP_LEVEL_LIMIT
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
