//! Error types for cst-lens.
//!
//! Every fallible operation in the crate returns [`Result`]. The variants
//! line up with what the presentation layer needs to tell apart: a grammar
//! that could not be loaded is permanent for the process, an unsupported
//! language never touches the registry, and a commentary failure is always
//! recoverable and never blocks the rest of an analysis.

use thiserror::Error;

/// Result type for cst-lens operations.
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The requested language identifier has no registered grammar.
    #[error("unsupported language: {language}")]
    UnsupportedLanguage { language: String },

    /// The grammar for a language could not be loaded. Cached for the
    /// lifetime of the registry; a restart is required to retry.
    #[error("parser unavailable for {language}: {message}")]
    ParserUnavailable { language: String, message: String },

    /// Internal failure while running the parser (not a syntax error in the
    /// user's code; those show up as `ERROR` nodes in the tree).
    #[error("parse error: {0}")]
    Parse(String),

    /// A requested view could not be produced. Graph rendering and
    /// summarization are total; only the full-tree export has a depth limit.
    #[error("rendering error: {0}")]
    Rendering(String),

    /// The external commentary service failed.
    #[error("commentary error: {0}")]
    Commentary(String),

    /// Input rejected by the configured size ceiling.
    #[error("source is {size} bytes, exceeding the limit of {limit} bytes")]
    SourceTooLarge { size: usize, limit: usize },

    /// Invalid configuration or request.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalyzerError {
    /// Stable tag for the error category, suitable for display or logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedLanguage { .. } => "unsupported_language",
            Self::ParserUnavailable { .. } => "parser_unavailable",
            Self::Parse(_) => "parse_failure",
            Self::Rendering(_) => "rendering_error",
            Self::Commentary(_) => "commentary_failure",
            Self::SourceTooLarge { .. } => "source_too_large",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Yaml(_) => "yaml",
            Self::Json(_) => "json",
        }
    }

    /// Whether the same request could succeed later without a restart.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::ParserUnavailable { .. })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
