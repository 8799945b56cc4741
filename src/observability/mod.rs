//! Structured logging and output hygiene.
//!
//! - [`init_logging`]: one-time `tracing` setup with `RUST_LOG` support
//! - [`redact_secrets`]: mask credential-looking strings before source text
//!   leaves the process

use std::sync::LazyLock;

use regex::Regex;
use tracing_subscriber::EnvFilter;

/// Initialize structured logging with `RUST_LOG` environment variable support.
///
/// Defaults to `cst_lens=info` when `RUST_LOG` is not set. Logs go to stderr
/// so that rendered output on stdout stays clean. Later calls are ignored.
pub fn init_logging() {
    init_logging_with("cst_lens=info");
}

/// Like [`init_logging`] with an explicit fallback filter.
pub fn init_logging_with(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // try_init so double-init in tests doesn't panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

static SECRET_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    let patterns: &[(&str, &str)] = &[
        (
            r#"(?i)(api[_-]?key|apikey)\s*[:=]\s*['"]?([a-zA-Z0-9_\-]{20,})['"]?"#,
            "$1=***REDACTED***",
        ),
        (
            r#"(?i)(password|passwd|pwd)\s*[:=]\s*['"]?([^\s'"]{8,})['"]?"#,
            "$1=***REDACTED***",
        ),
        (
            r#"(?i)(secret|token)\s*[:=]\s*['"]?([a-zA-Z0-9_\-]{20,})['"]?"#,
            "$1=***REDACTED***",
        ),
        (
            r#"(?i)(aws_access_key_id)\s*[:=]\s*['"]?(AKIA[0-9A-Z]{16})['"]?"#,
            "$1=***REDACTED***",
        ),
        (
            r"(?i)Bearer\s+[a-zA-Z0-9_\-\.]{20,}",
            "Bearer ***REDACTED***",
        ),
    ];
    patterns
        .iter()
        .filter_map(|(p, r)| Regex::new(p).ok().map(|re| (re, *r)))
        .collect()
});

/// Redact potential secrets from text.
///
/// Replaces assignments that look like API keys, passwords, tokens, AWS
/// access keys and Bearer tokens with `***REDACTED***`.
pub fn redact_secrets(text: &str) -> String {
    let mut result = text.to_string();
    for (re, replacement) in SECRET_PATTERNS.iter() {
        result = re.replace_all(&result, *replacement).into_owned();
    }
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
