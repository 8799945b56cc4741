//! Optional natural-language commentary from an external language model.
//!
//! The service is a black box: it receives the source, the language's
//! display name and a short digest of the tree summary, and answers with
//! free-form text. Failures never abort an analysis; [`comment_or_message`]
//! turns any error into text the shell can show in place of the commentary.

#[cfg(feature = "commentary")]
pub mod gemini;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[cfg(feature = "commentary")]
pub use gemini::GeminiProvider;

/// What is sent to the commentary service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentaryRequest {
    pub source: String,
    pub language_display_name: String,
    /// Plain-text digest of the tree summary.
    pub digest: String,
    /// Tag for the markdown code fence around the source.
    pub fence_tag: String,
}

impl CommentaryRequest {
    /// Full prompt text for a chat-style model.
    pub fn prompt(&self) -> String {
        format!(
            "You are a code analysis expert. Analyze the following {lang} code and \
the summary of its syntax tree.\n\
\n\
Code:\n\
```{fence}\n\
{source}\n\
```\n\
\n\
Syntax tree summary:\n\
{digest}\n\
\n\
Please provide:\n\
1. A brief overview of what the code does\n\
2. Potential bugs or issues (if any)\n\
3. Code quality observations\n\
4. Suggestions for improvement (if applicable)\n\
\n\
Keep your analysis concise and practical.",
            lang = self.language_display_name,
            fence = self.fence_tag,
            source = self.source,
            digest = self.digest.trim_end(),
        )
    }
}

/// A text-generation backend.
pub trait CommentaryProvider: Send + Sync {
    /// Produce commentary for `request`.
    fn comment(&self, request: &CommentaryRequest) -> Result<String>;

    /// Short name for logs.
    fn provider_name(&self) -> &'static str;
}

/// Ask `provider` for commentary, converting any failure into a message.
pub fn comment_or_message(provider: &dyn CommentaryProvider, request: &CommentaryRequest) -> String {
    match provider.comment(request) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(
                provider = provider.provider_name(),
                error = %err,
                "commentary request failed"
            );
            format!("Commentary unavailable: {err}")
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
