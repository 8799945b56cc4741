//! Analysis pipeline: the single entry point a presentation layer calls.
//!
//! One request runs sequentially: resolve the language, parse through the
//! shared [`ParserRegistry`], render the depth-limited graph, summarize the
//! full tree, and optionally ask for commentary. The first hard failure
//! stops the request; a commentary failure is reported inside the report
//! instead.

use std::sync::Arc;

use serde::Serialize;

use crate::commentary::{comment_or_message, CommentaryProvider, CommentaryRequest};
use crate::config::AnalyzerConfig;
use crate::error::{AnalyzerError, Result};
use crate::observability::redact_secrets;
use crate::registry::ParserRegistry;
use crate::render::{outline, to_dot, RenderGraph};
use crate::summary::{summarize, TreeSummary};
use crate::tree::OwnedNode;
use crate::types::Language;

/// Deepest tree [`AnalysisRequest::include_tree`] will export. Serializing
/// the owned tree recurses once per level.
pub const TREE_EXPORT_MAX_DEPTH: usize = 2048;

/// One analysis request.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub source: String,
    /// Language identifier or display name.
    pub language: String,
    /// Graph depth cap; falls back to `render.max_depth` from config.
    pub max_depth: Option<usize>,
    /// Include the indented text outline of the full tree.
    pub include_outline: bool,
    /// Include an owned copy of the full tree in the report.
    pub include_tree: bool,
    /// Ask the commentary provider, if one is supplied. Also on when
    /// `commentary.enabled` is set in config.
    pub commentary: bool,
}

impl AnalysisRequest {
    pub fn new(source: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            language: language.into(),
            max_depth: None,
            include_outline: false,
            include_tree: false,
            commentary: false,
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    #[must_use]
    pub fn with_outline(mut self) -> Self {
        self.include_outline = true;
        self
    }

    #[must_use]
    pub fn with_tree(mut self) -> Self {
        self.include_tree = true;
        self
    }

    #[must_use]
    pub fn with_commentary(mut self) -> Self {
        self.commentary = true;
        self
    }
}

/// Everything produced for one request.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub language: Language,
    pub max_depth: usize,
    /// Graphviz DOT text of the depth-limited tree.
    pub dot: String,
    pub graph_nodes: usize,
    pub graph_edges: usize,
    /// Statistics over the whole tree.
    pub summary: TreeSummary,
    pub has_syntax_errors: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline: Option<String>,
    /// The whole syntax tree, for export.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<OwnedNode>,
    /// Model output, or a message explaining why there is none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
}

impl AnalysisReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs analysis requests against a shared registry.
pub struct Analyzer {
    registry: Arc<ParserRegistry>,
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(registry: Arc<ParserRegistry>, config: AnalyzerConfig) -> Self {
        Self { registry, config }
    }

    /// Registry sized by `config.limits`, wrapped for sharing.
    pub fn from_config(config: AnalyzerConfig) -> Self {
        let registry = ParserRegistry::new().with_max_source_bytes(config.limits.max_source_bytes);
        Self::new(Arc::new(registry), config)
    }

    pub fn registry(&self) -> &Arc<ParserRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Run the full pipeline for `request`.
    ///
    /// `provider` is consulted only when the request asks for commentary.
    pub fn analyze(
        &self,
        request: &AnalysisRequest,
        provider: Option<&dyn CommentaryProvider>,
    ) -> Result<AnalysisReport> {
        if request.source.trim().is_empty() {
            return Err(AnalyzerError::Config("no source to analyze".into()));
        }

        let parsed = self.registry.parse(&request.source, &request.language)?;
        let root = parsed.root();
        let max_depth = request.max_depth.unwrap_or(self.config.render.max_depth);

        let graph = RenderGraph::build(root, max_depth);
        let dot = to_dot(&graph, &self.config.render.style());
        let summary = summarize(root);
        let outline_text = request.include_outline.then(|| outline(root, None));
        let tree = if request.include_tree {
            if summary.max_depth > TREE_EXPORT_MAX_DEPTH {
                return Err(AnalyzerError::Rendering(format!(
                    "tree depth {} exceeds the export limit of {TREE_EXPORT_MAX_DEPTH}",
                    summary.max_depth
                )));
            }
            Some(OwnedNode::snapshot(root))
        } else {
            None
        };

        let commentary = if request.commentary || self.config.commentary.enabled {
            Some(match provider {
                Some(provider) => {
                    let outgoing = self.commentary_request(request, parsed.language, &summary);
                    comment_or_message(provider, &outgoing)
                }
                None => "Commentary unavailable: no commentary provider configured".to_string(),
            })
        } else {
            None
        };

        tracing::info!(
            language = %parsed.language,
            total_nodes = summary.total_nodes,
            tree_depth = summary.max_depth,
            graph_nodes = graph.node_count(),
            "analysis complete"
        );

        Ok(AnalysisReport {
            language: parsed.language,
            max_depth,
            dot,
            graph_nodes: graph.node_count(),
            graph_edges: graph.edge_count(),
            has_syntax_errors: parsed.has_syntax_errors(),
            summary,
            outline: outline_text,
            tree,
            commentary,
        })
    }

    fn commentary_request(
        &self,
        request: &AnalysisRequest,
        language: Language,
        summary: &TreeSummary,
    ) -> CommentaryRequest {
        let settings = &self.config.commentary;
        let source = if settings.redact_secrets {
            redact_secrets(&request.source)
        } else {
            request.source.clone()
        };
        CommentaryRequest {
            source,
            language_display_name: language.display_name().to_string(),
            digest: summary.digest(settings.top_level_limit),
            fence_tag: language.fence_tag().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
