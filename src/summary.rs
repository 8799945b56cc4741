//! Summary aggregator: exact statistics over the whole syntax tree.
//!
//! Unlike the graph renderer, the summary pass is never depth-limited. The
//! picture may be truncated for readability but the numbers always describe
//! the full tree.

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::tree::{walk, SyntaxNode, Visit, Visitor, ERROR_KIND};
use crate::types::LinePosition;

/// Default number of top-level kinds listed in a [`TreeSummary::digest`].
pub const DIGEST_TOP_LEVEL_LIMIT: usize = 10;

/// A named node directly under the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopLevelNode {
    pub kind: String,
    pub start: LinePosition,
    pub end: LinePosition,
}

/// Aggregate statistics for one syntax tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSummary {
    /// Every node, named or anonymous.
    pub total_nodes: usize,
    /// Greatest depth reached (root = 0).
    pub max_depth: usize,
    /// Occurrences per kind, named nodes only.
    pub node_types: BTreeMap<String, usize>,
    /// Named nodes at depth 1, in source order.
    pub top_level_nodes: Vec<TopLevelNode>,
}

impl TreeSummary {
    /// Number of named nodes in the tree.
    pub fn named_nodes(&self) -> usize {
        self.node_types.values().sum()
    }

    /// Number of parser error nodes.
    pub fn error_nodes(&self) -> usize {
        self.node_types.get(ERROR_KIND).copied().unwrap_or(0)
    }

    /// The `n` most frequent named kinds, highest count first, ties broken
    /// alphabetically.
    pub fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self
            .node_types
            .iter()
            .map(|(kind, count)| (kind.as_str(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(n);
        entries
    }

    /// Short plain-text digest forwarded to the commentary service.
    ///
    /// Lists at most `top_level_limit` top-level kinds.
    pub fn digest(&self, top_level_limit: usize) -> String {
        let kinds: Vec<&str> = self
            .top_level_nodes
            .iter()
            .take(top_level_limit)
            .map(|n| n.kind.as_str())
            .collect();
        let mut out = String::new();
        let _ = writeln!(out, "Total Nodes: {}", self.total_nodes);
        let _ = writeln!(out, "Tree Depth: {}", self.max_depth);
        let _ = writeln!(out, "Top-level Nodes: {}", kinds.join(", "));
        out
    }
}

struct SummaryCollector {
    summary: TreeSummary,
}

impl<N: SyntaxNode> Visitor<N> for SummaryCollector {
    fn visit(&mut self, v: Visit<N>) {
        let summary = &mut self.summary;
        summary.total_nodes += 1;
        summary.max_depth = summary.max_depth.max(v.depth);

        if !v.node.is_named() {
            return;
        }
        *summary
            .node_types
            .entry(v.node.kind().to_string())
            .or_insert(0) += 1;

        if v.depth == 1 {
            summary.top_level_nodes.push(TopLevelNode {
                kind: v.node.kind().to_string(),
                start: v.node.start_position().into(),
                end: v.node.end_position().into(),
            });
        }
    }
}

/// Summarize the entire tree under `root`.
pub fn summarize<N: SyntaxNode>(root: N) -> TreeSummary {
    let mut collector = SummaryCollector {
        summary: TreeSummary::default(),
    };
    walk(root, &mut collector);
    tracing::debug!(
        total_nodes = collector.summary.total_nodes,
        max_depth = collector.summary.max_depth,
        distinct_kinds = collector.summary.node_types.len(),
        "summarized tree"
    );
    collector.summary
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
