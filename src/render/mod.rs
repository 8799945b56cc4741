//! Graph renderer: turns a syntax tree into a bounded directed-graph
//! description.
//!
//! [`RenderGraph::build`] runs the shared walk with a depth cap and records
//! one node per admitted syntax node plus one parent→child edge for every
//! admitted non-root node. [`dot`] serializes the result for Graphviz and
//! [`outline`] offers a plain indented text view of the same walk.

pub mod dot;
pub mod outline;

use serde::{Deserialize, Serialize};

use crate::tree::{walk, SyntaxNode, Visit, Visitor};

pub use dot::{to_dot, GraphStyle, NodeStyle};
pub use outline::outline;

/// One node of the rendered graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: usize,
    /// Raw node kind. Escaping happens at serialization time.
    pub label: String,
    pub is_named: bool,
}

/// Parent→child edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: usize,
    pub to: usize,
}

/// Depth-limited graph view of a syntax tree, in visitation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl RenderGraph {
    /// Build the graph for every node at depth `<= max_depth`.
    pub fn build<N: SyntaxNode>(root: N, max_depth: usize) -> Self {
        let mut builder = GraphBuilder {
            max_depth,
            graph: RenderGraph::default(),
        };
        walk(root, &mut builder);
        tracing::debug!(
            nodes = builder.graph.nodes.len(),
            edges = builder.graph.edges.len(),
            max_depth,
            "built render graph"
        );
        builder.graph
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

struct GraphBuilder {
    max_depth: usize,
    graph: RenderGraph,
}

impl<N: SyntaxNode> Visitor<N> for GraphBuilder {
    fn admit(&mut self, depth: usize) -> bool {
        depth <= self.max_depth
    }

    fn visit(&mut self, v: Visit<N>) {
        self.graph.nodes.push(GraphNode {
            id: v.id,
            label: v.node.kind().to_string(),
            is_named: v.node.is_named(),
        });
        if let Some(parent) = v.parent {
            self.graph.edges.push(GraphEdge {
                from: parent,
                to: v.id,
            });
        }
    }
}

/// Build and serialize in one step: the DOT text for `root` truncated at
/// `max_depth`.
pub fn render_graph<N: SyntaxNode>(root: N, max_depth: usize, style: &GraphStyle) -> String {
    to_dot(&RenderGraph::build(root, max_depth), style)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::OwnedNode;
    use pretty_assertions::assert_eq;

    /// root → {A → {";"}, B}
    fn scenario() -> OwnedNode {
        OwnedNode::named("root")
            .with_child(OwnedNode::named("A").with_child(OwnedNode::anonymous(";")))
            .with_child(OwnedNode::named("B"))
    }

    #[test]
    fn full_depth_includes_every_node() {
        let tree = scenario();
        let graph = RenderGraph::build(&tree, 10);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(
            graph.edges,
            vec![
                GraphEdge { from: 0, to: 1 },
                GraphEdge { from: 1, to: 2 },
                GraphEdge { from: 0, to: 3 },
            ]
        );
    }

    #[test]
    fn depth_one_drops_grandchildren() {
        let tree = scenario();
        let graph = RenderGraph::build(&tree, 1);
        let labels: Vec<&str> = graph.nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["root", "A", "B"]);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn depth_zero_is_root_only() {
        let tree = scenario();
        let graph = RenderGraph::build(&tree, 0);
        assert_eq!(graph.node_count(), 1);
        assert!(graph.edges.is_empty());
        assert_eq!(graph.nodes[0].id, 0);
    }

    #[test]
    fn named_flag_is_carried() {
        let tree = scenario();
        let graph = RenderGraph::build(&tree, 10);
        let flags: Vec<bool> = graph.nodes.iter().map(|n| n.is_named).collect();
        assert_eq!(flags, vec![true, true, false, true]);
    }

    #[test]
    fn render_graph_produces_digraph() {
        let tree = scenario();
        let dot = render_graph(&tree, 10, &GraphStyle::default());
        assert!(dot.starts_with("digraph AST {"));
        assert!(dot.trim_end().ends_with('}'));
        assert_eq!(dot.matches(" -> ").count(), 3);
    }
}
