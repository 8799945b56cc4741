//! Graphviz DOT serialization for [`RenderGraph`].
//!
//! Output layout:
//!
//! ```text
//! digraph AST {
//!   rankdir=TB;
//!   node [shape=box, style=rounded, fontname=Arial];
//!   edge [fontname=Arial, fontsize=10];
//!
//!   node0 [label="module", fillcolor="#E3F2FD", color="#1976D2", style="rounded,filled"];
//!   node1 [label="function_definition", ...];
//!   node0 -> node1;
//! }
//! ```
//!
//! Each node line is followed by the edge from its parent, so the text reads
//! in visitation order.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use super::RenderGraph;

/// Fill and border colour for one class of node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStyle {
    pub fill: String,
    pub border: String,
}

impl NodeStyle {
    pub fn new(fill: impl Into<String>, border: impl Into<String>) -> Self {
        Self {
            fill: fill.into(),
            border: border.into(),
        }
    }
}

/// Visual attributes of the generated digraph.
///
/// Styling is a two-way split on the named flag only; node kinds do not get
/// individual colours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphStyle {
    pub graph_name: String,
    pub rankdir: String,
    pub font: String,
    pub named: NodeStyle,
    pub anonymous: NodeStyle,
}

impl Default for GraphStyle {
    fn default() -> Self {
        Self {
            graph_name: "AST".to_string(),
            rankdir: "TB".to_string(),
            font: "Arial".to_string(),
            named: NodeStyle::new("#E3F2FD", "#1976D2"),
            anonymous: NodeStyle::new("#F5F5F5", "#757575"),
        }
    }
}

impl GraphStyle {
    fn for_node(&self, is_named: bool) -> &NodeStyle {
        if is_named {
            &self.named
        } else {
            &self.anonymous
        }
    }
}

/// Escape text for use inside a double-quoted DOT string.
pub fn escape_label(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out
}

/// Serialize `graph` as a DOT digraph.
pub fn to_dot(graph: &RenderGraph, style: &GraphStyle) -> String {
    let mut dot = String::new();
    // Writing into a String cannot fail.
    let _ = write_dot(&mut dot, graph, style);
    dot
}

fn write_dot(out: &mut String, graph: &RenderGraph, style: &GraphStyle) -> std::fmt::Result {
    let font = dot_id(&style.font);
    writeln!(out, "digraph {} {{", dot_id(&style.graph_name))?;
    writeln!(out, "  rankdir={};", dot_id(&style.rankdir))?;
    writeln!(out, "  node [shape=box, style=rounded, fontname={font}];")?;
    writeln!(out, "  edge [fontname={font}, fontsize=10];")?;
    writeln!(out)?;

    let mut edges = graph.edges.iter().peekable();
    for node in &graph.nodes {
        let colors = style.for_node(node.is_named);
        writeln!(
            out,
            "  node{} [label=\"{}\", fillcolor=\"{}\", color=\"{}\", style=\"rounded,filled\"];",
            node.id,
            escape_label(&node.label),
            escape_label(&colors.fill),
            escape_label(&colors.border),
        )?;
        while let Some(edge) = edges.next_if(|e| e.to == node.id) {
            writeln!(out, "  node{} -> node{};", edge.from, edge.to)?;
        }
    }
    // Edges are normally consumed in lockstep; anything left is still valid.
    for edge in edges {
        writeln!(out, "  node{} -> node{};", edge.from, edge.to)?;
    }

    writeln!(out, "}}")
}

/// Graph names and attribute values: bare when they are plain identifiers,
/// quoted otherwise.
fn dot_id(text: &str) -> String {
    let plain = !text.is_empty()
        && !text.starts_with(|c: char| c.is_ascii_digit())
        && text.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        text.to_string()
    } else {
        format!("\"{}\"", escape_label(text))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{GraphEdge, GraphNode};
    use pretty_assertions::assert_eq;

    fn node(id: usize, label: &str, is_named: bool) -> GraphNode {
        GraphNode {
            id,
            label: label.to_string(),
            is_named,
        }
    }

    #[test]
    fn renders_exact_layout() {
        let graph = RenderGraph {
            nodes: vec![node(0, "module", true), node(1, "(", false)],
            edges: vec![GraphEdge { from: 0, to: 1 }],
        };
        let expected = "\
digraph AST {
  rankdir=TB;
  node [shape=box, style=rounded, fontname=Arial];
  edge [fontname=Arial, fontsize=10];

  node0 [label=\"module\", fillcolor=\"#E3F2FD\", color=\"#1976D2\", style=\"rounded,filled\"];
  node1 [label=\"(\", fillcolor=\"#F5F5F5\", color=\"#757575\", style=\"rounded,filled\"];
  node0 -> node1;
}
";
        assert_eq!(to_dot(&graph, &GraphStyle::default()), expected);
    }

    #[test]
    fn quotes_in_labels_are_escaped() {
        let graph = RenderGraph {
            nodes: vec![node(0, "string", true), node(1, "\"", false)],
            edges: vec![GraphEdge { from: 0, to: 1 }],
        };
        let dot = to_dot(&graph, &GraphStyle::default());
        assert!(dot.contains(r#"node1 [label="\"", "#));
        // Every non-escaped quote opens or closes a string: count stays even.
        let unescaped = dot
            .as_bytes()
            .windows(2)
            .filter(|w| w[1] == b'"' && w[0] != b'\\')
            .count();
        assert_eq!(unescaped % 2, 0);
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn escape_label_handles_backslash_and_newline() {
        assert_eq!(escape_label(r#"a\"b"#), r#"a\\\"b"#);
        assert_eq!(escape_label("x\ny"), "x\\ny");
        assert_eq!(escape_label("plain"), "plain");
    }

    #[test]
    fn custom_style_is_applied() {
        let style = GraphStyle {
            graph_name: "Syntax Tree".into(),
            rankdir: "LR".into(),
            font: "Fira Code".into(),
            named: NodeStyle::new("#000000", "#111111"),
            ..GraphStyle::default()
        };
        let graph = RenderGraph {
            nodes: vec![node(0, "program", true)],
            edges: Vec::new(),
        };
        let dot = to_dot(&graph, &style);
        assert!(dot.starts_with("digraph \"Syntax Tree\" {"));
        assert!(dot.contains("rankdir=LR;"));
        assert!(dot.contains("fontname=\"Fira Code\"];"));
        assert!(dot.contains("edge [fontname=\"Fira Code\", fontsize=10];"));
        assert!(dot.contains("fillcolor=\"#000000\", color=\"#111111\""));
    }

    #[test]
    fn edges_interleave_after_their_child() {
        let graph = RenderGraph {
            nodes: vec![node(0, "r", true), node(1, "a", true), node(2, "b", true)],
            edges: vec![GraphEdge { from: 0, to: 1 }, GraphEdge { from: 0, to: 2 }],
        };
        let dot = to_dot(&graph, &GraphStyle::default());
        let pos = |needle: &str| dot.find(needle).unwrap();
        assert!(pos("node1 [") < pos("node0 -> node1;"));
        assert!(pos("node0 -> node1;") < pos("node2 ["));
        assert!(pos("node2 [") < pos("node0 -> node2;"));
    }
}
