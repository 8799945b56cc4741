//! Indented plain-text view of a syntax tree.
//!
//! One line per node, two spaces of indent per level, followed by the span
//! in `line:column` form. Anonymous tokens are quoted so `(` reads as a token
//! rather than punctuation of the outline itself.

use std::fmt::Write;

use crate::tree::{walk, SyntaxNode, Visit, Visitor};
use crate::types::LinePosition;

struct OutlineWriter {
    max_depth: Option<usize>,
    out: String,
}

impl<N: SyntaxNode> Visitor<N> for OutlineWriter {
    fn admit(&mut self, depth: usize) -> bool {
        self.max_depth.map_or(true, |max| depth <= max)
    }

    fn visit(&mut self, v: Visit<N>) {
        let start = LinePosition::from(v.node.start_position());
        let end = LinePosition::from(v.node.end_position());
        let indent = "  ".repeat(v.depth);
        let _ = if v.node.is_named() {
            writeln!(self.out, "{indent}{} [{start} - {end}]", v.node.kind())
        } else {
            writeln!(self.out, "{indent}\"{}\" [{start} - {end}]", v.node.kind())
        };
    }
}

/// Render `root` as an outline, optionally truncated below `max_depth`.
pub fn outline<N: SyntaxNode>(root: N, max_depth: Option<usize>) -> String {
    let mut writer = OutlineWriter {
        max_depth,
        out: String::new(),
    };
    walk(root, &mut writer);
    writer.out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::OwnedNode;
    use crate::types::Point;

    #[test]
    fn outline_indents_by_depth() {
        let tree = OwnedNode::named("module")
            .with_span(Point::new(0, 0), Point::new(1, 0))
            .with_child(
                OwnedNode::named("call")
                    .with_span(Point::new(0, 0), Point::new(0, 3))
                    .with_child(
                        OwnedNode::anonymous("(").with_span(Point::new(0, 1), Point::new(0, 2)),
                    ),
            );
        let text = outline(&tree, None);
        assert_eq!(
            text,
            "module [1:0 - 2:0]\n  call [1:0 - 1:3]\n    \"(\" [1:1 - 1:2]\n"
        );
    }

    #[test]
    fn outline_respects_depth_limit() {
        let tree = OwnedNode::named("a")
            .with_child(OwnedNode::named("b").with_child(OwnedNode::named("c")));
        let text = outline(&tree, Some(1));
        assert_eq!(text.lines().count(), 2);
        assert!(!text.contains('c'));
    }
}
