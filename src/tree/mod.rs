//! Read-only view over an already-parsed concrete syntax tree.
//!
//! The rendering and summary engines never see a concrete parser type. They
//! consume anything implementing [`SyntaxNode`], which is implemented here
//! for `tree_sitter::Node` and for the owned, serializable [`OwnedNode`].
//! Nodes are handles: cheap to copy, borrowing the tree they came from.

pub mod walk;

use serde::{Deserialize, Serialize};

use crate::types::Point;

pub use walk::{walk, Visit, Visitor};

/// Node kind tree-sitter gives to regions it could not parse.
pub const ERROR_KIND: &str = "ERROR";

/// The capability set the traversal engine needs from a tree node.
pub trait SyntaxNode: Copy {
    /// Grammar-defined node kind.
    fn kind(&self) -> &str;

    /// `true` for grammar rules, `false` for punctuation and keywords.
    fn is_named(&self) -> bool;

    fn start_position(&self) -> Point;

    fn end_position(&self) -> Point;

    /// Ordered children, empty for leaves.
    fn children(&self) -> Vec<Self>;
}

// ---------------------------------------------------------------------------
// tree-sitter backend
// ---------------------------------------------------------------------------

impl<'tree> SyntaxNode for tree_sitter::Node<'tree> {
    fn kind(&self) -> &str {
        tree_sitter::Node::kind(self)
    }

    fn is_named(&self) -> bool {
        tree_sitter::Node::is_named(self)
    }

    fn start_position(&self) -> Point {
        tree_sitter::Node::start_position(self).into()
    }

    fn end_position(&self) -> Point {
        tree_sitter::Node::end_position(self).into()
    }

    fn children(&self) -> Vec<Self> {
        let mut cursor = self.walk();
        tree_sitter::Node::children(self, &mut cursor).collect()
    }
}

// ---------------------------------------------------------------------------
// Owned backend
// ---------------------------------------------------------------------------

/// A fully owned syntax tree node.
///
/// Useful as a backend for trees that did not come from tree-sitter, for
/// snapshotting a parse into JSON, and for building fixtures in tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedNode {
    pub kind: String,
    pub named: bool,
    pub start: Point,
    pub end: Point,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OwnedNode>,
}

impl OwnedNode {
    /// A named node with an empty span and no children.
    pub fn named(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            named: true,
            start: Point::default(),
            end: Point::default(),
            children: Vec::new(),
        }
    }

    /// An anonymous (punctuation/keyword) node.
    pub fn anonymous(kind: impl Into<String>) -> Self {
        let mut node = Self::named(kind);
        node.named = false;
        node
    }

    #[must_use]
    pub fn with_span(mut self, start: Point, end: Point) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: OwnedNode) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = OwnedNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Copy any [`SyntaxNode`] tree into owned form.
    ///
    /// Uses an explicit stack, so arbitrarily deep input does not grow the
    /// call stack.
    pub fn snapshot<N: SyntaxNode>(root: N) -> Self {
        // Children still to visit (reversed) plus the node being assembled.
        struct Frame<N> {
            pending: Vec<N>,
            built: OwnedNode,
        }

        let leaf = |n: &N| OwnedNode {
            kind: n.kind().to_string(),
            named: n.is_named(),
            start: n.start_position(),
            end: n.end_position(),
            children: Vec::new(),
        };

        let mut pending = root.children();
        pending.reverse();
        let mut stack = vec![Frame {
            pending,
            built: leaf(&root),
        }];

        let mut finished = None;
        while let Some(frame) = stack.last_mut() {
            if let Some(child) = frame.pending.pop() {
                let mut pending = child.children();
                pending.reverse();
                stack.push(Frame {
                    pending,
                    built: leaf(&child),
                });
                continue;
            }
            let Some(done) = stack.pop() else { break };
            match stack.last_mut() {
                Some(parent) => parent.built.children.push(done.built),
                None => finished = Some(done.built),
            }
        }
        finished.unwrap_or_else(|| leaf(&root))
    }
}

// Detach descendants onto a heap stack first; the derived drop would
// recurse once per level.
impl Drop for OwnedNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

impl<'a> SyntaxNode for &'a OwnedNode {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn is_named(&self) -> bool {
        self.named
    }

    fn start_position(&self) -> Point {
        self.start
    }

    fn end_position(&self) -> Point {
        self.end
    }

    fn children(&self) -> Vec<Self> {
        self.children.iter().collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
