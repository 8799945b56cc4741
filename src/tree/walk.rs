//! Single pre-order depth-first walk shared by every tree consumer.
//!
//! The walk keeps its own work stack instead of recursing, since the depth
//! of a syntax tree is controlled by whoever wrote the source being parsed.
//! A [`Visitor`] decides which depths belong to its pass through
//! [`Visitor::admit`]; a node that is not admitted is skipped together with
//! its entire subtree, and does not consume an id.

use super::SyntaxNode;

/// One visited node together with its traversal coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Visit<N> {
    pub node: N,
    /// Pre-order index among admitted nodes, starting at 0.
    pub id: usize,
    /// Id of the parent, `None` for the root.
    pub parent: Option<usize>,
    /// Distance from the root (root = 0).
    pub depth: usize,
}

/// Per-node callback plus per-depth admission predicate.
pub trait Visitor<N: SyntaxNode> {
    /// Whether nodes at `depth` take part in this pass. Must be monotone:
    /// once a depth is rejected, every greater depth is rejected too.
    fn admit(&mut self, _depth: usize) -> bool {
        true
    }

    fn visit(&mut self, visit: Visit<N>);
}

/// Walk `root` in pre-order, feeding every admitted node to `visitor`.
///
/// Returns the number of nodes visited.
pub fn walk<N, V>(root: N, visitor: &mut V) -> usize
where
    N: SyntaxNode,
    V: Visitor<N>,
{
    if !visitor.admit(0) {
        return 0;
    }

    let mut next_id = 0;
    let mut stack: Vec<(N, Option<usize>, usize)> = vec![(root, None, 0)];

    while let Some((node, parent, depth)) = stack.pop() {
        let id = next_id;
        next_id += 1;

        if visitor.admit(depth + 1) {
            // Reversed so the leftmost child is popped first.
            let children = node.children();
            stack.extend(children.into_iter().rev().map(|c| (c, Some(id), depth + 1)));
        }

        visitor.visit(Visit {
            node,
            id,
            parent,
            depth,
        });
    }

    next_id
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::OwnedNode;
    use crate::types::Point;

    /// Records `(kind, id, parent, depth)` for every visit, up to `limit`.
    struct Recorder {
        limit: Option<usize>,
        seen: Vec<(String, usize, Option<usize>, usize)>,
    }

    impl Recorder {
        fn new(limit: Option<usize>) -> Self {
            Self {
                limit,
                seen: Vec::new(),
            }
        }
    }

    impl<'a> Visitor<&'a OwnedNode> for Recorder {
        fn admit(&mut self, depth: usize) -> bool {
            self.limit.map_or(true, |max| depth <= max)
        }

        fn visit(&mut self, v: Visit<&'a OwnedNode>) {
            self.seen.push((v.node.kind.clone(), v.id, v.parent, v.depth));
        }
    }

    /// A chain of arbitrary length that allocates nothing.
    #[derive(Clone, Copy)]
    struct Chain {
        level: usize,
        length: usize,
    }

    impl SyntaxNode for Chain {
        fn kind(&self) -> &str {
            "link"
        }
        fn is_named(&self) -> bool {
            true
        }
        fn start_position(&self) -> Point {
            Point::new(self.level, 0)
        }
        fn end_position(&self) -> Point {
            Point::new(self.level, 1)
        }
        fn children(&self) -> Vec<Self> {
            if self.level + 1 < self.length {
                vec![Chain {
                    level: self.level + 1,
                    length: self.length,
                }]
            } else {
                Vec::new()
            }
        }
    }

    struct DeepestVisit(usize);

    impl Visitor<Chain> for DeepestVisit {
        fn visit(&mut self, v: Visit<Chain>) {
            self.0 = self.0.max(v.depth);
        }
    }

    fn sample() -> OwnedNode {
        OwnedNode::named("root")
            .with_child(
                OwnedNode::named("a")
                    .with_child(OwnedNode::named("a1"))
                    .with_child(OwnedNode::anonymous(";")),
            )
            .with_child(OwnedNode::named("b").with_child(OwnedNode::named("b1")))
    }

    #[test]
    fn ids_follow_pre_order() {
        let tree = sample();
        let mut rec = Recorder::new(None);
        let count = walk(&tree, &mut rec);
        assert_eq!(count, 6);
        let order: Vec<&str> = rec.seen.iter().map(|s| s.0.as_str()).collect();
        assert_eq!(order, vec!["root", "a", "a1", ";", "b", "b1"]);
        let ids: Vec<usize> = rec.seen.iter().map(|s| s.1).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn parents_point_at_enclosing_node() {
        let tree = sample();
        let mut rec = Recorder::new(None);
        walk(&tree, &mut rec);
        let parents: Vec<Option<usize>> = rec.seen.iter().map(|s| s.2).collect();
        assert_eq!(parents, vec![None, Some(0), Some(1), Some(1), Some(0), Some(4)]);
    }

    #[test]
    fn depth_cutoff_skips_subtrees_without_consuming_ids() {
        let tree = sample();
        let mut rec = Recorder::new(Some(1));
        let count = walk(&tree, &mut rec);
        assert_eq!(count, 3);
        assert_eq!(
            rec.seen,
            vec![
                ("root".to_string(), 0, None, 0),
                ("a".to_string(), 1, Some(0), 1),
                ("b".to_string(), 2, Some(0), 1),
            ]
        );
    }

    #[test]
    fn zero_depth_visits_only_root() {
        let tree = sample();
        let mut rec = Recorder::new(Some(0));
        assert_eq!(walk(&tree, &mut rec), 1);
        assert_eq!(rec.seen[0].0, "root");
    }

    #[test]
    fn deep_chain_does_not_overflow_the_stack() {
        let root = Chain {
            level: 0,
            length: 1_000_000,
        };
        let mut deepest = DeepestVisit(0);
        assert_eq!(walk(root, &mut deepest), 1_000_000);
        assert_eq!(deepest.0, 999_999);
    }
}
