//! Unambiguous node location within a parsed tree.
//!
//! Two search modes with very different guarantees:
//! - [`first_descendant`] takes the first match anywhere below a node, in
//!   document order. Used to reach the anchor inside a known wrapper.
//! - [`find_on_straight_line`] only walks single-child chains and refuses
//!   to guess at branch points. Used to reach the node under test, so a
//!   fragment that parses into a wider tree than the author expected fails
//!   loudly instead of silently matching a sibling.

use crate::node::SyntaxNode;

/// First descendant of `kind` below `node`, in document order.
///
/// The start node itself is never a candidate.
pub fn first_descendant<N: SyntaxNode>(node: &N, kind: &str) -> Option<N> {
    for child in node.children() {
        if child.kind() == kind {
            return Some(child);
        }
        if let Some(found) = first_descendant(&child, kind) {
            return Some(found);
        }
    }
    None
}

/// Descendant of `kind` reachable from `node` on a straight line.
///
/// If `node` already has the kind it is returned as-is. Otherwise the
/// search descends only while each node has exactly one named child, and
/// returns `None` at the first branch point or dead end - even when a
/// node of the requested kind exists deeper in a sibling subtree.
///
/// Pure function of its inputs: repeated calls return the same result.
pub fn find_on_straight_line<N: SyntaxNode>(node: &N, kind: &str) -> Option<N> {
    if node.kind() == kind {
        return Some(node.clone());
    }
    if node.child_count() == 1 {
        return node
            .child(0)
            .and_then(|only| find_on_straight_line(&only, kind));
    }
    None
}
