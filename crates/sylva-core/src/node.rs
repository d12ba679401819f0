//! Read-only surface over parsed syntax nodes.

/// Read-only view of a parsed syntax node.
///
/// Children are the *named* children of the underlying tree: anonymous
/// tokens (punctuation, keywords, operators) are not part of the matchable
/// child list and are reachable only through [`attr`](Self::attr) and
/// [`text`](Self::text). Every method is a pure read; implementations
/// never expose mutation.
pub trait SyntaxNode: Clone {
    /// Grammar kind tag, e.g. `binary_expression`.
    fn kind(&self) -> &str;

    /// Number of named children.
    fn child_count(&self) -> usize;

    /// Named child at `index`, in source order.
    fn child(&self, index: usize) -> Option<Self>;

    /// Text of the named attribute `name` (for tree-sitter backends, the
    /// source text of the child in that field), if present.
    fn attr(&self, name: &str) -> Option<String>;

    /// Source text covered by this node.
    fn text(&self) -> String;

    /// Named children in source order.
    fn children(&self) -> impl Iterator<Item = Self> {
        (0..self.child_count()).filter_map(|index| self.child(index))
    }
}
