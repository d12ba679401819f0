//! In-memory tree fixture for locator and matcher tests.

use crate::node::SyntaxNode;

/// Hand-built tree node implementing the core node surface.
#[derive(Debug, Clone)]
pub struct FakeNode {
    kind: String,
    text: String,
    attrs: Vec<(String, String)>,
    children: Vec<FakeNode>,
}

impl FakeNode {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_owned(),
            text: String::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_owned();
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn with_child(mut self, child: FakeNode) -> Self {
        self.children.push(child);
        self
    }
}

impl SyntaxNode for FakeNode {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child(&self, index: usize) -> Option<Self> {
        self.children.get(index).cloned()
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.attrs
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.clone())
    }

    fn text(&self) -> String {
        self.text.clone()
    }
}
