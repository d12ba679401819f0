//! Tree-sitter parsing for the bundled Java grammar.
//!
//! tree-sitter never throws on malformed input; it reports syntax errors
//! in-band as ERROR/MISSING nodes. [`parse`] scans the tree after parsing
//! and turns the first such node into a [`ParseError`], so callers get the
//! throw-on-invalid contract the DSL expects.

use std::sync::LazyLock;

use arborium_tree_sitter as tree_sitter;

use sylva_core::SyntaxNode;

use crate::version::JavaVersion;

static JAVA: LazyLock<tree_sitter::Language> = LazyLock::new(|| arborium_java::language().into());

/// The source text failed to parse for the given version.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Java {version}: parse error at {row}:{column}: {detail}")]
pub struct ParseError {
    pub version: JavaVersion,
    /// Zero-based row of the first offending node.
    pub row: usize,
    /// Zero-based column of the first offending node.
    pub column: usize,
    pub detail: String,
}

/// Parse Java source text targeting `version`.
///
/// The bundled grammar accepts the syntax of every supported version;
/// `version` is carried into diagnostics and test naming rather than
/// selecting a different grammar.
pub fn parse(version: JavaVersion, source: &str) -> Result<SourceTree, ParseError> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&JAVA)
        .expect("failed to set Java language");
    let Some(tree) = parser.parse(source, None) else {
        return Err(ParseError {
            version,
            row: 0,
            column: 0,
            detail: "parser produced no tree".to_owned(),
        });
    };

    let root = tree.root_node();
    if root.has_error() {
        return Err(syntax_error(root, source, version));
    }

    Ok(SourceTree {
        tree,
        source: source.to_owned(),
    })
}

fn syntax_error(root: tree_sitter::Node<'_>, source: &str, version: JavaVersion) -> ParseError {
    let node = first_problem(root).unwrap_or(root);
    let start = node.start_position();
    let detail = if node.is_missing() {
        format!("missing `{}`", node.kind())
    } else {
        let text = node.utf8_text(source.as_bytes()).unwrap_or("?");
        format!("unexpected \"{}\"", truncate(text))
    };
    ParseError {
        version,
        row: start.row,
        column: start.column,
        detail,
    }
}

/// First ERROR or MISSING node in document order.
fn first_problem(node: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_problem)
}

fn truncate(text: &str) -> &str {
    match text.char_indices().nth(40) {
        Some((offset, _)) => &text[..offset],
        None => text,
    }
}

/// Owned parse result: the syntax tree plus the source it indexes into.
#[derive(Debug)]
pub struct SourceTree {
    tree: tree_sitter::Tree,
    source: String,
}

impl SourceTree {
    pub fn root(&self) -> SourceNode<'_> {
        SourceNode {
            node: self.tree.root_node(),
            source: &self.source,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Borrowed node view implementing the core node surface.
#[derive(Clone, Copy, Debug)]
pub struct SourceNode<'t> {
    node: tree_sitter::Node<'t>,
    source: &'t str,
}

impl<'t> SourceNode<'t> {
    /// Underlying tree-sitter node, for callers that need positions or
    /// other raw accessors.
    pub fn ts_node(&self) -> tree_sitter::Node<'t> {
        self.node
    }

    /// Child occupying the grammar field `name`, if present.
    pub fn field(&self, name: &str) -> Option<SourceNode<'t>> {
        self.node.child_by_field_name(name).map(|node| SourceNode {
            node,
            source: self.source,
        })
    }
}

impl SyntaxNode for SourceNode<'_> {
    fn kind(&self) -> &str {
        self.node.kind()
    }

    fn child_count(&self) -> usize {
        self.node.named_child_count()
    }

    fn child(&self, index: usize) -> Option<Self> {
        self.node.named_child(index as u32).map(|node| SourceNode {
            node,
            source: self.source,
        })
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.field(name).map(|child| child.text())
    }

    fn text(&self) -> String {
        self.node
            .utf8_text(self.source.as_bytes())
            .unwrap_or_default()
            .to_owned()
    }
}
