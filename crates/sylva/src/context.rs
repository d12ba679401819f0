//! Parsing contexts: fragment wrapping and anchor retrieval.
//!
//! A fragment cannot be parsed on its own; [`FragmentKind::wrap`] embeds
//! it into the smallest compilable wrapper for its syntactic position,
//! and [`FragmentKind::anchor`] retrieves the node that contains the
//! construct back out of the parsed wrapper. From the anchor, the node
//! under test is located by straight-line descent only, so an
//! unexpectedly wide parse fails instead of matching the wrong node.

use indexmap::IndexSet;

use sylva_core::locate::{find_on_straight_line, first_descendant};
use sylva_java::{self as java, JavaVersion, SourceNode, SourceTree};

use crate::{Error, Result};

/// Syntactic position a fragment is wrapped into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FragmentKind {
    /// Initializer of a local variable inside an initializer block.
    Expression,
    /// Directly inside an initializer block; the fragment must carry its
    /// own statement-terminating syntax.
    Statement,
    /// Declared type of a single field.
    Type,
}

impl FragmentKind {
    /// Human name used in diagnostics, e.g. "expression".
    pub fn construct_name(self) -> &'static str {
        match self {
            FragmentKind::Expression => "expression",
            FragmentKind::Statement => "statement",
            FragmentKind::Type => "type",
        }
    }

    /// Minimal compilable wrapper around `fragment`.
    ///
    /// `imports` are emitted verbatim, one per line, before the class
    /// declaration. The fragment itself is never escaped or validated;
    /// malformed fragments surface as parse errors.
    pub fn wrap(self, imports: &[String], fragment: &str) -> String {
        let mut source = String::new();
        for import in imports {
            source.push_str(import);
            source.push('\n');
        }
        match self {
            FragmentKind::Expression => {
                source.push_str("class Foo {\n    {\n        Object o = ");
                source.push_str(fragment);
                source.push_str(";\n    }\n}\n");
            }
            FragmentKind::Statement => {
                source.push_str("class Foo {\n    {\n        ");
                source.push_str(fragment);
                source.push_str("\n    }\n}\n");
            }
            FragmentKind::Type => {
                source.push_str("class Foo {\n    ");
                source.push_str(fragment);
                source.push_str(" foo;\n}\n");
            }
        }
        source
    }

    /// Node kind that contains the construct inside the wrapper.
    fn container_kind(self) -> &'static str {
        match self {
            FragmentKind::Expression => "variable_declarator",
            FragmentKind::Statement => "block",
            FragmentKind::Type => "field_declaration",
        }
    }

    /// Grammar field of the container holding the construct, when the
    /// anchor sits behind a fixed structural path rather than being the
    /// container itself.
    fn container_field(self) -> Option<&'static str> {
        match self {
            FragmentKind::Expression => Some("value"),
            FragmentKind::Statement => None,
            FragmentKind::Type => Some("type"),
        }
    }

    /// Retrieve the anchor node for straight-line descent.
    ///
    /// The container is found by unrestricted first-descendant search
    /// below the root; for Expression and Type the anchor is the child in
    /// the container's `value`/`type` field, for Statement it is the
    /// containing block itself.
    pub fn anchor<'t>(self, root: &SourceNode<'t>) -> Option<SourceNode<'t>> {
        let container = first_descendant(root, self.container_kind())?;
        match self.container_field() {
            Some(field) => container.field(field),
            None => Some(container),
        }
    }
}

/// Immutable per-test parsing configuration.
///
/// A session owns the targeted language version plus the import lines
/// prepended to every wrapper. Sessions are plain values with no interior
/// mutability; one session can back any number of parses within a test
/// case, and each generated test case gets its own.
#[derive(Clone, Debug)]
pub struct ParseSession {
    version: JavaVersion,
    imported_types: IndexSet<String>,
    other_imports: Vec<String>,
}

impl ParseSession {
    /// Session with no imports.
    pub fn new(version: JavaVersion) -> Self {
        Self::builder(version).build()
    }

    pub fn builder(version: JavaVersion) -> ParseSessionBuilder {
        ParseSessionBuilder {
            version,
            imported_types: IndexSet::new(),
            other_imports: Vec::new(),
        }
    }

    pub fn version(&self) -> JavaVersion {
        self.version
    }

    /// Copy of this session targeting `version`, keeping the imports.
    pub fn for_version(&self, version: JavaVersion) -> ParseSession {
        ParseSession {
            version,
            ..self.clone()
        }
    }

    /// `import X;` lines for the wrapper: imported types first, then raw
    /// imports, each in insertion order.
    pub fn import_lines(&self) -> Vec<String> {
        self.imported_types
            .iter()
            .chain(self.other_imports.iter())
            .map(|import| format!("import {import};"))
            .collect()
    }

    /// Wrap `fragment` according to `kind` and parse the result.
    pub fn parse_root(&self, kind: FragmentKind, fragment: &str) -> Result<SourceTree> {
        let source = kind.wrap(&self.import_lines(), fragment);
        Ok(java::parse(self.version, &source)?)
    }

    /// Parse `fragment` and hand its anchor node to `inspect`.
    pub fn with_anchor<R>(
        &self,
        kind: FragmentKind,
        fragment: &str,
        inspect: impl FnOnce(SourceNode<'_>) -> R,
    ) -> Result<R> {
        let tree = self.parse_root(kind, fragment)?;
        let root = tree.root();
        let anchor = kind
            .anchor(&root)
            .ok_or_else(|| self.not_found(kind.container_kind(), kind, fragment))?;
        Ok(inspect(anchor))
    }

    /// Parse `fragment`, retrieve the anchor, and locate the single
    /// `target_kind` node reachable on a straight line, handing it to
    /// `inspect`.
    ///
    /// Fails with [`Error::NodeNotFound`] when the search bottoms out -
    /// it never falls back to a different node.
    pub fn find<R>(
        &self,
        kind: FragmentKind,
        fragment: &str,
        target_kind: &str,
        inspect: impl FnOnce(SourceNode<'_>) -> R,
    ) -> Result<R> {
        let tree = self.parse_root(kind, fragment)?;
        let root = tree.root();
        let node = kind
            .anchor(&root)
            .and_then(|anchor| find_on_straight_line(&anchor, target_kind))
            .ok_or_else(|| self.not_found(target_kind, kind, fragment))?;
        Ok(inspect(node))
    }

    /// [`find`](Self::find) for an expression fragment.
    pub fn parse_expression<R>(
        &self,
        fragment: &str,
        target_kind: &str,
        inspect: impl FnOnce(SourceNode<'_>) -> R,
    ) -> Result<R> {
        self.find(FragmentKind::Expression, fragment, target_kind, inspect)
    }

    /// [`find`](Self::find) for a statement fragment. Mind the semicolon.
    pub fn parse_statement<R>(
        &self,
        fragment: &str,
        target_kind: &str,
        inspect: impl FnOnce(SourceNode<'_>) -> R,
    ) -> Result<R> {
        self.find(FragmentKind::Statement, fragment, target_kind, inspect)
    }

    /// [`find`](Self::find) for a type fragment.
    pub fn parse_type<R>(
        &self,
        fragment: &str,
        target_kind: &str,
        inspect: impl FnOnce(SourceNode<'_>) -> R,
    ) -> Result<R> {
        self.find(FragmentKind::Type, fragment, target_kind, inspect)
    }

    fn not_found(&self, target_kind: &str, kind: FragmentKind, fragment: &str) -> Error {
        Error::NodeNotFound {
            kind: target_kind.to_owned(),
            construct: kind.construct_name(),
            fragment: fragment.to_owned(),
        }
    }
}

/// Builder for [`ParseSession`]; every helper returns the updated builder.
#[derive(Clone, Debug)]
pub struct ParseSessionBuilder {
    version: JavaVersion,
    imported_types: IndexSet<String>,
    other_imports: Vec<String>,
}

impl ParseSessionBuilder {
    /// Add a fully qualified type to import. Duplicates are collapsed;
    /// first insertion wins the position.
    pub fn with_import_type(mut self, qualified_name: impl Into<String>) -> Self {
        self.imported_types.insert(qualified_name.into());
        self
    }

    /// Add a raw import target (anything valid after `import `, without
    /// the keyword and semicolon), e.g. `java.util.*`.
    pub fn with_import(mut self, target: impl Into<String>) -> Self {
        self.other_imports.push(target.into());
        self
    }

    pub fn build(self) -> ParseSession {
        ParseSession {
            version: self.version,
            imported_types: self.imported_types,
            other_imports: self.other_imports,
        }
    }
}
