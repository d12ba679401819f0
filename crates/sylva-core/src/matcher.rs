//! Declarative structural matching of syntax nodes.
//!
//! A [`MatchSpec`] describes the expected shape of a node: its kind, a
//! set of attribute assertions, and an ordered list of per-child
//! expectations. [`match_node`] compares an actual node against a spec
//! recursively and returns a [`MatchOutcome`] value - matching never
//! throws and never mutates, so it is safe to run repeatedly.

use std::fmt;

use serde::Serialize;

use crate::node::SyntaxNode;

// ============================================================================
// Specs
// ============================================================================

/// Predicate applied to a named attribute's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AttrPredicate {
    /// Attribute text must equal the value exactly.
    Eq(String),
    /// Attribute text must contain the value as a substring.
    Contains(String),
}

impl AttrPredicate {
    fn holds(&self, actual: &str) -> bool {
        match self {
            AttrPredicate::Eq(expected) => actual == expected,
            AttrPredicate::Contains(part) => actual.contains(part.as_str()),
        }
    }
}

impl fmt::Display for AttrPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrPredicate::Eq(expected) => write!(f, "== \"{expected}\""),
            AttrPredicate::Contains(part) => write!(f, "contains \"{part}\""),
        }
    }
}

/// Single attribute assertion within a [`MatchSpec`].
#[derive(Debug, Clone, Serialize)]
pub struct AttrCheck {
    pub name: String,
    pub predicate: AttrPredicate,
}

/// Expectation for one child position.
#[derive(Debug, Clone, Serialize)]
pub enum ChildSpec {
    /// Recurse into a nested spec.
    Node(MatchSpec),
    /// Accept any subtree; still consumes the position.
    Any,
    /// Terminal assertion: the child's source text must equal the value.
    Text(String),
}

impl From<MatchSpec> for ChildSpec {
    fn from(spec: MatchSpec) -> Self {
        ChildSpec::Node(spec)
    }
}

/// Declarative expectation over a node's shape.
///
/// Build one with [`kind`](Self::kind) (or [`any`](Self::any)) and chain
/// the `attr_*` / `child*` helpers. Specs are plain values: `Clone` them
/// freely, one spec can back many generated test cases.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchSpec {
    kind: Option<String>,
    text: Option<String>,
    attrs: Vec<AttrCheck>,
    children: Vec<ChildSpec>,
    ignore_remaining: bool,
}

impl MatchSpec {
    /// Spec with no constraints at all; matches any node.
    pub fn any() -> Self {
        Self::default()
    }

    /// Spec constraining the node kind.
    pub fn kind(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    /// Require the node's full source text to equal `text`.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Require attribute `name` to equal `value`.
    pub fn attr_eq(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push(AttrCheck {
            name: name.into(),
            predicate: AttrPredicate::Eq(value.into()),
        });
        self
    }

    /// Require attribute `name` to contain `part`.
    pub fn attr_contains(mut self, name: impl Into<String>, part: impl Into<String>) -> Self {
        self.attrs.push(AttrCheck {
            name: name.into(),
            predicate: AttrPredicate::Contains(part.into()),
        });
        self
    }

    /// Append an expectation for the next child position.
    pub fn child(mut self, child: impl Into<ChildSpec>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a placeholder that accepts any subtree at the next position.
    pub fn child_any(self) -> Self {
        self.child(ChildSpec::Any)
    }

    /// Append a terminal text assertion for the next child position.
    pub fn child_text(self, text: impl Into<String>) -> Self {
        self.child(ChildSpec::Text(text.into()))
    }

    /// Stop inspecting children beyond the declared ones; the child count
    /// check relaxes from "exactly" to "at least" the declared number.
    pub fn ignore_remaining(mut self) -> Self {
        self.ignore_remaining = true;
        self
    }

    /// Spec mirroring `node`: same kind and the same children,
    /// recursively. Matching a node against its own reflection always
    /// succeeds.
    pub fn from_node<N: SyntaxNode>(node: &N) -> Self {
        let mut spec = Self::kind(node.kind());
        for child in node.children() {
            spec = spec.child(Self::from_node(&child));
        }
        spec
    }
}

// ============================================================================
// Outcomes
// ============================================================================

/// One step of a failure path: child kind plus its position in the parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStep {
    pub kind: String,
    pub index: usize,
}

/// Why a node failed its spec.
#[derive(Debug, Clone, Serialize)]
pub enum MismatchReason {
    Kind {
        expected: String,
        actual: String,
    },
    Attr {
        name: String,
        predicate: AttrPredicate,
        actual: Option<String>,
    },
    Text {
        expected: String,
        actual: String,
    },
    ChildCount {
        expected: usize,
        at_least: bool,
        actual: usize,
    },
}

impl fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MismatchReason::Kind { expected, actual } => {
                write!(f, "expected kind `{expected}`, was `{actual}`")
            }
            MismatchReason::Attr {
                name,
                predicate,
                actual: Some(actual),
            } => {
                write!(f, "attribute `{name}`: expected {predicate}, was \"{actual}\"")
            }
            MismatchReason::Attr {
                name,
                predicate,
                actual: None,
            } => {
                write!(f, "attribute `{name}`: expected {predicate}, but the attribute is absent")
            }
            MismatchReason::Text { expected, actual } => {
                write!(f, "expected text \"{expected}\", was \"{actual}\"")
            }
            MismatchReason::ChildCount {
                expected,
                at_least,
                actual,
            } => {
                let bound = if *at_least { "at least " } else { "" };
                write!(f, "expected {bound}{expected} children, was {actual}")
            }
        }
    }
}

/// First structural or attribute mismatch, with the path that reaches it.
///
/// The path lists the child steps from the node the match was invoked on
/// down to the failing node; an empty path means the match root itself
/// failed.
#[derive(Debug, Clone, Serialize)]
pub struct Mismatch {
    pub path: Vec<PathStep>,
    pub reason: MismatchReason,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "at matched node: {}", self.reason)
        } else {
            write!(f, "at ")?;
            for (position, step) in self.path.iter().enumerate() {
                if position > 0 {
                    write!(f, " > ")?;
                }
                write!(f, "{}[{}]", step.kind, step.index)?;
            }
            write!(f, ": {}", self.reason)
        }
    }
}

/// Result of a match: a value, never an error.
#[derive(Debug, Clone, Serialize)]
pub enum MatchOutcome {
    Pass,
    Fail(Mismatch),
}

impl MatchOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, MatchOutcome::Pass)
    }

    /// The mismatch, if the match failed.
    pub fn mismatch(&self) -> Option<&Mismatch> {
        match self {
            MatchOutcome::Pass => None,
            MatchOutcome::Fail(mismatch) => Some(mismatch),
        }
    }

    pub fn into_result(self) -> Result<(), Mismatch> {
        match self {
            MatchOutcome::Pass => Ok(()),
            MatchOutcome::Fail(mismatch) => Err(mismatch),
        }
    }
}

// ============================================================================
// Matching
// ============================================================================

/// Compare `node` against `spec`, recursively.
///
/// Checks run in order: kind, node text, attributes, child count, then
/// children positionally. The first failure short-circuits and is
/// reported with the path from `node` to the failing position.
pub fn match_node<N: SyntaxNode>(node: &N, spec: &MatchSpec) -> MatchOutcome {
    let mut path = Vec::new();
    match check(node, spec, &mut path) {
        Ok(()) => MatchOutcome::Pass,
        Err(mismatch) => MatchOutcome::Fail(mismatch),
    }
}

fn fail(path: &[PathStep], reason: MismatchReason) -> Mismatch {
    Mismatch {
        path: path.to_vec(),
        reason,
    }
}

fn check<N: SyntaxNode>(
    node: &N,
    spec: &MatchSpec,
    path: &mut Vec<PathStep>,
) -> Result<(), Mismatch> {
    if let Some(expected) = &spec.kind
        && node.kind() != expected
    {
        return Err(fail(
            path,
            MismatchReason::Kind {
                expected: expected.clone(),
                actual: node.kind().to_owned(),
            },
        ));
    }

    if let Some(expected) = &spec.text {
        let actual = node.text();
        if actual != *expected {
            return Err(fail(
                path,
                MismatchReason::Text {
                    expected: expected.clone(),
                    actual,
                },
            ));
        }
    }

    for attr in &spec.attrs {
        let actual = node.attr(&attr.name);
        let holds = actual
            .as_deref()
            .is_some_and(|text| attr.predicate.holds(text));
        if !holds {
            return Err(fail(
                path,
                MismatchReason::Attr {
                    name: attr.name.clone(),
                    predicate: attr.predicate.clone(),
                    actual,
                },
            ));
        }
    }

    let actual_count = node.child_count();
    let declared = spec.children.len();
    let count_ok = if spec.ignore_remaining {
        actual_count >= declared
    } else {
        actual_count == declared
    };
    if !count_ok {
        return Err(fail(
            path,
            MismatchReason::ChildCount {
                expected: declared,
                at_least: spec.ignore_remaining,
                actual: actual_count,
            },
        ));
    }

    for (index, child_spec) in spec.children.iter().enumerate() {
        let child = node.child(index).expect("index is below child_count");
        path.push(PathStep {
            kind: child.kind().to_owned(),
            index,
        });
        match child_spec {
            ChildSpec::Any => {}
            ChildSpec::Node(sub) => check(&child, sub, path)?,
            ChildSpec::Text(expected) => {
                let actual = child.text();
                if actual != *expected {
                    return Err(fail(
                        path,
                        MismatchReason::Text {
                            expected: expected.clone(),
                            actual,
                        },
                    ));
                }
            }
        }
        path.pop();
    }

    Ok(())
}
