//! String-to-matcher glue: parse a fragment, match the located node.

use sylva_core::{MatchOutcome, MatchSpec, match_node};

use crate::Result;
use crate::context::{FragmentKind, ParseSession};

/// Matcher applied to fragment strings.
///
/// `check` runs the full pipeline - wrap, parse, retrieve the anchor,
/// straight-line locate the target kind, match against the spec - as one
/// strict sequential step. Cloning is cheap enough that a single matcher
/// definition can back a whole batch of generated tests.
#[derive(Clone, Debug)]
pub struct FragmentMatcher {
    kind: FragmentKind,
    target_kind: String,
    spec: MatchSpec,
}

impl FragmentMatcher {
    pub fn new(kind: FragmentKind, target_kind: impl Into<String>, spec: MatchSpec) -> Self {
        Self {
            kind,
            target_kind: target_kind.into(),
            spec,
        }
    }

    pub fn target_kind(&self) -> &str {
        &self.target_kind
    }

    /// Apply this matcher to `subject` within `session`.
    ///
    /// Parse and locate problems surface as `Err`; a completed match is
    /// always `Ok` with the [`MatchOutcome`] value, pass or fail.
    pub fn check(&self, session: &ParseSession, subject: &str) -> Result<MatchOutcome> {
        session.find(self.kind, subject, &self.target_kind, |node| {
            match_node(&node, &self.spec)
        })
    }
}

/// Matcher for an expression fragment.
pub fn match_expr(target_kind: impl Into<String>, spec: MatchSpec) -> FragmentMatcher {
    FragmentMatcher::new(FragmentKind::Expression, target_kind, spec)
}

/// Matcher for a statement fragment.
pub fn match_stmt(target_kind: impl Into<String>, spec: MatchSpec) -> FragmentMatcher {
    FragmentMatcher::new(FragmentKind::Statement, target_kind, spec)
}

/// Matcher for a type fragment.
pub fn match_type(target_kind: impl Into<String>, spec: MatchSpec) -> FragmentMatcher {
    FragmentMatcher::new(FragmentKind::Type, target_kind, spec)
}
