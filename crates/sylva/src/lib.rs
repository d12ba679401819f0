#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Declarative parser-regression testing DSL over tree-sitter syntax trees.
//!
//! A test author writes a source *fragment* (an expression, a statement,
//! or a type), sylva wraps it into a minimal compilable unit, parses it,
//! locates the node under test unambiguously, and matches its shape
//! against a declarative [`MatchSpec`]:
//!
//! ```
//! use sylva::{JavaVersion, MatchSpec, ParseSession, match_expr};
//!
//! let session = ParseSession::new(JavaVersion::latest());
//! let matcher = match_expr(
//!     "binary_expression",
//!     MatchSpec::kind("binary_expression")
//!         .attr_eq("operator", ">>")
//!         .ignore_remaining(),
//! );
//! assert!(matcher.check(&session, "1 >> 2").unwrap().is_pass());
//! ```
//!
//! The [`binder`] module expands one logical assertion into many named
//! test cases, one per targeted language version.

pub mod binder;
pub mod context;
pub mod fragment;

#[cfg(test)]
mod binder_tests;

pub use binder::{
    CaseFailure, CaseResult, FailedCase, GroupCtx, RunReport, TestCase, TestSet, TestSink,
    check_match,
    expect_parse_failure, group_tests, group_tests_per_version, per_version_tests, version_test,
};
pub use context::{FragmentKind, ParseSession, ParseSessionBuilder};
pub use fragment::{FragmentMatcher, match_expr, match_stmt, match_type};
pub use sylva_core::{
    AttrPredicate, ChildSpec, MatchOutcome, MatchSpec, Mismatch, MismatchReason, PathStep,
    SyntaxNode, match_node,
};
pub use sylva_java::{JavaVersion, ParseError, SourceNode, SourceTree};

/// Errors thrown by the wrap/parse/locate pipeline.
///
/// These two are the only error conditions that propagate as `Err`: they
/// mean the test is mis-authored or the parser rejected the input. A
/// failed *match* is not an error - see [`MatchOutcome`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The wrapped source text failed external parsing.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Straight-line search bottomed out without the requested kind.
    #[error("no `{kind}` node on a straight line in the given {construct}:\n\t{fragment}")]
    NodeNotFound {
        kind: String,
        construct: &'static str,
        fragment: String,
    },
}

/// Result type for parse/locate operations.
pub type Result<T> = std::result::Result<T, Error>;
