#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core engine for sylva: node surface, locator, and tree matcher.
//!
//! Three layers:
//! - [`node`] - the read-only surface a parsed tree must expose
//! - [`locate`] - unambiguous node location (straight-line descent)
//! - [`matcher`] - declarative structural matching with failure paths
//!
//! Everything here is parser-agnostic: the engine only sees the
//! [`SyntaxNode`] trait, never a concrete grammar.

pub mod locate;
pub mod matcher;
pub mod node;

#[cfg(test)]
mod fixture;
#[cfg(test)]
mod locate_tests;

pub use locate::{find_on_straight_line, first_descendant};
pub use matcher::{
    AttrPredicate, ChildSpec, MatchOutcome, MatchSpec, Mismatch, MismatchReason, PathStep,
    match_node,
};
pub use node::SyntaxNode;
