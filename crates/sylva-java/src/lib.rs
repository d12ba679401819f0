#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Java language binding for sylva.
//!
//! Provides the supported [`JavaVersion`] enumeration and tree-sitter
//! parsing via the bundled Java grammar, wrapped behind the
//! `sylva-core` node surface.

pub mod parse;
pub mod version;

pub use parse::{ParseError, SourceNode, SourceTree, parse};
pub use version::JavaVersion;
