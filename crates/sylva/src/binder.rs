//! Test-case binding: one declarative assertion, many named test cases.
//!
//! The binder never runs anything eagerly. Generators like
//! [`per_version_tests`] and [`group_tests`] push named [`TestCase`]s
//! into a [`TestSink`]; the default sink, [`TestSet`], runs them in
//! registration order and aggregates a [`RunReport`]. Every generated
//! case owns its [`ParseSession`] (a fresh one per version, or a copy of
//! the group's), so cases share no state and may be executed in any
//! order.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use sylva_core::{MatchOutcome, Mismatch};
use sylva_java::JavaVersion;

use crate::Error;
use crate::context::{FragmentKind, ParseSession};
use crate::fragment::FragmentMatcher;

// ============================================================================
// Cases and sinks
// ============================================================================

/// Why a generated case failed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CaseFailure {
    /// Parse or locate error: the test is mis-authored or the parser
    /// rejected the input.
    #[error(transparent)]
    Error(#[from] Error),

    /// The located node did not match its spec.
    #[error("match failed: {0}")]
    Mismatch(Mismatch),

    /// An explicit expectation (e.g. "parsing must fail") was not met.
    #[error("{0}")]
    Expectation(String),
}

/// Outcome of a single generated case.
pub type CaseResult = std::result::Result<(), CaseFailure>;

/// A single runnable, named test case.
pub struct TestCase {
    name: String,
    body: Box<dyn FnOnce() -> CaseResult + Send>,
}

impl TestCase {
    pub fn new(name: impl Into<String>, body: impl FnOnce() -> CaseResult + Send + 'static) -> Self {
        Self {
            name: name.into(),
            body: Box::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute the case, consuming it.
    pub fn run(self) -> (String, CaseResult) {
        let result = (self.body)();
        (self.name, result)
    }
}

/// Anything that can accept generated test cases.
pub trait TestSink {
    fn register(&mut self, case: TestCase);
}

/// Default sink: collects cases, runs them, aggregates a report.
#[derive(Default)]
pub struct TestSet {
    cases: Vec<TestCase>,
}

impl TestSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Registered case names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.cases.iter().map(TestCase::name).collect()
    }

    /// Run every case in registration order.
    pub fn run(self) -> RunReport {
        let mut report = RunReport::default();
        for case in self.cases {
            let (name, result) = case.run();
            match result {
                Ok(()) => report.passed.push(name),
                Err(failure) => report.failed.push(FailedCase {
                    name,
                    failure: failure.to_string(),
                }),
            }
        }
        report
    }
}

impl TestSink for TestSet {
    fn register(&mut self, case: TestCase) {
        self.cases.push(case);
    }
}

/// Aggregated outcome of a [`TestSet`] run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub passed: Vec<String>,
    pub failed: Vec<FailedCase>,
}

/// One failed case with its rendered failure.
#[derive(Debug, Clone, Serialize)]
pub struct FailedCase {
    pub name: String,
    pub failure: String,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Panic with the formatted failure list. For use at the end of an
    /// enclosing `#[test]` function.
    pub fn assert_success(&self) {
        if !self.is_success() {
            panic!("{self}");
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} passed, {} failed",
            self.passed.len(),
            self.failed.len()
        )?;
        for case in &self.failed {
            write!(f, "\n  {}: {}", case.name, case.failure)?;
        }
        Ok(())
    }
}

// ============================================================================
// Generators
// ============================================================================

/// Register one case per version, each named `"<name> (Java <version>)"`.
///
/// The focused version's case name carries an `f:` prefix so an outer
/// runner can filter to it; focus never changes which cases exist. Each
/// case receives a fresh import-free [`ParseSession`] for its version -
/// bodies needing imports build their own via
/// [`ParseSession::builder`].
pub fn per_version_tests<S, F>(
    sink: &mut S,
    name: &str,
    versions: &[JavaVersion],
    focus: Option<JavaVersion>,
    body: F,
) where
    S: TestSink + ?Sized,
    F: Fn(ParseSession) -> CaseResult + Send + Sync + 'static,
{
    let body = Arc::new(body);
    for &version in versions {
        let marker = if focus == Some(version) { "f:" } else { "" };
        let case_name = format!("{marker}{name} (Java {version})");
        let body = Arc::clone(&body);
        sink.register(TestCase::new(case_name, move || {
            body(ParseSession::new(version))
        }));
    }
}

/// Single-version form of [`per_version_tests`].
pub fn version_test<S, F>(sink: &mut S, name: &str, version: JavaVersion, body: F)
where
    S: TestSink + ?Sized,
    F: Fn(ParseSession) -> CaseResult + Send + Sync + 'static,
{
    per_version_tests(sink, name, &[version], None, body);
}

/// Grouped batch form: every [`GroupCtx::expect`] call inside `spec`
/// registers an independently named, independently failing case sharing
/// the `name` prefix.
///
/// The group establishes one `session`; its version and imports flow
/// into every registered case. Useful for grammar regression batches
/// where naming each `(input, expected shape)` pair individually is not
/// worth the bother.
pub fn group_tests<S>(
    sink: &mut S,
    name: &str,
    session: ParseSession,
    spec: impl FnOnce(&mut GroupCtx<'_>),
) where
    S: TestSink,
{
    let mut ctx = GroupCtx {
        sink,
        group_name: name,
        session,
    };
    spec(&mut ctx);
}

/// [`group_tests`] expanded over several versions; the whole group is
/// registered once per version, each time with a copy of `base`
/// retargeted to that version.
pub fn group_tests_per_version<S>(
    sink: &mut S,
    name: &str,
    versions: &[JavaVersion],
    base: &ParseSession,
    spec: impl Fn(&mut GroupCtx<'_>),
) where
    S: TestSink,
{
    for &version in versions {
        group_tests(sink, name, base.for_version(version), &spec);
    }
}

/// Registration context handed to a [`group_tests`] body.
pub struct GroupCtx<'a> {
    sink: &'a mut dyn TestSink,
    group_name: &'a str,
    session: ParseSession,
}

impl GroupCtx<'_> {
    pub fn version(&self) -> JavaVersion {
        self.session.version()
    }

    /// The session every registered case runs against.
    pub fn session(&self) -> &ParseSession {
        &self.session
    }

    /// Register the case `"<group>: '<subject>'"` applying `matcher` to
    /// `subject` in a copy of the group's session.
    pub fn expect(&mut self, subject: &str, matcher: FragmentMatcher) {
        let case_name = format!("{}: '{}'", self.group_name, subject);
        let session = self.session.clone();
        let subject = subject.to_owned();
        self.sink.register(TestCase::new(case_name, move || {
            check_match(&session, &subject, &matcher)
        }));
    }
}

// ============================================================================
// Assertion helpers
// ============================================================================

/// Apply `matcher` to `subject`, folding the outcome into a case result.
pub fn check_match(
    session: &ParseSession,
    subject: &str,
    matcher: &FragmentMatcher,
) -> CaseResult {
    match matcher.check(session, subject)? {
        MatchOutcome::Pass => Ok(()),
        MatchOutcome::Fail(mismatch) => Err(CaseFailure::Mismatch(mismatch)),
    }
}

/// Expect `fragment` to fail parsing, with an error message containing
/// `message_contains`.
///
/// The helper itself fails the case when parsing succeeds or when the
/// message lacks the substring.
pub fn expect_parse_failure(
    session: &ParseSession,
    kind: FragmentKind,
    fragment: &str,
    message_contains: &str,
) -> CaseResult {
    match session.parse_root(kind, fragment) {
        Ok(_) => Err(CaseFailure::Expectation(format!(
            "expected a parse error containing \"{message_contains}\", \
             but the {} parsed successfully: {fragment}",
            kind.construct_name()
        ))),
        Err(error) => {
            let message = error.to_string();
            if message.contains(message_contains) {
                Ok(())
            } else {
                Err(CaseFailure::Expectation(format!(
                    "parse error message lacks \"{message_contains}\": {message}"
                )))
            }
        }
    }
}
