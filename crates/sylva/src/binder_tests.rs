use std::sync::{Arc, Mutex};

use sylva_core::MatchSpec;
use sylva_java::JavaVersion;

use crate::binder::{
    TestSet, check_match, expect_parse_failure, group_tests, group_tests_per_version,
    per_version_tests, version_test,
};
use crate::context::{FragmentKind, ParseSession};
use crate::fragment::match_expr;

fn binary_with_operator(operator: &str) -> crate::fragment::FragmentMatcher {
    match_expr(
        "binary_expression",
        MatchSpec::kind("binary_expression")
            .attr_eq("operator", operator)
            .ignore_remaining(),
    )
}

#[test]
fn one_case_per_version_with_stable_names() {
    let mut set = TestSet::new();
    per_version_tests(
        &mut set,
        "shift is one token",
        &JavaVersion::J9.range_to(JavaVersion::J11),
        None,
        |_| Ok(()),
    );
    assert_eq!(
        set.names(),
        vec![
            "shift is one token (Java 9)",
            "shift is one token (Java 10)",
            "shift is one token (Java 11)",
        ]
    );
}

#[test]
fn focus_prefixes_only_the_focused_case() {
    let mut set = TestSet::new();
    per_version_tests(
        &mut set,
        "t",
        &JavaVersion::J9.range_to(JavaVersion::J11),
        Some(JavaVersion::J10),
        |_| Ok(()),
    );
    assert_eq!(
        set.names(),
        vec!["t (Java 9)", "f:t (Java 10)", "t (Java 11)"]
    );
}

#[test]
fn each_case_gets_a_session_for_its_own_version() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&seen);

    let mut set = TestSet::new();
    let versions = JavaVersion::J1_8.range_to(JavaVersion::J10);
    per_version_tests(&mut set, "record", &versions, None, move |session| {
        recorder.lock().unwrap().push(session.version());
        Ok(())
    });

    assert!(set.run().is_success());
    assert_eq!(*seen.lock().unwrap(), versions);
}

#[test]
fn version_test_registers_a_single_case() {
    let mut set = TestSet::new();
    version_test(&mut set, "latest only", JavaVersion::J11, |session| {
        check_match(&session, "1 >> 2", &binary_with_operator(">>"))
    });
    assert_eq!(set.names(), vec!["latest only (Java 11)"]);
    set.run().assert_success();
}

#[test]
fn group_cases_are_named_after_their_subject() {
    let mut set = TestSet::new();
    let session = ParseSession::new(JavaVersion::latest());
    group_tests(&mut set, "additive", session, |group| {
        group.expect("1+1", binary_with_operator("+"));
        group.expect("1-1", binary_with_operator("-"));
    });
    assert_eq!(set.names(), vec!["additive: '1+1'", "additive: '1-1'"]);
    set.run().assert_success();
}

#[test]
fn group_cases_fail_independently() {
    let mut set = TestSet::new();
    let session = ParseSession::new(JavaVersion::latest());
    group_tests(&mut set, "additive", session, |group| {
        group.expect("1+1", binary_with_operator("+"));
        group.expect("1*1", binary_with_operator("+"));
    });
    let report = set.run();
    assert_eq!(report.passed, vec!["additive: '1+1'"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].name, "additive: '1*1'");
    insta::assert_snapshot!(
        report,
        @r#"
    1 passed, 1 failed
      additive: '1*1': match failed: at matched node: attribute `operator`: expected == "+", was "*"
    "#
    );
}

#[test]
fn per_version_group_registers_the_whole_group_per_version() {
    let mut set = TestSet::new();
    group_tests_per_version(
        &mut set,
        "relational",
        &JavaVersion::J10.range_to(JavaVersion::J11),
        &ParseSession::new(JavaVersion::latest()),
        |group| {
            group.expect("a < b", binary_with_operator("<"));
            group.expect("a > b", binary_with_operator(">"));
        },
    );
    assert_eq!(set.len(), 4);
    set.run().assert_success();
}

#[test]
fn group_body_can_branch_on_the_version() {
    let mut set = TestSet::new();
    group_tests_per_version(
        &mut set,
        "shift",
        &JavaVersion::J1_7.range_to(JavaVersion::J1_8),
        &ParseSession::new(JavaVersion::latest()),
        |group| {
            if group.version() >= JavaVersion::J1_8 {
                group.expect("1 >> 2", binary_with_operator(">>"));
            }
        },
    );
    assert_eq!(set.names(), vec!["shift: '1 >> 2'"]);
}

#[test]
fn group_session_configuration_flows_into_cases() {
    let mut set = TestSet::new();
    let session = ParseSession::builder(JavaVersion::J1_8)
        .with_import_type("java.util.List")
        .build();
    group_tests(&mut set, "generic", session, |group| {
        assert_eq!(group.session().import_lines(), vec!["import java.util.List;"]);
        group.expect(
            "new java.util.ArrayList<String>()",
            match_expr(
                "object_creation_expression",
                MatchSpec::kind("object_creation_expression").ignore_remaining(),
            ),
        );
        // A malformed subject fails with the *group's* version in the
        // diagnostic, proving the case ran on the configured session.
        group.expect("1 +", binary_with_operator("+"));
    });
    let report = set.run();
    assert_eq!(report.passed, vec!["generic: 'new java.util.ArrayList<String>()'"]);
    assert_eq!(report.failed.len(), 1);
    assert!(
        report.failed[0].failure.contains("Java 1.8"),
        "got: {}",
        report.failed[0].failure
    );
}

#[test]
fn per_version_groups_keep_the_base_imports() {
    let mut set = TestSet::new();
    let base = ParseSession::builder(JavaVersion::latest())
        .with_import_type("java.util.Map")
        .build();
    group_tests_per_version(
        &mut set,
        "imports",
        &JavaVersion::J10.range_to(JavaVersion::J11),
        &base,
        |group| {
            assert_eq!(group.session().import_lines(), vec!["import java.util.Map;"]);
            group.expect("a + b", binary_with_operator("+"));
        },
    );
    assert_eq!(set.len(), 2);
    set.run().assert_success();
}

#[test]
fn expect_parse_failure_accepts_a_rejected_fragment() {
    let session = ParseSession::new(JavaVersion::latest());
    let result = expect_parse_failure(&session, FragmentKind::Expression, "1 +", "parse error");
    assert!(result.is_ok());
}

#[test]
fn expect_parse_failure_checks_the_message() {
    let session = ParseSession::new(JavaVersion::latest());
    let result = expect_parse_failure(
        &session,
        FragmentKind::Expression,
        "1 +",
        "no such diagnostic",
    );
    let failure = result.unwrap_err();
    assert!(failure.to_string().contains("no such diagnostic"));
}

#[test]
fn expect_parse_failure_rejects_a_valid_fragment() {
    let session = ParseSession::new(JavaVersion::latest());
    let result = expect_parse_failure(&session, FragmentKind::Expression, "1 + 2", "parse error");
    let failure = result.unwrap_err();
    assert!(failure.to_string().contains("parsed successfully"));
}

#[test]
#[should_panic(expected = "1 passed, 1 failed")]
fn assert_success_panics_with_the_report() {
    let mut set = TestSet::new();
    let session = ParseSession::new(JavaVersion::latest());
    group_tests(&mut set, "additive", session, |group| {
        group.expect("1+1", binary_with_operator("+"));
        group.expect("1*1", binary_with_operator("+"));
    });
    set.run().assert_success();
}

#[test]
fn report_serializes_for_external_tooling() {
    let mut set = TestSet::new();
    version_test(&mut set, "pass", JavaVersion::J11, |_| Ok(()));
    let report = set.run();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["passed"][0], "pass (Java 11)");
    assert_eq!(json["failed"].as_array().unwrap().len(), 0);
}
