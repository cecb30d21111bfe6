#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// ============================================================================
// Parameterized category mapping tests
// ============================================================================

#[test_case(
    GenError::DuplicateDirective {
        subject: "s".into(),
        directive: "d".into(),
        count: 2,
        values: vec![],
    },
    ErrorCategory::Configuration
)]
#[test_case(
    GenError::UnsupportedDirectiveParam {
        subject: "s".into(),
        directive: "d".into(),
        param: "p".into(),
    },
    ErrorCategory::Configuration
)]
#[test_case(
    GenError::TooManyDirectiveValues {
        subject: "s".into(),
        directive: "d".into(),
        value: "a,b".into(),
    },
    ErrorCategory::Configuration
)]
#[test_case(
    GenError::UnsupportedDirectiveValue {
        subject: "s".into(),
        directive: "d".into(),
        value: "maybe".into(),
    },
    ErrorCategory::Configuration
)]
#[test_case(GenError::IneligibleTarget("T".into()), ErrorCategory::Configuration)]
#[test_case(GenError::Config("bad".into()), ErrorCategory::Configuration)]
#[test_case(
    GenError::unsupported_shape("interface{}", "member X", "T"),
    ErrorCategory::StructuralCoverage
)]
#[test_case(
    GenError::InvalidSignature {
        type_name: "T".into(),
        method: "DeepEqual".into(),
        reason: "r".into(),
    },
    ErrorCategory::SignatureMismatch
)]
#[test_case(GenError::UnknownType("T".into()), ErrorCategory::Input)]
#[test_case(
    GenError::InvalidTypeExpr {
        expr: "[".into(),
        reason: "r".into(),
    },
    ErrorCategory::Input
)]
#[test_case(GenError::DuplicateType("T".into()), ErrorCategory::Input)]
#[test_case(GenError::Declaration("bad".into()), ErrorCategory::Input)]
fn GenError___variant___maps_to_category(error: GenError, expected: ErrorCategory) {
    assert_eq!(error.category(), expected);
}

// ============================================================================
// Parameterized exit code tests
// ============================================================================

#[test_case(GenError::Config("x".into()), 2)]
#[test_case(GenError::unsupported_shape("func()", "member F", "T"), 3)]
#[test_case(
    GenError::InvalidSignature {
        type_name: "T".into(),
        method: "Equal".into(),
        reason: "r".into(),
    },
    4
)]
#[test_case(GenError::UnknownType("T".into()), 5)]
fn GenError___exit_code___follows_category(error: GenError, expected: i32) {
    assert_eq!(error.exit_code(), expected);
}

// ============================================================================
// Parameterized message preservation tests
// ============================================================================

#[test_case(GenError::IneligibleTarget("pkg.Handle".into()), "pkg.Handle")]
#[test_case(GenError::Config("bounding dir is empty".into()), "bounding dir is empty")]
#[test_case(GenError::UnknownType("pkg.Missing".into()), "pkg.Missing")]
#[test_case(GenError::DuplicateType("pkg.Twice".into()), "pkg.Twice")]
#[test_case(GenError::Declaration("missing field".into()), "missing field")]
#[test_case(
    GenError::InvalidSignature {
        type_name: "pkg.T".into(),
        method: "DeepEqual".into(),
        reason: "expected bool result type".into(),
    },
    "expected bool result type"
)]
fn GenError___message_variants___preserve_details(error: GenError, expected_part: &str) {
    let display = error.to_string();

    assert!(
        display.contains(expected_part),
        "Error message '{}' should contain '{}'",
        display,
        expected_part
    );
}
