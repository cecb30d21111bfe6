#![allow(non_snake_case)]

use super::*;

#[test]
fn GenError___ineligible_target___displays_type_name() {
    let err = GenError::IneligibleTarget("example.com/pkg.Handle".into());

    let display = err.to_string();

    assert_eq!(
        display,
        "type example.com/pkg.Handle requests deepequal generation but is not comparable"
    );
}

#[test]
fn GenError___duplicate_directive___lists_values() {
    let err = GenError::DuplicateDirective {
        subject: "type example.com/pkg.T".into(),
        directive: "deepequal-gen".into(),
        count: 2,
        values: vec!["true".into(), "false".into()],
    };

    let display = err.to_string();

    assert!(display.contains("found 2 deepequal-gen tags"));
    assert!(display.contains("\"true\""));
    assert!(display.contains("\"false\""));
}

#[test]
fn GenError___unsupported_shape___names_context() {
    let err = GenError::unsupported_shape("interface{}", "member Handler", "example.com/pkg.Server");

    let display = err.to_string();

    assert_eq!(
        display,
        "hit an unsupported type interface{} for member Handler, from example.com/pkg.Server"
    );
    assert_eq!(err.category(), ErrorCategory::StructuralCoverage);
}

#[test]
fn GenError___from_serde_json___becomes_declaration_error() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err();

    let err: GenError = json_err.into();

    assert!(matches!(err, GenError::Declaration(_)));
    assert_eq!(err.category(), ErrorCategory::Input);
}

#[test]
fn GenError___from_toml___becomes_config_error() {
    let toml_err = toml::from_str::<toml::Table>("= broken").unwrap_err();

    let err: GenError = toml_err.into();

    assert!(matches!(err, GenError::Config(_)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn ErrorCategory___display___is_lowercase() {
    assert_eq!(ErrorCategory::Configuration.to_string(), "configuration");
    assert_eq!(
        ErrorCategory::StructuralCoverage.to_string(),
        "structural coverage"
    );
    assert_eq!(
        ErrorCategory::SignatureMismatch.to_string(),
        "signature mismatch"
    );
    assert_eq!(ErrorCategory::Input.to_string(), "input");
}
