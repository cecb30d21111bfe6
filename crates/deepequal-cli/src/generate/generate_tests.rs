#![allow(non_snake_case)]

use super::*;

fn output(path: &str, source_path: Option<&str>) -> PackageOutput {
    PackageOutput {
        path: path.to_string(),
        name: deepequal_core::package_name_from_path(path),
        source_path: source_path.map(str::to_string),
        register: false,
        methods: Vec::new(),
    }
}

// header tests

#[test]
fn header___no_boilerplate___build_tag_and_marker() {
    let config = GeneratorConfig::default();

    assert_eq!(
        header(&config, ""),
        "// +build !ignore_autogenerated\n\n// Code generated by deepequal-gen. DO NOT EDIT.\n\n"
    );
}

#[test]
fn header___boilerplate___sits_between_tag_and_marker() {
    let config = GeneratorConfig {
        build_tag: "nodeepequal".into(),
        ..GeneratorConfig::default()
    };

    let text = header(&config, "/*\nLicensed.\n*/\n\n\n");

    assert_eq!(
        text,
        "// +build !nodeepequal\n\n/*\nLicensed.\n*/\n\n// Code generated by deepequal-gen. DO NOT EDIT.\n\n"
    );
}

// output_package_path tests

#[test]
fn output_package_path___default___import_path() {
    let config = GeneratorConfig::default();

    assert_eq!(output_package_path(&output("example.com/a", None), &config), "example.com/a");
}

#[test]
fn output_package_path___gen_package_path___overrides() {
    let config = GeneratorConfig {
        gen_package_path: Some("example.com/generated".into()),
        ..GeneratorConfig::default()
    };

    assert_eq!(
        output_package_path(&output("example.com/a", None), &config),
        "example.com/generated"
    );
}

#[test]
fn output_package_path___vendored_source___expanded() {
    let config = GeneratorConfig {
        output_base: Some("/go/src".into()),
        ..GeneratorConfig::default()
    };
    let vendored = output(
        "example.com/lib",
        Some("/go/src/example.com/app/vendor/example.com/lib"),
    );

    assert_eq!(
        output_package_path(&vendored, &config),
        "example.com/app/vendor/example.com/lib"
    );
}

#[test]
fn output_package_path___non_vendored_source___import_path() {
    let config = GeneratorConfig {
        output_base: Some("/go/src".into()),
        ..GeneratorConfig::default()
    };
    let plain = output("example.com/lib", Some("/go/src/example.com/lib"));

    assert_eq!(output_package_path(&plain, &config), "example.com/lib");
}

// render_file tests

#[test]
fn render_file___empty_package___header_and_clause_only() {
    let config = GeneratorConfig::default();

    let file = render_file(&output("example.com/api.v1", None), &config, "");

    assert_eq!(file.path, PathBuf::from("example.com/api.v1/deepequal_generated.go"));
    assert!(file.contents.ends_with("DO NOT EDIT.\n\npackage api\n"));
}

// apply tests

#[test]
fn GenerateArgs___apply___overrides_given_flags_only() {
    let args = GenerateArgs {
        build_tag: Some("custom".into()),
        bounding_dirs: vec!["example.com/a".into()],
        ..GenerateArgs::default()
    };
    let mut config = GeneratorConfig {
        output_file_base: "zz_generated.deepequal".into(),
        ..GeneratorConfig::default()
    };

    args.apply(&mut config);

    assert_eq!(config.build_tag, "custom");
    assert_eq!(config.output_file_base, "zz_generated.deepequal");
    assert_eq!(config.bounding_dirs, vec!["example.com/a".to_string()]);
}
