//! Generated text for a small package, compared byte for byte.

#![allow(non_snake_case)]

use deepequal_core::{DeclarationFile, GeneratorConfig};
use deepequal_gen::Generator;

const DECLS: &str = r#"
{
  "packages": [
    {
      "path": "example.com/routes",
      "comments": ["+deepequal-gen=package"],
      "types": [
        { "name": "Point", "kind": "struct", "members": [
            { "name": "X", "type": "int" },
            { "name": "Label", "type": "*string" }
        ] },
        { "name": "Points", "kind": "alias", "underlying": "[]Point",
          "comments": ["Points is an unordered set of points.", "+deepequal-gen:unordered-array=true"] },
        { "name": "Route", "kind": "struct", "members": [
            { "name": "Origin", "type": "string" },
            { "name": "Stops", "type": "Points" },
            { "name": "Meta", "type": "map[string]string" }
        ] }
      ]
    }
  ]
}
"#;

#[test]
fn render_methods___routes_package___matches_golden() {
    let universe = DeclarationFile::from_json(DECLS)
        .unwrap()
        .into_universe()
        .unwrap();
    let config = GeneratorConfig::default();

    let outputs = Generator::new(&universe, &config).run().unwrap();

    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].render_methods(), include_str!("golden/routes.golden"));
}
