//! DeepEqual method generation.
//!
//! Given a [`Universe`](deepequal_core::Universe) of declared types, this
//! crate selects the types that request a `DeepEqual` method, plans a
//! comparison for each one, and renders the plans as Go source.
//!
//! # Example
//!
//! ```
//! use deepequal_core::{DeclarationFile, GeneratorConfig};
//! use deepequal_gen::Generator;
//!
//! let universe = DeclarationFile::from_json(r#"{
//!     "packages": [ { "path": "example.com/a", "comments": ["+deepequal-gen=package"],
//!                     "types": [ { "name": "Tag", "kind": "alias", "underlying": "string" } ] } ]
//! }"#)?
//! .into_universe()?;
//!
//! let config = GeneratorConfig::default();
//! let outputs = Generator::new(&universe, &config).run()?;
//! assert!(outputs[0].render_methods().contains("func (in *Tag) DeepEqual(other *Tag) bool {"));
//! # Ok::<(), deepequal_core::GenError>(())
//! ```

pub mod directive;
pub mod eligibility;
pub mod emitter;
pub mod eval;
pub mod generator;
pub mod methods;
pub mod plan;
pub mod render;
pub mod shape;
pub mod writer;

pub use eligibility::{PackageSelection, comparable_type, needs_generation, select_packages};
pub use emitter::Emitter;
pub use eval::{EvalError, Evaluator, Value};
pub use generator::{Generator, PackageOutput, TypeMethod};
pub use methods::{DeepEqualMethod, MethodCache};
pub use plan::{ElementCheck, FieldCheck, FieldKind, Plan, PointeeCheck, SliceOrder};
pub use render::render_method;
