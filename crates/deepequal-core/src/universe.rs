//! The type universe consumed by the generator.
//!
//! A [`Universe`] owns every type node the driver knows about: declared
//! structs and aliases, builtins, and the unnamed type literals (`*T`, `[]T`,
//! `map[K]V`) they reference. Type literals are interned, so two references
//! spelled the same way share one [`TypeId`].
//!
//! The generator only ever reads the universe. Synthetic `DeepEqual`
//! descriptors for generated types live in a separate cache owned by the
//! generator, not in the method sets stored here.

use crate::error::{GenError, GenResult};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Index of a type node inside its [`Universe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    /// Position of the type in the universe's arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Qualified type name.
///
/// Builtins and type literals have an empty package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Name {
    pub package: String,
    pub name: String,
}

impl Name {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// A name without a package (builtins, type literals)
    pub fn unqualified(name: impl Into<String>) -> Self {
        Self::new("", name)
    }

    /// Go export rule: the first character is an upper case letter
    pub fn is_exported(&self) -> bool {
        self.name.chars().next().is_some_and(char::is_uppercase)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.package, self.name)
        }
    }
}

/// Shape category of a type node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Primitive,
    Struct,
    Slice,
    Map,
    Pointer,
    Alias,
    Interface,
    Func,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Kind::Primitive => "primitive",
            Kind::Struct => "struct",
            Kind::Slice => "slice",
            Kind::Map => "map",
            Kind::Pointer => "pointer",
            Kind::Alias => "alias",
            Kind::Interface => "interface",
            Kind::Func => "func",
        };
        f.write_str(s)
    }
}

/// Structure of a type node, with references to the types it is built from.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Primitive,
    Struct(Vec<Member>),
    Slice(TypeId),
    Map { key: TypeId, value: TypeId },
    Pointer(TypeId),
    /// A declared type whose definition is another type (`type A B`)
    Alias(TypeId),
    Interface,
    Func,
}

impl Shape {
    pub fn kind(&self) -> Kind {
        match self {
            Shape::Primitive => Kind::Primitive,
            Shape::Struct(_) => Kind::Struct,
            Shape::Slice(_) => Kind::Slice,
            Shape::Map { .. } => Kind::Map,
            Shape::Pointer(_) => Kind::Pointer,
            Shape::Alias(_) => Kind::Alias,
            Shape::Interface => Kind::Interface,
            Shape::Func => Kind::Func,
        }
    }
}

/// A named field of a struct type.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub name: String,
    pub ty: TypeId,
    /// Raw comment lines attached to the field
    pub comments: Vec<String>,
}

impl Member {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
            comments: Vec::new(),
        }
    }

    pub fn with_comments<I, S>(mut self, comments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.comments = comments.into_iter().map(Into::into).collect();
        self
    }
}

/// Method signature metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    /// `T` or `*T`; `None` only for malformed input
    pub receiver: Option<TypeId>,
    pub parameters: Vec<TypeId>,
    pub results: Vec<TypeId>,
}

/// A type node.
#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    pub name: Name,
    pub shape: Shape,
    /// Method name -> signature, ordered for stable iteration
    pub methods: BTreeMap<String, Signature>,
    /// Doc comment lines directly above the declaration
    pub comment_lines: Vec<String>,
    /// The comment block separated from the declaration by one blank line
    pub second_closest_comment_lines: Vec<String>,
}

impl Type {
    fn new(name: Name, shape: Shape) -> Self {
        Self {
            name,
            shape,
            methods: BTreeMap::new(),
            comment_lines: Vec::new(),
            second_closest_comment_lines: Vec::new(),
        }
    }

    pub fn kind(&self) -> Kind {
        self.shape.kind()
    }

    /// The full comment set directives are read from
    pub fn comments(&self) -> Vec<String> {
        self.second_closest_comment_lines
            .iter()
            .chain(&self.comment_lines)
            .cloned()
            .collect()
    }

    /// Struct members, empty for every other shape
    pub fn members(&self) -> &[Member] {
        match &self.shape {
            Shape::Struct(members) => members,
            _ => &[],
        }
    }
}

/// A source package and the types it declares, in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Package {
    /// Import path
    pub path: String,
    /// Package clause name
    pub name: String,
    /// Directory the package was read from, if known
    pub source_path: Option<String>,
    /// Package-level comment lines (`doc.go` style)
    pub comments: Vec<String>,
    pub types: Vec<TypeId>,
}

impl Package {
    /// Create a package whose clause name is derived from its path
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = package_name_from_path(&path);
        Self {
            path,
            name,
            ..Self::default()
        }
    }

    pub fn with_comments<I, S>(mut self, comments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.comments = comments.into_iter().map(Into::into).collect();
        self
    }
}

/// Last path element, cut at the first `.` (`gopkg.in/yaml.v2` -> `yaml`)
pub fn package_name_from_path(path: &str) -> String {
    let base = path.rsplit('/').next().unwrap_or(path);
    base.split('.').next().unwrap_or(base).to_string()
}

/// Arena of type nodes plus the package list.
#[derive(Debug, Default)]
pub struct Universe {
    types: Vec<Type>,
    index: HashMap<Name, TypeId>,
    packages: Vec<Package>,
}

impl Universe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a type node.
    ///
    /// Ids are only minted by this universe, so a foreign id is a caller bug.
    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id.index()]
    }

    pub fn get_mut(&mut self, id: TypeId) -> &mut Type {
        &mut self.types[id.index()]
    }

    pub fn lookup(&self, name: &Name) -> Option<TypeId> {
        self.index.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Qualified display name of a type
    pub fn type_name(&self, id: TypeId) -> String {
        self.get(id).name.to_string()
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn package(&self, path: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.path == path)
    }

    pub fn package_mut(&mut self, path: &str) -> Option<&mut Package> {
        self.packages.iter_mut().find(|p| p.path == path)
    }

    /// Register a package; types declared into it keep their order
    pub fn add_package(&mut self, package: Package) -> GenResult<()> {
        if self.package(&package.path).is_some() {
            return Err(GenError::Declaration(format!(
                "package {} declared twice",
                package.path
            )));
        }
        self.packages.push(package);
        Ok(())
    }

    /// Intern a builtin type by name; `error` is interface shaped
    pub fn builtin(&mut self, name: &str) -> TypeId {
        let shape = if name == "error" {
            Shape::Interface
        } else {
            Shape::Primitive
        };
        self.intern(Name::unqualified(name), shape)
    }

    pub fn bool(&mut self) -> TypeId {
        self.builtin("bool")
    }

    pub fn pointer_to(&mut self, elem: TypeId) -> TypeId {
        let name = format!("*{}", self.get(elem).name);
        self.intern(Name::unqualified(name), Shape::Pointer(elem))
    }

    pub fn slice_of(&mut self, elem: TypeId) -> TypeId {
        let name = format!("[]{}", self.get(elem).name);
        self.intern(Name::unqualified(name), Shape::Slice(elem))
    }

    pub fn map_of(&mut self, key: TypeId, value: TypeId) -> TypeId {
        let name = format!("map[{}]{}", self.get(key).name, self.get(value).name);
        self.intern(Name::unqualified(name), Shape::Map { key, value })
    }

    /// An interface type literal, identified by its spelling
    pub fn interface(&mut self, spelling: &str) -> TypeId {
        self.intern(Name::unqualified(spelling), Shape::Interface)
    }

    /// A func type literal, identified by its spelling
    pub fn func(&mut self, spelling: &str) -> TypeId {
        self.intern(Name::unqualified(spelling), Shape::Func)
    }

    /// Declare a named type in a package.
    ///
    /// The package is registered on first use.
    pub fn declare(&mut self, package: &str, name: &str, shape: Shape) -> GenResult<TypeId> {
        let qualified = Name::new(package, name);
        if self.index.contains_key(&qualified) {
            return Err(GenError::DuplicateType(qualified.to_string()));
        }
        let id = self.push(Type::new(qualified, shape));

        if self.package(package).is_none() {
            self.packages.push(Package::new(package));
        }
        if let Some(pkg) = self.packages.iter_mut().find(|p| p.path == package) {
            pkg.types.push(id);
        }
        Ok(id)
    }

    /// Replace the members of a declared struct
    pub fn set_members(&mut self, id: TypeId, members: Vec<Member>) -> GenResult<()> {
        let ty = self.get_mut(id);
        match &mut ty.shape {
            Shape::Struct(existing) => {
                *existing = members;
                Ok(())
            }
            other => Err(GenError::Declaration(format!(
                "type {} is a {}, not a struct",
                ty.name,
                other.kind()
            ))),
        }
    }

    pub fn add_method(&mut self, id: TypeId, name: impl Into<String>, signature: Signature) {
        self.get_mut(id).methods.insert(name.into(), signature);
    }

    fn intern(&mut self, name: Name, shape: Shape) -> TypeId {
        if let Some(id) = self.index.get(&name) {
            return *id;
        }
        self.push(Type::new(name, shape))
    }

    fn push(&mut self, ty: Type) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.index.insert(ty.name.clone(), id);
        self.types.push(ty);
        id
    }
}
