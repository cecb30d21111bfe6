//! Declaration file loading.
//!
//! The driver describes the packages it scanned as a JSON document; this
//! module turns that document into a [`Universe`]. Named types may be
//! referenced before they are declared.

use crate::error::{GenError, GenResult};
use crate::type_expr::{self, TypeExpr};
use crate::universe::{Member, Name, Package, Shape, Signature, TypeId, Universe};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Top-level declaration document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeclarationFile {
    #[serde(default)]
    pub packages: Vec<PackageDecl>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageDecl {
    /// Import path
    pub path: String,

    /// Package clause name (default: derived from the path)
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub source_path: Option<String>,

    #[serde(default)]
    pub comments: Vec<String>,

    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    Struct,
    Alias,
    Interface,
    Func,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,

    pub kind: DeclKind,

    #[serde(default)]
    pub comments: Vec<String>,

    #[serde(default)]
    pub second_closest_comments: Vec<String>,

    /// Struct members, in declaration order
    #[serde(default)]
    pub members: Vec<MemberDecl>,

    /// Alias target type expression
    #[serde(default)]
    pub underlying: Option<String>,

    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDecl {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default)]
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,

    /// `T` or `*T`
    pub receiver: String,

    #[serde(default)]
    pub params: Vec<String>,

    #[serde(default)]
    pub results: Vec<String>,
}

impl DeclarationFile {
    /// Load a declaration file from disk
    pub fn from_file(path: impl AsRef<Path>) -> GenResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            GenError::Declaration(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    /// Parse a declaration document
    pub fn from_json(content: &str) -> GenResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Resolve every declaration into a universe
    pub fn into_universe(self) -> GenResult<Universe> {
        let mut resolver = Resolver::default();

        for package in &self.packages {
            let mut pkg = Package::new(package.path.clone()).with_comments(package.comments.clone());
            if let Some(name) = &package.name {
                pkg.name = name.clone();
            }
            pkg.source_path = package.source_path.clone();
            resolver.universe.add_package(pkg)?;
        }

        // Types that need no other type to exist are declared up front so that
        // members and alias targets can refer to them in any order.
        for package in &self.packages {
            for decl in &package.types {
                let shape = match decl.kind {
                    DeclKind::Struct => Shape::Struct(Vec::new()),
                    DeclKind::Interface => Shape::Interface,
                    DeclKind::Func => Shape::Func,
                    DeclKind::Alias => {
                        let underlying = decl.underlying.clone().ok_or_else(|| {
                            GenError::Declaration(format!(
                                "alias {}.{} has no underlying type",
                                package.path, decl.name
                            ))
                        })?;
                        let name = Name::new(package.path.clone(), decl.name.clone());
                        if resolver.universe.lookup(&name).is_some()
                            || resolver.pending.contains_key(&name)
                        {
                            return Err(GenError::DuplicateType(name.to_string()));
                        }
                        resolver.pending.insert(name, underlying);
                        continue;
                    }
                };
                resolver
                    .universe
                    .declare(&package.path, &decl.name, shape)?;
            }
        }

        for package in &self.packages {
            for decl in &package.types {
                if decl.kind == DeclKind::Alias {
                    resolver.resolve_named(&Name::new(package.path.clone(), decl.name.clone()))?;
                }
            }
        }

        for package in &self.packages {
            let mut order = Vec::with_capacity(package.types.len());
            for decl in &package.types {
                let name = Name::new(package.path.clone(), decl.name.clone());
                let id = resolver
                    .universe
                    .lookup(&name)
                    .ok_or_else(|| GenError::UnknownType(name.to_string()))?;
                order.push(id);

                if decl.kind == DeclKind::Struct {
                    let members = decl
                        .members
                        .iter()
                        .map(|m| {
                            let ty = resolver.resolve(&m.ty, &package.path)?;
                            Ok(Member::new(m.name.clone(), ty).with_comments(m.comments.clone()))
                        })
                        .collect::<GenResult<Vec<_>>>()?;
                    resolver.universe.set_members(id, members)?;
                } else if !decl.members.is_empty() {
                    return Err(GenError::Declaration(format!(
                        "type {name} is not a struct but declares members"
                    )));
                }

                for method in &decl.methods {
                    let signature = Signature {
                        receiver: Some(resolver.resolve(&method.receiver, &package.path)?),
                        parameters: resolver.resolve_all(&method.params, &package.path)?,
                        results: resolver.resolve_all(&method.results, &package.path)?,
                    };
                    resolver
                        .universe
                        .add_method(id, method.name.clone(), signature);
                }

                let ty = resolver.universe.get_mut(id);
                ty.comment_lines = decl.comments.clone();
                ty.second_closest_comment_lines = decl.second_closest_comments.clone();
            }

            // Aliases were declared in resolution order, restore source order.
            if let Some(pkg) = resolver.universe.package_mut(&package.path) {
                pkg.types = order;
            }
        }

        Ok(resolver.universe)
    }
}

#[derive(Default)]
struct Resolver {
    universe: Universe,
    /// Alias name -> target expression, for aliases not declared yet
    pending: HashMap<Name, String>,
    resolving: HashSet<Name>,
}

impl Resolver {
    fn resolve(&mut self, expr: &str, package: &str) -> GenResult<TypeId> {
        let parsed = type_expr::parse(expr)?;
        self.resolve_expr(&parsed, package)
    }

    fn resolve_all(&mut self, exprs: &[String], package: &str) -> GenResult<Vec<TypeId>> {
        exprs.iter().map(|e| self.resolve(e, package)).collect()
    }

    fn resolve_expr(&mut self, expr: &TypeExpr, package: &str) -> GenResult<TypeId> {
        match expr {
            TypeExpr::Builtin(name) => Ok(self.universe.builtin(name)),
            TypeExpr::Named {
                package: qualifier,
                name,
            } => {
                let qualified = Name::new(qualifier.as_deref().unwrap_or(package), name.clone());
                self.resolve_named(&qualified)
            }
            TypeExpr::Pointer(elem) => {
                let elem = self.resolve_expr(elem, package)?;
                Ok(self.universe.pointer_to(elem))
            }
            TypeExpr::Slice(elem) => {
                let elem = self.resolve_expr(elem, package)?;
                Ok(self.universe.slice_of(elem))
            }
            TypeExpr::Map(key, value) => {
                let key = self.resolve_expr(key, package)?;
                let value = self.resolve_expr(value, package)?;
                Ok(self.universe.map_of(key, value))
            }
            TypeExpr::Interface(spelling) => Ok(self.universe.interface(spelling)),
            TypeExpr::Func(spelling) => Ok(self.universe.func(spelling)),
        }
    }

    fn resolve_named(&mut self, name: &Name) -> GenResult<TypeId> {
        if let Some(id) = self.universe.lookup(name) {
            return Ok(id);
        }
        let Some(target) = self.pending.get(name).cloned() else {
            return Err(GenError::UnknownType(name.to_string()));
        };
        if !self.resolving.insert(name.clone()) {
            return Err(GenError::Declaration(format!("alias cycle through {name}")));
        }

        let underlying = self.resolve(&target, &name.package)?;
        let id = self
            .universe
            .declare(&name.package, &name.name, Shape::Alias(underlying))?;

        self.pending.remove(name);
        self.resolving.remove(name);
        Ok(id)
    }
}
