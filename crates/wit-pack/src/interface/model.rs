//! Resolved interface model.
//!
//! Unlike the AST, every named reference here is known to resolve: a
//! [`Type::Named`] always has a matching entry in the owning interface's type
//! table and a [`Type::Handle`] always names a resource.

use indexmap::IndexMap;
use serde::Serialize;

/// Which side of the module boundary an interface describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Functions the module provides.
    Exports,
    /// Functions the module expects from its host.
    Imports,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exports => "exports",
            Self::Imports => "imports",
        }
    }
}

/// A parsed and resolved interface.
#[derive(Debug, Clone, PartialEq)]
pub struct Interface {
    pub(crate) name: String,
    pub(crate) direction: Direction,
    pub(crate) types: IndexMap<String, TypeDef>,
    pub(crate) functions: Vec<Function>,
}

impl Interface {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Type definitions in declaration order, imported ones first.
    pub fn types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }

    pub fn get_type(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    /// Freestanding functions in declaration order.
    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    pub fn resources(&self) -> impl Iterator<Item = (&TypeDef, &[Function])> {
        self.types.values().filter_map(|def| match &def.kind {
            TypeDefKind::Resource(methods) => Some((def, methods.as_slice())),
            _ => None,
        })
    }

    /// True when the interface declares neither types nor functions.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.functions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    pub name: String,
    pub docs: Option<String>,
    pub kind: TypeDefKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDefKind {
    Record(Vec<Field>),
    Variant(Vec<Case>),
    Enum(Vec<Case>),
    Flags(Vec<Case>),
    Union(Vec<Type>),
    Alias(Type),
    Resource(Vec<Function>),
}

/// Record field or function parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub docs: Option<String>,
    pub ty: Type,
}

/// Variant case, enum case or flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    pub name: String,
    pub docs: Option<String>,
    pub ty: Option<Type>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionKind {
    Freestanding,
    /// Takes the resource handle as an implicit first argument.
    Method { resource: String },
    Static { resource: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub docs: Option<String>,
    pub kind: FunctionKind,
    pub params: Vec<Field>,
    pub result: Option<Type>,
}

impl Function {
    pub fn resource(&self) -> Option<&str> {
        match &self.kind {
            FunctionKind::Freestanding => None,
            FunctionKind::Method { resource } | FunctionKind::Static { resource } => {
                Some(resource)
            }
        }
    }

    /// Name of the core-module export implementing this function.
    pub fn core_export_name(&self) -> String {
        match self.resource() {
            None => self.name.clone(),
            Some(resource) => format!("{resource}::{}", self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Bool,
    U8,
    U16,
    U32,
    U64,
    S8,
    S16,
    S32,
    S64,
    Float32,
    Float64,
    Char,
    String,
    List(Box<Type>),
    Option(Box<Type>),
    /// `None` on either side stands for `_`.
    Expected(Option<Box<Type>>, Option<Box<Type>>),
    Tuple(Vec<Type>),
    Named(String),
    Handle(String),
}

impl Type {
    /// Names of type definitions this type refers to, in order of appearance.
    pub fn references(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::List(inner) | Self::Option(inner) => inner.collect_references(out),
            Self::Expected(ok, err) => {
                for side in [ok, err].into_iter().flatten() {
                    side.collect_references(out);
                }
            }
            Self::Tuple(elements) => {
                for element in elements {
                    element.collect_references(out);
                }
            }
            Self::Named(name) | Self::Handle(name) => out.push(name),
            _ => {}
        }
    }
}

impl TypeDefKind {
    /// Types mentioned directly in the definition body. Resource method
    /// signatures are not part of a resource's shape.
    pub fn member_types(&self) -> Vec<&Type> {
        match self {
            Self::Record(fields) => fields.iter().map(|f| &f.ty).collect(),
            Self::Variant(cases) => cases.iter().filter_map(|c| c.ty.as_ref()).collect(),
            Self::Enum(_) | Self::Flags(_) | Self::Resource(_) => Vec::new(),
            Self::Union(types) => types.iter().collect(),
            Self::Alias(ty) => vec![ty],
        }
    }
}
