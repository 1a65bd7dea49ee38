//! Syntax tree produced by the parser.
//!
//! Names are stored unescaped (a leading `%` is stripped) and every node
//! keeps the span the resolver needs for its diagnostics.

use crate::diagnostics::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

/// Doc comment lines with the `///` marker and one leading space removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Docs {
    pub lines: Vec<String>,
}

impl Docs {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn contents(&self) -> Option<String> {
        if self.lines.is_empty() {
            None
        } else {
            Some(self.lines.join("\n"))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Use(Use),
    TypeDef(TypeDef),
    Function(Function),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Use {
    pub names: Vec<UseName>,
    pub from: Ident,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseName {
    pub name: Ident,
    pub alias: Option<Ident>,
}

impl UseName {
    /// Name the imported definition is known by locally.
    pub fn local(&self) -> &Ident {
        self.alias.as_ref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    pub docs: Docs,
    pub name: Ident,
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

impl TypeDefKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Record(_) => "record",
            Self::Variant(_) => "variant",
            Self::Enum(_) => "enum",
            Self::Flags(_) => "flags",
            Self::Union(_) => "union",
            Self::Alias(_) => "type",
            Self::Resource(_) => "resource",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub docs: Docs,
    pub name: Ident,
    pub ty: Type,
}

/// Variant case, enum case or flag. Only variant cases carry a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    pub docs: Docs,
    pub name: Ident,
    pub ty: Option<Type>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub docs: Docs,
    pub name: Ident,
    pub is_static: bool,
    pub params: Vec<Field>,
    pub result: Option<Type>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub kind: TypeKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
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
    /// `_`; only meaningful inside `expected`
    Unit,
    List(Box<Type>),
    Option(Box<Type>),
    Expected(Box<Type>, Box<Type>),
    Tuple(Vec<Type>),
    Named(Ident),
}

impl TypeKind {
    /// Builtin type for an identifier, if it names one.
    pub fn primitive(name: &str) -> Option<TypeKind> {
        Some(match name {
            "bool" => Self::Bool,
            "u8" => Self::U8,
            "u16" => Self::U16,
            "u32" => Self::U32,
            "u64" => Self::U64,
            "s8" => Self::S8,
            "s16" => Self::S16,
            "s32" => Self::S32,
            "s64" => Self::S64,
            "float32" => Self::Float32,
            "float64" => Self::Float64,
            "char" => Self::Char,
            "string" => Self::String,
            _ => return None,
        })
    }
}

/// Names the type grammar reserves: primitives plus the generic constructors.
pub fn is_builtin_type_name(name: &str) -> bool {
    TypeKind::primitive(name).is_some()
        || matches!(name, "list" | "option" | "expected" | "tuple")
}
