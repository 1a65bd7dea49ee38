//! Library descriptors: the JSON the generated runtimes interpret.
//!
//! A descriptor lists every function with its core export, parameter types
//! and spill-area layout, plus the shape and layout of every named type.
//! Member keys are already converted to the target language's naming
//! convention, so the runtimes never transform names.

use indexmap::IndexMap;
use serde::Serialize;

use crate::abi::{FlagsLayout, Int, Layout, LayoutResult, RecordLayout, SizeAlign, VariantLayout};
use crate::interface::{Function, FunctionKind, Interface, Type, TypeDefKind};
use crate::{Error, Result};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    pub interface: String,
    pub types: IndexMap<String, TypeDefDesc>,
    pub functions: Vec<FunctionDesc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TypeDefDesc {
    Record {
        size: u32,
        align: u32,
        fields: Vec<FieldDesc>,
    },
    Variant {
        layout: VariantLayout,
        cases: Vec<CaseDesc>,
    },
    Enum {
        discriminant: Int,
        cases: Vec<String>,
    },
    Flags {
        layout: FlagsLayout,
        flags: Vec<FlagDesc>,
    },
    Union {
        layout: VariantLayout,
        cases: Vec<TypeDesc>,
    },
    Alias {
        #[serde(rename = "type")]
        ty: TypeDesc,
    },
    Resource {
        /// Core export releasing a handle.
        drop: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldDesc {
    pub name: String,
    pub key: String,
    pub offset: u32,
    #[serde(rename = "type")]
    pub ty: TypeDesc,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseDesc {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Option<TypeDesc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlagDesc {
    pub name: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TypeDesc {
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
    List {
        element: Box<TypeDesc>,
        element_size: u32,
        element_align: u32,
    },
    Option {
        payload: Box<TypeDesc>,
        layout: VariantLayout,
    },
    Expected {
        ok: Option<Box<TypeDesc>>,
        err: Option<Box<TypeDesc>>,
        layout: VariantLayout,
    },
    Tuple {
        elements: Vec<TypeDesc>,
        offsets: Vec<u32>,
        size: u32,
        align: u32,
    },
    Named {
        name: String,
    },
    Handle {
        resource: String,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDesc {
    pub name: String,
    /// Core export implementing the function.
    pub export: String,
    pub kind: &'static str,
    pub resource: Option<String>,
    pub params: Vec<ParamDesc>,
    /// Spill area the arguments are written into before the call.
    pub args: RecordLayout,
    pub result: Option<TypeDesc>,
    pub result_layout: Option<Layout>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParamDesc {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDesc,
}

/// Name of the core export releasing handles of `resource`.
pub fn drop_export(resource: &str) -> String {
    format!("canonical_abi_drop_{resource}")
}

impl Descriptor {
    /// Describe `interface`, converting member names with `key`.
    ///
    /// Fails with `UnsupportedType` when a layout does not fit in 32-bit
    /// memory.
    pub fn new(interface: &Interface, key: fn(&str) -> String) -> Result<Self> {
        let sizes = SizeAlign::new(interface);
        let mut types = IndexMap::new();
        for def in interface.types() {
            let desc = describe_def(&sizes, &def.kind, &def.name, key)
                .map_err(|_| too_large(format!("type `{}`", def.name)))?;
            types.insert(def.name.clone(), desc);
        }

        let methods = interface.resources().flat_map(|(_, methods)| methods.iter());
        let mut functions = Vec::new();
        for function in interface.functions().iter().chain(methods) {
            let desc = describe_function(&sizes, function)
                .map_err(|_| too_large(format!("a signature of function `{}`", function.name)))?;
            functions.push(desc);
        }

        Ok(Self {
            interface: interface.name().to_string(),
            types,
            functions,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::internal(format!("failed to serialize descriptor: {e}")))
    }
}

fn too_large(what: String) -> Error {
    Error::unsupported_type(format!("{what} is larger than 4 GiB"))
}

fn describe_def(
    sizes: &SizeAlign<'_>,
    kind: &TypeDefKind,
    name: &str,
    key: fn(&str) -> String,
) -> LayoutResult<TypeDefDesc> {
    let desc = match kind {
        TypeDefKind::Record(fields) => {
            let layout = sizes.record(fields.iter().map(|f| &f.ty))?;
            let mut described = Vec::with_capacity(fields.len());
            for (field, &offset) in fields.iter().zip(&layout.offsets) {
                described.push(FieldDesc {
                    name: field.name.clone(),
                    key: key(&field.name),
                    offset,
                    ty: describe(sizes, &field.ty)?,
                });
            }
            TypeDefDesc::Record {
                size: layout.size,
                align: layout.align,
                fields: described,
            }
        }
        TypeDefKind::Variant(cases) => TypeDefDesc::Variant {
            layout: sizes.variant(cases.iter().map(|c| c.ty.as_ref()))?,
            cases: cases
                .iter()
                .map(|case| {
                    Ok(CaseDesc {
                        name: case.name.clone(),
                        ty: case.ty.as_ref().map(|ty| describe(sizes, ty)).transpose()?,
                    })
                })
                .collect::<LayoutResult<_>>()?,
        },
        TypeDefKind::Enum(cases) => TypeDefDesc::Enum {
            discriminant: Int::for_cases(cases.len()),
            cases: cases.iter().map(|c| c.name.clone()).collect(),
        },
        TypeDefKind::Flags(flags) => TypeDefDesc::Flags {
            layout: SizeAlign::flags(flags.len()),
            flags: flags
                .iter()
                .map(|flag| FlagDesc {
                    name: flag.name.clone(),
                    key: key(&flag.name),
                })
                .collect(),
        },
        TypeDefKind::Union(types) => TypeDefDesc::Union {
            layout: sizes.variant(types.iter().map(Some))?,
            cases: types
                .iter()
                .map(|ty| describe(sizes, ty))
                .collect::<LayoutResult<_>>()?,
        },
        TypeDefKind::Alias(ty) => TypeDefDesc::Alias {
            ty: describe(sizes, ty)?,
        },
        TypeDefKind::Resource(_) => TypeDefDesc::Resource {
            drop: drop_export(name),
        },
    };
    Ok(desc)
}

fn describe_function(sizes: &SizeAlign<'_>, function: &Function) -> LayoutResult<FunctionDesc> {
    let mut params = Vec::with_capacity(function.params.len() + 1);
    if let FunctionKind::Method { resource } = &function.kind {
        params.push(ParamDesc {
            name: "self".to_string(),
            ty: TypeDesc::Handle {
                resource: resource.clone(),
            },
        });
    }
    for param in &function.params {
        params.push(ParamDesc {
            name: param.name.clone(),
            ty: describe(sizes, &param.ty)?,
        });
    }

    let param_types = params_types(function);
    let kind = match function.kind {
        FunctionKind::Freestanding => "freestanding",
        FunctionKind::Method { .. } => "method",
        FunctionKind::Static { .. } => "static",
    };

    Ok(FunctionDesc {
        name: function.name.clone(),
        export: function.core_export_name(),
        kind,
        resource: function.resource().map(str::to_string),
        params,
        args: sizes.record(&param_types)?,
        result: function.result.as_ref().map(|ty| describe(sizes, ty)).transpose()?,
        result_layout: function.result.as_ref().map(|ty| sizes.layout(ty)).transpose()?,
    })
}

/// Parameter types as passed in the spill area, the implicit handle first.
fn params_types(function: &Function) -> Vec<Type> {
    let mut types = Vec::with_capacity(function.params.len() + 1);
    if let FunctionKind::Method { resource } = &function.kind {
        types.push(Type::Handle(resource.clone()));
    }
    types.extend(function.params.iter().map(|p| p.ty.clone()));
    types
}

pub fn describe(sizes: &SizeAlign<'_>, ty: &Type) -> LayoutResult<TypeDesc> {
    let desc = match ty {
        Type::Bool => TypeDesc::Bool,
        Type::U8 => TypeDesc::U8,
        Type::U16 => TypeDesc::U16,
        Type::U32 => TypeDesc::U32,
        Type::U64 => TypeDesc::U64,
        Type::S8 => TypeDesc::S8,
        Type::S16 => TypeDesc::S16,
        Type::S32 => TypeDesc::S32,
        Type::S64 => TypeDesc::S64,
        Type::Float32 => TypeDesc::Float32,
        Type::Float64 => TypeDesc::Float64,
        Type::Char => TypeDesc::Char,
        Type::String => TypeDesc::String,
        Type::List(element) => {
            let layout = sizes.layout(element)?;
            TypeDesc::List {
                element: Box::new(describe(sizes, element)?),
                element_size: layout.size,
                element_align: layout.align,
            }
        }
        Type::Option(payload) => TypeDesc::Option {
            payload: Box::new(describe(sizes, payload)?),
            layout: sizes.variant([None, Some(payload.as_ref())])?,
        },
        Type::Expected(ok, err) => TypeDesc::Expected {
            ok: describe_boxed(sizes, ok.as_deref())?,
            err: describe_boxed(sizes, err.as_deref())?,
            layout: sizes.variant([ok.as_deref(), err.as_deref()])?,
        },
        Type::Tuple(elements) => {
            let layout = sizes.record(elements)?;
            TypeDesc::Tuple {
                elements: elements
                    .iter()
                    .map(|t| describe(sizes, t))
                    .collect::<LayoutResult<_>>()?,
                offsets: layout.offsets,
                size: layout.size,
                align: layout.align,
            }
        }
        Type::Named(name) => TypeDesc::Named { name: name.clone() },
        Type::Handle(resource) => TypeDesc::Handle {
            resource: resource.clone(),
        },
    };
    Ok(desc)
}

fn describe_boxed(sizes: &SizeAlign<'_>, ty: Option<&Type>) -> LayoutResult<Option<Box<TypeDesc>>> {
    ty.map(|t| describe(sizes, t).map(Box::new)).transpose()
}
