//! Canonical-ABI memory layout of interface types.
//!
//! Generated bindings never compute layouts themselves: every size,
//! alignment and offset they need is computed here and shipped in the
//! library descriptor.
//!
//! Rules:
//! - scalars are naturally aligned, `char` and handles are 32-bit
//! - `string` and `list<T>` are a `(ptr, len)` pair of 32-bit words
//! - records and tuples lay fields out in order, each aligned to itself
//! - variants (and `enum`, `option`, `expected`, `union`) store the
//!   smallest discriminant that fits the case count, then the payload
//!   aligned to the widest case
//! - flags pack into the smallest integer that fits, or 32-bit words
//!
//! Sizes are `u32` like the 32-bit linear memory they describe. A type that
//! does not fit is an [`Overflow`], never a wrapped offset.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::Serialize;

use crate::interface::{Interface, Type, TypeDefKind};

/// A size or offset went past `u32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("layout is larger than 4 GiB")]
pub struct Overflow;

pub type LayoutResult<T> = std::result::Result<T, Overflow>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub size: u32,
    pub align: u32,
}

impl Layout {
    pub const EMPTY: Layout = Layout { size: 0, align: 1 };

    pub fn scalar(size: u32) -> Layout {
        Layout { size, align: size }
    }
}

/// Integer type used for discriminants and small flag sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Int {
    U8,
    U16,
    U32,
}

impl Int {
    pub fn size(self) -> u32 {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
        }
    }

    /// Smallest integer able to number `cases` cases.
    pub fn for_cases(cases: usize) -> Int {
        if cases <= 1 << 8 {
            Self::U8
        } else if cases <= 1 << 16 {
            Self::U16
        } else {
            Self::U32
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordLayout {
    pub offsets: Vec<u32>,
    pub size: u32,
    pub align: u32,
}

impl RecordLayout {
    pub fn layout(&self) -> Layout {
        Layout {
            size: self.size,
            align: self.align,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantLayout {
    pub discriminant: Int,
    pub payload_offset: u32,
    pub size: u32,
    pub align: u32,
}

impl VariantLayout {
    pub fn layout(&self) -> Layout {
        Layout {
            size: self.size,
            align: self.align,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagsLayout {
    /// Integer holding all flags; `None` when they spill into several `u32` words.
    pub repr: Option<Int>,
    pub words: u32,
    pub size: u32,
    pub align: u32,
}

pub fn align_to(offset: u32, align: u32) -> LayoutResult<u32> {
    debug_assert!(align.is_power_of_two());
    let padded = offset.checked_add(align - 1).ok_or(Overflow)?;
    Ok(padded & !(align - 1))
}

fn add(a: u32, b: u32) -> LayoutResult<u32> {
    a.checked_add(b).ok_or(Overflow)
}

/// Layout computation against the type table of one interface.
///
/// Named types are computed once and cached, so deeply shared aliases stay
/// linear in the size of the interface.
#[derive(Debug)]
pub struct SizeAlign<'a> {
    interface: &'a Interface,
    named: RefCell<HashMap<String, LayoutResult<Layout>>>,
}

impl<'a> SizeAlign<'a> {
    pub fn new(interface: &'a Interface) -> Self {
        Self {
            interface,
            named: RefCell::new(HashMap::new()),
        }
    }

    pub fn layout(&self, ty: &Type) -> LayoutResult<Layout> {
        let layout = match ty {
            Type::Bool | Type::U8 | Type::S8 => Layout::scalar(1),
            Type::U16 | Type::S16 => Layout::scalar(2),
            Type::U32 | Type::S32 | Type::Float32 | Type::Char | Type::Handle(_) => {
                Layout::scalar(4)
            }
            Type::U64 | Type::S64 | Type::Float64 => Layout::scalar(8),
            Type::String | Type::List(_) => Layout { size: 8, align: 4 },
            Type::Option(inner) => self.variant([None, Some(inner.as_ref())])?.layout(),
            Type::Expected(ok, err) => self
                .variant([ok.as_deref(), err.as_deref()])?
                .layout(),
            Type::Tuple(elements) => self.record(elements)?.layout(),
            Type::Named(name) => return self.named(name),
        };
        Ok(layout)
    }

    fn named(&self, name: &str) -> LayoutResult<Layout> {
        let cached = self.named.borrow().get(name).copied();
        if let Some(layout) = cached {
            return layout;
        }
        // Definitions are acyclic, so the recursion below terminates.
        let layout = match self.interface.get_type(name) {
            Some(def) => self.def_layout(&def.kind),
            None => Ok(Layout::EMPTY),
        };
        self.named.borrow_mut().insert(name.to_string(), layout);
        layout
    }

    pub fn def_layout(&self, kind: &TypeDefKind) -> LayoutResult<Layout> {
        let layout = match kind {
            TypeDefKind::Record(fields) => self.record(fields.iter().map(|f| &f.ty))?.layout(),
            TypeDefKind::Variant(cases) => self
                .variant(cases.iter().map(|c| c.ty.as_ref()))?
                .layout(),
            TypeDefKind::Enum(cases) => Layout::scalar(Int::for_cases(cases.len()).size()),
            TypeDefKind::Flags(flags) => {
                let layout = Self::flags(flags.len());
                Layout {
                    size: layout.size,
                    align: layout.align,
                }
            }
            TypeDefKind::Union(types) => self.variant(types.iter().map(Some))?.layout(),
            TypeDefKind::Alias(ty) => self.layout(ty)?,
            TypeDefKind::Resource(_) => Layout::scalar(4),
        };
        Ok(layout)
    }

    /// Fields laid out in order, each at its own alignment.
    pub fn record<'t>(&self, types: impl IntoIterator<Item = &'t Type>) -> LayoutResult<RecordLayout> {
        let mut offsets = Vec::new();
        let mut size = 0;
        let mut align = 1;
        for ty in types {
            let field = self.layout(ty)?;
            size = align_to(size, field.align)?;
            offsets.push(size);
            size = add(size, field.size)?;
            align = align.max(field.align);
        }
        Ok(RecordLayout {
            offsets,
            size: align_to(size, align)?,
            align,
        })
    }

    /// Discriminant followed by the widest payload. `None` cases carry nothing.
    pub fn variant<'t>(
        &self,
        cases: impl IntoIterator<Item = Option<&'t Type>>,
    ) -> LayoutResult<VariantLayout> {
        let mut count = 0;
        let mut payload = Layout::EMPTY;
        for case in cases {
            count += 1;
            if let Some(ty) = case {
                let layout = self.layout(ty)?;
                payload.size = payload.size.max(layout.size);
                payload.align = payload.align.max(layout.align);
            }
        }
        let discriminant = Int::for_cases(count);
        let align = payload.align.max(discriminant.size());
        let payload_offset = align_to(discriminant.size(), payload.align)?;
        Ok(VariantLayout {
            discriminant,
            payload_offset,
            size: align_to(add(payload_offset, payload.size)?, align)?,
            align,
        })
    }

    pub fn flags(count: usize) -> FlagsLayout {
        let repr = match count {
            0 => {
                return FlagsLayout {
                    repr: None,
                    words: 0,
                    size: 0,
                    align: 1,
                };
            }
            1..=8 => Some(Int::U8),
            9..=16 => Some(Int::U16),
            17..=32 => Some(Int::U32),
            _ => None,
        };
        match repr {
            Some(int) => FlagsLayout {
                repr,
                words: 1,
                size: int.size(),
                align: int.size(),
            },
            None => {
                let words = count.div_ceil(32) as u32;
                FlagsLayout {
                    repr,
                    words,
                    size: words * 4,
                    align: 4,
                }
            }
        }
    }
}
