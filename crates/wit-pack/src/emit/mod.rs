//! Target emitters: turn a [`Package`] into the files of a source package.
//!
//! Every emitter follows the same steps: validate names for its ecosystem,
//! reject interfaces it cannot bind, describe each library, then collect
//! shared runtime files and per-library files into a [`FileSet`]. Output is
//! all-or-nothing: the first error aborts the whole package.

pub mod descriptor;
pub mod embed;
pub mod files;
pub mod javascript;
pub mod python;

#[cfg(test)]
mod emit_tests;

pub use descriptor::Descriptor;
pub use embed::Asset;
pub use files::FileSet;
pub use javascript::JavaScript;
pub use python::Python;

use std::collections::HashMap;

use crate::interface::{Direction, Function, Interface, TypeDefKind};
use crate::package::{Library, Package};
use crate::parser::is_valid_identifier;
use crate::{Error, File, Result};

/// A target language backend.
///
/// Emitters are stateless once built and shared across threads by the
/// [`Generator`](crate::Generator).
pub trait Emitter: Send + Sync {
    /// Canonical target name, e.g. `javascript`.
    fn name(&self) -> &'static str;

    /// Other names the target can be requested by.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    fn emit(&self, package: &Package) -> Result<Vec<File>>;
}

/// Checks every target shares: library names map onto directories, and only
/// export interfaces can be bound.
pub fn check_libraries(package: &Package) -> Result<()> {
    for library in package.libraries() {
        check_library_name(library)?;
        if library.interface().direction() == Direction::Imports {
            return Err(Error::unsupported_type(format!(
                "interface `{}` describes imports; only exported interfaces can be bound",
                library.name()
            )));
        }
    }
    Ok(())
}

fn check_library_name(library: &Library) -> Result<()> {
    let name = library.name();
    let lowercase = name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if lowercase && is_valid_identifier(name) {
        return Ok(());
    }
    Err(Error::naming(format!(
        "library name `{name}` must be lowercase kebab-case (e.g. `my-library`)"
    )))
}

/// Generated names in one scope of the output, such as a module, a class or
/// a parameter list. Distinct interface names may collide once converted.
pub(crate) struct Namespace {
    language: &'static str,
    taken: HashMap<String, String>,
}

impl Namespace {
    pub(crate) fn new(language: &'static str) -> Self {
        Self {
            language,
            taken: HashMap::new(),
        }
    }

    /// Mark a name the runtime or the surrounding code already uses.
    pub(crate) fn reserve(&mut self, name: &str, owner: String) {
        self.taken.insert(name.to_string(), owner);
    }

    /// Take `name` for `owner`, or fail naming whoever took it first.
    pub(crate) fn claim(&mut self, name: String, owner: String) -> Result<()> {
        if let Some(first) = self.taken.get(&name) {
            return Err(Error::naming(format!(
                "{owner} and {first} both map to the {} name `{name}`",
                self.language
            )));
        }
        self.taken.insert(name, owner);
        Ok(())
    }
}

/// How a target spells interface members.
pub(crate) struct MemberNames {
    pub language: &'static str,
    pub field: fn(&str) -> String,
    /// `None` when enum cases are emitted verbatim.
    pub case: Option<fn(&str) -> String>,
    pub flag: fn(&str) -> String,
    pub function: fn(&str) -> String,
    pub param: fn(&str) -> String,
    /// Members of the bindings class that functions must not replace.
    pub bindings_members: &'static [&'static str],
    /// Members inherited by every resource class.
    pub resource_members: &'static [&'static str],
}

/// Fields, cases, flags, functions, methods and parameters must stay
/// distinct within their scope after conversion.
pub(crate) fn check_member_names(interface: &Interface, names: &MemberNames) -> Result<()> {
    for def in interface.types() {
        match &def.kind {
            TypeDefKind::Record(fields) => {
                let mut scope = Namespace::new(names.language);
                for field in fields {
                    scope.claim(
                        (names.field)(&field.name),
                        format!("field `{}` of `{}`", field.name, def.name),
                    )?;
                }
            }
            TypeDefKind::Enum(cases) => {
                let Some(case_name) = names.case else {
                    continue;
                };
                let mut scope = Namespace::new(names.language);
                for case in cases {
                    scope.claim(
                        case_name(&case.name),
                        format!("case `{}` of `{}`", case.name, def.name),
                    )?;
                }
            }
            TypeDefKind::Flags(flags) => {
                let mut scope = Namespace::new(names.language);
                for flag in flags {
                    scope.claim(
                        (names.flag)(&flag.name),
                        format!("flag `{}` of `{}`", flag.name, def.name),
                    )?;
                }
            }
            TypeDefKind::Resource(methods) => {
                let mut scope = Namespace::new(names.language);
                for member in names.resource_members {
                    scope.reserve(member, format!("the runtime member `{member}`"));
                }
                for method in methods {
                    scope.claim(
                        (names.function)(&method.name),
                        format!("method `{}` of `{}`", method.name, def.name),
                    )?;
                    check_params(method, names)?;
                }
            }
            _ => {}
        }
    }

    let mut scope = Namespace::new(names.language);
    for member in names.bindings_members {
        scope.reserve(member, format!("the runtime member `{member}`"));
    }
    for function in interface.functions() {
        scope.claim(
            (names.function)(&function.name),
            format!("function `{}`", function.name),
        )?;
        check_params(function, names)?;
    }
    Ok(())
}

fn check_params(function: &Function, names: &MemberNames) -> Result<()> {
    let mut scope = Namespace::new(names.language);
    for param in &function.params {
        scope.claim(
            (names.param)(&param.name),
            format!("parameter `{}` of `{}`", param.name, function.name),
        )?;
    }
    Ok(())
}

/// Header line placed at the top of generated source files.
pub(crate) fn generated_header(comment: &str) -> String {
    format!(
        "{comment} Generated by wit-pack {}. Do not edit.\n",
        env!("CARGO_PKG_VERSION")
    )
}
