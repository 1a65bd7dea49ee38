//! Python target: a setuptools package driving modules through `wasmer`.
//!
//! Layout:
//!
//! ```text
//! pyproject.toml
//! MANIFEST.in
//! <pkg>/__init__.py              re-exports every library
//! <pkg>/py.typed
//! <pkg>/_intrinsics.py           shared runtime
//! <pkg>/<lib>/__init__.py        `load()`
//! <pkg>/<lib>/bindings.py        classes, type aliases, descriptor
//! <pkg>/<lib>/<lib>.wasm         unless modules are inlined
//! ```

mod bindings;
mod pyproject;

use wit_pack_core::utils::{to_pascal_case, to_shouty_snake_case, to_snake_case};

use crate::config::Config;
use crate::emit::{
    Asset, Descriptor, Emitter, FileSet, MemberNames, Namespace, check_libraries,
    check_member_names, generated_header,
};
use crate::interface::TypeDefKind;
use crate::package::{Library, Package};
use crate::{Error, File, Result};

const INTRINSICS: &str = include_str!("_intrinsics.py");

const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class", "continue",
    "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if", "import",
    "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while",
    "with", "yield",
];

/// Names `bindings.py` imports; generated classes must not shadow them.
const IMPORTED_NAMES: &[&str] = &[
    "Any", "Dict", "Err", "List", "NoReturn", "Ok", "Optional", "Resource", "Runtime", "Tuple",
    "Union",
];

const MEMBER_NAMES: MemberNames = MemberNames {
    language: "Python",
    field: py_ident,
    case: Some(to_shouty_snake_case),
    flag: to_shouty_snake_case,
    function: py_ident,
    param: py_ident,
    bindings_members: &[],
    resource_members: &["drop", "handle"],
};

pub(crate) fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// snake_case identifier, suffixed with `_` when it is a keyword or `self`.
pub(crate) fn py_ident(name: &str) -> String {
    let ident = to_snake_case(name);
    if is_keyword(&ident) || ident == "self" {
        format!("{ident}_")
    } else {
        ident
    }
}

pub(crate) fn class_name(name: &str) -> String {
    to_pascal_case(name)
}

/// Import name of the package: its snake_case name.
pub fn module_name(package: &Package) -> String {
    to_snake_case(package.metadata().name())
}

/// Docstring for `docs`, indented by `indent`.
pub(crate) fn docstring(docs: Option<&str>, indent: &str) -> String {
    let Some(docs) = docs else {
        return String::new();
    };
    let docs = docs.replace('\\', "\\\\").replace("\"\"\"", "\\\"\\\"\\\"");
    if !docs.contains('\n') {
        return format!("{indent}\"\"\"{docs}\"\"\"\n");
    }
    let mut out = format!("{indent}\"\"\"\n");
    for line in docs.lines() {
        if line.is_empty() {
            out.push('\n');
        } else {
            out.push_str(&format!("{indent}{line}\n"));
        }
    }
    out.push_str(&format!("{indent}\"\"\"\n"));
    out
}

#[derive(Debug, Clone, Default)]
pub struct Python {
    config: Config,
}

impl Python {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn emit_library(&self, files: &mut FileSet, pkg: &str, library: &Library) -> Result<()> {
        let module = py_ident(library.name());
        let dir = format!("{pkg}/{module}");
        let descriptor = Descriptor::new(library.interface(), py_ident)?.to_json()?;
        let asset = Asset::new(
            library.module(),
            format!("{dir}/{module}.wasm"),
            self.config.inline_modules,
        );

        files.push(format!("{dir}/__init__.py"), bindings::loader(library, &asset))?;
        files.push(
            format!("{dir}/bindings.py"),
            bindings::BindingsEmitter::new(library, &descriptor).emit(),
        )?;
        if let Asset::Binary(file) = asset {
            files.push_file(file)?;
        }
        Ok(())
    }
}

impl Emitter for Python {
    fn name(&self) -> &'static str {
        "python"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn emit(&self, package: &Package) -> Result<Vec<File>> {
        let pkg = module_name(package);
        check_module_name(package.metadata().name(), &pkg)?;
        check_libraries(package)?;
        for library in package.libraries() {
            check_class_names(library)?;
        }

        let mut files = FileSet::new();
        files.push(
            "pyproject.toml",
            pyproject::render(package, &pkg, self.config.inline_modules),
        )?;
        files.push("MANIFEST.in", pyproject::manifest_in(&pkg))?;
        files.push(format!("{pkg}/__init__.py"), index(package))?;
        files.push(format!("{pkg}/py.typed"), "")?;
        files.push(format!("{pkg}/_intrinsics.py"), INTRINSICS)?;

        for library in package.libraries() {
            tracing::debug!(library = library.name(), "emitting python bindings");
            self.emit_library(&mut files, &pkg, library)
                .map_err(|e| e.context(format!("while emitting library `{}`", library.name())))?;
        }

        tracing::info!(package = %pkg, files = files.len(), "generated python package");
        Ok(files.into_files())
    }
}

fn check_module_name(name: &str, module: &str) -> Result<()> {
    let valid = module.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        && module.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(Error::naming(format!(
            "package name `{name}` does not map to a Python identifier (got `{module}`)"
        )));
    }
    if is_keyword(module) {
        return Err(Error::naming(format!(
            "package name `{name}` maps to the Python keyword `{module}`"
        )));
    }
    Ok(())
}

/// Top-level `__init__.py`: `load_<lib>` plus the library submodule.
fn index(package: &Package) -> String {
    let mut out = generated_header("#");
    let mut exported = Vec::new();
    for library in package.libraries() {
        let module = py_ident(library.name());
        out.push_str(&format!("from . import {module}\n"));
        out.push_str(&format!("from .{module} import load as load_{module}\n"));
        exported.push(module.clone());
        exported.push(format!("load_{module}"));
    }
    let quoted: Vec<_> = exported.iter().map(|name| format!("\"{name}\"")).collect();
    out.push_str(&format!("\n__all__ = [{}]\n", quoted.join(", ")));
    out
}

/// Classes generated for one library share the module namespace with the
/// runtime imports.
fn check_class_names(library: &Library) -> Result<()> {
    let interface = library.interface();
    let mut module = Namespace::new("Python");
    for imported in IMPORTED_NAMES {
        module.reserve(imported, format!("the runtime name `{imported}`"));
    }

    module.claim(
        class_name(interface.name()),
        format!("interface `{}`", interface.name()),
    )?;
    for def in interface.types() {
        module.claim(class_name(&def.name), format!("type `{}`", def.name))?;
        match &def.kind {
            TypeDefKind::Variant(cases) => {
                for case in cases {
                    module.claim(
                        bindings::case_class(&def.name, &case.name),
                        format!("case `{}` of `{}`", case.name, def.name),
                    )?;
                }
            }
            TypeDefKind::Union(types) => {
                for index in 0..types.len() {
                    module.claim(
                        bindings::union_class(&def.name, index),
                        format!("case {index} of `{}`", def.name),
                    )?;
                }
            }
            _ => {}
        }
    }
    check_member_names(interface, &MEMBER_NAMES)
}
