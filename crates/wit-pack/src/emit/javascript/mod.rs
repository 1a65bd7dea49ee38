//! JavaScript target: an ES-module npm package.
//!
//! Layout:
//!
//! ```text
//! package.json
//! src/intrinsics.js          shared runtime
//! src/index.js, index.d.ts   re-exports every library
//! src/<lib>/index.js         default export `load()`
//! src/<lib>/index.d.ts
//! src/<lib>/<lib>.js         bindings class, resource classes, descriptor
//! src/<lib>/<lib>.d.ts
//! src/<lib>/<lib>.wasm       unless modules are inlined
//! ```

mod bindings;
mod manifest;
mod typings;

use wit_pack_core::utils::{to_camel_case, to_pascal_case};

use crate::config::Config;
use crate::emit::{
    Asset, Descriptor, Emitter, FileSet, MemberNames, Namespace, check_libraries,
    check_member_names, generated_header,
};
use crate::interface::TypeDefKind;
use crate::package::{Library, Package};
use crate::{File, Result};

pub use manifest::{check_names, package_name};

const MEMBER_NAMES: MemberNames = MemberNames {
    language: "JavaScript",
    field: property_name,
    case: None,
    flag: property_name,
    function: property_name,
    param: js_ident,
    bindings_members: &["constructor"],
    resource_members: &["constructor", "drop", "handle", "prototype", "resourceName"],
};

const INTRINSICS: &str = include_str!("intrinsics.js");

const RESERVED_WORDS: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let", "new",
    "null", "package", "private", "protected", "public", "return", "static", "super", "switch",
    "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// camelCase identifier, suffixed with `_` when it is a reserved word.
pub(crate) fn js_ident(name: &str) -> String {
    let ident = to_camel_case(name);
    if RESERVED_WORDS.contains(&ident.as_str()) {
        format!("{ident}_")
    } else {
        ident
    }
}

/// Property and method names may be reserved words, so they are never escaped.
pub(crate) fn property_name(name: &str) -> String {
    to_camel_case(name)
}

pub(crate) fn class_name(name: &str) -> String {
    to_pascal_case(name)
}

/// JSDoc block for `docs`, indented by `indent`.
pub(crate) fn jsdoc(docs: Option<&str>, indent: &str) -> String {
    let Some(docs) = docs else {
        return String::new();
    };
    let mut out = format!("{indent}/**\n");
    for line in docs.lines() {
        if line.is_empty() {
            out.push_str(&format!("{indent} *\n"));
        } else {
            out.push_str(&format!("{indent} * {}\n", line.replace("*/", "*\\/")));
        }
    }
    out.push_str(&format!("{indent} */\n"));
    out
}

#[derive(Debug, Clone, Default)]
pub struct JavaScript {
    config: Config,
}

impl JavaScript {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn emit_library(&self, files: &mut FileSet, library: &Library) -> Result<()> {
        let name = library.name();
        let dir = format!("src/{name}");
        let descriptor = Descriptor::new(library.interface(), property_name)?.to_json()?;
        let asset = Asset::new(
            library.module(),
            format!("{dir}/{name}.wasm"),
            self.config.inline_modules,
        );

        files.push(format!("{dir}/index.js"), bindings::loader(library, &asset))?;
        if self.config.emit_typings {
            files.push(format!("{dir}/index.d.ts"), typings::loader(library))?;
        }
        files.push(
            format!("{dir}/{name}.js"),
            bindings::BindingsEmitter::new(library, &descriptor).emit(),
        )?;
        if self.config.emit_typings {
            files.push(
                format!("{dir}/{name}.d.ts"),
                typings::TypingsEmitter::new(library).emit(),
            )?;
        }
        if let Asset::Binary(file) = asset {
            files.push_file(file)?;
        }
        Ok(())
    }
}

impl Emitter for JavaScript {
    fn name(&self) -> &'static str {
        "javascript"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["js"]
    }

    fn emit(&self, package: &Package) -> Result<Vec<File>> {
        check_names(package)?;
        check_libraries(package)?;
        for library in package.libraries() {
            check_class_names(library)?;
        }

        let mut files = FileSet::new();
        files.push(
            "package.json",
            manifest::render(package, self.config.emit_typings)?,
        )?;
        files.push("src/intrinsics.js", INTRINSICS)?;
        files.push("src/index.js", index(package))?;
        if self.config.emit_typings {
            files.push("src/index.d.ts", index(package))?;
        }

        for library in package.libraries() {
            tracing::debug!(library = library.name(), "emitting javascript bindings");
            self.emit_library(&mut files, library)
                .map_err(|e| e.context(format!("while emitting library `{}`", library.name())))?;
        }

        tracing::info!(
            package = %package_name(package),
            files = files.len(),
            "generated javascript package"
        );
        Ok(files.into_files())
    }
}

/// Top-level entry point. The same text serves as its own typings.
fn index(package: &Package) -> String {
    let mut out = generated_header("//");
    for library in package.libraries() {
        let name = library.name();
        out.push_str(&format!(
            "export {{ default as load{} }} from \"./{name}/index.js\";\n",
            class_name(name)
        ));
        out.push_str(&format!(
            "export * as {} from \"./{name}/{name}.js\";\n",
            js_ident(name)
        ));
    }
    out
}

/// Type and class names share one namespace in the generated module, along
/// with the `Resource` base class it imports.
fn check_class_names(library: &Library) -> Result<()> {
    let interface = library.interface();
    let mut module = Namespace::new("JavaScript");
    module.reserve("Resource", "the runtime name `Resource`".to_string());
    module.claim(
        class_name(interface.name()),
        format!("interface `{}`", interface.name()),
    )?;
    for def in interface.types() {
        module.claim(class_name(&def.name), format!("type `{}`", def.name))?;
        if let TypeDefKind::Variant(cases) = &def.kind {
            for case in cases {
                module.claim(
                    typings::case_interface(&def.name, &case.name),
                    format!("case `{}` of `{}`", case.name, def.name),
                )?;
            }
        }
    }
    check_member_names(interface, &MEMBER_NAMES)
}
