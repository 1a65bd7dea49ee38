//! `pyproject.toml` and `MANIFEST.in`.

use crate::package::Package;

use super::py_ident;

const DEPENDENCIES: &[&str] = &["wasmer>=1.1.0", "wasmer_compiler_cranelift>=1.1.0"];

pub fn render(package: &Package, pkg: &str, inline_modules: bool) -> String {
    let metadata = package.metadata();
    let mut out = String::new();

    out.push_str("[build-system]\n");
    out.push_str("requires = [\"setuptools>=61\"]\n");
    out.push_str("build-backend = \"setuptools.build_meta\"\n\n");

    out.push_str("[project]\n");
    out.push_str(&format!("name = {}\n", toml_string(metadata.name())));
    out.push_str(&format!("version = {}\n", toml_string(metadata.version())));
    out.push_str(&format!(
        "description = {}\n",
        toml_string(&format!("Python bindings for {}", metadata.qualified_name()))
    ));
    out.push_str("requires-python = \">=3.7\"\n");
    let dependencies: Vec<_> = DEPENDENCIES.iter().map(|d| toml_string(d)).collect();
    out.push_str(&format!("dependencies = [{}]\n\n", dependencies.join(", ")));

    let mut packages = vec![toml_string(pkg)];
    packages.extend(
        package
            .libraries()
            .iter()
            .map(|library| toml_string(&format!("{pkg}.{}", py_ident(library.name())))),
    );
    out.push_str("[tool.setuptools]\n");
    out.push_str(&format!("packages = [{}]\n\n", packages.join(", ")));

    out.push_str("[tool.setuptools.package-data]\n");
    if inline_modules {
        out.push_str("\"*\" = [\"py.typed\"]\n");
    } else {
        out.push_str("\"*\" = [\"py.typed\", \"*.wasm\"]\n");
    }
    out
}

pub fn manifest_in(pkg: &str) -> String {
    format!("include {pkg}/py.typed\nrecursive-include {pkg} *.wasm\n")
}

/// Basic TOML string with the characters that need escaping escaped.
fn toml_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
