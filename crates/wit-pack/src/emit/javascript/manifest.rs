//! `package.json` and npm naming rules.

use indexmap::IndexMap;
use serde::Serialize;

use crate::package::Package;
use crate::{Error, Result};

/// Version range of the WASI shim added for modules using the `wasi` ABI.
const WASI_DEPENDENCY: (&str, &str) = ("@wasmer/wasi", "^1.2.2");

/// npm caps the full package name, scope included.
const MAX_NAME_LEN: usize = 214;

#[derive(Debug, Serialize)]
struct Manifest<'a> {
    name: String,
    version: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    main: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    types: Option<&'static str>,
    files: [&'static str; 1],
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    dependencies: IndexMap<&'static str, &'static str>,
}

/// The scoped npm name, `@namespace/name`.
pub fn package_name(package: &Package) -> String {
    let metadata = package.metadata();
    format!("@{}/{}", metadata.namespace(), metadata.name())
}

/// Reject namespaces and names npm would refuse to publish.
pub fn check_names(package: &Package) -> Result<()> {
    let metadata = package.metadata();
    check_part("scope", metadata.namespace())?;
    check_part("package name", metadata.name())?;

    let full = package_name(package);
    if full.len() > MAX_NAME_LEN {
        return Err(Error::naming(format!(
            "npm package name `{full}` is longer than {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

fn check_part(what: &str, value: &str) -> Result<()> {
    if value.starts_with(['.', '_']) {
        return Err(Error::naming(format!(
            "npm {what} `{value}` must not start with `.` or `_`"
        )));
    }
    if let Some(c) = value
        .chars()
        .find(|&c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || "-._~".contains(c)))
    {
        let reason = if c.is_ascii_uppercase() {
            "must be lowercase".to_string()
        } else {
            format!("contains `{c}`")
        };
        return Err(Error::naming(format!(
            "npm {what} `{value}` {reason}; allowed are lowercase letters, digits and `-._~`"
        )));
    }
    Ok(())
}

pub fn render(package: &Package, typings: bool) -> Result<String> {
    let mut dependencies = IndexMap::new();
    if package.requires_wasi() {
        dependencies.insert(WASI_DEPENDENCY.0, WASI_DEPENDENCY.1);
    }

    let manifest = Manifest {
        name: package_name(package),
        version: package.metadata().version(),
        kind: "module",
        main: "src/index.js",
        types: typings.then_some("src/index.d.ts"),
        files: ["src"],
        dependencies,
    };

    let mut json = serde_json::to_string_pretty(&manifest)
        .map_err(|e| Error::internal(format!("failed to serialize package.json: {e}")))?;
    json.push('\n');
    Ok(json)
}
