//! Interface descriptions: parsing and resolution of `.wit` source.

mod model;
mod resolve;

#[cfg(test)]
mod interface_tests;

pub use model::{
    Case, Direction, Field, Function, FunctionKind, Interface, Type, TypeDef, TypeDefKind,
};

use crate::diagnostics::Diagnostics;
use crate::parser;
use crate::{Error, Result};

use resolve::Resolver;

impl Interface {
    /// Parse and resolve an interface that uses no other interfaces.
    ///
    /// The label is typically the file name. It names the interface (see
    /// [`interface_name`]) and appears in every diagnostic.
    pub fn from_wit(label: &str, source: &str) -> Result<Interface> {
        Self::from_wit_with_deps(label, source, &[])
    }

    /// Parse and resolve an interface whose `use` items refer to `deps` by name.
    pub fn from_wit_with_deps(label: &str, source: &str, deps: &[Interface]) -> Result<Interface> {
        match Self::analyze(label, source, deps) {
            (Some(interface), _) => Ok(interface),
            (None, diagnostics) => Err(diagnostics
                .into_error(label, source)
                .unwrap_or_else(|| Error::internal(format!("no diagnostics for \"{label}\"")))),
        }
    }

    /// Like [`Interface::from_wit_with_deps`], but hands back the raw
    /// diagnostics so callers can render them their own way.
    ///
    /// The interface is present exactly when the diagnostics are empty.
    pub fn analyze(label: &str, source: &str, deps: &[Interface]) -> (Option<Interface>, Diagnostics) {
        let (name, direction) = interface_name(label);
        tracing::debug!(label, name, direction = direction.as_str(), "parsing interface");

        let parsed = parser::parse(source);
        let mut diagnostics = parsed.diagnostics;
        if diagnostics.has_syntax_errors() {
            return (None, diagnostics);
        }

        let (interface, resolution) =
            Resolver::new(deps).resolve(name.to_string(), direction, &parsed.document);
        diagnostics.extend(resolution);
        if !diagnostics.is_empty() {
            return (None, diagnostics);
        }

        tracing::debug!(
            name = interface.name(),
            types = interface.types.len(),
            functions = interface.functions.len(),
            "resolved interface"
        );
        (Some(interface), diagnostics)
    }
}

/// Interface name and direction encoded in a source label.
///
/// The directory part and a `.wit` extension are dropped; a remaining
/// `.exports` or `.imports` suffix selects the direction.
///
/// ```
/// use wit_pack::interface::{Direction, interface_name};
///
/// assert_eq!(interface_name("wit/wit-pack.exports.wit"), ("wit-pack", Direction::Exports));
/// assert_eq!(interface_name("host.imports.wit"), ("host", Direction::Imports));
/// assert_eq!(interface_name("types"), ("types", Direction::Exports));
/// ```
pub fn interface_name(label: &str) -> (&str, Direction) {
    let file = label.rsplit(['/', '\\']).next().unwrap_or(label);
    let stem = file.strip_suffix(".wit").unwrap_or(file);
    if let Some(name) = stem.strip_suffix(".exports") {
        (name, Direction::Exports)
    } else if let Some(name) = stem.strip_suffix(".imports") {
        (name, Direction::Imports)
    } else {
        (stem, Direction::Exports)
    }
}
