//! wit-pack: turn WebAssembly interface descriptions into installable
//! JavaScript and Python packages.
//!
//! The pipeline:
//! - `parser` - lexer and recursive-descent parser for interface text
//! - `interface` - name resolution into an [`Interface`]
//! - `abi` - canonical-ABI sizes, alignments and offsets
//! - `package` - the package model: metadata, libraries, modules, files
//! - `emit` - target emitters and their runtime templates
//! - `generator` - the [`Generator`] facade selecting a target by name
//! - `diagnostics` - located errors rendered with source snippets
//!
//! ```no_run
//! use wit_pack::{Abi, Generator, Interface, Library, Module, Package, PackageName};
//!
//! let source = std::fs::read_to_string("calc.exports.wit").unwrap();
//! let interface = Interface::from_wit("calc.exports.wit", &source).unwrap();
//! let module = Module::new("calc", Abi::None, std::fs::read("calc.wasm").unwrap());
//! let name: PackageName = "wasmer/calc".parse().unwrap();
//! let package = Package::new(name.with_version("0.1.0"), vec![Library::new(interface, module)]);
//!
//! for file in Generator::new().generate("javascript", &package).unwrap() {
//!     println!("{}", file.path());
//! }
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod abi;
pub mod config;
pub mod diagnostics;
pub mod emit;
mod error;
pub mod generator;
pub mod interface;
pub mod package;
pub mod parser;

#[cfg(test)]
mod generator_tests;

pub use config::Config;
pub use emit::Emitter;
pub use error::{Error, ErrorKind, Result};
pub use generator::{Generator, GeneratorBuilder};
pub use interface::Interface;
pub use package::{
    Abi, AbiParseError, File, Library, Metadata, Module, Package, PackageName, PackageNameError,
};
