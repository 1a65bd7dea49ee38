//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so commands can compose the same
//! definitions.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Target language (positional).
pub fn target_arg() -> Arg {
    Arg::new("target")
        .value_name("TARGET")
        .required(true)
        .help("Target language (run `wit-pack targets` for the list)")
}

/// Qualified package name (--name).
pub fn name_arg() -> Arg {
    Arg::new("name")
        .short('n')
        .long("name")
        .value_name("NAMESPACE/NAME")
        .required(true)
        .help("Package name, e.g. wasmer/wit-pack")
}

/// Package version (--version).
pub fn version_arg() -> Arg {
    Arg::new("pkg_version")
        .long("version")
        .value_name("VERSION")
        .default_value("0.0.0")
        .help("Package version")
}

/// Interface files (--wit), paired with --module by position.
pub fn wit_arg() -> Arg {
    Arg::new("wit")
        .short('w')
        .long("wit")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .action(ArgAction::Append)
        .required(true)
        .help("Interface file; repeat once per library")
}

/// Module files (--module), paired with --wit by position.
pub fn module_arg() -> Arg {
    Arg::new("module")
        .short('m')
        .long("module")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .action(ArgAction::Append)
        .required(true)
        .help("WebAssembly module implementing the matching --wit")
}

/// Module ABI (--abi).
pub fn abi_arg() -> Arg {
    Arg::new("abi")
        .long("abi")
        .value_name("ABI")
        .default_value("none")
        .value_parser(["none", "wasi"])
        .help("ABI the modules were compiled against")
}

/// Embed modules as base64 (--inline-modules).
pub fn inline_modules_arg() -> Arg {
    Arg::new("inline_modules")
        .long("inline-modules")
        .action(ArgAction::SetTrue)
        .help("Embed modules in the generated sources instead of shipping .wasm files")
}

/// Skip .d.ts generation (--no-typings).
pub fn no_typings_arg() -> Arg {
    Arg::new("no_typings")
        .long("no-typings")
        .action(ArgAction::SetTrue)
        .help("Don't emit TypeScript declarations")
}

/// Output directory (-o/--out-dir).
pub fn out_dir_arg() -> Arg {
    Arg::new("out_dir")
        .short('o')
        .long("out-dir")
        .value_name("DIR")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Directory the package is written into")
}

/// Interface files to check (positional, one or more).
pub fn wit_files_arg() -> Arg {
    Arg::new("files")
        .value_name("WIT")
        .value_parser(value_parser!(PathBuf))
        .action(ArgAction::Append)
        .required(true)
        .help("Interface files, checked in order; later files may `use` earlier ones")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .global(true)
        .help("Colorize output")
}

/// Log progress to stderr (-v/--verbose).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Log progress to stderr (-vv for debug output)")
}
