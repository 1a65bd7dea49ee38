//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("wit-pack")
        .about("Generate JavaScript and Python packages from WIT interfaces")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(color_arg())
        .arg(verbose_arg())
        .subcommand(generate_command())
        .subcommand(check_command())
        .subcommand(targets_command())
}

/// Generate a package for one target.
pub fn generate_command() -> Command {
    Command::new("generate")
        .about("Generate a package from interfaces and modules")
        .override_usage(
            "\
  wit-pack generate <TARGET> -n <NAMESPACE/NAME> --wit <FILE> --module <FILE> -o <DIR>",
        )
        .after_help(
            r#"EXAMPLES:
  wit-pack generate js -n wasmer/calc --wit calc.exports.wit --module calc.wasm -o pkg
  wit-pack generate python -n wasmer/calc --version 1.0.0 \
      --wit calc.exports.wit --module calc.wasm --abi wasi -o pkg
  wit-pack generate js -n wasmer/tools \
      --wit calc.wit --module calc.wasm \
      --wit text.wit --module text.wasm --inline-modules -o pkg"#,
        )
        .arg(target_arg())
        .arg(name_arg())
        .arg(version_arg())
        .arg(wit_arg())
        .arg(module_arg())
        .arg(abi_arg())
        .arg(inline_modules_arg())
        .arg(no_typings_arg())
        .arg(out_dir_arg())
}

/// Parse and resolve interface files without generating anything.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Check interface files for errors")
        .after_help(
            r#"EXAMPLES:
  wit-pack check calc.exports.wit
  wit-pack check types.wit calc.exports.wit   # calc may `use` types"#,
        )
        .arg(wit_files_arg())
}

/// List available targets.
pub fn targets_command() -> Command {
    Command::new("targets").about("List available targets")
}
