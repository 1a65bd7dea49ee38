//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `*Params` structs mirror the command `*Args` but are populated from clap;
//! `Into<*Args>` impls bridge dispatch to the command handlers.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::generate::GenerateArgs;

pub struct GenerateParams {
    pub target: String,
    pub name: String,
    pub version: String,
    pub wit: Vec<PathBuf>,
    pub module: Vec<PathBuf>,
    pub abi: String,
    pub inline_modules: bool,
    pub no_typings: bool,
    pub out_dir: PathBuf,
}

impl GenerateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            target: m.get_one::<String>("target").cloned().unwrap_or_default(),
            name: m.get_one::<String>("name").cloned().unwrap_or_default(),
            version: m
                .get_one::<String>("pkg_version")
                .cloned()
                .unwrap_or_else(|| "0.0.0".to_string()),
            wit: paths(m, "wit"),
            module: paths(m, "module"),
            abi: m
                .get_one::<String>("abi")
                .cloned()
                .unwrap_or_else(|| "none".to_string()),
            inline_modules: m.get_flag("inline_modules"),
            no_typings: m.get_flag("no_typings"),
            out_dir: m.get_one::<PathBuf>("out_dir").cloned().unwrap_or_default(),
        }
    }
}

impl From<GenerateParams> for GenerateArgs {
    fn from(p: GenerateParams) -> Self {
        Self {
            target: p.target,
            name: p.name,
            version: p.version,
            wit: p.wit,
            module: p.module,
            abi: p.abi,
            inline_modules: p.inline_modules,
            typings: !p.no_typings,
            out_dir: p.out_dir,
        }
    }
}

pub struct CheckParams {
    pub files: Vec<PathBuf>,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            files: paths(m, "files"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            files: p.files,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TargetsParams;

impl TargetsParams {
    pub fn from_matches(_m: &ArgMatches) -> Self {
        Self
    }
}

/// Settings that apply to every subcommand.
pub struct GlobalParams {
    pub color: ColorChoice,
    pub verbose: u8,
}

impl GlobalParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            color: parse_color(m),
            verbose: m.get_count("verbose"),
        }
    }
}

fn paths(m: &ArgMatches, id: &str) -> Vec<PathBuf> {
    m.get_many::<PathBuf>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    ColorChoice::from_arg(m.get_one::<String>("color").map(String::as_str))
}
