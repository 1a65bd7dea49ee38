mod cli;
mod commands;

use tracing_subscriber::EnvFilter;
use wit_pack_core::Colors;

use cli::{CheckParams, GenerateParams, GlobalParams, TargetsParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();
    let global = GlobalParams::from_matches(&matches);
    init_logging(global.verbose);
    let colors = Colors::new(global.color.should_colorize());

    match matches.subcommand() {
        Some(("generate", m)) => {
            let params = GenerateParams::from_matches(m);
            commands::generate::run(params.into(), colors);
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("targets", m)) => {
            let _params = TargetsParams::from_matches(m);
            commands::targets::run();
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// `RUST_LOG` wins over `-v` when set.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
