use std::path::PathBuf;

use wit_pack::Interface;

pub struct CheckArgs {
    pub files: Vec<PathBuf>,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    match check(&args) {
        Ok(report) if report.is_empty() => {}
        Ok(report) => {
            eprint!("{report}");
            std::process::exit(1);
        }
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    }
}

/// Analyze every file in order and return the rendered diagnostics.
///
/// Files that resolve cleanly become dependencies of the files after them.
/// An empty report means every file is valid.
pub fn check(args: &CheckArgs) -> Result<String, String> {
    let mut deps: Vec<Interface> = Vec::new();
    let mut report = String::new();

    for path in &args.files {
        let source = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        let label = path.display().to_string();
        let (interface, diagnostics) = Interface::analyze(&label, &source, &deps);

        if !diagnostics.is_empty() {
            tracing::debug!(file = %label, count = diagnostics.len(), "interface has errors");
            report.push_str(
                &diagnostics
                    .printer()
                    .source(&source)
                    .path(&label)
                    .colored(args.color)
                    .render(),
            );
        }
        if let Some(interface) = interface {
            deps.push(interface);
        }
    }
    Ok(report)
}
