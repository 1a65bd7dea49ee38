use std::path::{Path, PathBuf};

use wit_pack::{
    Abi, AbiParseError, Config, Generator, Interface, Library, Metadata, Module, Package,
    PackageName, PackageNameError,
};
use wit_pack_core::Colors;

pub struct GenerateArgs {
    pub target: String,
    pub name: String,
    pub version: String,
    pub wit: Vec<PathBuf>,
    pub module: Vec<PathBuf>,
    pub abi: String,
    pub inline_modules: bool,
    pub typings: bool,
    pub out_dir: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    PackageName(#[from] PackageNameError),

    #[error("invalid version `{0}`: must be non-empty and free of whitespace and path separators")]
    Version(String),

    #[error(transparent)]
    Abi(#[from] AbiParseError),

    #[error("got {wit} --wit file(s) but {module} --module file(s); pass them in pairs")]
    Unpaired { wit: usize, module: usize },

    #[error("cannot derive a module name from {}", .0.display())]
    ModuleName(PathBuf),

    #[error("interface `{0}` is given more than once")]
    DuplicateInterface(String),

    #[error("{}", .0.verbose())]
    Generate(#[from] wit_pack::Error),
}

pub fn run(args: GenerateArgs, colors: Colors) {
    match generate(&args) {
        Ok(written) => {
            eprintln!(
                "{}Generated{} {} file(s) in {}{}{}",
                colors.success,
                colors.reset,
                written.len(),
                colors.emphasis,
                args.out_dir.display(),
                colors.reset
            );
        }
        Err(e) => {
            eprintln!("{}error{}: {e}", colors.error, colors.reset);
            std::process::exit(1);
        }
    }
}

/// Build the package, generate it and write every file under `out_dir`.
///
/// Nothing is written unless generation succeeds as a whole.
pub fn generate(args: &GenerateArgs) -> Result<Vec<PathBuf>, GenerateError> {
    let package = load_package(args)?;
    let config = Config::default()
        .inline_modules(args.inline_modules)
        .emit_typings(args.typings);
    let generator = Generator::builder().config(config).build();
    let files = generator.generate(&args.target, &package)?;

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = args.out_dir.join(file.path());
        write_file(&path, file.contents())?;
        tracing::debug!(path = %path.display(), bytes = file.contents().len(), "wrote file");
        written.push(path);
    }
    tracing::info!(
        lang = %args.target,
        files = written.len(),
        out_dir = %args.out_dir.display(),
        "package written"
    );
    Ok(written)
}

pub fn load_package(args: &GenerateArgs) -> Result<Package, GenerateError> {
    let name: PackageName = args.name.parse()?;
    let metadata = metadata(&name, &args.version)?;
    let abi: Abi = args.abi.parse()?;

    if args.wit.len() != args.module.len() {
        return Err(GenerateError::Unpaired {
            wit: args.wit.len(),
            module: args.module.len(),
        });
    }

    let mut interfaces: Vec<Interface> = Vec::with_capacity(args.wit.len());
    for path in &args.wit {
        let source = read_text(path)?;
        let label = path.display().to_string();
        let interface = Interface::from_wit_with_deps(&label, &source, &interfaces)?;
        if interfaces.iter().any(|i| i.name() == interface.name()) {
            return Err(GenerateError::DuplicateInterface(interface.name().to_string()));
        }
        interfaces.push(interface);
    }

    let mut libraries = Vec::with_capacity(interfaces.len());
    for (interface, path) in interfaces.into_iter().zip(&args.module) {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| is_path_safe(s))
            .ok_or_else(|| GenerateError::ModuleName(path.clone()))?;
        let bytes = std::fs::read(path).map_err(|source| GenerateError::Read {
            path: path.clone(),
            source,
        })?;
        libraries.push(Library::new(interface, Module::new(stem, abi, bytes)));
    }

    Ok(Package::new(metadata, libraries))
}

fn metadata(name: &PackageName, version: &str) -> Result<Metadata, GenerateError> {
    if !is_path_safe(version) {
        return Err(GenerateError::Version(version.to_string()));
    }
    Ok(name.with_version(version))
}

/// Values that become path components must be usable as one.
fn is_path_safe(value: &str) -> bool {
    let hostile = |c: char| c.is_whitespace() || matches!(c, '/' | '\\' | '\0');
    !value.is_empty() && value != "." && value != ".." && !value.contains(hostile)
}

fn read_text(path: &Path) -> Result<String, GenerateError> {
    std::fs::read_to_string(path).map_err(|source| GenerateError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), GenerateError> {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)
    };
    write().map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })
}
