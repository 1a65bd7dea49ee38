//! The package model: what gets generated, from which interfaces and modules.
//!
//! Everything here is immutable once built. Constructors check their
//! invariants eagerly and panic on violations.

mod invariants;

#[cfg(test)]
mod package_tests;

use std::fmt;
use std::str::FromStr;

use crate::interface::Interface;

/// Namespace, name and version of the generated package.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Metadata {
    namespace: String,
    name: String,
    version: String,
}

impl Metadata {
    /// # Panics
    ///
    /// If any part is empty or contains a path separator, NUL or whitespace.
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        let namespace = namespace.into();
        let name = name.into();
        let version = version.into();
        invariants::assert_path_safe("namespace", &namespace);
        invariants::assert_path_safe("package name", &name);
        invariants::assert_path_safe("version", &version);
        Self {
            namespace,
            name,
            version,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// `namespace/name`
    pub fn qualified_name(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }
}

/// A `namespace/name` pair parsed from user input.
///
/// ```
/// use wit_pack::PackageName;
///
/// let name: PackageName = "wasmer/wit-pack".parse().unwrap();
/// assert_eq!(name.namespace(), "wasmer");
/// assert_eq!(name.name(), "wit-pack");
/// assert!("wit-pack".parse::<PackageName>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName {
    namespace: String,
    name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PackageNameError {
    #[error("`{0}` is not of the form `namespace/name`")]
    MissingNamespace(String),
    #[error("`{0}` has an empty namespace or name")]
    Empty(String),
    #[error("`{0}` contains a path separator, whitespace or NUL")]
    InvalidCharacter(String),
}

impl PackageName {
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_version(&self, version: impl Into<String>) -> Metadata {
        Metadata::new(self.namespace.clone(), self.name.clone(), version)
    }
}

impl FromStr for PackageName {
    type Err = PackageNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((namespace, name)) = s.split_once('/') else {
            return Err(PackageNameError::MissingNamespace(s.to_string()));
        };
        if namespace.is_empty() || name.is_empty() {
            return Err(PackageNameError::Empty(s.to_string()));
        }
        let hostile = |part: &str| {
            part.chars()
                .any(|c| c == '/' || c == '\\' || c == '\0' || c.is_whitespace())
                || part == "."
                || part == ".."
        };
        if hostile(namespace) || hostile(name) {
            return Err(PackageNameError::InvalidCharacter(s.to_string()));
        }
        Ok(Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// How a module expects to be instantiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Abi {
    /// Self-contained module, instantiated without imports.
    #[default]
    None,
    /// Module importing `wasi_snapshot_preview1`.
    Wasi,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ABI `{0}` (expected `none` or `wasi`)")]
pub struct AbiParseError(String);

impl Abi {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Wasi => "wasi",
        }
    }
}

impl FromStr for Abi {
    type Err = AbiParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "wasi" => Ok(Self::Wasi),
            _ => Err(AbiParseError(s.to_string())),
        }
    }
}

impl fmt::Display for Abi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compiled WebAssembly module. The bytes are opaque to the generator.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Module {
    name: String,
    abi: Abi,
    bytes: Vec<u8>,
}

impl Module {
    /// # Panics
    ///
    /// If `name` is empty.
    pub fn new(name: impl Into<String>, abi: Abi, bytes: impl Into<Vec<u8>>) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "module name must not be empty");
        Self {
            name,
            abi,
            bytes: bytes.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn abi(&self) -> Abi {
        self.abi
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.name)
            .field("abi", &self.abi)
            .field("bytes", &format_args!("<{} bytes>", self.bytes.len()))
            .finish()
    }
}

/// An interface together with the module implementing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Library {
    interface: Interface,
    module: Module,
}

impl Library {
    pub fn new(interface: Interface, module: Module) -> Self {
        Self { interface, module }
    }

    pub fn interface(&self) -> &Interface {
        &self.interface
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    /// Name used for the library's directory in generated output.
    pub fn name(&self) -> &str {
        self.interface.name()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    metadata: Metadata,
    libraries: Vec<Library>,
}

impl Package {
    /// # Panics
    ///
    /// If `libraries` is empty or two libraries share an interface name.
    pub fn new(metadata: Metadata, libraries: Vec<Library>) -> Self {
        invariants::assert_libraries(&libraries);
        Self {
            metadata,
            libraries,
        }
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn libraries(&self) -> &[Library] {
        &self.libraries
    }

    /// True when any module needs WASI imports wired up.
    pub fn requires_wasi(&self) -> bool {
        self.libraries.iter().any(|l| l.module.abi == Abi::Wasi)
    }
}

/// One generated output file, addressed by a `/`-separated relative path.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct File {
    path: String,
    contents: Vec<u8>,
}

impl File {
    pub fn new(path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    /// Contents as text, when they are valid UTF-8.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.contents).ok()
    }

    pub fn into_contents(self) -> Vec<u8> {
        self.contents
    }
}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("File")
            .field("path", &self.path)
            .field("len", &self.contents.len())
            .finish()
    }
}
