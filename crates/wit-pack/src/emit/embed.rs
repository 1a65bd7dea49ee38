//! Module assets: shipped as a binary file or inlined as base64 text.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::File;
use crate::package::Module;

/// Where the generated loader finds a module's bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asset {
    /// Exact copy of the module, written next to the loader.
    Binary(File),
    /// Base64 literal to embed in the loader source.
    Inline(String),
}

impl Asset {
    pub fn new(module: &Module, path: impl Into<String>, inline: bool) -> Self {
        if inline {
            Self::Inline(STANDARD.encode(module.bytes()))
        } else {
            Self::Binary(File::new(path, module.bytes()))
        }
    }
}
