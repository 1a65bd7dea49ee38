//! Generation facade: one handle holding every registered target.

use crate::config::Config;
use crate::emit::{Emitter, JavaScript, Python};
use crate::package::{File, Package};
use crate::{Error, ErrorKind, Result};

/// Registry of target emitters.
///
/// A `Generator` holds no per-call state; share one across threads and
/// call [`Generator::generate`] concurrently.
pub struct Generator {
    emitters: Vec<Box<dyn Emitter>>,
}

/// Builder for [`Generator`].
pub struct GeneratorBuilder {
    config: Config,
    extra: Vec<Box<dyn Emitter>>,
}

impl GeneratorBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            extra: Vec::new(),
        }
    }

    /// Configuration handed to the built-in emitters.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Register an additional target. Built-in targets take precedence
    /// when names clash.
    pub fn emitter(mut self, emitter: Box<dyn Emitter>) -> Self {
        self.extra.push(emitter);
        self
    }

    pub fn build(self) -> Generator {
        let mut emitters: Vec<Box<dyn Emitter>> = vec![
            Box::new(JavaScript::new(self.config.clone())),
            Box::new(Python::new(self.config)),
        ];
        emitters.extend(self.extra);
        tracing::debug!(targets = emitters.len(), "generator ready");
        Generator { emitters }
    }
}

impl Default for GeneratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// JavaScript and Python with the default [`Config`].
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::new()
    }

    /// Canonical names of the registered targets, in registration order.
    pub fn targets(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.emitters.iter().map(|e| e.name())
    }

    /// Emitter registered under `target` or one of its aliases, ignoring case.
    pub fn emitter(&self, target: &str) -> Option<&dyn Emitter> {
        self.emitters
            .iter()
            .find(|e| {
                e.name().eq_ignore_ascii_case(target)
                    || e.aliases().iter().any(|a| a.eq_ignore_ascii_case(target))
            })
            .map(|e| &**e)
    }

    pub fn generate(&self, target: &str, package: &Package) -> Result<Vec<File>> {
        let Some(emitter) = self.emitter(target) else {
            let available: Vec<_> = self.targets().collect();
            return Err(Error::new(
                ErrorKind::UnsupportedTarget,
                format!(
                    "unknown target `{target}` (available: {})",
                    available.join(", ")
                ),
            ));
        };
        tracing::debug!(
            emitter = emitter.name(),
            package = %package.metadata().qualified_name(),
            libraries = package.libraries().len(),
            "generating package"
        );
        emitter.emit(package)
    }

    pub fn generate_javascript(&self, package: &Package) -> Result<Vec<File>> {
        self.generate("javascript", package)
    }

    pub fn generate_python(&self, package: &Package) -> Result<Vec<File>> {
        self.generate("python", package)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}
