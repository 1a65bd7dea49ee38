//! Configuration shared by the built-in emitters.

/// Knobs applied to every target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Embed modules as base64 literals instead of separate `.wasm` files
    pub inline_modules: bool,
    /// Emit `.d.ts` typings next to the JavaScript bindings
    pub emit_typings: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inline_modules: false,
            emit_typings: true,
        }
    }
}

impl Config {
    pub fn inline_modules(mut self, value: bool) -> Self {
        self.inline_modules = value;
        self
    }

    pub fn emit_typings(mut self, value: bool) -> Self {
        self.emit_typings = value;
        self
    }
}
