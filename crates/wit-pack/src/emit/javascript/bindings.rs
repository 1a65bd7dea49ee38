//! JavaScript source: bindings classes and the per-library loader.

use crate::emit::{Asset, generated_header};
use crate::interface::{Function, FunctionKind};
use crate::package::{Abi, Library};

use super::{class_name, js_ident, jsdoc, property_name};

/// Emits `src/<lib>/<lib>.js`.
pub struct BindingsEmitter<'a> {
    library: &'a Library,
    descriptor: &'a str,
    output: String,
}

impl<'a> BindingsEmitter<'a> {
    pub fn new(library: &'a Library, descriptor: &'a str) -> Self {
        Self {
            library,
            descriptor,
            output: String::new(),
        }
    }

    pub fn emit(mut self) -> String {
        let interface = self.library.interface();
        self.output.push_str(&generated_header("//"));
        if interface.resources().next().is_some() {
            self.output
                .push_str("import { Resource } from \"../intrinsics.js\";\n");
        }
        self.output.push('\n');
        self.output.push_str(&format!(
            "export const descriptor = {};\n\n",
            self.descriptor
        ));

        for (def, methods) in interface.resources() {
            self.emit_resource(&def.name, def.docs.as_deref(), methods);
        }
        self.emit_bindings_class();
        self.output
    }

    fn emit_resource(&mut self, name: &str, docs: Option<&str>, methods: &[Function]) {
        self.output.push_str(&jsdoc(docs, ""));
        self.output.push_str(&format!(
            "export class {} extends Resource {{\n  static resourceName = \"{name}\";\n",
            class_name(name)
        ));
        for method in methods {
            self.output.push('\n');
            self.emit_method(method);
        }
        self.output.push_str("}\n\n");
    }

    fn emit_bindings_class(&mut self) {
        let interface = self.library.interface();
        self.output.push_str(&format!(
            "export class {} {{\n  constructor(runtime) {{\n    this._runtime = runtime;\n",
            class_name(interface.name())
        ));
        for (def, _) in interface.resources() {
            self.output.push_str(&format!(
                "    runtime.registerResource(\"{}\", {});\n",
                def.name,
                class_name(&def.name)
            ));
        }
        self.output.push_str("  }\n");
        for function in interface.functions() {
            self.output.push('\n');
            self.emit_method(function);
        }
        self.output.push_str("}\n");
    }

    fn emit_method(&mut self, function: &Function) {
        let params: Vec<_> = function.params.iter().map(|p| js_ident(&p.name)).collect();
        let (prefix, signature, runtime, args) = match &function.kind {
            FunctionKind::Freestanding => ("", params.join(", "), "this._runtime", params.clone()),
            FunctionKind::Method { .. } => {
                let mut args = vec!["this".to_string()];
                args.extend(params.iter().cloned());
                ("", params.join(", "), "this._runtime", args)
            }
            FunctionKind::Static { .. } => {
                let mut signature = vec!["_lib".to_string()];
                signature.extend(params.iter().cloned());
                ("static ", signature.join(", "), "_lib._runtime", params.clone())
            }
        };

        self.output.push_str(&jsdoc(function.docs.as_deref(), "  "));
        self.output.push_str(&format!(
            "  {prefix}{}({signature}) {{\n    return {runtime}.call(\"{}\", [{}]);\n  }}\n",
            property_name(&function.name),
            function.core_export_name(),
            args.join(", ")
        ));
    }
}

/// Emits `src/<lib>/index.js`, whose default export instantiates the module.
pub fn loader(library: &Library, asset: &Asset) -> String {
    let name = library.name();
    let mut out = generated_header("//");

    let source = match asset {
        Asset::Binary(_) => {
            out.push_str("import { fetchModule, instantiate } from \"../intrinsics.js\";\n");
            format!("await fetchModule(new URL(\"./{name}.wasm\", import.meta.url))")
        }
        Asset::Inline(_) => {
            out.push_str("import { decodeBase64, instantiate } from \"../intrinsics.js\";\n");
            "decodeBase64(MODULE)".to_string()
        }
    };
    out.push_str(&format!(
        "import {{ {}, descriptor }} from \"./{name}.js\";\n\n",
        class_name(name)
    ));

    if let Asset::Inline(encoded) = asset {
        out.push_str(&format!("const MODULE = \"{encoded}\";\n\n"));
    }

    let wasi = library.module().abi() == Abi::Wasi;
    out.push_str(&format!(
        "export default async function load(options = {{}}) {{\n  const bytes = {source};\n  const runtime = await instantiate(bytes, descriptor, {{ wasi: {wasi}, ...options }});\n  return new {}(runtime);\n}}\n",
        class_name(name)
    ));
    out
}
