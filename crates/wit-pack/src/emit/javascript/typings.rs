//! TypeScript declarations for the generated JavaScript.
//!
//! Value mapping:
//! - integers up to 32 bits and floats are `number`, 64-bit integers `bigint`
//! - `char` and `string` are `string`, `list<u8>` is `Uint8Array`
//! - `option<T>` is `T | null`, tuples are TypeScript tuples
//! - variants, `expected` and unions are `{ tag, val }` objects
//! - enums are string literal unions, flags are objects of booleans

use crate::emit::generated_header;
use crate::interface::{Case, Field, Function, FunctionKind, Interface, Type, TypeDef, TypeDefKind};
use crate::package::Library;

use super::{class_name, js_ident, jsdoc, property_name};

/// Emits `src/<lib>/<lib>.d.ts`.
pub struct TypingsEmitter<'a> {
    interface: &'a Interface,
    output: String,
}

impl<'a> TypingsEmitter<'a> {
    pub fn new(library: &'a Library) -> Self {
        Self {
            interface: library.interface(),
            output: String::new(),
        }
    }

    pub fn emit(mut self) -> String {
        self.output.push_str(&generated_header("//"));
        self.output.push('\n');

        for def in self.interface.types() {
            self.emit_type_def(def);
        }
        for (def, methods) in self.interface.resources() {
            self.emit_resource(def, methods);
        }
        self.emit_bindings_class();
        self.output
            .push_str("\nexport declare const descriptor: unknown;\n");
        self.output
    }

    fn emit_type_def(&mut self, def: &TypeDef) {
        let name = class_name(&def.name);
        match &def.kind {
            TypeDefKind::Record(fields) => self.emit_interface(&name, def.docs.as_deref(), fields),
            TypeDefKind::Variant(cases) => self.emit_tagged_union(def, cases),
            TypeDefKind::Enum(cases) => {
                let literals: Vec<_> = cases.iter().map(|c| format!("\"{}\"", c.name)).collect();
                let union = if literals.is_empty() {
                    "never".to_string()
                } else {
                    literals.join(" | ")
                };
                self.emit_alias(&name, def.docs.as_deref(), &union);
            }
            TypeDefKind::Flags(flags) => {
                self.output.push_str(&jsdoc(def.docs.as_deref(), ""));
                self.output
                    .push_str(&format!("export interface {name} {{\n"));
                for flag in flags {
                    self.output.push_str(&jsdoc(flag.docs.as_deref(), "  "));
                    self.output
                        .push_str(&format!("  {}?: boolean;\n", property_name(&flag.name)));
                }
                self.output.push_str("}\n\n");
            }
            TypeDefKind::Union(types) => {
                let cases: Vec<_> = types
                    .iter()
                    .enumerate()
                    .map(|(i, ty)| format!("{{ tag: {i}; val: {} }}", ts_type(ty)))
                    .collect();
                let union = if cases.is_empty() {
                    "never".to_string()
                } else {
                    cases.join(" | ")
                };
                self.emit_alias(&name, def.docs.as_deref(), &union);
            }
            TypeDefKind::Alias(ty) => self.emit_alias(&name, def.docs.as_deref(), &ts_type(ty)),
            // Declared as classes after the plain types.
            TypeDefKind::Resource(_) => {}
        }
    }

    fn emit_interface(&mut self, name: &str, docs: Option<&str>, fields: &[Field]) {
        self.output.push_str(&jsdoc(docs, ""));
        self.output
            .push_str(&format!("export interface {name} {{\n"));
        for field in fields {
            self.output.push_str(&jsdoc(field.docs.as_deref(), "  "));
            self.output.push_str(&format!(
                "  {}: {};\n",
                property_name(&field.name),
                ts_type(&field.ty)
            ));
        }
        self.output.push_str("}\n\n");
    }

    fn emit_tagged_union(&mut self, def: &TypeDef, cases: &[Case]) {
        let mut variant_types = Vec::new();
        let mut bodies = String::new();

        for case in cases {
            let variant_type_name = case_interface(&def.name, &case.name);
            variant_types.push(variant_type_name.clone());

            bodies.push_str(&jsdoc(case.docs.as_deref(), ""));
            bodies.push_str(&format!(
                "export interface {variant_type_name} {{\n  tag: \"{}\";\n",
                case.name
            ));
            if let Some(ty) = &case.ty {
                bodies.push_str(&format!("  val: {};\n", ts_type(ty)));
            }
            bodies.push_str("}\n\n");
        }

        let union = if variant_types.is_empty() {
            "never".to_string()
        } else {
            variant_types.join(" | ")
        };
        self.emit_alias(&class_name(&def.name), def.docs.as_deref(), &union);
        self.output.push_str(&bodies);
    }

    fn emit_alias(&mut self, name: &str, docs: Option<&str>, target: &str) {
        self.output.push_str(&jsdoc(docs, ""));
        self.output
            .push_str(&format!("export type {name} = {target};\n\n"));
    }

    fn emit_resource(&mut self, def: &TypeDef, methods: &[Function]) {
        self.output.push_str(&jsdoc(def.docs.as_deref(), ""));
        self.output.push_str(&format!(
            "export declare class {} {{\n",
            class_name(&def.name)
        ));
        for method in methods {
            self.emit_signature(method);
        }
        self.output.push_str("  /** Release the handle. */\n  drop(): void;\n}\n\n");
    }

    fn emit_bindings_class(&mut self) {
        self.output.push_str(&format!(
            "export declare class {} {{\n",
            class_name(self.interface.name())
        ));
        for function in self.interface.functions() {
            self.emit_signature(function);
        }
        self.output.push_str("}\n");
    }

    fn emit_signature(&mut self, function: &Function) {
        let mut params: Vec<_> = function
            .params
            .iter()
            .map(|p| format!("{}: {}", js_ident(&p.name), ts_type(&p.ty)))
            .collect();
        let prefix = if let FunctionKind::Static { .. } = function.kind {
            params.insert(0, format!("_lib: {}", class_name(self.interface.name())));
            "static "
        } else {
            ""
        };
        let result = function.result.as_ref().map_or("void".to_string(), ts_type);

        self.output.push_str(&jsdoc(function.docs.as_deref(), "  "));
        self.output.push_str(&format!(
            "  {prefix}{}({}): {result};\n",
            property_name(&function.name),
            params.join(", ")
        ));
    }
}

/// Interface declared for one case of a variant, e.g. `ShapeCircle`.
pub(super) fn case_interface(variant: &str, case: &str) -> String {
    format!("{}{}", class_name(variant), class_name(case))
}

/// TypeScript spelling of a value of type `ty`.
pub fn ts_type(ty: &Type) -> String {
    match ty {
        Type::Bool => "boolean".to_string(),
        Type::U8
        | Type::U16
        | Type::U32
        | Type::S8
        | Type::S16
        | Type::S32
        | Type::Float32
        | Type::Float64 => "number".to_string(),
        Type::U64 | Type::S64 => "bigint".to_string(),
        Type::Char | Type::String => "string".to_string(),
        Type::List(element) if **element == Type::U8 => "Uint8Array".to_string(),
        Type::List(element) => format!("Array<{}>", ts_type(element)),
        Type::Option(payload) => format!("{} | null", ts_type(payload)),
        Type::Expected(ok, err) => {
            let side = |tag: &str, ty: &Option<Box<Type>>| match ty {
                Some(ty) => format!("{{ tag: \"{tag}\"; val: {} }}", ts_type(ty)),
                None => format!("{{ tag: \"{tag}\" }}"),
            };
            format!("{} | {}", side("ok", ok), side("err", err))
        }
        Type::Tuple(elements) => {
            let inner: Vec<_> = elements.iter().map(ts_type).collect();
            format!("[{}]", inner.join(", "))
        }
        Type::Named(name) | Type::Handle(name) => class_name(name),
    }
}

/// Emits `src/<lib>/index.d.ts`.
pub fn loader(library: &Library) -> String {
    let name = library.name();
    let class = class_name(name);
    let mut out = generated_header("//");
    out.push_str(&format!(
        "import type {{ {class} }} from \"./{name}.js\";\n\n"
    ));
    out.push_str(
        "export interface LoadOptions {\n  /** Extra imports passed to the module. */\n  imports?: WebAssembly.Imports;\n  /** Options for the WASI environment, when the module uses it. */\n  wasiConfig?: Record<string, unknown>;\n}\n\n",
    );
    out.push_str(&format!(
        "export default function load(options?: LoadOptions): Promise<{class}>;\n"
    ));
    out
}
