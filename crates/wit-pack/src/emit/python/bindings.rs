//! Python source: `bindings.py` and the per-library `__init__.py`.
//!
//! Value mapping:
//! - integers are `int`, floats `float`, `char` and `string` are `str`
//! - `list<u8>` is `bytes`, other lists are `List[T]`, tuples `Tuple[...]`
//! - `option<T>` is `Optional[T]`, `expected<T, E>` is `Ok[T]` or `Err[E]`
//! - records are dataclasses, enums `enum.Enum`, flags `enum.Flag`
//! - every variant case and union member gets its own dataclass

use std::collections::HashSet;

use wit_pack_core::utils::to_shouty_snake_case;

use crate::emit::{Asset, generated_header};
use crate::interface::{Case, Field, Function, FunctionKind, Interface, Type, TypeDef, TypeDefKind};
use crate::package::{Abi, Library};

use super::{class_name, docstring, py_ident};

/// Dataclass for one case of a variant, e.g. `ShapeCircle`.
pub(crate) fn case_class(variant: &str, case: &str) -> String {
    format!("{}{}", class_name(variant), class_name(case))
}

/// Dataclass for the `index`th member of a union, e.g. `Number0`.
pub(crate) fn union_class(union: &str, index: usize) -> String {
    format!("{}{index}", class_name(union))
}

/// Emits `<pkg>/<lib>/bindings.py`.
pub struct BindingsEmitter<'a> {
    interface: &'a Interface,
    descriptor: &'a str,
    output: String,
}

impl<'a> BindingsEmitter<'a> {
    pub fn new(library: &'a Library, descriptor: &'a str) -> Self {
        Self {
            interface: library.interface(),
            descriptor,
            output: String::new(),
        }
    }

    pub fn emit(mut self) -> String {
        self.output.push_str(&generated_header("#"));
        self.output.push_str("from __future__ import annotations\n\n");
        self.output.push_str("import enum\nimport json\n");
        self.output.push_str("from dataclasses import dataclass\n");
        self.output.push_str(
            "from typing import Any, Dict, List, NoReturn, Optional, Tuple, Union\n\n",
        );
        self.output
            .push_str("from .._intrinsics import Err, Ok, Resource, Runtime\n\n");
        self.output.push_str(&format!(
            "DESCRIPTOR: Dict[str, Any] = json.loads(\n    r\"\"\"\n{}\n\"\"\"\n)\n\n",
            self.descriptor
        ));

        // Classes first: type aliases are evaluated eagerly and may name them.
        for def in self.interface.types() {
            self.emit_classes(def);
        }
        for def in self.interface.types() {
            let members: Vec<_> = match &def.kind {
                TypeDefKind::Variant(cases) => {
                    cases.iter().map(|c| case_class(&def.name, &c.name)).collect()
                }
                TypeDefKind::Union(types) => {
                    (0..types.len()).map(|i| union_class(&def.name, i)).collect()
                }
                _ => continue,
            };
            self.emit_alias(def, &union_of(&members));
        }
        for def in alias_order(self.interface) {
            if let TypeDefKind::Alias(ty) = &def.kind {
                self.emit_alias(def, &py_type(ty));
            }
        }

        self.emit_bindings_class();
        self.emit_class_registry();
        self.output
    }

    fn emit_classes(&mut self, def: &TypeDef) {
        let name = class_name(&def.name);
        let docs = def.docs.as_deref();
        match &def.kind {
            TypeDefKind::Record(fields) => self.emit_dataclass(&name, docs, fields),
            TypeDefKind::Variant(cases) => {
                for case in cases {
                    let class = case_class(&def.name, &case.name);
                    let value = case.ty.as_ref().map(py_type);
                    self.emit_case_class(&class, case.docs.as_deref(), value.as_deref());
                }
            }
            TypeDefKind::Enum(cases) => self.emit_enum(&name, docs, "Enum", cases, |i| i.to_string()),
            TypeDefKind::Flags(flags) => {
                self.emit_enum(&name, docs, "Flag", flags, |i| format!("1 << {i}"))
            }
            TypeDefKind::Union(types) => {
                for (index, ty) in types.iter().enumerate() {
                    let class = union_class(&def.name, index);
                    self.emit_case_class(&class, None, Some(&py_type(ty)));
                }
            }
            TypeDefKind::Alias(_) => {}
            TypeDefKind::Resource(methods) => self.emit_resource(def, methods),
        }
    }

    fn emit_dataclass(&mut self, name: &str, docs: Option<&str>, fields: &[Field]) {
        self.output.push_str(&format!("@dataclass\nclass {name}:\n"));
        self.output.push_str(&docstring(docs, "    "));
        if fields.is_empty() && docs.is_none() {
            self.output.push_str("    pass\n");
        }
        for field in fields {
            self.output.push_str(&format!(
                "    {}: {}\n",
                py_ident(&field.name),
                py_type(&field.ty)
            ));
        }
        self.output.push_str("\n\n");
    }

    fn emit_case_class(&mut self, name: &str, docs: Option<&str>, value: Option<&str>) {
        self.output.push_str(&format!("@dataclass\nclass {name}:\n"));
        self.output.push_str(&docstring(docs, "    "));
        match value {
            Some(ty) => self.output.push_str(&format!("    value: {ty}\n")),
            None if docs.is_none() => self.output.push_str("    pass\n"),
            None => {}
        }
        self.output.push_str("\n\n");
    }

    fn emit_enum(
        &mut self,
        name: &str,
        docs: Option<&str>,
        base: &str,
        cases: &[Case],
        value: impl Fn(usize) -> String,
    ) {
        self.output.push_str(&format!("class {name}(enum.{base}):\n"));
        self.output.push_str(&docstring(docs, "    "));
        if cases.is_empty() && docs.is_none() {
            self.output.push_str("    pass\n");
        }
        for (index, case) in cases.iter().enumerate() {
            self.output.push_str(&format!(
                "    {} = {}\n",
                to_shouty_snake_case(&case.name),
                value(index)
            ));
        }
        self.output.push_str("\n\n");
    }

    fn emit_alias(&mut self, def: &TypeDef, target: &str) {
        self.output
            .push_str(&format!("{} = {target}\n", class_name(&def.name)));
        if let Some(docs) = &def.docs {
            for line in docs.lines() {
                if line.is_empty() {
                    self.output.push_str("#\n");
                } else {
                    self.output.push_str(&format!("# {line}\n"));
                }
            }
        }
        self.output.push_str("\n\n");
    }

    fn emit_resource(&mut self, def: &TypeDef, methods: &[Function]) {
        self.output.push_str(&format!(
            "class {}(Resource):\n",
            class_name(&def.name)
        ));
        self.output.push_str(&docstring(def.docs.as_deref(), "    "));
        self.output
            .push_str(&format!("    _resource_name = \"{}\"\n", def.name));
        for method in methods {
            self.output.push('\n');
            self.emit_method(method);
        }
        self.output.push_str("\n\n");
    }

    fn emit_bindings_class(&mut self) {
        let name = class_name(self.interface.name());
        self.output.push_str(&format!("class {name}:\n"));
        self.output.push_str(
            "    def __init__(self, runtime: Runtime) -> None:\n        self._runtime = runtime\n        runtime.register(CLASSES)\n",
        );
        for function in self.interface.functions() {
            self.output.push('\n');
            self.emit_method(function);
        }
        self.output.push_str("\n\n");
    }

    fn emit_method(&mut self, function: &Function) {
        let params: Vec<_> = function
            .params
            .iter()
            .map(|p| format!("{}: {}", py_ident(&p.name), py_type(&p.ty)))
            .collect();
        let names: Vec<_> = function.params.iter().map(|p| py_ident(&p.name)).collect();

        let (decorator, receiver, runtime, args) = match &function.kind {
            FunctionKind::Freestanding => ("", "self".to_string(), "self._runtime", names),
            FunctionKind::Method { .. } => {
                let mut args = vec!["self".to_string()];
                args.extend(names);
                ("", "self".to_string(), "self._runtime", args)
            }
            FunctionKind::Static { .. } => {
                let lib = format!("_lib: {}", class_name(self.interface.name()));
                ("    @staticmethod\n", lib, "_lib._runtime", names)
            }
        };

        let mut signature = vec![receiver];
        signature.extend(params);
        let result = function.result.as_ref().map_or("None".to_string(), py_type);

        self.output.push_str(decorator);
        self.output.push_str(&format!(
            "    def {}({}) -> {result}:\n",
            py_ident(&function.name),
            signature.join(", ")
        ));
        self.output
            .push_str(&docstring(function.docs.as_deref(), "        "));
        self.output.push_str(&format!(
            "        return {runtime}.call(\"{}\", [{}])\n",
            function.core_export_name(),
            args.join(", ")
        ));
    }

    /// Maps definition names to the classes the runtime instantiates.
    fn emit_class_registry(&mut self) {
        self.output.push_str("CLASSES: Dict[str, Any] = {\n");
        for def in self.interface.types() {
            let entry = match &def.kind {
                TypeDefKind::Record(_)
                | TypeDefKind::Enum(_)
                | TypeDefKind::Flags(_)
                | TypeDefKind::Resource(_) => class_name(&def.name),
                TypeDefKind::Variant(cases) => {
                    let entries: Vec<_> = cases
                        .iter()
                        .map(|c| format!("\"{}\": {}", c.name, case_class(&def.name, &c.name)))
                        .collect();
                    format!("{{{}}}", entries.join(", "))
                }
                TypeDefKind::Union(types) => {
                    let entries: Vec<_> = (0..types.len()).map(|i| union_class(&def.name, i)).collect();
                    format!("[{}]", entries.join(", "))
                }
                TypeDefKind::Alias(_) => continue,
            };
            self.output
                .push_str(&format!("    \"{}\": {entry},\n", def.name));
        }
        self.output.push_str("}\n");
    }
}

fn union_of(members: &[String]) -> String {
    match members {
        [] => "NoReturn".to_string(),
        [single] => single.clone(),
        _ => format!("Union[{}]", members.join(", ")),
    }
}

/// Aliases ordered so each one comes after the aliases it names.
fn alias_order(interface: &Interface) -> Vec<&TypeDef> {
    fn visit<'a>(
        interface: &'a Interface,
        def: &'a TypeDef,
        done: &mut HashSet<&'a str>,
        out: &mut Vec<&'a TypeDef>,
    ) {
        let TypeDefKind::Alias(ty) = &def.kind else {
            return;
        };
        if !done.insert(def.name.as_str()) {
            return;
        }
        for name in ty.references() {
            if let Some(target) = interface.get_type(name) {
                visit(interface, target, done, out);
            }
        }
        out.push(def);
    }

    let mut done = HashSet::new();
    let mut out = Vec::new();
    for def in interface.types() {
        visit(interface, def, &mut done, &mut out);
    }
    out
}

pub fn py_type(ty: &Type) -> String {
    match ty {
        Type::Bool => "bool".to_string(),
        Type::U8
        | Type::U16
        | Type::U32
        | Type::U64
        | Type::S8
        | Type::S16
        | Type::S32
        | Type::S64 => "int".to_string(),
        Type::Float32 | Type::Float64 => "float".to_string(),
        Type::Char | Type::String => "str".to_string(),
        Type::List(element) if **element == Type::U8 => "bytes".to_string(),
        Type::List(element) => format!("List[{}]", py_type(element)),
        Type::Option(payload) => format!("Optional[{}]", py_type(payload)),
        Type::Expected(ok, err) => {
            let side = |t: &Option<Box<Type>>| t.as_deref().map_or("None".to_string(), py_type);
            format!("Union[Ok[{}], Err[{}]]", side(ok), side(err))
        }
        Type::Tuple(elements) if elements.is_empty() => "Tuple[()]".to_string(),
        Type::Tuple(elements) => {
            let inner: Vec<_> = elements.iter().map(py_type).collect();
            format!("Tuple[{}]", inner.join(", "))
        }
        Type::Named(name) | Type::Handle(name) => class_name(name),
    }
}

/// Emits `<pkg>/<lib>/__init__.py` with its `load()` function.
pub fn loader(library: &Library, asset: &Asset) -> String {
    let class = class_name(library.interface().name());
    let module = py_ident(library.name());
    let mut out = generated_header("#");

    match asset {
        Asset::Binary(_) => out.push_str("from pathlib import Path\n"),
        Asset::Inline(_) => out.push_str("import base64\n"),
    }
    out.push_str("from typing import Any, Dict, Optional\n\n");
    out.push_str("from .._intrinsics import instantiate\n");
    out.push_str("from .bindings import *  # noqa: F401,F403\n");
    out.push_str(&format!("from .bindings import DESCRIPTOR, {class}\n\n"));

    let source = match asset {
        Asset::Binary(_) => format!("(Path(__file__).parent / \"{module}.wasm\").read_bytes()"),
        Asset::Inline(encoded) => {
            out.push_str(&format!("_MODULE = \"{encoded}\"\n\n"));
            "base64.b64decode(_MODULE)".to_string()
        }
    };

    let wasi = if library.module().abi() == Abi::Wasi {
        "True"
    } else {
        "False"
    };
    out.push_str(&format!(
        "\ndef load(imports: Optional[Dict[str, Dict[str, Any]]] = None) -> {class}:\n    wasm = {source}\n    runtime = instantiate(wasm, DESCRIPTOR, wasi_enabled={wasi}, imports=imports)\n    return {class}(runtime)\n"
    ));
    out
}
