use indoc::indoc;

use crate::config::Config;
use crate::emit::{Asset, Descriptor, Emitter, FileSet, JavaScript, Python};
use crate::interface::Interface;
use crate::package::{Abi, Library, Metadata, Module, Package};
use crate::{ErrorKind, File};

const WASM: &[u8] = &[0, 97, 115, 109, 1, 0, 0, 0];

const CALC: &str = indoc! {r#"
    /// A 2D point.
    record point { x: float64, y: float64 }
    enum unit { metres, feet }
    flags access { read, write }
    variant shape { circle(float32), none }
    union number { u8, string }
    type path = list<point>

    resource counter {
        static new: func(start: u32) -> counter,
        increment: func(by: u32) -> u32,
    }

    length: func(p: path, u: unit) -> float64
    parse: func(text: string) -> expected<shape, string>
"#};

fn library(label: &str, source: &str, abi: Abi) -> Library {
    let interface = Interface::from_wit(label, source).unwrap();
    let name = interface.name().to_string();
    Library::new(interface, Module::new(name, abi, WASM))
}

fn package(name: &str, libraries: Vec<Library>) -> Package {
    Package::new(Metadata::new("wasmer", name, "0.0.0"), libraries)
}

fn calc() -> Package {
    package("calc", vec![library("calc.exports.wit", CALC, Abi::None)])
}

fn paths(files: &[File]) -> Vec<&str> {
    files.iter().map(File::path).collect()
}

fn text<'a>(files: &'a [File], path: &str) -> &'a str {
    files
        .iter()
        .find(|f| f.path() == path)
        .unwrap_or_else(|| panic!("`{path}` was not generated"))
        .text()
        .unwrap()
}

#[test]
fn javascript_file_list() {
    let files = JavaScript::default().emit(&calc()).unwrap();
    assert_eq!(
        paths(&files),
        [
            "package.json",
            "src/intrinsics.js",
            "src/index.js",
            "src/index.d.ts",
            "src/calc/index.js",
            "src/calc/index.d.ts",
            "src/calc/calc.js",
            "src/calc/calc.d.ts",
            "src/calc/calc.wasm",
        ]
    );
    let wasm = files.iter().find(|f| f.path() == "src/calc/calc.wasm").unwrap();
    assert_eq!(wasm.contents(), WASM);
}

#[test]
fn javascript_without_typings() {
    let emitter = JavaScript::new(Config::default().emit_typings(false));
    let files = emitter.emit(&calc()).unwrap();
    assert!(files.iter().all(|f| !f.path().ends_with(".d.ts")));
    assert!(!text(&files, "package.json").contains("\"types\""));
}

#[test]
fn package_json() {
    let files = JavaScript::default().emit(&calc()).unwrap();
    insta::assert_snapshot!(text(&files, "package.json"), @r#"
    {
      "name": "@wasmer/calc",
      "version": "0.0.0",
      "type": "module",
      "main": "src/index.js",
      "types": "src/index.d.ts",
      "files": [
        "src"
      ]
    }
    "#);
}

#[test]
fn package_json_wasi_dependency() {
    let pkg = package("calc", vec![library("calc.wit", CALC, Abi::Wasi)]);
    let files = JavaScript::default().emit(&pkg).unwrap();
    let manifest: serde_json::Value = serde_json::from_str(text(&files, "package.json")).unwrap();
    assert_eq!(manifest["dependencies"]["@wasmer/wasi"], "^1.2.2");
    assert!(text(&files, "src/calc/index.js").contains("wasi: true"));
}

#[test]
fn javascript_index_reexports_libraries() {
    let pkg = package(
        "tools",
        vec![
            library("calc.wit", CALC, Abi::None),
            library("string-utils.wit", "upper: func(s: string) -> string", Abi::None),
        ],
    );
    let files = JavaScript::default().emit(&pkg).unwrap();
    let index = text(&files, "src/index.js");
    assert!(index.starts_with("// Generated by wit-pack"));
    assert!(index.contains("export { default as loadCalc } from \"./calc/index.js\";\n"));
    assert!(index.contains("export * as stringUtils from \"./string-utils/string-utils.js\";\n"));
}

#[test]
fn javascript_bindings() {
    let files = JavaScript::default().emit(&calc()).unwrap();
    let js = text(&files, "src/calc/calc.js");
    assert!(js.contains("import { Resource } from \"../intrinsics.js\";"));
    assert!(js.contains("export class Counter extends Resource {"));
    assert!(js.contains("  static new(_lib, start) {\n    return _lib._runtime.call(\"counter::new\", [start]);\n  }"));
    assert!(js.contains("  increment(by) {\n    return this._runtime.call(\"counter::increment\", [this, by]);\n  }"));
    assert!(js.contains("    runtime.registerResource(\"counter\", Counter);"));
    assert!(js.contains("  length(p, u) {\n    return this._runtime.call(\"length\", [p, u]);\n  }"));
}

#[test]
fn javascript_typings() {
    let files = JavaScript::default().emit(&calc()).unwrap();
    let dts = text(&files, "src/calc/calc.d.ts");
    assert!(dts.contains("export interface Point {"));
    assert!(dts.contains("export type Unit = \"metres\" | \"feet\";"));
    assert!(dts.contains("export type Path = Array<Point>;"));
    assert!(dts.contains("export declare class Counter"));
    assert!(dts.contains("export declare const descriptor: unknown;"));
}

#[test]
fn inline_modules_embed_base64() {
    let emitter = JavaScript::new(Config::default().inline_modules(true));
    let files = emitter.emit(&calc()).unwrap();
    assert!(!paths(&files).contains(&"src/calc/calc.wasm"));
    let loader = text(&files, "src/calc/index.js");
    assert!(loader.contains("const MODULE = \"AGFzbQEAAAA=\";"));
    assert!(loader.contains("decodeBase64(MODULE)"));

    let files = Python::new(Config::default().inline_modules(true))
        .emit(&calc())
        .unwrap();
    assert!(!paths(&files).contains(&"calc/calc/calc.wasm"));
    assert!(text(&files, "calc/calc/__init__.py").contains("_MODULE = \"AGFzbQEAAAA=\""));
}

#[test]
fn asset_binary_is_exact_copy() {
    let module = Module::new("calc", Abi::None, WASM);
    assert_eq!(
        Asset::new(&module, "a/calc.wasm", false),
        Asset::Binary(File::new("a/calc.wasm", WASM))
    );
    assert_eq!(
        Asset::new(&module, "a/calc.wasm", true),
        Asset::Inline("AGFzbQEAAAA=".into())
    );
}

#[test]
fn npm_names_are_checked() {
    let err = JavaScript::default()
        .emit(&package("WitPack", vec![library("calc.wit", CALC, Abi::None)]))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NamingError);
    assert_eq!(
        err.verbose(),
        "npm package name `WitPack` must be lowercase; allowed are lowercase letters, digits and `-._~`"
    );

    let err = JavaScript::default()
        .emit(&package("_private", vec![library("calc.wit", CALC, Abi::None)]))
        .unwrap_err();
    assert_eq!(
        err.verbose(),
        "npm package name `_private` must not start with `.` or `_`"
    );
}

#[test]
fn library_names_must_be_lowercase() {
    let err = JavaScript::default()
        .emit(&package("calc", vec![library("Calc.wit", "", Abi::None)]))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NamingError);
    assert_eq!(
        err.verbose(),
        "library name `Calc` must be lowercase kebab-case (e.g. `my-library`)"
    );
}

#[test]
fn imports_are_rejected() {
    let pkg = package("host", vec![library("host.imports.wit", "log: func(msg: string)", Abi::None)]);
    for emitter in [&JavaScript::default() as &dyn Emitter, &Python::default()] {
        let err = emitter.emit(&pkg).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
        assert_eq!(
            err.verbose(),
            "interface `host` describes imports; only exported interfaces can be bound"
        );
    }
}

#[test]
fn javascript_class_collision() {
    let source = "record calc { x: u8 }";
    let err = JavaScript::default()
        .emit(&package("calc", vec![library("calc.wit", source, Abi::None)]))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NamingError);
    assert_eq!(
        err.verbose(),
        "type `calc` and interface `calc` both map to the JavaScript name `Calc`"
    );
}

fn javascript_error(source: &str) -> String {
    let err = JavaScript::default()
        .emit(&package("calc", vec![library("calc.wit", source, Abi::None)]))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NamingError);
    err.verbose().to_string()
}

#[test]
fn javascript_type_shadows_resource_base() {
    assert_eq!(
        javascript_error("resource %resource { get: func() -> u32 }"),
        "type `resource` and the runtime name `Resource` both map to the JavaScript name `Resource`"
    );
}

#[test]
fn javascript_case_interface_collision() {
    let source = "variant shape { circle(u32) }\nrecord shape-circle { r: u8 }";
    assert_eq!(
        javascript_error(source),
        "type `shape-circle` and case `circle` of `shape` both map to the JavaScript name `ShapeCircle`"
    );
}

#[test]
fn javascript_member_collisions() {
    assert_eq!(
        javascript_error("get-URL: func() -> string\nget-url: func() -> string"),
        "function `get-url` and function `get-URL` both map to the JavaScript name `getUrl`"
    );
    assert_eq!(
        javascript_error("record r { a-B: u32, a-b: string }"),
        "field `a-b` of `r` and field `a-B` of `r` both map to the JavaScript name `aB`"
    );
    assert_eq!(
        javascript_error("flags f { read-ALL, read-all }"),
        "flag `read-all` of `f` and flag `read-ALL` of `f` both map to the JavaScript name `readAll`"
    );
    assert_eq!(
        javascript_error("f: func(a-b: u8, a-B: u8)"),
        "parameter `a-B` of `f` and parameter `a-b` of `f` both map to the JavaScript name `aB`"
    );
    assert_eq!(
        javascript_error("resource counter { get-URL: func() -> string, get-url: func() -> string }"),
        "method `get-url` of `counter` and method `get-URL` of `counter` both map to the JavaScript name `getUrl`"
    );
}

#[test]
fn javascript_runtime_members_are_reserved() {
    assert_eq!(
        javascript_error("constructor: func() -> u32"),
        "function `constructor` and the runtime member `constructor` both map to the JavaScript name `constructor`"
    );
    assert_eq!(
        javascript_error("resource counter { resource-name: func() -> string }"),
        "method `resource-name` of `counter` and the runtime member `resourceName` both map to the JavaScript name `resourceName`"
    );
    assert_eq!(
        javascript_error("resource counter { static constructor: func() -> counter }"),
        "method `constructor` of `counter` and the runtime member `constructor` both map to the JavaScript name `constructor`"
    );
}

#[test]
fn javascript_enum_cases_are_kept_verbatim() {
    let source = "enum e { a-b, a-B }";
    let files = JavaScript::default()
        .emit(&package("calc", vec![library("calc.wit", source, Abi::None)]))
        .unwrap();
    assert!(text(&files, "src/calc/calc.d.ts").contains("\"a-b\" | \"a-B\""));
}

#[test]
fn python_file_list() {
    let pkg = package("wit-pack", vec![library("calc.exports.wit", CALC, Abi::None)]);
    let files = Python::default().emit(&pkg).unwrap();
    assert_eq!(
        paths(&files),
        [
            "pyproject.toml",
            "MANIFEST.in",
            "wit_pack/__init__.py",
            "wit_pack/py.typed",
            "wit_pack/_intrinsics.py",
            "wit_pack/calc/__init__.py",
            "wit_pack/calc/bindings.py",
            "wit_pack/calc/calc.wasm",
        ]
    );
    insta::assert_snapshot!(text(&files, "MANIFEST.in"), @r"
    include wit_pack/py.typed
    recursive-include wit_pack *.wasm
    ");
}

#[test]
fn pyproject() {
    let pkg = package("wit-pack", vec![library("calc.exports.wit", CALC, Abi::None)]);
    let files = Python::default().emit(&pkg).unwrap();
    insta::assert_snapshot!(text(&files, "pyproject.toml"), @r#"
    [build-system]
    requires = ["setuptools>=61"]
    build-backend = "setuptools.build_meta"

    [project]
    name = "wit-pack"
    version = "0.0.0"
    description = "Python bindings for wasmer/wit-pack"
    requires-python = ">=3.7"
    dependencies = ["wasmer>=1.1.0", "wasmer_compiler_cranelift>=1.1.0"]

    [tool.setuptools]
    packages = ["wit_pack", "wit_pack.calc"]

    [tool.setuptools.package-data]
    "*" = ["py.typed", "*.wasm"]
    "#);
}

#[test]
fn python_bindings() {
    let files = Python::default().emit(&calc()).unwrap();
    let py = text(&files, "calc/calc/bindings.py");
    assert!(py.starts_with("# Generated by wit-pack"));
    assert!(py.contains("@dataclass\nclass Point:\n    \"\"\"A 2D point.\"\"\"\n    x: float\n    y: float\n"));
    assert!(py.contains("class Unit(enum.Enum):\n    METRES = 0\n    FEET = 1\n"));
    assert!(py.contains("class Access(enum.Flag):\n    READ = 1 << 0\n    WRITE = 1 << 1\n"));
    assert!(py.contains("@dataclass\nclass ShapeCircle:\n    value: float\n"));
    assert!(py.contains("@dataclass\nclass ShapeNone:\n    pass\n"));
    assert!(py.contains("Shape = Union[ShapeCircle, ShapeNone]\n"));
    assert!(py.contains("Number = Union[Number0, Number1]\n"));
    assert!(py.contains("Path = List[Point]\n"));
    assert!(py.contains("class Counter(Resource):\n    _resource_name = \"counter\"\n"));
    assert!(py.contains(
        "    @staticmethod\n    def new(_lib: Calc, start: int) -> Counter:\n        return _lib._runtime.call(\"counter::new\", [start])\n"
    ));
    assert!(py.contains(
        "    def parse(self, text: str) -> Union[Ok[Shape], Err[str]]:\n        return self._runtime.call(\"parse\", [text])\n"
    ));
    assert!(py.contains("    \"shape\": {\"circle\": ShapeCircle, \"none\": ShapeNone},\n"));
    assert!(py.contains("    \"number\": [Number0, Number1],\n"));
    let registry = &py[py.find("CLASSES").unwrap()..];
    assert!(!registry.contains("\"path\""));
}

#[test]
fn python_aliases_follow_their_targets() {
    let source = indoc! {r#"
        type outer = list<inner>
        type inner = option<leaf>
        record leaf { x: u8 }
    "#};
    let pkg = package("calc", vec![library("calc.wit", source, Abi::None)]);
    let files = Python::default().emit(&pkg).unwrap();
    let py = text(&files, "calc/calc/bindings.py");
    let leaf = py.find("class Leaf:").unwrap();
    let inner = py.find("Inner = Optional[Leaf]").unwrap();
    let outer = py.find("Outer = List[Inner]").unwrap();
    assert!(leaf < inner && inner < outer);
}

#[test]
fn python_loader() {
    let pkg = package("calc", vec![library("calc.wit", CALC, Abi::Wasi)]);
    let files = Python::default().emit(&pkg).unwrap();
    let loader = text(&files, "calc/calc/__init__.py");
    assert!(loader.contains("from .bindings import DESCRIPTOR, Calc\n"));
    assert!(loader.contains("(Path(__file__).parent / \"calc.wasm\").read_bytes()"));
    assert!(loader.contains("wasi_enabled=True"));

    let index = text(&files, "calc/__init__.py");
    assert!(index.contains("from .calc import load as load_calc\n"));
    assert!(index.contains("__all__ = [\"calc\", \"load_calc\"]\n"));
}

#[test]
fn python_keywords_are_escaped() {
    let source = "record %record { %from: u8, %type: u8 }\nimport: func(self: u8, class: string)";
    let pkg = package("calc", vec![library("calc.wit", source, Abi::None)]);
    let files = Python::default().emit(&pkg).unwrap();
    let py = text(&files, "calc/calc/bindings.py");
    assert!(py.contains("    from_: int\n    type: int\n"));
    assert!(py.contains("    def import_(self, self_: int, class_: str) -> None:\n"));
    assert!(py.contains("\"key\": \"from_\""));
}

#[test]
fn python_package_names_are_checked() {
    let lib = || vec![library("calc.wit", "", Abi::None)];

    let err = Python::default().emit(&package("class", lib())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NamingError);
    assert_eq!(
        err.verbose(),
        "package name `class` maps to the Python keyword `class`"
    );

    let err = Python::default().emit(&package("3d-tools", lib())).unwrap_err();
    assert_eq!(
        err.verbose(),
        "package name `3d-tools` does not map to a Python identifier (got `3d_tools`)"
    );
}

#[test]
fn python_class_collision() {
    let source = "variant shape { circle }\nrecord shape-circle { r: u8 }";
    let err = Python::default()
        .emit(&package("calc", vec![library("calc.wit", source, Abi::None)]))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NamingError);
    assert_eq!(
        err.verbose(),
        "type `shape-circle` and case `circle` of `shape` both map to the Python name `ShapeCircle`"
    );

    let err = Python::default()
        .emit(&package("calc", vec![library("calc.wit", "record ok { }", Abi::None)]))
        .unwrap_err();
    assert_eq!(
        err.verbose(),
        "type `ok` and the runtime name `Ok` both map to the Python name `Ok`"
    );
}

fn python_error(source: &str) -> String {
    let err = Python::default()
        .emit(&package("calc", vec![library("calc.wit", source, Abi::None)]))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NamingError);
    err.verbose().to_string()
}

#[test]
fn python_member_collisions() {
    assert_eq!(
        python_error("record r { a-B: u32, a-b: string }"),
        "field `a-b` of `r` and field `a-B` of `r` both map to the Python name `a_b`"
    );
    assert_eq!(
        python_error("enum e { a-b, a-B }"),
        "case `a-B` of `e` and case `a-b` of `e` both map to the Python name `A_B`"
    );
    assert_eq!(
        python_error("flags f { read-ALL, read-all }"),
        "flag `read-all` of `f` and flag `read-ALL` of `f` both map to the Python name `READ_ALL`"
    );
    assert_eq!(
        python_error("get-URL: func() -> string\nget-url: func() -> string"),
        "function `get-url` and function `get-URL` both map to the Python name `get_url`"
    );
    assert_eq!(
        python_error("f: func(a-b: u8, a-B: u8)"),
        "parameter `a-B` of `f` and parameter `a-b` of `f` both map to the Python name `a_b`"
    );
}

#[test]
fn python_resource_members_are_reserved() {
    assert_eq!(
        python_error("resource counter { drop: func() }"),
        "method `drop` of `counter` and the runtime member `drop` both map to the Python name `drop`"
    );
    assert_eq!(
        python_error("resource counter { static handle: func() -> u32 }"),
        "method `handle` of `counter` and the runtime member `handle` both map to the Python name `handle`"
    );
}

#[test]
fn descriptor_keys_follow_target_convention() {
    let interface = Interface::from_wit("calc.wit", CALC).unwrap();
    let js = Descriptor::new(&interface, crate::emit::javascript::property_name).unwrap();
    let json: serde_json::Value = serde_json::from_str(&js.to_json().unwrap()).unwrap();
    assert_eq!(json["interface"], "calc");
    assert_eq!(json["types"]["point"]["kind"], "record");
    assert_eq!(json["types"]["point"]["size"], 16);
    assert_eq!(json["types"]["point"]["fields"][1]["offset"], 8);
    assert_eq!(json["types"]["counter"]["drop"], "canonical_abi_drop_counter");

    let functions = json["functions"].as_array().unwrap();
    let exports: Vec<_> = functions.iter().map(|f| f["export"].as_str().unwrap()).collect();
    assert_eq!(exports, ["length", "parse", "counter::new", "counter::increment"]);

    let increment = &functions[3];
    assert_eq!(increment["kind"], "method");
    assert_eq!(increment["params"][0]["name"], "self");
    assert_eq!(increment["params"][0]["type"]["kind"], "handle");
    assert_eq!(increment["args"]["size"], 8);
}

#[test]
fn file_set_rejects_duplicates() {
    let mut files = FileSet::new();
    files.push("a.txt", "a").unwrap();
    let err = files.push("a.txt", "b").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InternalError);
    assert_eq!(err.verbose(), "`a.txt` was generated twice");
    assert_eq!(files.len(), 1);
}

#[test]
fn emission_is_deterministic() {
    let pkg = calc();
    assert_eq!(
        JavaScript::default().emit(&pkg).unwrap(),
        JavaScript::default().emit(&pkg).unwrap()
    );
    assert_eq!(
        Python::default().emit(&pkg).unwrap(),
        Python::default().emit(&pkg).unwrap()
    );
}
