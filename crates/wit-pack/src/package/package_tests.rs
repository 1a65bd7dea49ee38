use super::*;

fn library(label: &str) -> Library {
    let interface = Interface::from_wit(label, "").unwrap();
    Library::new(interface, Module::new("m", Abi::None, vec![0, 97, 115, 109]))
}

#[test]
fn metadata_accessors() {
    let metadata = Metadata::new("wasmer", "wit-pack", "0.0.0");
    assert_eq!(metadata.namespace(), "wasmer");
    assert_eq!(metadata.name(), "wit-pack");
    assert_eq!(metadata.version(), "0.0.0");
    assert_eq!(metadata.qualified_name(), "wasmer/wit-pack");
}

#[test]
#[should_panic(expected = "namespace must not be empty")]
fn metadata_rejects_empty_namespace() {
    Metadata::new("", "wit-pack", "0.0.0");
}

#[test]
#[should_panic(expected = "contains a path separator")]
fn metadata_rejects_separator() {
    Metadata::new("wasmer", "wit/pack", "0.0.0");
}

#[test]
#[should_panic(expected = "relative path segment")]
fn metadata_rejects_dot_dot() {
    Metadata::new("wasmer", "..", "0.0.0");
}

#[test]
fn package_name_parses() {
    let name: PackageName = "wasmer/wit-pack".parse().unwrap();
    assert_eq!(name.to_string(), "wasmer/wit-pack");
    assert_eq!(
        name.with_version("1.2.3"),
        Metadata::new("wasmer", "wit-pack", "1.2.3")
    );
}

#[test]
fn package_name_errors() {
    assert_eq!(
        "wit-pack".parse::<PackageName>(),
        Err(PackageNameError::MissingNamespace("wit-pack".into()))
    );
    assert_eq!(
        "/wit-pack".parse::<PackageName>(),
        Err(PackageNameError::Empty("/wit-pack".into()))
    );
    assert_eq!(
        "a/b/c".parse::<PackageName>(),
        Err(PackageNameError::InvalidCharacter("a/b/c".into()))
    );
    assert_eq!(
        "wasmer/wit pack".parse::<PackageName>().unwrap_err().to_string(),
        "`wasmer/wit pack` contains a path separator, whitespace or NUL"
    );
}

#[test]
fn abi_from_str() {
    assert_eq!("none".parse::<Abi>(), Ok(Abi::None));
    assert_eq!("WASI".parse::<Abi>(), Ok(Abi::Wasi));
    assert_eq!(
        "emscripten".parse::<Abi>().unwrap_err().to_string(),
        "unknown ABI `emscripten` (expected `none` or `wasi`)"
    );
    assert_eq!(Abi::default(), Abi::None);
}

#[test]
fn module_debug_hides_bytes() {
    let module = Module::new("calc", Abi::Wasi, vec![1, 2, 3]);
    assert_eq!(
        format!("{module:?}"),
        "Module { name: \"calc\", abi: Wasi, bytes: <3 bytes> }"
    );
}

#[test]
fn package_keeps_library_order() {
    let metadata = Metadata::new("wasmer", "demo", "0.1.0");
    let package = Package::new(metadata, vec![library("b.wit"), library("a.wit")]);
    let names: Vec<_> = package.libraries().iter().map(Library::name).collect();
    assert_eq!(names, ["b", "a"]);
    assert!(!package.requires_wasi());
}

#[test]
fn package_detects_wasi() {
    let interface = Interface::from_wit("w.wit", "").unwrap();
    let library = Library::new(interface, Module::new("w", Abi::Wasi, Vec::new()));
    let package = Package::new(Metadata::new("a", "b", "1"), vec![library]);
    assert!(package.requires_wasi());
}

#[test]
#[should_panic(expected = "at least one library")]
fn package_rejects_no_libraries() {
    Package::new(Metadata::new("wasmer", "demo", "0.1.0"), Vec::new());
}

#[test]
#[should_panic(expected = "interface `calc` appears in more than one library")]
fn package_rejects_duplicate_interfaces() {
    Package::new(
        Metadata::new("wasmer", "demo", "0.1.0"),
        vec![library("calc.wit"), library("other/calc.exports.wit")],
    );
}

#[test]
fn file_text() {
    let file = File::new("src/index.js", "export {};\n");
    assert_eq!(file.path(), "src/index.js");
    assert_eq!(file.text(), Some("export {};\n"));
    assert_eq!(File::new("x.wasm", vec![0xff, 0xfe]).text(), None);
}
