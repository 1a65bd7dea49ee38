use crate::{
    Abi, Config, Emitter, ErrorKind, File, Generator, Interface, Library, Metadata, Module,
    Package, PackageName,
};

const WIT_PACK: &str = include_str!("../wit/wit-pack.exports.wit");

fn wit_pack() -> Package {
    let interface = Interface::from_wit("wit-pack.exports.wit", WIT_PACK).unwrap();
    let module = Module::new("wit_pack_wasm", Abi::None, b"\0asm\x01\0\0\0".to_vec());
    let name: PackageName = "wasmer/wit-pack".parse().unwrap();
    Package::new(name.with_version("0.0.0"), vec![Library::new(interface, module)])
}

fn text<'a>(files: &'a [File], path: &str) -> &'a str {
    files
        .iter()
        .find(|f| f.path() == path)
        .and_then(File::text)
        .unwrap_or_else(|| panic!("`{path}` missing or not text"))
}

#[test]
fn generates_javascript_for_itself() {
    let files = Generator::new().generate_javascript(&wit_pack()).unwrap();
    let manifest: serde_json::Value =
        serde_json::from_str(text(&files, "package.json")).unwrap();
    assert_eq!(manifest["name"], "@wasmer/wit-pack");
    assert_eq!(manifest["version"], "0.0.0");

    let paths: Vec<_> = files.iter().map(File::path).collect();
    assert!(paths.contains(&"src/wit-pack/index.js"));
    assert!(paths.contains(&"src/wit-pack/wit-pack.js"));
    assert!(paths.contains(&"src/wit-pack/wit-pack.wasm"));

    let js = text(&files, "src/wit-pack/wit-pack.js");
    assert!(js.contains("export class WitPack {"));
    assert!(js.contains("export class Interface extends Resource {"));
    assert!(js.contains("  static fromWit(_lib, name, contents) {"));
    assert!(js.contains("  generateJavascript(pkg) {"));
}

#[test]
fn generates_python_for_itself() {
    let files = Generator::new().generate_python(&wit_pack()).unwrap();
    let paths: Vec<_> = files.iter().map(File::path).collect();
    assert_eq!(paths[0], "pyproject.toml");
    assert!(paths.contains(&"wit_pack/wit_pack/bindings.py"));
    assert!(paths.contains(&"wit_pack/wit_pack/wit_pack.wasm"));

    let py = text(&files, "wit_pack/wit_pack/bindings.py");
    assert!(py.contains("class WitPack:\n"));
    assert!(py.contains("class Abi(enum.Enum):\n"));
    assert!(py.contains(
        "    def generate_python(self, pkg: Package) -> Union[Ok[List[File]], Err[Error]]:\n"
    ));
}

#[test]
fn target_lookup_ignores_case_and_accepts_aliases() {
    let generator = Generator::new();
    let package = wit_pack();
    let js = generator.generate("javascript", &package).unwrap();
    assert_eq!(generator.generate("JS", &package).unwrap(), js);
    assert_eq!(generator.generate("JavaScript", &package).unwrap(), js);
    assert_eq!(
        generator.generate("py", &package).unwrap(),
        generator.generate_python(&package).unwrap()
    );
    assert_eq!(generator.targets().collect::<Vec<_>>(), ["javascript", "python"]);
}

#[test]
fn unknown_target() {
    let err = Generator::new().generate("c", &wit_pack()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedTarget);
    assert_eq!(
        err.verbose(),
        "unknown target `c` (available: javascript, python)"
    );
}

#[test]
fn generation_is_deterministic() {
    let package = wit_pack();
    let first = Generator::new().generate_javascript(&package).unwrap();
    let second = Generator::new().generate_javascript(&package).unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_interface_still_produces_a_package() {
    let interface = Interface::from_wit("empty.wit", "").unwrap();
    let module = Module::new("empty", Abi::None, Vec::new());
    let package = Package::new(
        Metadata::new("wasmer", "empty", "0.1.0"),
        vec![Library::new(interface, module)],
    );
    let files = Generator::new().generate_javascript(&package).unwrap();
    let js = text(&files, "src/empty/empty.js");
    assert!(js.contains("export class Empty {"));
    assert!(!js.contains("Resource"));
}

#[test]
fn config_reaches_builtin_emitters() {
    let generator = Generator::builder()
        .config(Config::default().inline_modules(true).emit_typings(false))
        .build();
    let files = generator.generate_javascript(&wit_pack()).unwrap();
    assert!(files.iter().all(|f| !f.path().ends_with(".wasm")));
    assert!(files.iter().all(|f| !f.path().ends_with(".d.ts")));
}

struct Listing;

impl Emitter for Listing {
    fn name(&self) -> &'static str {
        "listing"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["ls"]
    }

    fn emit(&self, package: &Package) -> crate::Result<Vec<File>> {
        let names: Vec<_> = package.libraries().iter().map(|l| l.name()).collect();
        Ok(vec![File::new("libraries.txt", names.join("\n"))])
    }
}

#[test]
fn custom_emitters_are_registered() {
    let generator = Generator::builder().emitter(Box::new(Listing)).build();
    assert_eq!(
        generator.targets().collect::<Vec<_>>(),
        ["javascript", "python", "listing"]
    );
    let files = generator.generate("LS", &wit_pack()).unwrap();
    assert_eq!(files, [File::new("libraries.txt", "wit-pack")]);
}

#[test]
fn generator_is_shared_across_threads() {
    let generator = Generator::new();
    let package = wit_pack();
    let expected = generator.generate_javascript(&package).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let generator = &generator;
                let package = &package;
                scope.spawn(move || {
                    let target = if i % 2 == 0 { "javascript" } else { "python" };
                    (target, generator.generate(target, package).unwrap())
                })
            })
            .collect();
        for handle in handles {
            let (target, files) = handle.join().unwrap();
            if target == "javascript" {
                assert_eq!(files, expected);
            } else {
                assert!(!files.is_empty());
            }
        }
    });
}
