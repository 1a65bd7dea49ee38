use crate::utils::{to_camel_case, to_pascal_case, to_shouty_snake_case, to_snake_case};

#[test]
fn pascal_case_from_kebab() {
    assert_eq!(to_pascal_case("wit-pack"), "WitPack");
    assert_eq!(to_pascal_case("generate-javascript"), "GenerateJavascript");
    assert_eq!(to_pascal_case("foo"), "Foo");
}

#[test]
fn pascal_case_from_snake() {
    assert_eq!(to_pascal_case("foo_bar"), "FooBar");
    assert_eq!(to_pascal_case("_foo"), "Foo");
    assert_eq!(to_pascal_case("foo_"), "Foo");
}

#[test]
fn pascal_case_normalizes() {
    assert_eq!(to_pascal_case("FOO_BAR"), "FooBar");
    assert_eq!(to_pascal_case("FOO"), "Foo");
}

#[test]
fn pascal_case_idempotent() {
    assert_eq!(to_pascal_case("FooBar"), "FooBar");
    assert_eq!(to_pascal_case("WitPack"), "WitPack");
}

#[test]
fn pascal_case_keeps_digits() {
    assert_eq!(to_pascal_case("u8-list"), "U8List");
    assert_eq!(to_pascal_case("v2"), "V2");
}

#[test]
fn camel_case_from_kebab() {
    assert_eq!(to_camel_case("from-wit"), "fromWit");
    assert_eq!(to_camel_case("package-name"), "packageName");
    assert_eq!(to_camel_case("new"), "new");
    assert_eq!(to_camel_case(""), "");
}

#[test]
fn snake_case_from_kebab() {
    assert_eq!(to_snake_case("from-wit"), "from_wit");
    assert_eq!(to_snake_case("wit-pack"), "wit_pack");
    assert_eq!(to_snake_case("a-b-c"), "a_b_c");
}

#[test]
fn snake_case_from_pascal() {
    assert_eq!(to_snake_case("FooBar"), "foo_bar");
    assert_eq!(to_snake_case("Foo"), "foo");
}

#[test]
fn snake_case_from_camel() {
    assert_eq!(to_snake_case("fooBar"), "foo_bar");
    assert_eq!(to_snake_case("fooBarBaz"), "foo_bar_baz");
}

#[test]
fn snake_case_collapses_separators() {
    assert_eq!(to_snake_case("foo--bar"), "foo_bar");
    assert_eq!(to_snake_case("foo-Bar"), "foo_bar");
}

#[test]
fn shouty_snake_case() {
    assert_eq!(to_shouty_snake_case("read-write"), "READ_WRITE");
    assert_eq!(to_shouty_snake_case("none"), "NONE");
}

#[test]
fn camel_humps_split_words() {
    assert_eq!(to_pascal_case("fooBar"), "FooBar");
    assert_eq!(to_snake_case("u8List"), "u8_list");
    assert_eq!(to_camel_case("FooBar"), "fooBar");
}

#[test]
fn mixed_case_words_keep_capitals() {
    assert_eq!(to_pascal_case("HTTPServer"), "HTTPServer");
    assert_eq!(to_pascal_case("HTTP-server"), "HttpServer");
}

#[test]
fn conversions_compose() {
    for name in ["wit-pack", "generate-javascript", "a-b-c"] {
        assert_eq!(to_snake_case(&to_pascal_case(name)), to_snake_case(name));
        assert_eq!(to_pascal_case(&to_camel_case(name)), to_pascal_case(name));
    }
}
