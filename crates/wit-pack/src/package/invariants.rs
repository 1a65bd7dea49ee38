//! Construction invariants of the package model, excluded from coverage reports.
//!
//! Violations are programmer errors: callers validate user input (see
//! [`PackageName`](super::PackageName) and [`Abi`](super::Abi)) before
//! building the model, so these only fire on bugs.

#![cfg_attr(coverage_nightly, coverage(off))]

use std::collections::HashSet;

use super::Library;

/// Names that end up as path components of generated files.
pub(super) fn assert_path_safe(what: &str, value: &str) {
    assert!(!value.is_empty(), "{what} must not be empty");
    assert!(
        !value
            .chars()
            .any(|c| c == '/' || c == '\\' || c == '\0' || c.is_whitespace()),
        "{what} `{value}` contains a path separator, NUL or whitespace"
    );
    assert!(
        value != "." && value != "..",
        "{what} `{value}` is a relative path segment"
    );
}

pub(super) fn assert_libraries(libraries: &[Library]) {
    assert!(!libraries.is_empty(), "a package needs at least one library");

    let mut seen = HashSet::new();
    for library in libraries {
        let name = library.interface().name();
        assert!(
            seen.insert(name),
            "interface `{name}` appears in more than one library"
        );
    }
}
