//! Identifier case conversion.
//!
//! WIT identifiers are kebab-case (`generate-javascript`). Every target
//! language wants its own spelling, so the emitters funnel names through
//! these helpers instead of formatting them ad hoc. All conversions first
//! split the input into words, so they accept each other's output.

/// Split on `-`, `_` and `.`, and before an uppercase letter that follows a
/// lowercase letter or digit.
fn words(s: &str) -> Vec<&str> {
    let mut out = Vec::new();
    for chunk in s.split(['-', '_', '.']) {
        let mut start = 0;
        let mut prev: Option<char> = None;
        for (i, c) in chunk.char_indices() {
            let hump = c.is_ascii_uppercase()
                && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit());
            if hump {
                out.push(&chunk[start..i]);
                start = i;
            }
            prev = Some(c);
        }
        out.push(&chunk[start..]);
    }
    out.retain(|w| !w.is_empty());
    out
}

/// Capitalize a word. All-caps words are normalized, mixed-case words keep
/// their inner capitals.
fn capitalize(word: &str, out: &mut String) {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return;
    };
    out.push(first.to_ascii_uppercase());
    let rest = chars.as_str();
    if rest.chars().any(|c| c.is_ascii_lowercase()) {
        out.push_str(rest);
    } else {
        out.push_str(&rest.to_ascii_lowercase());
    }
}

/// Convert to PascalCase.
///
/// ```
/// use wit_pack_core::utils::to_pascal_case;
/// assert_eq!(to_pascal_case("wit-pack"), "WitPack");
/// assert_eq!(to_pascal_case("FOO_BAR"), "FooBar");
/// assert_eq!(to_pascal_case("FooBar"), "FooBar");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for word in words(s) {
        capitalize(word, &mut result);
    }
    result
}

/// Convert to camelCase.
///
/// ```
/// use wit_pack_core::utils::to_camel_case;
/// assert_eq!(to_camel_case("from-wit"), "fromWit");
/// assert_eq!(to_camel_case("new"), "new");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Convert to snake_case.
///
/// ```
/// use wit_pack_core::utils::to_snake_case;
/// assert_eq!(to_snake_case("from-wit"), "from_wit");
/// assert_eq!(to_snake_case("fooBar"), "foo_bar");
/// ```
pub fn to_snake_case(s: &str) -> String {
    words(s)
        .iter()
        .map(|w| w.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Convert to SCREAMING_SNAKE_CASE.
pub fn to_shouty_snake_case(s: &str) -> String {
    to_snake_case(s).to_ascii_uppercase()
}
