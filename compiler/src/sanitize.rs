use std::collections::HashSet;

use lazy_static::lazy_static;

lazy_static! {
    /// Identifiers that cannot be used verbatim in the generated code:
    /// Rust's strict and reserved keywords, plus `Self`.
    static ref RUST_KEYWORDS: HashSet<&'static str> = [
        "as", "async", "await", "break", "const", "continue", "crate", "dyn",
        "else", "enum", "extern", "false", "fn", "for", "if", "impl", "in",
        "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return",
        "self", "Self", "static", "struct", "super", "trait", "true", "try",
        "type", "unsafe", "use", "where", "while",
        // reserved for future editions
        "abstract", "become", "box", "do", "final", "gen", "macro",
        "override", "priv", "typeof", "unsized", "virtual", "yield",
    ]
    .iter()
    .copied()
    .collect();
}

/// Schema identifiers that collide with a Rust keyword get a fixed `_pb`
/// suffix; everything else passes through untouched.
pub fn sanitize_name(name: &str) -> String {
    if RUST_KEYWORDS.contains(name) {
        format!("{}_pb", name)
    } else {
        name.to_owned()
    }
}

/// Upper-snake-case enum value names become capitalized-segment identifiers:
/// `EXAMPLE_ENUM_NAME` → `ExampleEnumName`.
pub fn enum_variant_name(name: &str) -> String {
    name.split('_')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().to_string() + &chars.as_str().to_lowercase(),
            }
        })
        .collect()
}
