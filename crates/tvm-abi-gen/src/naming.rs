//! Method, type and identifier names derived from schema entries.
//!
//! Method names follow a fixed convention: a function is exposed as
//! `send<Name>` and a getter as `get<Name>`, with the first character of the
//! declared name upper-cased. A declared name that already carries the prefix
//! is kept as-is.

use heck::{ToSnakeCase, ToUpperCamelCase};

/// Strict and reserved keywords that can be written as raw identifiers.
const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Argument and local names used by generated method bodies.
const RESERVED_ARGUMENTS: &[&str] = &[
    "provider", "codec", "value", "bounce", "send_mode", "secret_key", "header", "params",
    "json", "body", "message", "signed", "args", "stack",
];

/// Upper-case the first character and keep the rest.
pub fn upper_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Internal call method for a function.
pub fn send_method(name: &str) -> String {
    if name.starts_with("send") {
        name.to_string()
    } else {
        format!("send{}", upper_first(name))
    }
}

/// Read-only method for a getter.
pub fn get_method(name: &str) -> String {
    if name.starts_with("get") {
        name.to_string()
    } else {
        format!("get{}", upper_first(name))
    }
}

/// Static builder for an internal message body.
pub fn body_builder(name: &str) -> String {
    format!("{name}Body")
}

/// Builder for a signed external message body.
pub fn external_body_builder(name: &str) -> String {
    format!("{name}BodyExternal")
}

/// Method sending a signed external message.
pub fn external_send_method(name: &str) -> String {
    format!("{}External", send_method(name))
}

/// Rust type name for a schema name.
pub fn type_name(name: &str) -> String {
    name.to_upper_camel_case()
}

/// File and module name for a contract.
pub fn module_name(contract: &str) -> String {
    identifier(&contract.to_snake_case())
}

/// A usable Rust identifier for a schema name.
///
/// Keywords become raw identifiers where the language allows it; the rest
/// get a trailing underscore.
pub fn identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if NON_RAW_KEYWORDS.contains(&ident.as_str()) {
        ident.push('_');
    } else if RUST_KEYWORDS.contains(&ident.as_str()) {
        ident.insert_str(0, "r#");
    }
    ident
}

/// Identifier for a positional argument, kept clear of the names generated
/// methods already use.
pub fn argument(name: &str) -> String {
    let ident = identifier(name);
    if RESERVED_ARGUMENTS.contains(&ident.as_str()) {
        format!("{ident}_")
    } else {
        ident
    }
}
