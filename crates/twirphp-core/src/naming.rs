//! Naming rules for PHP output.
//!
//! This module maps protobuf metadata onto PHP names and PSR-4 paths.
//!
//! # Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | package `acme.billing` | [`namespace`] | `Acme\Billing` |
//! | `php_namespace = "Acme\\Pay"` | [`namespace`] | `Acme\Pay` |
//! | `Acme\Billing` | [`path_from_namespace`] | `Acme/Billing` |
//! | `Empty` | [`class_name`] | `PBEmpty` |
//! | `snake_case` | [`to_camel_case`] | `camelCase` |
//! | `word` | [`ucfirst`] | `Word` |
//! | `Word` | [`lcfirst`] | `word` |
//!
//! [`path`] is defined as `path_from_namespace(namespace(hint))`, so global
//! artifacts, which only know their namespace, land in the same directory as
//! the per-file artifacts of that namespace.

use crate::descriptor::NamespaceHint;
use crate::error::{GeneratorError, GeneratorResult};

/// PHP namespace separator.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Words PHP does not accept as class or namespace names.
const RESERVED_NAMES: &[&str] = &[
    "abstract",
    "and",
    "array",
    "as",
    "bool",
    "break",
    "callable",
    "case",
    "catch",
    "class",
    "clone",
    "const",
    "continue",
    "declare",
    "default",
    "die",
    "do",
    "echo",
    "else",
    "elseif",
    "empty",
    "enddeclare",
    "endfor",
    "endforeach",
    "endif",
    "endswitch",
    "endwhile",
    "eval",
    "exit",
    "extends",
    "false",
    "final",
    "finally",
    "float",
    "fn",
    "for",
    "foreach",
    "function",
    "global",
    "goto",
    "if",
    "implements",
    "include",
    "include_once",
    "instanceof",
    "insteadof",
    "int",
    "interface",
    "isset",
    "iterable",
    "list",
    "match",
    "mixed",
    "namespace",
    "never",
    "new",
    "null",
    "object",
    "or",
    "parent",
    "print",
    "private",
    "protected",
    "public",
    "readonly",
    "require",
    "require_once",
    "return",
    "self",
    "static",
    "string",
    "switch",
    "throw",
    "trait",
    "true",
    "try",
    "unset",
    "use",
    "var",
    "void",
    "while",
    "xor",
    "yield",
];

/// Check whether a name collides with a PHP reserved word (case-insensitive).
pub fn is_reserved(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    RESERVED_NAMES.contains(&lower.as_str())
}

/// Prefix used for reserved names. The well-known types get `GPB`, like the
/// official protobuf PHP runtime.
fn reserved_prefix(package: &str) -> &'static str {
    if package == "google.protobuf" {
        "GPB"
    } else {
        "PB"
    }
}

/// PHP-safe class name for a protobuf type or service declared in `package`.
///
/// # Examples
///
/// ```
/// use twirphp_core::naming::class_name;
///
/// assert_eq!(class_name("Invoice", "acme.billing"), "Invoice");
/// assert_eq!(class_name("Class", "acme.billing"), "PBClass");
/// assert_eq!(class_name("Empty", "google.protobuf"), "GPBEmpty");
/// ```
pub fn class_name(name: &str, package: &str) -> String {
    if is_reserved(name) {
        format!("{}{}", reserved_prefix(package), name)
    } else {
        name.to_string()
    }
}

/// Resolve the PHP namespace for a file.
///
/// An explicit `php_namespace` wins and is used verbatim. Otherwise the
/// package segments are upper-cased and joined with `\`.
///
/// # Errors
///
/// [`GeneratorError::Configuration`] when neither hint is usable: an empty
/// `php_namespace`, an empty package, or a segment that is not a valid
/// identifier.
///
/// # Examples
///
/// ```
/// use twirphp_core::NamespaceHint;
/// use twirphp_core::naming::namespace;
///
/// let hint = NamespaceHint { file: "a.proto", php_namespace: None, package: "acme.billing" };
/// assert_eq!(namespace(&hint).unwrap(), "Acme\\Billing");
/// ```
pub fn namespace(hint: &NamespaceHint<'_>) -> GeneratorResult<String> {
    match hint.php_namespace {
        Some(explicit) => {
            validate_namespace(explicit).map_err(|reason| {
                GeneratorError::Configuration(format!(
                    "{}: invalid php_namespace '{explicit}': {reason}",
                    hint.file
                ))
            })?;
            Ok(explicit.to_string())
        }
        None => package_namespace(hint.package).map_err(|reason| {
            GeneratorError::Configuration(format!(
                "{}: cannot derive a PHP namespace from package '{}': {reason}",
                hint.file, hint.package
            ))
        }),
    }
}

fn package_namespace(package: &str) -> Result<String, String> {
    if package.is_empty() {
        return Err("file has no package and no php_namespace option".into());
    }

    let segments = package
        .split('.')
        .map(|segment| {
            if !is_identifier(segment) {
                return Err(format!("'{segment}' is not a valid identifier"));
            }
            Ok(class_name(&ucfirst(segment), package))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(segments.join("\\"))
}

fn validate_namespace(namespace: &str) -> Result<(), String> {
    if namespace.is_empty() {
        return Err("namespace is empty".into());
    }
    for segment in namespace.split(NAMESPACE_SEPARATOR) {
        if segment.is_empty() {
            return Err("namespace contains an empty segment".into());
        }
        if !is_identifier(segment) {
            return Err(format!("'{segment}' is not a valid identifier"));
        }
    }
    Ok(())
}

/// PHP identifier: a letter, underscore or non-ASCII char, followed by those or digits.
fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || !first.is_ascii() => chars
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || !c.is_ascii()),
        _ => false,
    }
}

/// Filesystem path fragment for a namespace (`Acme\Billing` -> `Acme/Billing`).
///
/// # Errors
///
/// [`GeneratorError::Configuration`] for an empty or malformed namespace.
///
/// # Examples
///
/// ```
/// use twirphp_core::naming::path_from_namespace;
///
/// assert_eq!(path_from_namespace("Acme\\Billing").unwrap(), "Acme/Billing");
/// ```
pub fn path_from_namespace(namespace: &str) -> GeneratorResult<String> {
    validate_namespace(namespace).map_err(|reason| {
        GeneratorError::Configuration(format!("invalid namespace '{namespace}': {reason}"))
    })?;
    Ok(namespace.replace(NAMESPACE_SEPARATOR, "/"))
}

/// Filesystem path fragment for a file's namespace.
pub fn path(hint: &NamespaceHint<'_>) -> GeneratorResult<String> {
    path_from_namespace(&namespace(hint)?)
}

/// Convert snake_case to camelCase.
///
/// # Examples
///
/// ```
/// use twirphp_core::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("line_items"), "lineItems");
/// assert_eq!(to_camel_case("already"), "already");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let mut result = String::new();
    let mut capitalize_next = false;

    for c in s.chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push_str(&c.to_uppercase().to_string());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Capitalize the first letter of a string.
pub fn ucfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Lowercase the first letter of a string.
pub fn lcfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

#[cfg(test)]
#[path = "naming/naming_tests.rs"]
mod naming_tests;
