#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

fn hint<'a>(php_namespace: Option<&'a str>, package: &'a str) -> NamespaceHint<'a> {
    NamespaceHint {
        file: "test.proto",
        php_namespace,
        package,
    }
}

// namespace tests

#[test_case("acme", "Acme" ; "single segment")]
#[test_case("acme.billing", "Acme\\Billing" ; "two segments")]
#[test_case("acme.billing.v1", "Acme\\Billing\\V1" ; "version segment")]
#[test_case("acme.class", "Acme\\PBClass" ; "reserved segment")]
#[test_case("google.protobuf", "Google\\Protobuf" ; "well known types")]
#[test_case("acme.line_items", "Acme\\Line_items" ; "underscores kept")]
fn namespace___from_package___converts(package: &str, expected: &str) {
    assert_eq!(namespace(&hint(None, package)).unwrap(), expected);
}

#[test]
fn namespace___explicit_option___wins_over_package() {
    let result = namespace(&hint(Some("Vendor\\Api"), "acme.billing")).unwrap();

    assert_eq!(result, "Vendor\\Api");
}

#[test]
fn namespace___explicit_option___used_verbatim() {
    let result = namespace(&hint(Some("acme\\class"), "")).unwrap();

    assert_eq!(result, "acme\\class");
}

#[test_case(None, "" ; "no package and no option")]
#[test_case(Some(""), "acme" ; "empty option")]
#[test_case(Some("\\Acme"), "acme" ; "leading separator")]
#[test_case(Some("Acme\\"), "acme" ; "trailing separator")]
#[test_case(Some("Acme\\\\Billing"), "acme" ; "empty segment")]
#[test_case(Some("Acme\\1Billing"), "acme" ; "digit first")]
#[test_case(Some("Acme Billing"), "acme" ; "space")]
#[test_case(None, "acme..billing" ; "empty package segment")]
#[test_case(None, "acme.bill-ing" ; "dash in package")]
fn namespace___malformed_hint___returns_configuration_error(
    php_namespace: Option<&str>,
    package: &str,
) {
    let result = namespace(&hint(php_namespace, package));

    assert!(matches!(result, Err(GeneratorError::Configuration(_))));
}

#[test]
fn namespace___error___names_the_file() {
    let err = namespace(&hint(None, "")).unwrap_err();

    assert!(err.to_string().contains("test.proto"));
}

// path tests

#[test]
fn path_from_namespace___replaces_separators() {
    assert_eq!(path_from_namespace("Acme\\Billing\\V1").unwrap(), "Acme/Billing/V1");
}

#[test]
fn path_from_namespace___single_segment___unchanged() {
    assert_eq!(path_from_namespace("Acme").unwrap(), "Acme");
}

#[test]
fn path_from_namespace___empty___returns_configuration_error() {
    assert!(matches!(
        path_from_namespace(""),
        Err(GeneratorError::Configuration(_))
    ));
}

#[test_case(None, "acme.billing" ; "from package")]
#[test_case(Some("Acme\\Billing"), "other" ; "from option")]
fn path___matches_path_from_namespace(php_namespace: Option<&str>, package: &str) {
    let hint = hint(php_namespace, package);

    let via_file = path(&hint).unwrap();
    let via_namespace = path_from_namespace(&namespace(&hint).unwrap()).unwrap();

    assert_eq!(via_file, via_namespace);
    assert_eq!(via_file, "Acme/Billing");
}

// class_name tests

#[test_case("Invoice", "acme", "Invoice" ; "ordinary")]
#[test_case("Class", "acme", "PBClass" ; "reserved")]
#[test_case("list", "acme", "PBlist" ; "reserved lowercase")]
#[test_case("Empty", "google.protobuf", "GPBEmpty" ; "well known reserved")]
#[test_case("Timestamp", "google.protobuf", "Timestamp" ; "well known ordinary")]
fn class_name___applies_reserved_prefix(name: &str, package: &str, expected: &str) {
    assert_eq!(class_name(name, package), expected);
}

#[test]
fn is_reserved___ignores_case() {
    assert!(is_reserved("ECHO"));
    assert!(is_reserved("Function"));
    assert!(!is_reserved("Invoice"));
}

// case helpers

#[test]
fn to_camel_case___converts_snake_case() {
    assert_eq!(to_camel_case("hello_world"), "helloWorld");
    assert_eq!(to_camel_case("foo_bar_baz"), "fooBarBaz");
    assert_eq!(to_camel_case(""), "");
}

#[test]
fn ucfirst___capitalizes_first_letter() {
    assert_eq!(ucfirst("hello"), "Hello");
    assert_eq!(ucfirst("helloWorld"), "HelloWorld");
    assert_eq!(ucfirst(""), "");
}

#[test]
fn lcfirst___lowercases_first_letter() {
    assert_eq!(lcfirst("GetInvoice"), "getInvoice");
    assert_eq!(lcfirst("URL"), "uRL");
    assert_eq!(lcfirst(""), "");
}
