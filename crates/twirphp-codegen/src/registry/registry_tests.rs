#![allow(non_snake_case)]

use super::*;
use serde_json::json;
use test_case::test_case;

// suffix_for tests

#[test_case(TemplateScope::Service, "_Service_Client.php.hbs", "Client.php" ; "service marker")]
#[test_case(TemplateScope::Service, "_Service_.php.hbs", ".php" ; "bare service marker")]
#[test_case(TemplateScope::Message, "_Message_.php.hbs", ".php" ; "message marker")]
#[test_case(TemplateScope::Global, "TwirpError.php.hbs", "TwirpError.php" ; "global keeps name")]
#[test_case(TemplateScope::Service, "Plain.php", "Plain.php" ; "no marker no extension")]
#[test_case(TemplateScope::Global, "_Service_X.php.hbs", "_Service_X.php" ; "foreign marker kept")]
fn suffix_for___strips_marker_and_extension(scope: TemplateScope, name: &str, expected: &str) {
    assert_eq!(suffix_for(scope, name), expected);
}

// bundled registry tests

#[test]
fn TemplateRegistry___bundled___loads() {
    let registry = TemplateRegistry::bundled().unwrap();

    assert_eq!(registry.len(), 6);
    assert!(!registry.is_empty());
}

#[test]
fn TemplateRegistry___bundled___partitions_by_scope_in_load_order() {
    let registry = TemplateRegistry::bundled().unwrap();

    let suffixes = |scope| {
        registry
            .templates(scope)
            .map(|t| t.suffix().to_string())
            .collect::<Vec<_>>()
    };

    assert_eq!(suffixes(TemplateScope::Global), vec!["TwirpError.php"]);
    assert_eq!(
        suffixes(TemplateScope::Service),
        vec![
            ".php",
            "AbstractClient.php",
            "JsonClient.php",
            "Server.php"
        ]
    );
    assert_eq!(suffixes(TemplateScope::Message), vec![".php"]);
}

#[test]
fn TemplateRegistry___bundled___every_template_has_its_scope() {
    let registry = TemplateRegistry::bundled().unwrap();

    for scope in [TemplateScope::Global, TemplateScope::Service, TemplateScope::Message] {
        assert!(registry.templates(scope).all(|t| t.scope() == scope));
    }
}

// load failures

#[test]
fn TemplateRegistry___unparsable_template___fails_load() {
    let result = TemplateRegistry::from_sources([
        (TemplateScope::Global, "Ok.php.hbs", "{{namespace}}"),
        (TemplateScope::Service, "_Service_Broken.php.hbs", "{{#each service.methods}}"),
    ]);

    match result {
        Err(GeneratorError::TemplateLoad { template, .. }) => {
            assert_eq!(template, "_Service_Broken.php.hbs");
        }
        other => panic!("expected TemplateLoad, got {other:?}"),
    }
}

#[test]
fn TemplateRegistry___duplicate_suffix_in_scope___fails_load() {
    let result = TemplateRegistry::from_sources([
        (TemplateScope::Service, "_Service_Client.php.hbs", "a"),
        (TemplateScope::Service, "_Service_Client.php", "b"),
    ]);

    assert!(matches!(result, Err(GeneratorError::TemplateLoad { .. })));
}

#[test]
fn TemplateRegistry___same_suffix_in_different_scopes___loads() {
    let registry = TemplateRegistry::from_sources([
        (TemplateScope::Service, "_Service_.php.hbs", "a"),
        (TemplateScope::Message, "_Message_.php.hbs", "b"),
    ])
    .unwrap();

    assert_eq!(registry.len(), 2);
}

#[test]
fn TemplateRegistry___global_without_name___fails_load() {
    let result = TemplateRegistry::from_sources([(TemplateScope::Global, ".hbs", "x")]);

    assert!(matches!(result, Err(GeneratorError::TemplateLoad { .. })));
}

// rendering

fn single(scope: TemplateScope, name: &str, body: &str) -> (TemplateRegistry, Template) {
    let registry = TemplateRegistry::from_sources([(scope, name, body)]).unwrap();
    let template = registry.iter().next().unwrap().clone();
    (registry, template)
}

#[test]
fn TemplateRegistry___render___does_not_html_escape() {
    let (registry, template) = single(TemplateScope::Global, "Ns.php.hbs", "namespace {{namespace}};");

    let out = registry
        .render(&template, "namespace", &json!({ "namespace": "Acme\\Billing<T>" }))
        .unwrap();

    assert_eq!(out, "namespace Acme\\Billing<T>;");
}

#[test]
fn TemplateRegistry___render_missing_field___returns_render_error() {
    let (registry, template) = single(TemplateScope::Global, "Ns.php.hbs", "{{nope}}");

    let err = registry
        .render(&template, "namespace Acme", &json!({ "namespace": "Acme" }))
        .unwrap_err();

    match err {
        GeneratorError::Render {
            entity, template, ..
        } => {
            assert_eq!(entity, "namespace Acme");
            assert_eq!(template, "Ns.php.hbs");
        }
        other => panic!("expected Render, got {other:?}"),
    }
}

#[test]
fn TemplateRegistry___helpers___transform_case_and_escape() {
    let (registry, template) = single(
        TemplateScope::Global,
        "H.php.hbs",
        "{{ucfirst a}} {{lcfirst b}} '{{php_string c}}'",
    );

    let out = registry
        .render(
            &template,
            "x",
            &json!({ "a": "invoice", "b": "GetInvoice", "c": "it's a\\b" }),
        )
        .unwrap();

    assert_eq!(out, "Invoice getInvoice 'it\\'s a\\\\b'");
}

#[test]
fn TemplateRegistry___render___is_deterministic() {
    let (registry, template) = single(
        TemplateScope::Global,
        "D.php.hbs",
        "{{#each items}}{{this}},{{/each}}",
    );
    let context = json!({ "items": ["b", "a", "c"] });

    let first = registry.render(&template, "x", &context).unwrap();
    let second = registry.render(&template, "x", &context).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, "b,a,c,");
}

// php_doc / php_string

#[test]
fn php_doc___prefixes_every_line() {
    assert_eq!(php_doc("First.\n\nThird.", ""), " * First.\n *\n * Third.");
}

#[test]
fn php_doc___applies_indent() {
    assert_eq!(php_doc("Line.", "    "), "     * Line.");
}

#[test]
fn php_doc___neutralizes_comment_terminator() {
    assert_eq!(php_doc("a */ b", ""), " * a *\\/ b");
}

#[test]
fn php_string___escapes_quotes_and_backslashes() {
    assert_eq!(php_string("Acme\\Billing"), "Acme\\\\Billing");
    assert_eq!(php_string("it's"), "it\\'s");
}
