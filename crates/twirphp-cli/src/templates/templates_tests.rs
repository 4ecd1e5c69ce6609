#![allow(non_snake_case)]

use super::*;

#[test]
fn describe___bundled___lists_every_template_with_output_name() {
    let registry = TemplateRegistry::bundled().unwrap();

    let lines = describe(&registry);

    assert_eq!(lines.len(), registry.len());
    assert!(lines.iter().any(|l| l.starts_with("global") && l.ends_with("-> TwirpError.php")));
    assert!(lines.iter().any(|l| l.starts_with("service") && l.ends_with("-> <Service>JsonClient.php")));
    assert!(lines.iter().any(|l| l.starts_with("message") && l.ends_with("-> <Message>.php")));
}
