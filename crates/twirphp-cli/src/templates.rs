//! Listing of the bundled templates.

use twirphp_codegen::{TemplateRegistry, TemplateScope};

pub fn run() -> anyhow::Result<()> {
    let registry = TemplateRegistry::bundled()?;
    for line in describe(&registry) {
        println!("{line}");
    }
    Ok(())
}

/// One line per template: scope, file name and the output name it produces.
fn describe(registry: &TemplateRegistry) -> Vec<String> {
    registry
        .iter()
        .map(|template| {
            let entity = match template.scope() {
                TemplateScope::Global => "",
                TemplateScope::Service => "<Service>",
                TemplateScope::Message => "<Message>",
            };
            format!(
                "{:<8} {:<34} -> {entity}{}",
                template.scope().to_string(),
                template.name(),
                template.suffix()
            )
        })
        .collect()
}

#[cfg(test)]
#[path = "templates/templates_tests.rs"]
mod templates_tests;
