//! Offline generation from a descriptor set.

use anyhow::Context;
use prost::Message;
use prost_types::FileDescriptorSet;
use std::collections::HashSet;
use std::path::Path;
use twirphp_codegen::TemplateRegistry;
use twirphp_core::{GeneratorConfig, GeneratorError};

/// Generate PHP sources for `files` into `output`. When `files` is empty, the
/// files no other file in the set imports are generated.
pub fn run(descriptor_set: &str, output: &str, files: &[String], parameter: &str) -> anyhow::Result<()> {
    let config = GeneratorConfig::from_parameter(parameter)?;
    twirphp_logging::set_level(config.log_level);

    let bytes = std::fs::read(descriptor_set)
        .map_err(GeneratorError::from)
        .with_context(|| format!("failed to read descriptor set {descriptor_set}"))?;
    let set = FileDescriptorSet::decode(bytes.as_slice()).map_err(GeneratorError::from)?;

    let selected = select_files(&set, files);
    let registry = TemplateRegistry::bundled()?;
    let generated = twirphp_codegen::generate_files(&set.file, &selected, &config, &registry)?;

    let written = generated
        .artifacts
        .write_to_dir(Path::new(output))
        .with_context(|| format!("failed to write output to {output}"))?;

    println!(
        "Generated {written} files ({} service, {} message, {} global) in {output}",
        generated.report.service_artifacts,
        generated.report.message_artifacts,
        generated.report.global_artifacts,
    );
    Ok(())
}

/// Roots of the set's import graph, in set order, unless files were requested.
fn select_files(set: &FileDescriptorSet, requested: &[String]) -> Vec<String> {
    if !requested.is_empty() {
        return requested.to_vec();
    }
    let imported: HashSet<&str> = set
        .file
        .iter()
        .flat_map(|f| f.dependency.iter().map(String::as_str))
        .collect();
    set.file
        .iter()
        .map(|f| f.name())
        .filter(|name| !imported.contains(name))
        .map(str::to_string)
        .collect()
}
