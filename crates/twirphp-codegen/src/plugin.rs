//! protoc plugin driver.
//!
//! Turns a `CodeGeneratorRequest` into artifacts and packs the outcome into a
//! `CodeGeneratorResponse`. Failures travel back to protoc through the
//! response's `error` field, never as a partial file list.

use crate::engine::{EmissionReport, Emitter};
use crate::registry::TemplateRegistry;
use crate::sink::ArtifactSet;
use crate::types::TypeIndex;
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse, code_generator_response};
use prost_types::FileDescriptorProto;
use twirphp_core::{GeneratorConfig, GeneratorError, GeneratorResult, ProtoFile};

/// Result of a successful generation run.
#[derive(Debug)]
pub struct GenerationOutput {
    pub artifacts: ArtifactSet,
    pub report: EmissionReport,
}

/// Generate artifacts for `file_to_generate` out of `proto_files`.
///
/// `proto_files` must contain every file protoc would hand over, dependencies
/// included, so method and field types resolve. Files are generated in the
/// order given by `file_to_generate`.
pub fn generate_files(
    proto_files: &[FileDescriptorProto],
    file_to_generate: &[String],
    config: &GeneratorConfig,
    registry: &TemplateRegistry,
) -> GeneratorResult<GenerationOutput> {
    let files: Vec<ProtoFile> = proto_files.iter().map(ProtoFile::from).collect();
    let types = TypeIndex::new(&files);

    let selected = file_to_generate
        .iter()
        .map(|name| {
            files.iter().find(|f| &f.name == name).ok_or_else(|| {
                GeneratorError::Configuration(format!(
                    "file to generate {name} is not part of the request"
                ))
            })
        })
        .collect::<GeneratorResult<Vec<_>>>()?;

    tracing::info!(
        files = selected.len(),
        known_types = types.len(),
        templates = registry.len(),
        "starting generation"
    );

    let mut artifacts = ArtifactSet::new(config.collision);
    let report = Emitter::new(registry, config, &types).emit(selected, &mut artifacts)?;
    Ok(GenerationOutput { artifacts, report })
}

/// Run generation for a protoc request with the given registry.
pub fn generate_artifacts(
    request: &CodeGeneratorRequest,
    registry: &TemplateRegistry,
) -> GeneratorResult<GenerationOutput> {
    let config = GeneratorConfig::from_parameter(request.parameter())?;
    generate_files(
        &request.proto_file,
        &request.file_to_generate,
        &config,
        registry,
    )
}

/// Pack a generation outcome into a protoc response.
pub fn into_response(result: GeneratorResult<ArtifactSet>) -> CodeGeneratorResponse {
    let mut response = CodeGeneratorResponse {
        supported_features: Some(code_generator_response::Feature::Proto3Optional as u64),
        ..Default::default()
    };
    match result {
        Ok(artifacts) => response.file = artifacts.into_response_files(),
        Err(err) => {
            tracing::error!(code = err.error_code(), "generation failed: {err}");
            response.error = Some(err.to_string());
        }
    }
    response
}

/// Handle a request with the bundled templates.
pub fn handle_request(request: &CodeGeneratorRequest) -> CodeGeneratorResponse {
    into_response(
        TemplateRegistry::bundled()
            .and_then(|registry| generate_artifacts(request, &registry))
            .map(|output| output.artifacts),
    )
}
