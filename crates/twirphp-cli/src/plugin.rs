//! protoc plugin mode.

use anyhow::Context;
use prost::Message;
use prost_types::compiler::CodeGeneratorRequest;
use std::io::{Read, Write};
use twirphp_core::{GeneratorConfig, GeneratorError};

/// Read a `CodeGeneratorRequest` from stdin and answer on stdout.
///
/// Generation failures are reported inside the response, as protoc expects.
/// Only an unreadable request or a broken stdout fail the process.
pub fn run() -> anyhow::Result<()> {
    let mut input = Vec::new();
    std::io::stdin()
        .read_to_end(&mut input)
        .map_err(GeneratorError::from)
        .context("failed to read request from stdin")?;

    let request = CodeGeneratorRequest::decode(input.as_slice()).map_err(GeneratorError::from)?;

    // A bad parameter string is reported through the response below.
    if let Ok(config) = GeneratorConfig::from_parameter(request.parameter()) {
        twirphp_logging::set_level(config.log_level);
    }
    tracing::debug!(
        files = request.file_to_generate.len(),
        parameter = request.parameter(),
        "received request"
    );

    let response = twirphp_codegen::handle_request(&request);

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&response.encode_to_vec())
        .and_then(|()| stdout.flush())
        .map_err(GeneratorError::from)
        .context("failed to write response to stdout")?;
    Ok(())
}
