//! twirphp-codegen - Template registry and emission engine
//!
//! Renders PHP sources for a protobuf request:
//! - [`TemplateRegistry`] holds the compiled-in Handlebars templates, one
//!   bundle per [`TemplateScope`]
//! - [`Emitter`] walks the selected files and renders every template for
//!   every service, message and namespace
//! - [`ArtifactSet`] buffers the output until the run has succeeded
//! - [`plugin`] wires it all to `CodeGeneratorRequest`/`CodeGeneratorResponse`

pub mod context;
pub mod engine;
pub mod plugin;
pub mod registry;
pub mod sink;
pub mod types;

pub use engine::{EmissionReport, Emitter, output_path};
pub use plugin::{GenerationOutput, generate_artifacts, generate_files, handle_request, into_response};
pub use registry::{Template, TemplateRegistry, TemplateScope};
pub use sink::{Artifact, ArtifactSet, ArtifactSink};
pub use types::{ResolvedType, TypeIndex};
