//! Error types for the generation pipeline

use thiserror::Error;

/// Result type alias for generator operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Error type for generator operations
///
/// Every variant aborts the whole run. Nothing is retried and no partial
/// output is produced.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Bad plugin parameters, or a namespace/path that cannot be derived
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A bundled template failed to load
    #[error("failed to load template {template}: {message}")]
    TemplateLoad { template: String, message: String },

    /// A template failed to render for one entity
    #[error("failed to render template {template} for {entity}: {message}")]
    Render {
        entity: String,
        template: String,
        message: String,
    },

    /// Two artifacts resolved to the same output path
    #[error("output path {path} was generated more than once")]
    OutputCollision { path: String },

    /// Input could not be decoded as protobuf
    #[error("decode error: {0}")]
    Decode(String),

    /// Filesystem or stream error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GeneratorError {
    /// Returns a stable code, used as the process exit status
    pub fn error_code(&self) -> u8 {
        match self {
            GeneratorError::Configuration(_) => 1,
            GeneratorError::TemplateLoad { .. } => 2,
            GeneratorError::Render { .. } => 3,
            GeneratorError::OutputCollision { .. } => 4,
            GeneratorError::Decode(_) => 5,
            GeneratorError::Io(_) => 6,
        }
    }
}

impl From<serde_json::Error> for GeneratorError {
    fn from(err: serde_json::Error) -> Self {
        GeneratorError::Configuration(err.to_string())
    }
}

impl From<prost::DecodeError> for GeneratorError {
    fn from(err: prost::DecodeError) -> Self {
        GeneratorError::Decode(err.to_string())
    }
}
