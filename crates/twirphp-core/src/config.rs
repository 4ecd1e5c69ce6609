//! Generator configuration
//!
//! protoc hands plugin options over as a single `parameter` string, e.g.
//! `--twirp_php_opt=collision=overwrite,log_level=debug`. The pairs are
//! collected into a JSON object and deserialized so unknown keys and bad
//! values are rejected in one place.

use crate::LogLevel;
use crate::error::{GeneratorError, GeneratorResult};
use serde::{Deserialize, Serialize};

/// Twirp protocol version targeted by the generated PHP code
pub const TWIRP_VERSION: &str = "v8.1.0";

/// What to do when two artifacts resolve to the same output path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Abort the run with [`GeneratorError::OutputCollision`]
    #[default]
    Error,
    /// Keep the last write and log a warning
    Overwrite,
}

/// Configuration for one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Version of this generator, embedded in generated files
    #[serde(skip, default = "default_generator_version")]
    pub generator_version: String,

    /// Twirp protocol version, embedded in generated service files
    #[serde(skip, default = "default_tool_version")]
    pub tool_version: String,

    /// Output path collision handling
    #[serde(default)]
    pub collision: CollisionPolicy,

    /// Diagnostic log level
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,
}

fn default_generator_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_tool_version() -> String {
    TWIRP_VERSION.to_string()
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            generator_version: default_generator_version(),
            tool_version: default_tool_version(),
            collision: CollisionPolicy::default(),
            log_level: default_log_level(),
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the protoc `parameter` string
    ///
    /// An empty string yields the defaults. Pairs are separated by `,` and
    /// each pair must be `key=value`.
    pub fn from_parameter(parameter: &str) -> GeneratorResult<Self> {
        let parameter = parameter.trim();
        if parameter.is_empty() {
            return Ok(Self::default());
        }

        let mut object = serde_json::Map::new();
        for pair in parameter.split(',') {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                GeneratorError::Configuration(format!(
                    "plugin parameter '{pair}' is not of the form key=value"
                ))
            })?;
            let key = key.trim();
            if object.contains_key(key) {
                return Err(GeneratorError::Configuration(format!(
                    "plugin parameter '{key}' given more than once"
                )));
            }
            object.insert(
                key.to_string(),
                serde_json::Value::String(value.trim().to_string()),
            );
        }

        Ok(serde_json::from_value(serde_json::Value::Object(object))?)
    }

    /// Override the generator version embedded in output
    pub fn with_generator_version(mut self, version: impl Into<String>) -> Self {
        self.generator_version = version.into();
        self
    }

    /// Set the collision policy
    pub fn with_collision(mut self, collision: CollisionPolicy) -> Self {
        self.collision = collision;
        self
    }
}
