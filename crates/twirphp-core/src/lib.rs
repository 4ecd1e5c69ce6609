//! twirphp-core - Descriptor model, naming rules, errors and configuration
//!
//! This crate provides the foundational types shared by the Twirp PHP generator:
//! - [`ProtoFile`] and friends, a read-only view of the protoc descriptor tree
//! - [`naming`] for deriving PHP namespaces, paths and class names
//! - [`GeneratorError`] for error handling
//! - [`GeneratorConfig`] for plugin parameters

pub mod config;
pub mod descriptor;
mod error;
pub mod naming;

pub use config::{CollisionPolicy, GeneratorConfig, TWIRP_VERSION};
pub use descriptor::{
    FieldKind, NamespaceHint, ProtoField, ProtoFile, ProtoMessage, ProtoMethod, ProtoService,
};
pub use error::{GeneratorError, GeneratorResult};

use serde::{Deserialize, Serialize};

/// Log levels for plugin diagnostics
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            _ => LogLevel::Off,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}
