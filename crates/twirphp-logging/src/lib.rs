//! twirphp-logging - Tracing to stderr bridge for the protoc plugin
//!
//! protoc reads the plugin response from stdout, so diagnostics must go to
//! stderr. This crate provides:
//! - [`DiagnosticLayer`] tracing layer that forwards events to a [`LogWriter`]
//! - [`LogWriterManager`] holding the active writer and level filter
//! - [`init_logging`] to install the layer as the global subscriber

mod layer;
mod writer;

pub use layer::{DiagnosticLayer, init_logging};
pub use twirphp_core::LogLevel;
pub use writer::{LogWriter, LogWriterManager, stderr_writer};

/// Change the level of the global writer at run time
///
/// The plugin starts logging before it has parsed its parameters; once the
/// `log_level` parameter is known it is applied through this function.
pub fn set_level(level: LogLevel) {
    LogWriterManager::global().set_level(level);
}
