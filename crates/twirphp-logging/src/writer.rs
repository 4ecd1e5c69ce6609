//! Log writer management

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::io::Write;
use std::sync::atomic::{AtomicU8, Ordering};
use twirphp_core::LogLevel;

/// Function that receives one formatted log event
///
/// # Parameters
/// - `level`: Level of the event
/// - `target`: Log target (module path)
/// - `message`: Message with structured fields appended as `key=value`
pub type LogWriter = fn(level: LogLevel, target: &str, message: &str);

/// Name protoc shows in front of plugin diagnostics
const PLUGIN_NAME: &str = "protoc-gen-twirp_php";

/// Default writer: one line per event on stderr
pub fn stderr_writer(level: LogLevel, target: &str, message: &str) {
    let stderr = std::io::stderr();
    let mut handle = stderr.lock();
    // Nothing sensible to do if stderr is gone.
    let _ = writeln!(handle, "{PLUGIN_NAME}: {level} {target}: {message}");
}

/// Global log writer manager
static WRITER_MANAGER: OnceCell<LogWriterManager> = OnceCell::new();

/// Manager for the active log writer and level
pub struct LogWriterManager {
    writer: RwLock<LogWriter>,
    level: AtomicU8,
}

impl LogWriterManager {
    /// Create a manager writing to stderr at `Warn`
    pub fn new() -> Self {
        Self {
            writer: RwLock::new(stderr_writer),
            level: AtomicU8::new(LogLevel::Warn as u8),
        }
    }

    /// Get the global manager instance
    pub fn global() -> &'static LogWriterManager {
        WRITER_MANAGER.get_or_init(LogWriterManager::new)
    }

    /// Replace the writer
    pub fn set_writer(&self, writer: LogWriter) {
        *self.writer.write() = writer;
    }

    /// Restore the stderr writer
    pub fn reset_writer(&self) {
        self.set_writer(stderr_writer);
    }

    /// Set the log level
    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    /// Get the current log level
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::SeqCst))
    }

    /// Check if a log level is enabled
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && level >= self.level()
    }

    /// Forward an event to the writer if its level is enabled
    pub fn log(&self, level: LogLevel, target: &str, message: &str) {
        if !self.is_enabled(level) {
            return;
        }

        let writer = *self.writer.read();
        writer(level, target, message);
    }
}

impl Default for LogWriterManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "writer/writer_tests.rs"]
mod writer_tests;
