//! Keyed singleton loggers
//!
//! One [`Logger`] per name for the whole process. The first request for a
//! name builds and caches the logger; every later request for that name gets
//! the cached instance, whatever sink it asks for.
//!
//! # Example
//!
//! ```rust
//! use polyclinic::logging::singleton::get_logger;
//! use std::sync::Arc;
//!
//! let a = get_logger("main");
//! let b = get_logger("main");
//! assert!(Arc::ptr_eq(&a, &b));
//! a.log("clinics list requested");
//! ```

use chrono::Local;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard};

/// Destination for formatted log lines
pub trait LogSink: Send + Sync {
    /// Writes one line
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the line could not be written.
    fn write(&self, line: &str) -> io::Result<()>;
}

/// Writes lines to standard output
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write(&self, line: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{line}")
    }
}

/// Forwards lines to the `tracing` subscriber at INFO
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, line: &str) -> io::Result<()> {
        tracing::info!(target: "polyclinic::app_log", "{line}");
        Ok(())
    }
}

/// Appends lines to a file
#[derive(Debug)]
pub struct FileSink {
    file: Mutex<File>,
}

impl FileSink {
    /// Opens `path` for appending, creating it if needed
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl LogSink for FileSink {
    fn write(&self, line: &str) -> io::Result<()> {
        let mut file = lock(&self.file);
        writeln!(file, "{line}")?;
        file.flush()
    }
}

/// Keeps lines in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines written so far
    pub fn lines(&self) -> Vec<String> {
        lock(&self.lines).clone()
    }
}

impl LogSink for MemorySink {
    fn write(&self, line: &str) -> io::Result<()> {
        lock(&self.lines).push(line.to_string());
        Ok(())
    }
}

/// Named application logger
pub struct Logger {
    name: String,
    sink: Arc<dyn LogSink>,
}

impl Logger {
    pub fn new(name: impl Into<String>, sink: Arc<dyn LogSink>) -> Self {
        Self {
            name: name.into(),
            sink,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Writes a timestamped line through the sink
    ///
    /// Sink failures are reported through `tracing` and otherwise ignored.
    pub fn log(&self, text: &str) {
        let line = format!(
            "{} {} log---> {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            self.name,
            text
        );
        if let Err(e) = self.sink.write(&line) {
            tracing::warn!(logger = %self.name, error = %e, "Log sink write failed");
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger").field("name", &self.name).finish()
    }
}

/// Name → logger cache
#[derive(Default)]
pub struct LoggerRegistry {
    instances: Mutex<HashMap<String, Arc<Logger>>>,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the logger cached under `name`, building it with `factory`
    /// on first use
    ///
    /// `factory` only runs when `name` is not cached yet.
    pub fn get_or_create<F>(&self, name: &str, factory: F) -> Arc<Logger>
    where
        F: FnOnce() -> Logger,
    {
        let mut instances = lock(&self.instances);
        instances
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(factory()))
            .clone()
    }
}

static LOGGERS: LazyLock<LoggerRegistry> = LazyLock::new(LoggerRegistry::new);

/// Process-wide logger for `name`, writing to the console when first built
pub fn get_logger(name: &str) -> Arc<Logger> {
    get_logger_with(name, Arc::new(ConsoleSink))
}

/// Process-wide logger for `name`
///
/// `sink` is only used when the logger does not exist yet.
pub fn get_logger_with(name: &str, sink: Arc<dyn LogSink>) -> Arc<Logger> {
    LOGGERS.get_or_create(name, || Logger::new(name, sink))
}

// Poisoned data is still a valid list of lines or loggers
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
