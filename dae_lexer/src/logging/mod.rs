//! Global logging for the Daedalus lexer
//!
//! A single configuration-aware service is installed once per process.
//! Events carry an optional file context set per thread, so messages
//! raised deep inside the scanner still name the script they came from.
//! Nothing is logged until `init_global_logging` runs, which keeps the
//! library silent for embedders that never opt in.

pub mod codes;
pub mod config;
pub mod events;
#[macro_use]
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{
    ConsoleLogger, Logger, LoggingService, MemoryLogger, NullLogger, StructuredLogger,
};

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

thread_local! {
    static FILE_CONTEXT: RefCell<Option<PathBuf>> = const { RefCell::new(None) };
}

/// Initialize global logging from the current runtime preferences
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    // Every code the lexer raises must carry metadata
    let required = ["ERR001", "E005", "E020", "E030", "E040", "I020"];
    for &code in &required {
        if codes::get_error_metadata(code).is_none() {
            return Err(format!("Missing metadata for error code: {}", code));
        }
    }

    init_global_logging_with_service(Arc::new(service::create_configured_service()))
}

/// Install a specific service, mostly useful for tests and embedders
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

pub fn set_file_context(file_path: PathBuf) {
    FILE_CONTEXT.with(|ctx| *ctx.borrow_mut() = Some(file_path));
}

pub fn clear_file_context() {
    FILE_CONTEXT.with(|ctx| *ctx.borrow_mut() = None);
}

pub fn get_current_file_context() -> Option<PathBuf> {
    FILE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Run `f` with `file_path` attached to every event logged on this thread
pub fn with_file_context<F, R>(file_path: PathBuf, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = get_current_file_context();
    set_file_context(file_path);
    let result = f();
    match previous {
        Some(path) => set_file_context(path),
        None => clear_file_context(),
    }
    result
}

/// Attach span, context pairs and file context, then hand the event to the global service
pub fn emit(mut event: LogEvent, span: Option<crate::utils::Span>, context: &[(&str, String)]) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };

    if let Some(s) = span {
        event = event.with_span(s);
    }

    for (key, value) in context {
        event = event.with_context(key, value);
    }

    if config::include_file_context() {
        if let Some(path) = get_current_file_context() {
            event = event.with_context("file", &path.display().to_string());
        }
    }

    logger.log_event(event);
}

/// Error logging that still reaches stderr before initialization
pub fn safe_log_error(code: Code, message: &str) {
    match try_get_global_logger() {
        Some(logger) => logger.log_event(LogEvent::error(code, message)),
        None => eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message),
    }
}

/// Diagnostics for `--diagnostics` style output
pub fn get_system_diagnostics() -> String {
    format!(
        "=== Logging System Diagnostics ===\nInitialized: {}\n\n{}",
        is_initialized(),
        config::get_config_summary()
    )
}
