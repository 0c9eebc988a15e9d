// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Read a boolean-ish environment variable, falling back to `default`
fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessorPreferences {
    /// Whether to require a .d extension
    pub require_daedalus_extension: bool,

    /// Whether to enable detailed performance logging
    pub enable_performance_logging: bool,

    /// Decode non UTF-8 files lossily instead of rejecting them
    pub lossy_decoding: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            require_daedalus_extension: env_flag(env_vars::REQUIRE_D_EXTENSION, false),
            enable_performance_logging: env_flag(env_vars::ENABLE_PERFORMANCE_LOGGING, true),
            lossy_decoding: env_flag(env_vars::LOSSY_DECODING, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Run the builtin-name post-pass over identifiers
    pub apply_reclassification: bool,

    /// Whether to collect per-category token metrics
    pub collect_detailed_metrics: bool,

    /// Whether whitespace tokens count towards the category totals
    pub include_whitespace_in_counts: bool,

    /// Log a warning when characters fall through every rule
    pub warn_on_unrecognized: bool,

    /// Log a warning when the state stack does not return to root
    pub warn_on_unbalanced_nesting: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            apply_reclassification: env_flag(env_vars::LEXICAL_RECLASSIFY, true),
            collect_detailed_metrics: env_flag(env_vars::LEXICAL_DETAILED_METRICS, true),
            include_whitespace_in_counts: env_flag(env_vars::LEXICAL_INCLUDE_WHITESPACE, false),
            warn_on_unrecognized: env_flag(env_vars::LEXICAL_WARN_UNRECOGNIZED, true),
            warn_on_unbalanced_nesting: env_flag(env_vars::LEXICAL_WARN_UNBALANCED, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// JSON lines instead of plain text
    pub use_structured_logging: bool,

    /// Whether log output is written at all
    pub enable_console_logging: bool,

    pub min_log_level: LogLevel,

    /// Attach the current file path to events
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_flag(env_vars::LOGGING_ENABLE_CONSOLE, true),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Warning),
            include_file_context: env_flag(env_vars::LOGGING_INCLUDE_FILE_CONTEXT, true),
        }
    }
}

/// How the CLI renders each token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `(Token.Category, 'lexeme')`
    Tuple,
    /// One JSON object per line
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "tuple" | "text" => Some(OutputFormat::Tuple),
            "json" | "jsonl" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputPreferences {
    pub format: OutputFormat,
}

impl Default for OutputPreferences {
    fn default() -> Self {
        Self {
            format: env::var(env_vars::OUTPUT_FORMAT)
                .ok()
                .and_then(|v| OutputFormat::parse(&v))
                .unwrap_or(OutputFormat::Tuple),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

/// Runtime configuration failures
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read configuration file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid configuration: {message}")]
    Parse { message: String },
}

impl ConfigError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ConfigError::Io { .. } => crate::logging::codes::configuration::CONFIG_UNREADABLE,
            ConfigError::Parse { .. } => crate::logging::codes::configuration::INVALID_CONFIG,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub lexical: LexicalPreferences,
    pub logging: LoggingPreferences,
    pub output: OutputPreferences,
}

impl RuntimeConfig {
    /// Parse a TOML document; missing sections and keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // File Processor
    pub const REQUIRE_D_EXTENSION: &str = "DAE_REQUIRE_D_EXTENSION";
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "DAE_ENABLE_PERFORMANCE_LOGGING";
    pub const LOSSY_DECODING: &str = "DAE_LOSSY_DECODING";

    // Lexical
    pub const LEXICAL_RECLASSIFY: &str = "DAE_LEXICAL_RECLASSIFY";
    pub const LEXICAL_DETAILED_METRICS: &str = "DAE_LEXICAL_DETAILED_METRICS";
    pub const LEXICAL_INCLUDE_WHITESPACE: &str = "DAE_LEXICAL_INCLUDE_WHITESPACE";
    pub const LEXICAL_WARN_UNRECOGNIZED: &str = "DAE_LEXICAL_WARN_UNRECOGNIZED";
    pub const LEXICAL_WARN_UNBALANCED: &str = "DAE_LEXICAL_WARN_UNBALANCED";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "DAE_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "DAE_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "DAE_LOGGING_MIN_LEVEL";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "DAE_LOGGING_INCLUDE_FILE_CONTEXT";

    // Output
    pub const OUTPUT_FORMAT: &str = "DAE_OUTPUT_FORMAT";
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("invalid"), None);
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::parse("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("tuple"), Some(OutputFormat::Tuple));
        assert_eq!(OutputFormat::parse("yaml"), None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [lexical]
            apply_reclassification = false

            [logging]
            min_log_level = "debug"

            [output]
            format = "json"
            "#,
        )
        .unwrap();

        assert!(!config.lexical.apply_reclassification);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let result = RuntimeConfig::from_toml_str("[lexical\napply = ");
        assert_matches!(result, Err(ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let result = RuntimeConfig::load("/definitely/not/here/dae.toml");
        let error = result.unwrap_err();
        assert_matches!(error, ConfigError::Io { .. });
        assert_eq!(error.error_code().as_str(), "E041");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = RuntimeConfig::default();
        let rendered = config.to_toml_string().unwrap();
        let parsed = RuntimeConfig::from_toml_str(&rendered).unwrap();
        assert_eq!(parsed.output.format, config.output.format);
        assert_eq!(parsed.logging.min_log_level, config.logging.min_log_level);
    }
}
