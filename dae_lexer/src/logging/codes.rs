//! Consolidated diagnostic codes and classification system
//!
//! Single source of truth for every code the lexer emits, together with the
//! behavioural metadata used by the logging service.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
    pub const TOO_MANY_LINES: Code = Code::new("E013");
}

/// Lexical analysis codes (all recoverable: scanning never halts)
pub mod lexical {
    use super::Code;

    pub const UNRECOGNIZED_CHARACTER: Code = Code::new("E020");
    pub const UNBALANCED_NESTING: Code = Code::new("E021");
    pub const STACK_UNDERFLOW: Code = Code::new("E022");
    pub const NESTING_TOO_DEEP: Code = Code::new("E023");
}

/// Rule table construction codes
pub mod rule_table {
    use super::Code;

    pub const UNDEFINED_STATE: Code = Code::new("E030");
    pub const CIRCULAR_INCLUSION: Code = Code::new("E031");
    pub const INVALID_PATTERN: Code = Code::new("E032");
    pub const GROUP_MISMATCH: Code = Code::new("E033");
    pub const DUPLICATE_STATE: Code = Code::new("E034");
    pub const MISSING_ROOT: Code = Code::new("E035");
    pub const INVALID_ACTION: Code = Code::new("E036");
}

/// Runtime configuration codes
pub mod configuration {
    use super::Code;

    pub const INVALID_CONFIG: Code = Code::new("E040");
    pub const CONFIG_UNREADABLE: Code = Code::new("E041");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const RULE_TABLE_BUILT: Code = Code::new("I021");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

/// (code, category, severity, recoverable, requires_halt, description, action)
type Row = (
    &'static str,
    &'static str,
    Severity,
    bool,
    bool,
    &'static str,
    &'static str,
);

const REGISTRY_ROWS: &[Row] = &[
    // System
    (
        "ERR001",
        "System",
        Severity::Critical,
        false,
        true,
        "Critical internal system error",
        "File a bug report with the input that triggered it",
    ),
    (
        "ERR002",
        "System",
        Severity::Critical,
        false,
        true,
        "System initialization failed",
        "Check configuration and environment variables",
    ),
    // File processing
    (
        "E005",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "Script file not found",
        "Verify the file path exists and is accessible",
    ),
    (
        "E006",
        "FileProcessing",
        Severity::Low,
        true,
        false,
        "File does not carry the .d extension",
        "Rename the script or disable DAE_REQUIRE_D_EXTENSION",
    ),
    (
        "E007",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "File exceeds the compile-time size limit",
        "Split the script or rebuild with a larger max_file_size",
    ),
    (
        "E009",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "Permission denied reading file",
        "Check file permissions",
    ),
    (
        "E010",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "File is not valid UTF-8",
        "Convert the script to UTF-8 or enable DAE_LOSSY_DECODING",
    ),
    (
        "E011",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "I/O error while reading file",
        "Check disk health and file accessibility",
    ),
    (
        "E012",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "Invalid file path",
        "Provide a path to a regular file",
    ),
    (
        "E013",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "File exceeds the compile-time line limit",
        "Split the script or rebuild with a larger max_line_count_for_analysis",
    ),
    // Lexical
    (
        "E020",
        "Lexical",
        Severity::Low,
        true,
        false,
        "Character not matched by any rule of the current state",
        "Inspect the Error tokens in the output",
    ),
    (
        "E021",
        "Lexical",
        Severity::Low,
        true,
        false,
        "Input ended inside a nested block",
        "Check for a missing `};` or `*/`",
    ),
    (
        "E022",
        "Lexical",
        Severity::Low,
        true,
        false,
        "Pop requested on the root state",
        "Check for a stray closing delimiter",
    ),
    (
        "E023",
        "Lexical",
        Severity::Low,
        true,
        false,
        "State nesting exceeds the warning threshold",
        "Check for unterminated blocks or parentheses",
    ),
    // Rule table
    (
        "E030",
        "RuleTable",
        Severity::Critical,
        false,
        true,
        "Rule table references an undefined state",
        "Define the state or fix the reference",
    ),
    (
        "E031",
        "RuleTable",
        Severity::Critical,
        false,
        true,
        "Rule table inclusion forms a cycle",
        "Break the include cycle",
    ),
    (
        "E032",
        "RuleTable",
        Severity::Critical,
        false,
        true,
        "Rule pattern is not a valid regular expression",
        "Fix the pattern syntax",
    ),
    (
        "E033",
        "RuleTable",
        Severity::Critical,
        false,
        true,
        "Group mapping does not match the pattern's capture groups",
        "Give every capture group exactly one category",
    ),
    (
        "E034",
        "RuleTable",
        Severity::Critical,
        false,
        true,
        "State defined more than once",
        "Merge the duplicate definitions",
    ),
    (
        "E035",
        "RuleTable",
        Severity::Critical,
        false,
        true,
        "Rule table has no root state",
        "Define the root state",
    ),
    (
        "E036",
        "RuleTable",
        Severity::Critical,
        false,
        true,
        "Rule action is malformed",
        "Use a pop count of at least one",
    ),
    // Configuration
    (
        "E040",
        "Configuration",
        Severity::Medium,
        false,
        true,
        "Runtime configuration is invalid",
        "Fix the TOML syntax or field types",
    ),
    (
        "E041",
        "Configuration",
        Severity::Medium,
        false,
        true,
        "Runtime configuration file could not be read",
        "Check the configuration path",
    ),
    // Success
    (
        "I004",
        "System",
        Severity::Low,
        true,
        false,
        "Logging system initialized",
        "Continue processing",
    ),
    (
        "I006",
        "FileProcessing",
        Severity::Low,
        true,
        false,
        "File read successfully",
        "Continue to lexical analysis",
    ),
    (
        "I020",
        "Lexical",
        Severity::Low,
        true,
        false,
        "Tokenization completed",
        "Consume the token stream",
    ),
    (
        "I021",
        "RuleTable",
        Severity::Low,
        true,
        false,
        "Rule table built and validated",
        "Continue to scanning",
    ),
];

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        REGISTRY_ROWS
            .iter()
            .map(
                |&(code, category, severity, recoverable, requires_halt, description, action)| {
                    (
                        code,
                        ErrorMetadata {
                            code,
                            category,
                            severity,
                            recoverable,
                            requires_halt,
                            description,
                            recommended_action: action,
                        },
                    )
                },
            )
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
