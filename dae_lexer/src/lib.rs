//! Lexer for Daedalus, the scripting language of the Gothic games.
//!
//! ```
//! use dae_lexer::{tokenize, TokenCategory};
//!
//! let tokens: Vec<_> = tokenize("VAR int x;").collect();
//! assert_eq!(tokens[0].category, TokenCategory::KeywordDeclaration);
//! assert_eq!(tokens.iter().map(|t| t.lexeme).collect::<String>(), "VAR int x;");
//! ```

#[macro_use]
pub mod logging;
pub mod config;
pub mod file_processor;
pub mod lexical;
pub mod registry;
pub mod tokens;
pub mod utils;

pub use config::{ConfigError, RuntimeConfig};
pub use file_processor::{FileProcessingResult, FileProcessor, FileProcessorError};
pub use lexical::{tokenize, tokenize_raw, LexicalAnalyzer, RuleTable, Scanner, StateId, Tokens};
pub use registry::LexerInfo;
pub use tokens::{OwnedToken, Token, TokenCategory};

/// Validate startup invariants for every subsystem that logs
pub fn validate_startup() -> Result<(), String> {
    file_processor::init_file_processor_logging()?;
    lexical::init_lexical_analysis_logging()?;
    Ok(())
}
