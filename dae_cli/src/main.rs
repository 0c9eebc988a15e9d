//! daelex: dump the token stream of a Daedalus script

use clap::Parser;
use dae_lexer::config::runtime::{OutputFormat, RuntimeConfig};
use dae_lexer::file_processor::FileProcessor;
use dae_lexer::lexical::LexicalAnalyzer;
use dae_lexer::{logging, Token};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "daelex", about = "Print the tokens of a Daedalus script", version)]
struct Cli {
    /// Script to tokenize
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let Some(file) = cli.file else {
        eprintln!("No file provided");
        process::exit(1);
    };

    let config = RuntimeConfig::default();
    init_logging(&config);

    // A dump tool accepts anything the lexer can; oversized scripts are only logged
    let processor =
        FileProcessor::from_preferences(&config.file_processor).with_limits_enforced(false);
    let result = match processor.process_file(&file) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let mut analyzer = LexicalAnalyzer::with_preferences(config.lexical.clone());
    let tokens = logging::with_file_context(file.clone(), || analyzer.tokenize_file_result(&result));

    if let Err(e) = write_tokens(&tokens, config.output.format) {
        if e.kind() != io::ErrorKind::BrokenPipe {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Logging is best effort; the token dump must not depend on it
fn init_logging(config: &RuntimeConfig) {
    let _ = logging::config::init_runtime_preferences(config.logging.clone());
    if let Err(e) = logging::init_global_logging() {
        eprintln!("Warning: logging disabled: {}", e);
        return;
    }
    if let Err(e) = dae_lexer::validate_startup() {
        eprintln!("Warning: {}", e);
    }
}

fn write_tokens(tokens: &[Token<'_>], format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for token in tokens {
        match format {
            OutputFormat::Tuple => writeln!(out, "{}", token)?,
            OutputFormat::Json => {
                let line = serde_json::to_string(&token.to_owned_token())
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                writeln!(out, "{}", line)?;
            }
        }
    }

    out.flush()
}
