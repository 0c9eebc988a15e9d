//! Lexical analyzer: full tokenization with metrics and diagnostics
//!
//! The scanner itself never fails. The analyzer drives it to the end of a
//! file, counts what it produced and logs anything worth a second look,
//! such as characters no rule accepts or blocks left open at end of input.

use super::builtins;
use super::reclassify::reclassify;
use super::scanner::Scanner;
use super::daedalus_table;
use crate::config::compile_time::lexical::{
    MAX_REPORTED_UNRECOGNIZED, NESTING_DEPTH_WARNING, TOKEN_CAPACITY_DIVISOR,
};
use crate::config::runtime::LexicalPreferences;
use crate::file_processor::FileProcessingResult;
use crate::logging::codes;
use crate::tokens::{Token, TokenCategory};
use crate::utils::SourceMap;
use crate::{log_debug, log_success, log_warning};
use serde::Serialize;
use std::collections::BTreeMap;

/// A character that fell through every rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unrecognized {
    pub offset: usize,
    pub text: String,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub whitespace_tokens: usize,
    pub comment_tokens: usize,
    pub keyword_tokens: usize,
    pub identifier_tokens: usize,
    pub literal_tokens: usize,
    pub punctuation_tokens: usize,
    pub operator_tokens: usize,

    pub unrecognized_chars: usize,
    /// First few unrecognized characters, capped at compile time
    pub unrecognized_samples: Vec<Unrecognized>,

    pub externals_hits: usize,
    pub zparser_extender_hits: usize,
    pub other_builtin_hits: usize,

    pub max_depth: usize,
    pub final_depth: usize,
    pub stack_underflows: usize,
    pub open_states: Vec<String>,

    /// Only filled when detailed metrics are enabled
    pub per_category: BTreeMap<TokenCategory, usize>,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token<'_>, preferences: &LexicalPreferences) {
        let category = token.category;

        if category.is_whitespace() {
            self.whitespace_tokens += 1;
            if !preferences.include_whitespace_in_counts {
                return;
            }
        }

        self.total_tokens += 1;

        if preferences.collect_detailed_metrics {
            *self.per_category.entry(category).or_insert(0) += 1;
        }

        match category {
            TokenCategory::Error => self.record_unrecognized(token),
            TokenCategory::NameBuiltinExternals => self.externals_hits += 1,
            TokenCategory::NameBuiltinZParserExtender => self.zparser_extender_hits += 1,
            TokenCategory::NameBuiltinOther => self.other_builtin_hits += 1,
            TokenCategory::Punctuation => self.punctuation_tokens += 1,
            TokenCategory::Operator => self.operator_tokens += 1,
            c if c.is_comment() => self.comment_tokens += 1,
            c if c.is_subtype_of(TokenCategory::Keyword) => self.keyword_tokens += 1,
            c if c.is_subtype_of(TokenCategory::Literal) => self.literal_tokens += 1,
            _ => {}
        }

        if category.is_subtype_of(TokenCategory::Name) || category == TokenCategory::Text {
            self.identifier_tokens += 1;
        }
    }

    fn record_unrecognized(&mut self, token: &Token<'_>) {
        self.unrecognized_chars += 1;
        if self.unrecognized_samples.len() < MAX_REPORTED_UNRECOGNIZED {
            self.unrecognized_samples.push(Unrecognized {
                offset: token.offset,
                text: token.lexeme.to_string(),
            });
        }
    }

    pub(crate) fn record_stack(&mut self, scanner: &Scanner<'_, '_>) {
        self.max_depth = scanner.max_depth();
        self.final_depth = scanner.depth();
        self.stack_underflows = scanner.underflows();
        self.open_states = scanner
            .stack()
            .states()
            .iter()
            .skip(1)
            .map(|state| state.name().to_string())
            .collect();
    }

    pub fn returned_to_root(&self) -> bool {
        self.final_depth <= 1
    }

    pub fn builtin_hits(&self) -> usize {
        self.externals_hits + self.zparser_extender_hits + self.other_builtin_hits
    }
}

pub struct LexicalAnalyzer {
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self::with_preferences(LexicalPreferences::default())
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            preferences,
        }
    }

    /// Tokenize a processed file; tokens borrow its source
    pub fn tokenize_file_result<'a>(&mut self, file_result: &'a FileProcessingResult) -> Vec<Token<'a>> {
        let origin = file_result.metadata.path.display().to_string();
        log_debug!("Starting lexical analysis",
            "file" => origin,
            "lines" => file_result.metadata.line_count,
            "size_bytes" => file_result.metadata.size,
            "lossy" => file_result.lossy
        );
        self.run(&file_result.source, &origin)
    }

    pub fn tokenize_str<'a>(&mut self, source: &'a str) -> Vec<Token<'a>> {
        self.run(source, "<input>")
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    pub fn set_preferences(&mut self, preferences: LexicalPreferences) {
        self.preferences = preferences;
    }

    fn run<'a>(&mut self, source: &'a str, origin: &str) -> Vec<Token<'a>> {
        self.metrics = LexicalMetrics::default();

        let mut scanner = Scanner::new(daedalus_table(), source);
        let mut tokens = Vec::with_capacity(source.len() / TOKEN_CAPACITY_DIVISOR + 1);

        for raw in scanner.by_ref() {
            let token = if self.preferences.apply_reclassification {
                reclassify(raw)
            } else {
                raw
            };
            self.metrics.record_token(&token, &self.preferences);
            tokens.push(token);
        }
        self.metrics.record_stack(&scanner);

        self.report(source, origin);

        log_success!(
            codes::success::TOKENIZATION_COMPLETE,
            "Lexical analysis completed",
            "source" => origin,
            "tokens" => tokens.len(),
            "builtins" => self.metrics.builtin_hits(),
            "max_depth" => self.metrics.max_depth
        );

        tokens
    }

    /// One warning per condition per input
    fn report(&self, source: &str, origin: &str) {
        let metrics = &self.metrics;

        if self.preferences.warn_on_unrecognized {
            if let Some(first) = metrics.unrecognized_samples.first() {
                let span = SourceMap::new(source).span(first.offset, first.offset + first.text.len());
                log_warning!(code = codes::lexical::UNRECOGNIZED_CHARACTER,
                    "Characters not matched by any rule",
                    span = span,
                    "source" => origin,
                    "count" => metrics.unrecognized_chars,
                    "first" => format!("{:?}", first.text)
                );
            }
        }

        if self.preferences.warn_on_unbalanced_nesting && !metrics.returned_to_root() {
            log_warning!(code = codes::lexical::UNBALANCED_NESTING,
                "Input ended inside an open block",
                "source" => origin,
                "open" => metrics.open_states.join(" > ")
            );
        }

        if metrics.stack_underflows > 0 {
            log_warning!(code = codes::lexical::STACK_UNDERFLOW,
                "Block closers without a matching opener",
                "source" => origin,
                "count" => metrics.stack_underflows
            );
        }

        if metrics.max_depth >= NESTING_DEPTH_WARNING {
            log_warning!(code = codes::lexical::NESTING_TOO_DEEP,
                "Unusually deep nesting",
                "source" => origin,
                "max_depth" => metrics.max_depth,
                "threshold" => NESTING_DEPTH_WARNING
            );
        }
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-family token totals
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct TokenCounts {
    pub total: usize,
    pub whitespace: usize,
    pub comments: usize,
    pub keywords: usize,
    pub identifiers: usize,
    pub builtins: usize,
    pub numbers: usize,
    pub strings: usize,
    pub punctuation: usize,
    pub operators: usize,
    pub errors: usize,
}

impl TokenCounts {
    /// Tokens other than whitespace and comments
    pub fn significant(&self) -> usize {
        self.total - self.whitespace - self.comments
    }
}

pub fn get_token_counts(tokens: &[Token<'_>]) -> TokenCounts {
    let mut counts = TokenCounts::default();

    for token in tokens {
        counts.total += 1;
        let category = token.category;
        if category.is_whitespace() {
            counts.whitespace += 1;
        } else if category.is_comment() {
            counts.comments += 1;
        } else if category.is_subtype_of(TokenCategory::Keyword) {
            counts.keywords += 1;
        } else if category.is_builtin() {
            counts.builtins += 1;
        } else if category.is_subtype_of(TokenCategory::Name) || category == TokenCategory::Text {
            counts.identifiers += 1;
        } else if category.is_subtype_of(TokenCategory::Number) {
            counts.numbers += 1;
        } else if category == TokenCategory::String {
            counts.strings += 1;
        } else if category == TokenCategory::Punctuation {
            counts.punctuation += 1;
        } else if category == TokenCategory::Operator {
            counts.operators += 1;
        } else if category == TokenCategory::Error {
            counts.errors += 1;
        }
    }

    counts
}

/// Whether a name would be reported as an engine builtin
pub fn is_known_builtin(name: &str) -> bool {
    builtins::classify_builtin(name).is_some()
}
