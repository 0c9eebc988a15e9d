//! Tokens borrowing the scanned text

use super::category::TokenCategory;
use crate::utils::{SourceMap, Span};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A classified slice of the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<'src> {
    pub category: TokenCategory,
    pub lexeme: &'src str,
    /// Byte offset of the lexeme in the scanned text
    pub offset: usize,
}

impl<'src> Token<'src> {
    pub fn new(category: TokenCategory, lexeme: &'src str, offset: usize) -> Self {
        Self {
            category,
            lexeme,
            offset,
        }
    }

    /// Byte offset one past the lexeme
    pub fn end(&self) -> usize {
        self.offset + self.lexeme.len()
    }

    pub fn len(&self) -> usize {
        self.lexeme.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexeme.is_empty()
    }

    pub fn span(&self, map: &SourceMap<'_>) -> Span {
        map.span(self.offset, self.end())
    }

    pub fn with_category(self, category: TokenCategory) -> Self {
        Self { category, ..self }
    }

    pub fn to_owned_token(&self) -> OwnedToken {
        OwnedToken {
            category: self.category,
            lexeme: self.lexeme.to_string(),
            offset: self.offset,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.category, quote_lexeme(self.lexeme))
    }
}

/// Detached token for serialization and fixtures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedToken {
    pub category: TokenCategory,
    pub lexeme: String,
    pub offset: usize,
}

impl fmt::Display for OwnedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.category, quote_lexeme(&self.lexeme))
    }
}

/// Quote a lexeme the way a Python `repr` would: single quotes unless the
/// text holds a single quote and no double quote.
pub fn quote_lexeme(lexeme: &str) -> String {
    let quote = if lexeme.contains('\'') && !lexeme.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(lexeme.len() + 2);
    out.push(quote);
    for ch in lexeme.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
