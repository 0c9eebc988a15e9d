//! Lexical analysis for Daedalus scripts
//!
//! A rule table (see [`states`]) drives a [`Scanner`] over the input; the
//! raw stream then goes through [`reclassify`] so engine externals stand
//! out from user identifiers. [`tokenize`] is the lazy entry point,
//! [`LexicalAnalyzer`] the file-aware one with metrics and logging.

pub mod analyzer;
pub mod builtins;
pub mod machine;
pub mod reclassify;
pub mod rules;
pub mod scanner;
pub mod states;

use crate::config::compile_time::lexical::{NESTING_DEPTH_WARNING, TOKEN_CAPACITY_DIVISOR};
use crate::file_processor::FileProcessingResult;
use crate::logging::codes;
use crate::tokens::Token;
use std::sync::OnceLock;

pub use analyzer::{get_token_counts, LexicalAnalyzer, LexicalMetrics, TokenCounts};
pub use machine::{StackUnderflow, StateStack};
pub use reclassify::{Reclassified, ReclassifyExt};
pub use rules::{Action, Emission, RuleDef, RuleFlags, RuleTable, RuleTableError, StateId};
pub use scanner::{tokenize_with, Scanner};

/// Reclassified token stream over the built-in table
pub type Tokens<'src> = Reclassified<Scanner<'static, 'src>>;

static DAEDALUS_TABLE: OnceLock<RuleTable> = OnceLock::new();

/// Build a fresh copy of the Daedalus rule table
pub fn build_daedalus_table() -> Result<RuleTable, RuleTableError> {
    RuleTable::build(states::flags(), states::definitions())
}

/// The shared Daedalus rule table, built on first use
pub fn daedalus_table() -> &'static RuleTable {
    DAEDALUS_TABLE.get_or_init(|| {
        build_daedalus_table().expect("built-in Daedalus rule table must be valid")
    })
}

/// Lazily tokenize `text`; lexemes concatenate back to `text`
pub fn tokenize(text: &str) -> Tokens<'_> {
    Reclassified::new(tokenize_raw(text))
}

/// Like [`tokenize`] but without the builtin-name post-pass
pub fn tokenize_raw(text: &str) -> Scanner<'static, '_> {
    Scanner::new(daedalus_table(), text)
}

/// Tokenize a processed file with default preferences
pub fn tokenize_file_result(file_result: &FileProcessingResult) -> Vec<Token<'_>> {
    LexicalAnalyzer::new().tokenize_file_result(file_result)
}

/// Validate lexical codes and the built-in table (for system startup)
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    let required = [
        codes::lexical::UNRECOGNIZED_CHARACTER,
        codes::lexical::UNBALANCED_NESTING,
        codes::lexical::STACK_UNDERFLOW,
        codes::lexical::NESTING_TOO_DEEP,
        codes::success::TOKENIZATION_COMPLETE,
        codes::success::RULE_TABLE_BUILT,
    ];
    for code in &required {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    let table = build_daedalus_table().map_err(|e| {
        crate::log_error!(e.error_code(), "Built-in rule table is invalid", "error" => e);
        format!("Rule table validation failed: {}", e)
    })?;

    crate::log_success!(
        codes::success::RULE_TABLE_BUILT,
        "Rule table built",
        "states" => table.state_count(),
        "rules" => table.rule_count()
    );
    crate::log_debug!("Lexical limits initialized",
        "nesting_depth_warning" => NESTING_DEPTH_WARNING,
        "token_capacity_divisor" => TOKEN_CAPACITY_DIVISOR
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenCategory::{
        self, Comment, KeywordConstant, KeywordDeclaration, KeywordReserved, KeywordType, Name,
        NameBuiltinExternals, NameBuiltinOther, NameBuiltinPseudo, NameBuiltinZParserExtender,
        NameClass, NameFunction, NameNamespace, NameVariableInstance, NumberInteger, Punctuation,
        Whitespace,
    };
    use serde::Deserialize;

    fn pairs(text: &str) -> Vec<(TokenCategory, &str)> {
        tokenize(text).map(|t| (t.category, t.lexeme)).collect()
    }

    fn depth_after(text: &str) -> usize {
        let mut scanner = tokenize_raw(text);
        scanner.by_ref().for_each(drop);
        scanner.depth()
    }

    #[test]
    fn test_var_declaration() {
        assert_eq!(
            pairs("VAR int x;"),
            vec![
                (KeywordDeclaration, "VAR"),
                (Whitespace, " "),
                (KeywordType, "int"),
                (Whitespace, " "),
                (Name, "x"),
                (Punctuation, ";"),
            ]
        );
        assert_eq!(depth_after("VAR int x;"), 1);
    }

    #[test]
    fn test_if_else_block() {
        let text = "IF (true) { } ELSE { };";
        assert_eq!(
            pairs(text),
            vec![
                (KeywordReserved, "IF"),
                (Whitespace, " "),
                (Punctuation, "("),
                (KeywordConstant, "true"),
                (Punctuation, ")"),
                (Whitespace, " "),
                (Punctuation, "{"),
                (Whitespace, " "),
                (Punctuation, "}"),
                (Whitespace, " "),
                (KeywordReserved, "ELSE"),
                (Whitespace, " "),
                (Punctuation, "{"),
                (Whitespace, " "),
                (Punctuation, "};"),
            ]
        );

        let mut scanner = tokenize_raw(text);
        let mut depths = Vec::new();
        while let Some(token) = scanner.next() {
            if token.lexeme == "ELSE" {
                depths.push(scanner.depth());
            }
        }
        assert_eq!(depths, vec![2]);
        assert_eq!(scanner.depth(), 1);
    }

    #[test]
    fn test_class_block() {
        let text = "CLASS C_INFO { VAR int x; };";
        assert_eq!(
            pairs(text),
            vec![
                (KeywordDeclaration, "CLASS"),
                (Whitespace, " "),
                (NameClass, "C_INFO"),
                (Whitespace, " "),
                (Punctuation, "{"),
                (Whitespace, " "),
                (KeywordDeclaration, "VAR"),
                (Whitespace, " "),
                (KeywordType, "int"),
                (Whitespace, " "),
                (Name, "x"),
                (Punctuation, ";"),
                (Whitespace, " "),
                (Punctuation, "};"),
            ]
        );
        assert_eq!(depth_after(text), 1);
        assert_eq!(depth_after("CLASS C_INFO { VAR int x;"), 2);
    }

    #[test]
    fn test_call_with_pseudo_arguments() {
        assert_eq!(
            pairs("NPC_GETDISTTONPC(self, other);"),
            vec![
                (NameBuiltinExternals, "NPC_GETDISTTONPC"),
                (Punctuation, "("),
                (NameBuiltinPseudo, "self"),
                (Punctuation, ","),
                (Whitespace, " "),
                (NameBuiltinPseudo, "other"),
                (Punctuation, ")"),
                (Punctuation, ";"),
            ]
        );
    }

    #[test]
    fn test_keywords_ignore_case_and_keep_lexeme() {
        for word in ["if", "IF", "If", "iF"] {
            let tokens = pairs(word);
            assert_eq!(tokens, vec![(KeywordReserved, word)]);
        }
        assert_eq!(pairs("WhIlE"), vec![(KeywordReserved, "WhIlE")]);
        assert_eq!(pairs("True"), vec![(KeywordConstant, "True")]);
        assert_eq!(pairs("HERO"), vec![(NameBuiltinPseudo, "HERO")]);
    }

    /// Keywords need a word boundary: `ifState` is one identifier and opens
    /// no if-block, where a boundary-free `IF` rule would split it as
    /// `if` + `State`.
    #[test]
    fn test_keyword_prefixes_are_identifiers() {
        assert_eq!(pairs("ifState"), vec![(Name, "ifState")]);
        assert_eq!(pairs("returned"), vec![(Name, "returned")]);
        assert_eq!(pairs("heroic"), vec![(Name, "heroic")]);
        assert_eq!(depth_after("ifState"), 1);
    }

    #[test]
    fn test_ascii_separators_are_whitespace() {
        assert_eq!(
            pairs("\x1c\x1dx\x1f"),
            vec![(Whitespace, "\x1c\x1d"), (Name, "x"), (Whitespace, "\x1f")]
        );
        assert_eq!(depth_after("class C\x1c{ var int x; }\x1f;"), 1);
        assert!(tokenize("\x1cELSE").all(|t| t.category != TokenCategory::Error));
    }

    #[test]
    fn test_builtin_reclassification() {
        assert_eq!(
            pairs("AI_LOOKAT("),
            vec![(NameBuiltinExternals, "AI_LOOKAT"), (Punctuation, "(")]
        );
        assert_eq!(
            pairs("B_MyRoutine ("),
            vec![(Name, "B_MyRoutine"), (Whitespace, " "), (Punctuation, "(")]
        );
        assert_eq!(pairs("LeGo_Init("), vec![(NameBuiltinOther, "LeGo_Init"), (Punctuation, "(")]);
        assert_eq!(pairs("Wld_ChangeLevel")[0], (NameBuiltinZParserExtender, "Wld_ChangeLevel"));
        assert_eq!(pairs("hlp_getnpc")[0], (NameBuiltinExternals, "hlp_getnpc"));
    }

    #[test]
    fn test_raw_stream_keeps_call_category() {
        let raw: Vec<_> = tokenize_raw("AI_LOOKAT(").map(|t| t.category).collect();
        assert_eq!(raw, vec![NameBuiltinOther, Punctuation]);
    }

    #[test]
    fn test_nested_comment_depth() {
        for n in 1..6 {
            let text = format!("{}{}x", "/*".repeat(n), "*/".repeat(n));
            let mut scanner = tokenize_raw(&text);
            let tokens: Vec<_> = scanner.by_ref().collect();
            assert_eq!(scanner.max_depth(), n + 1);
            assert_eq!(scanner.depth(), 1);
            assert_eq!(tokens.last().map(|t| t.category), Some(Name));
        }
    }

    #[test]
    fn test_function_declaration_and_body() {
        let text = "func int Add(var int a, var int b) { return a + b; };";
        let tokens = pairs(text);
        assert_eq!(&tokens[..5], &[
            (KeywordDeclaration, "func"),
            (Whitespace, " "),
            (KeywordType, "int"),
            (Whitespace, " "),
            (NameFunction, "Add"),
        ]);
        assert!(tokens.contains(&(KeywordDeclaration, "var")));
        assert_eq!(tokens.last(), Some(&(Punctuation, "};")));
        assert_eq!(depth_after(text), 1);
    }

    #[test]
    fn test_var_inner_lists() {
        let text = "f(var int a, var C_NPC slf)";
        let tokens = pairs(text);
        assert!(tokens.contains(&(KeywordType, "C_NPC")));
        assert!(tokens.contains(&(Name, "slf")));
        assert_eq!(depth_after(text), 1);
    }

    #[test]
    fn test_instance_with_members() {
        let text = "instance PC_Hero(C_NPC) { name = \"Ich\"; attribute[0] = 10; aivar[AIV_X] = 1; };";
        let tokens = pairs(text);
        assert_eq!(&tokens[..6], &[
            (KeywordDeclaration, "instance"),
            (Whitespace, " "),
            (Name, "PC_Hero"),
            (Punctuation, "("),
            (NameClass, "C_NPC"),
            (Punctuation, ")"),
        ]);
        assert!(tokens.contains(&(NameVariableInstance, "name")));
        assert!(tokens.contains(&(NameVariableInstance, "attribute")));
        assert!(tokens.contains(&(NumberInteger, "0")));
        assert!(tokens.contains(&(Name, "AIV_X")));
        assert_eq!(depth_after(text), 1);
    }

    #[test]
    fn test_instance_forward_declaration() {
        let text = "instance a, b;";
        let tokens = pairs(text);
        assert_eq!(
            tokens,
            vec![
                (KeywordDeclaration, "instance"),
                (Whitespace, " "),
                (Name, "a"),
                (Punctuation, ","),
                (Whitespace, " "),
                (Name, "b"),
                (Punctuation, ";"),
            ]
        );
        assert_eq!(depth_after(text), 1);
    }

    #[test]
    fn test_meta_block() {
        let text = "META { Parser = Game; After = zUtilities // trailing\n};";
        let tokens = pairs(text);
        assert!(tokens.contains(&(NameVariableInstance, "Parser")));
        assert!(tokens.contains(&(Comment, "// trailing")));
        assert_eq!(depth_after(text), 1);
    }

    #[test]
    fn test_nested_namespaces() {
        let text = "namespace A { namespace B { func void f() { }; }; };";
        let tokens = pairs(text);
        assert!(tokens.contains(&(NameNamespace, "A")));
        assert!(tokens.contains(&(NameNamespace, "B")));
        assert!(tokens.contains(&(NameFunction, "f")));

        let mut scanner = tokenize_raw(text);
        scanner.by_ref().for_each(drop);
        assert_eq!(scanner.max_depth(), 5);
        assert_eq!(scanner.depth(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize("").count(), 0);
    }

    #[derive(Deserialize)]
    struct Expected {
        category: TokenCategory,
        lexeme: String,
    }

    #[test]
    fn test_general_fixture() {
        let source = include_str!("../../fixtures/general.d");
        let expected: Vec<Expected> =
            serde_json::from_str(include_str!("../../fixtures/general.tokens.json")).unwrap();

        let actual = pairs(source);
        assert_eq!(actual.len(), expected.len());
        for (index, (got, want)) in actual.iter().zip(&expected).enumerate() {
            assert_eq!(
                (got.0, got.1),
                (want.category, want.lexeme.as_str()),
                "token {}",
                index
            );
        }
    }

    #[test]
    fn test_init_validates_table() {
        assert!(init_lexical_analysis_logging().is_ok());
        let table = daedalus_table();
        assert_eq!(table.state_count(), StateId::ALL.len());
    }
}
