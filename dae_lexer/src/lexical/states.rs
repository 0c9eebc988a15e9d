//! The Daedalus state catalogue
//!
//! Declaration keywords push a state that knows how the declaration
//! ends; `general` holds everything that can appear anywhere and is
//! included by nearly every other state.

use super::rules::{Action, Emission::Single, RuleDef, RuleFlags, StateId};
use crate::tokens::TokenCategory::{
    self, Comment, CommentMultiline, KeywordConstant, KeywordDeclaration, KeywordReserved,
    KeywordType, Name, NameBuiltinOther, NameBuiltinPseudo, NameClass, NameFunction, NameLabel,
    NameNamespace, NameVariableInstance, NumberFloat, NumberInteger, Operator, Punctuation, Text,
    Whitespace,
};

/// Plain identifiers: type names, namespace names
const BASIC: &str = r"[\w_]+";
/// Extended identifiers as the engine allows them in symbol names
const EXT: &str = r"[\w@_^]+";
/// Whitespace, including the ASCII separators 0x1C-0x1F that Unicode `\s`
/// leaves out but script editors treat as blank
const WS: &str = r"[\s\x1c-\x1f]";

const RESERVED_WORDS: &str = r"(RETURN|WHILE|CONTINUE|BREAK)\b";
const CONSTANTS: &str = r"(TRUE|FALSE)\b";
const PSEUDO: &str = r"(SELF|OTHER|ITEM|VICTIM|HERO|NULL|INSTANCE_HELP)\b";

const DECLARATION: &[TokenCategory] = &[KeywordDeclaration, Whitespace, KeywordType, Whitespace, Name];

pub fn flags() -> RuleFlags {
    RuleFlags {
        case_insensitive: true,
        multi_line: false,
    }
}

fn close_block_pattern() -> String {
    format!(r"\}}{WS}*;")
}

fn variable_declaration() -> String {
    format!(r"(VAR|CONST)({WS}+)({BASIC})({WS}+)({EXT})")
}

pub fn definitions() -> Vec<(StateId, Vec<RuleDef>)> {
    vec![
        (StateId::Root, root()),
        (StateId::General, general()),
        (StateId::Class, class()),
        (StateId::CommentBlock, comment_block()),
        (StateId::FunctionDeclaration, function_declaration()),
        (StateId::FunctionInner, function_inner()),
        (StateId::IfBlock, if_block()),
        (StateId::InstancePrototype, instance_prototype()),
        (StateId::InstancePrototypeInner, instance_prototype_inner()),
        (StateId::Meta, meta()),
        (StateId::Namespace, namespace()),
        (StateId::Parenthesis, parenthesis()),
        (StateId::Var, var()),
        (StateId::VarInner, var_inner()),
    ]
}

fn root() -> Vec<RuleDef> {
    vec![
        RuleDef::groups(
            format!(r"(META)({WS}+)"),
            &[KeywordDeclaration, Whitespace],
            Action::Push(StateId::Meta),
        ),
        RuleDef::groups(
            format!(r"(INSTANCE|PROTOTYPE)({WS}+)"),
            &[KeywordDeclaration, Whitespace],
            Action::Push(StateId::InstancePrototype),
        ),
        RuleDef::groups(
            format!(r"(CLASS)({WS}+)({EXT})({WS}*)(\{{)"),
            &[KeywordDeclaration, Whitespace, NameClass, Whitespace, Punctuation],
            Action::Push(StateId::Class),
        ),
        RuleDef::groups(
            format!(r"(NAMESPACE)({WS}+)({BASIC})({WS}*)(\{{)"),
            &[KeywordDeclaration, Whitespace, NameNamespace, Whitespace, Punctuation],
            Action::Push(StateId::Namespace),
        ),
        RuleDef::groups(
            format!(r"(FUNC)({WS}+)({BASIC})({WS}+)({EXT})"),
            &[KeywordDeclaration, Whitespace, KeywordType, Whitespace, NameFunction],
            Action::Push(StateId::FunctionDeclaration),
        ),
        RuleDef::Include(StateId::General),
    ]
}

fn general() -> Vec<RuleDef> {
    vec![
        RuleDef::emit(format!("{WS}+"), Whitespace),
        RuleDef::emit(r"//.*", Comment),
        RuleDef::rule(
            r"/\*",
            Single(CommentMultiline),
            Action::Push(StateId::CommentBlock),
        ),
        RuleDef::groups(variable_declaration(), DECLARATION, Action::Push(StateId::Var)),
        // \b keeps identifiers such as `ifState` out of the if-block
        RuleDef::rule(
            r"IF\b",
            Single(KeywordReserved),
            Action::Push(StateId::IfBlock),
        ),
        RuleDef::emit(RESERVED_WORDS, KeywordReserved),
        RuleDef::emit(CONSTANTS, KeywordConstant),
        RuleDef::emit(PSEUDO, NameBuiltinPseudo),
        RuleDef::emit(r"\d+\.\d+", NumberFloat),
        RuleDef::emit(r"\d+", NumberInteger),
        RuleDef::groups(
            format!(r"({EXT})({WS}*)(:)"),
            &[NameLabel, Whitespace, Punctuation],
            Action::Emit,
        ),
        RuleDef::groups(
            format!(r"({EXT})({WS}*)(\()"),
            &[NameBuiltinOther, Whitespace, Punctuation],
            Action::Push(StateId::Parenthesis),
        ),
        RuleDef::emit(EXT, Name),
        RuleDef::rule(
            r"\(",
            Single(Punctuation),
            Action::Push(StateId::Parenthesis),
        ),
        RuleDef::emit(r"[,.:;{}\[\]]", Punctuation),
        RuleDef::emit(r"[-+=*/|&<>!%~]", Operator),
        RuleDef::emit(r#"".*?""#, TokenCategory::String),
    ]
}

fn close_block(action: Action) -> RuleDef {
    RuleDef::rule(
        close_block_pattern(),
        Single(Punctuation),
        action,
    )
}

fn class() -> Vec<RuleDef> {
    vec![close_block(Action::Pop), RuleDef::Include(StateId::General)]
}

fn comment_block() -> Vec<RuleDef> {
    vec![
        RuleDef::rule(r"\*/", Single(CommentMultiline), Action::Pop),
        RuleDef::rule(r"/\*", Single(CommentMultiline), Action::PushSelf),
        RuleDef::emit(r"[*/]", CommentMultiline),
        RuleDef::emit(r"[^*/]+", CommentMultiline),
    ]
}

fn function_declaration() -> Vec<RuleDef> {
    vec![
        RuleDef::emit(format!("{WS}+"), Whitespace),
        RuleDef::rule(r"\(", Single(Punctuation), Action::Push(StateId::Parenthesis)),
        RuleDef::rule(r"\{", Single(Punctuation), Action::Push(StateId::FunctionInner)),
    ]
}

fn function_inner() -> Vec<RuleDef> {
    vec![close_block(Action::PopN(2)), RuleDef::Include(StateId::General)]
}

fn if_block() -> Vec<RuleDef> {
    vec![
        close_block(Action::Pop),
        RuleDef::rule(
            r"IF\b",
            Single(KeywordReserved),
            Action::PushSelf,
        ),
        RuleDef::groups(
            format!(r"(ELSE)({WS}+)(IF)\b"),
            &[KeywordReserved, Whitespace, KeywordReserved],
            Action::Emit,
        ),
        RuleDef::emit(r"ELSE\b", KeywordReserved),
        RuleDef::Include(StateId::General),
    ]
}

fn instance_prototype() -> Vec<RuleDef> {
    vec![
        RuleDef::rule(
            r"\{",
            Single(Punctuation),
            Action::Push(StateId::InstancePrototypeInner),
        ),
        RuleDef::rule(";", Single(Punctuation), Action::Pop),
        RuleDef::emit(PSEUDO, NameBuiltinPseudo),
        RuleDef::emit(EXT, Name),
        RuleDef::emit(",", Punctuation),
        RuleDef::emit(format!("{WS}+"), Whitespace),
        RuleDef::groups(
            format!(r"(\()({WS}*)({EXT})({WS}*)(\))"),
            &[Punctuation, Whitespace, NameClass, Whitespace, Punctuation],
            Action::Emit,
        ),
        RuleDef::Include(StateId::General),
    ]
}

fn instance_prototype_inner() -> Vec<RuleDef> {
    vec![
        close_block(Action::PopN(2)),
        RuleDef::groups(
            format!(r"(\w+)({WS}*)(=)"),
            &[NameVariableInstance, Whitespace, Operator],
            Action::Emit,
        ),
        RuleDef::groups(
            format!(r"(\w+)({WS}*)(\[)(\d+)(\])({WS}*)(=)"),
            &[
                NameVariableInstance,
                Whitespace,
                Punctuation,
                NumberInteger,
                Punctuation,
                Whitespace,
                Operator,
            ],
            Action::Emit,
        ),
        RuleDef::groups(
            format!(r"(\w+)({WS}*)(\[)({EXT})(\])({WS}*)(=)"),
            &[
                NameVariableInstance,
                Whitespace,
                Punctuation,
                Name,
                Punctuation,
                Whitespace,
                Operator,
            ],
            Action::Emit,
        ),
        RuleDef::Include(StateId::General),
    ]
}

fn meta() -> Vec<RuleDef> {
    vec![
        close_block(Action::Pop),
        RuleDef::groups(
            format!(r"(\w+)({WS}*)(//.*)"),
            &[NameVariableInstance, Whitespace, Comment],
            Action::Emit,
        ),
        RuleDef::groups(
            format!(r"(\w+)({WS}*)(=)"),
            &[NameVariableInstance, Whitespace, Operator],
            Action::Emit,
        ),
        RuleDef::Include(StateId::General),
    ]
}

fn namespace() -> Vec<RuleDef> {
    vec![
        close_block(Action::Pop),
        RuleDef::groups(
            format!(r"(NAMESPACE)({WS}+)({BASIC})"),
            &[KeywordDeclaration, Whitespace, NameNamespace],
            Action::PushSelf,
        ),
        RuleDef::Include(StateId::Root),
    ]
}

fn parenthesis() -> Vec<RuleDef> {
    vec![
        RuleDef::rule(r"\)", Single(Punctuation), Action::Pop),
        RuleDef::rule(r"\(", Single(Punctuation), Action::PushSelf),
        RuleDef::groups(variable_declaration(), DECLARATION, Action::Push(StateId::VarInner)),
        RuleDef::Include(StateId::General),
    ]
}

fn var() -> Vec<RuleDef> {
    vec![
        RuleDef::rule(";", Single(Punctuation), Action::Pop),
        RuleDef::emit(format!("{WS}+"), Whitespace),
        RuleDef::Include(StateId::General),
    ]
}

fn var_inner() -> Vec<RuleDef> {
    vec![
        RuleDef::rule(",", Single(Punctuation), Action::Pop),
        RuleDef::rule(r"\)", Single(Punctuation), Action::PopN(2)),
        RuleDef::emit(format!("{WS}+"), Whitespace),
        RuleDef::emit(EXT, Text),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::rules::RuleTable;

    #[test]
    fn test_catalogue_builds() {
        let table = RuleTable::build(flags(), definitions()).unwrap();
        assert_eq!(table.state_count(), StateId::ALL.len());
        for state in StateId::ALL {
            assert!(table.has_state(state), "{}", state);
        }
    }

    #[test]
    fn test_general_is_spliced_after_local_rules() {
        let table = RuleTable::build(flags(), definitions()).unwrap();
        let general = table.rules(StateId::General).len();
        assert_eq!(general, 17);
        assert_eq!(table.rules(StateId::Class).len(), general + 1);
        assert_eq!(table.rules(StateId::IfBlock).len(), general + 4);
        assert_eq!(table.rules(StateId::Root).len(), general + 5);
        // namespace pulls in root, which pulls in general
        assert_eq!(table.rules(StateId::Namespace).len(), general + 7);
        assert_eq!(table.rules(StateId::Class)[0].pattern, close_block_pattern());
    }

    #[test]
    fn test_every_state_is_reachable_or_included() {
        let mut referenced = vec![StateId::Root];
        for (_, defs) in definitions() {
            for def in defs {
                match def {
                    RuleDef::Include(target) => referenced.push(target),
                    RuleDef::Rule { action, .. } => {
                        if let Action::Push(target) | Action::PopPush(target) = action {
                            referenced.push(target);
                        }
                    }
                }
            }
        }
        for state in StateId::ALL {
            assert!(referenced.contains(&state), "{} is unused", state);
        }
    }
}
