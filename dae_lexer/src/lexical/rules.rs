//! Rule tables: ordered, anchored pattern rules per scanning state
//!
//! A table is described as a list of state definitions, each an ordered
//! list of [`RuleDef`]s. `Include` entries are spliced in at build time so
//! the scanner only ever walks flat, fully compiled rule lists.

use crate::logging::codes;
use crate::logging::Code;
use crate::tokens::TokenCategory;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Scanning states of the Daedalus grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StateId {
    Root,
    General,
    Class,
    CommentBlock,
    FunctionDeclaration,
    FunctionInner,
    IfBlock,
    InstancePrototype,
    InstancePrototypeInner,
    Meta,
    Namespace,
    Parenthesis,
    Var,
    VarInner,
}

impl StateId {
    pub const ALL: [StateId; 14] = [
        StateId::Root,
        StateId::General,
        StateId::Class,
        StateId::CommentBlock,
        StateId::FunctionDeclaration,
        StateId::FunctionInner,
        StateId::IfBlock,
        StateId::InstancePrototype,
        StateId::InstancePrototypeInner,
        StateId::Meta,
        StateId::Namespace,
        StateId::Parenthesis,
        StateId::Var,
        StateId::VarInner,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StateId::Root => "root",
            StateId::General => "general",
            StateId::Class => "class",
            StateId::CommentBlock => "comment-block",
            StateId::FunctionDeclaration => "function-declaration",
            StateId::FunctionInner => "function-inner",
            StateId::IfBlock => "if-block",
            StateId::InstancePrototype => "instance-prototype",
            StateId::InstancePrototypeInner => "instance-prototype-inner",
            StateId::Meta => "meta",
            StateId::Namespace => "namespace",
            StateId::Parenthesis => "parenthesis",
            StateId::Var => "var",
            StateId::VarInner => "var-inner",
        }
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StateId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StateId::ALL
            .iter()
            .copied()
            .find(|state| state.name() == s)
            .ok_or_else(|| format!("unknown state: {}", s))
    }
}

/// What a matched rule emits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    /// The whole match as one token
    Single(TokenCategory),
    /// One token per capture group, left to right
    ByGroups(Vec<TokenCategory>),
}

/// Stack effect of a matched rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Emit,
    Push(StateId),
    /// Push the current top state again
    PushSelf,
    Pop,
    PopN(usize),
    /// Pop one level, then push
    PopPush(StateId),
}

#[derive(Debug, Clone)]
pub enum RuleDef {
    Rule {
        pattern: String,
        emission: Emission,
        action: Action,
    },
    Include(StateId),
}

impl RuleDef {
    pub fn rule(pattern: impl Into<String>, emission: Emission, action: Action) -> Self {
        RuleDef::Rule {
            pattern: pattern.into(),
            emission,
            action,
        }
    }

    /// Single-category rule with no stack effect
    pub fn emit(pattern: impl Into<String>, category: TokenCategory) -> Self {
        Self::rule(pattern, Emission::Single(category), Action::Emit)
    }

    pub fn groups(pattern: impl Into<String>, categories: &[TokenCategory], action: Action) -> Self {
        Self::rule(pattern, Emission::ByGroups(categories.to_vec()), action)
    }
}

/// Regex flags applied to every pattern of a table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleFlags {
    pub case_insensitive: bool,
    pub multi_line: bool,
}

/// A rule ready for matching
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub regex: Regex,
    pub pattern: String,
    pub emission: Emission,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleTableError {
    #[error("state '{from}' includes undefined state '{target}'")]
    UndefinedInclude { from: StateId, target: StateId },

    #[error("state '{from}' pushes undefined state '{target}'")]
    UndefinedPushTarget { from: StateId, target: StateId },

    #[error("circular inclusion: {}", format_path(.path))]
    CircularInclusion { path: Vec<StateId> },

    #[error("state '{state}' is defined more than once")]
    DuplicateState { state: StateId },

    #[error("rule table has no root state")]
    MissingRoot,

    #[error("invalid pattern '{pattern}' in state '{state}': {message}")]
    InvalidPattern {
        state: StateId,
        pattern: String,
        message: String,
    },

    #[error("pattern '{pattern}' in state '{state}' has {groups} groups but maps {mapped}")]
    GroupMismatch {
        state: StateId,
        pattern: String,
        groups: usize,
        mapped: usize,
    },

    #[error("state '{state}' pops zero levels")]
    EmptyPop { state: StateId },
}

fn format_path(path: &[StateId]) -> String {
    path.iter()
        .map(StateId::name)
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl RuleTableError {
    pub fn error_code(&self) -> Code {
        match self {
            RuleTableError::UndefinedInclude { .. } | RuleTableError::UndefinedPushTarget { .. } => {
                codes::rule_table::UNDEFINED_STATE
            }
            RuleTableError::CircularInclusion { .. } => codes::rule_table::CIRCULAR_INCLUSION,
            RuleTableError::DuplicateState { .. } => codes::rule_table::DUPLICATE_STATE,
            RuleTableError::MissingRoot => codes::rule_table::MISSING_ROOT,
            RuleTableError::InvalidPattern { .. } => codes::rule_table::INVALID_PATTERN,
            RuleTableError::GroupMismatch { .. } => codes::rule_table::GROUP_MISMATCH,
            RuleTableError::EmptyPop { .. } => codes::rule_table::INVALID_ACTION,
        }
    }
}

/// Flattened, compiled rules per state
#[derive(Debug, Clone)]
pub struct RuleTable {
    states: HashMap<StateId, Vec<CompiledRule>>,
    flags: RuleFlags,
}

enum Entry {
    Compiled(CompiledRule),
    Include(StateId),
}

impl RuleTable {
    pub fn build(
        flags: RuleFlags,
        definitions: Vec<(StateId, Vec<RuleDef>)>,
    ) -> Result<Self, RuleTableError> {
        let mut raw: HashMap<StateId, Vec<Entry>> = HashMap::new();
        let mut order = Vec::new();

        for (state, defs) in definitions {
            if raw.contains_key(&state) {
                return Err(RuleTableError::DuplicateState { state });
            }
            let entries = defs
                .into_iter()
                .map(|def| compile_def(state, flags, def))
                .collect::<Result<Vec<_>, _>>()?;
            raw.insert(state, entries);
            order.push(state);
        }

        if !raw.contains_key(&StateId::Root) {
            return Err(RuleTableError::MissingRoot);
        }

        for (state, entries) in &raw {
            for entry in entries {
                match entry {
                    Entry::Include(target) if !raw.contains_key(target) => {
                        return Err(RuleTableError::UndefinedInclude {
                            from: *state,
                            target: *target,
                        });
                    }
                    Entry::Compiled(rule) => {
                        if let Action::Push(target) | Action::PopPush(target) = rule.action {
                            if !raw.contains_key(&target) {
                                return Err(RuleTableError::UndefinedPushTarget {
                                    from: *state,
                                    target,
                                });
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        let mut resolved = HashMap::new();
        for state in order {
            let mut visiting = Vec::new();
            flatten(state, &raw, &mut resolved, &mut visiting)?;
        }

        Ok(Self {
            states: resolved,
            flags,
        })
    }

    /// Rules of a state in match order; empty for states the table lacks
    pub fn rules(&self, state: StateId) -> &[CompiledRule] {
        self.states.get(&state).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_state(&self, state: StateId) -> bool {
        self.states.contains_key(&state)
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Total rules after inclusion
    pub fn rule_count(&self) -> usize {
        self.states.values().map(Vec::len).sum()
    }

    pub fn flags(&self) -> RuleFlags {
        self.flags
    }
}

fn compile_def(state: StateId, flags: RuleFlags, def: RuleDef) -> Result<Entry, RuleTableError> {
    let (pattern, emission, action) = match def {
        RuleDef::Include(target) => return Ok(Entry::Include(target)),
        RuleDef::Rule {
            pattern,
            emission,
            action,
        } => (pattern, emission, action),
    };

    if action == Action::PopN(0) {
        return Err(RuleTableError::EmptyPop { state });
    }

    // Anchor at the scan offset; matching runs on the remaining slice
    let regex = RegexBuilder::new(&format!(r"\A(?:{})", pattern))
        .case_insensitive(flags.case_insensitive)
        .multi_line(flags.multi_line)
        .build()
        .map_err(|e| RuleTableError::InvalidPattern {
            state,
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;

    if let Emission::ByGroups(categories) = &emission {
        let groups = regex.captures_len() - 1;
        if groups != categories.len() {
            return Err(RuleTableError::GroupMismatch {
                state,
                pattern,
                groups,
                mapped: categories.len(),
            });
        }
    }

    Ok(Entry::Compiled(CompiledRule {
        regex,
        pattern,
        emission,
        action,
    }))
}

fn flatten(
    state: StateId,
    raw: &HashMap<StateId, Vec<Entry>>,
    resolved: &mut HashMap<StateId, Vec<CompiledRule>>,
    visiting: &mut Vec<StateId>,
) -> Result<(), RuleTableError> {
    if resolved.contains_key(&state) {
        return Ok(());
    }
    if visiting.contains(&state) {
        let mut path = visiting.clone();
        path.push(state);
        return Err(RuleTableError::CircularInclusion { path });
    }

    visiting.push(state);
    let mut rules = Vec::new();
    for entry in raw.get(&state).map(Vec::as_slice).unwrap_or(&[]) {
        match entry {
            Entry::Compiled(rule) => rules.push(rule.clone()),
            Entry::Include(target) => {
                flatten(*target, raw, resolved, visiting)?;
                if let Some(included) = resolved.get(target) {
                    rules.extend(included.iter().cloned());
                }
            }
        }
    }
    visiting.pop();

    resolved.insert(state, rules);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use TokenCategory::{KeywordReserved, Name, Whitespace};

    fn flags() -> RuleFlags {
        RuleFlags {
            case_insensitive: true,
            multi_line: false,
        }
    }

    #[test]
    fn test_include_is_spliced_in_order() {
        let table = RuleTable::build(
            flags(),
            vec![
                (
                    StateId::Root,
                    vec![
                        RuleDef::emit("a", Name),
                        RuleDef::Include(StateId::General),
                        RuleDef::emit("z", Name),
                    ],
                ),
                (
                    StateId::General,
                    vec![RuleDef::emit("b", Name), RuleDef::emit("c", Name)],
                ),
            ],
        )
        .unwrap();

        let patterns: Vec<&str> = table
            .rules(StateId::Root)
            .iter()
            .map(|r| r.pattern.as_str())
            .collect();
        assert_eq!(patterns, ["a", "b", "c", "z"]);
        assert_eq!(table.state_count(), 2);
        assert_eq!(table.rule_count(), 6);
    }

    #[test]
    fn test_nested_includes_resolve_regardless_of_definition_order() {
        let table = RuleTable::build(
            flags(),
            vec![
                (StateId::Namespace, vec![RuleDef::Include(StateId::Root)]),
                (StateId::Root, vec![RuleDef::Include(StateId::General)]),
                (StateId::General, vec![RuleDef::emit(r"\s+", Whitespace)]),
            ],
        )
        .unwrap();
        assert_eq!(table.rules(StateId::Namespace).len(), 1);
    }

    #[test]
    fn test_circular_inclusion_rejected() {
        let err = RuleTable::build(
            flags(),
            vec![
                (StateId::Root, vec![RuleDef::Include(StateId::Class)]),
                (StateId::Class, vec![RuleDef::Include(StateId::Meta)]),
                (StateId::Meta, vec![RuleDef::Include(StateId::Class)]),
            ],
        )
        .unwrap_err();

        assert_matches!(err, RuleTableError::CircularInclusion { ref path } if path.len() == 4);
        assert_eq!(err.to_string(), "circular inclusion: root -> class -> meta -> class");
        assert_eq!(err.error_code(), codes::rule_table::CIRCULAR_INCLUSION);
    }

    #[test]
    fn test_self_inclusion_rejected() {
        let err = RuleTable::build(
            flags(),
            vec![(StateId::Root, vec![RuleDef::Include(StateId::Root)])],
        )
        .unwrap_err();
        assert_matches!(err, RuleTableError::CircularInclusion { .. });
    }

    #[test]
    fn test_undefined_targets_rejected() {
        let err = RuleTable::build(
            flags(),
            vec![(StateId::Root, vec![RuleDef::Include(StateId::Var)])],
        )
        .unwrap_err();
        assert_matches!(
            err,
            RuleTableError::UndefinedInclude {
                from: StateId::Root,
                target: StateId::Var
            }
        );

        let err = RuleTable::build(
            flags(),
            vec![(
                StateId::Root,
                vec![RuleDef::rule("x", Emission::Single(Name), Action::Push(StateId::Var))],
            )],
        )
        .unwrap_err();
        assert_matches!(err, RuleTableError::UndefinedPushTarget { .. });
        assert_eq!(err.error_code(), codes::rule_table::UNDEFINED_STATE);
    }

    #[test]
    fn test_structural_errors() {
        assert_matches!(
            RuleTable::build(flags(), vec![(StateId::General, vec![])]),
            Err(RuleTableError::MissingRoot)
        );
        assert_matches!(
            RuleTable::build(flags(), vec![(StateId::Root, vec![]), (StateId::Root, vec![])]),
            Err(RuleTableError::DuplicateState { state: StateId::Root })
        );
        assert_matches!(
            RuleTable::build(
                flags(),
                vec![(
                    StateId::Root,
                    vec![RuleDef::rule("x", Emission::Single(Name), Action::PopN(0))]
                )]
            ),
            Err(RuleTableError::EmptyPop { .. })
        );
    }

    #[test]
    fn test_pattern_errors() {
        let err = RuleTable::build(flags(), vec![(StateId::Root, vec![RuleDef::emit("(", Name)])])
            .unwrap_err();
        assert_matches!(err, RuleTableError::InvalidPattern { .. });

        let err = RuleTable::build(
            flags(),
            vec![(
                StateId::Root,
                vec![RuleDef::groups("(a)(b)", &[Name], Action::Emit)],
            )],
        )
        .unwrap_err();
        assert_matches!(
            err,
            RuleTableError::GroupMismatch {
                groups: 2,
                mapped: 1,
                ..
            }
        );
    }

    #[test]
    fn test_patterns_are_anchored_and_flagged() {
        let table = RuleTable::build(flags(), vec![(StateId::Root, vec![RuleDef::emit("if", KeywordReserved)])])
            .unwrap();
        let rule = &table.rules(StateId::Root)[0];
        assert!(rule.regex.is_match("IF x"));
        assert!(!rule.regex.is_match(" if"));
        assert!(table.flags().case_insensitive);
    }

    #[test]
    fn test_state_names_round_trip() {
        for state in StateId::ALL {
            assert_eq!(state.name().parse::<StateId>(), Ok(state));
        }
        assert!("nowhere".parse::<StateId>().is_err());
    }
}
