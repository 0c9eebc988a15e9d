//! Lazy scanner driving a rule table over input text

use super::machine::StateStack;
use super::rules::{CompiledRule, Emission, RuleTable, StateId};
use crate::tokens::{Token, TokenCategory};
use std::collections::VecDeque;

/// Iterator of raw tokens; nothing is scanned until the caller pulls.
///
/// Every step consumes at least one character, either through a matching
/// rule or through a one-character `Error` token, so iteration always ends.
#[derive(Debug, Clone)]
pub struct Scanner<'t, 'src> {
    table: &'t RuleTable,
    text: &'src str,
    pos: usize,
    stack: StateStack,
    pending: VecDeque<Token<'src>>,
    max_depth: usize,
    underflows: usize,
}

impl<'t, 'src> Scanner<'t, 'src> {
    pub fn new(table: &'t RuleTable, text: &'src str) -> Self {
        Self {
            table,
            text,
            pos: 0,
            stack: StateStack::new(StateId::Root),
            pending: VecDeque::new(),
            max_depth: 1,
            underflows: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Pops that hit the bottom state
    pub fn underflows(&self) -> usize {
        self.underflows
    }

    /// Scan offset; tokens already queued may lie behind it
    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn stack(&self) -> &StateStack {
        &self.stack
    }

    pub fn text(&self) -> &'src str {
        self.text
    }

    fn step(&mut self) {
        let table = self.table;
        let text = self.text;
        let rest = &text[self.pos..];

        for rule in table.rules(self.stack.top()) {
            if let Some(consumed) = self.try_rule(rule, rest) {
                self.pos += consumed;
                if self.stack.apply(&rule.action).is_err() {
                    self.underflows += 1;
                }
                self.max_depth = self.max_depth.max(self.stack.depth());
                return;
            }
        }

        // No rule applies: flag one whole character and move on
        let width = rest.chars().next().map(char::len_utf8).unwrap_or(1);
        self.pending.push_back(Token::new(
            TokenCategory::Error,
            &rest[..width],
            self.pos,
        ));
        self.pos += width;
    }

    /// Queue the rule's tokens and return the consumed length.
    /// Zero-length matches count as no match.
    fn try_rule(&mut self, rule: &CompiledRule, rest: &'src str) -> Option<usize> {
        match &rule.emission {
            Emission::Single(category) => {
                let found = rule.regex.find(rest)?;
                if found.end() == 0 {
                    return None;
                }
                self.pending
                    .push_back(Token::new(*category, found.as_str(), self.pos));
                Some(found.end())
            }
            Emission::ByGroups(categories) => {
                let captures = rule.regex.captures(rest)?;
                let whole = captures.get(0)?;
                if whole.end() == 0 {
                    return None;
                }

                let mut cursor = 0;
                for (index, category) in categories.iter().enumerate() {
                    let Some(group) = captures.get(index + 1) else {
                        continue;
                    };
                    if group.end() <= cursor {
                        continue;
                    }
                    if group.start() > cursor {
                        self.queue(TokenCategory::Text, rest, cursor, group.start());
                    }
                    let start = group.start().max(cursor);
                    self.queue(*category, rest, start, group.end());
                    cursor = group.end();
                }
                // Text the groups leave uncovered is kept so lexemes still add up
                if cursor < whole.end() {
                    self.queue(TokenCategory::Text, rest, cursor, whole.end());
                }
                Some(whole.end())
            }
        }
    }

    fn queue(&mut self, category: TokenCategory, rest: &'src str, start: usize, end: usize) {
        self.pending
            .push_back(Token::new(category, &rest[start..end], self.pos + start));
    }
}

impl<'src> Iterator for Scanner<'_, 'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            if self.pos >= self.text.len() {
                return None;
            }
            self.step();
        }
    }
}

impl std::iter::FusedIterator for Scanner<'_, '_> {}

/// Raw tokens of `text` under an arbitrary table
pub fn tokenize_with<'t, 'src>(table: &'t RuleTable, text: &'src str) -> Scanner<'t, 'src> {
    Scanner::new(table, text)
}
