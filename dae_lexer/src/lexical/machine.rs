//! Explicit state stack for nested scanning contexts

use super::rules::{Action, StateId};

/// A pop asked for more levels than sat above the bottom state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackUnderflow {
    pub requested: usize,
    pub removed: usize,
}

/// Non-empty stack of active states; the top selects the rule list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateStack {
    states: Vec<StateId>,
}

impl StateStack {
    pub fn new(root: StateId) -> Self {
        Self { states: vec![root] }
    }

    pub fn top(&self) -> StateId {
        // Never empty: pops stop at the bottom state
        self.states[self.states.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.states.len()
    }

    pub fn is_at_root(&self) -> bool {
        self.states.len() == 1
    }

    pub fn push(&mut self, state: StateId) {
        self.states.push(state);
    }

    /// Remove the top state and return it
    pub fn pop(&mut self) -> Result<StateId, StackUnderflow> {
        let top = self.top();
        self.pop_n(1).map(|()| top)
    }

    /// Remove `n` levels, keeping the bottom state
    pub fn pop_n(&mut self, n: usize) -> Result<(), StackUnderflow> {
        let available = self.states.len() - 1;
        let removed = n.min(available);
        self.states.truncate(self.states.len() - removed);

        if removed < n {
            Err(StackUnderflow {
                requested: n,
                removed,
            })
        } else {
            Ok(())
        }
    }

    /// Apply a rule's stack effect. The stack is updated even when an
    /// underflow is reported.
    pub fn apply(&mut self, action: &Action) -> Result<(), StackUnderflow> {
        match *action {
            Action::Emit => Ok(()),
            Action::Push(state) => {
                self.push(state);
                Ok(())
            }
            Action::PushSelf => {
                let top = self.top();
                self.push(top);
                Ok(())
            }
            Action::Pop => self.pop_n(1),
            Action::PopN(n) => self.pop_n(n),
            Action::PopPush(state) => {
                let result = self.pop_n(1);
                self.push(state);
                result
            }
        }
    }

    /// Bottom to top
    pub fn states(&self) -> &[StateId] {
        &self.states
    }
}

impl Default for StateStack {
    fn default() -> Self {
        Self::new(StateId::Root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_push_and_pop() {
        let mut stack = StateStack::default();
        stack.push(StateId::FunctionDeclaration);
        stack.push(StateId::FunctionInner);
        assert_eq!(stack.depth(), 3);
        assert_eq!(stack.top(), StateId::FunctionInner);

        assert_eq!(stack.pop(), Ok(StateId::FunctionInner));
        assert_eq!(stack.pop(), Ok(StateId::FunctionDeclaration));
        assert!(stack.is_at_root());
    }

    #[test]
    fn test_pop_clamps_at_bottom() {
        let mut stack = StateStack::default();
        assert_matches!(
            stack.pop(),
            Err(StackUnderflow {
                requested: 1,
                removed: 0
            })
        );
        assert_eq!(stack.states(), &[StateId::Root]);

        stack.push(StateId::Parenthesis);
        assert_matches!(
            stack.pop_n(3),
            Err(StackUnderflow {
                requested: 3,
                removed: 1
            })
        );
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_apply_actions() {
        let mut stack = StateStack::default();
        stack.apply(&Action::Push(StateId::IfBlock)).unwrap();
        stack.apply(&Action::PushSelf).unwrap();
        assert_eq!(
            stack.states(),
            &[StateId::Root, StateId::IfBlock, StateId::IfBlock]
        );

        stack.apply(&Action::PopPush(StateId::Var)).unwrap();
        assert_eq!(stack.top(), StateId::Var);
        assert_eq!(stack.depth(), 3);

        stack.apply(&Action::Emit).unwrap();
        stack.apply(&Action::PopN(2)).unwrap();
        assert!(stack.is_at_root());
    }

    #[test]
    fn test_pop_push_at_root_still_pushes() {
        let mut stack = StateStack::default();
        assert!(stack.apply(&Action::PopPush(StateId::Meta)).is_err());
        assert_eq!(stack.states(), &[StateId::Root, StateId::Meta]);
    }
}
