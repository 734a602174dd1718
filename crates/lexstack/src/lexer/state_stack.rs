//! # State Stack

use crate::rules::{CompiledTransition, StateId};

/// A non-empty stack of lexer states.
///
/// The bottom entry is the root state, which is never popped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateStack {
    root: StateId,
    above: Vec<StateId>,
}

impl StateStack {
    /// Create a stack holding only `root`.
    pub fn new(root: StateId) -> Self {
        Self {
            root,
            above: Vec::new(),
        }
    }

    /// The current state.
    pub fn top(&self) -> StateId {
        self.above.last().copied().unwrap_or(self.root)
    }

    /// The number of states, including the root.
    pub fn depth(&self) -> usize {
        1 + self.above.len()
    }

    /// Push a state.
    pub fn push(
        &mut self,
        state: StateId,
    ) {
        self.above.push(state);
    }

    /// Pop up to `n` states; the root is never popped.
    pub fn pop(
        &mut self,
        n: usize,
    ) {
        let keep = self.above.len().saturating_sub(n);
        self.above.truncate(keep);
    }

    /// Drop everything above the root.
    pub fn reset(&mut self) {
        self.above.clear();
    }

    /// Iterate the states, root first.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        core::iter::once(self.root).chain(self.above.iter().copied())
    }

    /// Apply a rule transition.
    pub fn apply(
        &mut self,
        transition: &CompiledTransition,
    ) {
        match transition {
            CompiledTransition::None => {}
            CompiledTransition::Push(states) => self.above.extend_from_slice(states),
            CompiledTransition::PushCurrent => self.push(self.top()),
            CompiledTransition::Pop(n) => self.pop(*n),
            CompiledTransition::Goto(state) => {
                self.pop(1);
                self.push(*state);
            }
        }
    }
}
