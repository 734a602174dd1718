//! # Rules
//!
//! A [`Rule`] pairs one pattern with one [`Emission`] and one [`Transition`].
//! Rules are plain data; they are compiled when a
//! [`TableBuilder`](crate::rules::TableBuilder) builds a
//! [`StateTable`](crate::rules::StateTable).

use compact_str::CompactString;

use crate::{regex::RegexPattern, tokens::TokenKind};

/// Name of a lexer state.
pub type StateName = CompactString;

/// State stack change applied after a rule matches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Transition {
    /// Leave the stack alone.
    #[default]
    None,

    /// Push each state in order; the last one ends on top.
    Push(Vec<StateName>),

    /// Push the current top state again.
    PushCurrent,

    /// Pop `n >= 1` states; never pops the root state.
    Pop(usize),

    /// Pop one state, then push the named state.
    Goto(StateName),
}

impl Transition {
    /// Push a single state.
    pub fn push<S: AsRef<str>>(state: S) -> Self {
        Self::Push(vec![StateName::new(state.as_ref())])
    }

    /// Push several states in order.
    pub fn push_all<I, S>(states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Push(
            states
                .into_iter()
                .map(|s| StateName::new(s.as_ref()))
                .collect(),
        )
    }

    /// Pop one state.
    pub fn pop() -> Self {
        Self::Pop(1)
    }

    /// Pop `n` states.
    pub fn pop_n(n: usize) -> Self {
        Self::Pop(n)
    }

    /// Replace the top state.
    pub fn goto<S: AsRef<str>>(state: S) -> Self {
        Self::Goto(StateName::new(state.as_ref()))
    }

    /// Is this [`Transition::None`]?
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Per-capture-group action of a [`Emission::ByGroups`] rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupAction {
    /// Emit the group as one token of this kind.
    Kind(TokenKind),

    /// Emit the group as one token of the table's text kind.
    Text,

    /// Leave the group unclassified; it is folded into the surrounding gap.
    Skip,

    /// Re-tokenize the group text with the same table, starting from this state.
    Lex(StateName),
}

impl GroupAction {
    /// Re-tokenize the group starting at `state`.
    pub fn lex<S: AsRef<str>>(state: S) -> Self {
        Self::Lex(StateName::new(state.as_ref()))
    }
}

impl From<TokenKind> for GroupAction {
    fn from(kind: TokenKind) -> Self {
        Self::Kind(kind)
    }
}

impl From<Option<TokenKind>> for GroupAction {
    fn from(kind: Option<TokenKind>) -> Self {
        match kind {
            Some(kind) => Self::Kind(kind),
            None => Self::Skip,
        }
    }
}

/// What a rule emits for the text it matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    /// One token for the whole match.
    Token(TokenKind),

    /// One token per capture group, left to right ("bygroups").
    ///
    /// Action `i` applies to capture group `i + 1`. Text of the match not
    /// covered by an emitted group is emitted with the table's text kind.
    ByGroups(Vec<GroupAction>),

    /// No tokens; only valid for zero-width matches that change state.
    Nothing,
}

/// A pattern, an emission, and a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pattern: RegexPattern,
    emission: Emission,
    transition: Transition,
}

impl Rule {
    /// Build a new rule.
    pub fn new<P>(
        pattern: P,
        emission: Emission,
        transition: Transition,
    ) -> Self
    where
        P: Into<RegexPattern>,
    {
        Self {
            pattern: pattern.into(),
            emission,
            transition,
        }
    }

    /// A rule emitting one token of `kind` for the whole match.
    pub fn token<P>(
        pattern: P,
        kind: TokenKind,
    ) -> Self
    where
        P: Into<RegexPattern>,
    {
        Self::new(pattern, Emission::Token(kind), Transition::None)
    }

    /// A rule emitting one token per capture group.
    pub fn by_groups<P, I, G>(
        pattern: P,
        groups: I,
    ) -> Self
    where
        P: Into<RegexPattern>,
        I: IntoIterator<Item = G>,
        G: Into<GroupAction>,
    {
        let groups = groups.into_iter().map(Into::into).collect();
        Self::new(pattern, Emission::ByGroups(groups), Transition::None)
    }

    /// A zero-width rule that always matches and only changes state.
    ///
    /// Placed last in a state, it dispatches to another state
    /// when nothing else in the current state matched.
    pub fn default_to(transition: Transition) -> Self {
        Self::new("", Emission::Nothing, transition)
    }

    /// Replace the transition.
    pub fn then(
        self,
        transition: Transition,
    ) -> Self {
        Self { transition, ..self }
    }

    /// Push `state` after matching.
    pub fn push<S: AsRef<str>>(
        self,
        state: S,
    ) -> Self {
        self.then(Transition::push(state))
    }

    /// Push the current state again after matching.
    pub fn push_current(self) -> Self {
        self.then(Transition::PushCurrent)
    }

    /// Pop one state after matching.
    pub fn pop(self) -> Self {
        self.then(Transition::pop())
    }

    /// Pop `n` states after matching.
    pub fn pop_n(
        self,
        n: usize,
    ) -> Self {
        self.then(Transition::pop_n(n))
    }

    /// Replace the top state after matching.
    pub fn goto<S: AsRef<str>>(
        self,
        state: S,
    ) -> Self {
        self.then(Transition::goto(state))
    }

    /// Get the pattern.
    pub fn pattern(&self) -> &RegexPattern {
        &self.pattern
    }

    /// Get the emission.
    pub fn emission(&self) -> &Emission {
        &self.emission
    }

    /// Get the transition.
    pub fn transition(&self) -> &Transition {
        &self.transition
    }
}

/// One entry in a state's declared rule list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateEntry {
    /// A rule.
    Rule(Rule),

    /// Splice another state's (flattened) rules in at this position.
    Include(StateName),
}

impl From<Rule> for StateEntry {
    fn from(rule: Rule) -> Self {
        Self::Rule(rule)
    }
}

/// Splice the rules of `state` in place.
pub fn include<S: AsRef<str>>(state: S) -> StateEntry {
    StateEntry::Include(StateName::new(state.as_ref()))
}
