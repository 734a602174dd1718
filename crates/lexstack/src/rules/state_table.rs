//! # State Tables
//!
//! A [`TableBuilder`] collects named states of ordered [`StateEntry`]s;
//! [`TableBuilder::build`] compiles every rule pattern once, resolves state
//! names to [`StateId`]s, and flattens `include` entries into one ordered
//! rule list per state. The resulting [`StateTable`] is immutable and may be
//! shared across threads.

use core::ops::Range;
use std::sync::Arc;

use crate::{
    errors::{LSResult, LexstackError},
    lexer::{StateStack, Tokens},
    regex::{GroupSpans, RegexWrapper},
    rules::{Emission, GroupAction, Rule, StateEntry, StateName, TableOptions, Transition},
    tokens::{Token, TokenKind},
    types::{LSHashMap, hash_map_with_capacity},
};

/// Index of a state in a [`StateTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(usize);

impl StateId {
    /// The index of the state.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A [`Transition`] with state names resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompiledTransition {
    /// Leave the stack alone.
    None,

    /// Push each state in order.
    Push(Vec<StateId>),

    /// Push the current top state again.
    PushCurrent,

    /// Pop `n` states, clamped at the root.
    Pop(usize),

    /// Pop one state, then push.
    Goto(StateId),
}

impl CompiledTransition {
    /// Is this [`CompiledTransition::None`]?
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// A [`GroupAction`] with state names resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompiledGroupAction {
    /// Emit the group with this kind.
    Kind(TokenKind),

    /// Emit the group with the text kind.
    Text,

    /// Fold the group into the gap.
    Skip,

    /// Re-tokenize the group from this state.
    Lex(StateId),
}

/// An [`Emission`] with state names resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompiledEmission {
    /// One token for the whole match.
    Token(TokenKind),

    /// One token per capture group.
    ByGroups(Vec<CompiledGroupAction>),

    /// No tokens.
    Nothing,
}

/// The result of matching one rule at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    /// The matched byte range.
    pub span: Range<usize>,

    /// Capture group spans; only collected for grouped emissions.
    pub groups: Option<GroupSpans>,
}

/// A compiled [`Rule`].
#[derive(Debug)]
pub struct CompiledRule {
    regex: RegexWrapper,
    emission: CompiledEmission,
    transition: CompiledTransition,
    origin: StateName,
    index: usize,
    slot: usize,
}

impl CompiledRule {
    /// The compiled pattern.
    pub fn regex(&self) -> &RegexWrapper {
        &self.regex
    }

    /// The resolved emission.
    pub fn emission(&self) -> &CompiledEmission {
        &self.emission
    }

    /// The resolved transition.
    pub fn transition(&self) -> &CompiledTransition {
        &self.transition
    }

    /// The name of the state that declared this rule.
    ///
    /// For included rules, this is the included state; not the including one.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The entry index of this rule in its declaring state.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The table-wide index of this rule, unique among declared rules.
    ///
    /// Included rules share the slot of the rule they were declared as.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// The start of the leftmost match at or after `at`.
    pub fn next_match_start(
        &self,
        text: &str,
        at: usize,
    ) -> LSResult<Option<usize>> {
        self.regex
            .next_match_start(text, at)
            .map_err(|source| LexstackError::Match {
                state: self.origin.to_string(),
                index: self.index,
                offset: at,
                source,
            })
    }

    /// Match this rule anchored at `at`.
    pub fn match_at(
        &self,
        text: &str,
        at: usize,
    ) -> LSResult<Option<RuleMatch>> {
        let result = match &self.emission {
            CompiledEmission::ByGroups(_) => self.regex.captures_at(text, at).map(|caps| {
                caps.and_then(|groups| {
                    let span = groups.first().cloned().flatten()?;
                    Some(RuleMatch {
                        span,
                        groups: Some(groups),
                    })
                })
            }),
            _ => self
                .regex
                .find_at(text, at)
                .map(|span| span.map(|span| RuleMatch { span, groups: None })),
        };

        result.map_err(|source| LexstackError::Match {
            state: self.origin.to_string(),
            index: self.index,
            offset: at,
            source,
        })
    }
}

/// Builder for [`StateTable`]s.
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    options: TableOptions,
    states: Vec<(StateName, Vec<StateEntry>)>,
}

impl TableBuilder {
    /// Create a new, empty [`TableBuilder`] with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the [`TableOptions`].
    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Get a mutable view of the [`TableOptions`].
    pub fn options_mut(&mut self) -> &mut TableOptions {
        &mut self.options
    }

    /// Replace the [`TableOptions`].
    pub fn with_options(
        self,
        options: TableOptions,
    ) -> Self {
        Self { options, ..self }
    }

    /// Declare a state.
    ///
    /// Entry order is rule priority: the first matching rule wins.
    pub fn add_state<S, I>(
        &mut self,
        name: S,
        entries: I,
    ) where
        S: AsRef<str>,
        I: IntoIterator<Item = StateEntry>,
    {
        self.states.push((
            StateName::new(name.as_ref()),
            entries.into_iter().collect(),
        ));
    }

    /// Declare a state.
    ///
    /// Entry order is rule priority: the first matching rule wins.
    pub fn state<S, I>(
        mut self,
        name: S,
        entries: I,
    ) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = StateEntry>,
    {
        self.add_state(name, entries);
        self
    }

    /// The declared state names, in declaration order.
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(|(name, _)| name.as_str())
    }

    /// Compile the table.
    ///
    /// ## Errors
    /// * [`LexstackError::DuplicateState`], [`LexstackError::MissingRootState`],
    ///   [`LexstackError::UndefinedState`] for naming problems.
    /// * [`LexstackError::IncludeCycle`] if includes recurse.
    /// * [`LexstackError::Pattern`] if a pattern fails to compile.
    /// * [`LexstackError::InvalidRule`] for rules that can never be valid.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn build(&self) -> LSResult<StateTable> {
        let mut index: LSHashMap<StateName, StateId> = hash_map_with_capacity(self.states.len());
        for (id, (name, _)) in self.states.iter().enumerate() {
            if index.insert(name.clone(), StateId(id)).is_some() {
                return Err(LexstackError::DuplicateState {
                    name: name.to_string(),
                });
            }
        }

        let root = index
            .get(self.options.root())
            .copied()
            .ok_or_else(|| LexstackError::MissingRootState {
                name: self.options.root().to_string(),
            })?;

        let resolver = Resolver { index: &index };

        let mut declared: Vec<Vec<Option<Arc<CompiledRule>>>> = Vec::with_capacity(self.states.len());
        let mut slot = 0;
        for (name, entries) in &self.states {
            let mut compiled = Vec::with_capacity(entries.len());
            for (idx, entry) in entries.iter().enumerate() {
                compiled.push(match entry {
                    StateEntry::Rule(rule) => {
                        let built = self.compile_rule(name, idx, slot, rule, &resolver)?;
                        slot += 1;
                        Some(Arc::new(built))
                    }
                    StateEntry::Include(target) => {
                        resolver.resolve(target, name)?;
                        None
                    }
                });
            }
            declared.push(compiled);
        }

        let mut flat: Vec<Option<Vec<Arc<CompiledRule>>>> = vec![None; self.states.len()];
        let mut visiting = Vec::new();
        for id in 0..self.states.len() {
            self.flatten_state(id, &index, &declared, &mut flat, &mut visiting)?;
        }
        let rules: Vec<Vec<Arc<CompiledRule>>> = flat.into_iter().map(Option::unwrap_or_default).collect();

        log::debug!(
            "built state table: {} states, {} declared rules, {} flattened rules",
            self.states.len(),
            declared.iter().flatten().flatten().count(),
            rules.iter().map(Vec::len).sum::<usize>(),
        );

        Ok(StateTable {
            options: self.options.clone(),
            names: self.states.iter().map(|(name, _)| name.clone()).collect(),
            index,
            rules,
            root,
        })
    }

    fn compile_rule(
        &self,
        state: &StateName,
        index: usize,
        slot: usize,
        rule: &Rule,
        resolver: &Resolver<'_>,
    ) -> LSResult<CompiledRule> {
        let invalid = |reason: &str| LexstackError::InvalidRule {
            state: state.to_string(),
            index,
            reason: reason.to_string(),
        };

        let regex = rule
            .pattern()
            .compile(self.options.multi_line())
            .map_err(|source| LexstackError::Pattern {
                state: state.to_string(),
                index,
                pattern: rule.pattern().as_str().to_string(),
                source,
            })?;

        let transition = match rule.transition() {
            Transition::None => CompiledTransition::None,
            Transition::Push(names) => {
                if names.is_empty() {
                    return Err(invalid("push of no states"));
                }
                CompiledTransition::Push(
                    names
                        .iter()
                        .map(|name| resolver.resolve(name, state))
                        .collect::<LSResult<_>>()?,
                )
            }
            Transition::PushCurrent => CompiledTransition::PushCurrent,
            Transition::Pop(0) => return Err(invalid("pop count must be >= 1")),
            Transition::Pop(n) => CompiledTransition::Pop(*n),
            Transition::Goto(name) => CompiledTransition::Goto(resolver.resolve(name, state)?),
        };

        let emission = match rule.emission() {
            Emission::Token(kind) => CompiledEmission::Token(kind.clone()),
            Emission::Nothing => {
                if transition.is_none() {
                    return Err(invalid("rule emits nothing and has no transition"));
                }
                CompiledEmission::Nothing
            }
            Emission::ByGroups(actions) => {
                let groups = regex.captures_len().saturating_sub(1);
                if actions.len() > groups {
                    return Err(invalid(&format!(
                        "{} group actions for {} capture groups",
                        actions.len(),
                        groups
                    )));
                }
                CompiledEmission::ByGroups(
                    actions
                        .iter()
                        .map(|action| {
                            Ok(match action {
                                GroupAction::Kind(kind) => CompiledGroupAction::Kind(kind.clone()),
                                GroupAction::Text => CompiledGroupAction::Text,
                                GroupAction::Skip => CompiledGroupAction::Skip,
                                GroupAction::Lex(name) => {
                                    CompiledGroupAction::Lex(resolver.resolve(name, state)?)
                                }
                            })
                        })
                        .collect::<LSResult<_>>()?,
                )
            }
        };

        Ok(CompiledRule {
            regex,
            emission,
            transition,
            origin: state.clone(),
            index,
            slot,
        })
    }

    fn flatten_state(
        &self,
        id: usize,
        index: &LSHashMap<StateName, StateId>,
        declared: &[Vec<Option<Arc<CompiledRule>>>],
        flat: &mut [Option<Vec<Arc<CompiledRule>>>],
        visiting: &mut Vec<usize>,
    ) -> LSResult<()> {
        if flat[id].is_some() {
            return Ok(());
        }
        if let Some(pos) = visiting.iter().position(|&v| v == id) {
            let cycle = visiting[pos..]
                .iter()
                .chain(core::iter::once(&id))
                .map(|&v| self.states[v].0.as_str())
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(LexstackError::IncludeCycle { cycle });
        }

        visiting.push(id);
        let mut rules = Vec::new();
        for (idx, entry) in self.states[id].1.iter().enumerate() {
            match entry {
                StateEntry::Rule(_) => rules.extend(declared[id][idx].iter().cloned()),
                StateEntry::Include(target) => {
                    // Resolved during rule compilation.
                    let Some(&StateId(target)) = index.get(target) else {
                        continue;
                    };
                    self.flatten_state(target, index, declared, flat, visiting)?;
                    if let Some(included) = &flat[target] {
                        rules.extend(included.iter().cloned());
                    }
                }
            }
        }
        visiting.pop();

        log::trace!(
            "flattened state {:?}: {} rules",
            self.states[id].0,
            rules.len()
        );
        flat[id] = Some(rules);
        Ok(())
    }
}

struct Resolver<'a> {
    index: &'a LSHashMap<StateName, StateId>,
}

impl Resolver<'_> {
    fn resolve(
        &self,
        name: &StateName,
        referenced_from: &StateName,
    ) -> LSResult<StateId> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| LexstackError::UndefinedState {
                name: name.to_string(),
                referenced_from: referenced_from.to_string(),
            })
    }
}

/// A compiled, immutable table of lexer states.
///
/// ## Style Hints
///
/// Instance names should prefer `state_table`,
/// or `table` when there is no ambiguity.
#[derive(Debug)]
pub struct StateTable {
    options: TableOptions,
    names: Vec<StateName>,
    index: LSHashMap<StateName, StateId>,
    rules: Vec<Vec<Arc<CompiledRule>>>,
    root: StateId,
}

impl StateTable {
    /// Start a new [`TableBuilder`].
    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    /// Get the [`TableOptions`] the table was built with.
    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// The root state.
    pub fn root(&self) -> StateId {
        self.root
    }

    /// The number of states.
    pub fn state_count(&self) -> usize {
        self.names.len()
    }

    /// The total number of flattened rules, over all states.
    pub fn rule_count(&self) -> usize {
        self.rules.iter().map(Vec::len).sum()
    }

    /// Look up a state by name.
    pub fn state_id(
        &self,
        name: &str,
    ) -> Option<StateId> {
        self.index.get(name).copied()
    }

    /// The name of a state.
    ///
    /// ## Panics
    /// If `id` was not issued by this table; see [`StateTable::get_state_name`].
    pub fn state_name(
        &self,
        id: StateId,
    ) -> &str {
        &self.names[id.0]
    }

    /// The name of a state, or `None` if `id` is out of range for this table.
    pub fn get_state_name(
        &self,
        id: StateId,
    ) -> Option<&str> {
        self.names.get(id.0).map(|name| name.as_str())
    }

    /// The state names, in declaration order.
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|name| name.as_str())
    }

    /// The flattened, priority-ordered rules of a state.
    ///
    /// ## Panics
    /// If `id` was not issued by this table; see [`StateTable::get_rules`].
    pub fn rules(
        &self,
        id: StateId,
    ) -> &[Arc<CompiledRule>] {
        &self.rules[id.0]
    }

    /// The flattened rules of a state, or `None` if `id` is out of range for this table.
    pub fn get_rules(
        &self,
        id: StateId,
    ) -> Option<&[Arc<CompiledRule>]> {
        self.rules.get(id.0).map(Vec::as_slice)
    }

    /// Tokenize `text` from the root state.
    pub fn tokenize<'a, 't>(
        &'a self,
        text: &'t str,
    ) -> Tokens<'a, 't> {
        Tokens::new(self, text)
    }

    /// Tokenize `text` from a caller-provided initial stack.
    ///
    /// ## Arguments
    /// * `text` - the source text.
    /// * `stack` - state names, bottom first, pushed above the implied root.
    ///
    /// ## Returns
    /// The token iterator, or [`LexstackError::UndefinedState`] for an unknown name.
    pub fn tokenize_from<'a, 't, S: AsRef<str>>(
        &'a self,
        text: &'t str,
        stack: &[S],
    ) -> LSResult<Tokens<'a, 't>> {
        let mut state_stack = StateStack::new(self.root);
        for name in stack {
            let name = name.as_ref();
            let id = self
                .state_id(name)
                .ok_or_else(|| LexstackError::UndefinedState {
                    name: name.to_string(),
                    referenced_from: "<initial stack>".to_string(),
                })?;
            state_stack.push(id);
        }
        Ok(Tokens::with_stack(self, text, state_stack))
    }

    /// Tokenize `text` from the root state, collecting the tokens.
    pub fn tokenize_to_vec<'t>(
        &self,
        text: &'t str,
    ) -> LSResult<Vec<Token<'t>>> {
        self.tokenize(text).collect()
    }
}
