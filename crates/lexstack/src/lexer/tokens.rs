//! # Token Iterator
//!
//! The match loop. Each step consults the flattened rules of the state on top
//! of the stack, anchored at the cursor; the first rule that matches wins.

use std::collections::VecDeque;

use crate::{
    errors::{LSResult, LexstackError},
    lexer::{ScanMemo, StateStack, group_emitter::emit_groups},
    rules::{CompiledEmission, CompiledRule, RuleMatch, StateId, StateTable},
    support::ranges::first_char_width,
    tokens::Token,
};

/// Lazy token stream over one text.
///
/// Yields `Ok` tokens covering the text in order; a scan defect is yielded
/// once as an `Err` item, after which the iterator is exhausted.
///
/// ## Style Hints
///
/// Instance names should prefer `tokens`, or `token_iter`.
#[derive(Debug)]
pub struct Tokens<'a, 't> {
    table: &'a StateTable,
    text: &'t str,
    cursor: usize,
    stack: StateStack,
    pending: VecDeque<Token<'t>>,
    memo: ScanMemo,
    zero_width_steps: usize,
    nesting: usize,
    done: bool,
}

impl<'a, 't> Tokens<'a, 't> {
    /// Start tokenizing `text` from the root state.
    pub fn new(
        table: &'a StateTable,
        text: &'t str,
    ) -> Self {
        Self::with_stack(table, text, StateStack::new(table.root()))
    }

    /// Start tokenizing `text` from an explicit stack.
    pub fn with_stack(
        table: &'a StateTable,
        text: &'t str,
        stack: StateStack,
    ) -> Self {
        Self {
            table,
            text,
            cursor: 0,
            stack,
            pending: VecDeque::new(),
            memo: ScanMemo::new(),
            zero_width_steps: 0,
            nesting: 0,
            done: false,
        }
    }

    /// A nested scan of a group's text, starting from `[root, state]`.
    pub(crate) fn nested(
        table: &'a StateTable,
        text: &'t str,
        state: StateId,
        nesting: usize,
    ) -> Self {
        let mut stack = StateStack::new(table.root());
        stack.push(state);
        Self {
            nesting,
            ..Self::with_stack(table, text, stack)
        }
    }

    /// The state table.
    pub fn table(&self) -> &'a StateTable {
        self.table
    }

    /// The byte offset of the next unscanned text.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The current stack depth, including the root.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// The current state stack.
    pub fn stack(&self) -> &StateStack {
        &self.stack
    }

    /// The current state stack names, root first.
    pub fn state_stack(&self) -> Vec<&'a str> {
        let table = self.table;
        self.stack.iter().map(|id| table.state_name(id)).collect()
    }

    fn step(&mut self) -> LSResult<()> {
        let table = self.table;
        for rule in table.rules(self.stack.top()) {
            if !self.memo.may_match(rule, self.text, self.cursor)? {
                continue;
            }
            if let Some(m) = rule.match_at(self.text, self.cursor)? {
                return self.accept(rule, m);
            }
        }
        self.fallback();
        Ok(())
    }

    fn accept(
        &mut self,
        rule: &CompiledRule,
        m: RuleMatch,
    ) -> LSResult<()> {
        let RuleMatch { span, groups } = m;

        if span.is_empty() {
            if rule.transition().is_none() {
                return Err(LexstackError::ZeroWidthMatch {
                    state: rule.origin().to_string(),
                    index: rule.index(),
                    offset: self.cursor,
                });
            }
            self.zero_width_steps += 1;
            let max_steps = self.table.options().max_zero_width_steps();
            if self.zero_width_steps > max_steps {
                return Err(LexstackError::ZeroWidthLoop {
                    state: self.table.state_name(self.stack.top()).to_string(),
                    offset: self.cursor,
                    steps: max_steps,
                });
            }
        } else {
            self.zero_width_steps = 0;
            match rule.emission() {
                CompiledEmission::Token(kind) => {
                    self.pending
                        .push_back(Token::new(span.start, kind.clone(), &self.text[span.clone()]));
                }
                CompiledEmission::ByGroups(actions) => {
                    let mut out = Vec::new();
                    emit_groups(
                        self.table,
                        self.text,
                        span.clone(),
                        groups.as_ref().unwrap_or(&Vec::new()),
                        actions,
                        self.nesting,
                        &mut out,
                    )?;
                    self.pending.extend(out);
                }
                CompiledEmission::Nothing => {
                    return Err(LexstackError::DroppedText {
                        state: rule.origin().to_string(),
                        index: rule.index(),
                        offset: self.cursor,
                    });
                }
            }
        }

        log::trace!(
            "MATCHED: {}[{}] at {}..{} in state {:?}",
            rule.origin(),
            rule.index(),
            span.start,
            span.end,
            self.table.state_name(self.stack.top()),
        );

        self.cursor = span.end;
        self.stack.apply(rule.transition());
        Ok(())
    }

    fn fallback(&mut self) {
        let options = self.table.options();
        let start = self.cursor;
        let end = start + first_char_width(&self.text[start..]);
        let piece = &self.text[start..end];

        let kind = if piece == "\n" {
            if options.reset_on_newline() {
                self.stack.reset();
            }
            options.text_kind()
        } else {
            log::trace!("UNMATCHED: {piece:?} at {start}");
            options.error_kind()
        };

        self.pending.push_back(Token::new(start, kind.clone(), piece));
        self.zero_width_steps = 0;
        self.cursor = end;
    }
}

impl<'t> Iterator for Tokens<'_, 't> {
    type Item = LSResult<Token<'t>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(Ok(token));
            }
            if self.done || self.cursor >= self.text.len() {
                self.done = true;
                return None;
            }
            if let Err(err) = self.step() {
                self.done = true;
                return Some(Err(err));
            }
        }
    }
}

impl core::iter::FusedIterator for Tokens<'_, '_> {}

/// Tokenize `text` from the root state of `table`.
pub fn tokenize<'a, 't>(
    text: &'t str,
    table: &'a StateTable,
) -> Tokens<'a, 't> {
    Tokens::new(table, text)
}
