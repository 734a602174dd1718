//! # State Table Options

use crate::{rules::StateName, tokens::TokenKind};

/// The default root state name.
pub const DEFAULT_ROOT_STATE: &str = "root";

/// The default bound on consecutive zero-width transitions.
pub const DEFAULT_MAX_ZERO_WIDTH_STEPS: usize = 64;

/// The default bound on nested group lexing.
pub const DEFAULT_MAX_NESTING: usize = 16;

/// Options for building and running a [`StateTable`](crate::rules::StateTable).
///
/// ## Style Hints
///
/// Instance names should prefer `table_options`,
/// or `options` when there is no ambiguity.
#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    root: StateName,
    multi_line: bool,
    reset_on_newline: bool,
    max_zero_width_steps: usize,
    max_nesting: usize,
    text_kind: TokenKind,
    error_kind: TokenKind,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            root: StateName::const_new(DEFAULT_ROOT_STATE),
            multi_line: true,
            reset_on_newline: true,
            max_zero_width_steps: DEFAULT_MAX_ZERO_WIDTH_STEPS,
            max_nesting: DEFAULT_MAX_NESTING,
            text_kind: TokenKind::TEXT,
            error_kind: TokenKind::ERROR,
        }
    }
}

impl TableOptions {
    /// The name of the root state; the bottom of every state stack.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Sets the root state name.
    pub fn set_root<S: AsRef<str>>(
        &mut self,
        root: S,
    ) {
        self.root = StateName::new(root.as_ref());
    }

    /// Sets the root state name.
    pub fn with_root<S: AsRef<str>>(
        mut self,
        root: S,
    ) -> Self {
        self.set_root(root);
        self
    }

    /// Do `^` and `$` match at line boundaries?
    ///
    /// Defaults to `true`.
    pub fn multi_line(&self) -> bool {
        self.multi_line
    }

    /// Sets whether `^` and `$` match at line boundaries.
    pub fn set_multi_line(
        &mut self,
        multi_line: bool,
    ) {
        self.multi_line = multi_line;
    }

    /// Sets whether `^` and `$` match at line boundaries.
    pub fn with_multi_line(
        mut self,
        multi_line: bool,
    ) -> Self {
        self.set_multi_line(multi_line);
        self
    }

    /// Does an unmatched `\n` reset the state stack to the root?
    ///
    /// Defaults to `true`. The newline itself is emitted with the text kind.
    pub fn reset_on_newline(&self) -> bool {
        self.reset_on_newline
    }

    /// Sets whether an unmatched `\n` resets the state stack.
    pub fn set_reset_on_newline(
        &mut self,
        reset_on_newline: bool,
    ) {
        self.reset_on_newline = reset_on_newline;
    }

    /// Sets whether an unmatched `\n` resets the state stack.
    pub fn with_reset_on_newline(
        mut self,
        reset_on_newline: bool,
    ) -> Self {
        self.set_reset_on_newline(reset_on_newline);
        self
    }

    /// The max number of consecutive zero-width transitions at one offset.
    pub fn max_zero_width_steps(&self) -> usize {
        self.max_zero_width_steps
    }

    /// Sets the max number of consecutive zero-width transitions.
    pub fn set_max_zero_width_steps(
        &mut self,
        steps: usize,
    ) {
        self.max_zero_width_steps = steps;
    }

    /// Sets the max number of consecutive zero-width transitions.
    pub fn with_max_zero_width_steps(
        mut self,
        steps: usize,
    ) -> Self {
        self.set_max_zero_width_steps(steps);
        self
    }

    /// The max depth of nested [`GroupAction::Lex`](crate::rules::GroupAction::Lex) lexing.
    pub fn max_nesting(&self) -> usize {
        self.max_nesting
    }

    /// Sets the max depth of nested group lexing.
    pub fn set_max_nesting(
        &mut self,
        depth: usize,
    ) {
        self.max_nesting = depth;
    }

    /// Sets the max depth of nested group lexing.
    pub fn with_max_nesting(
        mut self,
        depth: usize,
    ) -> Self {
        self.set_max_nesting(depth);
        self
    }

    /// The kind for gaps, skipped groups, and unmatched newlines.
    pub fn text_kind(&self) -> &TokenKind {
        &self.text_kind
    }

    /// Sets the text kind.
    pub fn with_text_kind(
        self,
        text_kind: TokenKind,
    ) -> Self {
        Self { text_kind, ..self }
    }

    /// The kind for unmatched characters.
    pub fn error_kind(&self) -> &TokenKind {
        &self.error_kind
    }

    /// Sets the error kind.
    pub fn with_error_kind(
        self,
        error_kind: TokenKind,
    ) -> Self {
        Self { error_kind, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = TableOptions::default();
        assert_eq!(options.root(), "root");
        assert!(options.multi_line());
        assert!(options.reset_on_newline());
        assert_eq!(options.max_zero_width_steps(), DEFAULT_MAX_ZERO_WIDTH_STEPS);
        assert_eq!(options.max_nesting(), DEFAULT_MAX_NESTING);
        assert_eq!(options.text_kind(), &TokenKind::TEXT);
        assert_eq!(options.error_kind(), &TokenKind::ERROR);
    }

    #[test]
    fn test_setters() {
        let options = TableOptions::default()
            .with_root("start")
            .with_multi_line(false)
            .with_reset_on_newline(false)
            .with_max_zero_width_steps(3)
            .with_max_nesting(2)
            .with_text_kind(TokenKind::WHITESPACE)
            .with_error_kind(TokenKind::new("Error.Lexer"));

        assert_eq!(options.root(), "start");
        assert!(!options.multi_line());
        assert!(!options.reset_on_newline());
        assert_eq!(options.max_zero_width_steps(), 3);
        assert_eq!(options.max_nesting(), 2);
        assert_eq!(options.text_kind(), &TokenKind::WHITESPACE);
        assert_eq!(options.error_kind().as_str(), "Error.Lexer");
    }
}
