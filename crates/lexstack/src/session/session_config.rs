//! # Session Config

use crate::{regex::RegexPattern, tokens::TokenKind};

/// The default prompt pattern: an `erl` shell prompt, such as `1> `.
///
/// A bare prompt also matches at the end of a line, before `\n` or `\r\n`.
pub const DEFAULT_PROMPT_PATTERN: &str = r"\d+>(?:[ \t]|\r?$)";

/// The default traceback line marker.
pub const DEFAULT_TRACEBACK_MARKER: char = '*';

/// Configuration for a [`SessionSplicer`](crate::session::SessionSplicer).
///
/// ## Style Hints
///
/// Instance names should prefer `session_config`,
/// or `config` when there is no ambiguity.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// The prompt pattern, matched at the start of each line.
    pub prompt: RegexPattern,

    /// Lines starting with this marker are tracebacks; `None` disables.
    pub traceback_marker: Option<char>,

    /// The kind for prompt tokens.
    pub prompt_kind: TokenKind,

    /// The kind for output lines.
    pub output_kind: TokenKind,

    /// The kind for traceback lines.
    pub traceback_kind: TokenKind,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from_prompt(DEFAULT_PROMPT_PATTERN)
    }
}

impl SessionConfig {
    /// Build a config with the given prompt pattern and default kinds.
    pub fn from_prompt<P: Into<RegexPattern>>(prompt: P) -> Self {
        Self {
            prompt: prompt.into(),
            traceback_marker: Some(DEFAULT_TRACEBACK_MARKER),
            prompt_kind: TokenKind::GENERIC_PROMPT,
            output_kind: TokenKind::GENERIC_OUTPUT,
            traceback_kind: TokenKind::GENERIC_TRACEBACK,
        }
    }

    /// Sets the prompt pattern.
    pub fn with_prompt<P: Into<RegexPattern>>(
        self,
        prompt: P,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            ..self
        }
    }

    /// Sets the traceback marker.
    pub fn with_traceback_marker(
        self,
        traceback_marker: Option<char>,
    ) -> Self {
        Self {
            traceback_marker,
            ..self
        }
    }

    /// Sets the prompt kind.
    pub fn with_prompt_kind(
        self,
        prompt_kind: TokenKind,
    ) -> Self {
        Self {
            prompt_kind,
            ..self
        }
    }

    /// Sets the output kind.
    pub fn with_output_kind(
        self,
        output_kind: TokenKind,
    ) -> Self {
        Self {
            output_kind,
            ..self
        }
    }

    /// Sets the traceback kind.
    pub fn with_traceback_kind(
        self,
        traceback_kind: TokenKind,
    ) -> Self {
        Self {
            traceback_kind,
            ..self
        }
    }

    /// The kind for a non-prompt line.
    pub fn line_kind(
        &self,
        line: &str,
    ) -> &TokenKind {
        match self.traceback_marker {
            Some(marker) if line.starts_with(marker) => &self.traceback_kind,
            _ => &self.output_kind,
        }
    }
}
