//! # Error Types

use crate::regex::ErrorWrapper;

/// Errors from lexstack operations.
///
/// Table construction errors are reported by
/// [`TableBuilder::build`](crate::rules::TableBuilder::build), before any text is scanned.
/// Scan-time defects are yielded as `Err` items by the token iterators;
/// the iterators are fused after the first error.
#[derive(Debug, thiserror::Error)]
pub enum LexstackError {
    /// Two states were declared with the same name.
    #[error("duplicate state: {name:?}")]
    DuplicateState {
        /// The repeated state name.
        name: String,
    },

    /// The configured root state was never declared.
    #[error("missing root state: {name:?}")]
    MissingRootState {
        /// The expected root state name.
        name: String,
    },

    /// A rule or include references a state that was never declared.
    #[error("state {referenced_from:?} references undefined state {name:?}")]
    UndefinedState {
        /// The undefined state name.
        name: String,

        /// The state holding the reference.
        referenced_from: String,
    },

    /// The include graph has a cycle.
    #[error("include cycle: {cycle}")]
    IncludeCycle {
        /// The cycle, rendered as `a -> b -> a`.
        cycle: String,
    },

    /// A rule is structurally invalid.
    #[error("invalid rule {state}[{index}]: {reason}")]
    InvalidRule {
        /// The state declaring the rule.
        state: String,

        /// The entry index of the rule within its state.
        index: usize,

        /// What is wrong with it.
        reason: String,
    },

    /// A rule pattern failed to compile.
    #[error("bad pattern in rule {state}[{index}] ({pattern:?}): {source}")]
    Pattern {
        /// The state declaring the rule.
        state: String,

        /// The entry index of the rule within its state.
        index: usize,

        /// The pattern source.
        pattern: String,

        /// The compile error.
        #[source]
        source: ErrorWrapper,
    },

    /// A pattern failed while matching (e.g. a backtracking limit).
    #[error("pattern failure in rule {state}[{index}] at offset {offset}: {source}")]
    Match {
        /// The state declaring the rule.
        state: String,

        /// The entry index of the rule within its state.
        index: usize,

        /// The cursor offset.
        offset: usize,

        /// The match error.
        #[source]
        source: ErrorWrapper,
    },

    /// A rule matched the empty string and has no transition.
    #[error("rule {state}[{index}] matched empty text at offset {offset} without a transition")]
    ZeroWidthMatch {
        /// The state declaring the rule.
        state: String,

        /// The entry index of the rule within its state.
        index: usize,

        /// The cursor offset.
        offset: usize,
    },

    /// Zero-width state changes kept cycling without consuming input.
    #[error("{steps} zero-width transitions at offset {offset} without progress (last state {state:?})")]
    ZeroWidthLoop {
        /// The state on top of the stack when the bound was hit.
        state: String,

        /// The cursor offset.
        offset: usize,

        /// The number of steps taken.
        steps: usize,
    },

    /// A rule without emission consumed text.
    #[error("rule {state}[{index}] consumed text at offset {offset} but emits nothing")]
    DroppedText {
        /// The state declaring the rule.
        state: String,

        /// The entry index of the rule within its state.
        index: usize,

        /// The cursor offset.
        offset: usize,
    },

    /// Nested group lexing recursed too deeply.
    #[error("nested group lexing exceeded depth {depth}")]
    NestingTooDeep {
        /// The depth limit.
        depth: usize,
    },

    /// Spliced session tokens did not line up with the source text.
    #[error("spliced token at offset {offset} does not align with the source text")]
    SpliceMisaligned {
        /// The offset of the misaligned token.
        offset: usize,
    },

    /// A session prompt pattern failed to compile or match.
    #[error("prompt pattern: {0}")]
    Prompt(#[source] ErrorWrapper),

    /// Table definition document error.
    #[cfg(feature = "serde")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Table definition is inconsistent.
    #[cfg(feature = "serde")]
    #[error("{0}")]
    Config(String),
}

/// Result type for lexstack operations.
pub type LSResult<T> = core::result::Result<T, LexstackError>;
