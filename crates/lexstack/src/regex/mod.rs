//! # Regex Utilities
//!
//! Rule tables written for highlighting engines lean on look-around
//! (`(?<=:)`, `(?=\})`) which the [`regex_automata`] meta engine does not support;
//! the [`fancy_regex`] crate does, at a backtracking cost. We'd prefer the meta engine
//! whenever a pattern permits it, falling back to [`fancy_regex`] otherwise.
//!
//! * Labeling Patterns - [`RegexPattern`]
//!   * [`RegexPattern::Basic`] - a pattern which was written for [`regex_automata`].
//!   * [`RegexPattern::Fancy`] - a pattern which was written for [`fancy_regex`].
//!   * [`RegexPattern::Adaptive`] - unknown target, try basic; then fall-up to fancy.
//! * Wrapping Compiled Regex - [`RegexWrapper`]
//!
//! Every search through a [`RegexWrapper`] is *anchored* at a caller-provided offset,
//! while look-behind, `^` and `\b` still observe the text before that offset.

pub mod regex_wrapper;

#[doc(inline)]
pub use regex_wrapper::{ErrorWrapper, GroupSpans, RegexPattern, RegexWrapper};
