//! # Regex Wrapper
//! This modules provides mechanisms to mix `regex_automata` and `fancy_regex` types.

use core::{fmt::Debug, ops::Range};

use regex_automata::{Anchored, Input, meta};

/// Capture group spans of one match; index `0` is the whole match.
pub type GroupSpans = Vec<Option<Range<usize>>>;

/// Error wrapper for regex patterns.
#[non_exhaustive]
#[derive(Debug)]
pub enum ErrorWrapper {
    /// Error from `regex_automata`.
    Basic(meta::BuildError),

    /// Error from `fancy_regex`.
    Fancy(fancy_regex::Error),
}

impl From<meta::BuildError> for ErrorWrapper {
    fn from(err: meta::BuildError) -> Self {
        Self::Basic(err)
    }
}

impl From<fancy_regex::Error> for ErrorWrapper {
    fn from(err: fancy_regex::Error) -> Self {
        Self::Fancy(err)
    }
}

impl core::fmt::Display for ErrorWrapper {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        match self {
            Self::Basic(err) => core::fmt::Display::fmt(err, f),
            Self::Fancy(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl core::error::Error for ErrorWrapper {}

/// Label for regex patterns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum RegexPattern {
    /// This is a pattern for the `regex_automata` meta engine.
    Basic(String),

    /// This is a pattern for the `fancy_regex` crate.
    Fancy(String),

    /// This pattern will try the `regex_automata` meta engine first,
    /// and fallback to `fancy_regex` if it fails.
    Adaptive(String),
}

impl<S: AsRef<str>> From<S> for RegexPattern {
    fn from(pattern: S) -> Self {
        Self::Adaptive(pattern.as_ref().to_string())
    }
}

impl RegexPattern {
    /// Get the underlying regex pattern.
    ///
    /// ## Returns
    /// The regex pattern string slice.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Basic(pattern) => pattern,
            Self::Fancy(pattern) => pattern,
            Self::Adaptive(pattern) => pattern,
        }
    }

    /// Compile the regex pattern into a `RegexWrapper`.
    ///
    /// ## Arguments
    /// * `multi_line` - whether `^` and `$` match at line boundaries.
    ///
    /// ## Returns
    /// A `Result` containing the compiled `RegexWrapper` or an `ErrorWrapper`.
    pub fn compile(
        &self,
        multi_line: bool,
    ) -> Result<RegexWrapper, ErrorWrapper> {
        let source = self.as_str();
        let flagged = if multi_line {
            format!("(?m){source}")
        } else {
            source.to_string()
        };

        let engine = match self {
            Self::Basic(_) => RegexEngine::Basic(meta::Regex::new(&flagged)?),
            Self::Fancy(_) => RegexEngine::Fancy(fancy_regex::Regex::new(&flagged)?),
            Self::Adaptive(_) => match meta::Regex::new(&flagged) {
                Ok(regex) => RegexEngine::Basic(regex),
                Err(_) => RegexEngine::Fancy(fancy_regex::Regex::new(&flagged)?),
            },
        };

        Ok(RegexWrapper {
            source: source.to_string(),
            engine,
        })
    }
}

#[derive(Debug, Clone)]
enum RegexEngine {
    Basic(meta::Regex),
    Fancy(fancy_regex::Regex),
}

/// Wrapper for compiled regex patterns.
///
/// All searches are anchored at the requested offset.
#[derive(Debug, Clone)]
pub struct RegexWrapper {
    source: String,
    engine: RegexEngine,
}

impl RegexWrapper {
    /// Is this `Basic`?
    ///
    /// ## Returns
    /// `true` if it wraps a `regex_automata` meta regex, `false` otherwise.
    pub fn is_basic(&self) -> bool {
        matches!(self.engine, RegexEngine::Basic(_))
    }

    /// Is this `Fancy`?
    ///
    /// ## Returns
    /// `true` if it wraps a `fancy_regex::Regex`, `false` otherwise.
    pub fn is_fancy(&self) -> bool {
        matches!(self.engine, RegexEngine::Fancy(_))
    }

    /// Get the underlying regex pattern, as written (without flags).
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The number of capture groups, including the implicit group `0`.
    pub fn captures_len(&self) -> usize {
        match &self.engine {
            RegexEngine::Basic(regex) => regex.captures_len(),
            RegexEngine::Fancy(regex) => regex.captures_len(),
        }
    }

    /// Match the pattern anchored at `at`.
    ///
    /// ## Arguments
    /// * `haystack` - the full text; context before `at` is visible to assertions.
    /// * `at` - the byte offset the match must start at.
    ///
    /// ## Returns
    /// The matched byte range, or `None`.
    pub fn find_at(
        &self,
        haystack: &str,
        at: usize,
    ) -> Result<Option<Range<usize>>, ErrorWrapper> {
        match &self.engine {
            RegexEngine::Basic(regex) => {
                let input = Input::new(haystack).range(at..).anchored(Anchored::Yes);
                Ok(regex.search(&input).map(|m| m.range()))
            }
            RegexEngine::Fancy(regex) => Ok(regex
                .find_from_pos(haystack, at)?
                .filter(|m| m.start() == at)
                .map(|m| m.start()..m.end())),
        }
    }

    /// Find the start of the leftmost match at or after `at`.
    ///
    /// Unlike [`RegexWrapper::find_at`], the match need not start at `at`.
    /// A match found at `start` is the same match an anchored search at
    /// `start` returns.
    ///
    /// ## Arguments
    /// * `haystack` - the full text; context before `at` is visible to assertions.
    /// * `at` - the byte offset to search from.
    ///
    /// ## Returns
    /// The start offset of the next match, or `None`.
    pub fn next_match_start(
        &self,
        haystack: &str,
        at: usize,
    ) -> Result<Option<usize>, ErrorWrapper> {
        match &self.engine {
            RegexEngine::Basic(regex) => {
                let input = Input::new(haystack).range(at..);
                Ok(regex.search(&input).map(|m| m.start()))
            }
            RegexEngine::Fancy(regex) => Ok(regex.find_from_pos(haystack, at)?.map(|m| m.start())),
        }
    }

    /// Match the pattern anchored at `at`, collecting capture group spans.
    ///
    /// ## Arguments
    /// * `haystack` - the full text; context before `at` is visible to assertions.
    /// * `at` - the byte offset the match must start at.
    ///
    /// ## Returns
    /// The [`GroupSpans`] of the match, or `None`.
    pub fn captures_at(
        &self,
        haystack: &str,
        at: usize,
    ) -> Result<Option<GroupSpans>, ErrorWrapper> {
        match &self.engine {
            RegexEngine::Basic(regex) => {
                let input = Input::new(haystack).range(at..).anchored(Anchored::Yes);
                let mut caps = regex.create_captures();
                regex.search_captures(&input, &mut caps);
                if !caps.is_match() {
                    return Ok(None);
                }
                Ok(Some(
                    (0..caps.group_len())
                        .map(|idx| caps.get_group(idx).map(|span| span.start..span.end))
                        .collect(),
                ))
            }
            RegexEngine::Fancy(regex) => {
                let Some(caps) = regex.captures_from_pos(haystack, at)? else {
                    return Ok(None);
                };
                match caps.get(0) {
                    Some(m) if m.start() == at => Ok(Some(
                        (0..caps.len())
                            .map(|idx| caps.get(idx).map(|m| m.start()..m.end()))
                            .collect(),
                    )),
                    _ => Ok(None),
                }
            }
        }
    }
}
