//! # Session Splicer
//!
//! Splits a session transcript into prompt lines, which carry source code,
//! and literal output lines. Consecutive prompt lines are batched: their code
//! is concatenated, lexed with the full stateful lexer, and the prompts are
//! merged back in at their original offsets.

use std::{collections::VecDeque, sync::Arc};

use crate::{
    errors::{LSResult, LexstackError},
    lexer::TextLexer,
    regex::RegexWrapper,
    rules::StateTable,
    session::{Insertion, SessionConfig, merge_insertions},
    support::lines::LineSpans,
    tokens::Token,
};

/// Lexes session transcripts against a [`StateTable`].
///
/// ## Style Hints
///
/// Instance names should prefer `splicer`.
#[derive(Debug, Clone)]
pub struct SessionSplicer {
    table: Arc<StateTable>,
    prompt: RegexWrapper,
    config: SessionConfig,
}

impl SessionSplicer {
    /// Create a splicer with the default [`SessionConfig`].
    pub fn new<T: Into<Arc<StateTable>>>(table: T) -> LSResult<Self> {
        Self::with_config(table, SessionConfig::default())
    }

    /// Create a splicer.
    ///
    /// ## Returns
    /// The splicer, or [`LexstackError::Prompt`] if the prompt does not compile.
    pub fn with_config<T: Into<Arc<StateTable>>>(
        table: T,
        config: SessionConfig,
    ) -> LSResult<Self> {
        let prompt = config.prompt.compile(true).map_err(LexstackError::Prompt)?;
        Ok(Self {
            table: table.into(),
            prompt,
            config,
        })
    }

    /// The state table used for prompt code.
    pub fn table(&self) -> &Arc<StateTable> {
        &self.table
    }

    /// The session config.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Match the prompt at the start of `line`.
    ///
    /// ## Returns
    /// The byte length of the prompt, or `None` if `line` is not a prompt line.
    /// An empty prompt match does not count.
    pub fn match_prompt(
        &self,
        line: &str,
    ) -> LSResult<Option<usize>> {
        Ok(self
            .prompt
            .find_at(line, 0)
            .map_err(LexstackError::Prompt)?
            .filter(|span| !span.is_empty())
            .map(|span| span.end))
    }

    /// Tokenize a transcript.
    pub fn tokenize<'s, 't>(
        &'s self,
        text: &'t str,
    ) -> SessionTokens<'s, 't> {
        SessionTokens::new(self, text)
    }

    /// Tokenize a transcript, collecting the tokens.
    pub fn tokenize_to_vec<'t>(
        &self,
        text: &'t str,
    ) -> LSResult<Vec<Token<'t>>> {
        self.tokenize(text).collect()
    }
}

impl TextLexer for SessionSplicer {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text)))]
    fn lex<'t>(
        &self,
        text: &'t str,
    ) -> LSResult<Vec<Token<'t>>> {
        self.tokenize_to_vec(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpliceState {
    Idle,
    Accumulating { region_start: usize },
}

/// Lazy token stream over one session transcript.
///
/// Like [`Tokens`](crate::lexer::Tokens), a defect is yielded once as an
/// `Err` item, after which the iterator is exhausted.
#[derive(Debug)]
pub struct SessionTokens<'s, 't> {
    splicer: &'s SessionSplicer,
    text: &'t str,
    lines: LineSpans<'t>,
    state: SpliceState,
    buffer: String,
    insertions: Vec<Insertion<'t>>,
    pending: VecDeque<Token<'t>>,
    done: bool,
}

impl<'s, 't> SessionTokens<'s, 't> {
    /// Start tokenizing a transcript.
    pub fn new(
        splicer: &'s SessionSplicer,
        text: &'t str,
    ) -> Self {
        Self {
            splicer,
            text,
            lines: LineSpans::new(text),
            state: SpliceState::Idle,
            buffer: String::new(),
            insertions: Vec::new(),
            pending: VecDeque::new(),
            done: false,
        }
    }

    /// Is prompt code waiting to be flushed?
    pub fn is_accumulating(&self) -> bool {
        matches!(self.state, SpliceState::Accumulating { .. })
    }

    fn scan_line(
        &mut self,
        span: core::ops::Range<usize>,
    ) -> LSResult<()> {
        let line = &self.text[span.clone()];
        let config = self.splicer.config();

        match self.splicer.match_prompt(line)? {
            Some(end) => {
                if self.state == SpliceState::Idle {
                    self.state = SpliceState::Accumulating {
                        region_start: span.start,
                    };
                }
                self.insertions.push(Insertion::new(
                    self.buffer.len(),
                    vec![Token::new(span.start, config.prompt_kind.clone(), &line[..end])],
                ));
                self.buffer.push_str(&line[end..]);
            }
            None => {
                self.flush()?;
                self.pending
                    .push_back(Token::new(span.start, config.line_kind(line).clone(), line));
            }
        }
        Ok(())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    fn flush(&mut self) -> LSResult<()> {
        let SpliceState::Accumulating { region_start } = self.state else {
            return Ok(());
        };
        self.state = SpliceState::Idle;

        let buffer = core::mem::take(&mut self.buffer);
        let insertions = core::mem::take(&mut self.insertions);
        let prompts = insertions.len();

        let nested = self.splicer.table.tokenize_to_vec(&buffer)?;
        let merged = merge_insertions(self.text, region_start, insertions, &nested)?;

        log::debug!(
            "flushed session region at {region_start}: {prompts} prompts, {} code bytes, {} tokens",
            buffer.len(),
            merged.len(),
        );

        self.pending.extend(merged);
        Ok(())
    }
}

impl<'t> Iterator for SessionTokens<'_, 't> {
    type Item = LSResult<Token<'t>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(Ok(token));
            }
            if self.done {
                return None;
            }

            let result = match self.lines.next() {
                Some(span) => self.scan_line(span),
                None => {
                    self.done = true;
                    self.flush()
                }
            };
            if let Err(err) = result {
                self.done = true;
                self.pending.clear();
                return Some(Err(err));
            }
        }
    }
}

impl core::iter::FusedIterator for SessionTokens<'_, '_> {}

/// Tokenize a session transcript with `splicer`.
pub fn tokenize_session<'s, 't>(
    text: &'t str,
    splicer: &'s SessionSplicer,
) -> SessionTokens<'s, 't> {
    SessionTokens::new(splicer, text)
}
