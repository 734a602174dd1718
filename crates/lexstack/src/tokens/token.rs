//! # Tokens

use core::ops::Range;

use crate::tokens::TokenKind;

/// A classified, offset-tagged span of source text.
///
/// `offset` is a byte offset into the scanned text, and `text` borrows
/// exactly `source[offset..offset + text.len()]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token<'t> {
    offset: usize,
    kind: TokenKind,
    text: &'t str,
}

impl<'t> Token<'t> {
    /// Create a new token.
    pub fn new(
        offset: usize,
        kind: TokenKind,
        text: &'t str,
    ) -> Self {
        Self { offset, kind, text }
    }

    /// The byte offset of the token.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The token classification.
    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// The token text.
    pub fn text(&self) -> &'t str {
        self.text
    }

    /// The byte length of the token text.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Is the token text empty?
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The byte offset just past the token.
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    /// The byte range of the token.
    pub fn span(&self) -> Range<usize> {
        self.offset..self.end()
    }

    /// Move the token by `delta` bytes.
    pub fn shifted(
        self,
        delta: usize,
    ) -> Self {
        Self {
            offset: self.offset + delta,
            ..self
        }
    }

    /// Decompose into `(offset, kind, text)`.
    pub fn into_parts(self) -> (usize, TokenKind, &'t str) {
        (self.offset, self.kind, self.text)
    }
}

/// Check that `tokens` tile `source` exactly.
///
/// Each token must start where the previous one ended (the first at `0`),
/// its text must equal the source slice it claims, and the last must end at
/// `source.len()`. Empty tokens are rejected.
///
/// ## Returns
/// `Err(offset)` at the first offset where the stream breaks.
pub fn check_coverage(
    source: &str,
    tokens: &[Token<'_>],
) -> Result<(), usize> {
    let mut pos = 0;
    for token in tokens {
        if token.offset() != pos || token.is_empty() {
            return Err(pos);
        }
        match source.get(token.span()) {
            Some(slice) if slice == token.text() => pos = token.end(),
            _ => return Err(pos),
        }
    }
    if pos != source.len() {
        return Err(pos);
    }
    Ok(())
}
