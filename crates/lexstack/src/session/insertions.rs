//! # Insertion Merge
//!
//! Interleaves literal tokens (prompts) into a nested token stream lexed from
//! a concatenated buffer, re-anchoring everything at absolute source offsets.

use crate::{
    errors::{LSResult, LexstackError},
    tokens::{Token, TokenKind},
};

/// Literal tokens to splice in at a buffer offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion<'t> {
    /// The byte offset in the nested buffer.
    pub index: usize,

    /// The literal tokens, borrowed from the source.
    pub tokens: Vec<Token<'t>>,
}

impl<'t> Insertion<'t> {
    /// Create a new insertion.
    pub fn new(
        index: usize,
        tokens: Vec<Token<'t>>,
    ) -> Self {
        Self { index, tokens }
    }
}

struct Realigner<'t> {
    source: &'t str,
    pos: usize,
    out: Vec<Token<'t>>,
}

impl<'t> Realigner<'t> {
    fn emit(
        &mut self,
        kind: &TokenKind,
        piece: &str,
    ) -> LSResult<()> {
        let end = self.pos + piece.len();
        match self.source.get(self.pos..end) {
            Some(text) if text == piece => {
                self.out.push(Token::new(self.pos, kind.clone(), text));
                self.pos = end;
                Ok(())
            }
            _ => Err(LexstackError::SpliceMisaligned { offset: self.pos }),
        }
    }
}

/// Merge literal insertions into a nested token stream.
///
/// An insertion at buffer offset `k` is emitted before the first nested token
/// starting at or after `k`; a nested token straddling `k` is split there.
/// Insertions at the same offset keep their order, and insertions past the
/// last nested token are emitted at the end.
///
/// ## Arguments
/// * `source` - the full source text.
/// * `region_start` - the absolute offset of the merged region.
/// * `insertions` - literal tokens, ordered by `index`.
/// * `nested` - tokens lexed from the buffer, with buffer-relative offsets.
///
/// ## Returns
/// Tokens borrowed from `source`, with offsets assigned by running position
/// from `region_start`; or [`LexstackError::SpliceMisaligned`] when a token's
/// text does not match the source at its assigned offset.
pub fn merge_insertions<'t>(
    source: &'t str,
    region_start: usize,
    insertions: Vec<Insertion<'t>>,
    nested: &[Token<'_>],
) -> LSResult<Vec<Token<'t>>> {
    let mut out = Realigner {
        source,
        pos: region_start,
        out: Vec::with_capacity(nested.len() + insertions.len()),
    };
    let mut insertions = insertions.into_iter().peekable();

    for token in nested {
        let (start, text) = (token.offset(), token.text());
        let mut split = 0;

        while let Some(insertion) = insertions.next_if(|ins| start + text.len() >= ins.index) {
            let cut = insertion.index.saturating_sub(start).clamp(split, text.len());
            let head = text
                .get(split..cut)
                .ok_or(LexstackError::SpliceMisaligned { offset: out.pos })?;
            if !head.is_empty() {
                out.emit(token.kind(), head)?;
            }
            for literal in &insertion.tokens {
                out.emit(literal.kind(), literal.text())?;
            }
            split = cut;
        }

        let tail = text
            .get(split..)
            .ok_or(LexstackError::SpliceMisaligned { offset: out.pos })?;
        if !tail.is_empty() {
            out.emit(token.kind(), tail)?;
        }
    }

    for insertion in insertions {
        for literal in &insertion.tokens {
            out.emit(literal.kind(), literal.text())?;
        }
    }

    Ok(out.out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::check_coverage;

    fn prompt(
        source: &str,
        offset: usize,
        len: usize,
    ) -> Token<'_> {
        Token::new(offset, TokenKind::GENERIC_PROMPT, &source[offset..offset + len])
    }

    fn texts<'a, 't>(tokens: &'a [Token<'t>]) -> Vec<(usize, &'t str, &'a str)> {
        tokens
            .iter()
            .map(|t| (t.offset(), t.text(), t.kind().as_str()))
            .collect()
    }

    #[test]
    fn test_merge_at_boundaries() {
        let source = "1> foo.\n2> bar.\n";
        let buffer = "foo.\nbar.\n";
        let nested = vec![
            Token::new(0, TokenKind::NAME, &buffer[0..3]),
            Token::new(3, TokenKind::PUNCTUATION, &buffer[3..4]),
            Token::new(4, TokenKind::TEXT, &buffer[4..5]),
            Token::new(5, TokenKind::NAME, &buffer[5..8]),
            Token::new(8, TokenKind::PUNCTUATION, &buffer[8..9]),
            Token::new(9, TokenKind::TEXT, &buffer[9..10]),
        ];
        let insertions = vec![
            Insertion::new(0, vec![prompt(source, 0, 3)]),
            Insertion::new(5, vec![prompt(source, 8, 3)]),
        ];

        let merged = merge_insertions(source, 0, insertions, &nested).unwrap();
        assert_eq!(check_coverage(source, &merged), Ok(()));
        assert_eq!(
            texts(&merged),
            vec![
                (0, "1> ", "Generic.Prompt"),
                (3, "foo", "Name"),
                (6, ".", "Punctuation"),
                (7, "\n", "Text"),
                (8, "2> ", "Generic.Prompt"),
                (11, "bar", "Name"),
                (14, ".", "Punctuation"),
                (15, "\n", "Text"),
            ]
        );
    }

    #[test]
    fn test_merge_splits_straddling_token() {
        // A string token spans both lines of the buffer.
        let source = "xx\n1> \"a\n2> b\"\n";
        let buffer = "\"a\nb\"\n";
        let nested = vec![
            Token::new(0, TokenKind::STRING, &buffer[0..5]),
            Token::new(5, TokenKind::TEXT, &buffer[5..6]),
        ];
        let insertions = vec![
            Insertion::new(0, vec![prompt(source, 3, 3)]),
            Insertion::new(3, vec![prompt(source, 9, 3)]),
        ];

        let merged = merge_insertions(source, 3, insertions, &nested).unwrap();
        assert_eq!(
            texts(&merged),
            vec![
                (3, "1> ", "Generic.Prompt"),
                (6, "\"a\n", "String"),
                (9, "2> ", "Generic.Prompt"),
                (12, "b\"", "String"),
                (14, "\n", "Text"),
            ]
        );
        assert_eq!(merged.last().map(Token::end), Some(source.len()));
    }

    #[test]
    fn test_merge_trailing_insertions() {
        let source = "1>\n2>";
        let buffer = "\n";
        let nested = vec![Token::new(0, TokenKind::TEXT, buffer)];
        let insertions = vec![
            Insertion::new(0, vec![prompt(source, 0, 2)]),
            Insertion::new(1, vec![prompt(source, 3, 2)]),
        ];
        let merged = merge_insertions(source, 0, insertions, &nested).unwrap();
        assert_eq!(check_coverage(source, &merged), Ok(()));
        assert_eq!(merged.len(), 3);

        let merged = merge_insertions(source, 3, vec![Insertion::new(0, vec![prompt(source, 3, 2)])], &[]).unwrap();
        assert_eq!(texts(&merged), vec![(3, "2>", "Generic.Prompt")]);
    }

    #[test]
    fn test_merge_misaligned() {
        let source = "1> foo\n";
        let nested = vec![Token::new(0, TokenKind::NAME, "bar\n")];
        let insertions = vec![Insertion::new(0, vec![prompt(source, 0, 3)])];
        assert!(matches!(
            merge_insertions(source, 0, insertions, &nested),
            Err(LexstackError::SpliceMisaligned { offset: 3 })
        ));
    }
}
