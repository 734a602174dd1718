//! # Text Lexer Trait

use crate::{errors::LSResult, rules::StateTable, tokens::Token};

/// A trait for whole-text lexers.
pub trait TextLexer: Send + Sync {
    /// Tokenize one text.
    ///
    /// ## Arguments
    /// * `text` - The text to tokenize.
    ///
    /// ## Returns
    /// The tokens, covering `text`; or the first scan defect.
    fn lex<'t>(
        &self,
        text: &'t str,
    ) -> LSResult<Vec<Token<'t>>>;

    /// Tokenize a batch of independent texts.
    ///
    /// ## Arguments
    /// * `batch` - The texts to tokenize.
    ///
    /// ## Returns
    /// One result per text, in batch order.
    fn lex_batch<'t, S>(
        &self,
        batch: &'t [S],
    ) -> Vec<LSResult<Vec<Token<'t>>>>
    where
        S: AsRef<str> + Sync,
    {
        batch.iter().map(|text| self.lex(text.as_ref())).collect()
    }
}

impl TextLexer for StateTable {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text)))]
    fn lex<'t>(
        &self,
        text: &'t str,
    ) -> LSResult<Vec<Token<'t>>> {
        self.tokenize_to_vec(text)
    }
}
