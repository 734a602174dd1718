//! # Rayon Utilities
//!
//! [`rayon`] powered wrappers for batch tokenization.

use crate::{errors::LSResult, lexer::TextLexer, tokens::Token};

/// Batch-Level Parallel Lexer Wrapper.
///
/// Enables ``rayon`` tokenization of batches; each text is still lexed
/// sequentially.
#[derive(Debug, Clone)]
pub struct ParallelRayonLexer<L: TextLexer> {
    /// Inner lexer.
    pub inner: L,
}

impl<L: TextLexer> ParallelRayonLexer<L> {
    /// Create a new parallel lexer.
    ///
    /// ## Arguments
    /// * `inner` - The lexer to wrap.
    ///
    /// ## Returns
    /// A new `ParallelRayonLexer` instance.
    pub fn new(inner: L) -> Self {
        Self { inner }
    }
}

impl<L: TextLexer> TextLexer for ParallelRayonLexer<L> {
    fn lex<'t>(
        &self,
        text: &'t str,
    ) -> LSResult<Vec<Token<'t>>> {
        self.inner.lex(text)
    }

    fn lex_batch<'t, S>(
        &self,
        batch: &'t [S],
    ) -> Vec<LSResult<Vec<Token<'t>>>>
    where
        S: AsRef<str> + Sync,
    {
        use rayon::prelude::*;

        batch
            .par_iter()
            .map(|text| self.inner.lex(text.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        rules::{Rule, StateTable},
        session::SessionSplicer,
        tokens::{TokenKind, check_coverage},
        types::{check_is_send, check_is_sync},
    };

    fn table() -> StateTable {
        StateTable::builder()
            .state(
                "root",
                [
                    Rule::token(r"\w+", TokenKind::NAME).into(),
                    Rule::token(r"\s+", TokenKind::WHITESPACE).into(),
                    Rule::token(r"x?", TokenKind::NAME).into(),
                ],
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_parallel_table() {
        let lexer = ParallelRayonLexer::new(table());
        check_is_send(&lexer);
        check_is_sync(&lexer);

        let batch: Vec<String> = (0..64).map(|i| format!("word{i} other {i}\n")).collect();
        let serial = lexer.inner.lex_batch(&batch);
        let parallel = lexer.lex_batch(&batch);
        assert_eq!(parallel.len(), batch.len());

        for ((text, serial), parallel) in batch.iter().zip(serial).zip(parallel) {
            let parallel = parallel.unwrap();
            assert_eq!(check_coverage(text, &parallel), Ok(()));
            assert_eq!(serial.unwrap(), parallel);
        }

        let results = lexer.lex_batch(&["ok", "!"]);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn test_parallel_session() {
        let lexer = ParallelRayonLexer::new(SessionSplicer::new(table()).unwrap());
        let batch = ["1> a b\nout\n", "plain\n", "1> c\n2> d"];
        let results = lexer.lex_batch(&batch);
        for (text, result) in batch.iter().zip(results) {
            assert_eq!(check_coverage(text, &result.unwrap()), Ok(()));
        }
        assert_eq!(lexer.lex("7> z").unwrap()[0].text(), "7> ");
    }
}
