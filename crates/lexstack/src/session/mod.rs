//! # Session Transcripts
//!
//! Interactive session logs (REPL transcripts) mix prompts, source code typed
//! at those prompts, and program output. The [`SessionSplicer`] lexes only the
//! code, with the full stateful lexer, and splices prompts and output lines
//! back around it at their original offsets.
//!
//! ```rust
//! use lexstack::rules::{Rule, StateTable};
//! use lexstack::session::SessionSplicer;
//! use lexstack::tokens::TokenKind;
//!
//! let table = StateTable::builder()
//!     .state("root", [
//!         Rule::token(r"\w+", TokenKind::NAME).into(),
//!         Rule::token(r"\.", TokenKind::PUNCTUATION).into(),
//!     ])
//!     .build()?;
//! let splicer = SessionSplicer::new(table)?;
//!
//! let tokens = splicer.tokenize_to_vec("1> foo.\nfoo\n")?;
//! assert_eq!(tokens[0].text(), "1> ");
//! assert_eq!(tokens[0].kind(), &TokenKind::GENERIC_PROMPT);
//! assert_eq!(tokens.last().unwrap().kind(), &TokenKind::GENERIC_OUTPUT);
//! # Ok::<(), lexstack::LexstackError>(())
//! ```

mod insertions;
mod session_config;
mod splicer;

#[doc(inline)]
pub use insertions::*;
#[doc(inline)]
pub use session_config::*;
#[doc(inline)]
pub use splicer::*;
