//! # `lexstack` Stateful Lexer Engine
//!
//! This is a table-driven, stateful, regex lexer for syntax highlighting.
//!
//! Given source text and a declarative [`rules::StateTable`], it produces an
//! ordered, gap-free, overlap-free stream of classified [`tokens::Token`]s
//! covering the whole input; while tracking a stack of lexer states that rules
//! may push, pop, or branch into.
//!
//! See:
//! * [`rules`] to declare rules and build state tables.
//! * [`lexer`] for the match loop and the group emitter.
//! * [`session`] to splice interactive session transcripts (REPL logs).
//! * [`tokens`] for the token model.
//!
//! ## Crate Features
#![doc = document_features::document_features!()]
//!
//! ## Example
//!
//! ```rust
//! use lexstack::rules::{Rule, StateTable};
//! use lexstack::tokens::TokenKind;
//!
//! let table = StateTable::builder()
//!     .state("root", [
//!         Rule::token(r"\s+", TokenKind::TEXT).into(),
//!         Rule::token(r#"""#, TokenKind::STRING).push("string").into(),
//!         Rule::token(r"\w+", TokenKind::NAME).into(),
//!     ])
//!     .state("string", [
//!         Rule::token(r#"""#, TokenKind::STRING).pop().into(),
//!         Rule::token(r#"[^"]+"#, TokenKind::STRING).into(),
//!     ])
//!     .build()?;
//!
//! let tokens = table.tokenize_to_vec(r#"say "hi""#)?;
//! assert_eq!(tokens.len(), 5);
//! assert_eq!(tokens[2].text(), "\"");
//! # Ok::<(), lexstack::LexstackError>(())
//! ```
#![warn(missing_docs, unused)]

pub mod errors;
pub mod lexer;
pub mod regex;
pub mod rules;
pub mod session;
pub mod support;
pub mod tokens;
pub mod types;

#[cfg(feature = "rayon")]
pub mod rayon;

#[doc(inline)]
pub use errors::{LSResult, LexstackError};
#[doc(inline)]
pub use lexer::{TextLexer, Tokens, tokenize};
#[doc(inline)]
pub use rules::{StateTable, TableBuilder, TableOptions};
#[doc(inline)]
pub use session::{SessionConfig, SessionSplicer, SessionTokens, tokenize_session};
#[doc(inline)]
pub use tokens::{Token, TokenKind};
