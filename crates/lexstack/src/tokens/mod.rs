//! # Token Model
//!
//! A [`Token`] is an immutable `(offset, kind, text)` record; a [`TokenKind`]
//! is a node in an open, dot-separated classification taxonomy.

mod token;
mod token_kind;

#[doc(inline)]
pub use token::*;
#[doc(inline)]
pub use token_kind::*;
