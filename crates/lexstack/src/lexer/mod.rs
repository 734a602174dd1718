//! # Lexer Core
//!
//! * [`Tokens`] - the lazy match loop over one text.
//! * [`StateStack`] - the non-empty state stack; the root is never popped.
//! * [`ScanMemo`] - next-match memo for rules without anchored search.
//! * [`group_emitter`] - splits grouped matches into tokens.
//! * [`TextLexer`] - whole-text and batch tokenization.

pub mod group_emitter;
mod scan_memo;
mod state_stack;
mod text_lexer;
mod tokens;

#[doc(inline)]
pub use group_emitter::{GroupPiece, plan_group_pieces};
#[doc(inline)]
pub use scan_memo::*;
#[doc(inline)]
pub use state_stack::*;
#[doc(inline)]
pub use text_lexer::*;
#[doc(inline)]
pub use tokens::*;
