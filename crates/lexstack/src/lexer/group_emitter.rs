//! # Group Emitter
//!
//! Splits one [`ByGroups`](crate::rules::Emission::ByGroups) match into
//! tokens: one per emitting capture group, plus text-kind gap tokens for the
//! rest of the match. The pieces tile the match exactly.

use core::ops::Range;

use crate::{
    errors::{LSResult, LexstackError},
    lexer::Tokens,
    regex::GroupSpans,
    rules::{CompiledGroupAction, StateTable},
    tokens::Token,
};

/// A piece of a grouped match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupPiece {
    /// Text not claimed by any emitting group.
    Gap(Range<usize>),

    /// An emitting group.
    Group {
        /// The action index; capture group `index + 1`.
        index: usize,

        /// The group's byte range.
        span: Range<usize>,
    },
}

impl GroupPiece {
    /// The byte range of the piece.
    pub fn span(&self) -> &Range<usize> {
        match self {
            Self::Gap(span) => span,
            Self::Group { span, .. } => span,
        }
    }
}

/// Plan the pieces of a grouped match.
///
/// Groups are taken left to right. A group is skipped when it did not
/// participate, is empty, starts before the end of the previous emitted
/// group, lies outside `span`, or `emits(index)` is false.
///
/// ## Arguments
/// * `span` - the whole match.
/// * `groups` - the capture spans; index `0` is the whole match.
/// * `emits` - does action `index` emit a token?
///
/// ## Returns
/// Non-empty pieces tiling `span`, in order.
pub fn plan_group_pieces<F>(
    span: Range<usize>,
    groups: &[Option<Range<usize>>],
    emits: F,
) -> Vec<GroupPiece>
where
    F: Fn(usize) -> bool,
{
    let mut pieces = Vec::new();
    let mut pos = span.start;

    for (index, group) in groups.iter().skip(1).enumerate() {
        let Some(group) = group else {
            continue;
        };
        if !emits(index) || group.is_empty() || group.start < pos || group.end > span.end {
            continue;
        }
        if group.start > pos {
            pieces.push(GroupPiece::Gap(pos..group.start));
        }
        pieces.push(GroupPiece::Group {
            index,
            span: group.clone(),
        });
        pos = group.end;
    }

    if pos < span.end {
        pieces.push(GroupPiece::Gap(pos..span.end));
    }
    pieces
}

/// Emit the tokens of a grouped match into `out`.
pub(crate) fn emit_groups<'t>(
    table: &StateTable,
    text: &'t str,
    span: Range<usize>,
    groups: &GroupSpans,
    actions: &[CompiledGroupAction],
    nesting: usize,
    out: &mut Vec<Token<'t>>,
) -> LSResult<()> {
    let options = table.options();
    let pieces = plan_group_pieces(span, groups, |index| {
        !matches!(
            actions.get(index),
            None | Some(CompiledGroupAction::Skip)
        )
    });

    for piece in pieces {
        let (kind, span) = match piece {
            GroupPiece::Gap(span) => (options.text_kind(), span),
            GroupPiece::Group { index, span } => match &actions[index] {
                CompiledGroupAction::Kind(kind) => (kind, span),
                CompiledGroupAction::Text | CompiledGroupAction::Skip => (options.text_kind(), span),
                CompiledGroupAction::Lex(state) => {
                    if nesting >= options.max_nesting() {
                        return Err(LexstackError::NestingTooDeep {
                            depth: options.max_nesting(),
                        });
                    }
                    let base = span.start;
                    for token in Tokens::nested(table, &text[span], *state, nesting + 1) {
                        out.push(token?.shifted(base));
                    }
                    continue;
                }
            },
        };
        out.push(Token::new(span.start, kind.clone(), &text[span]));
    }
    Ok(())
}
