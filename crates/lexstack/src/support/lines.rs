//! # Line Spans

use core::ops::Range;

/// Iterator over the line ranges of a text.
///
/// A line runs up to and including its `\n` terminator, or to the end of the text.
/// The ranges cover the text exactly; empty text yields no lines.
#[derive(Debug, Clone)]
pub struct LineSpans<'t> {
    text: &'t str,
    pos: usize,
}

impl<'t> LineSpans<'t> {
    /// Create a new line span iterator.
    pub fn new(text: &'t str) -> Self {
        Self { text, pos: 0 }
    }
}

impl Iterator for LineSpans<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.text.len() {
            return None;
        }
        let start = self.pos;
        let end = match self.text[start..].find('\n') {
            Some(idx) => start + idx + 1,
            None => self.text.len(),
        };
        self.pos = end;
        Some(start..end)
    }
}

impl core::iter::FusedIterator for LineSpans<'_> {}
