//! # Char Width Utilities

/// Width of the first `char` of `text`; `0` for empty text.
pub fn first_char_width(text: &str) -> usize {
    text.chars().next().map_or(0, char::len_utf8)
}
