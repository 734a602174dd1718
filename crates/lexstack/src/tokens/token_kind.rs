//! # Token Kinds
//!
//! Kinds are dot-separated paths in an open taxonomy (`String.Escape`,
//! `Keyword.Builtin`). The engine never interprets them beyond the
//! hierarchy helpers here; classification is supplied by rule tables.

use compact_str::CompactString;

/// A hierarchical token classification.
///
/// ## Style Hints
///
/// Instance names should prefer `kind`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct TokenKind(CompactString);

macro_rules! well_known_kinds {
    ($($(#[$meta:meta])* $name:ident => $label:literal,)*) => {
        impl TokenKind {
            $(
                $(#[$meta])*
                pub const $name: TokenKind = TokenKind(CompactString::const_new($label));
            )*
        }
    };
}

well_known_kinds! {
    /// Plain text; the default for gaps and unclassified spans.
    TEXT => "Text",
    /// Unmatched input.
    ERROR => "Error",
    /// Whitespace.
    WHITESPACE => "Text.Whitespace",
    /// Comments.
    COMMENT => "Comment",
    /// Keywords.
    KEYWORD => "Keyword",
    /// Names and identifiers.
    NAME => "Name",
    /// Literal values.
    LITERAL => "Literal",
    /// String literals.
    STRING => "String",
    /// Number literals.
    NUMBER => "Number",
    /// Operators.
    OPERATOR => "Operator",
    /// Punctuation.
    PUNCTUATION => "Punctuation",
    /// Generic (non-language) output.
    GENERIC => "Generic",
    /// Session prompts.
    GENERIC_PROMPT => "Generic.Prompt",
    /// Session output.
    GENERIC_OUTPUT => "Generic.Output",
    /// Session error output.
    GENERIC_TRACEBACK => "Generic.Traceback",
}

impl TokenKind {
    /// Build a kind from its dotted path.
    pub fn new<S: AsRef<str>>(path: S) -> Self {
        Self(CompactString::new(path.as_ref()))
    }

    /// The dotted path.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Iterate the path components, root first.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// The number of path components.
    pub fn depth(&self) -> usize {
        self.components().count()
    }

    /// The enclosing kind; `None` for a top-level kind.
    pub fn parent(&self) -> Option<TokenKind> {
        self.0
            .rfind('.')
            .map(|idx| TokenKind::new(&self.0[..idx]))
    }

    /// Extend this kind with a child component.
    pub fn child<S: AsRef<str>>(
        &self,
        name: S,
    ) -> TokenKind {
        let mut path = self.0.clone();
        path.push('.');
        path.push_str(name.as_ref());
        TokenKind(path)
    }

    /// Is this kind equal to, or nested under, `other`?
    ///
    /// `String.Escape` is a subkind of `String` and of itself;
    /// `StringLike` is not a subkind of `String`.
    pub fn is_subkind_of(
        &self,
        other: &TokenKind,
    ) -> bool {
        match self.0.strip_prefix(other.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('.'),
            None => false,
        }
    }
}

impl Default for TokenKind {
    fn default() -> Self {
        Self::TEXT
    }
}

impl core::fmt::Display for TokenKind {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for TokenKind {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for TokenKind {
    fn from(path: String) -> Self {
        Self(CompactString::from(path))
    }
}

impl AsRef<str> for TokenKind {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
