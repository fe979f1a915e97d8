use std::fmt;

/// Byte range of a token within the lexed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Bare word (`ls`, `-la`, `/tmp/x`).
    Identifier,
    /// Variable reference; the text is the name without the `$`.
    VariableReference,
    /// Run of blank characters.
    Whitespace,
    /// Statement separator. Reserved, the lexer never produces it.
    Separator,
    /// Double-quoted string; the text excludes the quotes.
    StringLiteral,
    /// End of input. Always the last token of a successful run.
    EndOfInput,
}

impl TokenKind {
    /// Fixed diagnostic label of the kind.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Identifier => "IDENT",
            Self::VariableReference => "VAR",
            Self::Whitespace => "WS",
            Self::Separator => "SEMI",
            Self::StringLiteral => "STRING",
            Self::EndOfInput => "EOF",
        }
    }

    /// Whether the rendering of this kind includes the token text.
    #[must_use]
    pub const fn carries_text(self) -> bool {
        matches!(
            self,
            Self::Identifier | Self::VariableReference | Self::StringLiteral
        )
    }
}

/// A single token with its kind, text, and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::EndOfInput)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.carries_text() {
            write!(f, "{}({})", self.kind.label(), self.text)
        } else {
            f.write_str(self.kind.label())
        }
    }
}

/// Characters allowed in a variable name: Unicode letters and
/// numbers, plus underscore.
///
/// Both the lexer and [`substitute`](crate::substitute) use this
/// predicate.
#[must_use]
pub fn is_var_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Characters that separate words.
#[must_use]
pub const fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}
