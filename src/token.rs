use std::fmt;

/// Reserved words of the Bugs language. Matching is case-sensitive.
pub const KEYWORDS: [&str; 19] = [
    "Bug",
    "Allbugs",
    "move",
    "moveto",
    "turn",
    "turnto",
    "line",
    "loop",
    "exit",
    "if",
    "switch",
    "case",
    "do",
    "return",
    "var",
    "define",
    "using",
    "initially",
    "color",
];

/// Named colors accepted by a `color` statement.
pub const COLORS: [&str; 13] = [
    "black",
    "blue",
    "cyan",
    "darkGray",
    "gray",
    "green",
    "lightGray",
    "magenta",
    "orange",
    "pink",
    "red",
    "white",
    "yellow",
];

/// Returns `true` if `word` is a reserved word.
#[must_use]
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// Returns `true` if `word` names a palette color.
#[must_use]
pub fn is_color(word: &str) -> bool {
    COLORS.contains(&word)
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Identifier that is not a reserved word.
    Name,
    /// Reserved word.
    Keyword,
    /// Numeric literal, canonicalized (`5` becomes `5.0`).
    Number,
    /// Any other single character.
    Symbol,
    /// Line terminator.
    EndOfLine,
    /// End of the source text. Repeats on every further pull.
    EndOfInput,
}

/// A classified lexical unit. Equality compares kind and text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn name(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Name, text)
    }

    #[must_use]
    pub fn keyword(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Keyword, text)
    }

    #[must_use]
    pub fn number(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Number, text)
    }

    #[must_use]
    pub fn symbol(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Symbol, text)
    }

    #[must_use]
    pub fn end_of_line() -> Self {
        Self::new(TokenKind::EndOfLine, "\n")
    }

    #[must_use]
    pub fn end_of_input() -> Self {
        Self::new(TokenKind::EndOfInput, "EOF")
    }

    /// Classifies a word as `Keyword` or `Name`.
    #[must_use]
    pub fn word(text: impl Into<String>) -> Self {
        let text = text.into();
        if is_keyword(&text) {
            Self::keyword(text)
        } else {
            Self::name(text)
        }
    }

    #[must_use]
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EndOfLine => write!(f, "end of line"),
            TokenKind::EndOfInput => write!(f, "end of input"),
            _ => write!(f, "'{}'", self.text),
        }
    }
}
