use std::fmt;

/// Classification attached to every scanned lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Number,
    Float,
    String,
    Char,
    Operator,
    Punctuation,
    Comment,
    Preprocessor,
    Unknown,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Number => "NUMBER",
            TokenKind::Float => "FLOAT",
            TokenKind::String => "STRING",
            TokenKind::Char => "CHAR",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Punctuation => "PUNCTUATION",
            TokenKind::Comment => "COMMENT",
            TokenKind::Preprocessor => "PREPROCESSOR",
            TokenKind::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

/// A single scanned token. `text` holds the lexeme exactly as it appeared
/// in the source, quotes included for string and character literals.
/// `line` is the line the token starts on, counted from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }
}
