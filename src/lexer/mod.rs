//! Scanner for the C-like surface syntax.
//!
//! The scanner is total: every character of input lands in some token, with
//! [`TokenKind::Unknown`] as the catch-all for stray bytes. Comments and
//! preprocessor directives stay in the stream as ordinary tokens so later
//! consumers can decide what to do with them.

pub mod token;

pub use token::{Token, TokenKind};

/// The C keyword set. Only a handful of these matter to the parser, but
/// classifying the full set keeps the token table honest when scanning
/// real-world snippets.
pub const KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "int", "long", "register", "return", "short",
    "signed", "sizeof", "static", "struct", "switch", "typedef", "union", "unsigned", "void",
    "volatile", "while",
];

pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).scan()
}

struct Lexer {
    chars: Vec<char>,
    start: usize,
    current: usize,
    line: usize,
    token_line: usize,
    tokens: Vec<Token>,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            start: 0,
            current: 0,
            line: 1,
            token_line: 1,
            tokens: Vec::new(),
        }
    }

    fn scan(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start_token();
            self.scan_token();
        }
        self.tokens
    }

    fn scan_token(&mut self) {
        let c = self.advance();
        match c {
            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,
            '#' => self.preprocessor(),
            '/' => {
                if self.matches('/') {
                    self.line_comment();
                } else if self.matches('*') {
                    self.block_comment();
                } else {
                    self.add_token(TokenKind::Operator);
                }
            }
            '"' => self.string(),
            '\'' => self.character(),
            d if d.is_ascii_digit() => self.number(),
            a if is_ident_start(a) => self.identifier(),
            o if is_operator_char(o) => self.operator(o),
            p if is_punctuation_char(p) => self.add_token(TokenKind::Punctuation),
            _ => self.add_token(TokenKind::Unknown),
        }
    }

    /// `#` to end of line, marker included. The newline stays in the stream
    /// for the main loop's line accounting.
    fn preprocessor(&mut self) {
        while !self.is_at_end() && self.peek() != '\n' {
            self.advance();
        }
        self.add_token(TokenKind::Preprocessor);
    }

    fn line_comment(&mut self) {
        while !self.is_at_end() && self.peek() != '\n' {
            self.advance();
        }
        self.add_token(TokenKind::Comment);
    }

    fn block_comment(&mut self) {
        while !self.is_at_end() {
            if self.peek() == '*' && self.peek_next() == '/' {
                self.advance();
                self.advance();
                break;
            }
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }
        // An unterminated comment simply runs to end of input.
        self.add_token(TokenKind::Comment);
    }

    fn string(&mut self) {
        while !self.is_at_end() {
            let c = self.advance();
            match c {
                '"' => break,
                '\\' => {
                    if !self.is_at_end() {
                        if self.peek() == '\n' {
                            self.line += 1;
                        }
                        self.advance();
                    }
                }
                '\n' => self.line += 1,
                _ => {}
            }
        }
        self.add_token(TokenKind::String);
    }

    fn character(&mut self) {
        while !self.is_at_end() {
            let c = self.advance();
            match c {
                '\'' => break,
                '\\' => {
                    if !self.is_at_end() {
                        if self.peek() == '\n' {
                            self.line += 1;
                        }
                        self.advance();
                    }
                }
                '\n' => self.line += 1,
                _ => {}
            }
        }
        self.add_token(TokenKind::Char);
    }

    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        let mut kind = TokenKind::Number;
        if self.peek() == '.' {
            kind = TokenKind::Float;
            self.advance();
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        self.add_token(kind);
    }

    fn identifier(&mut self) {
        while is_ident_continue(self.peek()) {
            self.advance();
        }

        let lexeme = self.current_lexeme();
        if KEYWORDS.contains(&lexeme.as_str()) {
            self.add_token(TokenKind::Keyword);
        } else {
            self.add_token(TokenKind::Identifier);
        }
    }

    fn operator(&mut self, first: char) {
        match first {
            '=' | '!' | '<' | '>' => {
                self.matches('=');
            }
            '&' => {
                self.matches('&');
            }
            '|' => {
                self.matches('|');
            }
            '+' => {
                self.matches('+');
            }
            '-' => {
                self.matches('-');
            }
            _ => {}
        }
        self.add_token(TokenKind::Operator);
    }

    fn add_token(&mut self, kind: TokenKind) {
        let text = self.current_lexeme();
        self.tokens.push(Token::new(kind, text, self.token_line));
    }

    fn start_token(&mut self) {
        self.start = self.current;
        self.token_line = self.line;
    }

    fn current_lexeme(&self) -> String {
        self.chars[self.start..self.current].iter().collect()
    }

    fn matches(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.peek() != expected {
            return false;
        }
        self.advance();
        true
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.current]
        }
    }

    fn peek_next(&self) -> char {
        if self.current + 1 >= self.chars.len() {
            '\0'
        } else {
            self.chars[self.current + 1]
        }
    }

    fn advance(&mut self) -> char {
        let c = self.chars[self.current];
        self.current += 1;
        c
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

fn is_operator_char(c: char) -> bool {
    "+-*/=<>!&|%^".contains(c)
}

fn is_punctuation_char(c: char) -> bool {
    ";,(){}[]".contains(c)
}

/// Fixed-width TOKEN TYPE / LEXEME / LINE table over the scanned stream,
/// one row per token.
pub fn render_token_table(tokens: &[Token]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<15} {:<20} {:<10}\n",
        "TOKEN TYPE", "LEXEME", "LINE"
    ));
    out.push_str("-----------------------------------------------------\n");
    for token in tokens {
        out.push_str(&format!(
            "{:<15} {:<20} {:<10}\n",
            token.kind, token.text, token.line
        ));
    }
    out
}
