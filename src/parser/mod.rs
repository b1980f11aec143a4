//! Recursive-descent parser, one token of lookahead.

pub mod ast;
mod expr;

use std::error::Error;
use std::fmt;

use crate::lexer::{Token, TokenKind};
use ast::{Block, Function, Item, Program, Stmt};

/// Raised when the token stream does not match the grammar. The first
/// failed expectation aborts the parse; there is no recovery.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    pub expected: String,
    pub found: Option<Token>,
}

impl SyntaxError {
    fn new(expected: impl Into<String>, found: Option<&Token>) -> Self {
        Self {
            expected: expected.into(),
            found: found.cloned(),
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.found {
            Some(token) => write!(
                f,
                "syntax error: expected {}, found '{}' at line {}",
                self.expected, token.text, token.line
            ),
            None => write!(f, "syntax error: expected {} at end of input", self.expected),
        }
    }
}

impl Error for SyntaxError {}

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    /// Builds a parser over the scanned stream. Comment tokens carry no
    /// grammar and are dropped here.
    pub fn new(tokens: Vec<Token>) -> Self {
        let tokens = tokens
            .into_iter()
            .filter(|token| token.kind != TokenKind::Comment)
            .collect();
        Self { tokens, current: 0 }
    }

    /// Program := (Preprocessor | Function)*
    pub fn parse_program(&mut self) -> Result<Program, SyntaxError> {
        let mut items = Vec::new();
        while let Some(token) = self.peek() {
            if token.kind == TokenKind::Preprocessor {
                let text = token.text.clone();
                self.advance();
                items.push(Item::Preprocessor(text));
            } else {
                items.push(Item::Function(self.function()?));
            }
        }
        Ok(Program { items })
    }

    /// Function := 'int' Identifier '(' ')' Block
    fn function(&mut self) -> Result<Function, SyntaxError> {
        self.consume("int")?;
        let name = self.consume_identifier("function name")?;
        self.consume("(")?;
        self.consume(")")?;
        let body = self.block()?;
        Ok(Function { name, body })
    }

    fn block(&mut self) -> Result<Block, SyntaxError> {
        self.consume("{")?;
        let mut statements = Vec::new();
        loop {
            if self.is_at_end() {
                return Err(SyntaxError::new("'}'", None));
            }
            if self.matches("}") {
                break;
            }
            statements.push(self.statement()?);
        }
        Ok(Block { statements })
    }

    fn statement(&mut self) -> Result<Stmt, SyntaxError> {
        let token = match self.peek() {
            Some(token) => token.clone(),
            None => return Err(SyntaxError::new("statement", None)),
        };

        if token.kind == TokenKind::Keyword && (token.text == "int" || token.text == "float") {
            return self.declaration();
        }

        match token.text.as_str() {
            "if" => return self.if_statement(),
            "while" => return self.while_statement(),
            "return" => return self.return_statement(),
            "{" => return Ok(Stmt::Block(self.block()?)),
            _ => {}
        }

        if token.kind == TokenKind::Identifier {
            return self.assignment();
        }

        Err(SyntaxError::new("statement", Some(&token)))
    }

    /// Declaration := ('int' | 'float') Identifier ('=' Expression)? ';'
    fn declaration(&mut self) -> Result<Stmt, SyntaxError> {
        self.advance(); // type word, already checked
        let name = self.consume_identifier("identifier")?;
        let init = if self.matches("=") {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(";")?;
        Ok(Stmt::Declaration { name, init })
    }

    fn if_statement(&mut self) -> Result<Stmt, SyntaxError> {
        self.advance(); // 'if'
        self.consume("(")?;
        let condition = self.expression()?;
        self.consume(")")?;
        let then_branch = self.block()?;
        let else_branch = if self.matches("else") {
            Some(self.block()?)
        } else {
            None
        };
        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn while_statement(&mut self) -> Result<Stmt, SyntaxError> {
        self.advance(); // 'while'
        self.consume("(")?;
        let condition = self.expression()?;
        self.consume(")")?;
        let body = self.block()?;
        Ok(Stmt::While { condition, body })
    }

    fn return_statement(&mut self) -> Result<Stmt, SyntaxError> {
        self.advance(); // 'return'
        let value = self.expression()?;
        self.consume(";")?;
        Ok(Stmt::Return { value })
    }

    /// Assignment := Identifier '=' Expression ';'
    fn assignment(&mut self) -> Result<Stmt, SyntaxError> {
        let name = self.consume_identifier("identifier")?;
        self.consume("=")?;
        let value = self.expression()?;
        self.consume(";")?;
        Ok(Stmt::Assignment { name, value })
    }

    fn check(&self, lexeme: &str) -> bool {
        self.peek().map_or(false, |token| token.text == lexeme)
    }

    fn matches(&mut self, lexeme: &str) -> bool {
        if self.check(lexeme) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, lexeme: &str) -> Result<(), SyntaxError> {
        if self.check(lexeme) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(format!("'{}'", lexeme)))
        }
    }

    fn consume_identifier(&mut self, expected: &str) -> Result<String, SyntaxError> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::Identifier => {
                let name = token.text.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    fn unexpected(&self, expected: impl Into<String>) -> SyntaxError {
        SyntaxError::new(expected, self.peek())
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    fn advance(&mut self) {
        if self.current < self.tokens.len() {
            self.current += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }
}
