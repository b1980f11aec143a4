use super::ast::{BinOp, Expr};
use super::{Parser, SyntaxError};
use crate::lexer::TokenKind;

impl Parser {
    /// Expression := Operand (BinOp Expression)?
    ///
    /// The right operand of a binary expression is itself a full
    /// expression, so operator chains nest to the right: `a - b - c` parses
    /// as `a - (b - c)`. There are no precedence levels.
    pub(crate) fn expression(&mut self) -> Result<Expr, SyntaxError> {
        let left = self.operand()?;

        if let Some(op) = self.peek_binop() {
            self.advance();
            let right = self.expression()?;
            return Ok(Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            });
        }

        Ok(left)
    }

    /// Operand := '(' Expression ')' | Identifier | Number | Float
    ///
    /// Parentheses only group; they produce no node of their own.
    fn operand(&mut self) -> Result<Expr, SyntaxError> {
        if self.matches("(") {
            let inner = self.expression()?;
            self.consume(")")?;
            return Ok(inner);
        }

        match self.peek() {
            Some(token) if token.kind == TokenKind::Identifier => {
                let name = token.text.clone();
                self.advance();
                Ok(Expr::Variable(name))
            }
            Some(token) if token.kind == TokenKind::Number || token.kind == TokenKind::Float => {
                let text = token.text.clone();
                self.advance();
                Ok(Expr::Literal(text))
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    fn peek_binop(&self) -> Option<BinOp> {
        self.peek().and_then(|token| BinOp::from_symbol(&token.text))
    }
}
