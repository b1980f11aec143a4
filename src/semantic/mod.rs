//! Scope checking over the parsed tree.
//!
//! A single walk verifies the two name rules: every use resolves to a
//! visible declaration, and no name is declared twice at the same depth.
//! Shadowing an outer declaration at a deeper depth is allowed.

use std::error::Error;
use std::fmt;

use crate::parser::ast::{Block, Expr, Function, Item, Program, Stmt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticError {
    DuplicateDeclaration { name: String },
    UndeclaredVariable { name: String },
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticError::DuplicateDeclaration { name } => {
                write!(f, "semantic error: redeclaration of variable '{}'", name)
            }
            SemanticError::UndeclaredVariable { name } => {
                write!(f, "semantic error: use of undeclared variable '{}'", name)
            }
        }
    }
}

impl Error for SemanticError {}

/// One declared name, tagged with the depth of the scope that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Symbol {
    name: String,
    depth: usize,
}

/// Walks the tree once, maintaining a stack of visible declarations.
///
/// The stack is ordered by declaration time, so leaving a scope pops the
/// contiguous suffix of symbols pushed at the exiting depth. Function
/// bodies are blocks, which makes function-level declarations live at
/// depth 2.
pub struct SemanticChecker {
    symbols: Vec<Symbol>,
    depth: usize,
}

impl SemanticChecker {
    pub fn new() -> Self {
        Self {
            symbols: Vec::new(),
            depth: 0,
        }
    }

    pub fn check_program(&mut self, program: &Program) -> Result<(), SemanticError> {
        for item in &program.items {
            if let Item::Function(function) = item {
                self.check_function(function)?;
            }
        }
        Ok(())
    }

    fn check_function(&mut self, function: &Function) -> Result<(), SemanticError> {
        self.enter_scope();
        self.check_block(&function.body)?;
        self.exit_scope();
        Ok(())
    }

    fn check_block(&mut self, block: &Block) -> Result<(), SemanticError> {
        self.enter_scope();
        for statement in &block.statements {
            self.check_statement(statement)?;
        }
        self.exit_scope();
        Ok(())
    }

    fn check_statement(&mut self, statement: &Stmt) -> Result<(), SemanticError> {
        match statement {
            Stmt::Declaration { name, init } => {
                // The name is registered before its initializer is checked,
                // so `int x = x;` resolves to the declaration itself.
                self.declare(name)?;
                if let Some(init) = init {
                    self.check_expression(init)?;
                }
                Ok(())
            }
            Stmt::Assignment { name, value } => {
                self.resolve(name)?;
                self.check_expression(value)
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                // The condition is checked once, regardless of branch.
                self.check_expression(condition)?;
                self.check_block(then_branch)?;
                if let Some(else_branch) = else_branch {
                    self.check_block(else_branch)?;
                }
                Ok(())
            }
            Stmt::While { condition, body } => {
                self.check_expression(condition)?;
                self.check_block(body)
            }
            Stmt::Return { value } => self.check_expression(value),
            Stmt::Block(block) => self.check_block(block),
        }
    }

    fn check_expression(&mut self, expression: &Expr) -> Result<(), SemanticError> {
        match expression {
            Expr::Literal(_) => Ok(()),
            Expr::Variable(name) => self.resolve(name),
            Expr::Binary { left, right, .. } => {
                self.check_expression(left)?;
                self.check_expression(right)
            }
        }
    }

    fn enter_scope(&mut self) {
        self.depth += 1;
    }

    fn exit_scope(&mut self) {
        while self
            .symbols
            .last()
            .map_or(false, |symbol| symbol.depth == self.depth)
        {
            self.symbols.pop();
        }
        self.depth -= 1;
    }

    fn declare(&mut self, name: &str) -> Result<(), SemanticError> {
        let duplicate = self
            .symbols
            .iter()
            .rev()
            .any(|symbol| symbol.depth == self.depth && symbol.name == name);
        if duplicate {
            return Err(SemanticError::DuplicateDeclaration {
                name: name.to_string(),
            });
        }
        self.symbols.push(Symbol {
            name: name.to_string(),
            depth: self.depth,
        });
        Ok(())
    }

    fn resolve(&self, name: &str) -> Result<(), SemanticError> {
        if self.symbols.iter().rev().any(|symbol| symbol.name == name) {
            Ok(())
        } else {
            Err(SemanticError::UndeclaredVariable {
                name: name.to_string(),
            })
        }
    }
}

impl Default for SemanticChecker {
    fn default() -> Self {
        Self::new()
    }
}
