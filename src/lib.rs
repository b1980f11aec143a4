//! An ahead-of-time translator for a small C-like language.
//!
//! Source text moves through a fixed pipeline: the lexer produces a
//! token list, the parser builds a tree, the scope checker validates
//! names, the generator lowers the tree to quadruples, the pass manager
//! folds constants, and the emitter expands the result into
//! pseudo-assembly. Each stage consumes the whole output of the one
//! before it; nothing is streamed or interleaved.

pub mod emit;
pub mod ir;
pub mod lexer;
pub mod optimize;
pub mod parser;
pub mod repl;
pub mod semantic;

use std::error::Error;
use std::fmt;

use parser::SyntaxError;
use semantic::SemanticError;

/// Any error that stops a compilation.
#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    Syntax(SyntaxError),
    Semantic(SemanticError),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Syntax(error) => error.fmt(f),
            CompileError::Semantic(error) => error.fmt(f),
        }
    }
}

impl Error for CompileError {}

impl From<SyntaxError> for CompileError {
    fn from(error: SyntaxError) -> Self {
        CompileError::Syntax(error)
    }
}

impl From<SemanticError> for CompileError {
    fn from(error: SemanticError) -> Self {
        CompileError::Semantic(error)
    }
}

/// Everything a successful compilation produces.
#[derive(Debug, Clone)]
pub struct CompileOutput {
    pub program: parser::ast::Program,
    /// The instruction list exactly as lowered, before any pass runs.
    pub code: Vec<ir::Instruction>,
    /// The instruction list after the pass manager, same length as `code`.
    pub optimized: Vec<ir::Instruction>,
    pub assembly: String,
}

/// Runs the whole pipeline over one source text.
pub fn compile(source: &str) -> Result<CompileOutput, CompileError> {
    let tokens = lexer::lex(source);
    let mut parser = parser::Parser::new(tokens);
    let program = parser.parse_program()?;
    semantic::SemanticChecker::new().check_program(&program)?;
    let code = ir::IrGenerator::new().lower_program(&program);

    let mut optimized = code.clone();
    let mut passes = optimize::PassManager::new();
    passes.add_pass(Box::new(optimize::ConstantFolding));
    passes.run(&mut optimized);

    let assembly = emit::emit_assembly(&optimized);
    Ok(CompileOutput {
        program,
        code,
        optimized,
        assembly,
    })
}
