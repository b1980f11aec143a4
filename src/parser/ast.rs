use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub items: Vec<Item>,
}

/// One top-level entry: either a preprocessor directive carried through
/// unchanged, or a function definition.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Preprocessor(String),
    Function(Function),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub body: Block,
}

/// An ordered statement sequence delimited by braces. Every block opens its
/// own scope during semantic checking.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `int x;` or `int x = expr;`. The type word is consumed and
    /// discarded, only the name survives.
    Declaration {
        name: String,
        init: Option<Expr>,
    },
    Assignment {
        name: String,
        value: Expr,
    },
    If {
        condition: Expr,
        then_branch: Block,
        else_branch: Option<Block>,
    },
    While {
        condition: Expr,
        body: Block,
    },
    Return {
        value: Expr,
    },
    /// A nested bare block.
    Block(Block),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal, kept as its source text.
    Literal(String),
    Variable(String),
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl BinOp {
    /// The source spelling, used verbatim in the intermediate code.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Le => "<=",
            BinOp::Ge => ">=",
        }
    }

    pub fn from_symbol(text: &str) -> Option<Self> {
        let op = match text {
            "+" => BinOp::Add,
            "-" => BinOp::Sub,
            "*" => BinOp::Mul,
            "/" => BinOp::Div,
            "==" => BinOp::Eq,
            "!=" => BinOp::Ne,
            "<" => BinOp::Lt,
            ">" => BinOp::Gt,
            "<=" => BinOp::Le,
            ">=" => BinOp::Ge,
            _ => return None,
        };
        Some(op)
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// Indented-tree rendering, two spaces per level.

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            match item {
                Item::Preprocessor(text) => writeln!(f, "Preprocessor: {}", text)?,
                Item::Function(function) => write_function(f, function, 0)?,
            }
        }
        Ok(())
    }
}

fn write_function(f: &mut fmt::Formatter<'_>, function: &Function, indent: usize) -> fmt::Result {
    write_indent(f, indent)?;
    writeln!(f, "Function: {}", function.name)?;
    write_block(f, &function.body, indent + 1)
}

fn write_block(f: &mut fmt::Formatter<'_>, block: &Block, indent: usize) -> fmt::Result {
    write_indent(f, indent)?;
    writeln!(f, "Block")?;
    for statement in &block.statements {
        write_statement(f, statement, indent + 1)?;
    }
    Ok(())
}

fn write_statement(f: &mut fmt::Formatter<'_>, statement: &Stmt, indent: usize) -> fmt::Result {
    match statement {
        Stmt::Declaration { name, init } => {
            write_indent(f, indent)?;
            writeln!(f, "Declare: {}", name)?;
            if let Some(init) = init {
                write_expression(f, init, indent + 1)?;
            }
            Ok(())
        }
        Stmt::Assignment { name, value } => {
            write_indent(f, indent)?;
            writeln!(f, "Assign: {}", name)?;
            write_expression(f, value, indent + 1)
        }
        Stmt::If {
            condition,
            then_branch,
            else_branch,
        } => {
            write_indent(f, indent)?;
            writeln!(f, "If")?;
            write_expression(f, condition, indent + 1)?;
            write_block(f, then_branch, indent + 1)?;
            if let Some(else_branch) = else_branch {
                write_indent(f, indent)?;
                writeln!(f, "Else")?;
                write_block(f, else_branch, indent + 1)?;
            }
            Ok(())
        }
        Stmt::While { condition, body } => {
            write_indent(f, indent)?;
            writeln!(f, "While")?;
            write_expression(f, condition, indent + 1)?;
            write_block(f, body, indent + 1)
        }
        Stmt::Return { value } => {
            write_indent(f, indent)?;
            writeln!(f, "Return")?;
            write_expression(f, value, indent + 1)
        }
        Stmt::Block(block) => write_block(f, block, indent),
    }
}

fn write_expression(f: &mut fmt::Formatter<'_>, expression: &Expr, indent: usize) -> fmt::Result {
    write_indent(f, indent)?;
    match expression {
        Expr::Literal(text) => writeln!(f, "Literal: {}", text),
        Expr::Variable(name) => writeln!(f, "Variable: {}", name),
        Expr::Binary { op, left, right } => {
            writeln!(f, "Binary: {}", op)?;
            write_expression(f, left, indent + 1)?;
            write_expression(f, right, indent + 1)
        }
    }
}

fn write_indent(f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
    for _ in 0..indent {
        f.write_str("  ")?;
    }
    Ok(())
}
