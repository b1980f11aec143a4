//! Lowering from the parsed tree to quadruples.
//!
//! One post-order walk per expression: operands lower to their own slots
//! first, then the operator gets a fresh `t{n}` temporary. Control flow
//! lowers to labels and branch-on-false, so a condition jumps away when
//! it evaluates to zero and falls through otherwise.

use crate::ir::Instruction;
use crate::parser::ast::{Block, Expr, Function, Item, Program, Stmt};

/// Allocates temporaries and labels and accumulates the instruction list.
///
/// Both counters run for the whole program, never per function, so every
/// `t{n}` and `L{n}` in one listing is distinct.
pub struct IrGenerator {
    next_temp: usize,
    next_label: usize,
    code: Vec<Instruction>,
}

impl IrGenerator {
    pub fn new() -> Self {
        Self {
            next_temp: 0,
            next_label: 0,
            code: Vec::new(),
        }
    }

    /// Consumes the generator and returns the finished instruction list.
    pub fn lower_program(mut self, program: &Program) -> Vec<Instruction> {
        for item in &program.items {
            if let Item::Function(function) = item {
                self.lower_function(function);
            }
        }
        self.code
    }

    fn lower_function(&mut self, function: &Function) {
        self.emit(Instruction::function(&function.name));
        self.lower_block(&function.body);
    }

    fn lower_block(&mut self, block: &Block) {
        for statement in &block.statements {
            self.lower_statement(statement);
        }
    }

    fn lower_statement(&mut self, statement: &Stmt) {
        match statement {
            Stmt::Declaration { name, init } => {
                // A bare declaration reserves the name and nothing else.
                if let Some(init) = init {
                    let value = self.lower_expression(init);
                    self.emit(Instruction::assign(name, value));
                }
            }
            Stmt::Assignment { name, value } => {
                let value = self.lower_expression(value);
                self.emit(Instruction::assign(name, value));
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let false_target = self.new_label();
                let end_target = self.new_label();
                let condition = self.lower_expression(condition);
                self.emit(Instruction::branch_if_zero(condition, &false_target));
                self.lower_block(then_branch);
                self.emit(Instruction::jump(&end_target));
                self.emit(Instruction::label(&false_target));
                if let Some(else_branch) = else_branch {
                    self.lower_block(else_branch);
                }
                self.emit(Instruction::label(&end_target));
            }
            Stmt::While { condition, body } => {
                let head = self.new_label();
                let exit = self.new_label();
                self.emit(Instruction::label(&head));
                let condition = self.lower_expression(condition);
                self.emit(Instruction::branch_if_zero(condition, &exit));
                self.lower_block(body);
                self.emit(Instruction::jump(&head));
                self.emit(Instruction::label(&exit));
            }
            Stmt::Return { value } => {
                let value = self.lower_expression(value);
                self.emit(Instruction::ret(value));
            }
            Stmt::Block(block) => self.lower_block(block),
        }
    }

    /// Lowers an expression and returns the slot holding its value.
    ///
    /// Leaves pass their text through unchanged and cost no temporary.
    fn lower_expression(&mut self, expression: &Expr) -> String {
        match expression {
            Expr::Literal(text) => text.clone(),
            Expr::Variable(name) => name.clone(),
            Expr::Binary { op, left, right } => {
                let left = self.lower_expression(left);
                let right = self.lower_expression(right);
                let result = self.new_temp();
                self.emit(Instruction::binary(&result, left, op.symbol(), right));
                result
            }
        }
    }

    fn new_temp(&mut self) -> String {
        let name = format!("t{}", self.next_temp);
        self.next_temp += 1;
        name
    }

    fn new_label(&mut self) -> String {
        let name = format!("L{}", self.next_label);
        self.next_label += 1;
        name
    }

    fn emit(&mut self, instruction: Instruction) {
        self.code.push(instruction);
    }
}

impl Default for IrGenerator {
    fn default() -> Self {
        Self::new()
    }
}
