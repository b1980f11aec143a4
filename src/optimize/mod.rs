//! Optimization passes over the instruction list.
//!
//! Passes rewrite instructions in place and never insert or remove any,
//! so row numbering and jump targets survive every pass unchanged.

use crate::ir::{is_numeric_literal, Instruction};

/// Operators the constant folder understands.
const FOLDABLE_OPS: &[&str] = &["+", "-", "*", "/", "==", "!=", "<", ">", "<=", ">="];

pub trait Pass {
    fn name(&self) -> &'static str;

    fn run(&self, code: &mut Vec<Instruction>);
}

/// Runs a fixed sequence of passes in registration order.
pub struct PassManager {
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    pub fn new() -> Self {
        Self { passes: Vec::new() }
    }

    pub fn add_pass(&mut self, pass: Box<dyn Pass>) {
        self.passes.push(pass);
    }

    pub fn run(&self, code: &mut Vec<Instruction>) {
        for pass in &self.passes {
            pass.run(code);
        }
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Folds binary instructions whose operands are both integer literals.
///
/// A folded instruction becomes a plain assignment of the computed value;
/// its result slot is untouched, so downstream uses of the name still
/// resolve. Division by zero and arithmetic that overflows `i64` are left
/// for the target to deal with. Comparisons fold to `1` or `0`.
pub struct ConstantFolding;

impl Pass for ConstantFolding {
    fn name(&self) -> &'static str {
        "constant-folding"
    }

    fn run(&self, code: &mut Vec<Instruction>) {
        for instruction in code.iter_mut() {
            if let Some(value) = fold(instruction) {
                instruction.arg1 = value.to_string();
                instruction.op = "=".to_string();
                instruction.arg2.clear();
            }
        }
    }
}

fn fold(instruction: &Instruction) -> Option<i64> {
    if !FOLDABLE_OPS.contains(&instruction.op.as_str()) {
        return None;
    }
    if !is_numeric_literal(&instruction.arg1) || !is_numeric_literal(&instruction.arg2) {
        return None;
    }
    let left: i64 = instruction.arg1.parse().ok()?;
    let right: i64 = instruction.arg2.parse().ok()?;
    match instruction.op.as_str() {
        "+" => left.checked_add(right),
        "-" => left.checked_sub(right),
        "*" => left.checked_mul(right),
        "/" => left.checked_div(right),
        "==" => Some((left == right) as i64),
        "!=" => Some((left != right) as i64),
        "<" => Some((left < right) as i64),
        ">" => Some((left > right) as i64),
        "<=" => Some((left <= right) as i64),
        ">=" => Some((left >= right) as i64),
        _ => None,
    }
}
