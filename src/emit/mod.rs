//! Template expansion from quadruples to pseudo-assembly.
//!
//! A stateless walk: each instruction expands to a fixed line template
//! chosen from its fields, with no register allocation and no peephole
//! work. The emitter trusts the shapes the generator produces and makes
//! no attempt to validate them.

use crate::ir::{is_numeric_literal, Instruction};

const PROLOGUE: &[&str] = &["PUSH BP", "MOV BP, SP"];
const EPILOGUE: &[&str] = &["MOV SP, BP", "POP BP"];

/// Expands the whole list into one assembly text, prologue and epilogue
/// included. The result ends with a newline.
pub fn emit_assembly(code: &[Instruction]) -> String {
    let mut lines: Vec<String> = Vec::new();
    for line in PROLOGUE {
        lines.push(line.to_string());
    }
    for instruction in code {
        emit_instruction(instruction, &mut lines);
    }
    for line in EPILOGUE {
        lines.push(line.to_string());
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn emit_instruction(instruction: &Instruction, lines: &mut Vec<String>) {
    match instruction.op.as_str() {
        "if" => {
            lines.push(format!("LOAD {}", instruction.arg1));
            lines.push(format!("JZ {}", instruction.arg2));
        }
        "goto" => {
            lines.push(format!("JMP {}", instruction.arg2));
        }
        // Markers name positions; their text appears only in jump operands.
        "LABEL" | "FUNC" => {}
        "=" if instruction.arg2.is_empty() => {
            if is_numeric_literal(&instruction.arg1) {
                lines.push(format!("MOV {}, {}", instruction.result, instruction.arg1));
            } else {
                lines.push(format!("LOAD {}", instruction.arg1));
                lines.push(format!("STORE {}", instruction.result));
            }
        }
        _ if instruction.result == "RET" => {
            lines.push(format!("LOAD {}", instruction.arg1));
            lines.push("RET".to_string());
        }
        _ => {
            lines.push(format!("LOAD {}", instruction.arg1));
            lines.push(format!("{} {}", mnemonic(&instruction.op), instruction.arg2));
            lines.push(format!("STORE {}", instruction.result));
        }
    }
}

fn mnemonic(op: &str) -> &'static str {
    match op {
        "+" => "ADD",
        "-" => "SUB",
        "*" => "MUL",
        _ => "DIV",
    }
}
