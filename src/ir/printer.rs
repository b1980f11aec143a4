//! Readable renderings of the instruction list.

use std::fmt;

use crate::ir::Instruction;

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op.as_str() {
            "FUNC" => write!(f, "FUNC {}", self.result),
            "LABEL" => write!(f, "{}:", self.result),
            "goto" => write!(f, "goto {}", self.arg2),
            "if" => write!(f, "if {} == 0 goto {}", self.arg1, self.arg2),
            "RET" => write!(f, "RET {}", self.arg1),
            "=" => write!(f, "{} = {}", self.result, self.arg1),
            _ => write!(f, "{} = {} {} {}", self.result, self.arg1, self.op, self.arg2),
        }
    }
}

/// Renders the instruction list as the columnar listing the driver prints.
///
/// Rows are numbered from zero so a row's index is its position in the
/// list. `phase` names the pipeline stage, typically `Unoptimized` or
/// `Optimized`.
pub fn render_listing(phase: &str, code: &[Instruction]) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {} Intermediate Code ===\n", phase));
    out.push_str(&format!(
        "{:<5} {:<10} {:<10} {:<5} {:<10}\n",
        "Line", "Result", "Arg1", "Op", "Arg2"
    ));
    out.push_str("----------------------------------------\n");
    for (index, instruction) in code.iter().enumerate() {
        out.push_str(&format!(
            "{:<5} {:<10} {:<10} {:<5} {:<10}\n",
            index, instruction.result, instruction.arg1, instruction.op, instruction.arg2
        ));
    }
    out.push_str("========================================\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instructions_display_in_loadable_forms() {
        assert_eq!(Instruction::function("main").to_string(), "FUNC main");
        assert_eq!(Instruction::label("L0").to_string(), "L0:");
        assert_eq!(Instruction::jump("L1").to_string(), "goto L1");
        assert_eq!(
            Instruction::branch_if_zero("t0", "L0").to_string(),
            "if t0 == 0 goto L0"
        );
        assert_eq!(Instruction::ret("t1").to_string(), "RET t1");
        assert_eq!(Instruction::assign("x", "5").to_string(), "x = 5");
        assert_eq!(
            Instruction::binary("t0", "2", "+", "3").to_string(),
            "t0 = 2 + 3"
        );
    }

    #[test]
    fn listing_numbers_rows_from_zero() {
        let code = vec![
            Instruction::function("main"),
            Instruction::binary("t0", "2", "+", "3"),
        ];
        let listing = render_listing("Unoptimized", &code);
        assert!(listing.starts_with("=== Unoptimized Intermediate Code ===\n"));
        assert!(listing.contains("\n0     main"));
        assert!(listing.contains("\n1     t0"));
    }
}
