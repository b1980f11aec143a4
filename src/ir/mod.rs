//! The quadruple intermediate representation.
//!
//! Every instruction is four strings: a result slot, up to two argument
//! slots, and an operator. Unused slots hold the empty string. The shape
//! is deliberately loose so one list type covers assignments, arithmetic,
//! labels, branches, and function markers, and so the optimizer can
//! rewrite instructions in place without changing the list layout.

pub mod lowering;
pub mod printer;

pub use lowering::IrGenerator;

/// One quadruple.
///
/// The `op` field selects the shape: `=` for plain assignment, a binary
/// operator symbol for arithmetic and comparisons, and the markers
/// `FUNC`, `LABEL`, `goto`, `if`, and `RET` for control flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub result: String,
    pub arg1: String,
    pub op: String,
    pub arg2: String,
}

impl Instruction {
    /// `result = value`
    pub fn assign(result: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            result: result.into(),
            arg1: value.into(),
            op: "=".to_string(),
            arg2: String::new(),
        }
    }

    /// `result = left op right`
    pub fn binary(
        result: impl Into<String>,
        left: impl Into<String>,
        op: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        Self {
            result: result.into(),
            arg1: left.into(),
            op: op.into(),
            arg2: right.into(),
        }
    }

    /// Marks the start of a function body. Emits no assembly.
    pub fn function(name: impl Into<String>) -> Self {
        Self {
            result: name.into(),
            arg1: String::new(),
            op: "FUNC".to_string(),
            arg2: String::new(),
        }
    }

    /// Names the position of the next instruction. Emits no assembly.
    pub fn label(name: impl Into<String>) -> Self {
        Self {
            result: name.into(),
            arg1: String::new(),
            op: "LABEL".to_string(),
            arg2: String::new(),
        }
    }

    /// Unconditional jump to a label.
    pub fn jump(target: impl Into<String>) -> Self {
        Self {
            result: String::new(),
            arg1: String::new(),
            op: "goto".to_string(),
            arg2: target.into(),
        }
    }

    /// Branch taken when `condition` evaluates to zero.
    pub fn branch_if_zero(condition: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            result: String::new(),
            arg1: condition.into(),
            op: "if".to_string(),
            arg2: target.into(),
        }
    }

    /// Return the value in `value`.
    pub fn ret(value: impl Into<String>) -> Self {
        Self {
            result: "RET".to_string(),
            arg1: value.into(),
            op: "RET".to_string(),
            arg2: String::new(),
        }
    }
}

/// True when `text` is a non-empty run of ASCII digits.
///
/// Operand slots hold either integer literals or names, so this is the
/// test both the folder and the emitter use to tell the two apart. The
/// empty string is a vacant slot, not a number.
pub fn is_numeric_literal(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}
