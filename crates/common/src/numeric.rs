//! Integer semantics shared by every arithmetic, bitwise and comparison
//! instruction.
//!
//! Arithmetic is carried out in `f64` and then truncated toward zero and
//! wrapped into the `i32` range. Division or modulo by zero therefore yields a
//! non-finite intermediate that truncates to `0` instead of trapping.

use serde::{Deserialize, Serialize};

const TWO_POW_32: f64 = 4_294_967_296.0;
const TWO_POW_31: f64 = 2_147_483_648.0;

/// Truncate an extended-precision result to a signed 32-bit integer.
///
/// NaN and infinities become `0`. Finite values are truncated toward zero and
/// then wrapped modulo 2^32, so `2^31` becomes `i32::MIN`.
pub fn truncate(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    let wrapped = value.trunc().rem_euclid(TWO_POW_32);
    if wrapped >= TWO_POW_31 {
        (wrapped - TWO_POW_32) as i32
    } else {
        wrapped as i32
    }
}

/// A two-operand integer operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
    Xor,
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
    Neq,
}

impl BinaryOp {
    /// Apply the operation to `lhs` and `rhs`.
    pub fn apply(self, lhs: i32, rhs: i32) -> i32 {
        let (x, y) = (f64::from(lhs), f64::from(rhs));
        match self {
            BinaryOp::Add => truncate(x + y),
            BinaryOp::Sub => truncate(x - y),
            BinaryOp::Mul => truncate(x * y),
            BinaryOp::Div => truncate(x / y),
            BinaryOp::Mod => truncate(x % y),
            BinaryOp::And => lhs & rhs,
            BinaryOp::Or => lhs | rhs,
            BinaryOp::Xor => lhs ^ rhs,
            BinaryOp::Gt => i32::from(lhs > rhs),
            BinaryOp::Lt => i32::from(lhs < rhs),
            BinaryOp::Ge => i32::from(lhs >= rhs),
            BinaryOp::Le => i32::from(lhs <= rhs),
            BinaryOp::Eq => i32::from(lhs == rhs),
            BinaryOp::Neq => i32::from(lhs != rhs),
        }
    }

    /// Operator symbol used in catalog descriptions.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
            BinaryOp::Gt => ">",
            BinaryOp::Lt => "<",
            BinaryOp::Ge => ">=",
            BinaryOp::Le => "<=",
            BinaryOp::Eq => "==",
            BinaryOp::Neq => "!=",
        }
    }
}
