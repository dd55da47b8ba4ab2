//! Binary operator implementations.
//!
//! The operator set is fixed, so dispatch is a direct match on the operand
//! pair. Arithmetic and ordering accept `(int, int)` and `(float, float)`
//! only; equality accepts everything.

use std::cmp::Ordering;

use crate::errors::{binary_type_mismatch, division_by_zero, EvalResult};
use crate::value::Value;

/// The built-in binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 9] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Eq,
        BinaryOp::Lt,
        BinaryOp::LtEq,
        BinaryOp::Gt,
        BinaryOp::GtEq,
    ];

    /// Source-level symbol.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
        }
    }

    /// Name of the built-in function implementing this operator.
    pub const fn name(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
            BinaryOp::Eq => "eq",
            BinaryOp::Lt => "lt",
            BinaryOp::LtEq => "leq",
            BinaryOp::Gt => "gt",
            BinaryOp::GtEq => "geq",
        }
    }

    /// Wording used in type error messages.
    pub const fn description(self) -> &'static str {
        match self {
            BinaryOp::Add => "addition",
            BinaryOp::Sub => "subtraction",
            BinaryOp::Mul => "multiplication",
            BinaryOp::Div => "division",
            BinaryOp::Eq => "equality",
            BinaryOp::Lt => "less than comparison",
            BinaryOp::LtEq => "less than or equal comparison",
            BinaryOp::Gt => "greater than comparison",
            BinaryOp::GtEq => "greater than or equal comparison",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<BinaryOp> {
        BinaryOp::ALL.into_iter().find(|op| op.as_symbol() == symbol)
    }
}

/// Checked division with zero guard.
///
/// The divisor is tested before `op` runs.
#[inline]
fn checked_div<T, F>(is_zero: bool, op: F, wrap: fn(T) -> Value) -> EvalResult
where
    F: FnOnce() -> T,
{
    if is_zero {
        Err(division_by_zero())
    } else {
        Ok(wrap(op()))
    }
}

/// Map an ordering result through a comparison operator.
///
/// `None` (a NaN operand) satisfies no comparison.
#[inline]
fn compare(ordering: Option<Ordering>, op: BinaryOp) -> Value {
    let holds = match op {
        BinaryOp::Lt => ordering == Some(Ordering::Less),
        BinaryOp::LtEq => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        BinaryOp::Gt => ordering == Some(Ordering::Greater),
        BinaryOp::GtEq => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        BinaryOp::Eq => ordering == Some(Ordering::Equal),
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => false,
    };
    Value::Bool(holds)
}

/// Evaluate a binary operator.
///
/// Operands are borrowed; nothing is allocated and no ownership moves.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Float(a), Value::Float(b)) => eval_float_binary(*a, *b, op),
        _ if op == BinaryOp::Eq => Ok(Value::Bool(left.equals(right))),
        _ => Err(binary_type_mismatch(
            op,
            left.type_name(),
            right.type_name(),
        )),
    }
}

/// Binary operations on integers.
///
/// Arithmetic is the machine's two's-complement arithmetic: results wrap, and
/// `i64::MIN / -1` is `i64::MIN`.
fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(Value::Int(a.wrapping_add(b))),
        BinaryOp::Sub => Ok(Value::Int(a.wrapping_sub(b))),
        BinaryOp::Mul => Ok(Value::Int(a.wrapping_mul(b))),
        BinaryOp::Div => checked_div(b == 0, || a.wrapping_div(b), Value::Int),
        BinaryOp::Eq | BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            Ok(compare(Some(a.cmp(&b)), op))
        }
    }
}

/// Binary operations on floats.
fn eval_float_binary(a: f64, b: f64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(Value::Float(a + b)),
        BinaryOp::Sub => Ok(Value::Float(a - b)),
        BinaryOp::Mul => Ok(Value::Float(a * b)),
        // -0.0 == 0.0, so both zeros are rejected
        BinaryOp::Div => checked_div(b == 0.0, || a / b, Value::Float),
        // partial_cmp keeps IEEE semantics (NaN compares false)
        BinaryOp::Eq | BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            Ok(compare(a.partial_cmp(&b), op))
        }
    }
}

#[cfg(test)]
mod tests;
