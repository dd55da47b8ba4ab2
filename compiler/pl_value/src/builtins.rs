//! Built-in operator functions.
//!
//! Each builtin follows the native calling convention (`NativeFnPtr`), takes
//! exactly two positional arguments and delegates to `evaluate_binary`. The
//! `BUILTINS` table binds the source-level symbols to these functions so a
//! code generator can resolve `+`, `<=` and friends to runtime entry points.

use crate::errors::{arity_mismatch, EvalResult};
use crate::operators::{evaluate_binary, BinaryOp};
use crate::value::{NativeFn, NativeFnPtr, Value};

/// A registered builtin.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub op: BinaryOp,
    pub func: NativeFnPtr,
}

impl Builtin {
    pub fn symbol(&self) -> &'static str {
        self.op.as_symbol()
    }

    pub fn name(&self) -> &'static str {
        self.op.name()
    }

    /// The builtin as a callable value.
    pub fn to_value(&self) -> Value {
        Value::native(self.func)
    }
}

/// Every builtin, in declaration order.
pub const BUILTINS: [Builtin; 9] = [
    Builtin { op: BinaryOp::Add, func: add },
    Builtin { op: BinaryOp::Sub, func: sub },
    Builtin { op: BinaryOp::Mul, func: mul },
    Builtin { op: BinaryOp::Div, func: div },
    Builtin { op: BinaryOp::Eq, func: eq },
    Builtin { op: BinaryOp::Lt, func: lt },
    Builtin { op: BinaryOp::LtEq, func: leq },
    Builtin { op: BinaryOp::Gt, func: gt },
    Builtin { op: BinaryOp::GtEq, func: geq },
];

/// Resolve a source-level operator symbol.
pub fn lookup(symbol: &str) -> Option<NativeFn> {
    BUILTINS
        .iter()
        .find(|builtin| builtin.symbol() == symbol)
        .map(|builtin| NativeFn::new(builtin.func))
}

/// Apply `op` to exactly two arguments.
fn apply(op: BinaryOp, args: &[Value]) -> EvalResult {
    match args {
        [left, right] => evaluate_binary(left, right, op),
        _ => Err(arity_mismatch(op.name(), 2, args.len())),
    }
}

pub fn add(args: &[Value]) -> EvalResult {
    apply(BinaryOp::Add, args)
}

pub fn sub(args: &[Value]) -> EvalResult {
    apply(BinaryOp::Sub, args)
}

pub fn mul(args: &[Value]) -> EvalResult {
    apply(BinaryOp::Mul, args)
}

/// Fails with a division-by-zero error when the divisor is `0` or `0.0`.
pub fn div(args: &[Value]) -> EvalResult {
    apply(BinaryOp::Div, args)
}

pub fn eq(args: &[Value]) -> EvalResult {
    apply(BinaryOp::Eq, args)
}

pub fn lt(args: &[Value]) -> EvalResult {
    apply(BinaryOp::Lt, args)
}

pub fn leq(args: &[Value]) -> EvalResult {
    apply(BinaryOp::LtEq, args)
}

pub fn gt(args: &[Value]) -> EvalResult {
    apply(BinaryOp::Gt, args)
}

pub fn geq(args: &[Value]) -> EvalResult {
    apply(BinaryOp::GtEq, args)
}
