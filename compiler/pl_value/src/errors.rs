//! Error types for value construction, dispatch and the built-in operators.
//!
//! Every failure the runtime can report has a structured `EvalErrorKind`.
//! Factory functions (e.g. `division_by_zero()`) are the construction API;
//! callers match on `EvalError::kind()` rather than parsing messages.
//!
//! The C-ABI runtime turns each of these into a fatal diagnostic. Rust callers
//! get them back as ordinary `Err` values.

use std::io;

use thiserror::Error;

use crate::operators::BinaryOp;
use crate::value::Value;

/// Result of constructing, calling or operating on a value.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    /// Heap exhaustion while duplicating a payload.
    #[error("memory allocation failed for {what} ({bytes} bytes)")]
    Allocation { what: &'static str, bytes: usize },

    /// Operand tags the requested operator does not accept.
    #[error(
        "type error in {}: cannot apply `{}` to {left} and {right}",
        .op.description(),
        .op.as_symbol()
    )]
    BinaryTypeMismatch {
        op: BinaryOp,
        left: &'static str,
        right: &'static str,
    },

    /// The first element of a call sequence is not a function or closure.
    #[error("callee is not callable: {type_name}")]
    NotCallable { type_name: &'static str },

    /// A call sequence without any elements.
    #[error("call has no callee")]
    MissingCallee,

    #[error("division by zero")]
    DivisionByZero,

    #[error("{name} expects {expected} arguments, got {got}")]
    ArityMismatch {
        name: &'static str,
        expected: usize,
        got: usize,
    },

    /// A branch condition that is not a boolean.
    #[error("condition must be bool, got {type_name}")]
    ConditionNotBool { type_name: &'static str },

    /// Reserved or unrepresentable values (lists, foreign callables).
    #[error("{feature} are not supported")]
    Unsupported { feature: &'static str },

    /// Writing a rendered value to stdout failed.
    #[error("failed to write output: {kind}")]
    Output { kind: io::ErrorKind },
}

/// Runtime error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct EvalError {
    kind: EvalErrorKind,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError { kind }
    }

    /// The structured category of this error.
    pub fn kind(&self) -> &EvalErrorKind {
        &self.kind
    }

    /// Human-readable message, identical to the `Display` output.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::new(kind)
    }
}

// Construction Errors

/// Allocation of `bytes` bytes for `what` failed.
#[cold]
pub fn allocation_failed(what: &'static str, bytes: usize) -> EvalError {
    EvalErrorKind::Allocation { what, bytes }.into()
}

/// Reserved value kinds that cannot be constructed.
#[cold]
pub fn unsupported(feature: &'static str) -> EvalError {
    EvalErrorKind::Unsupported { feature }.into()
}

#[cold]
pub fn output_failed(err: &io::Error) -> EvalError {
    EvalErrorKind::Output { kind: err.kind() }.into()
}

// Operator Errors

#[cold]
pub fn binary_type_mismatch(op: BinaryOp, left: &'static str, right: &'static str) -> EvalError {
    EvalErrorKind::BinaryTypeMismatch { op, left, right }.into()
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalErrorKind::DivisionByZero.into()
}

#[cold]
pub fn arity_mismatch(name: &'static str, expected: usize, got: usize) -> EvalError {
    EvalErrorKind::ArityMismatch {
        name,
        expected,
        got,
    }
    .into()
}

#[cold]
pub fn condition_not_bool(type_name: &'static str) -> EvalError {
    EvalErrorKind::ConditionNotBool { type_name }.into()
}

// Dispatch Errors

#[cold]
pub fn not_callable(type_name: &'static str) -> EvalError {
    EvalErrorKind::NotCallable { type_name }.into()
}

#[cold]
pub fn missing_callee() -> EvalError {
    EvalErrorKind::MissingCallee.into()
}

#[cfg(test)]
mod tests;
