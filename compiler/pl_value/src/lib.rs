//! PureLisp runtime values.
//!
//! This crate provides:
//! - The runtime value type (`Value`, `Tag`, `NativeFn`, `Closure`)
//! - Uniform call dispatch (`Callable`, `invoke`, `call`)
//! - The built-in operators (`BinaryOp`, `evaluate_binary`, `builtins`)
//! - Error types (`EvalError`, `EvalErrorKind`, `EvalResult`)
//!
//! # Architecture
//!
//! Compiled code builds argument sequences of `Value`s and calls through
//! `invoke`. Values own their payloads; releasing them is ordinary Rust drop
//! (or `Value::destroy`, which also resets the slot to `Nil`). Every failure
//! is returned as an `EvalError`; nothing in this crate terminates the
//! process. The C-ABI runtime (`pl_rt`) builds on these semantics.

pub mod builtins;
mod dispatch;
mod errors;
mod operators;
mod value;

pub use builtins::{Builtin, BUILTINS};
pub use dispatch::{call, invoke, Callable};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use operators::{evaluate_binary, BinaryOp};
pub use value::{Closure, ClosureFnPtr, NativeFn, NativeFnPtr, Tag, Text, Value};

// Re-export error constructors for use by other crates
pub use errors::{
    allocation_failed, arity_mismatch, binary_type_mismatch, condition_not_bool,
    division_by_zero, missing_callee, not_callable, output_failed, unsupported,
};
