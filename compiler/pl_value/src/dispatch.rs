//! Uniform call dispatch.
//!
//! Compiled code calls every function the same way: it builds an argument
//! sequence whose first element is the callee and hands it to `invoke`. The
//! callee may be a plain native function or a closure; the difference is
//! hidden behind the `Callable` capability.
//!
//! Dispatch only borrows the sequence. It never checks argument counts or
//! types; each callable validates its own arguments.

use crate::errors::{missing_callee, not_callable, EvalResult};
use crate::value::{Closure, NativeFn, Value};

/// Something that can be applied to an argument sequence.
pub trait Callable {
    fn call(&self, args: &[Value]) -> EvalResult;
}

impl Callable for NativeFn {
    fn call(&self, args: &[Value]) -> EvalResult {
        (self.func())(args)
    }
}

impl Callable for Closure {
    fn call(&self, args: &[Value]) -> EvalResult {
        (self.func())(self.env(), args)
    }
}

impl Value {
    /// View this value as a callable, if it is a function or closure.
    pub fn as_callable(&self) -> Option<&dyn Callable> {
        match self {
            Value::NativeFn(func) => Some(func as &dyn Callable),
            Value::Closure(closure) => Some(closure as &dyn Callable),
            _ => None,
        }
    }

    pub fn is_callable(&self) -> bool {
        self.as_callable().is_some()
    }
}

/// Call `args[0]` with `args[1..]`.
#[tracing::instrument(level = "trace", skip_all, fields(argc = args.len()))]
pub fn invoke(args: &[Value]) -> EvalResult {
    let (callee, rest) = args.split_first().ok_or_else(missing_callee)?;
    call(callee, rest)
}

/// Call `callee` with `args`.
pub fn call(callee: &Value, args: &[Value]) -> EvalResult {
    let callable = callee
        .as_callable()
        .ok_or_else(|| not_callable(callee.type_name()))?;
    callable.call(args)
}
