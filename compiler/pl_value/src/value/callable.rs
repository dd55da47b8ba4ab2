//! Function payloads: native function references and closures.

use std::fmt;

use super::Value;
use crate::errors::EvalResult;

/// Native calling convention: explicit arguments only.
pub type NativeFnPtr = fn(&[Value]) -> EvalResult;

/// Closure calling convention: captured environment, then explicit arguments.
pub type ClosureFnPtr = fn(&[Value], &[Value]) -> EvalResult;

/// Reference to static code. Not owned, nothing to release.
#[derive(Clone, Copy)]
pub struct NativeFn(NativeFnPtr);

impl NativeFn {
    pub fn new(func: NativeFnPtr) -> Self {
        NativeFn(func)
    }

    pub fn func(self) -> NativeFnPtr {
        self.0
    }

    /// Code address, for display only.
    pub fn addr(self) -> *const () {
        self.0 as *const ()
    }
}

impl fmt::Display for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function at {:p}>", self.addr())
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFn({self})")
    }
}

/// Static code paired with an owned environment of captured values.
///
/// The environment is handed over once, as a single block, when the closure is
/// built. Dropping the closure drops the block together with every captured
/// value in it.
#[derive(Clone)]
pub struct Closure {
    func: ClosureFnPtr,
    env: Box<[Value]>,
}

impl Closure {
    pub fn new(func: ClosureFnPtr, env: Vec<Value>) -> Self {
        Closure {
            func,
            env: env.into_boxed_slice(),
        }
    }

    pub fn func(&self) -> ClosureFnPtr {
        self.func
    }

    /// The captured free variables, in capture order.
    pub fn env(&self) -> &[Value] {
        &self.env
    }

    /// Code address, for display only.
    pub fn addr(&self) -> *const () {
        self.func as *const ()
    }
}

impl fmt::Display for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<closure {:p}>", self.addr())
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Closure({self}, env: {:?})", &*self.env)
    }
}
