//! Runtime values for compiled PureLisp programs.
//!
//! # Ownership
//!
//! `Value` is a closed sum type: the tag and the payload cannot disagree.
//! Two variants own heap memory:
//!
//! - `Str` owns a private copy of its text (`Text`, created only by
//!   `Value::string`).
//! - `Closure` owns its captured environment.
//!
//! Ownership is plain Rust ownership. A value is released exactly once, when
//! it is dropped or passed to `Value::destroy`; moving a value into an argument
//! sequence moves the payload with it. `Clone` is an explicit deep copy.
//!
//! ```text
//! let s = Value::string("hi")?;          // duplicates "hi"
//! let c = Value::closure(body, vec![s]); // the environment now owns s
//! ```

mod callable;
mod text;

use std::fmt;

use tracing::trace;

use crate::errors::{allocation_failed, EvalResult};

pub use callable::{Closure, ClosureFnPtr, NativeFn, NativeFnPtr};
pub use text::Text;

/// Discriminator of a `Value`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Nil,
    Bool,
    Int,
    Float,
    Str,
    NativeFn,
    Closure,
}

impl Tag {
    /// Name used in diagnostics.
    pub const fn type_name(self) -> &'static str {
        match self {
            Tag::Nil => "nil",
            Tag::Bool => "bool",
            Tag::Int => "int",
            Tag::Float => "float",
            Tag::Str => "str",
            Tag::NativeFn => "function",
            Tag::Closure => "closure",
        }
    }
}

/// Runtime value.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Owned text.
    Str(Text),
    /// Reference to a native function.
    NativeFn(NativeFn),
    /// Native closure code with its owned environment.
    Closure(Closure),
}

// Factory Methods

impl Value {
    #[inline]
    pub fn nil() -> Self {
        Value::Nil
    }

    #[inline]
    pub fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn float(x: f64) -> Self {
        Value::Float(x)
    }

    /// Create a string value holding a copy of `text`.
    ///
    /// The copy is reserved up front; if the allocator refuses, the result is
    /// an allocation error and no value is produced.
    pub fn string(text: &str) -> EvalResult {
        let mut owned = String::new();
        owned
            .try_reserve_exact(text.len())
            .map_err(|_| allocation_failed("string", text.len()))?;
        owned.push_str(text);
        Ok(Value::Str(Text::new(owned.into_boxed_str())))
    }

    #[inline]
    pub fn native(func: NativeFnPtr) -> Self {
        Value::NativeFn(NativeFn::new(func))
    }

    /// Create a closure. Takes ownership of the captured environment.
    #[inline]
    pub fn closure(func: ClosureFnPtr, env: Vec<Value>) -> Self {
        Value::Closure(Closure::new(func, env))
    }
}

// Value Methods

impl Value {
    pub fn tag(&self) -> Tag {
        match self {
            Value::Nil => Tag::Nil,
            Value::Bool(_) => Tag::Bool,
            Value::Int(_) => Tag::Int,
            Value::Float(_) => Tag::Float,
            Value::Str(_) => Tag::Str,
            Value::NativeFn(_) => Tag::NativeFn,
            Value::Closure(_) => Tag::Closure,
        }
    }

    /// Get the type name for error messages.
    pub fn type_name(&self) -> &'static str {
        self.tag().type_name()
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Whether this value owns heap memory that `destroy` releases.
    pub fn owns_heap(&self) -> bool {
        matches!(self, Value::Str(_) | Value::Closure(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_closure(&self) -> Option<&Closure> {
        match self {
            Value::Closure(c) => Some(c),
            _ => None,
        }
    }

    /// Release any owned payload and leave `Nil` behind.
    ///
    /// Destroying a closure destroys its captured values too. Calling this on
    /// a value that owns nothing, or a second time, does nothing.
    pub fn destroy(&mut self) {
        match std::mem::take(self) {
            Value::Str(s) => trace!(bytes = s.len(), "releasing string"),
            Value::Closure(c) => trace!(captured = c.env().len(), "releasing closure"),
            _ => {}
        }
    }

    /// Equality as defined by the `=` operator.
    ///
    /// Operands with different tags are unequal. Floats compare with IEEE
    /// semantics, strings byte-wise. Functions and closures are never equal to
    /// anything, themselves included.
    #[allow(
        clippy::float_cmp,
        reason = "`=` on floats is exact IEEE equality"
    )]
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a.as_bytes() == b.as_bytes(),
            _ => false,
        }
    }
}

// Trait Implementations

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::NativeFn(func) => write!(f, "{func:?}"),
            Value::Closure(c) => write!(f, "{c:?}"),
        }
    }
}

/// Canonical rendering used when a program prints a value.
///
/// Strings are quoted but not escaped, so the output is not guaranteed to read
/// back. Floats use fixed notation with six fractional digits.
/// Six decimals, with the C spellings for non-finite values.
fn fmt_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        f.write_str(if x.is_sign_negative() { "-nan" } else { "nan" })
    } else if x.is_infinite() {
        f.write_str(if x < 0.0 { "-inf" } else { "inf" })
    } else {
        write!(f, "{x:.6}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => fmt_float(f, *x),
            Value::Str(s) => write!(f, "\"{}\"", &**s),
            Value::NativeFn(func) => write!(f, "{func}"),
            Value::Closure(c) => write!(f, "{c}"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}
