//! C layout of runtime values.
//!
//! `Plv` is the value type generated C code declares, copies and passes
//! around: a tag plus an untagged union. The payload must match the tag; this
//! runtime only ever builds values that satisfy that, and generated code is
//! expected to go through the `pl_new_*` constructors.
//!
//! ```text
//! struct Plv { PlType ty; union { uint8_t b; int64_t n; double x;
//!              char *s; PlFuncptr funcptr; PlClos clos; } val; };
//! ```

use std::borrow::Cow;
use std::ffi::{c_char, CStr};
use std::fmt;

use pl_value::{unsupported, EvalError, Tag, Value};

use crate::lifecycle::alloc_c_string;

/// Native calling convention: a pointer to the explicit arguments.
pub type PlFuncptr = extern "C" fn(args: *const Plv) -> Plv;

/// Closure calling convention: captured environment, then explicit arguments.
pub type PlClosptr = extern "C" fn(freevars: *const Plv, args: *const Plv) -> Plv;

/// Tag of a `Plv`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlType {
    Nil,
    Bool,
    Int,
    Float,
    Str,
    Funcptr,
    Clos,
}

impl PlType {
    /// The corresponding tag of the Rust value type.
    pub fn tag(self) -> Tag {
        match self {
            PlType::Nil => Tag::Nil,
            PlType::Bool => Tag::Bool,
            PlType::Int => Tag::Int,
            PlType::Float => Tag::Float,
            PlType::Str => Tag::Str,
            PlType::Funcptr => Tag::NativeFn,
            PlType::Clos => Tag::Closure,
        }
    }

    pub fn type_name(self) -> &'static str {
        self.tag().type_name()
    }
}

/// Closure payload: code pointer plus an owned environment block of `len`
/// values, allocated by `pl_env_alloc`. The block is owned; the values in it
/// are copies whose heap data stays with the bindings they came from.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct PlClos {
    pub closptr: PlClosptr,
    pub freevars: *mut Plv,
    pub len: usize,
}

/// Payload of a `Plv`. The active member is selected by `Plv::ty`.
#[repr(C)]
#[derive(Clone, Copy)]
pub union PlVal {
    pub b: u8,
    pub n: i64,
    pub x: f64,
    pub s: *mut c_char,
    pub funcptr: PlFuncptr,
    pub clos: PlClos,
}

/// Runtime value as seen by generated C code.
///
/// `Plv` is `Copy`: copying it copies the tag and the payload pointer, not the
/// heap data behind it. Exactly one copy of a `Str` or `Clos` value may be
/// passed to `pl_delete`.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct Plv {
    pub ty: PlType,
    pub val: PlVal,
}

impl Plv {
    pub const NIL: Plv = Plv {
        ty: PlType::Nil,
        val: PlVal { n: 0 },
    };

    pub fn bool(b: bool) -> Plv {
        Plv {
            ty: PlType::Bool,
            val: PlVal { b: u8::from(b) },
        }
    }

    pub fn int(n: i64) -> Plv {
        Plv {
            ty: PlType::Int,
            val: PlVal { n },
        }
    }

    pub fn float(x: f64) -> Plv {
        Plv {
            ty: PlType::Float,
            val: PlVal { x },
        }
    }

    /// Wrap a buffer obtained from `alloc_c_string`. The value takes ownership.
    pub(crate) fn owned_str(s: *mut c_char) -> Plv {
        Plv {
            ty: PlType::Str,
            val: PlVal { s },
        }
    }

    pub fn funcptr(funcptr: PlFuncptr) -> Plv {
        Plv {
            ty: PlType::Funcptr,
            val: PlVal { funcptr },
        }
    }

    /// Build a closure that owns the block `freevars[..len]`.
    pub fn clos(closptr: PlClosptr, freevars: *mut Plv, len: usize) -> Plv {
        Plv {
            ty: PlType::Clos,
            val: PlVal {
                clos: PlClos {
                    closptr,
                    freevars,
                    len,
                },
            },
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.ty.type_name()
    }

    pub fn is_callable(&self) -> bool {
        matches!(self.ty, PlType::Funcptr | PlType::Clos)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.ty {
            // SAFETY: tag checked
            PlType::Bool => Some(unsafe { self.val.b } != 0),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self.ty {
            // SAFETY: tag checked
            PlType::Int => Some(unsafe { self.val.n }),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self.ty {
            // SAFETY: tag checked
            PlType::Float => Some(unsafe { self.val.x }),
            _ => None,
        }
    }

    /// Borrow the text of a `Str` value.
    ///
    /// # Safety
    /// A `Str` value's buffer must be live (not yet passed to `pl_delete`).
    pub unsafe fn as_c_str(&self) -> Option<&CStr> {
        match self.ty {
            PlType::Str if !self.val.s.is_null() => Some(CStr::from_ptr(self.val.s)),
            _ => None,
        }
    }

    /// Raw bytes of a `Str` value, without the terminator. A null buffer reads
    /// as empty. Text is not required to be UTF-8.
    ///
    /// # Safety
    /// Same as `as_c_str`.
    pub unsafe fn text_bytes(&self) -> Option<&[u8]> {
        match self.ty {
            PlType::Str => Some(self.as_c_str().map_or(&[][..], CStr::to_bytes)),
            _ => None,
        }
    }

    /// Borrow the captured environment of a `Clos` value.
    ///
    /// # Safety
    /// The environment block must be live.
    pub unsafe fn env(&self) -> Option<&[Plv]> {
        match self.ty {
            PlType::Clos if !self.val.clos.freevars.is_null() => {
                let clos = self.val.clos;
                Some(std::slice::from_raw_parts(clos.freevars, clos.len))
            }
            _ => None,
        }
    }

    /// Lift a nil, bool, int or float without allocating. `None` for text
    /// and callables.
    pub fn to_scalar(&self) -> Option<Value> {
        match self.ty {
            PlType::Nil => Some(Value::Nil),
            PlType::Bool => self.as_bool().map(Value::Bool),
            PlType::Int => self.as_int().map(Value::Int),
            PlType::Float => self.as_float().map(Value::Float),
            PlType::Str | PlType::Funcptr | PlType::Clos => None,
        }
    }

    /// Copy this value into a Rust `Value`. Text is duplicated, with invalid
    /// UTF-8 replaced by U+FFFD; C callables have no Rust counterpart and are
    /// rejected.
    ///
    /// # Safety
    /// Same as `as_c_str`.
    pub unsafe fn to_value(&self) -> Result<Value, EvalError> {
        match self.ty {
            PlType::Nil => Ok(Value::Nil),
            PlType::Bool => Ok(Value::Bool(self.val.b != 0)),
            PlType::Int => Ok(Value::Int(self.val.n)),
            PlType::Float => Ok(Value::Float(self.val.x)),
            PlType::Str => {
                let text = self
                    .as_c_str()
                    .map_or(Cow::Borrowed(""), CStr::to_string_lossy);
                Value::string(&text)
            }
            PlType::Funcptr | PlType::Clos => Err(unsupported("C callables as Rust values")),
        }
    }

    /// Lower a Rust `Value` into a fresh C value. Text is duplicated into a
    /// new owned buffer.
    pub fn from_value(value: &Value) -> Result<Plv, EvalError> {
        match value {
            Value::Nil => Ok(Plv::NIL),
            Value::Bool(b) => Ok(Plv::bool(*b)),
            Value::Int(n) => Ok(Plv::int(*n)),
            Value::Float(x) => Ok(Plv::float(*x)),
            Value::Str(s) => Ok(Plv::owned_str(alloc_c_string(s.as_bytes())?)),
            Value::NativeFn(_) | Value::Closure(_) => {
                Err(unsupported("Rust callables as C values"))
            }
        }
    }
}

impl fmt::Debug for Plv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // SAFETY: every member read below is selected by the tag
        unsafe {
            match self.ty {
                PlType::Nil => write!(f, "Nil"),
                PlType::Bool => write!(f, "Bool({})", self.val.b != 0),
                PlType::Int => write!(f, "Int({})", self.val.n),
                PlType::Float => write!(f, "Float({})", self.val.x),
                PlType::Str => write!(f, "Str({:?})", self.as_c_str()),
                PlType::Funcptr => write!(f, "Funcptr({:p})", self.val.funcptr as *const ()),
                PlType::Clos => {
                    let clos = self.val.clos;
                    write!(f, "Clos({:p}, {} captured)", clos.closptr as *const (), clos.len)
                }
            }
        }
    }
}
