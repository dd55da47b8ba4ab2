//! Value construction and destruction for generated code.

use std::ffi::{c_char, CStr, CString};
use std::mem::size_of;
use std::ptr;

use pl_value::{allocation_failed, unsupported, EvalError};
use tracing::trace;

use crate::layout::{PlClosptr, PlFuncptr, PlType, Plv};
use crate::{fatal, or_fatal};

/// Copy `bytes` into a fresh NUL-terminated buffer owned by the caller.
pub(crate) fn alloc_c_string(bytes: &[u8]) -> Result<*mut c_char, EvalError> {
    let size = bytes.len().saturating_add(1);
    let mut buf = Vec::new();
    buf.try_reserve_exact(size)
        .map_err(|_| allocation_failed("string", size))?;
    buf.extend_from_slice(bytes);
    buf.push(0);
    let owned = CString::from_vec_with_nul(buf)
        .map_err(|_| unsupported("strings with interior NUL bytes"))?;
    Ok(owned.into_raw())
}

/// Allocate an environment block of `len` nil values.
pub(crate) fn alloc_env(len: usize) -> Result<*mut Plv, EvalError> {
    let mut env = Vec::new();
    env.try_reserve_exact(len).map_err(|_| {
        allocation_failed("closure environment", len.saturating_mul(size_of::<Plv>()))
    })?;
    env.resize(len, Plv::NIL);
    Ok(Box::into_raw(env.into_boxed_slice()).cast::<Plv>())
}

/// Free an environment block. The captured values are shallow copies and are
/// left alone; their storage belongs to the bindings they were copied from.
unsafe fn release_env(freevars: *mut Plv, len: usize) {
    if !freevars.is_null() {
        drop(Box::from_raw(ptr::slice_from_raw_parts_mut(freevars, len)));
    }
}

/// Release whatever `v` owns and reset it to nil.
///
/// A string frees its buffer; a closure frees its environment block but not
/// the values captured in it.
///
/// # Safety
/// `v` must hold a live value built by this runtime. Other copies of the
/// same `Str` or `Clos` value are dangling afterwards.
pub unsafe fn delete(v: &mut Plv) {
    match v.ty {
        PlType::Str => {
            let s = v.val.s;
            if !s.is_null() {
                trace!("releasing string");
                drop(CString::from_raw(s));
            }
        }
        PlType::Clos => {
            let clos = v.val.clos;
            trace!(captured = clos.len, "releasing closure environment block");
            release_env(clos.freevars, clos.len);
        }
        PlType::Nil | PlType::Bool | PlType::Int | PlType::Float | PlType::Funcptr => {}
    }
    *v = Plv::NIL;
}

// ── C-ABI constructors ───────────────────────────────────────────────────

#[no_mangle]
pub extern "C" fn pl_new_nil() -> Plv {
    Plv::NIL
}

/// Any non-zero byte is true.
#[no_mangle]
pub extern "C" fn pl_new_bool(b: u8) -> Plv {
    Plv::bool(b != 0)
}

#[no_mangle]
pub extern "C" fn pl_new_int(n: i64) -> Plv {
    Plv::int(n)
}

#[no_mangle]
pub extern "C" fn pl_new_float(x: f64) -> Plv {
    Plv::float(x)
}

/// Build a string value from a NUL-terminated buffer. The text is copied;
/// the caller keeps ownership of `s`. A null `s` yields the empty string.
#[no_mangle]
pub extern "C" fn pl_new_str(s: *const c_char) -> Plv {
    let bytes = if s.is_null() {
        &[][..]
    } else {
        // SAFETY: generated code passes string literals, which are NUL-terminated
        unsafe { CStr::from_ptr(s) }.to_bytes()
    };
    Plv::owned_str(or_fatal(alloc_c_string(bytes)))
}

/// Lists have no runtime representation; reaching this is a fatal error.
#[no_mangle]
pub extern "C" fn pl_new_list(_elements: *const Plv, _len: usize) -> Plv {
    fatal(&unsupported("list values"))
}

#[no_mangle]
pub extern "C" fn pl_new_funcptr(funcptr: PlFuncptr) -> Plv {
    Plv::funcptr(funcptr)
}

/// Build a closure. Ownership of the block `freevars[..len]` moves into the
/// value; the block must come from `pl_env_alloc(len)` (or be null when `len`
/// is 0). Captured values are copied in by the caller, which keeps deleting
/// its own bindings as usual.
#[no_mangle]
pub extern "C" fn pl_new_clos(closptr: PlClosptr, freevars: *mut Plv, len: usize) -> Plv {
    Plv::clos(closptr, freevars, len)
}

/// Allocate an environment block of `len` nil slots for `pl_new_clos`.
#[no_mangle]
pub extern "C" fn pl_env_alloc(len: usize) -> *mut Plv {
    or_fatal(alloc_env(len))
}

/// Release the storage owned by `*v` and reset it to nil.
///
/// Deleting the same slot twice is a no-op; deleting a different copy of an
/// already released value is undefined. A null `v` is ignored.
#[no_mangle]
pub extern "C" fn pl_delete(v: *mut Plv) {
    // SAFETY: non-null pointers from generated code refer to live value slots
    if let Some(v) = unsafe { v.as_mut() } {
        unsafe { delete(v) };
    }
}
