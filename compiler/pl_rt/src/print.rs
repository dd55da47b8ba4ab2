//! Printing values to stdout.

use std::io::{self, Write};

use pl_value::output_failed;

use crate::layout::{PlType, Plv};
use crate::or_fatal;

/// Write the textual form of a value: `pl_value::Value`'s `Display` for nil,
/// bool, int and float, the raw bytes of text between quotes, and the code
/// address for callables.
///
/// # Safety
/// A `Str` value's buffer must be live.
pub unsafe fn render<W: Write>(out: &mut W, v: &Plv) -> io::Result<()> {
    match v.ty {
        PlType::Funcptr => write!(out, "<function at {:p}>", v.val.funcptr as *const ()),
        PlType::Clos => write!(out, "<closure {:p}>", v.val.clos.closptr as *const ()),
        PlType::Str => {
            out.write_all(b"\"")?;
            out.write_all(v.text_bytes().unwrap_or_default())?;
            out.write_all(b"\"")
        }
        PlType::Nil | PlType::Bool | PlType::Int | PlType::Float => match v.to_scalar() {
            Some(value) => write!(out, "{value}"),
            None => Ok(()),
        },
    }
}

fn print_value(v: *const Plv, newline: bool) -> io::Result<()> {
    // SAFETY: generated code passes the address of a live value
    let v = unsafe { v.as_ref() }.unwrap_or(&Plv::NIL);
    let mut out = io::stdout().lock();
    unsafe { render(&mut out, v) }?;
    if newline {
        out.write_all(b"\n")?;
    }
    // `process::exit` on a later fatal error skips the stdout buffer
    out.flush()
}

/// Print a value without a trailing newline.
#[no_mangle]
pub extern "C" fn pl_print(v: *const Plv) {
    or_fatal(print_value(v, false).map_err(|err| output_failed(&err)));
}

/// Print a value followed by a newline.
#[no_mangle]
pub extern "C" fn pl_println(v: *const Plv) {
    or_fatal(print_value(v, true).map_err(|err| output_failed(&err)));
}
