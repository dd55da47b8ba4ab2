//! PureLisp Runtime Library (`libpl_rt`)
//!
//! Runtime support for PureLisp programs compiled to C. Generated code links
//! against the static library and calls the C-ABI functions below; Rust
//! callers (and the tests) use the rlib.
//!
//! # Build Modes
//!
//! - **rlib**: For Rust consumers and tests
//! - **staticlib**: For linking into compiled programs (`libpl_rt.a`)
//!
//! # Function Categories
//!
//! - **Values**: `pl_new_nil`, `pl_new_bool`, `pl_new_int`, `pl_new_float`,
//!   `pl_new_str`, `pl_new_funcptr`, `pl_new_clos`, `pl_env_alloc`, `pl_delete`
//! - **Calls**: `pl_funcall`, `pl_truthy`
//! - **Builtins**: `pl_builtin_add` through `pl_builtin_geq`
//! - **I/O**: `pl_print`, `pl_println`
//! - **Setup**: `pl_init`
//!
//! Operator semantics are shared with `pl_value`: data operands are lifted
//! into `pl_value::Value`, evaluated there, and lowered back.
//!
//! # Errors
//!
//! Runtime errors are fatal. The message is written to stderr as
//! `Error: <message>` and the process exits with status 1.

use std::sync::Once;

use pl_value::EvalError;

mod call;
mod layout;
mod lifecycle;
mod print;

pub use call::{
    apply_builtin, funcall, pl_builtin_add, pl_builtin_div, pl_builtin_eq, pl_builtin_geq,
    pl_builtin_gt, pl_builtin_leq, pl_builtin_lt, pl_builtin_mul, pl_builtin_sub, pl_funcall,
    pl_truthy, truthy,
};
pub use layout::{PlClos, PlClosptr, PlFuncptr, PlType, PlVal, Plv};
pub use lifecycle::{
    delete, pl_delete, pl_env_alloc, pl_new_bool, pl_new_clos, pl_new_float, pl_new_funcptr,
    pl_new_int, pl_new_list, pl_new_nil, pl_new_str,
};
pub use print::{pl_print, pl_println, render};

// ── Diagnostics ──────────────────────────────────────────────────────────

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber for the runtime.
///
/// Only takes effect when `RUST_LOG` is set; safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .with(filter)
                .init();
        }
    });
}

/// Runtime setup hook, emitted at the top of the generated `main`.
#[no_mangle]
pub extern "C" fn pl_init() {
    init_tracing();
    tracing::debug!("runtime initialized");
}

// ── Fatal errors ─────────────────────────────────────────────────────────

/// Report a runtime error and terminate the program.
#[cold]
pub(crate) fn fatal(err: &EvalError) -> ! {
    tracing::debug!(kind = ?err.kind(), "fatal runtime error");
    eprintln!("Error: {err}");
    std::process::exit(1)
}

/// Unwrap a runtime result, terminating the program on error.
pub(crate) fn or_fatal<T>(result: Result<T, EvalError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => fatal(&err),
    }
}
