//! Call dispatch and the builtin operators over C values.

use pl_value::{
    arity_mismatch, binary_type_mismatch, condition_not_bool, evaluate_binary, missing_callee,
    not_callable, BinaryOp, EvalError,
};
use tracing::trace;

use crate::layout::{PlType, Plv};
use crate::or_fatal;

/// Call `args[0]` with the argument array starting at `args + 1`.
///
/// A native function receives only the argument pointer; a closure also
/// receives its environment block. The callee reads as many arguments as its
/// arity says.
///
/// # Safety
/// A non-null `args` must point to at least one live value, followed by the
/// callee's arguments.
pub unsafe fn funcall(args: *const Plv) -> Result<Plv, EvalError> {
    let Some(callee) = args.as_ref() else {
        return Err(missing_callee());
    };
    let rest = args.add(1);
    match callee.ty {
        PlType::Funcptr => {
            let func = callee.val.funcptr;
            trace!(callee = ?callee, "calling function");
            Ok(func(rest))
        }
        PlType::Clos => {
            let clos = callee.val.clos;
            trace!(callee = ?callee, "calling closure");
            Ok((clos.closptr)(clos.freevars.cast_const(), rest))
        }
        PlType::Nil | PlType::Bool | PlType::Int | PlType::Float | PlType::Str => {
            Err(not_callable(callee.type_name()))
        }
    }
}

/// Uniform call entry point used by generated code.
#[no_mangle]
pub extern "C" fn pl_funcall(args: *const Plv) -> Plv {
    // SAFETY: generated code passes an array whose first element is the callee
    or_fatal(unsafe { funcall(args) })
}

/// Apply a builtin operator to `args[0]` and `args[1]`.
///
/// Nil, bool, int and float operands follow `pl_value::evaluate_binary`.
/// Text compares byte-wise under `=`; text and callables are rejected by every
/// other operator. Callables never compare equal. Nothing is allocated.
///
/// # Safety
/// A non-null `args` must point to two live values.
pub unsafe fn apply_builtin(op: BinaryOp, args: *const Plv) -> Result<Plv, EvalError> {
    let Some(left) = args.as_ref() else {
        return Err(arity_mismatch(op.name(), 2, 0));
    };
    let right = &*args.add(1);

    if let (Some(a), Some(b)) = (left.to_scalar(), right.to_scalar()) {
        let result = evaluate_binary(&a, &b, op)?;
        return Plv::from_value(&result);
    }

    if op == BinaryOp::Eq {
        let same_text = matches!(
            (left.text_bytes(), right.text_bytes()),
            (Some(a), Some(b)) if a == b
        );
        Ok(Plv::bool(same_text))
    } else {
        Err(binary_type_mismatch(op, left.type_name(), right.type_name()))
    }
}

fn builtin(op: BinaryOp, args: *const Plv) -> Plv {
    // SAFETY: generated code calls every operator with two arguments
    or_fatal(unsafe { apply_builtin(op, args) })
}

#[no_mangle]
pub extern "C" fn pl_builtin_add(args: *const Plv) -> Plv {
    builtin(BinaryOp::Add, args)
}

#[no_mangle]
pub extern "C" fn pl_builtin_sub(args: *const Plv) -> Plv {
    builtin(BinaryOp::Sub, args)
}

#[no_mangle]
pub extern "C" fn pl_builtin_mul(args: *const Plv) -> Plv {
    builtin(BinaryOp::Mul, args)
}

#[no_mangle]
pub extern "C" fn pl_builtin_div(args: *const Plv) -> Plv {
    builtin(BinaryOp::Div, args)
}

#[no_mangle]
pub extern "C" fn pl_builtin_eq(args: *const Plv) -> Plv {
    builtin(BinaryOp::Eq, args)
}

#[no_mangle]
pub extern "C" fn pl_builtin_lt(args: *const Plv) -> Plv {
    builtin(BinaryOp::Lt, args)
}

#[no_mangle]
pub extern "C" fn pl_builtin_leq(args: *const Plv) -> Plv {
    builtin(BinaryOp::LtEq, args)
}

#[no_mangle]
pub extern "C" fn pl_builtin_gt(args: *const Plv) -> Plv {
    builtin(BinaryOp::Gt, args)
}

#[no_mangle]
pub extern "C" fn pl_builtin_geq(args: *const Plv) -> Plv {
    builtin(BinaryOp::GtEq, args)
}

/// Read the condition of an `if`.
///
/// # Safety
/// A non-null `v` must point to a live value.
pub unsafe fn truthy(v: *const Plv) -> Result<bool, EvalError> {
    let v = v.as_ref().unwrap_or(&Plv::NIL);
    v.as_bool().ok_or_else(|| condition_not_bool(v.type_name()))
}

/// Branch test for `if`: the condition must be a boolean.
#[no_mangle]
pub extern "C" fn pl_truthy(v: *const Plv) -> bool {
    // SAFETY: generated code passes the address of an evaluated condition
    or_fatal(unsafe { truthy(v) })
}
