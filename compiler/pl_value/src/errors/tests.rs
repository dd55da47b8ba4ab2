use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_messages() {
    assert_eq!(division_by_zero().message(), "division by zero");
    assert_eq!(
        not_callable("int").message(),
        "callee is not callable: int"
    );
    assert_eq!(missing_callee().message(), "call has no callee");
    assert_eq!(
        allocation_failed("string", 12).message(),
        "memory allocation failed for string (12 bytes)"
    );
    assert_eq!(
        arity_mismatch("add", 2, 3).message(),
        "add expects 2 arguments, got 3"
    );
    assert_eq!(
        condition_not_bool("nil").message(),
        "condition must be bool, got nil"
    );
    assert_eq!(
        unsupported("list values").message(),
        "list values are not supported"
    );
}

#[test]
fn test_output_failure_keeps_io_kind() {
    let io_err = std::io::Error::from(std::io::ErrorKind::BrokenPipe);
    let err = output_failed(&io_err);
    assert_eq!(
        err.kind(),
        &EvalErrorKind::Output {
            kind: std::io::ErrorKind::BrokenPipe
        }
    );
    assert_eq!(err.message(), "failed to write output: broken pipe");
}

#[test]
fn test_binary_type_mismatch_names_operator() {
    let err = binary_type_mismatch(BinaryOp::Lt, "int", "str");
    assert_eq!(
        err.to_string(),
        "type error in less than comparison: cannot apply `<` to int and str"
    );
    assert_eq!(
        err.kind(),
        &EvalErrorKind::BinaryTypeMismatch {
            op: BinaryOp::Lt,
            left: "int",
            right: "str",
        }
    );
}

#[test]
fn test_kind_round_trips_through_from() {
    let err: EvalError = EvalErrorKind::DivisionByZero.into();
    assert_eq!(err, division_by_zero());
    assert_eq!(err.kind(), &EvalErrorKind::DivisionByZero);
}

#[test]
fn test_is_std_error() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
    assert_error::<EvalError>();
}
