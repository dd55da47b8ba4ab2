//! Tests for the binary operators.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::errors::EvalErrorKind;

fn eval(left: Value, right: Value, op: BinaryOp) -> Value {
    evaluate_binary(&left, &right, op).unwrap()
}

fn eval_err(left: Value, right: Value, op: BinaryOp) -> EvalErrorKind {
    evaluate_binary(&left, &right, op).unwrap_err().kind().clone()
}

fn string(text: &str) -> Value {
    Value::string(text).unwrap()
}

fn native(_args: &[Value]) -> EvalResult {
    Ok(Value::Nil)
}

#[test]
fn test_int_operations() {
    assert_eq!(eval(Value::int(2), Value::int(3), BinaryOp::Add).as_int(), Some(5));
    assert_eq!(eval(Value::int(5), Value::int(3), BinaryOp::Sub).as_int(), Some(2));
    assert_eq!(eval(Value::int(2), Value::int(3), BinaryOp::Mul).as_int(), Some(6));
    assert_eq!(eval(Value::int(7), Value::int(2), BinaryOp::Div).as_int(), Some(3));
    assert_eq!(eval(Value::int(-7), Value::int(2), BinaryOp::Div).as_int(), Some(-3));
}

#[test]
fn test_float_operations() {
    assert_eq!(eval(Value::float(1.5), Value::float(2.0), BinaryOp::Add).as_float(), Some(3.5));
    assert_eq!(eval(Value::float(1.5), Value::float(2.0), BinaryOp::Sub).as_float(), Some(-0.5));
    assert_eq!(eval(Value::float(1.5), Value::float(2.0), BinaryOp::Mul).as_float(), Some(3.0));
    assert_eq!(eval(Value::float(1.0), Value::float(4.0), BinaryOp::Div).as_float(), Some(0.25));
}

#[test]
fn test_int_arithmetic_wraps() {
    assert_eq!(
        eval(Value::int(i64::MAX), Value::int(1), BinaryOp::Add).as_int(),
        Some(i64::MIN)
    );
    assert_eq!(
        eval(Value::int(i64::MIN), Value::int(-1), BinaryOp::Div).as_int(),
        Some(i64::MIN)
    );
}

#[test]
fn test_division_by_zero() {
    assert_eq!(
        eval_err(Value::int(1), Value::int(0), BinaryOp::Div),
        EvalErrorKind::DivisionByZero
    );
    assert_eq!(
        eval_err(Value::float(1.0), Value::float(0.0), BinaryOp::Div),
        EvalErrorKind::DivisionByZero
    );
    assert_eq!(
        eval_err(Value::float(1.0), Value::float(-0.0), BinaryOp::Div),
        EvalErrorKind::DivisionByZero
    );
}

#[test]
fn test_arithmetic_type_mismatch() {
    assert_eq!(
        eval_err(Value::int(1), Value::float(1.0), BinaryOp::Add),
        EvalErrorKind::BinaryTypeMismatch {
            op: BinaryOp::Add,
            left: "int",
            right: "float",
        }
    );
    assert!(matches!(
        eval_err(string("a"), string("b"), BinaryOp::Add),
        EvalErrorKind::BinaryTypeMismatch { .. }
    ));
    assert!(matches!(
        eval_err(Value::nil(), Value::int(0), BinaryOp::Div),
        EvalErrorKind::BinaryTypeMismatch { .. }
    ));
}

#[test]
fn test_mismatch_is_reported_before_zero_divisor() {
    assert!(matches!(
        eval_err(Value::float(1.0), Value::int(0), BinaryOp::Div),
        EvalErrorKind::BinaryTypeMismatch { .. }
    ));
}

#[test]
fn test_comparisons() {
    assert_eq!(eval(Value::int(2), Value::int(3), BinaryOp::Lt).as_bool(), Some(true));
    assert_eq!(eval(Value::int(3), Value::int(3), BinaryOp::LtEq).as_bool(), Some(true));
    assert_eq!(eval(Value::int(3), Value::int(2), BinaryOp::Gt).as_bool(), Some(true));
    assert_eq!(eval(Value::int(2), Value::int(3), BinaryOp::GtEq).as_bool(), Some(false));
    assert_eq!(eval(Value::float(0.5), Value::float(1.5), BinaryOp::Lt).as_bool(), Some(true));
    assert_eq!(eval(Value::float(1.5), Value::float(1.5), BinaryOp::GtEq).as_bool(), Some(true));
}

#[test]
fn test_nan_satisfies_no_ordering() {
    for op in [BinaryOp::Lt, BinaryOp::LtEq, BinaryOp::Gt, BinaryOp::GtEq] {
        assert_eq!(
            eval(Value::float(f64::NAN), Value::float(1.0), op).as_bool(),
            Some(false)
        );
    }
}

#[test]
fn test_ordering_type_mismatch() {
    assert_eq!(
        eval_err(Value::int(1), string("x"), BinaryOp::Lt),
        EvalErrorKind::BinaryTypeMismatch {
            op: BinaryOp::Lt,
            left: "int",
            right: "str",
        }
    );
    assert!(matches!(
        eval_err(string("a"), string("b"), BinaryOp::Lt),
        EvalErrorKind::BinaryTypeMismatch { .. }
    ));
    assert!(matches!(
        eval_err(Value::bool(true), Value::bool(false), BinaryOp::Gt),
        EvalErrorKind::BinaryTypeMismatch { .. }
    ));
}

#[test]
fn test_equality() {
    assert_eq!(eval(Value::nil(), Value::nil(), BinaryOp::Eq).as_bool(), Some(true));
    assert_eq!(eval(Value::bool(true), Value::bool(true), BinaryOp::Eq).as_bool(), Some(true));
    assert_eq!(eval(Value::bool(true), Value::bool(false), BinaryOp::Eq).as_bool(), Some(false));
    assert_eq!(eval(string("hi"), string("hi"), BinaryOp::Eq).as_bool(), Some(true));
    assert_eq!(eval(string("hi"), string("ho"), BinaryOp::Eq).as_bool(), Some(false));
    assert_eq!(eval(Value::float(0.0), Value::float(-0.0), BinaryOp::Eq).as_bool(), Some(true));
}

#[test]
fn test_equality_across_tags_is_false() {
    assert_eq!(eval(Value::int(1), Value::float(1.0), BinaryOp::Eq).as_bool(), Some(false));
    assert_eq!(eval(Value::nil(), Value::bool(false), BinaryOp::Eq).as_bool(), Some(false));
    assert_eq!(eval(string("1"), Value::int(1), BinaryOp::Eq).as_bool(), Some(false));
}

#[test]
fn test_callables_never_equal() {
    let f = Value::native(native);
    assert_eq!(eval(f.clone(), f, BinaryOp::Eq).as_bool(), Some(false));

    let closure = Value::closure(|_, _| Ok(Value::Nil), vec![]);
    assert_eq!(eval(closure.clone(), closure, BinaryOp::Eq).as_bool(), Some(false));
}

#[test]
fn test_operator_metadata() {
    assert_eq!(BinaryOp::from_symbol("<="), Some(BinaryOp::LtEq));
    assert_eq!(BinaryOp::from_symbol("%"), None);
    assert_eq!(BinaryOp::GtEq.name(), "geq");
    assert_eq!(BinaryOp::Mul.description(), "multiplication");
    for op in BinaryOp::ALL {
        assert_eq!(BinaryOp::from_symbol(op.as_symbol()), Some(op));
    }
}

proptest! {
    #[test]
    fn int_arithmetic_matches_machine(a in any::<i64>(), b in any::<i64>()) {
        prop_assert_eq!(eval(Value::int(a), Value::int(b), BinaryOp::Add).as_int(), Some(a.wrapping_add(b)));
        prop_assert_eq!(eval(Value::int(a), Value::int(b), BinaryOp::Sub).as_int(), Some(a.wrapping_sub(b)));
        prop_assert_eq!(eval(Value::int(a), Value::int(b), BinaryOp::Mul).as_int(), Some(a.wrapping_mul(b)));
    }

    #[test]
    fn int_division_by_zero_always_fails(a in any::<i64>()) {
        prop_assert_eq!(eval_err(Value::int(a), Value::int(0), BinaryOp::Div), EvalErrorKind::DivisionByZero);
    }

    #[test]
    fn float_division_matches_machine(a in -1.0e12f64..1.0e12, b in -1.0e12f64..1.0e12) {
        prop_assume!(b != 0.0);
        let result = eval(Value::float(a), Value::float(b), BinaryOp::Div);
        prop_assert_eq!(result.tag(), crate::value::Tag::Float);
        prop_assert_eq!(result.as_float(), Some(a / b));
    }

    #[test]
    fn equality_is_reflexive(n in any::<i64>(), x in -1.0e12f64..1.0e12, b in any::<bool>(), s in ".*") {
        prop_assert_eq!(eval(Value::int(n), Value::int(n), BinaryOp::Eq).as_bool(), Some(true));
        prop_assert_eq!(eval(Value::float(x), Value::float(x), BinaryOp::Eq).as_bool(), Some(true));
        prop_assert_eq!(eval(Value::bool(b), Value::bool(b), BinaryOp::Eq).as_bool(), Some(true));
        prop_assert_eq!(eval(string(&s), string(&s), BinaryOp::Eq).as_bool(), Some(true));
    }

    #[test]
    fn cross_tag_ordering_fails(n in any::<i64>(), s in ".*") {
        for op in [BinaryOp::Lt, BinaryOp::LtEq, BinaryOp::Gt, BinaryOp::GtEq] {
            let is_mismatch = matches!(
                eval_err(Value::int(n), string(&s), op),
                EvalErrorKind::BinaryTypeMismatch { .. }
            );
            prop_assert!(is_mismatch);
        }
    }
}
