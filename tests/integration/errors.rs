// Error messages and locations.
use crate::common::{eval, eval_err};
use skein::ErrorKind;

#[test]
fn test_contract_error_is_located() {
    assert_eq!(
        eval_err("(car 5)"),
        "test(1,1): car: contract violation\n  expected: pair?\n  given: 5"
    );
}

#[test]
fn test_inner_location_wins() {
    let msg = eval_err("(define (f x) (car x))\n(map f '(1))");
    assert!(msg.starts_with("test(1,15): car: contract violation"), "{}", msg);
}

#[test]
fn test_range_error() {
    let msg = eval_err("(vector-ref (vector 1 2 3) 10)");
    assert!(msg.contains("vector-ref: index is out of range"), "{}", msg);
    assert!(msg.contains("index: 10"), "{}", msg);
    assert!(msg.contains("valid range: [0, 2]"), "{}", msg);
    assert!(msg.contains("vector: #(1 2 3)"), "{}", msg);
}

#[test]
fn test_unbound_global() {
    let err = eval("(+ 1 undefined-thing)").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Unbound { .. }));
    assert!(err
        .to_string()
        .starts_with("test(1,6): undefined-thing: undefined;"));
}

#[test]
fn test_reference_before_definition_in_same_file() {
    let msg = eval_err("(define (f) later)\n(f)\n(define later 1)");
    assert!(msg.contains("later: undefined"), "{}", msg);
}

#[test]
fn test_division_by_zero() {
    let err = eval("(/ 1 0)").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DivisionByZero { .. }));
    assert_eq!(eval("(/ 1.0 0)").unwrap().to_string(), "+inf.0");
}

#[test]
fn test_primitive_arity_is_checked_at_analysis() {
    let msg = eval_err("(car 1 2)");
    assert!(msg.contains("car: arity mismatch"), "{}", msg);
    assert!(msg.contains("expected: 1\n  given: 2"), "{}", msg);
    assert!(msg.contains("arguments...:\n   1\n   2"), "{}", msg);
}

#[test]
fn test_native_arity() {
    let msg = eval_err("(length)");
    assert!(msg.contains("length: arity mismatch"), "{}", msg);
}

#[test]
fn test_applying_non_procedure() {
    let msg = eval_err("(\"str\" 1)");
    assert!(msg.contains("application: contract violation"), "{}", msg);
    assert!(msg.contains("given: \"str\""), "{}", msg);
}

#[test]
fn test_syntax_errors() {
    let err = eval("(if)").unwrap_err();
    assert!(err.to_string().contains("if:"), "{}", err);
    let msg = eval_err("()");
    assert!(msg.contains("#%app: missing procedure expression"), "{}", msg);
    let msg = eval_err("(lambda (x))");
    assert!(msg.contains("lambda: bad syntax"), "{}", msg);
}

#[test]
fn test_lexical_errors() {
    let msg = eval_err("(list 1 #q)");
    assert_eq!(msg, "test(1,9): read: bad syntax `#q`");
    let msg = eval_err("\"never closed");
    assert!(msg.contains("unterminated string"), "{}", msg);
    let msg = eval_err("\"bad \\q escape\"");
    assert!(msg.contains("unknown escape sequence"), "{}", msg);
}

#[test]
fn test_earlier_forms_run_before_a_later_error() {
    let (result, out) = crate::common::eval_output("(display 1) (car '())");
    assert!(result.is_err());
    assert_eq!(out, "1");
}
