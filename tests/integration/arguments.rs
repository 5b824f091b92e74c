// Arity checks and optional, rest and keyword parameters.
use crate::common::{eval_err, eval_ok};

#[test]
fn test_too_few_arguments() {
    let msg = eval_err("((lambda (a b) a) 1)");
    assert!(msg.contains("arity mismatch"), "{}", msg);
    assert!(msg.contains("expected: 2\n  given: 1"), "{}", msg);
    assert!(msg.contains("arguments...:\n   1"), "{}", msg);
}

#[test]
fn test_too_many_arguments() {
    let msg = eval_err("((lambda (a b) a) 1 2 3)");
    assert!(msg.contains("expected: 2\n  given: 3"), "{}", msg);
}

#[test]
fn test_arity_error_names_procedure() {
    let msg = eval_err("(define (two a b) a)\n(two 1)");
    assert!(msg.starts_with("test(2,1): two: arity mismatch"), "{}", msg);
}

#[test]
fn test_optional_arity_bounds() {
    let msg = eval_err("((lambda (a &optional b) a))");
    assert!(msg.contains("expected: at least 1\n  given: 0"), "{}", msg);
    let msg = eval_err("((lambda (a &optional b) a) 1 2 3)");
    assert!(msg.contains("expected: at most 2\n  given: 3"), "{}", msg);
}

#[test]
fn test_optional_defaults() {
    assert_eq!(eval_ok("((lambda (x &optional y (z 9)) z) 5)"), "9");
    assert_eq!(eval_ok("((lambda (x &optional y (z 8)) z) 5 6 7)"), "7");
    assert_eq!(eval_ok("((lambda (x &optional y (z 8)) y) 5)"), "#f");
}

#[test]
fn test_defaults_are_lazy() {
    let src = "
        (define calls 0)
        (define (f &optional (x (begin (set! calls (+ calls 1)) calls))) x)
        (f 5)
        (f 6)
        (list calls (f) calls)";
    assert_eq!(eval_ok(src), "(0 1 1)");
}

#[test]
fn test_defaults_see_earlier_parameters() {
    assert_eq!(eval_ok("((lambda (a &optional (b (+ a 1)) (c (* b 2))) (list a b c)) 1)"), "(1 2 4)");
}

#[test]
fn test_rest_parameters() {
    assert_eq!(eval_ok("((lambda (a &rest r) r) 1 2 3)"), "(2 3)");
    assert_eq!(eval_ok("((lambda (a &rest r) r) 1)"), "()");
    assert_eq!(eval_ok("((lambda (a . r) r) 1 2)"), "(2)");
    assert_eq!(eval_ok("((lambda args args) 1 2)"), "(1 2)");
    assert_eq!(eval_ok("(define (f . xs) (length xs)) (f 1 2 3 4)"), "4");
}

#[test]
fn test_keyword_parameters() {
    let src = "(define (f &key (a 1) b) (list a b))";
    assert_eq!(eval_ok(&format!("{} (f :b 2)", src)), "(1 2)");
    assert_eq!(eval_ok(&format!("{} (f :b 2 :a 3)", src)), "(3 2)");
    assert_eq!(eval_ok(&format!("{} (f)", src)), "(1 #f)");
}

#[test]
fn test_unknown_keyword_rejected() {
    let msg = eval_err("(define (f &key a) a) (f :zz 1)");
    assert!(msg.contains("f: contract violation"), "{}", msg);
    assert!(msg.contains("expected: a declared keyword\n  given: :zz"), "{}", msg);
}

#[test]
fn test_odd_keyword_list_rejected() {
    let msg = eval_err("(define (f &key a) a) (f :a)");
    assert!(msg.contains("an even number of keyword arguments"), "{}", msg);
}

#[test]
fn test_rest_with_keys_accepts_unknown_keys() {
    let src = "(define (g &rest r &key a) (list r a)) (g :a 1 :z 2)";
    assert_eq!(eval_ok(src), "((:a 1 :z 2) 1)");
}

#[test]
fn test_keywords_evaluate_to_themselves() {
    assert_eq!(eval_ok(":name"), ":name");
    assert_eq!(eval_ok("(keyword? :name)"), "#t");
}

#[test]
fn test_bad_lambda_lists() {
    let msg = eval_err("(lambda (a a) a)");
    assert!(msg.contains("duplicate argument name"), "{}", msg);
    let msg = eval_err("(lambda (&rest) 1)");
    assert!(msg.contains("`&rest` needs exactly one identifier"), "{}", msg);
    let msg = eval_err("(lambda (&key k &optional o) 1)");
    assert!(msg.contains("misplaced `&optional`"), "{}", msg);
}
