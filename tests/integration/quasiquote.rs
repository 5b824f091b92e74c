// Quasiquote templates.
use crate::common::{eval_err, eval_ok};

#[test]
fn test_plain_template_is_literal() {
    assert_eq!(eval_ok("`(a b c)"), "(a b c)");
}

#[test]
fn test_unquote() {
    assert_eq!(eval_ok("(define x 5) `(a ,x ,(+ x 1))"), "(a 5 6)");
}

#[test]
fn test_unquote_splicing() {
    assert_eq!(eval_ok("(define xs '(1 2)) `(0 ,@xs 3)"), "(0 1 2 3)");
    assert_eq!(eval_ok("(define xs '()) `(,@xs)"), "()");
}

#[test]
fn test_dotted_and_vector_templates() {
    assert_eq!(eval_ok("(define x 1) `(a . ,x)"), "(a . 1)");
    assert_eq!(eval_ok("(define x 1) `#(a ,x)"), "#(a 1)");
}

#[test]
fn test_nested_quasiquote_keeps_inner_unquote() {
    assert_eq!(eval_ok("(define x 1) `(a `(b ,(c ,x)))"), "(a (quasiquote (b (unquote (c 1)))))");
}

#[test]
fn test_splice_at_top_level_rejected() {
    let msg = eval_err("`,@(list 1)");
    assert!(msg.contains("unquote-splicing"), "{}", msg);
}

#[test]
fn test_unquote_outside_quasiquote() {
    let msg = eval_err("(unquote x)");
    assert!(msg.contains("not in quasiquote"), "{}", msg);
}
