// Special forms end to end.
use crate::common::{eval_err, eval_ok};

#[test]
fn test_cond_picks_first_true_clause() {
    assert_eq!(eval_ok("(cond (1 2) (3 4) (else 5))"), "2");
    assert_eq!(eval_ok("(cond (#f 2) (else 5))"), "5");
    assert_eq!(eval_ok("(cond (#f 2))"), "#<void>");
}

#[test]
fn test_cond_test_only_clause_yields_test() {
    assert_eq!(eval_ok("(cond (#f) ((+ 3 4)) (else 1))"), "7");
}

#[test]
fn test_cond_else_must_be_last() {
    let msg = eval_err("(cond (else 1) (#t 2))");
    assert!(msg.contains("cond: bad syntax (`else` clause must be last)"), "{}", msg);
}

#[test]
fn test_only_false_is_false() {
    assert_eq!(eval_ok("(if '() 1 2)"), "1");
    assert_eq!(eval_ok("(if 0 1 2)"), "1");
    assert_eq!(eval_ok("(if \"\" 1 2)"), "1");
    assert_eq!(eval_ok("(if #f 1 2)"), "2");
    assert_eq!(eval_ok("(if #f 1)"), "#<void>");
}

#[test]
fn test_and_or_return_deciding_value() {
    assert_eq!(eval_ok("(and)"), "#t");
    assert_eq!(eval_ok("(or)"), "#f");
    assert_eq!(eval_ok("(and 1 2)"), "2");
    assert_eq!(eval_ok("(and 1 #f 3)"), "#f");
    assert_eq!(eval_ok("(or #f 3)"), "3");
    assert_eq!(eval_ok("(or #f #f)"), "#f");
}

#[test]
fn test_and_short_circuits() {
    let src = "(define hit #f) (and #f (set! hit #t)) hit";
    assert_eq!(eval_ok(src), "#f");
    let src = "(define hit #f) (or 1 (set! hit #t)) hit";
    assert_eq!(eval_ok(src), "#f");
}

#[test]
fn test_begin() {
    assert_eq!(eval_ok("(begin 1 2 3)"), "3");
    assert_eq!(eval_ok("(begin)"), "#<void>");
}

#[test]
fn test_define_and_set() {
    assert_eq!(eval_ok("(define x 1)"), "#<void>");
    assert_eq!(eval_ok("(define x 1) (set! x (+ x 1)) x"), "2");
    assert_eq!(eval_ok("(define (f) (define y 1) (set! y 5) y) (f)"), "5");
}

#[test]
fn test_let_forms() {
    assert_eq!(eval_ok("(let ((a 1) (b 2)) (+ a b))"), "3");
    assert_eq!(eval_ok("(let ((x 1)) (let ((x 2) (y x)) y))"), "1");
    assert_eq!(eval_ok("(let* ((x 1) (y (+ x 1))) (* x y))"), "2");
    assert_eq!(eval_ok("(let () 5)"), "5");
}

#[test]
fn test_named_let() {
    let src = "(let loop ((i 0) (s 0)) (if (> i 10) s (loop (+ i 1) (+ s i))))";
    assert_eq!(eval_ok(src), "55");
}

#[test]
fn test_internal_defines_are_mutually_recursive() {
    let src = "
        (define (parity n)
          (define (ev? n) (if (= n 0) #t (od? (- n 1))))
          (define (od? n) (if (= n 0) #f (ev? (- n 1))))
          (ev? n))
        (list (parity 10) (parity 7))";
    assert_eq!(eval_ok(src), "(#t #f)");
}

#[test]
fn test_quote() {
    assert_eq!(eval_ok("'(1 . 2)"), "(1 . 2)");
    assert_eq!(eval_ok("'(a \"b\" #\\c #(1))"), "(a \"b\" #\\c #(1))");
    assert_eq!(eval_ok("(quote sym)"), "sym");
}

#[test]
fn test_quote_syntax() {
    assert_eq!(eval_ok("(syntax->datum (quote-syntax (a b)))"), "(a b)");
    assert_eq!(eval_ok("(syntax-line (quote-syntax (a b)))"), "1");
    assert_eq!(eval_ok("\n  (syntax-column (quote-syntax x))"), "32");
    assert_eq!(eval_ok("(syntax? (quote-syntax x))"), "#t");
}

#[test]
fn test_shadowed_primitive_is_an_ordinary_call() {
    assert_eq!(eval_ok("(let ((car (lambda (x) 42))) (car '(1)))"), "42");
    assert_eq!(eval_ok("((lambda (+) (+ 1 2)) -)"), "-1");
}

#[test]
fn test_opcode_sites_ignore_global_redefinition() {
    assert_eq!(eval_ok("(define (car x) 99) (car '(1 2))"), "1");
}

#[test]
fn test_primitives_are_first_class() {
    assert_eq!(eval_ok("(map car '((1 2) (3 4)))"), "(1 3)");
    assert_eq!(eval_ok("(apply + '(1 2 3))"), "6");
    assert_eq!(eval_ok("(define add +) (add 1 2 3)"), "6");
}

#[test]
fn test_set_of_special_form_rejected() {
    let msg = eval_err("(set! if 1)");
    assert!(msg.contains("set!: bad syntax"), "{}", msg);
}
