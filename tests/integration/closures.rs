// Closures: capture by reference, upvalue chains, fresh cells per call.
use crate::common::eval_ok;

#[test]
fn test_sibling_closures_share_a_variable() {
    let src = "
        (define pair
          (let ((n 0))
            (list (lambda () (set! n (+ n 1)))
                  (lambda () n))))
        ((car pair))
        ((car pair))
        ((cadr pair))";
    assert_eq!(eval_ok(src), "2");
}

#[test]
fn test_counter_generator() {
    let src = "
        (define (make-counter)
          (let ((count 0))
            (lambda () (set! count (+ count 1)) count)))
        (define a (make-counter))
        (define b (make-counter))
        (a) (a) (b)
        (list (a) (b))";
    assert_eq!(eval_ok(src), "(3 2)");
}

#[test]
fn test_mutation_after_capture_is_visible() {
    let src = "
        (define (f x)
          (let ((g (lambda () x)))
            (set! x 10)
            (g)))
        (f 1)";
    assert_eq!(eval_ok(src), "10");
}

#[test]
fn test_three_level_capture() {
    let src = "
        (define (outer a)
          (lambda (b)
            (lambda (c)
              (list a b c))))
        (((outer 1) 2) 3)";
    assert_eq!(eval_ok(src), "(1 2 3)");
}

#[test]
fn test_set_through_intermediate_lambda() {
    let src = "
        (define (box v)
          (lambda ()
            (lambda (new) (set! v new) v)))
        (define setter ((box 1)))
        (setter 5)";
    assert_eq!(eval_ok(src), "5");
}

#[test]
fn test_each_iteration_gets_fresh_cells() {
    let src = "
        (let loop ((i 0) (acc '()))
          (if (= i 3)
              (map (lambda (f) (f)) acc)
              (loop (+ i 1) (cons (lambda () i) acc))))";
    assert_eq!(eval_ok(src), "(2 1 0)");
}

#[test]
fn test_closure_over_global_sees_redefinition() {
    let src = "
        (define k 1)
        (define (get) k)
        (define k 2)
        (get)";
    assert_eq!(eval_ok(src), "2");
}

#[test]
fn test_named_procedure_prints_its_name() {
    assert_eq!(eval_ok("(define (sq x) (* x x)) sq"), "#<procedure:sq>");
    assert_eq!(eval_ok("(lambda (x) x)"), "#<procedure>");
    assert_eq!(eval_ok("car"), "#<procedure:car>");
}

#[test]
fn test_higher_order_composition() {
    let src = "
        (define (compose f g) (lambda (x) (f (g x))))
        (define add1 (lambda (x) (+ x 1)))
        ((compose add1 (compose add1 add1)) 0)";
    assert_eq!(eval_ok(src), "3");
}
