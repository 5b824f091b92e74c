// Tail calls run in constant stack; other calls are bounded by the depth limit.
use crate::common::{eval_ok, eval_with_config};
use skein::Config;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[test]
fn test_mutual_tail_recursion() {
    let src = "
        (define (ev? n) (if (= n 0) #t (od? (- n 1))))
        (define (od? n) (if (= n 0) #f (ev? (- n 1))))
        (ev? 100001)";
    assert_eq!(eval_ok(src), "#f");
}

#[test]
fn test_tail_position_in_cond_and_or() {
    let src = "(define (f n) (cond ((= n 0) 'done) (else (f (- n 1))))) (f 50000)";
    assert_eq!(eval_ok(src), "done");
    let src = "(define (g n) (or (= n 0) (g (- n 1)))) (g 50000)";
    assert_eq!(eval_ok(src), "#t");
    let src = "(define (h n) (and #t (if (= n 0) 'ok (h (- n 1))))) (h 50000)";
    assert_eq!(eval_ok(src), "ok");
}

#[test]
fn test_tail_position_in_let_body() {
    let src = "(define (f n) (let ((m (- n 1))) (if (< m 0) 'end (f m)))) (f 50000)";
    assert_eq!(eval_ok(src), "end");
}

#[test]
fn test_tail_call_to_native() {
    assert_eq!(eval_ok("(define (f) (list 1 2)) (f)"), "(1 2)");
}

#[test]
fn test_non_tail_recursion_hits_depth_limit() {
    let config = Config::default().with_max_call_depth(50);
    let src = "(define (d n) (if (= n 0) 0 (+ 1 (d (- n 1))))) (d 100)";
    let err = eval_with_config(config, src).unwrap_err();
    assert!(err.to_string().contains("maximum call depth of 50 exceeded"), "{}", err);

    let config = Config::default().with_max_call_depth(200);
    let value = eval_with_config(config, src).unwrap();
    assert_eq!(value.to_string(), "100");
}

#[test]
fn test_depth_counts_reentry_through_map() {
    let config = Config::default().with_max_call_depth(40);
    let src = "(define (nest n) (if (= n 0) '() (map (lambda (x) (nest (- n 1))) '(1)))) (nest 100)";
    let err = eval_with_config(config, src).unwrap_err();
    assert!(err.to_string().contains("maximum call depth"), "{}", err);
}

#[test]
fn test_instruction_limit() {
    let config = Config::default().with_instruction_limit(50_000);
    let err = eval_with_config(config, "(define (spin n) (spin (+ n 1))) (spin 0)").unwrap_err();
    assert!(err.to_string().contains("instruction limit of 50000 exceeded"), "{}", err);
}

#[test]
fn test_interrupt_flag_stops_run() {
    let flag = Arc::new(AtomicBool::new(true));
    let config = Config::default().with_interrupt(flag);
    let err = eval_with_config(config, "(define (spin) (spin)) (spin)").unwrap_err();
    assert!(err.to_string().contains("interrupted"), "{}", err);
}
