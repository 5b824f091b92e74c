// The native library through the evaluator.
use crate::common::{eval_err, eval_ok, eval_output};

#[test]
fn test_arithmetic_grouping_and_identities() {
    assert_eq!(eval_ok("(+ 6 4)"), "10");
    assert_eq!(eval_ok("(+ 1 2 3 4)"), "10");
    assert_eq!(eval_ok("(+)"), "0");
    assert_eq!(eval_ok("(*)"), "1");
    assert_eq!(eval_ok("(- 5)"), "-5");
    assert_eq!(eval_ok("(- 10 1 2 3)"), "4");
    assert_eq!(eval_ok("(/ 100 2 5)"), "10");
}

#[test]
fn test_division_exactness() {
    assert_eq!(eval_ok("(/ 6 3)"), "2");
    assert_eq!(eval_ok("(/ 1 4)"), "0.25");
    assert_eq!(eval_ok("(/ 2)"), "0.5");
}

#[test]
fn test_mixed_numbers() {
    assert_eq!(eval_ok("(+ 1 2.5)"), "3.5");
    assert_eq!(eval_ok("(* 2 1.5)"), "3.0");
    assert_eq!(eval_ok("(= 1 1.0)"), "#t");
    assert_eq!(eval_ok("(< 1 2 3)"), "#t");
    assert_eq!(eval_ok("(< 1 3 2)"), "#f");
}

#[test]
fn test_first_class_arithmetic_matches_inline_grouping() {
    assert_eq!(eval_ok("(+ 0.1 0.2 0.3)"), eval_ok("(apply + (list 0.1 0.2 0.3))"));
    assert_eq!(eval_ok("(+ 0.1 0.2 0.3)"), eval_ok("(define f +) (f 0.1 0.2 0.3)"));
    assert_eq!(eval_ok("(+ 0.1 0.2 0.3)"), eval_ok("(+ 0.1 (+ 0.2 0.3))"));
    assert_eq!(eval_ok("(- 1.0 0.1 0.2 0.3)"), eval_ok("(apply - (list 1.0 0.1 0.2 0.3))"));
    assert_eq!(eval_ok("(- 1.0 0.1 0.2 0.3)"), "0.4");
}

#[test]
fn test_nary_operands_run_left_to_right() {
    let prelude = "
        (define seen '())
        (define (note x) (set! seen (cons x seen)) x)";
    let flat = format!("{} (list (+ (note 0.1) (note 0.2) (note 0.3)) seen)", prelude);
    let nested = format!("{} (list (+ (note 0.1) (+ (note 0.2) (note 0.3))) seen)", prelude);
    let applied = format!("{} (list (apply + (list (note 0.1) (note 0.2) (note 0.3))) seen)", prelude);
    assert_eq!(eval_ok(&flat), eval_ok(&nested));
    assert_eq!(eval_ok(&flat), eval_ok(&applied));
    assert!(eval_ok(&flat).ends_with("(0.3 0.2 0.1))"), "{}", eval_ok(&flat));
}

#[test]
fn test_integer_operations() {
    assert_eq!(eval_ok("(quotient 17 5)"), "3");
    assert_eq!(eval_ok("(remainder -7 3)"), "-1");
    assert_eq!(eval_ok("(modulo -7 3)"), "2");
    assert_eq!(eval_ok("(abs -4)"), "4");
    assert_eq!(eval_ok("(min 3 1 2)"), "1");
    assert_eq!(eval_ok("(max 3 1 2)"), "3");
    assert_eq!(eval_ok("(zero? 0)"), "#t");
}

#[test]
fn test_lists() {
    assert_eq!(eval_ok("(list 1 2 3)"), "(1 2 3)");
    assert_eq!(eval_ok("(cons 1 2)"), "(1 . 2)");
    assert_eq!(eval_ok("(length '(1 2 3))"), "3");
    assert_eq!(eval_ok("(append '(1) '(2 3) '() '(4))"), "(1 2 3 4)");
    assert_eq!(eval_ok("(reverse '(1 2 3))"), "(3 2 1)");
    assert_eq!(eval_ok("(list-ref '(a b c) 2)"), "c");
    assert_eq!(eval_ok("(cadr '(1 2 3))"), "2");
    assert_eq!(eval_ok("(cddr '(1 2 3))"), "(3)");
    assert_eq!(eval_ok("(caddr '(1 2 3))"), "3");
    assert_eq!(eval_ok("(null? '())"), "#t");
    assert_eq!(eval_ok("(pair? '())"), "#f");
    assert_eq!(eval_ok("(list? '(1 2))"), "#t");
}

#[test]
fn test_list_ref_out_of_range() {
    let msg = eval_err("(list-ref '(a b) 5)");
    assert!(msg.contains("list-ref: index is out of range"), "{}", msg);
    assert!(msg.contains("valid range: [0, 1]"), "{}", msg);
}

#[test]
fn test_vectors() {
    assert_eq!(eval_ok("(vector 1 \"a\" #\\b)"), "#(1 \"a\" #\\b)");
    assert_eq!(eval_ok("(make-vector 3 0)"), "#(0 0 0)");
    assert_eq!(eval_ok("(vector-length (vector 1 2))"), "2");
    assert_eq!(eval_ok("(define v (vector 1 2 3)) (vector-set! v 0 9) v"), "#(9 2 3)");
    assert_eq!(eval_ok("(vector->list (vector 1 2))"), "(1 2)");
    assert_eq!(eval_ok("(list->vector '(1 2))"), "#(1 2)");
}

#[test]
fn test_strings() {
    assert_eq!(eval_ok("(string-length \"hello\")"), "5");
    assert_eq!(eval_ok("(string-append \"a\" \"b\" \"c\")"), "\"abc\"");
    assert_eq!(eval_ok("(string-ref \"abc\" 1)"), "#\\b");
    assert_eq!(eval_ok("(substring \"hello\" 1 3)"), "\"el\"");
    assert_eq!(eval_ok("(number->string 42)"), "\"42\"");
    assert_eq!(eval_ok("(symbol->string 'abc)"), "\"abc\"");
    assert_eq!(eval_ok("(string->symbol \"xyz\")"), "xyz");
}

#[test]
fn test_hash_tables() {
    let src = "
        (define h (make-hash-table))
        (hash-set! h 'a 1)
        (hash-set! h \"k\" 2)
        (list (hash-ref h 'a) (hash-ref h \"k\") (hash-ref h 'zz 'none) (hash-count h))";
    assert_eq!(eval_ok(src), "(1 2 none 2)");
    let src = "(define h (make-hash-table 'a 1 'b 2)) (hash-remove! h 'a) (hash-keys h)";
    assert_eq!(eval_ok(src), "(b)");
    assert_eq!(eval_ok("(make-hash-table 'a 1)"), "#hash((a . 1))");
}

#[test]
fn test_cyclic_vector_prints_and_compares() {
    assert_eq!(eval_ok("(define v (vector 1 2)) (vector-set! v 0 v) v"), "#(... 2)");
    let src = "
        (define a (vector 1)) (vector-set! a 0 a)
        (define b (vector 1)) (vector-set! b 0 b)
        (equal? a b)";
    assert_eq!(eval_ok(src), "#t");
    let msg = eval_err("(define v (vector 1)) (vector-set! v 0 v) (car v)");
    assert!(msg.contains("given: #(...)"), "{}", msg);
}

#[test]
fn test_missing_hash_key() {
    let msg = eval_err("(hash-ref (make-hash-table) 'nope)");
    assert!(msg.contains("hash-ref: contract violation"), "{}", msg);
    assert!(msg.contains("given: nope"), "{}", msg);
}

#[test]
fn test_equality() {
    assert_eq!(eval_ok("(eq? 'a 'a)"), "#t");
    assert_eq!(eval_ok("(eqv? 1.5 1.5)"), "#t");
    assert_eq!(eval_ok("(eq? '(1) '(1))"), "#f");
    assert_eq!(eval_ok("(equal? '(1 (2 #(3))) '(1 (2 #(3))))"), "#t");
    assert_eq!(eval_ok("(equal? \"ab\" \"ab\")"), "#t");
    assert_eq!(eval_ok("(not 1)"), "#f");
}

#[test]
fn test_predicates() {
    assert_eq!(eval_ok("(number? 1.5)"), "#t");
    assert_eq!(eval_ok("(integer? 1.5)"), "#f");
    assert_eq!(eval_ok("(string? \"s\")"), "#t");
    assert_eq!(eval_ok("(symbol? 'a)"), "#t");
    assert_eq!(eval_ok("(procedure? car)"), "#t");
    assert_eq!(eval_ok("(procedure? (lambda () 1))"), "#t");
    assert_eq!(eval_ok("(boolean? #f)"), "#t");
    assert_eq!(eval_ok("(char? #\\a)"), "#t");
    assert_eq!(eval_ok("(vector? (vector))"), "#t");
    assert_eq!(eval_ok("(hash? (make-hash-table))"), "#t");
}

#[test]
fn test_higher_order() {
    assert_eq!(eval_ok("(map + '(1 2) '(10 20))"), "(11 22)");
    assert_eq!(eval_ok("(apply + 1 2 '(3 4))"), "10");
    assert_eq!(eval_ok("(apply (lambda (a &optional b) (list a b)) '(1))"), "(1 #f)");
    let (result, out) = eval_output("(for-each (lambda (x) (display x)) '(1 2 3))");
    assert_eq!(result.unwrap().to_string(), "#<void>");
    assert_eq!(out, "123");
}

#[test]
fn test_map_requires_equal_lengths() {
    let msg = eval_err("(map + '(1 2) '(1))");
    assert!(msg.contains("lists of the same length"), "{}", msg);
}

#[test]
fn test_output() {
    let (_, out) = eval_output("(display \"hi\") (write \"hi\") (newline) (display #\\x) (write #\\x)");
    assert_eq!(out, "hi\"hi\"\nx#\\x");
}
