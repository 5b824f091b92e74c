// Property tests for arithmetic.
//
// Integer arithmetic wraps, so the algebraic laws hold for every input,
// and the n-ary forms agree with their right-nested binary expansion.
// Float addition is not associative, which makes the grouping visible.

use crate::common::eval;
use proptest::prelude::*;
use skein::Value;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn add_associative(a in any::<i64>(), b in any::<i64>(), c in any::<i64>()) {
        let left = eval(&format!("(+ (+ {} {}) {})", a, b, c)).unwrap();
        let right = eval(&format!("(+ {} (+ {} {}))", a, b, c)).unwrap();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn add_commutative(a in any::<i64>(), b in any::<i64>()) {
        let left = eval(&format!("(+ {} {})", a, b)).unwrap();
        let right = eval(&format!("(+ {} {})", b, a)).unwrap();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn nary_add_matches_right_fold(xs in prop::collection::vec(-1000i64..1000, 2..8)) {
        let flat = eval(&format!("(+ {})", join(&xs))).unwrap();
        prop_assert_eq!(flat, Value::Int(xs.iter().sum()));
    }

    #[test]
    fn nary_sub_subtracts_the_sum(a in -1000i64..1000, rest in prop::collection::vec(-1000i64..1000, 1..6)) {
        let nary = eval(&format!("(- {} {})", a, join(&rest))).unwrap();
        let nested = eval(&format!("(- {} (+ 0 {}))", a, join(&rest))).unwrap();
        prop_assert_eq!(nary.clone(), nested);
        prop_assert_eq!(nary, Value::Int(a - rest.iter().sum::<i64>()));
    }

    #[test]
    fn native_and_opcode_agree(a in -10000i64..10000, b in -10000i64..10000) {
        let opcode = eval(&format!("(* {} {})", a, b)).unwrap();
        let native = eval(&format!("(apply * (list {} {}))", a, b)).unwrap();
        prop_assert_eq!(opcode, native);
    }

    #[test]
    fn float_sum_groups_from_the_right(xs in prop::collection::vec(finite(), 3..7)) {
        let args = join_floats(&xs);
        let expected = Value::Float(right_fold(&xs, |x, acc| x + acc));
        let inline = eval(&format!("(+ {})", args)).unwrap();
        let applied = eval(&format!("(apply + (list {}))", args)).unwrap();
        let aliased = eval(&format!("(define add +) (add {})", args)).unwrap();
        prop_assert_eq!(&inline, &expected);
        prop_assert_eq!(&applied, &expected);
        prop_assert_eq!(&aliased, &expected);
    }

    #[test]
    fn float_difference_and_quotient_agree(a in finite(), rest in prop::collection::vec(finite(), 2..6)) {
        let args = format!("{:?} {}", a, join_floats(&rest));
        for op in ["-", "*", "/"] {
            let inline = eval(&format!("({} {})", op, args)).unwrap();
            let applied = eval(&format!("(apply {} (list {}))", op, args)).unwrap();
            prop_assert_eq!(inline, applied, "operator {}", op);
        }
        let expected = a - right_fold(&rest, |x, acc| x + acc);
        prop_assert_eq!(eval(&format!("(- {})", args)).unwrap(), Value::Float(expected));
    }

    #[test]
    fn exact_division_stays_integer(a in -1000i64..1000, b in 1i64..50) {
        let v = eval(&format!("(/ {} {})", a * b, b)).unwrap();
        prop_assert_eq!(v, Value::Int(a));
    }

    #[test]
    fn comparison_matches_rust(a in any::<i64>(), b in any::<i64>()) {
        let v = eval(&format!("(< {} {})", a, b)).unwrap();
        prop_assert_eq!(v, Value::Bool(a < b));
    }
}

/// Floats with three decimals, printed without an exponent.
fn finite() -> impl Strategy<Value = f64> {
    (-100_000i64..100_000).prop_map(|n| n as f64 / 1000.0)
}

fn right_fold(xs: &[f64], op: fn(f64, f64) -> f64) -> f64 {
    let (last, init) = xs.split_last().unwrap();
    init.iter().rev().fold(*last, |acc, x| op(*x, acc))
}

fn join_floats(xs: &[f64]) -> String {
    xs.iter().map(|x| format!("{:?}", x)).collect::<Vec<_>>().join(" ")
}

fn join(xs: &[i64]) -> String {
    xs.iter().map(|x| x.to_string()).collect::<Vec<_>>().join(" ")
}
