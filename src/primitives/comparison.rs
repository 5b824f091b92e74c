//! Numeric comparison and equality primitives.

use super::arithmetic::compare;
use super::def::PrimitiveDef;
use crate::error::LResult;
use crate::value::{eqv, Arity, Value};
use crate::vm::Vm;
use std::cmp::Ordering;

/// Apply the comparison named `op` to two numbers.
pub(crate) fn numeric_test(op: &str, a: &Value, b: &Value) -> LResult<bool> {
    let ord = compare(op, a, b)?;
    Ok(match op {
        "=" => ord == Some(Ordering::Equal),
        "<" => ord == Some(Ordering::Less),
        ">" => ord == Some(Ordering::Greater),
        "<=" => matches!(ord, Some(Ordering::Less | Ordering::Equal)),
        _ => matches!(ord, Some(Ordering::Greater | Ordering::Equal)),
    })
}

/// Every argument is checked before the chain is evaluated, so
/// `(< 2 1 'x)` is a contract error rather than `#f`.
fn chain(op: &str, args: &[Value]) -> LResult<Value> {
    for pair in args.windows(2) {
        compare(op, &pair[0], &pair[1])?;
    }
    if let [only] = args {
        compare(op, only, only)?;
    }
    for pair in args.windows(2) {
        if !numeric_test(op, &pair[0], &pair[1])? {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

fn prim_num_eq(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    chain("=", args)
}

fn prim_lt(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    chain("<", args)
}

fn prim_gt(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    chain(">", args)
}

fn prim_le(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    chain("<=", args)
}

fn prim_ge(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    chain(">=", args)
}

fn prim_eq(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    Ok(Value::Bool(eqv(&args[0], &args[1])))
}

fn prim_equal(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    Ok(Value::Bool(args[0] == args[1]))
}

fn prim_not(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    Ok(Value::Bool(!args[0].is_truthy()))
}

pub const PRIMITIVES: &[PrimitiveDef] = &[
    PrimitiveDef {
        name: "=",
        func: prim_num_eq,
        arity: Arity::AtLeast(1),
        doc: "Numeric equality across all arguments.",
        params: &["x", "ys"],
        category: "comparison",
        example: "(= 1 1.0) ;=> #t",
    },
    PrimitiveDef {
        name: "<",
        func: prim_lt,
        arity: Arity::AtLeast(1),
        doc: "Strictly increasing.",
        params: &["x", "ys"],
        category: "comparison",
        example: "(< 1 2 3) ;=> #t",
    },
    PrimitiveDef {
        name: ">",
        func: prim_gt,
        arity: Arity::AtLeast(1),
        doc: "Strictly decreasing.",
        params: &["x", "ys"],
        category: "comparison",
        example: "",
    },
    PrimitiveDef {
        name: "<=",
        func: prim_le,
        arity: Arity::AtLeast(1),
        doc: "Non-decreasing.",
        params: &["x", "ys"],
        category: "comparison",
        example: "",
    },
    PrimitiveDef {
        name: ">=",
        func: prim_ge,
        arity: Arity::AtLeast(1),
        doc: "Non-increasing.",
        params: &["x", "ys"],
        category: "comparison",
        example: "",
    },
    PrimitiveDef {
        name: "eq?",
        func: prim_eq,
        arity: Arity::Exact(2),
        doc: "Identity: atoms by value, heap objects by reference.",
        params: &["a", "b"],
        category: "equality",
        example: "(eq? 'a 'a) ;=> #t",
    },
    PrimitiveDef {
        name: "eqv?",
        func: prim_eq,
        arity: Arity::Exact(2),
        doc: "Same as eq?.",
        params: &["a", "b"],
        category: "equality",
        example: "",
    },
    PrimitiveDef {
        name: "equal?",
        func: prim_equal,
        arity: Arity::Exact(2),
        doc: "Structural equality over strings, pairs and vectors.",
        params: &["a", "b"],
        category: "equality",
        example: "(equal? (list 1 2) (list 1 2)) ;=> #t",
    },
    PrimitiveDef {
        name: "not",
        func: prim_not,
        arity: Arity::Exact(1),
        doc: "#t for #f, #f for everything else.",
        params: &["x"],
        category: "logic",
        example: "(not 0) ;=> #f",
    },
];
