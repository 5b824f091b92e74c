//! Numeric operations.
//!
//! Integers are 64-bit and wrap on overflow. Any float operand makes the
//! result a float. `/` stays exact when the integer quotient is exact.

use super::def::PrimitiveDef;
use crate::error::{Error, LResult};
use crate::value::{Arity, Value};
use crate::vm::Vm;
use std::cmp::Ordering;

#[derive(Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn of(op: &str, v: &Value) -> LResult<Num> {
        match v {
            Value::Int(n) => Ok(Num::Int(*n)),
            Value::Float(x) => Ok(Num::Float(*x)),
            _ => Err(Error::contract(op, "number?", v)),
        }
    }

    fn to_f64(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Float(x) => x,
        }
    }
}

fn binary(
    op: &str,
    a: &Value,
    b: &Value,
    int: fn(i64, i64) -> i64,
    float: fn(f64, f64) -> f64,
) -> LResult<Value> {
    match (Num::of(op, a)?, Num::of(op, b)?) {
        (Num::Int(x), Num::Int(y)) => Ok(Value::Int(int(x, y))),
        (x, y) => Ok(Value::Float(float(x.to_f64(), y.to_f64()))),
    }
}

pub(crate) fn add(a: &Value, b: &Value) -> LResult<Value> {
    binary("+", a, b, i64::wrapping_add, |x, y| x + y)
}

pub(crate) fn sub(a: &Value, b: &Value) -> LResult<Value> {
    binary("-", a, b, i64::wrapping_sub, |x, y| x - y)
}

pub(crate) fn mul(a: &Value, b: &Value) -> LResult<Value> {
    binary("*", a, b, i64::wrapping_mul, |x, y| x * y)
}

pub(crate) fn div(a: &Value, b: &Value) -> LResult<Value> {
    match (Num::of("/", a)?, Num::of("/", b)?) {
        (Num::Int(_), Num::Int(0)) => Err(Error::division_by_zero("/")),
        (Num::Int(x), Num::Int(y)) if x.wrapping_rem(y) == 0 => Ok(Value::Int(x.wrapping_div(y))),
        (x, y) => Ok(Value::Float(x.to_f64() / y.to_f64())),
    }
}

pub(crate) fn neg(a: &Value) -> LResult<Value> {
    match Num::of("-", a)? {
        Num::Int(n) => Ok(Value::Int(n.wrapping_neg())),
        Num::Float(x) => Ok(Value::Float(-x)),
    }
}

/// Numeric ordering; `None` when a NaN is involved.
pub(crate) fn compare(op: &str, a: &Value, b: &Value) -> LResult<Option<Ordering>> {
    match (Num::of(op, a)?, Num::of(op, b)?) {
        (Num::Int(x), Num::Int(y)) => Ok(Some(x.cmp(&y))),
        (x, y) => Ok(x.to_f64().partial_cmp(&y.to_f64())),
    }
}

fn check_numbers(op: &str, args: &[Value]) -> LResult<()> {
    args.iter().try_for_each(|a| Num::of(op, a).map(|_| ()))
}

/// `a op (b op (c ...))`, the grouping the n-ary operator forms compile to.
fn fold_right(
    args: &[Value],
    op: fn(&Value, &Value) -> LResult<Value>,
) -> LResult<Option<Value>> {
    let Some((last, init)) = args.split_last() else {
        return Ok(None);
    };
    init.iter()
        .rev()
        .try_fold(last.clone(), |acc, x| op(x, &acc))
        .map(Some)
}

fn prim_add(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    check_numbers("+", args)?;
    Ok(fold_right(args, add)?.unwrap_or(Value::Int(0)))
}

/// `(- a b c)` is `(- a (+ b c))`.
fn prim_sub(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    check_numbers("-", args)?;
    match args {
        [x] => neg(x),
        [first, rest @ ..] => match fold_right(rest, add)? {
            Some(sum) => sub(first, &sum),
            None => neg(first),
        },
        [] => Ok(Value::Int(0)),
    }
}

fn prim_mul(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    check_numbers("*", args)?;
    Ok(fold_right(args, mul)?.unwrap_or(Value::Int(1)))
}

/// `(/ a b c)` is `(/ a (* b c))`.
fn prim_div(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    check_numbers("/", args)?;
    match args {
        [first, rest @ ..] => match fold_right(rest, mul)? {
            Some(product) => div(first, &product),
            None => div(&Value::Int(1), first),
        },
        [] => Ok(Value::Int(1)),
    }
}

fn integers(op: &str, a: &Value, b: &Value) -> LResult<(i64, i64)> {
    let x = a.as_int().ok_or_else(|| Error::contract(op, "integer?", a))?;
    let y = b.as_int().ok_or_else(|| Error::contract(op, "integer?", b))?;
    if y == 0 {
        return Err(Error::division_by_zero(op));
    }
    Ok((x, y))
}

fn prim_quotient(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    let (x, y) = integers("quotient", &args[0], &args[1])?;
    Ok(Value::Int(x.wrapping_div(y)))
}

fn prim_remainder(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    let (x, y) = integers("remainder", &args[0], &args[1])?;
    Ok(Value::Int(x.wrapping_rem(y)))
}

/// Result takes the sign of the divisor.
fn prim_modulo(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    let (x, y) = integers("modulo", &args[0], &args[1])?;
    let r = x.wrapping_rem(y);
    if r != 0 && (r < 0) != (y < 0) {
        Ok(Value::Int(r + y))
    } else {
        Ok(Value::Int(r))
    }
}

fn prim_abs(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    match Num::of("abs", &args[0])? {
        Num::Int(n) => Ok(Value::Int(n.wrapping_abs())),
        Num::Float(x) => Ok(Value::Float(x.abs())),
    }
}

fn extremum(op: &str, args: &[Value], keep: Ordering) -> LResult<Value> {
    check_numbers(op, args)?;
    let mut best = args[0].clone();
    let mut inexact = matches!(best, Value::Float(_));
    for x in &args[1..] {
        inexact |= matches!(x, Value::Float(_));
        if compare(op, x, &best)? == Some(keep) {
            best = x.clone();
        }
    }
    match best {
        Value::Int(n) if inexact => Ok(Value::Float(n as f64)),
        other => Ok(other),
    }
}

fn prim_min(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    extremum("min", args, Ordering::Less)
}

fn prim_max(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    extremum("max", args, Ordering::Greater)
}

fn prim_is_zero(_vm: &mut Vm, args: &[Value]) -> LResult<Value> {
    Ok(Value::Bool(match Num::of("zero?", &args[0])? {
        Num::Int(n) => n == 0,
        Num::Float(x) => x == 0.0,
    }))
}

pub const PRIMITIVES: &[PrimitiveDef] = &[
    PrimitiveDef {
        name: "+",
        func: prim_add,
        arity: Arity::AtLeast(0),
        doc: "Sum all arguments. Returns 0 for no arguments.",
        params: &["xs"],
        category: "arithmetic",
        example: "(+) ;=> 0\n(+ 1 2 3) ;=> 6",
    },
    PrimitiveDef {
        name: "-",
        func: prim_sub,
        arity: Arity::AtLeast(1),
        doc: "Subtract the sum of the remaining arguments. A single argument is negated.",
        params: &["x", "ys"],
        category: "arithmetic",
        example: "(- 10 3 2) ;=> 5\n(- 5) ;=> -5",
    },
    PrimitiveDef {
        name: "*",
        func: prim_mul,
        arity: Arity::AtLeast(0),
        doc: "Multiply all arguments. Returns 1 for no arguments.",
        params: &["xs"],
        category: "arithmetic",
        example: "(* 2 3 4) ;=> 24",
    },
    PrimitiveDef {
        name: "/",
        func: prim_div,
        arity: Arity::AtLeast(1),
        doc: "Divide by the product of the remaining arguments. Exact integer quotients stay integers.",
        params: &["x", "ys"],
        category: "arithmetic",
        example: "(/ 12 3) ;=> 4\n(/ 1 2) ;=> 0.5",
    },
    PrimitiveDef {
        name: "quotient",
        func: prim_quotient,
        arity: Arity::Exact(2),
        doc: "Integer division truncating toward zero.",
        params: &["n", "d"],
        category: "arithmetic",
        example: "(quotient -7 2) ;=> -3",
    },
    PrimitiveDef {
        name: "remainder",
        func: prim_remainder,
        arity: Arity::Exact(2),
        doc: "Remainder with the sign of the dividend.",
        params: &["n", "d"],
        category: "arithmetic",
        example: "(remainder -7 2) ;=> -1",
    },
    PrimitiveDef {
        name: "modulo",
        func: prim_modulo,
        arity: Arity::Exact(2),
        doc: "Remainder with the sign of the divisor.",
        params: &["n", "d"],
        category: "arithmetic",
        example: "(modulo -7 2) ;=> 1",
    },
    PrimitiveDef {
        name: "abs",
        func: prim_abs,
        arity: Arity::Exact(1),
        doc: "Absolute value.",
        params: &["x"],
        category: "arithmetic",
        example: "",
    },
    PrimitiveDef {
        name: "min",
        func: prim_min,
        arity: Arity::AtLeast(1),
        doc: "Smallest argument; a float if any argument is a float.",
        params: &["x", "xs"],
        category: "arithmetic",
        example: "(min 3 1 2) ;=> 1",
    },
    PrimitiveDef {
        name: "max",
        func: prim_max,
        arity: Arity::AtLeast(1),
        doc: "Largest argument; a float if any argument is a float.",
        params: &["x", "xs"],
        category: "arithmetic",
        example: "(max 1 2.0) ;=> 2.0",
    },
    PrimitiveDef {
        name: "zero?",
        func: prim_is_zero,
        arity: Arity::Exact(1),
        doc: "Whether a number is zero.",
        params: &["x"],
        category: "arithmetic",
        example: "",
    },
];
